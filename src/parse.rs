//! Value expression parsing.
//!
//! [`parse_value`] turns one trimmed, comment-free value expression into a
//! [`Value`]. Arrays and inline tables recurse back into it for their
//! elements. Splitting on `,`, `.` and `=` only ever happens at the top
//! level: outside both string kinds and outside nested `[]` / `{}`.
//!
//! ## Examples
//!
//! ```rust
//! use toml2php::parse::{parse_value, split_dotted, key_segments};
//! use toml2php::Value;
//!
//! let value = parse_value("{ name = \"db\", ports = [ 8001, 8002 ] }").unwrap();
//! let table = value.as_table().unwrap();
//! assert_eq!(table.get("name"), Some(&Value::from("db")));
//!
//! assert_eq!(split_dotted(r#"site."google.com""#), vec!["site", "\"google.com\""]);
//! assert_eq!(key_segments(r#"site."google.com""#).unwrap(), vec!["site", "google.com"]);
//! ```

use crate::{Error, Number, Result, Table, Value};

/// Deepest nesting of arrays, inline tables and key paths that is accepted.
pub const MAX_DEPTH: usize = 128;

/// Parses a single value expression.
///
/// Dispatch is on the trimmed text, first match wins: `true`/`false`,
/// numeric literal, triple-quoted string, single-quoted literal string,
/// double-quoted basic string, array, inline table.
///
/// Basic string content is stored as written, backslash escapes included.
///
/// # Errors
///
/// [`Error::EmptyValue`] for blank input, [`Error::UnknownValueType`] when no
/// form matches, [`Error::NestingTooDeep`] past [`MAX_DEPTH`], plus the
/// array, inline-table and string errors of the nested forms.
///
/// # Examples
///
/// ```rust
/// use toml2php::parse::parse_value;
/// use toml2php::{Error, Value};
///
/// assert_eq!(parse_value(" true ").unwrap(), Value::Boolean(true));
/// assert_eq!(parse_value("'C:\\temp'").unwrap(), Value::from("C:\\temp"));
/// assert_eq!(parse_value("   ").unwrap_err(), Error::EmptyValue);
/// assert!(matches!(parse_value("nope"), Err(Error::UnknownValueType(_))));
/// ```
pub fn parse_value(text: &str) -> Result<Value> {
    parse_value_at(text, 0)
}

/// Parses a value that sits `depth` levels below the document root.
pub(crate) fn parse_value_at(text: &str, depth: usize) -> Result<Value> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::EmptyValue);
    }
    match text {
        "true" => return Ok(Value::Boolean(true)),
        "false" => return Ok(Value::Boolean(false)),
        _ => {}
    }
    if let Some(number) = Number::parse(text) {
        return Ok(Value::Number(number));
    }

    for delimiter in ["'''", "\"\"\""] {
        if text.starts_with(delimiter) {
            return multiline_string(text, delimiter)
                .ok_or_else(|| Error::MalformedMultilineString(text.to_string()));
        }
    }
    if let Some(content) = delimited(text, '\'', '\'') {
        if content.contains('\n') {
            return Err(Error::MultilineNotAllowed(text.to_string()));
        }
        return Ok(Value::String(content.to_string()));
    }
    if let Some(content) = delimited(text, '"', '"') {
        return Ok(Value::String(content.to_string()));
    }
    if text.starts_with('[') && text.ends_with(']') {
        return parse_array_at(text, depth).map(Value::Array);
    }
    if text.starts_with('{') && text.ends_with('}') {
        return parse_inline_table_at(text, depth).map(Value::Table);
    }
    Err(Error::UnknownValueType(text.to_string()))
}

/// Strips the triple delimiters and one leading newline.
fn multiline_string(text: &str, delimiter: &str) -> Option<Value> {
    if text.len() < delimiter.len() * 2 {
        return None;
    }
    let content = text.strip_prefix(delimiter)?.strip_suffix(delimiter)?;
    let content = content.strip_prefix('\n').unwrap_or(content);
    Some(Value::String(content.to_string()))
}

/// Returns the text between `open` and `close` when `text` is at least two
/// characters long and wrapped in them.
fn delimited(text: &str, open: char, close: char) -> Option<&str> {
    if text.chars().count() < 2 {
        return None;
    }
    text.strip_prefix(open)?.strip_suffix(close)
}

/// Parses an array expression into its elements.
///
/// Elements are separated by top-level commas and parsed with
/// [`parse_value`]. Blank elements, such as the one after a trailing comma,
/// are skipped. Element kinds may be mixed.
///
/// # Errors
///
/// [`Error::MalformedArray`] if the text does not open with `[`, the closing
/// `]` is missing, or anything but whitespace follows it.
///
/// # Examples
///
/// ```rust
/// use toml2php::parse::parse_array;
///
/// let items = parse_array("[ 'literal,', 'strings', 'quo\"ted' ]").unwrap();
/// assert_eq!(items.len(), 3);
/// assert_eq!(items[0].as_str(), Some("literal,"));
/// assert_eq!(items[2].as_str(), Some("quo\"ted"));
/// ```
pub fn parse_array(text: &str) -> Result<Vec<Value>> {
    parse_array_at(text, 0)
}

fn parse_array_at(text: &str, depth: usize) -> Result<Vec<Value>> {
    let depth = check_depth(depth + 1)?;
    let malformed = || Error::MalformedArray(text.to_string());
    let body = text.trim().strip_prefix('[').ok_or_else(malformed)?;

    let mut nesting = Nesting::default();
    let mut items = Vec::new();
    let mut start = 0;
    for (index, ch) in body.char_indices() {
        if nesting.at_top_level() {
            match ch {
                ',' => {
                    push_element(&mut items, &body[start..index], depth)?;
                    start = index + 1;
                    continue;
                }
                ']' => {
                    push_element(&mut items, &body[start..index], depth)?;
                    if !body[index + 1..].trim().is_empty() {
                        return Err(malformed());
                    }
                    return Ok(items);
                }
                _ => {}
            }
        }
        nesting.step(ch);
    }
    Err(malformed())
}

fn push_element(items: &mut Vec<Value>, fragment: &str, depth: usize) -> Result<()> {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        items.push(parse_value_at(fragment, depth)?);
    }
    Ok(())
}

/// Returns `depth` unchanged while it is within [`MAX_DEPTH`].
pub(crate) fn check_depth(depth: usize) -> Result<usize> {
    if depth > MAX_DEPTH {
        return Err(Error::NestingTooDeep { limit: MAX_DEPTH });
    }
    Ok(depth)
}

/// Parses an inline table expression.
///
/// Each top-level `key = value` field becomes a singleton table that is
/// merged into the result, so a repeated key keeps its first position and
/// its last value. Dotted field names build nested tables.
///
/// # Errors
///
/// [`Error::InvalidInlineTable`] if the text is not wrapped in braces or has
/// an empty field, [`Error::MissingAssignment`] if a field has no `=` or no
/// name.
///
/// # Examples
///
/// ```rust
/// use toml2php::parse::parse_inline_table;
///
/// let table = parse_inline_table("{a=1, a=2}").unwrap();
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get("a").and_then(|v| v.as_i64()), Some(2));
///
/// assert!(parse_inline_table("{}").unwrap().is_empty());
/// ```
pub fn parse_inline_table(text: &str) -> Result<Table> {
    parse_inline_table_at(text, 0)
}

fn parse_inline_table_at(text: &str, depth: usize) -> Result<Table> {
    let depth = check_depth(depth + 1)?;
    let invalid = || Error::InvalidInlineTable(text.to_string());
    let body = text
        .trim()
        .strip_prefix('{')
        .and_then(|body| body.strip_suffix('}'))
        .ok_or_else(invalid)?;

    let mut table = Table::new();
    if body.trim().is_empty() {
        return Ok(table);
    }
    for field in split_top_level(body, ',') {
        if field.trim().is_empty() {
            return Err(invalid());
        }
        table.merge(parse_field(field, depth)?);
    }
    Ok(table)
}

fn parse_field(field: &str, depth: usize) -> Result<Table> {
    let missing = || Error::MissingAssignment(field.trim().to_string());
    let (key, value) = split_assignment(field).ok_or_else(missing)?;
    let keys = key_segments(key).ok_or_else(missing)?;
    // Every key segment past the first opens another table.
    let depth = check_depth(depth + keys.len().saturating_sub(1))?;

    let mut table = Table::new();
    table.set_path(&keys, parse_value_at(value, depth)?);
    Ok(table)
}

/// Splits `text` at its first `=` outside quotes.
pub(crate) fn split_assignment(text: &str) -> Option<(&str, &str)> {
    let mut nesting = Nesting::default();
    for (index, ch) in text.char_indices() {
        if ch == '=' && !nesting.in_string() {
            return Some((&text[..index], &text[index + 1..]));
        }
        nesting.step(ch);
    }
    None
}

/// Splits a dotted name at every `.` outside quotes.
///
/// Segments keep their quotes and surrounding whitespace.
#[must_use]
pub fn split_dotted(name: &str) -> Vec<&str> {
    split_top_level(name, '.')
}

/// Splits a dotted key or table name into clean key segments.
///
/// Each segment is trimmed and a quote pair wrapping the whole segment is
/// removed. Returns `None` if any segment is blank before unquoting.
///
/// # Examples
///
/// ```rust
/// use toml2php::parse::key_segments;
///
/// assert_eq!(key_segments("a . b").unwrap(), vec!["a", "b"]);
/// assert_eq!(key_segments("'x.y'.\"\"").unwrap(), vec!["x.y", ""]);
/// assert!(key_segments("a..b").is_none());
/// ```
#[must_use]
pub fn key_segments(name: &str) -> Option<Vec<String>> {
    split_dotted(name)
        .into_iter()
        .map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                return None;
            }
            let unquoted = delimited(segment, '"', '"')
                .or_else(|| delimited(segment, '\'', '\''))
                .unwrap_or(segment);
            Some(unquoted.to_string())
        })
        .collect()
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut nesting = Nesting::default();
    let mut parts = Vec::new();
    let mut start = 0;
    for (index, ch) in text.char_indices() {
        if ch == separator && nesting.at_top_level() {
            parts.push(&text[start..index]);
            start = index + ch.len_utf8();
            continue;
        }
        nesting.step(ch);
    }
    parts.push(&text[start..]);
    parts
}

/// Quote and bracket state while scanning a value expression.
#[derive(Debug, Default)]
struct Nesting {
    basic: bool,
    literal: bool,
    escaped: bool,
    brackets: usize,
    braces: usize,
}

impl Nesting {
    fn in_string(&self) -> bool {
        self.basic || self.literal
    }

    fn at_top_level(&self) -> bool {
        !self.in_string() && self.brackets == 0 && self.braces == 0
    }

    fn step(&mut self, ch: char) {
        if self.escaped {
            self.escaped = false;
            return;
        }
        match ch {
            '\\' if self.basic => self.escaped = true,
            '"' if !self.literal => self.basic = !self.basic,
            '\'' if !self.basic => self.literal = !self.literal,
            '[' if !self.in_string() => self.brackets += 1,
            ']' if !self.in_string() => self.brackets = self.brackets.saturating_sub(1),
            '{' if !self.in_string() => self.braces += 1,
            '}' if !self.in_string() => self.braces = self.braces.saturating_sub(1),
            _ => {}
        }
    }
}
