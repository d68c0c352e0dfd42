//! Line-oriented document parsing.
//!
//! A document is normalized first, then read one line at a time:
//!
//! - blank lines and `#` lines are skipped
//! - `[[name]]` appends a new table to the array of tables at `name`
//! - `[name]` creates or re-enters the table at `name`
//! - `key = value` stores a value under the current table
//!
//! Multi-line strings are rebuilt by joining the lines that follow an
//! opening `"""` or `'''` until one closes it.
//!
//! Line numbers in errors refer to the normalized text. Normalization keeps
//! every newline outside arrays, so these match the source lines unless an
//! array spanning several lines precedes the error.

use crate::normalize::normalize;
use crate::parse::{check_depth, key_segments, parse_value_at, split_assignment};
use crate::{Error, Result, Table};

/// Parses a full TOML document into an ordered table tree.
///
/// # Errors
///
/// Returns the first normalization or structural error. Value errors are
/// wrapped in [`Error::Located`] with the line they occurred on.
///
/// # Examples
///
/// ```rust
/// use toml2php::parse_document;
///
/// let doc = parse_document("[a.b]\nc = 1").unwrap();
/// assert_eq!(doc.get_path("a.b.c").and_then(|v| v.as_i64()), Some(1));
/// ```
pub fn parse_document(text: &str) -> Result<Table> {
    let normalized = normalize(text)?;
    let mut parser = DocumentParser::new(&normalized);
    parser.run()?;
    log::debug!("parsed document with {} top-level entries", parser.root.len());
    Ok(parser.root)
}

struct DocumentParser<'a> {
    lines: std::iter::Enumerate<std::str::Split<'a, char>>,
    root: Table,
    // Key segments of the most recent table header.
    current_path: Vec<String>,
}

impl<'a> DocumentParser<'a> {
    fn new(normalized: &'a str) -> Self {
        DocumentParser {
            lines: normalized.split('\n').enumerate(),
            root: Table::new(),
            current_path: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<()> {
        while let Some((index, raw)) = self.lines.next() {
            let line_number = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line
                .strip_prefix("[[")
                .and_then(|rest| rest.strip_suffix("]]"))
            {
                self.table_array_header(line_number, line, name)?;
            } else if let Some(name) = line
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                self.table_header(line_number, line, name)?;
            } else if line.starts_with('[') {
                return Err(Error::KeygroupMustBeAlone {
                    line: line_number,
                    context: line.to_string(),
                });
            } else if let Some((key, value)) = split_assignment(line) {
                self.assignment(line_number, line, key, value)?;
            } else {
                return Err(Error::syntax(line_number, line));
            }
        }
        Ok(())
    }

    /// Returns `Ok(None)` for a blank name, which is ignored.
    fn header_path(line_number: usize, line: &str, name: &str) -> Result<Option<Vec<String>>> {
        if name.trim().is_empty() {
            log::warn!("ignoring table header without a name at line {line_number}");
            return Ok(None);
        }
        let path = key_segments(name).ok_or_else(|| Error::syntax(line_number, line))?;
        check_depth(path.len()).map_err(|err| err.at_line(line_number))?;
        Ok(Some(path))
    }

    fn table_array_header(&mut self, line_number: usize, line: &str, name: &str) -> Result<()> {
        let Some(path) = Self::header_path(line_number, line, name)? else {
            return Ok(());
        };
        log::debug!("array of tables [[{}]] at line {line_number}", path.join("."));
        self.root.push_table_array(&path);
        self.current_path = path;
        Ok(())
    }

    fn table_header(&mut self, line_number: usize, line: &str, name: &str) -> Result<()> {
        let Some(path) = Self::header_path(line_number, line, name)? else {
            return Ok(());
        };
        log::debug!("table [{}] at line {line_number}", path.join("."));
        self.root.ensure_path(&path);
        self.current_path = path;
        Ok(())
    }

    fn assignment(&mut self, line_number: usize, line: &str, key: &str, value: &str) -> Result<()> {
        let keys = key_segments(key).ok_or_else(|| Error::syntax(line_number, line))?;
        let mut path = self.current_path.clone();
        path.extend(keys);
        let depth = check_depth(path.len()).map_err(|err| err.at_line(line_number))?;

        let value = self.complete_multiline(line_number, value.trim())?;
        let parsed = parse_value_at(&value, depth).map_err(|err| err.at_line(line_number))?;

        log::trace!("{} = {:?}", path.join("."), parsed);
        self.root.set_path(&path, parsed);
        Ok(())
    }

    /// Joins the following raw lines onto a value that opens a triple-quoted
    /// string without closing it.
    fn complete_multiline(&mut self, line_number: usize, value: &str) -> Result<String> {
        let (delimiter, unterminated) = if value.starts_with("\"\"\"") {
            ("\"\"\"", Error::UnterminatedMultilineBasicString { line: line_number })
        } else if value.starts_with("'''") {
            ("'''", Error::UnterminatedMultilineLiteralString { line: line_number })
        } else {
            return Ok(value.to_string());
        };
        if value.len() >= 2 * delimiter.len() && value.ends_with(delimiter) {
            return Ok(value.to_string());
        }

        let mut joined = value.to_string();
        for (_, raw) in self.lines.by_ref() {
            joined.push('\n');
            joined.push_str(raw);
            if raw.trim().ends_with(delimiter) {
                return Ok(joined.trim_end().to_string());
            }
        }
        Err(unterminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::MAX_DEPTH;
    use crate::{Number, Value};

    fn number(text: &str) -> Value {
        Value::Number(Number::parse(text).unwrap())
    }

    #[test]
    fn test_table_nesting() {
        let doc = parse_document("[a.b]\nc = 1").unwrap();
        assert_eq!(doc.get_path("a.b.c"), Some(&number("1")));
    }

    #[test]
    fn test_root_keys_before_tables() {
        let doc = parse_document("title = \"x\"\n\n[owner]\nname = \"Tom\"").unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["title", "owner"]);
        assert_eq!(doc.get_path("owner.name"), Some(&Value::from("Tom")));
    }

    #[test]
    fn test_dotted_keys_under_table() {
        let doc = parse_document("[server]\nhttp.port = 80\n'a.b'.c = true").unwrap();
        assert_eq!(doc.get_path("server.http.port"), Some(&number("80")));
        let server = doc.get("server").and_then(Value::as_table).unwrap();
        assert_eq!(
            server.get("a.b").and_then(Value::as_table).and_then(|t| t.get("c")),
            Some(&Value::Boolean(true))
        );
    }

    #[test]
    fn test_quoted_table_name() {
        let doc = parse_document("[dog.\"tater.man\"]\ntype = \"pug\"").unwrap();
        let dog = doc.get("dog").and_then(Value::as_table).unwrap();
        assert!(dog.contains_key("tater.man"));
    }

    #[test]
    fn test_last_assignment_wins() {
        let doc = parse_document("a = 1\nb = 2\na = 3").unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(doc.get("a"), Some(&number("3")));
    }

    #[test]
    fn test_multiline_basic_string() {
        let doc = parse_document("key = \"\"\"\nOne\nTwo\"\"\"").unwrap();
        assert_eq!(doc.get("key"), Some(&Value::from("One\nTwo")));
    }

    #[test]
    fn test_multiline_literal_string_keeps_indentation() {
        let doc = parse_document("re = '''\n  first\n  second\n  '''\nnext = 1").unwrap();
        assert_eq!(doc.get("re"), Some(&Value::from("  first\n  second\n  ")));
        assert_eq!(doc.get("next"), Some(&number("1")));
    }

    #[test]
    fn test_multiline_string_with_hash_and_brackets() {
        let doc = parse_document("a = \"\"\"\n[not.a.table]\n# not a comment\n\"\"\"").unwrap();
        assert_eq!(
            doc.get("a"),
            Some(&Value::from("[not.a.table]\n# not a comment\n"))
        );
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_multiline_array() {
        let doc = parse_document("ports = [\n  8001,\n  8002, # backup\n]\n").unwrap();
        assert_eq!(
            doc.get("ports"),
            Some(&Value::Array(vec![number("8001"), number("8002")]))
        );
    }

    #[test]
    fn test_array_of_tables() {
        let text = "[[fruit]]\nname = \"apple\"\n[fruit.physical]\ncolor = \"red\"\n[[fruit]]\nname = \"banana\"";
        let doc = parse_document(text).unwrap();
        let fruit = doc.get("fruit").and_then(Value::as_array).unwrap();
        assert_eq!(fruit.len(), 2);
        assert_eq!(doc.get_path("fruit.0.physical.color"), Some(&Value::from("red")));
        assert_eq!(doc.get_path("fruit.1.name"), Some(&Value::from("banana")));
        assert!(doc.get_path("fruit.1.physical").is_none());
    }

    #[test]
    fn test_empty_header_ignored() {
        let doc = parse_document("[]\na = 1").unwrap();
        assert_eq!(doc.get("a"), Some(&number("1")));
    }

    #[test]
    fn test_value_error_reports_its_own_line() {
        let err = parse_document("x = 1\ny = 2\na = ['''x''' y]").unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(matches!(err.kind(), Error::MalformedMultilineString(_)));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let text = format!("a = {}{}", "[".repeat(200_000), "]".repeat(200_000));
        let err = parse_document(&text).unwrap_err();
        assert_eq!(err.kind(), &Error::NestingTooDeep { limit: MAX_DEPTH });
        assert_eq!(err.line(), Some(1));

        let header = format!("x = 1\n[{}]", vec!["t"; MAX_DEPTH + 1].join("."));
        let err = parse_document(&header).unwrap_err();
        assert_eq!(err.kind(), &Error::NestingTooDeep { limit: MAX_DEPTH });
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_value_depth_counts_from_table_path() {
        let path = vec!["t"; MAX_DEPTH - 1].join(".");
        assert!(parse_document(&format!("[{path}]\nv = 1")).is_ok());
        let err = parse_document(&format!("[{path}]\nv = [[1]]")).unwrap_err();
        assert_eq!(err.kind(), &Error::NestingTooDeep { limit: MAX_DEPTH });
    }

    #[test]
    fn test_header_prefix_checked_before_assignment() {
        // `[a] b = 1` contains `=` but is reported as a misplaced header.
        let err = parse_document("[a] b = 1").unwrap_err();
        assert_eq!(
            err,
            Error::KeygroupMustBeAlone {
                line: 1,
                context: "[a] b = 1".to_string()
            }
        );
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(
            parse_document("a = 1\nwhat is this").unwrap_err(),
            Error::syntax(2, "what is this")
        );
        assert_eq!(parse_document(" = 1").unwrap_err(), Error::syntax(1, "= 1"));
        assert_eq!(parse_document("[a..b]").unwrap_err(), Error::syntax(1, "[a..b]"));
    }

    #[test]
    fn test_value_errors_carry_line() {
        let err = parse_document("a = 1\nb = nope").unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.kind(), &Error::UnknownValueType("nope".to_string()));

        let err = parse_document("a = {x}").unwrap_err();
        assert!(matches!(err.kind(), Error::MissingAssignment(_)));
    }

    #[test]
    fn test_normalizer_errors_pass_through() {
        assert!(matches!(
            parse_document("a = 'x\ny'").unwrap_err(),
            Error::UnterminatedLineString { line: 1, .. }
        ));
        assert_eq!(
            parse_document("[a").unwrap_err(),
            Error::UnbalancedKeygroup { line: 1 }
        );
    }

    #[test]
    fn test_crlf_document() {
        let doc = parse_document("[a]\r\nb = \"c\"\r\n").unwrap();
        assert_eq!(doc.get_path("a.b"), Some(&Value::from("c")));
    }
}
