//! Character classification and string escaping helpers.
//!
//! These are pure predicates shared by the normalizer, the value parser and
//! the PHP renderer.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::unwrap_used)] // Compile-time constant pattern, guaranteed valid
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(0|[1-9]\d*)(\.\d+)?([eE][+-]?[1-9]\d*)?$").unwrap());

#[allow(clippy::unwrap_used)]
static INDEX_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0|[1-9]\d*)$").unwrap());

/// Characters that may follow a backslash inside a basic string.
const ALLOWED_ESCAPES: [char; 10] = ['b', 't', 'n', 'f', 'r', 'u', 'U', '"', '\\', ' '];

/// Returns `true` if `text` is a decimal or exponent number literal.
///
/// # Examples
///
/// ```rust
/// use toml2php::escape::is_numeric;
///
/// assert!(is_numeric("-7"));
/// assert!(is_numeric("1e10"));
/// assert!(!is_numeric("007"));
/// assert!(!is_numeric("1."));
/// ```
#[must_use]
pub fn is_numeric(text: &str) -> bool {
    NUMBER_PATTERN.is_match(text)
}

/// Returns `true` if a table key looks like a PHP integer index.
#[must_use]
pub fn is_index_key(key: &str) -> bool {
    INDEX_KEY_PATTERN.is_match(key)
}

/// Returns `true` if `ch` may follow a backslash inside a basic string.
#[inline]
#[must_use]
pub fn is_allowed_escape(ch: char) -> bool {
    ALLOWED_ESCAPES.contains(&ch)
}

/// Wraps `text` in double quotes for a PHP string literal.
///
/// Unescaped double quotes get a backslash, raw newlines become `\n`, and a
/// dangling backslash right before the end of the text or a newline is
/// dropped. Every other character, including existing backslash escapes,
/// passes through unchanged.
///
/// # Examples
///
/// ```rust
/// use toml2php::escape::quote_php_string;
///
/// assert_eq!(quote_php_string("hello,world"), "\"hello,world\"");
/// assert_eq!(quote_php_string("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
/// assert_eq!(quote_php_string("already \\\" done"), "\"already \\\" done\"");
/// ```
#[must_use]
pub fn quote_php_string(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 2);
    output.push('"');

    let mut chars = text.chars().peekable();
    let mut escaped = false;
    while let Some(ch) = chars.next() {
        if escaped {
            escaped = false;
            output.push(ch);
            continue;
        }
        match ch {
            '"' => output.push_str("\\\""),
            '\n' => output.push_str("\\n"),
            '\\' if matches!(chars.peek(), None | Some('\n')) => {}
            '\\' => {
                escaped = true;
                output.push(ch);
            }
            _ => output.push(ch),
        }
    }

    output.push('"');
    output
}
