//! Error types for TOML normalization, parsing and rendering.
//!
//! Every failure is terminal for the conversion in progress: there is no
//! partial result and no default substitution. Each variant names the
//! offending fragment (the raw line, or the delimiter left open) so callers
//! can surface the message as-is.
//!
//! ## Error Categories
//!
//! - **Normalization**: unbalanced brackets, unterminated strings, illegal escapes
//! - **Values**: empty, malformed or unrecognised value expressions
//! - **Document structure**: misplaced table headers and unparseable lines
//! - **I/O and serde**: reader/writer failures and typed extraction errors
//!
//! ## Examples
//!
//! ```rust
//! use toml2php::{parse_document, Error};
//!
//! let err = parse_document("key = \"unterminated").unwrap_err();
//! assert!(matches!(err, Error::UnterminatedBasicString { line: 1 }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while converting TOML.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A `]` appeared with no open bracket
    #[error("Unexpected ']' at line {line}: {context}")]
    UnexpectedCloseBracket { line: usize, context: String },

    /// A `[` was never closed before the end of the document
    #[error("Missing closing bracket for '[' opened at line {line}")]
    UnbalancedBracket { line: usize },

    /// A table header spans more than one line
    #[error("Multi-line table header is not allowed at line {line}: {context}")]
    MultilineTableHeader { line: usize, context: String },

    /// A raw newline inside a single-line basic or literal string
    #[error("Multi-line string not allowed at line {line}: {context}")]
    UnterminatedLineString { line: usize, context: String },

    /// A backslash escape outside the allowed set inside a basic string
    #[error("Reserved escape sequence '\\{sequence}' inside string at line {line}")]
    IllegalEscape { line: usize, sequence: String },

    #[error("Missing closing '\"' for string opened at line {line}")]
    UnterminatedBasicString { line: usize },

    #[error("Missing closing \"'\" for literal string opened at line {line}")]
    UnterminatedLiteralString { line: usize },

    #[error("Missing closing '\"\"\"' for multi-line string opened at line {line}")]
    UnterminatedMultilineBasicString { line: usize },

    #[error("Missing closing \"'''\" for multi-line literal string opened at line {line}")]
    UnterminatedMultilineLiteralString { line: usize },

    /// A table header is still open at the end of the document
    #[error("Missing closing ']' for table header opened at line {line}")]
    UnbalancedKeygroup { line: usize },

    /// A value expression was empty
    #[error("Empty value not allowed")]
    EmptyValue,

    /// A single-line literal string contained a raw newline
    #[error("New lines are not allowed in single-line literal strings: {0}")]
    MultilineNotAllowed(String),

    /// An array had no matching closing bracket, or trailing input after it
    #[error("Malformed array definition: {0}")]
    MalformedArray(String),

    /// An inline table was not wrapped in braces or had an empty field
    #[error("Invalid inline table definition: {0}")]
    InvalidInlineTable(String),

    /// An inline table field had no `=` or no field name
    #[error("Missing '=' in inline table field: {0}")]
    MissingAssignment(String),

    /// A triple-quoted string value that is unterminated or followed by
    /// other text
    #[error("Malformed multi-line string: {0}")]
    MalformedMultilineString(String),

    /// Arrays, inline tables or key paths nested past the depth limit
    #[error("Nesting exceeds the maximum depth of {limit}")]
    NestingTooDeep { limit: usize },

    /// A value expression matched none of the known forms
    #[error("Unknown value type: {0}")]
    UnknownValueType(String),

    /// A line started a table header but did not end it
    #[error("Table headers must be on a line by themselves at line {line}: {context}")]
    KeygroupMustBeAlone { line: usize, context: String },

    /// A document line matched no known construct
    #[error("Syntax error at line {line}: {context}")]
    Syntax { line: usize, context: String },

    /// A value error raised while parsing a document line
    #[error("{source} (at line {line})")]
    Located {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error for a document line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml2php::Error;
    ///
    /// let err = Error::syntax(10, "what is this");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, context: &str) -> Self {
        Error::Syntax {
            line,
            context: context.to_string(),
        }
    }

    /// Attaches a document line number to a value error.
    ///
    /// Errors that already carry a line are returned unchanged.
    pub fn at_line(self, line: usize) -> Self {
        if self.line().is_some() {
            return self;
        }
        Error::Located {
            line,
            source: Box::new(self),
        }
    }

    /// Returns the underlying error, looking through [`Error::Located`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml2php::{parse_document, Error};
    ///
    /// let err = parse_document("a = ").unwrap_err();
    /// assert_eq!(err.kind(), &Error::EmptyValue);
    /// ```
    #[must_use]
    pub fn kind(&self) -> &Error {
        match self {
            Error::Located { source, .. } => source.kind(),
            other => other,
        }
    }

    /// Returns the 1-based line the error refers to, when known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnexpectedCloseBracket { line, .. }
            | Error::UnbalancedBracket { line }
            | Error::MultilineTableHeader { line, .. }
            | Error::UnterminatedLineString { line, .. }
            | Error::IllegalEscape { line, .. }
            | Error::UnterminatedBasicString { line }
            | Error::UnterminatedLiteralString { line }
            | Error::UnterminatedMultilineBasicString { line }
            | Error::UnterminatedMultilineLiteralString { line }
            | Error::UnbalancedKeygroup { line }
            | Error::KeygroupMustBeAlone { line, .. }
            | Error::Syntax { line, .. }
            | Error::Located { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
