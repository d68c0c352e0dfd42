//! Single-pass TOML text normalization.
//!
//! The normalizer rewrites a raw document into a form that the line-oriented
//! [`document`](crate::document) parser can split on `\n` without
//! re-checking delimiters:
//!
//! - `\r\n` and `\n\r` become `\n`, tab characters are removed
//! - comments are stripped
//! - newlines inside an array body are dropped, so every array value sits
//!   on its assignment line
//! - line continuations (`\` + newline) inside multi-line basic strings are folded
//!
//! While scanning it validates bracket and quote balance, so accepted output
//! never contains an unmatched `[` or an open string.
//!
//! ## Examples
//!
//! ```rust
//! use toml2php::normalize;
//!
//! let text = "ports = [ 8001,\n\t8002, # backup\n]\n";
//! assert_eq!(normalize(text).unwrap(), "ports = [ 8001,8002, ]\n");
//! ```

use crate::cursor::Cursor;
use crate::escape::is_allowed_escape;
use crate::{Error, Result};

/// Normalizes a raw TOML document.
///
/// # Errors
///
/// Returns an error for an unexpected `]`, a table header spanning lines, a
/// raw newline in a single-line string, a reserved escape in a basic string,
/// or any delimiter still open at the end of the input.
pub fn normalize(text: &str) -> Result<String> {
    let text = text
        .replace("\r\n", "\n")
        .replace("\n\r", "\n")
        .replace('\t', "");
    let normalized = Normalizer::new(&text).run()?;
    log::debug!(
        "normalized {} bytes of TOML into {} bytes",
        text.len(),
        normalized.len()
    );
    Ok(normalized)
}

#[derive(Debug, Default)]
struct ScanState {
    basic: bool,
    literal: bool,
    multiline_basic: bool,
    multiline_literal: bool,
    bracket_depth: usize,
    table_header: bool,
    // The previous character was a backslash opening an escape sequence.
    escaped: bool,
    string_line: usize,
    bracket_line: usize,
}

impl ScanState {
    fn in_string(&self) -> bool {
        self.basic || self.literal || self.multiline_basic || self.multiline_literal
    }
}

struct Normalizer<'a> {
    cursor: Cursor<'a>,
    output: String,
    // Raw text of the current source line, for error context only.
    line_buffer: String,
    line: usize,
    state: ScanState,
}

impl<'a> Normalizer<'a> {
    fn new(text: &'a str) -> Self {
        Normalizer {
            cursor: Cursor::new(text),
            output: String::with_capacity(text.len()),
            line_buffer: String::new(),
            line: 1,
            state: ScanState::default(),
        }
    }

    fn run(mut self) -> Result<String> {
        loop {
            self.line = self.cursor.line();
            let Some(ch) = self.cursor.bump() else {
                break;
            };

            if self.state.escaped {
                self.state.escaped = false;
                self.keep(ch);
                continue;
            }

            match ch {
                '\\' if self.state.basic || self.state.multiline_basic => self.backslash()?,
                '\n' => self.newline()?,
                '[' if !self.state.in_string() => self.open_bracket(),
                ']' if !self.state.in_string() => self.close_bracket()?,
                '"' if !self.state.literal && !self.state.multiline_literal => self.double_quote(),
                '\'' if !self.state.basic && !self.state.multiline_basic => self.single_quote(),
                '#' if !self.state.in_string() && !self.state.table_header => self.comment(),
                _ => self.keep(ch),
            }
        }
        self.finish()
    }

    fn keep(&mut self, ch: char) {
        self.output.push(ch);
        self.record(ch);
    }

    fn keep_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.keep(ch);
        }
    }

    fn record(&mut self, ch: char) {
        if ch == '\n' {
            self.line_buffer.clear();
        } else {
            self.line_buffer.push(ch);
        }
    }

    fn context(&self) -> String {
        self.line_buffer.trim().to_string()
    }

    fn backslash(&mut self) -> Result<()> {
        match self.cursor.peek() {
            Some(next) if is_allowed_escape(next) => {
                self.state.escaped = true;
                self.keep('\\');
                Ok(())
            }
            next if self.state.basic => Err(Error::IllegalEscape {
                line: self.line,
                sequence: next.map(String::from).unwrap_or_default(),
            }),
            _ => {
                // Line continuation: drop the backslash and the whitespace run after it.
                self.record('\\');
                let folded = self.cursor.take_while(|c| c == '\n' || c == ' ');
                for ch in folded.chars() {
                    self.record(ch);
                }
                Ok(())
            }
        }
    }

    fn newline(&mut self) -> Result<()> {
        if self.state.basic || self.state.literal {
            return Err(Error::UnterminatedLineString {
                line: self.line,
                context: self.context(),
            });
        }
        if self.state.bracket_depth > 0 {
            if self.state.table_header {
                return Err(Error::MultilineTableHeader {
                    line: self.line,
                    context: self.context(),
                });
            }
            self.record('\n');
            return Ok(());
        }
        self.keep('\n');
        Ok(())
    }

    fn open_bracket(&mut self) {
        self.state.bracket_depth += 1;
        if self.state.bracket_depth == 1 {
            self.state.bracket_line = self.line;
            if self.line_buffer.trim().is_empty() {
                self.state.table_header = true;
            }
        }
        self.keep('[');
    }

    fn close_bracket(&mut self) -> Result<()> {
        if self.state.bracket_depth == 0 {
            return Err(Error::UnexpectedCloseBracket {
                line: self.line,
                context: format!("{}]", self.context()),
            });
        }
        self.state.bracket_depth -= 1;
        if self.state.bracket_depth == 0 {
            self.state.table_header = false;
        }
        self.keep(']');
        Ok(())
    }

    fn double_quote(&mut self) {
        if !self.state.basic && self.cursor.eat_str("\"\"") {
            self.state.multiline_basic = !self.state.multiline_basic;
            if self.state.multiline_basic {
                self.state.string_line = self.line;
            }
            self.keep_str("\"\"\"");
            return;
        }
        if !self.state.multiline_basic {
            self.state.basic = !self.state.basic;
            if self.state.basic {
                self.state.string_line = self.line;
            }
        }
        self.keep('"');
    }

    fn single_quote(&mut self) {
        if !self.state.literal && self.cursor.eat_str("''") {
            self.state.multiline_literal = !self.state.multiline_literal;
            if self.state.multiline_literal {
                self.state.string_line = self.line;
            }
            self.keep_str("'''");
            return;
        }
        if !self.state.multiline_literal {
            self.state.literal = !self.state.literal;
            if self.state.literal {
                self.state.string_line = self.line;
            }
        }
        self.keep('\'');
    }

    fn comment(&mut self) {
        // The terminating newline is left for the main loop.
        self.cursor.take_while(|c| c != '\n');
    }

    fn finish(self) -> Result<String> {
        let state = &self.state;
        if state.table_header {
            return Err(Error::UnbalancedKeygroup {
                line: state.bracket_line,
            });
        }
        if state.bracket_depth > 0 {
            return Err(Error::UnbalancedBracket {
                line: state.bracket_line,
            });
        }
        let line = state.string_line;
        if state.basic {
            return Err(Error::UnterminatedBasicString { line });
        }
        if state.literal {
            return Err(Error::UnterminatedLiteralString { line });
        }
        if state.multiline_basic {
            return Err(Error::UnterminatedMultilineBasicString { line });
        }
        if state.multiline_literal {
            return Err(Error::UnterminatedMultilineLiteralString { line });
        }
        Ok(self.output)
    }
}
