//! A bounds-checked character cursor over a string slice.
//!
//! Lookahead never indexes past the end of the input: asking for a
//! neighbour that does not exist yields `None`.

/// Forward-only cursor tracking the current line.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    position: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Cursor {
            input,
            position: 0,
            line: 1,
        }
    }

    /// The unread remainder of the input.
    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// 1-based line of the next character to be read.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    /// Consumes `expected` if the remainder starts with it.
    pub(crate) fn eat_str(&mut self, expected: &str) -> bool {
        if !self.rest().starts_with(expected) {
            return false;
        }
        for _ in expected.chars() {
            self.bump();
        }
        true
    }

    /// Consumes characters while `predicate` holds and returns them.
    pub(crate) fn take_while<F>(&mut self, mut predicate: F) -> &'a str
    where
        F: FnMut(char) -> bool,
    {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.bump();
        }
        &self.input[start..self.position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookahead_past_end_is_none() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.bump(), Some('a'));
        assert_eq!(cursor.bump(), Some('b'));
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.bump(), None);
        assert!(!cursor.eat_str("''"));
    }

    #[test]
    fn test_line_tracking_and_multibyte() {
        let mut cursor = Cursor::new("é\nü");
        assert_eq!(cursor.line(), 1);
        cursor.bump();
        cursor.bump();
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.rest(), "ü");
    }

    #[test]
    fn test_eat_str_only_on_match() {
        let mut cursor = Cursor::new("\"\"x");
        assert!(!cursor.eat_str("\"\"\""));
        assert_eq!(cursor.rest(), "\"\"x");
        assert!(cursor.eat_str("\"\""));
        assert_eq!(cursor.rest(), "x");
    }

    #[test]
    fn test_take_while() {
        let mut cursor = Cursor::new("   # note\nnext");
        assert_eq!(cursor.take_while(|c| c == ' '), "   ");
        assert_eq!(cursor.take_while(|c| c != '\n'), "# note");
        assert_eq!(cursor.peek(), Some('\n'));
    }
}
