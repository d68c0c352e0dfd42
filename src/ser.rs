//! Rendering of value trees.
//!
//! A tree is consumed through the [`Visitor`] trait: [`Visitable::accept`]
//! dispatches each node to the method for its variant. [`PhpRenderer`] is
//! the visitor that writes PHP array literals; other output formats plug in
//! the same way.
//!
//! ## Output shape
//!
//! - numbers are written verbatim, booleans as `true` / `false`
//! - strings are double-quoted with [`quote_php_string`]
//! - arrays use their element index as key, tables their key: index-like
//!   keys (`0`, `17`) bare, every other key as a quoted string
//! - each entry sits on its own line, one indent deeper than its parent,
//!   with a comma after every entry but the last
//! - an empty array or table is written as `array()` (or `[]`)
//!
//! ## Examples
//!
//! ```rust
//! use toml2php::{parse_document, PhpOptions, PhpRenderer, Visitable};
//!
//! let doc = parse_document("name = \"app\"\nports = [80, 443]").unwrap();
//!
//! let mut renderer = PhpRenderer::new(PhpOptions::new());
//! doc.accept(&mut renderer);
//! assert_eq!(
//!     renderer.into_inner(),
//!     "array(\n    \"name\" => \"app\",\n    \"ports\" => array(\n        0 => 80,\n        1 => 443\n    )\n)"
//! );
//! ```

use crate::escape::{is_index_key, quote_php_string};
use crate::{Number, PhpOptions, Table, Value};

/// Receives the nodes of a value tree, one method per variant.
pub trait Visitor {
    type Output;

    fn visit_number(&mut self, number: &Number) -> Self::Output;
    fn visit_boolean(&mut self, value: bool) -> Self::Output;
    fn visit_string(&mut self, value: &str) -> Self::Output;
    fn visit_array(&mut self, items: &[Value]) -> Self::Output;
    fn visit_table(&mut self, table: &Table) -> Self::Output;
}

/// A node that can be handed to a [`Visitor`].
pub trait Visitable {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output;
}

impl Visitable for Value {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Value::Number(number) => visitor.visit_number(number),
            Value::Boolean(value) => visitor.visit_boolean(*value),
            Value::String(value) => visitor.visit_string(value),
            Value::Array(items) => visitor.visit_array(items),
            Value::Table(table) => visitor.visit_table(table),
        }
    }
}

impl Visitable for Table {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_table(self)
    }
}

/// Writes a value tree as a PHP array literal.
///
/// Created via [`PhpRenderer::new`]; the rendered text is taken out with
/// [`PhpRenderer::into_inner`].
pub struct PhpRenderer {
    output: String,
    options: PhpOptions,
    depth: usize,
}

impl PhpRenderer {
    pub fn new(options: PhpOptions) -> Self {
        PhpRenderer {
            output: String::with_capacity(256),
            options,
            depth: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.output.push_str(&self.options.indent);
        }
    }

    /// Writes the opening token. Returns `false` after writing a complete
    /// empty literal.
    fn open(&mut self, len: usize) -> bool {
        let style = self.options.array_style;
        self.output.push_str(style.open());
        if len == 0 {
            self.output.push_str(style.close());
            return false;
        }
        self.output.push('\n');
        self.depth += 1;
        true
    }

    fn entry(&mut self, key: &str, value: &Value, last: bool) {
        self.write_indent();
        if is_index_key(key) {
            self.output.push_str(key);
        } else {
            self.output.push_str(&quote_php_string(key));
        }
        self.output.push_str(" => ");
        value.accept(self);
        if !last {
            self.output.push(',');
        }
        self.output.push('\n');
    }

    fn close(&mut self) {
        self.depth -= 1;
        self.write_indent();
        self.output.push_str(self.options.array_style.close());
    }
}

impl Visitor for PhpRenderer {
    type Output = ();

    fn visit_number(&mut self, number: &Number) {
        self.output.push_str(number.as_str());
    }

    fn visit_boolean(&mut self, value: bool) {
        self.output.push_str(if value { "true" } else { "false" });
    }

    fn visit_string(&mut self, value: &str) {
        self.output.push_str(&quote_php_string(value));
    }

    fn visit_array(&mut self, items: &[Value]) {
        if !self.open(items.len()) {
            return;
        }
        let last = items.len() - 1;
        for (index, item) in items.iter().enumerate() {
            self.entry(&index.to_string(), item, index == last);
        }
        self.close();
    }

    fn visit_table(&mut self, table: &Table) {
        if !self.open(table.len()) {
            return;
        }
        let last = table.len() - 1;
        for (index, (key, value)) in table.iter().enumerate() {
            self.entry(key, value, index == last);
        }
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_value;
    use crate::ArrayStyle;

    fn render(value: &Value, options: PhpOptions) -> String {
        let mut renderer = PhpRenderer::new(options);
        value.accept(&mut renderer);
        renderer.into_inner()
    }

    #[test]
    fn test_scalars() {
        let options = PhpOptions::new();
        assert_eq!(render(&parse_value("23.4056").unwrap(), options.clone()), "23.4056");
        assert_eq!(render(&Value::Boolean(false), options.clone()), "false");
        assert_eq!(render(&Value::from("hello,world"), options), "\"hello,world\"");
    }

    #[test]
    fn test_string_escaping() {
        let value = Value::from("say \"hi\"\nbye");
        assert_eq!(render(&value, PhpOptions::new()), r#""say \"hi\"\nbye""#);
    }

    #[test]
    fn test_dollar_is_not_escaped() {
        let value = Value::from("$HOME");
        assert_eq!(render(&value, PhpOptions::new()), "\"$HOME\"");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(render(&Value::Array(vec![]), PhpOptions::new()), "array()");
        assert_eq!(render(&Value::Table(Table::new()), PhpOptions::short()), "[]");
    }

    #[test]
    fn test_nested_short_style() {
        let value = parse_value("{ a = [1, {}], 7 = true }").unwrap();
        let options = PhpOptions::new()
            .with_array_style(ArrayStyle::Short)
            .with_indent_width(2);
        assert_eq!(
            render(&value, options),
            "[\n  \"a\" => [\n    0 => 1,\n    1 => []\n  ],\n  7 => true\n]"
        );
    }

    #[test]
    fn test_key_quoting() {
        let value = parse_value(r#"{ 0 = 1, 01 = 2, "-1" = 3, "a\"b" = 4 }"#).unwrap();
        let rendered = render(&value, PhpOptions::new().with_indent(""));
        assert_eq!(
            rendered,
            "array(\n0 => 1,\n\"01\" => 2,\n\"-1\" => 3,\n\"a\\\"b\" => 4\n)"
        );
    }

    struct LeafCounter;

    impl Visitor for LeafCounter {
        type Output = usize;

        fn visit_number(&mut self, _: &Number) -> usize {
            1
        }

        fn visit_boolean(&mut self, _: bool) -> usize {
            1
        }

        fn visit_string(&mut self, _: &str) -> usize {
            1
        }

        fn visit_array(&mut self, items: &[Value]) -> usize {
            items.iter().map(|item| item.accept(self)).sum()
        }

        fn visit_table(&mut self, table: &Table) -> usize {
            table.values().map(|value| value.accept(self)).sum()
        }
    }

    #[test]
    fn test_custom_visitor() {
        let value = parse_value("{ a = [1, 2, [3]], b = { c = 'x' }, d = [] }").unwrap();
        assert_eq!(value.accept(&mut LeafCounter), 4);
    }
}
