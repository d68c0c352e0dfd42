//! # toml2php
//!
//! Converts TOML configuration into an ordered value tree and renders that
//! tree as a PHP array literal.
//!
//! ## How it works
//!
//! Conversion runs in two stages:
//!
//! 1. **Normalization** ([`normalize`]): a single pass over the raw text that
//!    strips comments and tabs, joins multi-line arrays onto one line and
//!    validates that every bracket and string delimiter is closed
//! 2. **Structural parsing** ([`parse_document`]): a line-oriented pass that
//!    tracks table headers and parses each `key = value` line into the
//!    [`Table`] tree
//!
//! The tree is then rendered by a [`Visitor`]; [`PhpRenderer`] produces PHP.
//!
//! ## Key Features
//!
//! - **Order preserving**: entries render in the order they first appear
//! - **Verbatim numbers**: numeric literals are re-emitted exactly as written
//! - **Array of tables**: each `[[name]]` appends a table to a list
//! - **Configurable output**: indentation unit and `array()` / `[]` syntax
//! - **Typed access**: read documents into Rust structs through serde
//!
//! Dates and times are not supported, and neither are hex, octal, binary or
//! underscore-separated numbers.
//!
//! ## Quick Start
//!
//! ```rust
//! use toml2php::convert_document;
//!
//! let toml = r#"
//! title = "Example"
//!
//! [database]
//! ports = [ 8001, 8002 ]
//! enabled = true
//! "#;
//!
//! let php = convert_document(toml).unwrap();
//! assert_eq!(
//!     php,
//!     r#"array(
//!     "title" => "Example",
//!     "database" => array(
//!         "ports" => array(
//!             0 => 8001,
//!             1 => 8002
//!         ),
//!         "enabled" => true
//!     )
//! )"#
//! );
//! ```
//!
//! ### Single values
//!
//! ```rust
//! use toml2php::convert_value;
//!
//! assert_eq!(convert_value("23.4056").unwrap(), "23.4056");
//! assert_eq!(convert_value("\"hello,world\"").unwrap(), "\"hello,world\"");
//! ```
//!
//! ### Typed configuration
//!
//! ```rust
//! use serde::Deserialize;
//! use toml2php::from_str;
//!
//! #[derive(Deserialize)]
//! struct Config { name: String, workers: u32 }
//!
//! let config: Config = from_str("name = \"api\"\nworkers = 4").unwrap();
//! assert_eq!(config.workers, 4);
//! ```
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Convert a document with default options
//! - **`custom_options.rs`** - Short array syntax and custom indentation
//! - **`typed_config.rs`** - Deserialize a document into structs
//!
//! Run any example with: `cargo run --example <name>`

mod cursor;
pub mod de;
mod document;
pub mod error;
pub mod escape;
pub mod macros;
pub mod map;
mod normalize;
pub mod options;
pub mod parse;
pub mod ser;
pub mod value;

pub use de::Deserializer;
pub use document::parse_document;
pub use error::{Error, Result};
pub use map::Table;
pub use normalize::normalize;
pub use options::{ArrayStyle, PhpOptions};
pub use ser::{PhpRenderer, Visitable, Visitor};
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use std::io;

/// Parses a single standalone TOML value expression.
///
/// # Examples
///
/// ```rust
/// use toml2php::{parse_value_expression, Value};
///
/// let value = parse_value_expression("[1, \"x\", true]").unwrap();
/// assert_eq!(value.as_array().map(Vec::len), Some(3));
/// ```
///
/// # Errors
///
/// Returns an error if the text is empty or not a supported value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_value_expression(text: &str) -> Result<Value> {
    parse::parse_value(text)
}

/// Renders a value or table as a PHP array literal with default options.
#[must_use]
pub fn to_php_string<T>(value: &T) -> String
where
    T: ?Sized + Visitable,
{
    to_php_string_with_options(value, PhpOptions::default())
}

/// Renders a value or table as a PHP array literal.
///
/// # Examples
///
/// ```rust
/// use toml2php::{parse_document, to_php_string_with_options, PhpOptions};
///
/// let table = parse_document("[empty]").unwrap();
/// let php = to_php_string_with_options(&table, PhpOptions::short());
/// assert_eq!(php, "[\n    \"empty\" => []\n]");
/// ```
#[must_use]
pub fn to_php_string_with_options<T>(value: &T, options: PhpOptions) -> String
where
    T: ?Sized + Visitable,
{
    let mut renderer = PhpRenderer::new(options);
    value.accept(&mut renderer);
    renderer.into_inner()
}

/// Parses one value expression and renders it with default options.
///
/// # Errors
///
/// Returns an error if the value cannot be parsed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn convert_value(text: &str) -> Result<String> {
    convert_value_with_options(text, PhpOptions::default())
}

/// Parses one value expression and renders it.
///
/// # Errors
///
/// Returns an error if the value cannot be parsed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn convert_value_with_options(text: &str, options: PhpOptions) -> Result<String> {
    let value = parse_value_expression(text)?;
    Ok(to_php_string_with_options(&value, options))
}

/// Parses a TOML document and renders it with default options.
///
/// # Errors
///
/// Returns the first normalization or parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn convert_document(text: &str) -> Result<String> {
    convert_document_with_options(text, PhpOptions::default())
}

/// Parses a TOML document and renders it.
///
/// # Errors
///
/// Returns the first normalization or parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn convert_document_with_options(text: &str, options: PhpOptions) -> Result<String> {
    let table = parse_document(text)?;
    Ok(to_php_string_with_options(&table, options))
}

/// Reads a whole TOML document from `reader` and renders it.
///
/// # Examples
///
/// ```rust
/// use toml2php::{convert_reader, PhpOptions};
/// use std::io::Cursor;
///
/// let php = convert_reader(Cursor::new("a = 'b'"), PhpOptions::new()).unwrap();
/// assert_eq!(php, "array(\n    \"a\" => \"b\"\n)");
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the document cannot be parsed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn convert_reader<R>(mut reader: R, options: PhpOptions) -> Result<String>
where
    R: io::Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    convert_document_with_options(&text, options)
}

/// Renders a value or table to a writer.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T, options: PhpOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Visitable,
{
    let php = to_php_string_with_options(value, options);
    writer
        .write_all(php.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Parses a TOML document and deserializes it into `T`.
///
/// # Examples
///
/// ```rust
/// use toml2php::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = -2").unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns a parse error, or a [`Error::Custom`] if the tree does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(Value::Table(parse_document(text)?))
}

/// Deserializes an already parsed value into `T`.
///
/// # Errors
///
/// Returns a [`Error::Custom`] if the value does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::new(value))
}
