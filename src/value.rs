//! Typed value representation for parsed TOML.
//!
//! This module provides the [`Value`] enum, a closed sum type covering every
//! node a document can produce, and [`Number`], which keeps numeric literals
//! as their verbatim source text.
//!
//! ## Core Types
//!
//! - [`Value`]: number, boolean, string, array or table
//! - [`Number`]: a numeric literal that is re-emitted exactly as written
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use toml2php::{Number, Value};
//!
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! let exact = Value::Number(Number::parse("6.0200").unwrap());
//!
//! assert_eq!(exact.as_number().map(|n| n.as_str()), Some("6.0200"));
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use toml2php::parse_value_expression;
//! use std::convert::TryFrom;
//!
//! let value = parse_value_expression("-7").unwrap();
//! let num = i64::try_from(value).unwrap();
//! assert_eq!(num, -7);
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

use crate::escape::is_numeric;
use crate::Table;

/// A parsed TOML value.
///
/// # Examples
///
/// ```rust
/// use toml2php::{parse_value_expression, Value};
///
/// let value = parse_value_expression("[1, \"x\", true]").unwrap();
/// let items = value.as_array().unwrap();
///
/// assert!(items[0].is_number());
/// assert!(items[1].is_string());
/// assert_eq!(items[2], Value::Boolean(true));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(Number),
    Boolean(bool),
    /// String content without its delimiters. Backslash escapes from basic
    /// strings are kept as written.
    String(String),
    Array(Vec<Value>),
    Table(Table),
}

/// A numeric literal stored as its source text.
///
/// Only text matching the numeric grammar (optional sign, integer part
/// without leading zeros, optional fraction, optional exponent) is accepted,
/// so the stored text is always a valid literal in the output.
///
/// # Examples
///
/// ```rust
/// use toml2php::Number;
///
/// let integer = Number::parse("123554").unwrap();
/// let float = Number::parse("23.4056").unwrap();
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(123554));
/// assert!(float.is_float());
/// assert_eq!(float.as_str(), "23.4056");
/// assert!(Number::parse("0x1F").is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    /// Accepts `text` if it is a numeric literal.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        is_numeric(text).then(|| Number(text.to_string()))
    }

    /// Builds a number from a finite float. Returns `None` for NaN and infinities.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let text = value.to_string();
        // `-0` is not accepted by the literal grammar.
        let text = if text == "-0" { "0".to_string() } else { text };
        Number::parse(&text)
    }

    /// The literal exactly as it appeared in the source.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the literal has neither a fraction nor an exponent.
    #[inline]
    #[must_use]
    pub fn is_integer(&self) -> bool {
        !self.0.contains(['.', 'e', 'E'])
    }

    #[inline]
    #[must_use]
    pub fn is_float(&self) -> bool {
        !self.is_integer()
    }

    /// Returns the value as `i64` if the literal is an integer within range.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.0.parse().ok()
        } else {
            None
        }
    }

    /// Returns the value as `f64`. Every accepted literal has a float reading.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.0.parse().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! number_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number(value.to_string())
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

number_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// Name of the variant, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml2php::Value;
    ///
    /// assert_eq!(Value::Boolean(true).as_bool(), Some(true));
    /// assert_eq!(Value::from("true").as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer literal within `i64` range, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Number(n) => match n.as_i64() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(n.as_f64()),
            },
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Table(table) => table.serialize(serializer),
        }
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match &value {
            Value::Number(n) => n.as_i64().ok_or_else(|| {
                crate::Error::custom(format!("cannot convert {} to i64", n))
            }),
            other => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            other => Err(crate::Error::custom(format!(
                "expected number, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.type_name()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_number_keeps_source_text() {
        for text in ["123554", "23.4056", "0.2399", "-7", "1e10", "+3", "6.0200"] {
            let number = Number::parse(text).unwrap();
            assert_eq!(number.as_str(), text);
            assert_eq!(number.to_string(), text);
        }
    }

    #[test]
    fn test_number_classification() {
        assert!(Number::parse("42").unwrap().is_integer());
        assert!(Number::parse("4.2").unwrap().is_float());
        assert!(Number::parse("1e10").unwrap().is_float());
        assert_eq!(Number::parse("+3").unwrap().as_i64(), Some(3));
        assert_eq!(Number::parse("1e10").unwrap().as_i64(), None);
        assert_eq!(Number::parse("1e10").unwrap().as_f64(), 1e10);
        assert_eq!(Number::parse("99999999999999999999").unwrap().as_i64(), None);
    }

    #[test]
    fn test_number_from_f64() {
        assert_eq!(Number::from_f64(3.5).map(|n| n.0), Some("3.5".to_string()));
        assert_eq!(Number::from_f64(-0.0).map(|n| n.0), Some("0".to_string()));
        assert!(Number::from_f64(f64::NAN).is_none());
        assert!(Number::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_tryfrom_scalars() {
        assert_eq!(i64::try_from(Value::from(42)).unwrap(), 42);
        assert!(i64::try_from(Value::Number(Number::parse("4.2").unwrap())).is_err());
        assert!(i64::try_from(Value::from("42")).is_err());

        assert_eq!(f64::try_from(Value::from(2)).unwrap(), 2.0);
        assert!(bool::try_from(Value::Boolean(false)).is_ok());
        assert!(bool::try_from(Value::from("false")).is_err());
        assert_eq!(String::try_from(Value::from("hi")).unwrap(), "hi");
        assert!(String::try_from(Value::from(1)).is_err());
    }

    #[test]
    fn test_from_collections() {
        let items = vec![Value::from(1), Value::from(2)];
        assert_eq!(Value::from(items.clone()), Value::Array(items));

        let mut table = Table::new();
        table.insert("key".to_string(), Value::from(42));
        assert_eq!(Value::from(table.clone()), Value::Table(table));
    }

    #[test]
    fn test_type_predicates() {
        let value = Value::from(42);
        assert!(value.is_number());
        assert!(!value.is_string());
        assert_eq!(value.type_name(), "number");
        assert_eq!(Value::Table(Table::new()).type_name(), "table");
    }
}
