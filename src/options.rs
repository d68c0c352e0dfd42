//! Configuration options for PHP rendering.
//!
//! This module provides types to customize the PHP array literal output:
//!
//! - [`PhpOptions`]: Main configuration struct
//! - [`ArrayStyle`]: `array(...)` or short `[...]` array syntax
//!
//! Options are passed to each render call and never affect parsing.
//!
//! ## Examples
//!
//! ```rust
//! use toml2php::{convert_document_with_options, ArrayStyle, PhpOptions};
//!
//! let options = PhpOptions::new()
//!     .with_array_style(ArrayStyle::Short)
//!     .with_indent_width(2);
//!
//! let php = convert_document_with_options("a = 1", options).unwrap();
//! assert_eq!(php, "[\n  \"a\" => 1\n]");
//! ```

/// Array literal syntax for the generated PHP.
///
/// # Examples
///
/// ```rust
/// use toml2php::ArrayStyle;
///
/// assert_eq!(ArrayStyle::Long.open(), "array(");
/// assert_eq!(ArrayStyle::Short.close(), "]");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ArrayStyle {
    /// `array(...)`, valid on every PHP version.
    #[default]
    Long,
    /// `[...]`, PHP 5.4 and later.
    Short,
}

impl ArrayStyle {
    #[must_use]
    pub const fn open(&self) -> &'static str {
        match self {
            ArrayStyle::Long => "array(",
            ArrayStyle::Short => "[",
        }
    }

    #[must_use]
    pub const fn close(&self) -> &'static str {
        match self {
            ArrayStyle::Long => ")",
            ArrayStyle::Short => "]",
        }
    }
}

/// Configuration options for PHP rendering.
///
/// # Examples
///
/// ```rust
/// use toml2php::{ArrayStyle, PhpOptions};
///
/// let options = PhpOptions::new();
/// assert_eq!(options.indent, "    ");
/// assert_eq!(options.array_style, ArrayStyle::Long);
///
/// let options = PhpOptions::short().with_indent("\t");
/// assert_eq!(options.indent, "\t");
/// assert_eq!(options.array_style, ArrayStyle::Short);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhpOptions {
    /// Indentation unit, repeated once per nesting level.
    pub indent: String,
    pub array_style: ArrayStyle,
}

impl Default for PhpOptions {
    fn default() -> Self {
        PhpOptions {
            indent: "    ".to_string(),
            array_style: ArrayStyle::default(),
        }
    }
}

impl PhpOptions {
    /// Creates default options: four-space indent, `array(...)` syntax.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates default options with short `[...]` array syntax.
    #[must_use]
    pub fn short() -> Self {
        PhpOptions {
            array_style: ArrayStyle::Short,
            ..Default::default()
        }
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the indentation unit to `width` spaces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml2php::PhpOptions;
    ///
    /// assert_eq!(PhpOptions::new().with_indent_width(2).indent, "  ");
    /// ```
    #[must_use]
    pub fn with_indent_width(self, width: usize) -> Self {
        self.with_indent(" ".repeat(width))
    }

    #[must_use]
    pub fn with_array_style(mut self, array_style: ArrayStyle) -> Self {
        self.array_style = array_style;
        self
    }
}
