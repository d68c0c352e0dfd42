/// Builds a [`Value`](crate::Value) tree with TOML-like syntax.
///
/// Tables are written `{ "key" = value, ... }`, arrays `[a, b, ...]`.
/// Any other token tree is converted with `Value::from`; wrap negative
/// numbers and other multi-token expressions in parentheses.
///
/// # Examples
///
/// ```rust
/// use toml2php::{parse_document, toml_value, Value};
///
/// let expected = toml_value!({
///     "server" = { "host" = "localhost", "ports" = [8001, 8002] },
///     "debug" = true
/// });
/// let parsed = parse_document(
///     "debug = true\n[server]\nhost = \"localhost\"\nports = [8001, 8002]",
/// )
/// .unwrap();
///
/// // Same content, different order.
/// assert_eq!(parsed.get("server"), expected.as_table().unwrap().get("server"));
/// ```
#[macro_export]
macro_rules! toml_value {
    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    ([]) => {
        $crate::Value::Array(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toml_value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal = $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key.to_string(), $crate::toml_value!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, Table, Value};

    #[test]
    fn test_toml_value_scalars() {
        assert_eq!(toml_value!(true), Value::Boolean(true));
        assert_eq!(toml_value!(42), Value::Number(Number::from(42)));
        assert_eq!(toml_value!((-7)), Value::Number(Number::parse("-7").unwrap()));
        assert_eq!(toml_value!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_toml_value_collections() {
        assert_eq!(toml_value!([]), Value::Array(vec![]));
        assert_eq!(toml_value!({}), Value::Table(Table::new()));

        let value = toml_value!({ "b" = [1, "x", false], "a" = { "c" = 2 } });
        let table = value.as_table().unwrap();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(
            table.get("b"),
            Some(&Value::Array(vec![
                Value::from(1),
                Value::from("x"),
                Value::Boolean(false)
            ]))
        );
        assert_eq!(table.get_path("a.c").and_then(Value::as_i64), Some(2));
    }
}
