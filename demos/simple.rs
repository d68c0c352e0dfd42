//! Convert a TOML document into a PHP array literal.
//!
//! Run with: cargo run --example simple

use std::error::Error;
use toml2php::{convert_document, parse_document};

const CONFIG: &str = r#"
# Application settings
title = "My App"

[database]
host = "127.0.0.1"
ports = [ 8001, 8002 ]
enabled = true

[[users]]
name = "alice"

[[users]]
name = "bob"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let php = convert_document(CONFIG)?;
    println!("PHP output:\n{}\n", php);

    // The parsed tree keeps document order
    let doc = parse_document(CONFIG)?;
    let keys: Vec<_> = doc.keys().collect();
    assert_eq!(keys, vec!["title", "database", "users"]);
    println!("Second user: {:?}", doc.get_path("users.1.name"));

    Ok(())
}
