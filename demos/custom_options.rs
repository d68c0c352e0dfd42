//! Customizing PHP output with PhpOptions.
//!
//! Run with: cargo run --example custom_options

use std::error::Error;
use toml2php::{convert_document_with_options, parse_document, to_php_string_with_options};
use toml2php::{ArrayStyle, PhpOptions};

const CONFIG: &str = r#"
name = "MyApp"
debug = true

[cache]
servers = [ "10.0.0.1", "10.0.0.2" ]
ttl = 3600
"#;

fn main() -> Result<(), Box<dyn Error>> {
    println!("Default (array(), four spaces):");
    println!("{}\n", convert_document_with_options(CONFIG, PhpOptions::new())?);

    println!("Short arrays:");
    println!("{}\n", convert_document_with_options(CONFIG, PhpOptions::short())?);

    println!("Two-space indent:");
    let options = PhpOptions::new()
        .with_array_style(ArrayStyle::Short)
        .with_indent_width(2);
    println!("{}\n", convert_document_with_options(CONFIG, options)?);

    // One tree, several renderings
    let doc = parse_document(CONFIG)?;
    let tabbed = to_php_string_with_options(&doc, PhpOptions::new().with_indent("\t"));
    println!("Tab indent:\n{}\n", tabbed);

    println!("As a PHP config file:");
    println!("<?php\n\nreturn {};", to_php_string_with_options(&doc, PhpOptions::short()));

    Ok(())
}
