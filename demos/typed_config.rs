//! Reading a TOML document into Rust structs.
//!
//! Run with: cargo run --example typed_config

use serde::Deserialize;
use std::error::Error;
use toml2php::{from_str, parse_document, Value};

#[derive(Debug, Deserialize)]
struct Server {
    host: String,
    ports: Vec<u16>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Mode {
    Development,
    Production,
}

#[derive(Debug, Deserialize)]
struct Plugin {
    name: String,
    #[serde(default)]
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct Config {
    name: String,
    mode: Mode,
    server: Server,
    plugins: Vec<Plugin>,
}

const CONFIG: &str = r#"
name = "gateway"
mode = "production"

[server]
host = "0.0.0.0"
ports = [ 80, 443 ]

[[plugins]]
name = "auth"
enabled = true

[[plugins]]
name = "metrics"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let config: Config = from_str(CONFIG)?;
    println!("{:#?}\n", config);
    assert!(matches!(config.mode, Mode::Production));
    assert_eq!(config.server.ports, vec![80, 443]);
    assert!(!config.plugins[1].enabled);

    // Dynamic access without a schema
    let doc = parse_document(CONFIG)?;
    if let Some(Value::String(host)) = doc.get_path("server.host") {
        println!("Listening on {}", host);
    }
    let names: Vec<_> = doc
        .get("plugins")
        .and_then(Value::as_array)
        .map(|plugins| {
            plugins
                .iter()
                .filter_map(|p| p.as_table()?.get("name")?.as_str())
                .collect()
        })
        .unwrap_or_default();
    println!("Plugins: {:?}", names);

    Ok(())
}
