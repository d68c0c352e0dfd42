use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use toml2php::{parse_document, parse_value_expression, to_php_string_with_options, PhpOptions, Value};

#[derive(Parser)]
#[command(
    name = "toml2php",
    version,
    about = "Convert TOML configuration into a PHP array literal"
)]
struct Cli {
    /// Input file (reads from stdin if not specified)
    #[arg(short, long)]
    input: Option<String>,

    /// Output file (writes to stdout if not specified)
    #[arg(short, long)]
    output: Option<String>,

    /// Treat the input as a single value expression instead of a document
    #[arg(long)]
    value: bool,

    /// Use short `[...]` array syntax instead of `array(...)`
    #[arg(long)]
    short_arrays: bool,

    /// Number of spaces per indentation level
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Php)]
    format: Format,

    /// Wrap the literal in a `<?php return ...;` file
    #[arg(long)]
    php_file: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Php,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = read_input(cli.input.as_deref())?;
    let value = if cli.value {
        parse_value_expression(input.trim()).context("Failed to parse value expression")?
    } else {
        Value::Table(parse_document(&input).context("Failed to parse TOML document")?)
    };

    let output = match cli.format {
        Format::Php => {
            let options = if cli.short_arrays {
                PhpOptions::short()
            } else {
                PhpOptions::new()
            }
            .with_indent_width(cli.indent);
            let literal = to_php_string_with_options(&value, options);
            if cli.php_file {
                format!("<?php\n\nreturn {literal};\n")
            } else {
                format!("{literal}\n")
            }
        }
        Format::Json => {
            let json =
                serde_json::to_string_pretty(&value).context("Failed to serialize JSON")?;
            format!("{json}\n")
        }
    };

    write_output(cli.output.as_deref(), &output)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
