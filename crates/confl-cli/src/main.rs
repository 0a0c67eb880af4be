//! `confl` CLI: convert a confl source file to YAML or JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Print the document as YAML
//! confl --input app.confl
//!
//! # JSON instead, written to a file
//! confl -i app.confl -f json -o app.json
//!
//! # Only check that the source parses
//! confl -i app.confl --check
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use confl_core::Format;
use std::io::ErrorKind;

#[derive(Parser)]
#[command(
    name = "confl",
    version,
    about = "Convert confl configuration sources to YAML or JSON"
)]
struct Cli {
    /// Path to the confl source file
    #[arg(short, long)]
    input: String,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,

    /// Parse only; print a summary to stderr instead of the document
    #[arg(long, conflicts_with = "output")]
    check: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => Format::Yaml,
            OutputFormat::Json => Format::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = read_input(&cli.input)?;

    let mut parser = confl_core::Parser::new();
    let document = parser
        .parse(&source)
        .with_context(|| format!("Failed to parse {}", cli.input))?;

    if cli.check {
        eprintln!(
            "ok: {} structs, {} constants",
            document.len(),
            parser.constants().len()
        );
        return Ok(());
    }

    let rendered = Format::from(cli.format)
        .render(&document)
        .context("Failed to render document")?;
    write_output(cli.output.as_deref(), &rendered)?;

    Ok(())
}

/// Load the whole source. A missing file gets its own message so it is not
/// mistaken for a parse failure.
fn read_input(path: &str) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => bail!("File {} not found.", path),
        Err(e) => Err(e).with_context(|| format!("Failed to read file: {}", path)),
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
