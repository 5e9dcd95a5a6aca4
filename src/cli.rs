//! Command-line interface for microdata extraction.

use std::{
    fs::File,
    io::{self, Read, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser as ClapParser;

use crate::parser::Parser;

/// Extract microdata items from an HTML document and print them as JSON.
#[derive(Debug, ClapParser)]
#[command(name = "microdata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// HTML file to read (default: stdin)
    pub file: Option<PathBuf>,

    /// URL relative references in the document are resolved against
    #[arg(short, long, default_value = "http://example.com/")]
    pub base_url: String,

    /// Indent the JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Ignore <base href> elements in the document
    #[arg(long)]
    pub ignore_base_element: bool,
}

/// Run the CLI.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    execute(&cli, io::stdin().lock(), &mut stdout.lock())
}

/// Execute a parsed command line, reading stdin only when no file is given.
pub fn execute<R: Read, W: Write>(cli: &Cli, stdin: R, out: &mut W) -> anyhow::Result<()> {
    let parser = Parser::builder()
        .base_url(cli.base_url.as_str())
        .honor_base_element(!cli.ignore_base_element)
        .build()?;

    let data = match &cli.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            parser.parse_reader(file)?
        }
        None => parser.parse_reader(stdin)?,
    };

    let json = if cli.pretty {
        data.to_json_pretty()?
    } else {
        data.to_json()?
    };
    writeln!(out, "{json}")?;

    Ok(())
}
