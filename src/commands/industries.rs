//! List the industries the coefficient catalog can estimate for.

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::config::resolve_catalog;
use crate::io::OutputFormat;

pub fn run(format: OutputFormat, config: Option<PathBuf>) -> Result<()> {
    let catalog = resolve_catalog(config.as_deref())?;
    let names = catalog.names();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
        OutputFormat::Markdown => {
            println!("# Industries");
            println!();
            for name in names {
                println!("- {}", name);
            }
        }
        OutputFormat::Terminal => {
            println!("{}", "Available industries".bold().underline());
            for name in names {
                println!("  {}", name);
            }
        }
    }
    Ok(())
}
