//! Interactive estimation session: the line-oriented input surface.
//!
//! Reads one command per line, maps it to an input event, and re-renders the
//! snapshot after every event: the incremental protocol, driven by hand.

use anyhow::Result;
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::resolve_catalog;
use crate::core::{EstimateReport, Product, Snapshot};
use crate::engine::{Engine, InputEvent};
use crate::io::output::{format_currency, TerminalWriter};
use crate::io::OutputWriter;

/// One parsed session line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Event(InputEvent),
    Show,
    Industries,
    Help,
    Quit,
}

/// Parse one session line into a command.
pub fn parse_line(line: &str) -> Result<SessionCommand, String> {
    let trimmed = line.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let keyword = parts.next().unwrap_or("").to_ascii_lowercase();
    let rest = parts.next().unwrap_or("").trim();

    match keyword.as_str() {
        "industry" => {
            if rest.is_empty() {
                Err("usage: industry <name>".to_string())
            } else {
                Ok(SessionCommand::Event(InputEvent::IndustrySelected(
                    rest.to_string(),
                )))
            }
        }
        "entities" => Ok(SessionCommand::Event(InputEvent::EntityCountChanged(
            rest.to_string(),
        ))),
        "avg" => Ok(SessionCommand::Event(InputEvent::AverageValueChanged(
            rest.to_string(),
        ))),
        "cost" => Ok(SessionCommand::Event(InputEvent::VendorCostChanged(
            rest.to_string(),
        ))),
        "views" => Ok(SessionCommand::Event(InputEvent::PageViewsChanged(
            rest.to_string(),
        ))),
        "toggle" => parse_toggle(rest),
        "show" => Ok(SessionCommand::Show),
        "industries" => Ok(SessionCommand::Industries),
        "help" => Ok(SessionCommand::Help),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        other => Err(format!("unknown command '{}'; try 'help'", other)),
    }
}

fn parse_toggle(rest: &str) -> Result<SessionCommand, String> {
    let mut parts = rest.split_whitespace();
    let product_name = parts.next().unwrap_or("");
    let state = parts.next().unwrap_or("");
    let product: Product = product_name
        .parse()
        .map_err(|_| format!("unknown product '{}'", product_name))?;
    let enabled = match state.to_ascii_lowercase().as_str() {
        "on" | "true" => true,
        "off" | "false" => false,
        _ => return Err("usage: toggle <product> on|off".to_string()),
    };
    Ok(SessionCommand::Event(InputEvent::ProductToggled {
        product,
        enabled,
    }))
}

pub fn run(config: Option<PathBuf>) -> Result<()> {
    let catalog = resolve_catalog(config.as_deref())?;
    let mut engine = Engine::with_catalog(catalog);

    println!(
        "{}: one command per line; 'help' lists commands, 'quit' leaves.",
        "valuemap session".bold()
    );

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Ok(SessionCommand::Quit) => break,
            Ok(SessionCommand::Help) => print_help(),
            Ok(SessionCommand::Industries) => {
                for name in engine.industry_names() {
                    println!("  {}", name);
                }
            }
            Ok(SessionCommand::Show) => {
                let mut writer = TerminalWriter::new(io::stdout());
                writer.write_report(&EstimateReport::new(engine.snapshot()))?;
            }
            Ok(SessionCommand::Event(event)) => match engine.apply(event) {
                Ok(snapshot) => {
                    warn_invalid(&snapshot);
                    print_summary(&snapshot);
                }
                Err(err) => eprintln!("{}", format!("error: {}", err).red()),
            },
            Err(message) => eprintln!("{}", message.red()),
        }
        io::stdout().flush()?;
    }
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  industry <name>            select the industry vertical");
    println!("  entities <n>               set the entity count");
    println!("  avg <dollars>              set the average transaction value");
    println!("  cost <dollars>             set the vendor cost");
    println!("  views <n>                  set monthly page views");
    println!("  toggle <product> on|off    enable or disable a product");
    println!("  industries                 list valid industry names");
    println!("  show                       full value breakdown");
    println!("  quit                       leave the session");
}

fn print_summary(snapshot: &Snapshot) {
    let metrics = &snapshot.metrics;
    println!(
        "total {} (operational {} + marketing {} + conversion {}), roi {}x",
        format_currency(metrics.total_value).bold(),
        format_currency(metrics.operational_value),
        format_currency(metrics.marketing_value),
        format_currency(metrics.conversion_value),
        metrics.roi as i64
    );
}

fn warn_invalid(snapshot: &Snapshot) {
    let validity = &snapshot.validity;
    let fields = [
        (validity.entity_count, "entities"),
        (validity.avg_transaction_value, "avg"),
        (validity.vendor_cost, "cost"),
        (validity.page_views, "views"),
    ];
    for (valid, field) in fields {
        if !valid {
            eprintln!(
                "{}",
                format!("{}: not a valid non-negative number; keeping the last good value", field)
                    .red()
            );
        }
    }
}
