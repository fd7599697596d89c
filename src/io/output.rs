//! Report writers: terminal, JSON, and markdown renderings of an estimate.

use crate::core::{EstimateReport, Snapshot};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()>;
}

/// Format a dollar amount with thousands separators, e.g. `$12,345.07`.
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        whole,
        cents % 100
    )
}

/// Format a unitless metric (actions, clicks, conversions) to two decimals.
pub fn format_count(value: f64) -> String {
    group_decimal(value)
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let chunk = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(chunk.to_string());
            break;
        }
        groups.push(format!("{:03}", chunk));
    }
    groups.reverse();
    groups.join(",")
}

fn group_decimal(value: f64) -> String {
    let negative = value < 0.0;
    let hundredths = (value.abs() * 100.0).round() as u64;
    format!(
        "{}{}.{:02}",
        if negative { "-" } else { "" },
        group_thousands(hundredths / 100),
        hundredths % 100
    )
}

fn roi_label(roi: f64) -> String {
    format!("{}x", roi as i64)
}

fn products_label(snapshot: &Snapshot) -> String {
    let enabled = snapshot.products.enabled_products();
    if enabled.is_empty() {
        "none".to_string()
    } else {
        enabled
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn invalid_fields(snapshot: &Snapshot) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if !snapshot.validity.entity_count {
        fields.push("entity count");
    }
    if !snapshot.validity.avg_transaction_value {
        fields.push("average transaction value");
    }
    if !snapshot.validity.vendor_cost {
        fields.push("vendor cost");
    }
    if !snapshot.validity.page_views {
        fields.push("page views");
    }
    fields
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Valuemap Estimate")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_inputs(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        writeln!(self.writer, "## Inputs")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Input | Value |")?;
        writeln!(self.writer, "|-------|-------|")?;
        writeln!(
            self.writer,
            "| Industry | {} |",
            snapshot.industry.as_deref().unwrap_or("(not selected)")
        )?;
        writeln!(self.writer, "| Entities | {} |", snapshot.entity_count)?;
        writeln!(
            self.writer,
            "| Average transaction value | {} |",
            format_currency(snapshot.avg_transaction_value)
        )?;
        writeln!(
            self.writer,
            "| Vendor cost | {} |",
            format_currency(snapshot.vendor_cost)
        )?;
        writeln!(self.writer, "| Page views | {} |", snapshot.page_views)?;
        writeln!(self.writer, "| Products | {} |", products_label(snapshot))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_values(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let metrics = &snapshot.metrics;
        writeln!(self.writer, "## Value Breakdown")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Manual actions saved | {} |",
            format_count(metrics.manual_actions_saved)
        )?;
        writeln!(
            self.writer,
            "| Operational value | {} |",
            format_currency(metrics.operational_value)
        )?;
        writeln!(
            self.writer,
            "| Clicks driven | {} |",
            format_count(metrics.clicks_driven)
        )?;
        writeln!(
            self.writer,
            "| Marketing value | {} |",
            format_currency(metrics.marketing_value)
        )?;
        writeln!(
            self.writer,
            "| Conversions driven | {} |",
            format_count(metrics.conversions_driven)
        )?;
        writeln!(
            self.writer,
            "| Conversion value | {} |",
            format_currency(metrics.conversion_value)
        )?;
        writeln!(
            self.writer,
            "| **Total value** | **{}** |",
            format_currency(metrics.total_value)
        )?;
        writeln!(self.writer, "| **ROI** | **{}** |", roi_label(metrics.roi))?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_inputs(&report.snapshot)?;
        self.write_values(&report.snapshot)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_section(
        &mut self,
        title: &str,
        rows: &[(&str, String)],
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", title.bold().underline())?;
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        for (label, value) in rows {
            table.add_row(vec![(*label).to_string(), value.clone()]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let snapshot = &report.snapshot;
        let metrics = &snapshot.metrics;

        writeln!(
            self.writer,
            "{} ({})",
            "Value Estimate".bold(),
            snapshot.industry.as_deref().unwrap_or("no industry selected")
        )?;
        writeln!(self.writer)?;

        for field in invalid_fields(snapshot) {
            writeln!(
                self.writer,
                "{}",
                format!("warning: {} is not a valid non-negative number; keeping the last good value", field)
                    .red()
            )?;
        }

        self.write_section(
            "Operational Value",
            &[
                (
                    "Total manual actions saved",
                    format_count(metrics.manual_actions_saved),
                ),
                (
                    "Cost saved per action (fixed)",
                    format_currency(snapshot.cost_saved_per_action),
                ),
                (
                    "Total operational value",
                    format_currency(metrics.operational_value),
                ),
            ],
        )?;

        self.write_section(
            "Marketing Value",
            &[
                ("Number of entities", snapshot.entity_count.to_string()),
                ("Total clicks driven", format_count(metrics.clicks_driven)),
                ("Cost per click", format_currency(snapshot.cost_per_click)),
                (
                    "Total marketing value",
                    format_currency(metrics.marketing_value),
                ),
            ],
        )?;

        self.write_section(
            "Conversion Value",
            &[
                (
                    "Total conversions driven",
                    format_count(metrics.conversions_driven),
                ),
                (
                    "Average transaction value",
                    format_currency(snapshot.avg_transaction_value),
                ),
                (
                    "Total conversion value",
                    format_currency(metrics.conversion_value),
                ),
            ],
        )?;

        self.write_section(
            "Summary",
            &[
                ("Total value", format_currency(metrics.total_value)),
                ("Vendor cost", format_currency(snapshot.vendor_cost)),
                ("ROI", roi_label(metrics.roi)),
            ],
        )?;

        Ok(())
    }
}

fn boxed_writer<W: Write + 'static>(writer: W, format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

/// Create a writer for the chosen destination and format.
pub fn create_writer(
    output: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    match output {
        Some(path) => {
            let file = File::create(path)?;
            Ok(boxed_writer(file, format))
        }
        None => Ok(boxed_writer(io::stdout(), format)),
    }
}
