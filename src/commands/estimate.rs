//! One-shot estimate: map CLI flags to input events, print the report.

use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;

use crate::config::resolve_catalog;
use crate::core::{EstimateReport, Product, Snapshot};
use crate::engine::Engine;
use crate::errors::EstimateError;
use crate::io::{create_writer, OutputFormat};

pub struct EstimateConfig {
    pub industry: Option<String>,
    pub entities: String,
    pub avg_transaction: String,
    pub vendor_cost: String,
    pub page_views: String,
    pub products: Vec<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn run(config: EstimateConfig) -> Result<()> {
    let catalog = resolve_catalog(config.config.as_deref())?;
    let mut engine = Engine::with_catalog(catalog);

    if let Some(name) = &config.industry {
        apply_industry(&mut engine, name)?;
    }
    engine.set_entity_count(&config.entities);
    engine.set_avg_transaction_value(&config.avg_transaction);
    engine.set_vendor_cost(&config.vendor_cost);
    engine.set_page_views(&config.page_views);
    for name in &config.products {
        let product: Product = name
            .parse()
            .map_err(|_| anyhow!("unknown product '{}'; valid products: listings, reviews, pages, search, support_search", name))?;
        engine.toggle_product(product, true);
    }

    let snapshot = engine.snapshot();
    reject_invalid_inputs(&snapshot, &config)?;

    let report = EstimateReport::new(snapshot);
    let mut writer = create_writer(config.output.clone(), config.format)?;
    writer.write_report(&report)?;
    Ok(())
}

fn apply_industry(engine: &mut Engine, name: &str) -> Result<()> {
    match engine.set_industry(name) {
        Ok(()) => Ok(()),
        Err(EstimateError::UnknownIndustry { name }) => Err(anyhow!(
            "unknown industry '{}'; valid industries: {}",
            name,
            engine.industry_names().join(", ")
        )),
        Err(other) => Err(other.into()),
    }
}

// One-shot runs have no later edit to repair a bad field, so invalid input
// is a hard error here rather than a validity flag.
fn reject_invalid_inputs(snapshot: &Snapshot, config: &EstimateConfig) -> Result<()> {
    if !snapshot.validity.entity_count {
        bail!(
            "--entities '{}' is not a valid non-negative number",
            config.entities
        );
    }
    if !snapshot.validity.avg_transaction_value {
        bail!(
            "--avg-transaction '{}' is not a valid non-negative number",
            config.avg_transaction
        );
    }
    if !snapshot.validity.vendor_cost {
        bail!(
            "--vendor-cost '{}' is not a valid non-negative number",
            config.vendor_cost
        );
    }
    if !snapshot.validity.page_views {
        bail!(
            "--page-views '{}' is not a valid non-negative number",
            config.page_views
        );
    }
    Ok(())
}
