//! The incremental recalculation engine.
//!
//! The engine owns the single source of truth for input and derived state.
//! Each input event mutates input state, seeds the metric dependency graph,
//! and recomputes the affected metrics in topological order before
//! returning, so a snapshot taken after any event is always internally
//! consistent. Events are processed one at a time to completion; nothing is
//! deferred or batched.

pub mod event;
pub mod formulas;
pub mod graph;

pub use event::InputEvent;
pub use graph::{Metric, MetricGraph};

use crate::coerce::{coerce_amount, coerce_count};
use crate::config::{IndustryCatalog, IndustryCoefficients};
use crate::core::{DerivedState, InputState, Product, Snapshot, COST_SAVED_PER_ACTION};
use crate::errors::{EstimateError, Result};

pub struct Engine {
    catalog: IndustryCatalog,
    inputs: InputState,
    derived: DerivedState,
    graph: MetricGraph,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_catalog(IndustryCatalog::builtin())
    }

    pub fn with_catalog(catalog: IndustryCatalog) -> Self {
        Self {
            catalog,
            inputs: InputState::default(),
            derived: DerivedState::default(),
            graph: MetricGraph::new(),
        }
    }

    /// Apply one input event and return the settled snapshot.
    pub fn apply(&mut self, event: InputEvent) -> Result<Snapshot> {
        match event {
            InputEvent::IndustrySelected(name) => self.set_industry(&name)?,
            InputEvent::EntityCountChanged(raw) => self.set_entity_count(&raw),
            InputEvent::AverageValueChanged(raw) => self.set_avg_transaction_value(&raw),
            InputEvent::VendorCostChanged(raw) => self.set_vendor_cost(&raw),
            InputEvent::PageViewsChanged(raw) => self.set_page_views(&raw),
            InputEvent::ProductToggled { product, enabled } => {
                self.toggle_product(product, enabled)
            }
        }
        Ok(self.snapshot())
    }

    /// Select an industry, validated against the catalog. On failure the
    /// prior selection is retained and no metric changes.
    pub fn set_industry(&mut self, name: &str) -> Result<()> {
        if !self.catalog.contains(name) {
            return Err(EstimateError::UnknownIndustry {
                name: name.to_string(),
            });
        }
        self.inputs.industry = Some(name.to_string());
        // The industry keys nearly every formula: invalidate every
        // coefficient reader and let the graph order the rest.
        self.recompute(&[
            Metric::ManualActionsSaved,
            Metric::ClicksDriven,
            Metric::MarketingValue,
            Metric::ConversionsDriven,
        ]);
        Ok(())
    }

    pub fn set_entity_count(&mut self, raw: &str) {
        let coerced = coerce_count(raw);
        self.inputs.validity.entity_count = coerced.valid;
        if !coerced.valid {
            return;
        }
        self.inputs.entity_count = coerced.value as u64;
        self.recompute(&[
            Metric::ManualActionsSaved,
            Metric::ClicksDriven,
            Metric::ConversionsDriven,
        ]);
    }

    pub fn set_avg_transaction_value(&mut self, raw: &str) {
        let coerced = coerce_amount(raw);
        self.inputs.validity.avg_transaction_value = coerced.valid;
        if !coerced.valid {
            return;
        }
        self.inputs.avg_transaction_value = coerced.value;
        // feeds neither clicks nor manual actions
        self.recompute(&[Metric::ConversionValue]);
    }

    pub fn set_vendor_cost(&mut self, raw: &str) {
        let coerced = coerce_amount(raw);
        self.inputs.validity.vendor_cost = coerced.valid;
        if !coerced.valid {
            return;
        }
        self.inputs.vendor_cost = coerced.value;
        // cost is the ROI denominator, not a numerator input
        self.recompute(&[Metric::Roi]);
    }

    pub fn set_page_views(&mut self, raw: &str) {
        let coerced = coerce_count(raw);
        self.inputs.validity.page_views = coerced.valid;
        if !coerced.valid {
            return;
        }
        self.inputs.page_views = coerced.value as u64;
        // only the search term reads page views; with search disabled the
        // stored value sits inert until the toggle flips
        self.recompute(&[Metric::ConversionsDriven]);
    }

    /// Toggle a product. `support_search` is tracked for display only and
    /// dirties nothing.
    pub fn toggle_product(&mut self, product: Product, enabled: bool) {
        self.inputs.products.set(product, enabled);
        let seeds: &[Metric] = match product {
            Product::Listings | Product::Pages => &[
                Metric::Multiplier,
                Metric::ClicksDriven,
                Metric::ConversionsDriven,
            ],
            Product::Reviews => &[Metric::ClicksDriven, Metric::ConversionsDriven],
            Product::Search => &[Metric::Multiplier, Metric::ConversionsDriven],
            Product::SupportSearch => &[],
        };
        self.recompute(seeds);
    }

    /// Read-only view of the settled state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            industry: self.inputs.industry.clone(),
            entity_count: self.inputs.entity_count,
            avg_transaction_value: self.inputs.avg_transaction_value,
            vendor_cost: self.inputs.vendor_cost,
            page_views: self.inputs.page_views,
            products: self.inputs.products,
            validity: self.inputs.validity,
            cost_per_click: self.coefficients().map_or(0.0, |c| c.cost_per_click),
            cost_saved_per_action: COST_SAVED_PER_ACTION,
            metrics: self.derived,
        }
    }

    /// Valid industry names for populating a selector.
    pub fn industry_names(&self) -> Vec<&str> {
        self.catalog.names()
    }

    pub fn catalog(&self) -> &IndustryCatalog {
        &self.catalog
    }

    fn coefficients(&self) -> Option<&IndustryCoefficients> {
        self.inputs
            .industry
            .as_deref()
            .and_then(|name| self.catalog.get(name))
    }

    fn recompute(&mut self, seeds: &[Metric]) {
        if seeds.is_empty() {
            return;
        }
        for metric in self.graph.affected(seeds) {
            self.recompute_metric(metric);
            log::debug!("recomputed {} = {}", metric.name(), self.metric_value(metric));
        }
    }

    fn recompute_metric(&mut self, metric: Metric) {
        match metric {
            Metric::Multiplier => {
                self.derived.multiplier = formulas::multiplier(&self.inputs.products);
            }
            Metric::ManualActionsSaved => {
                self.derived.manual_actions_saved = formulas::manual_actions_saved(
                    self.coefficients(),
                    self.derived.multiplier,
                    self.inputs.entity_count,
                );
            }
            Metric::OperationalValue => {
                self.derived.operational_value =
                    formulas::operational_value(self.derived.manual_actions_saved);
            }
            Metric::ClicksDriven => {
                self.derived.clicks_driven = formulas::clicks_driven(
                    self.coefficients(),
                    &self.inputs.products,
                    self.inputs.entity_count,
                );
            }
            Metric::MarketingValue => {
                self.derived.marketing_value =
                    formulas::marketing_value(self.coefficients(), self.derived.clicks_driven);
            }
            Metric::ConversionsDriven => {
                self.derived.conversions_driven = formulas::conversions_driven(
                    self.coefficients(),
                    &self.inputs.products,
                    self.inputs.entity_count,
                    self.inputs.page_views,
                );
            }
            Metric::ConversionValue => {
                self.derived.conversion_value = formulas::conversion_value(
                    self.derived.conversions_driven,
                    self.inputs.avg_transaction_value,
                );
            }
            Metric::TotalValue => {
                self.derived.total_value = formulas::total_value(
                    self.derived.operational_value,
                    self.derived.marketing_value,
                    self.derived.conversion_value,
                );
            }
            Metric::Roi => {
                self.derived.roi =
                    formulas::roi(self.derived.total_value, self.inputs.vendor_cost);
            }
        }
    }

    fn metric_value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Multiplier => f64::from(self.derived.multiplier),
            Metric::ManualActionsSaved => self.derived.manual_actions_saved,
            Metric::OperationalValue => self.derived.operational_value,
            Metric::ClicksDriven => self.derived.clicks_driven,
            Metric::MarketingValue => self.derived.marketing_value,
            Metric::ConversionsDriven => self.derived.conversions_driven,
            Metric::ConversionValue => self.derived.conversion_value,
            Metric::TotalValue => self.derived.total_value,
            Metric::Roi => self.derived.roi,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_engine_snapshot_is_all_zero() {
        let engine = Engine::new();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.industry, None);
        assert_eq!(snapshot.metrics, DerivedState::default());
        assert!(snapshot.validity.all_valid());
    }

    #[test]
    fn unknown_industry_is_refused_and_state_kept() {
        let mut engine = Engine::new();
        engine.set_industry("Retail").unwrap();
        let before = engine.snapshot();
        let err = engine.set_industry("Underwater Basket Weaving").unwrap_err();
        assert!(matches!(err, EstimateError::UnknownIndustry { .. }));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn apply_routes_events_to_operations() {
        let mut engine = Engine::new();
        engine
            .apply(InputEvent::IndustrySelected("Retail".to_string()))
            .unwrap();
        let snapshot = engine
            .apply(InputEvent::ProductToggled {
                product: Product::Listings,
                enabled: true,
            })
            .unwrap();
        assert_eq!(snapshot.metrics.multiplier, 3);
        assert_eq!(snapshot, engine.snapshot());
    }

    #[test]
    fn industry_names_come_from_the_catalog() {
        let engine = Engine::new();
        assert_eq!(engine.industry_names().len(), 12);
        assert!(engine.industry_names().contains(&"Retail"));
    }
}
