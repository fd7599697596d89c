//! Core value types: products, input state, derived metrics, snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::EstimateError;

/// Fixed dollar value saved per manual action avoided.
pub const COST_SAVED_PER_ACTION: f64 = 2.08;

/// A toggleable product in the estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    Listings,
    Reviews,
    Pages,
    Search,
    SupportSearch,
}

impl Product {
    pub const ALL: [Product; 5] = [
        Product::Listings,
        Product::Reviews,
        Product::Pages,
        Product::Search,
        Product::SupportSearch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Listings => "listings",
            Product::Reviews => "reviews",
            Product::Pages => "pages",
            Product::Search => "search",
            Product::SupportSearch => "support_search",
        }
    }

    /// Weight this product contributes to the action multiplier.
    pub fn action_weight(&self) -> u32 {
        match self {
            Product::Listings | Product::Search => 3,
            Product::Pages => 1,
            Product::Reviews | Product::SupportSearch => 0,
        }
    }

    /// Whether the product drives clicks and conversions per entity.
    /// Search converts through page views instead; support search is
    /// tracked for display only.
    pub fn drives_clicks(&self) -> bool {
        matches!(self, Product::Listings | Product::Reviews | Product::Pages)
    }
}

impl FromStr for Product {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "listings" => Ok(Product::Listings),
            "reviews" => Ok(Product::Reviews),
            "pages" => Ok(Product::Pages),
            "search" => Ok(Product::Search),
            "support_search" | "support-search" | "supportsearch" => Ok(Product::SupportSearch),
            other => Err(EstimateError::UnknownProduct(other.to_string())),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of enabled products.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSet {
    pub listings: bool,
    pub reviews: bool,
    pub pages: bool,
    pub search: bool,
    pub support_search: bool,
}

impl ProductSet {
    pub fn enabled(&self, product: Product) -> bool {
        match product {
            Product::Listings => self.listings,
            Product::Reviews => self.reviews,
            Product::Pages => self.pages,
            Product::Search => self.search,
            Product::SupportSearch => self.support_search,
        }
    }

    pub fn set(&mut self, product: Product, enabled: bool) {
        match product {
            Product::Listings => self.listings = enabled,
            Product::Reviews => self.reviews = enabled,
            Product::Pages => self.pages = enabled,
            Product::Search => self.search = enabled,
            Product::SupportSearch => self.support_search = enabled,
        }
    }

    /// Enabled products in declaration order.
    pub fn enabled_products(&self) -> Vec<Product> {
        Product::ALL
            .iter()
            .copied()
            .filter(|p| self.enabled(*p))
            .collect()
    }
}

/// Per-field validity flags. A false flag means the last raw edit failed to
/// parse and the stored value is the previous good one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidity {
    pub entity_count: bool,
    pub avg_transaction_value: bool,
    pub vendor_cost: bool,
    pub page_views: bool,
}

impl Default for FieldValidity {
    fn default() -> Self {
        Self {
            entity_count: true,
            avg_transaction_value: true,
            vendor_cost: true,
            page_views: true,
        }
    }
}

impl FieldValidity {
    pub fn all_valid(&self) -> bool {
        self.entity_count && self.avg_transaction_value && self.vendor_cost && self.page_views
    }
}

/// Raw inputs owned by the engine, mutated only through its operations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    /// `None` until the user selects an industry; formulas never index the
    /// catalog through the unset sentinel.
    pub industry: Option<String>,
    pub entity_count: u64,
    pub avg_transaction_value: f64,
    pub vendor_cost: f64,
    pub page_views: u64,
    pub products: ProductSet,
    pub validity: FieldValidity,
}

/// Derived metrics, recomputed by the engine and never assigned directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedState {
    /// Weighted count of enabled action-generating products.
    pub multiplier: u32,
    pub manual_actions_saved: f64,
    pub operational_value: f64,
    pub clicks_driven: f64,
    pub marketing_value: f64,
    pub conversions_driven: f64,
    pub conversion_value: f64,
    pub total_value: f64,
    /// Whole-number multiple of vendor cost; 0 when cost is 0.
    pub roi: f64,
}

/// Read-only view of the estimator after an event has settled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub industry: Option<String>,
    pub entity_count: u64,
    pub avg_transaction_value: f64,
    pub vendor_cost: f64,
    pub page_views: u64,
    pub products: ProductSet,
    pub validity: FieldValidity,
    /// Cost per click of the selected industry, 0 while unset. Echoed for
    /// display alongside the marketing metrics.
    pub cost_per_click: f64,
    pub cost_saved_per_action: f64,
    #[serde(flatten)]
    pub metrics: DerivedState,
}

/// A snapshot stamped for reporting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EstimateReport {
    pub generated_at: DateTime<Utc>,
    pub snapshot: Snapshot,
}

impl EstimateReport {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            generated_at: Utc::now(),
            snapshot,
        }
    }
}
