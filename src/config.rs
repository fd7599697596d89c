//! Industry coefficient catalog.
//!
//! Every industry offered to the user maps to a complete coefficient record;
//! the formulas read coefficients only through this catalog. The built-in
//! catalog ships twelve verticals and can be overridden or extended from a
//! `.valuemap.toml` file. Coefficient values are configuration content, not
//! engine invariants.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::OnceLock;

use crate::errors::{EstimateError, Result};

/// Per-industry coefficient record.
///
/// Every field has a shipped default so an override file may specify only the
/// coefficients it changes; omitted fields fall back to the cross-vertical
/// defaults below, not to the built-in record they replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryCoefficients {
    /// Manual actions avoided per entity per month
    #[serde(default = "default_manual_actions_per_entity")]
    pub manual_actions_per_entity: f64,

    /// Dollar value of one driven click
    #[serde(default = "default_cost_per_click")]
    pub cost_per_click: f64,

    /// Baseline listing actions per entity per month
    #[serde(default = "default_listings_actions_base")]
    pub listings_actions_base: f64,

    /// Uplift applied to listing actions once listings are managed
    #[serde(default = "default_listings_improvement_rate")]
    pub listings_improvement_rate: f64,

    /// Uplift attributable to review response and generation
    #[serde(default = "default_reviews_improvement_rate")]
    pub reviews_improvement_rate: f64,

    /// Baseline page views per entity per month
    #[serde(default = "default_page_views_base")]
    pub page_views_base: f64,

    /// Uplift applied to page views once landing pages are managed
    #[serde(default = "default_pages_improvement_rate")]
    pub pages_improvement_rate: f64,

    /// Share of listing actions that convert
    #[serde(default = "default_listings_conversion_rate")]
    pub listings_conversion_rate: f64,

    /// Share of page views that convert
    #[serde(default = "default_page_view_conversion_rate")]
    pub page_view_conversion_rate: f64,

    /// Share of site-search clicks that convert
    #[serde(default = "default_search_conversion_rate")]
    pub search_conversion_rate: f64,
}

impl Default for IndustryCoefficients {
    fn default() -> Self {
        Self {
            manual_actions_per_entity: default_manual_actions_per_entity(),
            cost_per_click: default_cost_per_click(),
            listings_actions_base: default_listings_actions_base(),
            listings_improvement_rate: default_listings_improvement_rate(),
            reviews_improvement_rate: default_reviews_improvement_rate(),
            page_views_base: default_page_views_base(),
            pages_improvement_rate: default_pages_improvement_rate(),
            listings_conversion_rate: default_listings_conversion_rate(),
            page_view_conversion_rate: default_page_view_conversion_rate(),
            search_conversion_rate: default_search_conversion_rate(),
        }
    }
}

impl IndustryCoefficients {
    // Pure function: check a single coefficient is usable in formulas
    fn is_valid_coefficient(value: f64) -> bool {
        value.is_finite() && value >= 0.0
    }

    fn named_coefficients(&self) -> [(&'static str, f64); 10] {
        [
            ("manual_actions_per_entity", self.manual_actions_per_entity),
            ("cost_per_click", self.cost_per_click),
            ("listings_actions_base", self.listings_actions_base),
            ("listings_improvement_rate", self.listings_improvement_rate),
            ("reviews_improvement_rate", self.reviews_improvement_rate),
            ("page_views_base", self.page_views_base),
            ("pages_improvement_rate", self.pages_improvement_rate),
            ("listings_conversion_rate", self.listings_conversion_rate),
            ("page_view_conversion_rate", self.page_view_conversion_rate),
            ("search_conversion_rate", self.search_conversion_rate),
        ]
    }

    /// Validate that every coefficient is a finite non-negative number
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, value) in self.named_coefficients() {
            if !Self::is_valid_coefficient(value) {
                return Err(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                ));
            }
        }
        Ok(())
    }
}

// Cross-vertical defaults applied when an override record omits a field
fn default_manual_actions_per_entity() -> f64 {
    40.0 // near the median of the shipped catalog
}
fn default_cost_per_click() -> f64 {
    2.0
}
fn default_listings_actions_base() -> f64 {
    200.0
}
fn default_listings_improvement_rate() -> f64 {
    0.2
}
fn default_reviews_improvement_rate() -> f64 {
    0.1
}
fn default_page_views_base() -> f64 {
    600.0
}
fn default_pages_improvement_rate() -> f64 {
    0.15
}
fn default_listings_conversion_rate() -> f64 {
    0.03
}
fn default_page_view_conversion_rate() -> f64 {
    0.02
}
fn default_search_conversion_rate() -> f64 {
    0.08
}

/// Catalog mapping industry display names to coefficient records.
///
/// Backed by a `BTreeMap` so `names()` lists industries in the stable
/// alphabetical order the selector expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryCatalog {
    #[serde(default)]
    pub industries: BTreeMap<String, IndustryCoefficients>,
}

impl Default for IndustryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl IndustryCatalog {
    /// The shipped twelve-vertical catalog.
    pub fn builtin() -> Self {
        Self {
            industries: builtin_industries(),
        }
    }

    /// Built-in catalog with override records merged on top. An override
    /// record replaces the built-in record for that name wholesale.
    pub fn with_overrides(overrides: BTreeMap<String, IndustryCoefficients>) -> Self {
        let mut industries = builtin_industries();
        industries.extend(overrides);
        Self { industries }
    }

    /// Industry names in display order.
    pub fn names(&self) -> Vec<&str> {
        self.industries.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<&IndustryCoefficients> {
        self.industries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.industries.contains_key(name)
    }

    /// Validate every record; a bad record is a configuration defect.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.industries.is_empty() {
            return Err("industry catalog must not be empty".to_string());
        }
        for (name, coefficients) in &self.industries {
            if name.trim().is_empty() {
                return Err("industry names must not be blank".to_string());
            }
            coefficients
                .validate()
                .map_err(|e| format!("industry '{}': {}", name, e))?;
        }
        Ok(())
    }
}

fn record(c: &[f64; 10]) -> IndustryCoefficients {
    IndustryCoefficients {
        manual_actions_per_entity: c[0],
        cost_per_click: c[1],
        listings_actions_base: c[2],
        listings_improvement_rate: c[3],
        reviews_improvement_rate: c[4],
        page_views_base: c[5],
        pages_improvement_rate: c[6],
        listings_conversion_rate: c[7],
        page_view_conversion_rate: c[8],
        search_conversion_rate: c[9],
    }
}

fn builtin_industries() -> BTreeMap<String, IndustryCoefficients> {
    // (manual actions, CPC, listings base, listings uplift, reviews uplift,
    //  page views base, pages uplift, listings conv, page view conv, search conv)
    let records: [(&str, [f64; 10]); 12] = [
        (
            "Automotive",
            [42.8, 2.06, 210.0, 0.22, 0.12, 640.0, 0.18, 0.034, 0.021, 0.082],
        ),
        (
            "Education & Nonprofit",
            [16.4, 1.45, 95.0, 0.17, 0.09, 480.0, 0.14, 0.021, 0.012, 0.055],
        ),
        (
            "Financial Services",
            [43.4, 3.77, 120.0, 0.19, 0.10, 520.0, 0.16, 0.028, 0.017, 0.071],
        ),
        (
            "Food Services",
            [
                249.5, 1.95, 430.0, 0.31, 0.16, 1150.0, 0.24, 0.052, 0.033, 0.118,
            ],
        ),
        (
            "Healthcare",
            [106.2, 2.62, 260.0, 0.24, 0.13, 730.0, 0.19, 0.038, 0.023, 0.09],
        ),
        (
            "Hospitality",
            [79.4, 1.8, 340.0, 0.27, 0.14, 980.0, 0.21, 0.045, 0.028, 0.101],
        ),
        (
            "Professional & Business Services",
            [28.2, 6.4, 110.0, 0.18, 0.1, 450.0, 0.15, 0.026, 0.015, 0.064],
        ),
        (
            "Public Sector",
            [28.2, 1.5, 85.0, 0.15, 0.08, 390.0, 0.12, 0.018, 0.01, 0.048],
        ),
        (
            "Real Estate",
            [32.4, 2.37, 150.0, 0.2, 0.11, 560.0, 0.17, 0.03, 0.018, 0.074],
        ),
        (
            "Recreation & Entertainment",
            [51.8, 1.55, 280.0, 0.25, 0.13, 870.0, 0.2, 0.041, 0.025, 0.095],
        ),
        (
            "Retail",
            [93.2, 1.35, 380.0, 0.29, 0.15, 1040.0, 0.22, 0.048, 0.03, 0.11],
        ),
        (
            "Telecommunications",
            [72.7, 3.1, 190.0, 0.21, 0.11, 610.0, 0.17, 0.032, 0.02, 0.079],
        ),
    ];

    records
        .iter()
        .map(|(name, coefficients)| ((*name).to_string(), record(coefficients)))
        .collect()
}

/// Pure function to read and parse catalog file contents
pub(crate) fn read_catalog_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate a catalog override from a TOML string
pub fn parse_and_validate_catalog(contents: &str) -> std::result::Result<IndustryCatalog, String> {
    let overrides = toml::from_str::<IndustryCatalog>(contents)
        .map_err(|e| format!("Failed to parse catalog file: {}", e))?;
    let catalog = IndustryCatalog::with_overrides(overrides.industries);
    catalog.validate()?;
    Ok(catalog)
}

/// Load a catalog from an explicitly named override file; failures are hard
/// errors because the user asked for this exact file.
pub fn load_catalog_from_path(path: &Path) -> Result<IndustryCatalog> {
    let contents = read_catalog_file(path).map_err(|e| {
        EstimateError::Configuration(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_and_validate_catalog(&contents).map_err(EstimateError::Configuration)
}

/// Try loading `.valuemap.toml` from the working directory, falling back to
/// the built-in catalog on any problem.
pub(crate) fn try_load_local_catalog() -> Option<IndustryCatalog> {
    let path = Path::new(".valuemap.toml");
    if !path.exists() {
        return None;
    }
    let contents = match read_catalog_file(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!(
                "Failed to read {}: {}. Using built-in catalog.",
                path.display(),
                e
            );
            return None;
        }
    };
    match parse_and_validate_catalog(&contents) {
        Ok(catalog) => {
            log::debug!("Loaded industry catalog from {}", path.display());
            Some(catalog)
        }
        Err(e) => {
            log::warn!("{}. Using built-in catalog.", e);
            None
        }
    }
}

/// Resolve the catalog for a command: an explicit `--config` path is
/// authoritative, otherwise the cached process-wide catalog.
pub fn resolve_catalog(explicit: Option<&Path>) -> Result<IndustryCatalog> {
    match explicit {
        Some(path) => load_catalog_from_path(path),
        None => Ok(get_catalog().clone()),
    }
}

/// Cached process-wide catalog (built-in unless `.valuemap.toml` overrides it)
pub fn get_catalog() -> &'static IndustryCatalog {
    static CATALOG: OnceLock<IndustryCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| try_load_local_catalog().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_twelve_valid_records() {
        let catalog = IndustryCatalog::builtin();
        assert_eq!(catalog.names().len(), 12);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn builtin_names_are_alphabetical() {
        let catalog = IndustryCatalog::builtin();
        let names = catalog.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"Automotive"));
        assert_eq!(names.last(), Some(&"Telecommunications"));
    }

    #[test]
    fn manual_actions_match_source_lookup_table() {
        let catalog = IndustryCatalog::builtin();
        assert_eq!(catalog.get("Retail").unwrap().manual_actions_per_entity, 93.2);
        assert_eq!(
            catalog
                .get("Food Services")
                .unwrap()
                .manual_actions_per_entity,
            249.5
        );
    }

    #[test]
    fn negative_coefficient_fails_validation() {
        let mut coefficients = IndustryCoefficients::default();
        coefficients.cost_per_click = -1.0;
        let err = coefficients.validate().unwrap_err();
        assert!(err.contains("cost_per_click"));
    }

    #[test]
    fn override_replaces_record_and_keeps_other_industries() {
        let catalog = parse_and_validate_catalog(
            r#"
            [industries."Retail"]
            manual_actions_per_entity = 120.0
            "#,
        )
        .unwrap();
        let retail = catalog.get("Retail").unwrap();
        assert_eq!(retail.manual_actions_per_entity, 120.0);
        // omitted fields fall to the generic defaults, not the built-in record
        assert_eq!(retail.cost_per_click, IndustryCoefficients::default().cost_per_click);
        assert_eq!(catalog.names().len(), 12);
    }

    #[test]
    fn override_can_add_new_industry() {
        let catalog = parse_and_validate_catalog(
            r#"
            [industries."Space Tourism"]
            manual_actions_per_entity = 12.5
            cost_per_click = 9.0
            "#,
        )
        .unwrap();
        assert_eq!(catalog.names().len(), 13);
        assert!(catalog.contains("Space Tourism"));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let err = parse_and_validate_catalog(
            r#"
            [industries."Retail"]
            cost_per_click = -3.0
            "#,
        )
        .unwrap_err();
        assert!(err.contains("Retail"));
        assert!(err.contains("cost_per_click"));
    }

    #[test]
    fn garbage_toml_is_a_parse_error() {
        assert!(parse_and_validate_catalog("not toml [").is_err());
    }
}
