//! Per-metric formulas.
//!
//! All formulas are pure functions over inputs and upstream metric values.
//! A formula whose precondition is unmet (no industry selected, product
//! disabled) contributes 0, so the derived state holds finite numbers even
//! in the nothing-selected-yet initial state.

use crate::config::IndustryCoefficients;
use crate::core::{Product, ProductSet, COST_SAVED_PER_ACTION};

/// Assumed share of page views that turn into site-search clicks.
pub const SEARCH_CLICK_RATE: f64 = 0.1;

/// Assumed search-specific improvement applied on top of the click rate.
pub const SEARCH_IMPROVEMENT_RATE: f64 = 0.15;

/// Ceiling to two decimal places, the rounding policy for currency-like
/// values.
pub fn ceil2(value: f64) -> f64 {
    (value * 100.0).ceil() / 100.0
}

/// Weighted count of enabled action-generating products.
pub fn multiplier(products: &ProductSet) -> u32 {
    Product::ALL
        .iter()
        .filter(|p| products.enabled(**p))
        .map(Product::action_weight)
        .sum()
}

pub fn manual_actions_saved(
    coefficients: Option<&IndustryCoefficients>,
    multiplier: u32,
    entity_count: u64,
) -> f64 {
    match coefficients {
        Some(c) => ceil2(c.manual_actions_per_entity * f64::from(multiplier) * entity_count as f64),
        None => 0.0,
    }
}

pub fn operational_value(manual_actions_saved: f64) -> f64 {
    ceil2(manual_actions_saved * COST_SAVED_PER_ACTION)
}

/// Baseline monthly action volume for one click-driving product.
fn base_rate(product: Product, coefficients: &IndustryCoefficients) -> f64 {
    match product {
        Product::Listings | Product::Reviews => coefficients.listings_actions_base,
        Product::Pages => coefficients.page_views_base,
        Product::Search | Product::SupportSearch => 0.0,
    }
}

fn improvement_rate(product: Product, coefficients: &IndustryCoefficients) -> f64 {
    match product {
        Product::Listings => coefficients.listings_improvement_rate,
        Product::Reviews => coefficients.reviews_improvement_rate,
        Product::Pages => coefficients.pages_improvement_rate,
        Product::Search | Product::SupportSearch => 0.0,
    }
}

fn conversion_rate(product: Product, coefficients: &IndustryCoefficients) -> f64 {
    match product {
        Product::Listings | Product::Reviews => coefficients.listings_conversion_rate,
        Product::Pages => coefficients.page_view_conversion_rate,
        Product::Search | Product::SupportSearch => 0.0,
    }
}

pub fn clicks_driven(
    coefficients: Option<&IndustryCoefficients>,
    products: &ProductSet,
    entity_count: u64,
) -> f64 {
    let Some(coefficients) = coefficients else {
        return 0.0;
    };
    Product::ALL
        .iter()
        .filter(|p| p.drives_clicks() && products.enabled(**p))
        .map(|p| base_rate(*p, coefficients) * improvement_rate(*p, coefficients) * entity_count as f64)
        .sum()
}

pub fn marketing_value(coefficients: Option<&IndustryCoefficients>, clicks_driven: f64) -> f64 {
    match coefficients {
        Some(c) => ceil2(clicks_driven * c.cost_per_click),
        None => 0.0,
    }
}

pub fn conversions_driven(
    coefficients: Option<&IndustryCoefficients>,
    products: &ProductSet,
    entity_count: u64,
    page_views: u64,
) -> f64 {
    let Some(coefficients) = coefficients else {
        return 0.0;
    };
    let entity_term: f64 = Product::ALL
        .iter()
        .filter(|p| p.drives_clicks() && products.enabled(**p))
        .map(|p| {
            entity_count as f64
                * conversion_rate(*p, coefficients)
                * improvement_rate(*p, coefficients)
                * base_rate(*p, coefficients)
        })
        .sum();
    let search_term = if products.search {
        page_views as f64 * SEARCH_CLICK_RATE * coefficients.search_conversion_rate
            * SEARCH_IMPROVEMENT_RATE
    } else {
        0.0
    };
    entity_term + search_term
}

pub fn conversion_value(conversions_driven: f64, avg_transaction_value: f64) -> f64 {
    ceil2(conversions_driven * avg_transaction_value)
}

pub fn total_value(operational: f64, marketing: f64, conversion: f64) -> f64 {
    ceil2(operational + marketing + conversion)
}

/// ROI as a whole-number multiple of vendor cost. Zero cost is defined as
/// zero return rather than a division error.
pub fn roi(total_value: f64, vendor_cost: f64) -> f64 {
    if vendor_cost == 0.0 {
        0.0
    } else {
        ((total_value - vendor_cost) / vendor_cost).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndustryCatalog;

    fn retail() -> IndustryCoefficients {
        IndustryCatalog::builtin().get("Retail").cloned().unwrap()
    }

    fn all_click_products() -> ProductSet {
        ProductSet {
            listings: true,
            reviews: true,
            pages: true,
            ..ProductSet::default()
        }
    }

    #[test]
    fn ceil2_rounds_up_to_cents() {
        assert_eq!(ceil2(1.001), 1.01);
        assert_eq!(ceil2(1.0), 1.0);
        assert_eq!(ceil2(0.0), 0.0);
    }

    #[test]
    fn multiplier_weights_listings_pages_search() {
        let mut products = ProductSet::default();
        assert_eq!(multiplier(&products), 0);
        products.listings = true;
        assert_eq!(multiplier(&products), 3);
        products.pages = true;
        assert_eq!(multiplier(&products), 4);
        products.search = true;
        assert_eq!(multiplier(&products), 7);
        // reviews and support search carry no action weight
        products.reviews = true;
        products.support_search = true;
        assert_eq!(multiplier(&products), 7);
    }

    #[test]
    fn unset_industry_contributes_zero_everywhere() {
        let products = all_click_products();
        assert_eq!(manual_actions_saved(None, 7, 100), 0.0);
        assert_eq!(clicks_driven(None, &products, 100), 0.0);
        assert_eq!(marketing_value(None, 500.0), 0.0);
        assert_eq!(conversions_driven(None, &products, 100, 1000), 0.0);
    }

    #[test]
    fn manual_actions_follow_the_lookup_coefficient() {
        let coefficients = retail();
        assert_eq!(
            manual_actions_saved(Some(&coefficients), 3, 10),
            ceil2(93.2 * 3.0 * 10.0)
        );
    }

    #[test]
    fn clicks_sum_only_enabled_products() {
        let coefficients = retail();
        let mut products = ProductSet::default();
        products.listings = true;
        let listings_only = clicks_driven(Some(&coefficients), &products, 10);
        assert_eq!(
            listings_only,
            coefficients.listings_actions_base * coefficients.listings_improvement_rate * 10.0
        );
        products.reviews = true;
        let with_reviews = clicks_driven(Some(&coefficients), &products, 10);
        assert!(with_reviews > listings_only);
    }

    #[test]
    fn search_term_needs_the_search_toggle() {
        let coefficients = retail();
        let mut products = ProductSet::default();
        assert_eq!(conversions_driven(Some(&coefficients), &products, 0, 1000), 0.0);
        products.search = true;
        assert_eq!(
            conversions_driven(Some(&coefficients), &products, 0, 1000),
            1000.0 * SEARCH_CLICK_RATE * coefficients.search_conversion_rate
                * SEARCH_IMPROVEMENT_RATE
        );
    }

    #[test]
    fn roi_is_zero_when_cost_is_zero() {
        assert_eq!(roi(10_000.0, 0.0), 0.0);
    }

    #[test]
    fn roi_rounds_to_the_nearest_multiple() {
        assert_eq!(roi(10_000.0, 3_000.0), 2.0);
        assert_eq!(roi(3_000.0, 3_000.0), 0.0);
        assert_eq!(roi(100.0, 1_000.0), -1.0);
    }
}
