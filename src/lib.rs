// Export modules for library usage
pub mod cli;
pub mod coerce;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod errors;
pub mod io;

// Re-export commonly used types
pub use crate::coerce::{coerce_amount, coerce_count, Coerced};
pub use crate::config::{
    get_catalog, parse_and_validate_catalog, IndustryCatalog, IndustryCoefficients,
};
pub use crate::core::{
    DerivedState, EstimateReport, FieldValidity, InputState, Product, ProductSet, Snapshot,
    COST_SAVED_PER_ACTION,
};
pub use crate::engine::{Engine, InputEvent, Metric, MetricGraph};
pub use crate::errors::{EstimateError, Result};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
