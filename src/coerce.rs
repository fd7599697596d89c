//! Raw-text to numeric coercion for user-entered fields.
//!
//! The input surface hands the engine raw strings exactly as typed. This
//! module converts them to the non-negative numeric domain without
//! panicking; failures are reported through [`Coerced::valid`] so the engine
//! can freeze the field at its last good value instead of letting NaN flow
//! into the formulas.

use serde::{Deserialize, Serialize};

/// Outcome of coercing one raw field edit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coerced {
    pub valid: bool,
    pub value: f64,
}

impl Coerced {
    fn ok(value: f64) -> Self {
        Self { valid: true, value }
    }

    fn invalid() -> Self {
        Self {
            valid: false,
            value: 0.0,
        }
    }
}

/// Coerce raw text to a non-negative amount (currency-like fields).
pub fn coerce_amount(raw: &str) -> Coerced {
    match raw.trim().parse::<f64>() {
        // negative zero parses as valid; normalize it so snapshots never hold -0.0
        Ok(value) if value.is_finite() && value >= 0.0 => {
            Coerced::ok(if value == 0.0 { 0.0 } else { value })
        }
        _ => Coerced::invalid(),
    }
}

/// Coerce raw text to a non-negative whole count, rounding up.
pub fn coerce_count(raw: &str) -> Coerced {
    let amount = coerce_amount(raw);
    if amount.valid {
        Coerced::ok(amount.value.ceil())
    } else {
        amount
    }
}
