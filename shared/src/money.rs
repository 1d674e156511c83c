//! Fixed-point money helpers
//!
//! Amounts are `decimal(6,2)`: at most four integer digits and two fractional
//! digits. They are persisted as integer cents so that SQLite never sees a
//! floating point value.

use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::*;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};

/// Fractional digits of every amount
pub const MONEY_SCALE: u32 = 2;

/// Largest representable amount (9999.99)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(999_999, 0, 0, false, MONEY_SCALE);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: Decimal },
    #[error("{field} allows at most 2 decimal places, got {value}")]
    TooPrecise { field: &'static str, value: Decimal },
    #[error("{field} exceeds maximum allowed (9999.99), got {value}")]
    TooLarge { field: &'static str, value: Decimal },
}

impl From<MoneyError> for AppError {
    fn from(err: MoneyError) -> Self {
        let field = match &err {
            MoneyError::Negative { field, .. }
            | MoneyError::TooPrecise { field, .. }
            | MoneyError::TooLarge { field, .. } => *field,
        };
        AppError::with_message(ErrorCode::ValidationFailed, err.to_string())
            .with_detail("field", field)
    }
}

/// Check an amount against `decimal(6,2)` and normalize it to scale 2
pub fn validate_amount(value: Decimal, field: &'static str) -> Result<Decimal, MoneyError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(MoneyError::Negative { field, value });
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(MoneyError::TooPrecise { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(MoneyError::TooLarge { field, value });
    }
    let mut amount = value.normalize();
    amount.rescale(MONEY_SCALE);
    Ok(amount)
}

/// `unit_price * quantity`, exact
pub fn line_total(unit_price: Decimal, quantity: i64) -> Result<Decimal, MoneyError> {
    let total = unit_price * Decimal::from(quantity);
    validate_amount(total, "price")
}

/// Amount to integer cents (amount must already be validated)
pub fn to_cents(amount: Decimal) -> i64 {
    let mut scaled = amount;
    scaled.rescale(MONEY_SCALE);
    scaled.mantissa() as i64
}

/// Bound on stored cents derived from a `to_price` style upper limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentsCeiling {
    /// Negative limit: no amount qualifies
    Nothing,
    /// Amounts up to and including these cents
    AtMost(i64),
    /// Limit at or above [`MAX_AMOUNT`]: every amount qualifies
    Unbounded,
}

/// Largest cent amount not above `max`
///
/// Accepts any `Decimal`, including values far outside `decimal(6,2)`.
pub fn cents_ceiling(max: Decimal) -> CentsCeiling {
    if max.is_sign_negative() && !max.is_zero() {
        return CentsCeiling::Nothing;
    }
    if max >= MAX_AMOUNT {
        return CentsCeiling::Unbounded;
    }
    let floored = max.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToNegativeInfinity);
    CentsCeiling::AtMost(to_cents(floored))
}

/// Integer cents back to an amount with scale 2
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, MONEY_SCALE)
}
