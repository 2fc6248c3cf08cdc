use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::error::{AppError, Result};

/// Monetary amount in minor currency units (cents)
pub type Cents = i64;

/// The only settlement currency the business operates in
pub const CURRENCY: &str = "usd";

/// Converts a decimal dollar amount to integer cents, rounding half away
/// from zero. Fails when the amount does not fit in an i64.
pub fn dollars_to_cents(amount: Decimal) -> Result<Cents> {
    to_cents(amount * Decimal::ONE_HUNDRED)
}

/// Converts integer cents back to a decimal dollar amount (scale 2)
pub fn cents_to_dollars(cents: Cents) -> Decimal {
    Decimal::new(cents, 2)
}

/// Rounds a decimal cent amount to a whole number of cents, half away
/// from zero
pub fn round_cents(amount: Decimal) -> Result<Cents> {
    to_cents(amount)
}

/// Smallest whole number of cents at or above `amount`
pub fn ceil_cents(amount: Decimal) -> Result<Cents> {
    amount
        .ceil()
        .to_i64()
        .ok_or_else(|| AppError::invalid_amount(format!("amount {} overflows cents", amount)))
}

fn to_cents(amount: Decimal) -> Result<Cents> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| AppError::invalid_amount(format!("amount {} overflows cents", amount)))
}

/// Formats cents for display, e.g. 10383 -> "$103.83"
pub fn format_usd(cents: Cents) -> String {
    if cents < 0 {
        format!("-${}", cents_to_dollars(-cents))
    } else {
        format!("${}", cents_to_dollars(cents))
    }
}
