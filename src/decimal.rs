//! Decimal arithmetic helpers for monetary values.
//!
//! Every money-valued step in the engine is computed with [`Decimal`] rather
//! than binary floating point. Rounding is always half-up (away from zero on
//! a tie) and happens only where a value is reported as a final amount;
//! intermediate sub-totals keep their full precision.
//!
//! This module is also the single entry point for untrusted amounts. Strings
//! and floats are converted and range-checked here before any calculator
//! sees them.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::{EngineError, EngineResult};

/// The rounding strategy used for every reported amount.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Number of fractional digits of the minor currency unit (cent).
pub const CENT_PLACES: u32 = 2;

/// One cent.
pub const CENT: Decimal = dec!(0.01);

/// Rounds a value to cents using half-up rounding.
///
/// # Examples
///
/// ```
/// use brutoneto::decimal::round_cents;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_cents(dec!(1.005)), dec!(1.01));
/// assert_eq!(round_cents(dec!(1.004)), dec!(1.00));
/// assert_eq!(round_cents(dec!(213.74925)), dec!(213.75));
/// ```
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_PLACES, ROUNDING)
}

/// Converts a percentage to a fractional rate (`20` becomes `0.20`).
pub fn percent(value: Decimal) -> Decimal {
    value / Decimal::ONE_HUNDRED
}

/// Divides two amounts and rounds the share to two decimals.
///
/// A zero denominator yields a zero share instead of failing, so ratio
/// fields of a zero-gross breakdown stay well defined.
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator
        .checked_div(denominator)
        .map(round_cents)
        .unwrap_or(Decimal::ZERO)
}

/// Checks that an amount lies in `[0, max]` and rounds it to cents.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] if the amount is negative or above `max`.
pub fn validate_amount(value: Decimal, field: &str, max: Decimal) -> EngineResult<Decimal> {
    if value < Decimal::ZERO || value > max {
        return Err(invalid_amount(field, value.to_string(), max));
    }
    Ok(round_cents(value))
}

/// Parses an amount from user input and validates it like [`validate_amount`].
///
/// Surrounding whitespace is ignored. Anything that is not a plain decimal
/// number, such as `NaN`, `inf` or an empty string, is rejected.
///
/// # Examples
///
/// ```
/// use brutoneto::decimal::parse_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_amount(" 4000.5 ", "gross", dec!(1000000)).unwrap(), dec!(4000.50));
/// assert!(parse_amount("NaN", "gross", dec!(1000000)).is_err());
/// assert!(parse_amount("-1", "gross", dec!(1000000)).is_err());
/// ```
pub fn parse_amount(input: &str, field: &str, max: Decimal) -> EngineResult<Decimal> {
    let value = Decimal::from_str(input.trim())
        .map_err(|_| invalid_amount(field, input.to_string(), max))?;
    validate_amount(value, field, max)
}

/// Converts a float amount and validates it like [`validate_amount`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] for NaN, infinities, negative values
/// and values above `max`.
pub fn amount_from_f64(value: f64, field: &str, max: Decimal) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(invalid_amount(field, value.to_string(), max));
    }
    let decimal =
        Decimal::from_f64(value).ok_or_else(|| invalid_amount(field, value.to_string(), max))?;
    validate_amount(decimal, field, max)
}

fn invalid_amount(field: &str, value: String, max: Decimal) -> EngineError {
    EngineError::InvalidAmount {
        field: field.to_string(),
        value,
        max,
    }
}
