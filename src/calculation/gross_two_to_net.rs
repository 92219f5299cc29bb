//! Total cost to employer (bruto 2) to net calculation.

use rust_decimal::Decimal;

use crate::config::TaxRateTable;
use crate::config::constants::MAX_GROSS_TWO;
use crate::decimal::validate_amount;
use crate::error::EngineResult;
use crate::models::{GrossTwoBreakdown, SalaryConfig};

use super::gross_to_net::{gross_to_net, gross_to_net_breakdown};
use super::salary::total_to_gross;

/// Calculates the net salary for a total cost to employer.
///
/// The gross is recovered with [`total_to_gross`] and the result is the net
/// of that gross under `config`.
///
/// # Errors
///
/// - `InvalidAmount` if `gross_two` is negative or above 1,165,000
/// - any error [`gross_to_net`] returns for the recovered gross
///
/// # Examples
///
/// ```
/// use brutoneto::calculation::gross_two_to_net;
/// use brutoneto::config::builtin_table;
/// use brutoneto::models::SalaryConfig;
/// use rust_decimal_macros::dec;
///
/// let net = gross_two_to_net(dec!(4660), &SalaryConfig::default(), builtin_table()?)?;
/// assert_eq!(net, dec!(2680));
/// # Ok::<(), brutoneto::error::EngineError>(())
/// ```
pub fn gross_two_to_net(
    gross_two: Decimal,
    config: &SalaryConfig,
    table: &TaxRateTable,
) -> EngineResult<Decimal> {
    let gross_two = validate_amount(gross_two, "gross_two", MAX_GROSS_TWO)?;
    gross_to_net(total_to_gross(gross_two), config, table)
}

/// Calculates a full breakdown for a total cost to employer.
///
/// # Errors
///
/// Same as [`gross_two_to_net`].
pub fn gross_two_to_net_breakdown(
    gross_two: Decimal,
    config: &SalaryConfig,
    table: &TaxRateTable,
) -> EngineResult<GrossTwoBreakdown> {
    let gross_two = validate_amount(gross_two, "gross_two", MAX_GROSS_TWO)?;
    let breakdown = gross_to_net_breakdown(total_to_gross(gross_two), config, table)?;
    Ok(GrossTwoBreakdown {
        breakdown,
        gross_two,
    })
}
