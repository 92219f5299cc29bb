//! D.O.O. owner compensation calculation.
//!
//! The owner of a d.o.o. is paid a director salary and takes the remaining
//! profit out as a dividend. The salary is a regular gross to net calculation
//! whose total cost to employer is an expense of the company; corporate tax
//! is due on what is left, and dividend tax on the part paid out.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::config::TaxRateTable;
use crate::config::constants::{
    CORPORATE_TAX_RATE, DIRECTOR_MINIMUM_GROSS, DIVIDEND_TAX_RATE, MAX_REVENUE, MAX_SALARY,
};
use crate::decimal::{percent, round_cents, validate_amount};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CorporateBreakdown, DividendBreakdown, DooBreakdown, DooConfig, DooSummary, DooTotals,
    DooVariables,
};

use super::gross_to_net::gross_to_net_breakdown;

/// Share of the profit after tax paid out when none is configured.
pub const DEFAULT_DIVIDEND_PERCENTAGE: Decimal = dec!(100);

/// Share of the income tax expected back when none is configured.
pub const DEFAULT_TAX_RETURN_PERCENTAGE: Decimal = dec!(50);

/// Calculates the full owner compensation breakdown for a monthly revenue.
///
/// # Calculation
///
/// 1. The director salary breakdown is computed for the configured director
///    gross, or the director minimum gross.
/// 2. `profit = max(0, revenue - total cost to employer)`
/// 3. `corporate tax = profit * 10%`, the rest is the profit after tax
/// 4. The dividend percentage of the profit after tax is paid out, taxed at
///    12%; the remainder is retained
/// 5. The monthly net is the net salary plus the net dividend; the tax
///    return estimate is the tax return percentage of the salary income tax
///
/// Every derived amount is rounded to cents.
///
/// # Errors
///
/// - `InvalidAmount` if the revenue or the director gross is out of range
/// - `OutOfRange` if a percentage is outside `[0, 100]`
/// - any configuration error of the salary calculation
///
/// # Examples
///
/// ```
/// use brutoneto::calculation::calculate_doo;
/// use brutoneto::config::builtin_table;
/// use brutoneto::models::DooConfig;
/// use rust_decimal_macros::dec;
///
/// let doo = calculate_doo(dec!(5000), &DooConfig::default(), builtin_table()?)?;
/// assert!(doo.variables.is_director_minimum);
/// assert_eq!(doo.corporate.profit, dec!(3490.80));
/// assert_eq!(doo.totals.monthly_net, dec!(3713.80));
/// # Ok::<(), brutoneto::error::EngineError>(())
/// ```
pub fn calculate_doo(
    total_revenue: Decimal,
    config: &DooConfig,
    table: &TaxRateTable,
) -> EngineResult<DooBreakdown> {
    let total_revenue = validate_amount(total_revenue, "total_revenue", MAX_REVENUE)?;
    let director_gross = validate_amount(
        config.director_gross.unwrap_or(DIRECTOR_MINIMUM_GROSS),
        "director_gross",
        MAX_SALARY,
    )?;
    let dividend_percentage = validate_percentage(
        "dividend_percentage",
        config
            .dividend_percentage
            .unwrap_or(DEFAULT_DIVIDEND_PERCENTAGE),
    )?;
    let tax_return_percentage = validate_percentage(
        "tax_return_percentage",
        config
            .tax_return_percentage
            .unwrap_or(DEFAULT_TAX_RETURN_PERCENTAGE),
    )?;

    let salary = gross_to_net_breakdown(director_gross, &config.salary, table)?;

    let profit = round_cents((total_revenue - salary.total_cost_to_employer).max(Decimal::ZERO));
    let corporate_tax = round_cents(profit * CORPORATE_TAX_RATE);
    let profit_after_tax = profit - corporate_tax;

    let gross_dividend = round_cents(profit_after_tax * percent(dividend_percentage));
    let retained_earnings = profit_after_tax - gross_dividend;
    let dividend_tax = round_cents(gross_dividend * DIVIDEND_TAX_RATE);
    let net_dividend = gross_dividend - dividend_tax;

    let monthly_net = salary.net + net_dividend;
    let tax_return = round_cents(salary.taxes.total * percent(tax_return_percentage));

    debug!(
        total_revenue = %total_revenue,
        director_gross = %director_gross,
        profit = %profit,
        monthly_net = %monthly_net,
        "Computed d.o.o. breakdown"
    );

    Ok(DooBreakdown {
        total_revenue,
        director_gross,
        corporate: CorporateBreakdown {
            profit,
            corporate_tax_rate: CORPORATE_TAX_RATE,
            corporate_tax,
            profit_after_tax,
            retained_earnings,
        },
        dividend: DividendBreakdown {
            gross_dividend,
            dividend_tax_rate: DIVIDEND_TAX_RATE,
            dividend_tax,
            net_dividend,
        },
        totals: DooTotals {
            net_salary: salary.net,
            net_dividend,
            monthly_net,
            tax_return,
            monthly_net_with_tax_return: monthly_net + tax_return,
        },
        variables: DooVariables {
            municipality: salary.variables.municipality.clone(),
            tax_rate_low: salary.variables.tax_rate_low,
            tax_rate_high: salary.variables.tax_rate_high,
            personal_allowance_coefficient: salary.variables.personal_allowance_coefficient,
            corporate_tax_rate: CORPORATE_TAX_RATE,
            dividend_tax_rate: DIVIDEND_TAX_RATE,
            dividend_percentage,
            tax_return_percentage,
            director_minimum_gross: DIRECTOR_MINIMUM_GROSS,
            is_director_minimum: director_gross == DIRECTOR_MINIMUM_GROSS,
        },
        salary,
    })
}

/// Calculates only the take-home totals of a d.o.o.
///
/// # Errors
///
/// Same as [`calculate_doo`].
pub fn calculate_doo_simple(
    total_revenue: Decimal,
    config: &DooConfig,
    table: &TaxRateTable,
) -> EngineResult<DooSummary> {
    calculate_doo(total_revenue, config, table).map(|breakdown| DooSummary::from(&breakdown))
}

fn validate_percentage(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(EngineError::OutOfRange {
            field: field.to_string(),
            message: format!("must be between 0 and 100, got {}", value),
        });
    }
    Ok(value)
}
