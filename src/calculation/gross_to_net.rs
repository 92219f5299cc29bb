//! Gross to net calculation.
//!
//! This module chains the salary primitives into the forward pipeline:
//! pension, income, personal allowance, taxable income, income tax, net.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxRateTable;
use crate::config::constants::{BASIC_PERSONAL_ALLOWANCE, MAX_SALARY};
use crate::decimal::{ratio, round_cents, validate_amount};
use crate::error::EngineResult;
use crate::models::{
    NetShares, PensionBreakdown, SalaryBreakdown, SalaryConfig, SalaryVariables, TaxBreakdown,
};

use super::salary::{
    final_net, gross_to_total, income_after_deductions, income_tax, pension_contribution,
    personal_allowance, taxable_income,
};
use super::settings::{
    ResolvedSalaryConfig, ensure_third_pillar_within_gross, resolve_salary_config,
};

/// Calculates the net salary for a gross salary (bruto u neto).
///
/// The gross is validated and rounded to cents, the configuration is
/// resolved against `table`, and any third pillar contribution is taken off
/// the gross before pension and tax are computed.
///
/// # Errors
///
/// - `InvalidAmount` if `gross` is negative or above 1,000,000
/// - `UnknownMunicipality` if the configured municipality is not in `table`
/// - `OutOfRange` for an out-of-bounds coefficient, third pillar or tax rate
///
/// # Examples
///
/// ```
/// use brutoneto::calculation::gross_to_net;
/// use brutoneto::config::builtin_table;
/// use brutoneto::models::SalaryConfig;
/// use rust_decimal_macros::dec;
///
/// let table = builtin_table()?;
/// assert_eq!(gross_to_net(dec!(4000), &SalaryConfig::default(), table)?, dec!(2680));
///
/// let config = SalaryConfig::default().with_municipality("sveta-nedelja-samobor");
/// assert_eq!(gross_to_net(dec!(4000), &config, table)?, dec!(2732));
/// # Ok::<(), brutoneto::error::EngineError>(())
/// ```
pub fn gross_to_net(
    gross: Decimal,
    config: &SalaryConfig,
    table: &TaxRateTable,
) -> EngineResult<Decimal> {
    let gross = validate_amount(gross, "gross", MAX_SALARY)?;
    let resolved = resolve_salary_config(config, table)?;
    ensure_third_pillar_within_gross(gross, &resolved)?;
    Ok(net_for_gross(gross, &resolved))
}

/// Calculates a full itemized breakdown for a gross salary.
///
/// Runs the same pipeline as [`gross_to_net`], keeping every intermediate
/// amount. When a third pillar contribution lowers the taxable gross, the
/// breakdown also reports the net the original gross would have produced
/// without it.
///
/// # Errors
///
/// Same as [`gross_to_net`].
pub fn gross_to_net_breakdown(
    gross: Decimal,
    config: &SalaryConfig,
    table: &TaxRateTable,
) -> EngineResult<SalaryBreakdown> {
    let gross = validate_amount(gross, "gross", MAX_SALARY)?;
    let resolved = resolve_salary_config(config, table)?;
    ensure_third_pillar_within_gross(gross, &resolved)?;
    Ok(breakdown_for_gross(gross, &resolved))
}

/// The forward pipeline over already validated parameters.
///
/// Returns the net rounded to cents. The inverse calculator evaluates this
/// directly while searching, so it performs no validation.
pub(crate) fn net_for_gross(gross: Decimal, resolved: &ResolvedSalaryConfig) -> Decimal {
    let real_gross = gross - resolved.third_pillar_contribution;
    let pension = pension_contribution(real_gross);
    let income = income_after_deductions(real_gross, pension.total);
    let allowance = personal_allowance(income, resolved.personal_allowance_coefficient);
    let taxable = taxable_income(income, allowance);
    let tax = income_tax(taxable, resolved.rates);
    round_cents(final_net(income, tax.total))
}

fn breakdown_for_gross(gross: Decimal, resolved: &ResolvedSalaryConfig) -> SalaryBreakdown {
    let third_pillar = resolved.third_pillar_contribution;
    let real_gross = gross - third_pillar;
    let third_pillar_applied = !third_pillar.is_zero();

    let pension = pension_contribution(real_gross);
    let income = income_after_deductions(real_gross, pension.total);
    let allowance = personal_allowance(income, resolved.personal_allowance_coefficient);
    let taxable = taxable_income(income, allowance);
    let tax = income_tax(taxable, resolved.rates);
    let net = round_cents(final_net(income, tax.total));
    let employer_cost = gross_to_total(real_gross);

    let would_be_net = third_pillar_applied
        .then(|| net_for_gross(gross, &resolved.without_third_pillar()));

    debug!(
        gross = %gross,
        real_gross = %real_gross,
        net = %net,
        tax = %tax.total,
        "Computed salary breakdown"
    );

    SalaryBreakdown {
        net,
        net_with_half_tax_returned: round_cents(net + tax.total / Decimal::TWO),
        gross: round_cents(real_gross),
        original_gross: third_pillar_applied.then_some(gross),
        total_cost_to_employer: employer_cost.total,
        pension: PensionBreakdown {
            first_pillar: round_cents(pension.first_pillar),
            second_pillar: round_cents(pension.second_pillar),
            third_pillar: round_cents(third_pillar),
            mandatory_total: round_cents(pension.total),
            total: round_cents(pension.total + third_pillar),
        },
        taxes: TaxBreakdown {
            lower_bracket: tax.lower_bracket,
            higher_bracket: tax.higher_bracket,
            total: tax.total,
            total_half: round_cents(tax.total / Decimal::TWO),
        },
        health_insurance: employer_cost.health_insurance,
        income: round_cents(income),
        personal_allowance: round_cents(allowance),
        taxable_income: round_cents(taxable),
        variables: SalaryVariables {
            municipality: resolved.municipality.clone(),
            tax_rate_low: resolved.rates.tax_rate_low,
            tax_rate_high: resolved.rates.tax_rate_high,
            personal_allowance_coefficient: resolved.personal_allowance_coefficient,
            basic_personal_allowance: BASIC_PERSONAL_ALLOWANCE,
        },
        calculations: NetShares {
            net_share_of_total: ratio(net, employer_cost.total),
            net_share_of_gross: ratio(net, real_gross),
            net_share_of_initial_gross: third_pillar_applied.then(|| ratio(net, gross)),
            would_be_net_from_initial_gross: would_be_net,
            would_be_net_share_of_initial_gross: would_be_net.map(|n| ratio(n, gross)),
            net_difference: would_be_net.map(|n| round_cents((net - n).abs())),
        },
    }
}
