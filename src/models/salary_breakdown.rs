//! Salary breakdown models.
//!
//! A [`SalaryBreakdown`] is an immutable snapshot of every intermediate
//! amount of a gross to net calculation. All monetary fields are rounded to
//! cents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pension contributions withheld from the gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionBreakdown {
    /// First pillar contribution.
    pub first_pillar: Decimal,
    /// Second pillar contribution.
    pub second_pillar: Decimal,
    /// Voluntary third pillar contribution.
    pub third_pillar: Decimal,
    /// Sum of both mandatory pillars.
    pub mandatory_total: Decimal,
    /// Mandatory pillars plus the third pillar.
    pub total: Decimal,
}

/// Income tax per bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Tax on taxable income up to the bracket threshold.
    pub lower_bracket: Decimal,
    /// Tax on taxable income above the bracket threshold.
    pub higher_bracket: Decimal,
    /// Total income tax.
    pub total: Decimal,
    /// Half of the total income tax.
    pub total_half: Decimal,
}

/// The effective parameters a breakdown was computed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryVariables {
    /// Municipality whose rates were applied, if any.
    pub municipality: Option<String>,
    /// Effective low bracket tax rate.
    pub tax_rate_low: Decimal,
    /// Effective high bracket tax rate.
    pub tax_rate_high: Decimal,
    /// Effective personal allowance coefficient.
    pub personal_allowance_coefficient: Decimal,
    /// Basic personal allowance before the coefficient.
    pub basic_personal_allowance: Decimal,
}

/// Ratios derived from the breakdown.
///
/// The `*_initial_gross` fields are only present when a third pillar
/// contribution lowered the taxable gross; they compare against the net the
/// original gross would have produced without the contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetShares {
    /// Net as a share of the total cost to employer.
    pub net_share_of_total: Decimal,
    /// Net as a share of the taxable gross.
    pub net_share_of_gross: Decimal,
    /// Net as a share of the gross before the third pillar deduction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_share_of_initial_gross: Option<Decimal>,
    /// Net the original gross would yield without a third pillar contribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub would_be_net_from_initial_gross: Option<Decimal>,
    /// That hypothetical net as a share of the original gross.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub would_be_net_share_of_initial_gross: Option<Decimal>,
    /// Absolute difference between the actual and hypothetical net.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_difference: Option<Decimal>,
}

/// Full itemized result of a gross to net calculation.
///
/// # Example
///
/// ```
/// use brutoneto::calculation::gross_to_net_breakdown;
/// use brutoneto::config::builtin_table;
/// use brutoneto::models::SalaryConfig;
/// use rust_decimal_macros::dec;
///
/// let table = builtin_table()?;
/// let breakdown = gross_to_net_breakdown(dec!(4000), &SalaryConfig::default(), table)?;
/// assert_eq!(breakdown.net, dec!(2680));
/// assert_eq!(breakdown.total_cost_to_employer, dec!(4660));
/// assert_eq!(breakdown.taxes.total, dec!(520));
/// # Ok::<(), brutoneto::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Take-home pay.
    pub net: Decimal,
    /// Net plus half of the income tax, as after a typical annual return.
    pub net_with_half_tax_returned: Decimal,
    /// Taxable gross, after subtracting any third pillar contribution.
    pub gross: Decimal,
    /// Gross as supplied, present only when a third pillar contribution applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_gross: Option<Decimal>,
    /// Gross plus employer health insurance (bruto 2).
    pub total_cost_to_employer: Decimal,
    /// Pension contributions.
    pub pension: PensionBreakdown,
    /// Income tax.
    pub taxes: TaxBreakdown,
    /// Employer health insurance contribution.
    pub health_insurance: Decimal,
    /// Gross minus mandatory pension contributions.
    pub income: Decimal,
    /// Tax-exempt part of the income.
    pub personal_allowance: Decimal,
    /// Income minus the personal allowance.
    pub taxable_income: Decimal,
    /// Effective parameters.
    pub variables: SalaryVariables,
    /// Derived ratios.
    pub calculations: NetShares,
}

/// A salary breakdown computed from a total cost to employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossTwoBreakdown {
    /// The breakdown of the derived gross.
    #[serde(flatten)]
    pub breakdown: SalaryBreakdown,
    /// Total cost to employer as supplied.
    pub gross_two: Decimal,
}
