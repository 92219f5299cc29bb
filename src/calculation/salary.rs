//! Salary primitives.
//!
//! Pure building blocks of the gross to net pipeline. None of them validate
//! their input; the calculators do that before calling in. Amounts are only
//! rounded where noted, so callers can chain them without accumulating
//! rounding error.

use rust_decimal::Decimal;

use crate::config::TaxRates;
use crate::config::constants::{BASIC_PERSONAL_ALLOWANCE, HIGH_TAX_BRACKET_THRESHOLD, RATE};
use crate::decimal::round_cents;

/// Mandatory pension contributions per pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PensionContribution {
    /// First pillar contribution.
    pub first_pillar: Decimal,
    /// Second pillar contribution.
    pub second_pillar: Decimal,
    /// Sum of both pillars.
    pub total: Decimal,
}

/// Income tax per bracket, each bracket rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeTax {
    /// Tax on the part of taxable income up to the threshold.
    pub lower_bracket: Decimal,
    /// Tax on the part of taxable income above the threshold.
    pub higher_bracket: Decimal,
    /// Sum of both brackets.
    pub total: Decimal,
}

/// Employer health insurance on top of the gross salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployerCost {
    /// Health insurance contribution, rounded to cents.
    pub health_insurance: Decimal,
    /// Gross plus health insurance (bruto 2), rounded to cents.
    pub total: Decimal,
}

/// Computes the mandatory pension contributions of a gross salary.
///
/// # Examples
///
/// ```
/// use brutoneto::calculation::pension_contribution;
/// use rust_decimal_macros::dec;
///
/// let pension = pension_contribution(dec!(4000));
/// assert_eq!(pension.first_pillar, dec!(600));
/// assert_eq!(pension.second_pillar, dec!(200));
/// assert_eq!(pension.total, dec!(800));
/// ```
pub fn pension_contribution(gross: Decimal) -> PensionContribution {
    let first_pillar = gross * RATE.pension_pillar_1;
    let second_pillar = gross * RATE.pension_pillar_2;
    PensionContribution {
        first_pillar,
        second_pillar,
        total: first_pillar + second_pillar,
    }
}

/// Income left after the pension contribution is withheld.
pub fn income_after_deductions(gross: Decimal, pension_total: Decimal) -> Decimal {
    gross - pension_total
}

/// The tax-exempt part of the income (osobni odbitak).
///
/// The allowance is the basic personal allowance scaled by `coefficient`,
/// but never more than the income itself.
pub fn personal_allowance(income: Decimal, coefficient: Decimal) -> Decimal {
    income.min(BASIC_PERSONAL_ALLOWANCE * coefficient)
}

/// Income minus the personal allowance (porezna osnovica).
pub fn taxable_income(income: Decimal, allowance: Decimal) -> Decimal {
    income - allowance
}

/// Computes income tax over the two brackets.
///
/// Each bracket is rounded to cents on its own before the two are summed.
/// This makes the tax, and therefore the net, a step function at cent
/// resolution that is not strictly monotonic around the threshold.
///
/// # Examples
///
/// ```
/// use brutoneto::calculation::income_tax;
/// use brutoneto::config::TaxRates;
/// use rust_decimal_macros::dec;
///
/// let rates = TaxRates { tax_rate_low: dec!(0.20), tax_rate_high: dec!(0.30) };
/// let tax = income_tax(dec!(7400), rates);
/// assert_eq!(tax.lower_bracket, dec!(1000));
/// assert_eq!(tax.higher_bracket, dec!(720));
/// assert_eq!(tax.total, dec!(1720));
/// ```
pub fn income_tax(taxable_income: Decimal, rates: TaxRates) -> IncomeTax {
    let lower_amount = taxable_income.min(HIGH_TAX_BRACKET_THRESHOLD);
    let lower_bracket = round_cents(lower_amount * rates.tax_rate_low);

    let higher_amount = (taxable_income - HIGH_TAX_BRACKET_THRESHOLD).max(Decimal::ZERO);
    let higher_bracket = round_cents(higher_amount * rates.tax_rate_high);

    IncomeTax {
        lower_bracket,
        higher_bracket,
        total: round_cents(lower_bracket + higher_bracket),
    }
}

/// Income minus income tax, unrounded.
pub fn final_net(income: Decimal, taxes: Decimal) -> Decimal {
    income - taxes
}

/// Employer health insurance contribution, rounded to cents.
pub fn health_insurance_contribution(gross: Decimal) -> Decimal {
    round_cents(gross * RATE.health_insurance)
}

/// Computes the total cost to employer (bruto 2) of a gross salary.
///
/// # Examples
///
/// ```
/// use brutoneto::calculation::gross_to_total;
/// use rust_decimal_macros::dec;
///
/// let cost = gross_to_total(dec!(1295.45));
/// assert_eq!(cost.health_insurance, dec!(213.75));
/// assert_eq!(cost.total, dec!(1509.20));
/// ```
pub fn gross_to_total(gross: Decimal) -> EmployerCost {
    let health_insurance = health_insurance_contribution(gross);
    EmployerCost {
        health_insurance,
        total: round_cents(gross + health_insurance),
    }
}

/// Recovers the gross salary from a total cost to employer.
///
/// Inverse of [`gross_to_total`]: health insurance is a flat share of gross,
/// so dividing by `1 + rate` and rounding to cents gives the gross back.
pub fn total_to_gross(total: Decimal) -> Decimal {
    round_cents(total / (Decimal::ONE + RATE.health_insurance))
}
