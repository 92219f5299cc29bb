//! Tax regime constants.
//!
//! Contribution rates, bracket parameters and d.o.o. rates for the current
//! Croatian tax year. Changing any of these changes every calculator output
//! deterministically.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// The process-wide contribution and income tax rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSet {
    /// Pension contribution, first pillar (1. mirovinski stup).
    pub pension_pillar_1: Decimal,
    /// Pension contribution, second pillar (2. mirovinski stup).
    pub pension_pillar_2: Decimal,
    /// Employer health insurance contribution (zdravstveno osiguranje).
    pub health_insurance: Decimal,
    /// Default low bracket income tax rate (niža porezna stopa).
    pub tax_low: Decimal,
    /// Default high bracket income tax rate (viša porezna stopa).
    pub tax_high: Decimal,
}

impl RateSet {
    /// Combined mandatory pension contribution rate of both pillars.
    pub fn pension_total(&self) -> Decimal {
        self.pension_pillar_1 + self.pension_pillar_2
    }
}

/// Rates in force for the current tax year.
pub const RATE: RateSet = RateSet {
    pension_pillar_1: dec!(0.15),
    pension_pillar_2: dec!(0.05),
    health_insurance: dec!(0.165),
    tax_low: dec!(0.20),
    tax_high: dec!(0.30),
};

/// Monthly taxable income above which the high tax rate applies.
pub const HIGH_TAX_BRACKET_THRESHOLD: Decimal = dec!(5000);

/// Basic monthly personal allowance (osnovni osobni odbitak).
pub const BASIC_PERSONAL_ALLOWANCE: Decimal = dec!(600);

/// Personal allowance coefficient used when none is configured.
pub const PERSONAL_ALLOWANCE_COEFFICIENT: Decimal = dec!(1);

/// Lowest accepted personal allowance coefficient.
pub const MIN_PERSONAL_ALLOWANCE_COEFFICIENT: Decimal = dec!(0.3);

/// Highest accepted personal allowance coefficient.
pub const MAX_PERSONAL_ALLOWANCE_COEFFICIENT: Decimal = dec!(6);

/// Monthly voluntary third pillar contribution that is not taxed.
pub const THIRD_PILLAR_NON_TAXABLE_LIMIT: Decimal = dec!(67);

/// Corporate profit tax rate for small companies.
pub const CORPORATE_TAX_RATE: Decimal = dec!(0.10);

/// Tax rate on paid-out dividends.
pub const DIVIDEND_TAX_RATE: Decimal = dec!(0.12);

/// Minimum gross salary of a d.o.o. director (direktorski minimalac).
pub const DIRECTOR_MINIMUM_GROSS: Decimal = dec!(1295.45);

/// Largest accepted gross or net salary.
pub const MAX_SALARY: Decimal = dec!(1000000);

/// Largest accepted total cost to employer (gross two).
pub const MAX_GROSS_TWO: Decimal = dec!(1165000);

/// Largest accepted monthly company revenue.
pub const MAX_REVENUE: Decimal = dec!(100000000);

/// Currency every amount is expressed in.
pub const CURRENCY: &str = "EUR";
