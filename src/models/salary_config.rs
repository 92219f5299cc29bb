//! Calculator configuration models.
//!
//! This module contains [`SalaryConfig`], the optional settings every salary
//! calculator accepts, and [`DooConfig`], which adds the company-level
//! settings of the d.o.o. calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Optional settings for a salary calculation.
///
/// Every field is optional; missing values fall back to the national
/// defaults. When a municipality is given, its rates are used and the
/// explicit `tax_rate_low`/`tax_rate_high` fields are ignored.
///
/// # Example
///
/// ```
/// use brutoneto::models::SalaryConfig;
/// use rust_decimal_macros::dec;
///
/// let config = SalaryConfig::default()
///     .with_municipality("zagreb")
///     .with_personal_allowance_coefficient(dec!(1.5));
/// assert_eq!(config.municipality.as_deref(), Some("zagreb"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryConfig {
    /// Municipality key whose rates should be applied (e.g., "zagreb").
    #[serde(default)]
    pub municipality: Option<String>,
    /// Explicit low bracket tax rate, used only without a municipality.
    #[serde(default)]
    pub tax_rate_low: Option<Decimal>,
    /// Explicit high bracket tax rate, used only without a municipality.
    #[serde(default)]
    pub tax_rate_high: Option<Decimal>,
    /// Personal allowance coefficient (defaults to 1).
    #[serde(default)]
    pub personal_allowance_coefficient: Option<Decimal>,
    /// Voluntary third pillar pension contribution (defaults to 0).
    #[serde(default)]
    pub third_pillar_contribution: Option<Decimal>,
}

impl SalaryConfig {
    /// Sets the municipality key.
    pub fn with_municipality(mut self, key: impl Into<String>) -> Self {
        self.municipality = Some(key.into());
        self
    }

    /// Sets explicit low and high tax rates.
    pub fn with_tax_rates(mut self, low: Decimal, high: Decimal) -> Self {
        self.tax_rate_low = Some(low);
        self.tax_rate_high = Some(high);
        self
    }

    /// Sets the personal allowance coefficient.
    pub fn with_personal_allowance_coefficient(mut self, coefficient: Decimal) -> Self {
        self.personal_allowance_coefficient = Some(coefficient);
        self
    }

    /// Sets the voluntary third pillar contribution.
    pub fn with_third_pillar_contribution(mut self, contribution: Decimal) -> Self {
        self.third_pillar_contribution = Some(contribution);
        self
    }
}

/// Settings for the d.o.o. (LLC) owner compensation calculator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DooConfig {
    /// Director's gross salary; defaults to the director minimum gross.
    #[serde(default)]
    pub director_gross: Option<Decimal>,
    /// Salary settings applied to the director's salary.
    #[serde(flatten)]
    pub salary: SalaryConfig,
    /// Share of profit after corporate tax paid out as dividend, 0 to 100 (defaults to 100).
    #[serde(default)]
    pub dividend_percentage: Option<Decimal>,
    /// Share of income tax expected back from the annual return, 0 to 100 (defaults to 50).
    #[serde(default)]
    pub tax_return_percentage: Option<Decimal>,
}

impl DooConfig {
    /// Sets the director's gross salary.
    pub fn with_director_gross(mut self, gross: Decimal) -> Self {
        self.director_gross = Some(gross);
        self
    }

    /// Sets the salary settings.
    pub fn with_salary(mut self, salary: SalaryConfig) -> Self {
        self.salary = salary;
        self
    }

    /// Sets the dividend payout percentage.
    pub fn with_dividend_percentage(mut self, percentage: Decimal) -> Self {
        self.dividend_percentage = Some(percentage);
        self
    }

    /// Sets the expected tax return percentage.
    pub fn with_tax_return_percentage(mut self, percentage: Decimal) -> Self {
        self.tax_return_percentage = Some(percentage);
        self
    }
}
