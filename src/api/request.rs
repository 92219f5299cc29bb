//! Request types for the salary API.
//!
//! Amounts arrive as path segments and are parsed with
//! [`parse_amount`](crate::decimal::parse_amount); everything else comes from
//! the query string and is deserialized into the structs below.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DooConfig, SalaryConfig};

/// Query parameters of the gross to net endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryQuery {
    /// Municipality key.
    #[serde(default)]
    pub place: Option<String>,
    /// Low bracket tax rate as a fraction (e.g., `0.2`).
    #[serde(default)]
    pub ltax: Option<Decimal>,
    /// High bracket tax rate as a fraction.
    #[serde(default)]
    pub htax: Option<Decimal>,
    /// Personal allowance coefficient.
    #[serde(default)]
    pub coeff: Option<Decimal>,
    /// Monthly third pillar contribution.
    #[serde(default)]
    pub third_pillar: Option<Decimal>,
    /// Return the full breakdown instead of the short result.
    #[serde(default)]
    pub detailed: bool,
    /// The amount is yearly and is divided by 12.
    #[serde(default)]
    pub yearly: bool,
}

impl SalaryQuery {
    /// Builds the calculator configuration from the query.
    pub fn salary_config(&self) -> SalaryConfig {
        SalaryConfig {
            municipality: self.place.clone(),
            tax_rate_low: self.ltax,
            tax_rate_high: self.htax,
            personal_allowance_coefficient: self.coeff,
            third_pillar_contribution: self.third_pillar,
        }
    }
}

/// Query parameters of the net to gross endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InverseQuery {
    /// Municipality key.
    #[serde(default)]
    pub place: Option<String>,
    /// Low bracket tax rate as a fraction.
    #[serde(default)]
    pub ltax: Option<Decimal>,
    /// High bracket tax rate as a fraction.
    #[serde(default)]
    pub htax: Option<Decimal>,
    /// Personal allowance coefficient.
    #[serde(default)]
    pub coeff: Option<Decimal>,
    /// Monthly third pillar contribution.
    #[serde(default)]
    pub third_pillar: Option<Decimal>,
}

impl InverseQuery {
    /// Builds the calculator configuration from the query.
    pub fn salary_config(&self) -> SalaryConfig {
        SalaryConfig {
            municipality: self.place.clone(),
            tax_rate_low: self.ltax,
            tax_rate_high: self.htax,
            personal_allowance_coefficient: self.coeff,
            third_pillar_contribution: self.third_pillar,
        }
    }
}

/// Query parameters of the d.o.o. endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DooQuery {
    /// Director gross salary, the director minimum if absent.
    #[serde(default)]
    pub salary_gross: Option<Decimal>,
    /// Municipality key.
    #[serde(default)]
    pub place: Option<String>,
    /// Low bracket tax rate as a fraction.
    #[serde(default)]
    pub ltax: Option<Decimal>,
    /// High bracket tax rate as a fraction.
    #[serde(default)]
    pub htax: Option<Decimal>,
    /// Personal allowance coefficient.
    #[serde(default)]
    pub coeff: Option<Decimal>,
    /// Monthly third pillar contribution.
    #[serde(default)]
    pub third_pillar: Option<Decimal>,
    /// Percentage of the profit after tax paid out as dividend.
    #[serde(default)]
    pub dividend_pct: Option<Decimal>,
    /// Percentage of the salary income tax expected back.
    #[serde(default)]
    pub tax_return_pct: Option<Decimal>,
    /// Return the full breakdown instead of the summary.
    #[serde(default)]
    pub detailed: bool,
    /// The revenue is yearly and is divided by 12.
    #[serde(default)]
    pub yearly: bool,
}

impl DooQuery {
    /// Builds the d.o.o. calculator configuration from the query.
    pub fn doo_config(&self) -> DooConfig {
        DooConfig {
            director_gross: self.salary_gross,
            salary: SalaryConfig {
                municipality: self.place.clone(),
                tax_rate_low: self.ltax,
                tax_rate_high: self.htax,
                personal_allowance_coefficient: self.coeff,
                third_pillar_contribution: self.third_pillar,
            },
            dividend_percentage: self.dividend_pct,
            tax_return_percentage: self.tax_return_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_salary_query_defaults() {
        let query: SalaryQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.detailed);
        assert!(!query.yearly);
        assert_eq!(query.salary_config(), SalaryConfig::default());
    }

    #[test]
    fn test_salary_query_to_config() {
        let query = SalaryQuery {
            place: Some("zagreb".to_string()),
            coeff: Some(dec!(1.5)),
            third_pillar: Some(dec!(50)),
            ..SalaryQuery::default()
        };
        let config = query.salary_config();
        assert_eq!(config.municipality.as_deref(), Some("zagreb"));
        assert_eq!(config.personal_allowance_coefficient, Some(dec!(1.5)));
        assert_eq!(config.third_pillar_contribution, Some(dec!(50)));
        assert!(config.tax_rate_low.is_none());
    }

    #[test]
    fn test_doo_query_to_config() {
        let query = DooQuery {
            salary_gross: Some(dec!(2000)),
            ltax: Some(dec!(0.18)),
            htax: Some(dec!(0.28)),
            dividend_pct: Some(dec!(50)),
            ..DooQuery::default()
        };
        let config = query.doo_config();
        assert_eq!(config.director_gross, Some(dec!(2000)));
        assert_eq!(config.salary.tax_rate_low, Some(dec!(0.18)));
        assert_eq!(config.salary.tax_rate_high, Some(dec!(0.28)));
        assert_eq!(config.dividend_percentage, Some(dec!(50)));
        assert!(config.tax_return_percentage.is_none());
    }
}
