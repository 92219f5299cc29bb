//! Resolution of a [`SalaryConfig`] into effective calculation parameters.
//!
//! Resolution validates every supplied setting and picks the tax rates:
//! municipality rates if a municipality is given, otherwise explicit rates,
//! otherwise the national defaults.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::constants::{
    MAX_PERSONAL_ALLOWANCE_COEFFICIENT, MIN_PERSONAL_ALLOWANCE_COEFFICIENT,
    PERSONAL_ALLOWANCE_COEFFICIENT, THIRD_PILLAR_NON_TAXABLE_LIMIT,
};
use crate::config::{TaxRateTable, TaxRates};
use crate::decimal::round_cents;
use crate::error::{EngineError, EngineResult};
use crate::models::SalaryConfig;

/// Validated parameters of a salary calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedSalaryConfig {
    pub municipality: Option<String>,
    pub rates: TaxRates,
    pub personal_allowance_coefficient: Decimal,
    pub third_pillar_contribution: Decimal,
}

impl ResolvedSalaryConfig {
    /// The same parameters without a third pillar contribution.
    pub fn without_third_pillar(&self) -> Self {
        Self {
            third_pillar_contribution: Decimal::ZERO,
            ..self.clone()
        }
    }
}

/// Validates `config` and resolves its effective rates against `table`.
pub(crate) fn resolve_salary_config(
    config: &SalaryConfig,
    table: &TaxRateTable,
) -> EngineResult<ResolvedSalaryConfig> {
    let personal_allowance_coefficient = config
        .personal_allowance_coefficient
        .unwrap_or(PERSONAL_ALLOWANCE_COEFFICIENT);
    if personal_allowance_coefficient < MIN_PERSONAL_ALLOWANCE_COEFFICIENT
        || personal_allowance_coefficient > MAX_PERSONAL_ALLOWANCE_COEFFICIENT
    {
        return Err(EngineError::OutOfRange {
            field: "personal_allowance_coefficient".to_string(),
            message: format!(
                "must be between {} and {}, got {}",
                MIN_PERSONAL_ALLOWANCE_COEFFICIENT,
                MAX_PERSONAL_ALLOWANCE_COEFFICIENT,
                personal_allowance_coefficient
            ),
        });
    }

    let third_pillar_contribution =
        round_cents(config.third_pillar_contribution.unwrap_or(Decimal::ZERO));
    if third_pillar_contribution < Decimal::ZERO
        || third_pillar_contribution > THIRD_PILLAR_NON_TAXABLE_LIMIT
    {
        return Err(EngineError::OutOfRange {
            field: "third_pillar_contribution".to_string(),
            message: format!(
                "must be between 0 and {}, got {}",
                THIRD_PILLAR_NON_TAXABLE_LIMIT, third_pillar_contribution
            ),
        });
    }

    let rates = match config.municipality.as_deref() {
        Some(key) => {
            let rates = table.lookup(key)?;
            if config.tax_rate_low.is_some() || config.tax_rate_high.is_some() {
                warn!(
                    municipality = key,
                    "Explicit tax rates ignored in favour of municipality rates"
                );
            }
            rates
        }
        None => {
            let defaults = table.default_rates();
            TaxRates {
                tax_rate_low: validate_tax_rate(
                    "tax_rate_low",
                    config.tax_rate_low.unwrap_or(defaults.tax_rate_low),
                )?,
                tax_rate_high: validate_tax_rate(
                    "tax_rate_high",
                    config.tax_rate_high.unwrap_or(defaults.tax_rate_high),
                )?,
            }
        }
    };

    Ok(ResolvedSalaryConfig {
        municipality: config.municipality.clone(),
        rates,
        personal_allowance_coefficient,
        third_pillar_contribution,
    })
}

/// Rejects a third pillar contribution larger than the gross it is paid from.
pub(crate) fn ensure_third_pillar_within_gross(
    gross: Decimal,
    resolved: &ResolvedSalaryConfig,
) -> EngineResult<()> {
    if resolved.third_pillar_contribution > gross {
        return Err(EngineError::OutOfRange {
            field: "third_pillar_contribution".to_string(),
            message: format!(
                "cannot exceed the gross salary of {}, got {}",
                gross, resolved.third_pillar_contribution
            ),
        });
    }
    Ok(())
}

fn validate_tax_rate(field: &str, rate: Decimal) -> EngineResult<Decimal> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(EngineError::OutOfRange {
            field: field.to_string(),
            message: format!("must be at least 0 and below 1, got {}", rate),
        });
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builtin_table;
    use rust_decimal_macros::dec;

    fn resolve(config: &SalaryConfig) -> EngineResult<ResolvedSalaryConfig> {
        resolve_salary_config(config, builtin_table().unwrap())
    }

    #[test]
    fn test_defaults() {
        let resolved = resolve(&SalaryConfig::default()).unwrap();
        assert_eq!(resolved.municipality, None);
        assert_eq!(resolved.rates.tax_rate_low, dec!(0.20));
        assert_eq!(resolved.rates.tax_rate_high, dec!(0.30));
        assert_eq!(resolved.personal_allowance_coefficient, dec!(1));
        assert_eq!(resolved.third_pillar_contribution, Decimal::ZERO);
    }

    #[test]
    fn test_explicit_rates_override_defaults() {
        let config = SalaryConfig::default().with_tax_rates(dec!(0.236), dec!(0.354));
        let resolved = resolve(&config).unwrap();
        assert_eq!(resolved.rates.tax_rate_low, dec!(0.236));
        assert_eq!(resolved.rates.tax_rate_high, dec!(0.354));
    }

    #[test]
    fn test_single_explicit_rate_keeps_other_default() {
        let config = SalaryConfig {
            tax_rate_high: Some(dec!(0.35)),
            ..SalaryConfig::default()
        };
        let resolved = resolve(&config).unwrap();
        assert_eq!(resolved.rates.tax_rate_low, dec!(0.20));
        assert_eq!(resolved.rates.tax_rate_high, dec!(0.35));
    }

    #[test]
    fn test_municipality_rates_win_over_explicit_rates() {
        let config = SalaryConfig::default()
            .with_municipality("sveta-nedelja-samobor")
            .with_tax_rates(dec!(0.10), dec!(0.15));
        let resolved = resolve(&config).unwrap();
        assert_eq!(resolved.rates.tax_rate_low, dec!(0.18));
        assert_eq!(resolved.rates.tax_rate_high, dec!(0.28));
        assert_eq!(resolved.municipality.as_deref(), Some("sveta-nedelja-samobor"));
    }

    #[test]
    fn test_unknown_municipality_is_rejected() {
        let config = SalaryConfig::default().with_municipality("atlantis");
        match resolve(&config).unwrap_err() {
            EngineError::UnknownMunicipality { key } => assert_eq!(key, "atlantis"),
            other => panic!("Expected UnknownMunicipality, got {:?}", other),
        }
    }

    #[test]
    fn test_coefficient_bounds() {
        for coefficient in [dec!(0.3), dec!(6)] {
            let config = SalaryConfig::default().with_personal_allowance_coefficient(coefficient);
            assert!(resolve(&config).is_ok());
        }
        for coefficient in [dec!(0.29), dec!(6.01), dec!(-1)] {
            let config = SalaryConfig::default().with_personal_allowance_coefficient(coefficient);
            match resolve(&config).unwrap_err() {
                EngineError::OutOfRange { field, .. } => {
                    assert_eq!(field, "personal_allowance_coefficient")
                }
                other => panic!("Expected OutOfRange, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_third_pillar_bounds() {
        let config = SalaryConfig::default().with_third_pillar_contribution(dec!(67));
        assert_eq!(resolve(&config).unwrap().third_pillar_contribution, dec!(67));

        // rounded to cents before the range check
        let config = SalaryConfig::default().with_third_pillar_contribution(dec!(67.004));
        assert_eq!(resolve(&config).unwrap().third_pillar_contribution, dec!(67));

        for contribution in [dec!(67.01), dec!(-0.01)] {
            let config = SalaryConfig::default().with_third_pillar_contribution(contribution);
            assert!(resolve(&config).is_err());
        }
    }

    #[test]
    fn test_explicit_rate_must_be_below_one() {
        let config = SalaryConfig::default().with_tax_rates(dec!(0.2), dec!(1));
        match resolve(&config).unwrap_err() {
            EngineError::OutOfRange { field, .. } => assert_eq!(field, "tax_rate_high"),
            other => panic!("Expected OutOfRange, got {:?}", other),
        }

        let config = SalaryConfig::default().with_tax_rates(dec!(-0.1), dec!(0.3));
        assert!(resolve(&config).is_err());
    }

    #[test]
    fn test_third_pillar_cannot_exceed_gross() {
        let config = SalaryConfig::default().with_third_pillar_contribution(dec!(50));
        let resolved = resolve(&config).unwrap();
        assert!(ensure_third_pillar_within_gross(dec!(50), &resolved).is_ok());
        assert!(ensure_third_pillar_within_gross(dec!(49.99), &resolved).is_err());
    }

    #[test]
    fn test_without_third_pillar() {
        let config = SalaryConfig::default()
            .with_municipality("zagreb")
            .with_third_pillar_contribution(dec!(50));
        let resolved = resolve(&config).unwrap().without_third_pillar();
        assert_eq!(resolved.third_pillar_contribution, Decimal::ZERO);
        assert_eq!(resolved.municipality.as_deref(), Some("zagreb"));
    }
}
