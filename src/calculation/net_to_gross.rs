//! Net to gross calculation.
//!
//! Within each of its three regions the forward function is linear in the
//! gross salary:
//!
//! | Region       | Condition                       | Net                                 |
//! |--------------|---------------------------------|-------------------------------------|
//! | no tax       | income <= allowance             | `0.8 * gross`                       |
//! | low bracket  | taxable income <= threshold     | `0.8 * (1 - low) * gross + a * low` |
//! | high bracket | taxable income > threshold      | `0.8 * (1 - high) * gross + a * high - t * (low - high)` |
//!
//! where `a` is the personal allowance and `t` the bracket threshold. The
//! region is picked by comparing the target net with the net at each region
//! edge, and the linear equation is solved for an estimate.
//!
//! The estimate can miss by a cent or more, because the forward function
//! rounds each tax bracket to cents before summing them. The estimate is
//! therefore corrected against the forward function itself: first as is,
//! then probing a few cents around it, and finally with a bisection over the
//! whole gross range.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, trace};

use crate::config::TaxRateTable;
use crate::config::constants::{
    BASIC_PERSONAL_ALLOWANCE, HIGH_TAX_BRACKET_THRESHOLD, MAX_SALARY, RATE,
};
use crate::decimal::{CENT, round_cents, validate_amount};
use crate::error::EngineResult;
use crate::models::SalaryConfig;

use super::gross_to_net::net_for_gross;
use super::settings::{ResolvedSalaryConfig, resolve_salary_config};

/// Number of cents probed on each side of the estimate.
const PROBE_CENTS: u32 = 5;

/// Iteration ceiling of the bisection fallback.
const MAX_BISECTION_STEPS: u32 = 60;

/// The bisection stops once its interval is narrower than half a cent.
const BISECTION_TOLERANCE: Decimal = dec!(0.005);

/// Linear region of the forward function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    NoTax,
    LowBracket,
    HighBracket,
}

/// Calculates the gross salary that yields a given net salary (neto u bruto).
///
/// The returned gross reproduces `net` exactly when passed back through
/// [`gross_to_net`](fn@crate::calculation::gross_to_net) with the same configuration. Where
/// several gross amounts produce the same net, the one returned lies within a
/// few cents of the closed-form estimate. A net that no gross can produce
/// exactly maps to the gross whose net is closest to it.
///
/// A third pillar contribution in `config` is added on top of the taxable
/// gross, so the result is the gross before the contribution is taken off.
/// A net of zero therefore maps to the contribution itself.
///
/// # Errors
///
/// - `InvalidAmount` if `net` is negative or above 1,000,000
/// - `UnknownMunicipality` if the configured municipality is not in `table`
/// - `OutOfRange` for an out-of-bounds coefficient, third pillar or tax rate
///
/// # Examples
///
/// ```
/// use brutoneto::calculation::{gross_to_net, net_to_gross};
/// use brutoneto::config::builtin_table;
/// use brutoneto::models::SalaryConfig;
/// use rust_decimal_macros::dec;
///
/// let table = builtin_table()?;
/// let config = SalaryConfig::default();
///
/// let gross = net_to_gross(dec!(2680), &config, table)?;
/// assert_eq!(gross, dec!(4000));
/// assert_eq!(gross_to_net(gross, &config, table)?, dec!(2680));
/// # Ok::<(), brutoneto::error::EngineError>(())
/// ```
pub fn net_to_gross(
    net: Decimal,
    config: &SalaryConfig,
    table: &TaxRateTable,
) -> EngineResult<Decimal> {
    let net = validate_amount(net, "net", MAX_SALARY)?;
    let resolved = resolve_salary_config(config, table)?;

    if net.is_zero() {
        return Ok(resolved.third_pillar_contribution);
    }

    let (region, estimate) = estimate_gross(net, &resolved);
    let estimate = round_cents(estimate + resolved.third_pillar_contribution)
        .clamp(resolved.third_pillar_contribution, MAX_SALARY);
    trace!(net = %net, ?region, estimate = %estimate, "Closed-form gross estimate");

    Ok(correct_estimate(net, estimate, &resolved))
}

/// Solves the linear equation of the region `net` falls into.
fn estimate_gross(net: Decimal, resolved: &ResolvedSalaryConfig) -> (Region, Decimal) {
    let income_share = Decimal::ONE - RATE.pension_total();
    let allowance = BASIC_PERSONAL_ALLOWANCE * resolved.personal_allowance_coefficient;
    let low = resolved.rates.tax_rate_low;
    let high = resolved.rates.tax_rate_high;
    let threshold = HIGH_TAX_BRACKET_THRESHOLD;

    let net_at_no_tax_edge = allowance;
    let net_at_bracket_edge = threshold * (Decimal::ONE - low) + allowance;

    let (region, slope, intercept) = if net <= net_at_no_tax_edge {
        (Region::NoTax, income_share, Decimal::ZERO)
    } else if net <= net_at_bracket_edge {
        (
            Region::LowBracket,
            income_share * (Decimal::ONE - low),
            allowance * low,
        )
    } else {
        (
            Region::HighBracket,
            income_share * (Decimal::ONE - high),
            allowance * high - threshold * (low - high),
        )
    };

    (region, (net - intercept) / slope)
}

/// Moves `estimate` to a gross whose net matches `target`.
fn correct_estimate(target: Decimal, estimate: Decimal, resolved: &ResolvedSalaryConfig) -> Decimal {
    let floor = resolved.third_pillar_contribution;
    let reproduces = |gross: Decimal| net_for_gross(gross, resolved) == target;

    if reproduces(estimate) {
        return estimate;
    }

    for step in 1..=PROBE_CENTS {
        let offset = CENT * Decimal::from(step);
        let below = estimate - offset;
        if below >= floor && reproduces(below) {
            return below;
        }
        let above = estimate + offset;
        if above <= MAX_SALARY && reproduces(above) {
            return above;
        }
    }

    debug!(
        target = %target,
        estimate = %estimate,
        "Estimate off by more than {} cents, falling back to bisection",
        PROBE_CENTS
    );
    bisect(target, floor, resolved)
}

/// Bisects the gross range for the net `target`.
///
/// Relies on the forward function being non-decreasing at cent resolution.
/// The result is the converged gross or one of its cent neighbours, whichever
/// has the closest net, preferring the smaller gross on a tie.
fn bisect(target: Decimal, floor: Decimal, resolved: &ResolvedSalaryConfig) -> Decimal {
    let mut lo = floor;
    let mut hi = MAX_SALARY;

    for _ in 0..MAX_BISECTION_STEPS {
        if hi - lo < BISECTION_TOLERANCE {
            break;
        }
        let mid = (lo + hi) / dec!(2);
        if net_for_gross(mid, resolved) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let center = round_cents(hi);
    [center - CENT, center, center + CENT]
        .into_iter()
        .filter(|gross| *gross >= floor && *gross <= MAX_SALARY)
        .min_by_key(|gross| ((net_for_gross(*gross, resolved) - target).abs(), *gross))
        .unwrap_or(center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::gross_to_net;
    use crate::config::builtin_table;
    use crate::error::EngineError;

    fn table() -> &'static TaxRateTable {
        builtin_table().unwrap()
    }

    fn resolved(config: &SalaryConfig) -> ResolvedSalaryConfig {
        resolve_salary_config(config, table()).unwrap()
    }

    #[test]
    fn test_net_to_gross_default_rates() {
        let gross = net_to_gross(dec!(2680), &SalaryConfig::default(), table()).unwrap();
        assert_eq!(gross, dec!(4000));
    }

    #[test]
    fn test_net_to_gross_with_municipality() {
        let config = SalaryConfig::default().with_municipality("sveta-nedelja-samobor");
        let gross = net_to_gross(dec!(2732), &config, table()).unwrap();
        assert_eq!(gross, dec!(4000));
    }

    #[test]
    fn test_net_to_gross_zero() {
        let gross = net_to_gross(Decimal::ZERO, &SalaryConfig::default(), table()).unwrap();
        assert_eq!(gross, Decimal::ZERO);
    }

    #[test]
    fn test_net_to_gross_negative_is_rejected() {
        match net_to_gross(dec!(-1), &SalaryConfig::default(), table()) {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "net"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_net_to_gross_validates_config_before_zero_shortcut() {
        let config = SalaryConfig::default().with_municipality("atlantis");
        let result = net_to_gross(Decimal::ZERO, &config, table());
        assert!(matches!(result, Err(EngineError::UnknownMunicipality { .. })));
    }

    #[test]
    fn test_net_to_gross_no_tax_zone() {
        let gross = net_to_gross(dec!(400), &SalaryConfig::default(), table()).unwrap();
        assert_eq!(gross, dec!(500));
    }

    #[test]
    fn test_net_to_gross_high_bracket() {
        let gross = net_to_gross(dec!(6280), &SalaryConfig::default(), table()).unwrap();
        assert_eq!(gross, dec!(10000));
    }

    #[test]
    fn test_net_to_gross_director_minimum() {
        let gross = net_to_gross(dec!(949.09), &SalaryConfig::default(), table()).unwrap();
        assert_eq!(gross, dec!(1295.45));
    }

    #[test]
    fn test_net_to_gross_with_third_pillar() {
        let config = SalaryConfig::default().with_third_pillar_contribution(dec!(50));
        let gross = net_to_gross(dec!(2648), &config, table()).unwrap();
        assert_eq!(gross, dec!(4000));
    }

    #[test]
    fn test_zero_net_with_third_pillar_maps_to_contribution() {
        let config = SalaryConfig::default().with_third_pillar_contribution(dec!(50));
        assert_eq!(gross_to_net(dec!(50), &config, table()).unwrap(), Decimal::ZERO);

        let gross = net_to_gross(Decimal::ZERO, &config, table()).unwrap();
        assert_eq!(gross, dec!(50));
        assert_eq!(gross_to_net(gross, &config, table()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_net_to_gross_with_coefficient() {
        let config = SalaryConfig::default().with_personal_allowance_coefficient(dec!(2));
        let gross = net_to_gross(dec!(2800), &config, table()).unwrap();
        assert_eq!(gross, dec!(4000));
    }

    #[test]
    fn test_roundtrip_around_bracket_edge() {
        // taxable income reaches the threshold at a gross of 7000
        let config = SalaryConfig::default().with_municipality("zagreb");
        let mut gross = dec!(6990);
        while gross <= dec!(7010) {
            let net = gross_to_net(gross, &config, table()).unwrap();
            let recovered = net_to_gross(net, &config, table()).unwrap();
            assert_eq!(
                gross_to_net(recovered, &config, table()).unwrap(),
                net,
                "gross {}",
                gross
            );
            gross += dec!(0.37);
        }
    }

    #[test]
    fn test_estimate_regions() {
        let config = resolved(&SalaryConfig::default());
        assert_eq!(estimate_gross(dec!(400), &config).0, Region::NoTax);
        assert_eq!(estimate_gross(dec!(600), &config).0, Region::NoTax);
        assert_eq!(estimate_gross(dec!(2680), &config).0, Region::LowBracket);
        assert_eq!(estimate_gross(dec!(4600), &config).0, Region::LowBracket);
        assert_eq!(estimate_gross(dec!(4600.01), &config).0, Region::HighBracket);
    }

    #[test]
    fn test_estimate_is_continuous_at_bracket_edge() {
        let config = resolved(&SalaryConfig::default());
        let (_, low_side) = estimate_gross(dec!(4600), &config);
        assert_eq!(low_side, dec!(7000));

        let slope = dec!(0.8) * (Decimal::ONE - dec!(0.30));
        let high_side = (dec!(4600) - (dec!(600) * dec!(0.30) - dec!(5000) * dec!(-0.10))) / slope;
        assert_eq!(round_cents(high_side), dec!(7000));
    }

    #[test]
    fn test_bisection_finds_exact_gross() {
        let config = resolved(&SalaryConfig::default());
        let gross = bisect(dec!(2680), Decimal::ZERO, &config);
        assert_eq!(net_for_gross(gross, &config), dec!(2680));
    }

    #[test]
    fn test_correction_recovers_from_bad_estimate() {
        let config = resolved(&SalaryConfig::default());
        let gross = correct_estimate(dec!(2680), dec!(3000), &config);
        assert_eq!(net_for_gross(gross, &config), dec!(2680));
    }

    #[test]
    fn test_correction_probes_nearby_cents() {
        let config = resolved(&SalaryConfig::default());
        let gross = correct_estimate(dec!(2680), dec!(4000.03), &config);
        assert_eq!(net_for_gross(gross, &config), dec!(2680));
        assert!((gross - dec!(4000)).abs() <= dec!(0.02));
    }
}
