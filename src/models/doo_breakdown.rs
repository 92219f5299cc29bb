//! D.O.O. (limited liability company) breakdown models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SalaryBreakdown;

/// Company profit and corporate tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateBreakdown {
    /// Revenue minus the director's total cost to employer, never negative.
    pub profit: Decimal,
    /// Corporate tax rate applied.
    pub corporate_tax_rate: Decimal,
    /// Corporate profit tax.
    pub corporate_tax: Decimal,
    /// Profit after corporate tax.
    pub profit_after_tax: Decimal,
    /// Part of the profit after tax kept in the company.
    pub retained_earnings: Decimal,
}

/// Dividend paid out to the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendBreakdown {
    /// Dividend before dividend tax.
    pub gross_dividend: Decimal,
    /// Dividend tax rate applied.
    pub dividend_tax_rate: Decimal,
    /// Dividend tax.
    pub dividend_tax: Decimal,
    /// Dividend after tax.
    pub net_dividend: Decimal,
}

/// What the owner takes home per month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DooTotals {
    /// Director's net salary.
    pub net_salary: Decimal,
    /// Net dividend.
    pub net_dividend: Decimal,
    /// Net salary plus net dividend.
    pub monthly_net: Decimal,
    /// Estimated income tax refunded by the annual tax return.
    pub tax_return: Decimal,
    /// Monthly net including the estimated tax return.
    pub monthly_net_with_tax_return: Decimal,
}

/// The effective parameters of a d.o.o. calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DooVariables {
    /// Municipality whose rates were applied, if any.
    pub municipality: Option<String>,
    /// Effective low bracket tax rate.
    pub tax_rate_low: Decimal,
    /// Effective high bracket tax rate.
    pub tax_rate_high: Decimal,
    /// Effective personal allowance coefficient.
    pub personal_allowance_coefficient: Decimal,
    /// Corporate tax rate.
    pub corporate_tax_rate: Decimal,
    /// Dividend tax rate.
    pub dividend_tax_rate: Decimal,
    /// Share of profit after tax paid out as dividend.
    pub dividend_percentage: Decimal,
    /// Share of income tax expected back from the annual return.
    pub tax_return_percentage: Decimal,
    /// The director minimum gross constant.
    pub director_minimum_gross: Decimal,
    /// Whether the director is paid exactly the minimum gross.
    pub is_director_minimum: bool,
}

/// Full owner compensation breakdown of a d.o.o.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DooBreakdown {
    /// Monthly company revenue.
    pub total_revenue: Decimal,
    /// Director's gross salary.
    pub director_gross: Decimal,
    /// Director's salary breakdown.
    pub salary: SalaryBreakdown,
    /// Profit and corporate tax.
    pub corporate: CorporateBreakdown,
    /// Dividend and dividend tax.
    pub dividend: DividendBreakdown,
    /// Take-home totals.
    pub totals: DooTotals,
    /// Effective parameters.
    pub variables: DooVariables,
}

/// The short form of a d.o.o. calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DooSummary {
    /// Director's net salary.
    pub net_salary: Decimal,
    /// Net dividend.
    pub net_dividend: Decimal,
    /// Net salary plus net dividend.
    pub total: Decimal,
}

impl From<&DooBreakdown> for DooSummary {
    fn from(breakdown: &DooBreakdown) -> Self {
        Self {
            net_salary: breakdown.totals.net_salary,
            net_dividend: breakdown.totals.net_dividend,
            total: breakdown.totals.monthly_net,
        }
    }
}
