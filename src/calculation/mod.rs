//! Calculation logic for the salary engine.
//!
//! This module contains the salary primitives (pension, allowance, income
//! tax, employer health insurance), the gross to net and total cost to net
//! calculators, the net to gross inversion, and the d.o.o. owner
//! compensation calculator.

mod doo;
mod gross_to_net;
mod gross_two_to_net;
mod net_to_gross;
mod salary;
mod settings;

pub use doo::{
    DEFAULT_DIVIDEND_PERCENTAGE, DEFAULT_TAX_RETURN_PERCENTAGE, calculate_doo,
    calculate_doo_simple,
};
pub use gross_to_net::{gross_to_net, gross_to_net_breakdown};
pub use gross_two_to_net::{gross_two_to_net, gross_two_to_net_breakdown};
pub use net_to_gross::net_to_gross;
pub use salary::{
    EmployerCost, IncomeTax, PensionContribution, final_net, gross_to_total,
    health_insurance_contribution, income_after_deductions, income_tax, pension_contribution,
    personal_allowance, taxable_income, total_to_gross,
};
