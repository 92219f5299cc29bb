//! Core data models for the salary calculation engine.
//!
//! This module contains the calculator configurations and the breakdown
//! snapshots the calculators return.

mod doo_breakdown;
mod salary_breakdown;
mod salary_config;

pub use doo_breakdown::{
    CorporateBreakdown, DividendBreakdown, DooBreakdown, DooSummary, DooTotals, DooVariables,
};
pub use salary_breakdown::{
    GrossTwoBreakdown, NetShares, PensionBreakdown, SalaryBreakdown, SalaryVariables,
    TaxBreakdown,
};
pub use salary_config::{DooConfig, SalaryConfig};
