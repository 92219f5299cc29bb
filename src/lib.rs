//! Salary and tax engine for Croatian payroll.
//!
//! This crate converts gross salary to net salary and back under Croatia's
//! two-bracket income tax, mandatory pension and health contributions, and
//! municipality-specific tax rates. It also computes the owner compensation
//! of a d.o.o. (director salary plus dividend).
//!
//! All amounts are [`rust_decimal::Decimal`] values in euros, rounded half-up
//! to cents where they are reported.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod decimal;
pub mod error;
pub mod models;
