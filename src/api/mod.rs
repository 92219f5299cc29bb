//! HTTP API module for the salary engine.
//!
//! This module exposes the calculators as JSON `GET` endpoints. Amounts are
//! path segments, settings are query parameters.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DooQuery, InverseQuery, SalaryQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
