//! Application state for the salary API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::TaxRateTable;

/// Shared application state.
///
/// Holds the municipality rate table every calculation resolves its tax
/// rates against.
#[derive(Clone)]
pub struct AppState {
    table: Arc<TaxRateTable>,
}

impl AppState {
    /// Creates a new application state around a rate table.
    pub fn new(table: TaxRateTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Returns the municipality rate table.
    pub fn table(&self) -> &TaxRateTable {
        &self.table
    }
}
