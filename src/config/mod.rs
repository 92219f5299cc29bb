//! Constants and the municipality rate table.
//!
//! Tax regime constants live in [`constants`]. Municipality income tax rates
//! come from a generated YAML table, either the one compiled into the crate
//! ([`builtin_table`]) or a file loaded with [`TableLoader`].
//!
//! # Example
//!
//! ```
//! use brutoneto::config::builtin_table;
//!
//! let table = builtin_table()?;
//! let zagreb = table.get("zagreb")?;
//! println!("{}: {} / {}", zagreb.name, zagreb.tax_rate_low, zagreb.tax_rate_high);
//! # Ok::<(), brutoneto::error::EngineError>(())
//! ```

pub mod constants;
mod loader;
mod types;

pub use loader::{TableLoader, builtin_table};
pub use types::{
    Municipality, MunicipalityOption, TableMetadata, TaxRateTable, TaxRateTableFile, TaxRates,
};
