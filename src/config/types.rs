//! Municipality rate table types.
//!
//! This module contains the strongly-typed structures that are deserialized
//! from the generated municipality YAML table, and the read-only
//! [`TaxRateTable`] built from them.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::constants::RATE;

/// Low and high income tax rates of one municipality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    /// Rate applied to taxable income up to the bracket threshold.
    pub tax_rate_low: Decimal,
    /// Rate applied to taxable income above the bracket threshold.
    pub tax_rate_high: Decimal,
}

/// A municipality entry of the rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    /// Display name with diacritics (e.g., "Sveta Nedelja (Samobor)").
    pub name: String,
    /// Low bracket income tax rate.
    pub tax_rate_low: Decimal,
    /// High bracket income tax rate.
    pub tax_rate_high: Decimal,
}

impl Municipality {
    /// Returns the municipality's tax rates.
    pub fn rates(&self) -> TaxRates {
        TaxRates {
            tax_rate_low: self.tax_rate_low,
            tax_rate_high: self.tax_rate_high,
        }
    }
}

/// Provenance of the generated rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Number of municipalities in the table.
    pub total_places: usize,
    /// Date the upstream source was last changed.
    pub last_updated: NaiveDate,
    /// Where the rates were scraped from.
    pub source_url: String,
    /// When the table file was generated.
    pub generated_at: DateTime<Utc>,
}

/// A key and display name pair, for building selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalityOption {
    /// Stable kebab-case key.
    pub key: String,
    /// Display name.
    pub name: String,
}

/// Rate table file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxRateTableFile {
    /// Table provenance.
    pub metadata: TableMetadata,
    /// Map of municipality key to municipality details.
    pub places: BTreeMap<String, Municipality>,
}

/// The municipality rate table.
///
/// Populated once when loaded and read-only afterwards, so a single table
/// can be shared by any number of concurrent calculations.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxRateTable {
    metadata: TableMetadata,
    places: BTreeMap<String, Municipality>,
}

impl TaxRateTable {
    /// Creates a table from its component parts.
    pub fn new(metadata: TableMetadata, places: BTreeMap<String, Municipality>) -> Self {
        Self { metadata, places }
    }

    /// Returns the table provenance.
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Returns the number of municipalities.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Returns true if the table has no municipalities.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Returns true if `key` names a municipality in the table.
    pub fn is_valid(&self, key: &str) -> bool {
        self.places.contains_key(key)
    }

    /// Gets a municipality by its key.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownMunicipality`] if the key is not in the table.
    pub fn get(&self, key: &str) -> EngineResult<&Municipality> {
        self.places
            .get(key)
            .ok_or_else(|| EngineError::UnknownMunicipality {
                key: key.to_string(),
            })
    }

    /// Looks up the tax rates of a municipality.
    ///
    /// # Example
    ///
    /// ```
    /// use brutoneto::config::builtin_table;
    /// use rust_decimal_macros::dec;
    ///
    /// let table = builtin_table()?;
    /// let rates = table.lookup("sveta-nedelja-samobor")?;
    /// assert_eq!(rates.tax_rate_low, dec!(0.18));
    /// assert!(table.lookup("atlantis").is_err());
    /// # Ok::<(), brutoneto::error::EngineError>(())
    /// ```
    pub fn lookup(&self, key: &str) -> EngineResult<TaxRates> {
        self.get(key).map(Municipality::rates)
    }

    /// Iterates over all municipalities in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Municipality)> {
        self.places.iter().map(|(key, place)| (key.as_str(), place))
    }

    /// Returns all municipality keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        self.places.keys().map(String::as_str).collect()
    }

    /// Returns key and name pairs sorted by display name.
    pub fn options(&self) -> Vec<MunicipalityOption> {
        let mut options: Vec<MunicipalityOption> = self
            .iter()
            .map(|(key, place)| MunicipalityOption {
                key: key.to_string(),
                name: place.name.clone(),
            })
            .collect();
        options.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.key.cmp(&b.key)));
        options
    }

    /// Returns the rates used when no municipality is configured.
    pub fn default_rates(&self) -> TaxRates {
        TaxRates {
            tax_rate_low: RATE.tax_low,
            tax_rate_high: RATE.tax_high,
        }
    }
}
