//! Rate table loading functionality.
//!
//! This module provides the [`TableLoader`] type for loading the generated
//! municipality rate table from YAML, and the lazily parsed built-in table.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{TaxRateTable, TaxRateTableFile};

/// Origin reported in errors about the embedded table.
const BUILTIN_ORIGIN: &str = "<builtin>/data/places.yaml";

static BUILTIN_PLACES_YAML: &str = include_str!("../../data/places.yaml");

static BUILTIN_TABLE: LazyLock<EngineResult<TaxRateTable>> =
    LazyLock::new(|| TableLoader::from_yaml_str(BUILTIN_PLACES_YAML, BUILTIN_ORIGIN));

/// Returns the rate table compiled into the crate.
///
/// The table is parsed on first use and shared for the lifetime of the
/// process.
///
/// # Example
///
/// ```
/// use brutoneto::config::builtin_table;
///
/// let table = builtin_table()?;
/// assert!(table.is_valid("zagreb"));
/// # Ok::<(), brutoneto::error::EngineError>(())
/// ```
pub fn builtin_table() -> EngineResult<&'static TaxRateTable> {
    BUILTIN_TABLE.as_ref().map_err(Clone::clone)
}

/// Loads municipality rate tables.
///
/// # File Structure
///
/// ```text
/// metadata:
///   total_places: 2
///   last_updated: "2025-03-10"
///   source_url: "https://isplate.info/porez-na-dohodak-stope.aspx"
///   generated_at: "2025-06-01T08:00:00Z"
/// places:
///   zagreb:
///     name: "Zagreb"
///     tax_rate_low: "0.23"
///     tax_rate_high: "0.33"
///   ...
/// ```
///
/// Every key must be lowercase kebab-case, every rate must lie in `[0, 1)`,
/// the low rate may not exceed the high rate, and `total_places` must match
/// the number of entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableLoader;

impl TableLoader {
    /// Loads a rate table from the specified file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file cannot be read, or
    /// `ConfigParseError` if it is not valid YAML or fails validation.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use brutoneto::config::TableLoader;
    ///
    /// let table = TableLoader::load("./data/places.yaml")?;
    /// println!("{} municipalities", table.len());
    /// # Ok::<(), brutoneto::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<TaxRateTable> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses and validates a rate table from YAML text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<TaxRateTable> {
        let file: TaxRateTableFile =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Self::validate(&file).map_err(|message| EngineError::ConfigParseError {
            path: origin.to_string(),
            message,
        })?;

        debug!(
            origin,
            total_places = file.places.len(),
            last_updated = %file.metadata.last_updated,
            "Loaded municipality rate table"
        );

        Ok(TaxRateTable::new(file.metadata, file.places))
    }

    fn validate(file: &TaxRateTableFile) -> Result<(), String> {
        if file.places.is_empty() {
            return Err("rate table contains no places".to_string());
        }

        if file.metadata.total_places != file.places.len() {
            return Err(format!(
                "metadata.total_places is {} but {} places are listed",
                file.metadata.total_places,
                file.places.len()
            ));
        }

        for (key, place) in &file.places {
            if !is_kebab_case(key) {
                return Err(format!("place key '{}' is not lowercase kebab-case", key));
            }
            for (label, rate) in [
                ("tax_rate_low", place.tax_rate_low),
                ("tax_rate_high", place.tax_rate_high),
            ] {
                if rate < Decimal::ZERO || rate >= Decimal::ONE {
                    return Err(format!(
                        "place '{}' has {} {} outside [0, 1)",
                        key, label, rate
                    ));
                }
            }
            if place.tax_rate_low > place.tax_rate_high {
                return Err(format!(
                    "place '{}' has tax_rate_low {} above tax_rate_high {}",
                    key, place.tax_rate_low, place.tax_rate_high
                ));
            }
        }

        Ok(())
    }
}

fn is_kebab_case(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('-')
        && !key.ends_with('-')
        && !key.contains("--")
        && key
            .chars()
            .all(|c| c.is_lowercase() || c.is_numeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const VALID_TABLE: &str = r#"
metadata:
  total_places: 2
  last_updated: "2025-03-10"
  source_url: "https://example.test/rates"
  generated_at: "2025-06-01T08:00:00Z"
places:
  zagreb:
    name: "Zagreb"
    tax_rate_low: "0.23"
    tax_rate_high: "0.33"
  sveta-nedelja-samobor:
    name: "Sveta Nedelja (Samobor)"
    tax_rate_low: "0.18"
    tax_rate_high: "0.28"
"#;

    #[test]
    fn test_parse_valid_table() {
        let table = TableLoader::from_yaml_str(VALID_TABLE, "test").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.metadata().total_places, 2);
        assert_eq!(
            table.get("sveta-nedelja-samobor").unwrap().name,
            "Sveta Nedelja (Samobor)"
        );
        assert_eq!(table.lookup("zagreb").unwrap().tax_rate_high, dec!(0.33));
    }

    #[test]
    fn test_builtin_table_loads() {
        let table = builtin_table().unwrap();
        assert!(!table.is_empty());
        assert_eq!(table.metadata().total_places, table.len());

        let rates = table.lookup("sveta-nedelja-samobor").unwrap();
        assert_eq!(rates.tax_rate_low, dec!(0.18));
        assert_eq!(rates.tax_rate_high, dec!(0.28));
    }

    #[test]
    fn test_builtin_table_is_shared() {
        let first = builtin_table().unwrap();
        let second = builtin_table().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_load_missing_file_returns_not_found() {
        let result = TableLoader::load("/nonexistent/places.yaml");
        match result.unwrap_err() {
            EngineError::ConfigNotFound { path } => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_data_file_matches_builtin() {
        let table = TableLoader::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/places.yaml"))
            .unwrap();
        assert_eq!(&table, builtin_table().unwrap());
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let result = TableLoader::from_yaml_str("places: [unclosed", "broken.yaml");
        match result.unwrap_err() {
            EngineError::ConfigParseError { path, .. } => assert_eq!(path, "broken.yaml"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_total_places_mismatch_is_rejected() {
        let content = VALID_TABLE.replace("total_places: 2", "total_places: 3");
        let err = TableLoader::from_yaml_str(&content, "test").unwrap_err();
        assert!(err.to_string().contains("total_places"));
    }

    #[test]
    fn test_rate_out_of_range_is_rejected() {
        let content = VALID_TABLE.replace("\"0.33\"", "\"1.5\"");
        let err = TableLoader::from_yaml_str(&content, "test").unwrap_err();
        assert!(err.to_string().contains("outside [0, 1)"));
    }

    #[test]
    fn test_low_rate_above_high_rate_is_rejected() {
        let content = VALID_TABLE.replace("\"0.18\"", "\"0.30\"");
        let err = TableLoader::from_yaml_str(&content, "test").unwrap_err();
        assert!(err.to_string().contains("above tax_rate_high"));
    }

    #[test]
    fn test_non_kebab_key_is_rejected() {
        let content = VALID_TABLE.replace("  zagreb:", "  Zagreb_City:");
        let err = TableLoader::from_yaml_str(&content, "test").unwrap_err();
        assert!(err.to_string().contains("kebab-case"));
    }

    #[test]
    fn test_key_with_remaining_diacritics_is_accepted() {
        let content = VALID_TABLE.replace("  zagreb:", "  cačinci:");
        let table = TableLoader::from_yaml_str(&content, "test").unwrap();
        assert_eq!(table.lookup("cačinci").unwrap().tax_rate_low, dec!(0.23));
    }

    #[test]
    fn test_is_kebab_case() {
        assert!(is_kebab_case("sveta-nedelja-samobor"));
        assert!(is_kebab_case("zagreb"));
        assert!(!is_kebab_case("-zagreb"));
        assert!(!is_kebab_case("zagreb-"));
        assert!(!is_kebab_case("sveta--nedelja"));
        assert!(is_kebab_case("čakovec"));
        assert!(is_kebab_case("cačinci"));
        assert!(is_kebab_case("grad-2"));
        assert!(!is_kebab_case("Čačinci"));
        assert!(!is_kebab_case("sveta nedelja"));
        assert!(!is_kebab_case(""));
    }
}
