//! Response types for the salary API.
//!
//! This module defines the JSON bodies of the successful responses, the
//! error response structure, and the mapping from engine errors to HTTP
//! status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{MunicipalityOption, TableMetadata, TaxRates};
use crate::error::EngineError;
use crate::models::{DooBreakdown, GrossTwoBreakdown, SalaryBreakdown};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates an error for a query string that could not be deserialized.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::with_details(
            "INVALID_QUERY",
            "Invalid query parameter(s)",
            message,
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidAmount { field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_AMOUNT",
                    message,
                    format!("The '{}' amount was rejected", field),
                ),
            ),
            EngineError::UnknownMunicipality { key } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "UNKNOWN_MUNICIPALITY",
                    message,
                    format!("'{}' is not a known municipality key, see /places", key),
                ),
            ),
            EngineError::OutOfRange { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_CONFIGURATION", message))
            }
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
        }
    }
}

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service name.
    pub name: String,
    /// Crate version.
    pub version: String,
    /// Short description.
    pub description: String,
    /// Available endpoints.
    pub endpoints: Vec<String>,
}

/// Short response of `GET /neto/{gross}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetResponse {
    /// Monthly gross the net was computed for.
    pub gross: Decimal,
    /// Net salary.
    pub net: Decimal,
    /// Currency code.
    pub currency: String,
}

/// Detailed response of `GET /neto/{gross}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedNetResponse {
    /// The breakdown.
    #[serde(flatten)]
    pub breakdown: SalaryBreakdown,
    /// Currency code.
    pub currency: String,
}

/// Short response of `GET /neto/bruto2/{gross_two}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrossTwoNetResponse {
    /// Monthly total cost to employer.
    pub gross_two: Decimal,
    /// Gross recovered from the total cost.
    pub gross: Decimal,
    /// Net salary.
    pub net: Decimal,
    /// Currency code.
    pub currency: String,
}

/// Detailed response of `GET /neto/bruto2/{gross_two}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedGrossTwoResponse {
    /// The breakdown.
    #[serde(flatten)]
    pub breakdown: GrossTwoBreakdown,
    /// Currency code.
    pub currency: String,
}

/// Response of `GET /bruto/{net}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrossResponse {
    /// Requested net salary.
    pub net: Decimal,
    /// Gross salary producing the net.
    pub gross: Decimal,
    /// Total cost to employer of the gross.
    pub total_cost_to_employer: Decimal,
    /// Currency code.
    pub currency: String,
}

/// Summary response of `GET /doo/{total_revenue}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DooSummaryResponse {
    /// Monthly revenue the calculation used.
    pub total_revenue: Decimal,
    /// Director gross salary.
    pub director_gross: Decimal,
    /// Director net salary.
    pub net_salary: Decimal,
    /// Net dividend.
    pub net_dividend: Decimal,
    /// Net salary plus net dividend.
    pub total: Decimal,
    /// Currency code.
    pub currency: String,
}

/// Detailed response of `GET /doo/{total_revenue}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedDooResponse {
    /// The breakdown.
    #[serde(flatten)]
    pub breakdown: DooBreakdown,
    /// Currency code.
    pub currency: String,
}

/// A municipality with its key and rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceTaxes {
    /// Municipality key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Low bracket tax rate.
    pub tax_rate_low: Decimal,
    /// High bracket tax rate.
    pub tax_rate_high: Decimal,
}

/// Response of `GET /taxes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxesResponse {
    /// Every municipality with its rates, sorted by key.
    pub places: Vec<PlaceTaxes>,
    /// Table provenance.
    pub metadata: TableMetadata,
}

/// Response of `GET /taxes/default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultTaxResponse {
    /// Rates used without a municipality.
    pub default_tax: TaxRates,
    /// Table provenance.
    pub metadata: TableMetadata,
}

/// Response of `GET /taxes/{place}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceTaxResponse {
    /// The municipality.
    pub place: PlaceTaxes,
    /// Table provenance.
    pub metadata: TableMetadata,
}

/// Response of `GET /places`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesResponse {
    /// Key and name pairs sorted by name.
    pub places: Vec<MunicipalityOption>,
    /// Table provenance.
    pub metadata: TableMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_amount_maps_to_bad_request() {
        let response: ApiErrorResponse = EngineError::InvalidAmount {
            field: "gross".to_string(),
            value: "-1".to_string(),
            max: dec!(1000000),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_AMOUNT");
        assert!(response.error.message.contains("gross"));
    }

    #[test]
    fn test_unknown_municipality_maps_to_bad_request() {
        let response: ApiErrorResponse = EngineError::UnknownMunicipality {
            key: "atlantis".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "UNKNOWN_MUNICIPALITY");
        assert!(response.error.details.unwrap().contains("atlantis"));
    }

    #[test]
    fn test_out_of_range_maps_to_bad_request() {
        let response: ApiErrorResponse = EngineError::OutOfRange {
            field: "coeff".to_string(),
            message: "too big".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_CONFIGURATION");
    }

    #[test]
    fn test_config_errors_map_to_internal_error() {
        let response: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "places.yaml".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "CONFIG_ERROR");
    }
}
