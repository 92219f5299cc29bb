//! HTTP request handlers for the salary API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! handler logs one line per request tagged with a correlation id.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_doo, gross_to_net, gross_to_net_breakdown, gross_to_total, gross_two_to_net,
    gross_two_to_net_breakdown, net_to_gross, total_to_gross,
};
use crate::config::TaxRateTable;
use crate::config::constants::{CURRENCY, MAX_GROSS_TWO, MAX_REVENUE, MAX_SALARY};
use crate::decimal::{parse_amount, round_cents};
use crate::models::DooSummary;

use super::request::{DooQuery, InverseQuery, SalaryQuery};
use super::response::{
    ApiError, ApiErrorResponse, DefaultTaxResponse, DetailedDooResponse,
    DetailedGrossTwoResponse, DetailedNetResponse, DooSummaryResponse, GrossResponse,
    GrossTwoNetResponse, NetResponse, PlaceTaxResponse, PlaceTaxes, PlacesResponse, ServiceInfo,
    TaxesResponse,
};
use super::state::AppState;

const MONTHS_PER_YEAR: Decimal = dec!(12);

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/neto/:gross", get(net_handler))
        .route("/neto/bruto2/:gross_two", get(gross_two_handler))
        .route("/bruto/:net", get(gross_handler))
        .route("/doo/:total_revenue", get(doo_handler))
        .route("/taxes", get(taxes_handler))
        .route("/taxes/default", get(default_tax_handler))
        .route("/taxes/:place", get(place_tax_handler))
        .route("/places", get(places_handler))
        .with_state(state)
}

/// Handler for GET /.
async fn index_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Brutoneto API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Croatian salary calculations API".to_string(),
        endpoints: [
            "/neto/{gross}",
            "/neto/bruto2/{gross_two}",
            "/bruto/{net}",
            "/doo/{total_revenue}",
            "/taxes",
            "/taxes/default",
            "/taxes/{place}",
            "/places",
        ]
        .iter()
        .map(|endpoint| endpoint.to_string())
        .collect(),
    })
}

/// Handler for GET /neto/{gross}.
///
/// Returns the net salary, or the full breakdown with `detailed=true`.
async fn net_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<SalaryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let start = Instant::now();
    let result = extract(path, query)
        .and_then(|(raw, query)| net_response(state.table(), &raw, &query));
    respond(correlation_id, "net", start, result)
}

fn net_response(table: &TaxRateTable, raw: &str, query: &SalaryQuery) -> ApiResult<Response> {
    let gross = monthly_amount(raw, "gross", MAX_SALARY, query.yearly)?;
    let config = query.salary_config();

    if query.detailed {
        let breakdown = gross_to_net_breakdown(gross, &config, table)?;
        return Ok(json(DetailedNetResponse {
            breakdown,
            currency: CURRENCY.to_string(),
        }));
    }

    let net = gross_to_net(gross, &config, table)?;
    Ok(json(NetResponse {
        gross,
        net,
        currency: CURRENCY.to_string(),
    }))
}

/// Handler for GET /neto/bruto2/{gross_two}.
async fn gross_two_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<SalaryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let start = Instant::now();
    let result = extract(path, query)
        .and_then(|(raw, query)| gross_two_response(state.table(), &raw, &query));
    respond(correlation_id, "gross_two", start, result)
}

fn gross_two_response(
    table: &TaxRateTable,
    raw: &str,
    query: &SalaryQuery,
) -> ApiResult<Response> {
    let gross_two = monthly_amount(raw, "gross_two", MAX_GROSS_TWO, query.yearly)?;
    let config = query.salary_config();

    if query.detailed {
        let breakdown = gross_two_to_net_breakdown(gross_two, &config, table)?;
        return Ok(json(DetailedGrossTwoResponse {
            breakdown,
            currency: CURRENCY.to_string(),
        }));
    }

    let net = gross_two_to_net(gross_two, &config, table)?;
    Ok(json(GrossTwoNetResponse {
        gross_two,
        gross: total_to_gross(gross_two),
        net,
        currency: CURRENCY.to_string(),
    }))
}

/// Handler for GET /bruto/{net}.
async fn gross_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<InverseQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let start = Instant::now();
    let result = extract(path, query).and_then(|(raw, query)| {
        let net = parse_amount(&raw, "net", MAX_SALARY)?;
        let gross = net_to_gross(net, &query.salary_config(), state.table())?;
        Ok(json(GrossResponse {
            net,
            gross,
            total_cost_to_employer: gross_to_total(gross).total,
            currency: CURRENCY.to_string(),
        }))
    });
    respond(correlation_id, "gross", start, result)
}

/// Handler for GET /doo/{total_revenue}.
async fn doo_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<DooQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let start = Instant::now();
    let result = extract(path, query).and_then(|(raw, query)| {
        let total_revenue = monthly_amount(&raw, "total_revenue", MAX_REVENUE, query.yearly)?;
        let breakdown = calculate_doo(total_revenue, &query.doo_config(), state.table())?;

        if query.detailed {
            return Ok(json(DetailedDooResponse {
                breakdown,
                currency: CURRENCY.to_string(),
            }));
        }

        let summary = DooSummary::from(&breakdown);
        Ok(json(DooSummaryResponse {
            total_revenue: breakdown.total_revenue,
            director_gross: breakdown.director_gross,
            net_salary: summary.net_salary,
            net_dividend: summary.net_dividend,
            total: summary.total,
            currency: CURRENCY.to_string(),
        }))
    });
    respond(correlation_id, "doo", start, result)
}

/// Handler for GET /taxes.
async fn taxes_handler(State(state): State<AppState>) -> Json<TaxesResponse> {
    let table = state.table();
    Json(TaxesResponse {
        places: table
            .iter()
            .map(|(key, place)| PlaceTaxes {
                key: key.to_string(),
                name: place.name.clone(),
                tax_rate_low: place.tax_rate_low,
                tax_rate_high: place.tax_rate_high,
            })
            .collect(),
        metadata: table.metadata().clone(),
    })
}

/// Handler for GET /taxes/default.
async fn default_tax_handler(State(state): State<AppState>) -> Json<DefaultTaxResponse> {
    let table = state.table();
    Json(DefaultTaxResponse {
        default_tax: table.default_rates(),
        metadata: table.metadata().clone(),
    })
}

/// Handler for GET /taxes/{place}.
async fn place_tax_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let start = Instant::now();
    let result = path.map_err(path_error).and_then(|Path(key)| {
        let table = state.table();
        let place = table.get(&key)?;
        Ok(json(PlaceTaxResponse {
            place: PlaceTaxes {
                key,
                name: place.name.clone(),
                tax_rate_low: place.tax_rate_low,
                tax_rate_high: place.tax_rate_high,
            },
            metadata: table.metadata().clone(),
        }))
    });
    respond(correlation_id, "place_tax", start, result)
}

/// Handler for GET /places.
async fn places_handler(State(state): State<AppState>) -> Json<PlacesResponse> {
    let table = state.table();
    Json(PlacesResponse {
        places: table.options(),
        metadata: table.metadata().clone(),
    })
}

/// Unwraps the path and query extractors, turning rejections into 400s.
fn extract<Q>(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<Q>, QueryRejection>,
) -> ApiResult<(String, Q)> {
    let Path(raw) = path.map_err(path_error)?;
    let Query(query) = query.map_err(|rejection| {
        ApiErrorResponse::bad_request(ApiError::invalid_query(rejection.body_text()))
    })?;
    Ok((raw, query))
}

fn path_error(rejection: PathRejection) -> ApiErrorResponse {
    ApiErrorResponse::bad_request(ApiError::new("INVALID_PATH", rejection.body_text()))
}

/// Parses an amount, converting a yearly amount to a monthly one.
fn monthly_amount(raw: &str, field: &str, max: Decimal, yearly: bool) -> ApiResult<Decimal> {
    if !yearly {
        return Ok(parse_amount(raw, field, max)?);
    }
    let yearly_amount = parse_amount(raw, field, max * MONTHS_PER_YEAR)?;
    Ok(round_cents(yearly_amount / MONTHS_PER_YEAR))
}

fn json<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Logs the outcome of a request and renders the response.
fn respond(
    correlation_id: Uuid,
    endpoint: &'static str,
    start: Instant,
    result: ApiResult<Response>,
) -> Response {
    let duration_us = start.elapsed().as_micros();
    match result {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                endpoint,
                duration_us,
                "Request completed successfully"
            );
            response
        }
        Err(api_error) => {
            warn!(
                correlation_id = %correlation_id,
                endpoint,
                status = api_error.status.as_u16(),
                code = %api_error.error.code,
                message = %api_error.error.message,
                "Request rejected"
            );
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}
