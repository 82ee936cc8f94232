// HTTP request handlers
use crate::domain::filter::FilterSpec;
use crate::domain::sales::SalesTable;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Filter-control values carried in the query string. Absent controls fall
/// back to the full table, matching the dashboards' initial state.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// Comma-separated product names.
    pub product: Option<String>,
    /// Comma-separated region names.
    pub region: Option<String>,
    /// Inclusive range start, ISO date.
    pub from: Option<String>,
    /// Inclusive range end, ISO date.
    pub to: Option<String>,
}

impl FilterQuery {
    pub fn to_spec(&self, table: &SalesTable) -> Result<FilterSpec, String> {
        let mut spec = FilterSpec::select_all(table);
        if let Some(products) = &self.product {
            spec.products = split_csv(products);
        }
        if let Some(regions) = &self.region {
            spec.regions = split_csv(regions);
        }
        if let Some(from) = &self.from {
            spec.date_from = parse_date(from)?;
        }
        if let Some(to) = &self.to {
            spec.date_to = parse_date(to)?;
        }
        Ok(spec)
    }
}

fn split_csv(value: &str) -> std::collections::BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    value
        .parse()
        .map_err(|_| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Compute one named dashboard output for the given filter values.
pub async fn get_output(
    Path(id): Path<String>,
    Query(query): Query<FilterQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let spec = match query.to_spec(state.registry.table()) {
        Ok(spec) => spec,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    match state.registry.invoke(&id, &spec) {
        Some(value) => Json(value).into_response(),
        None => (StatusCode::NOT_FOUND, format!("unknown output '{id}'")).into_response(),
    }
}

/// Compute every registered output for the given filter values, keyed by
/// output id.
pub async fn get_dashboard(
    Query(query): Query<FilterQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let spec = match query.to_spec(state.registry.table()) {
        Ok(spec) => spec,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    let outputs: serde_json::Map<String, serde_json::Value> = state
        .registry
        .invoke_all(&spec)
        .into_iter()
        .map(|(id, value)| (id, serde_json::json!(value)))
        .collect();
    Json(serde_json::Value::Object(outputs)).into_response()
}
