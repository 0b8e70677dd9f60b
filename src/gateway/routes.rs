//! Route handlers. Each one runs a single query through [`ClimateService`].
//!
//! [`ClimateService`]: crate::climate::ClimateService

use super::{ApiError, AppState, API_PREFIX};
use crate::climate::TemperatureSummary;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use std::collections::BTreeMap;

/// GET / — route listing with the valid date interval.
pub async fn handle_welcome(State(state): State<AppState>) -> impl IntoResponse {
    let ctx = state.service.context();
    let html = format!(
        "Hi, welcome. <br/>\
         <br/>\
         Available Routes:<br/>\
         {API_PREFIX}/precipitation<br/>\
         {API_PREFIX}/stations<br/>\
         {API_PREFIX}/tobs<br/>\
         {API_PREFIX}/start_date<br/>\
         {API_PREFIX}/start_date/end_date<br/>\
         <br/>\
         For start_date and end_date: <br/>\
         * use format yyyy-mm-dd<br/>\
         * enter dates in the interval [{earliest}, {latest}]<br/>",
        earliest = ctx.earliest_date,
        latest = ctx.latest_date,
    );

    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html)
}

/// GET /api/v1.0/precipitation — `{date: prcp}` for the last year.
pub async fn handle_precipitation(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, ApiError> {
    Ok(Json(state.service.precipitation_last_year()?))
}

/// GET /api/v1.0/stations
pub async fn handle_stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.service.stations()?))
}

/// GET /api/v1.0/tobs — last-year temperatures of the most active station.
pub async fn handle_tobs(State(state): State<AppState>) -> Result<Json<Vec<Option<f64>>>, ApiError> {
    Ok(Json(state.service.tobs_last_year()?))
}

/// GET /api/v1.0/{start} — `[min, max, avg]` from `start` to the default end.
pub async fn handle_temperature_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    Ok(Json(state.service.temperature_summary(&start, None)?))
}

/// GET /api/v1.0/{start}/{end} — `[min, max, avg]` over the closed range.
pub async fn handle_temperature_range(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    Ok(Json(state.service.temperature_summary(&start, Some(&end))?))
}
