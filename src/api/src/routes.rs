//! API route handlers.

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::config::AppConfig;
use crate::error::ReportError;
use crate::format::{to_report_json, to_report_xml};
use crate::html::{self, ErrorFlag, Page};
use crate::report::{
    driver_directory, driver_statistic, full_report_as_lines, full_report_as_mapping,
    sectioned_lines,
};
use crate::storage::RacerStore;
use crate::types::{BadRequestResponse, HealthResponse, ReportFormat, SortOrder};

/// Application state shared across handlers.
pub struct AppState {
    pub config: AppConfig,
    pub store: RacerStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = RacerStore::new(&config.storage.database_path);
        Self { config, store }
    }
}

/// Raw query pairs in request order. Repeated names are kept.
type QueryPairs = Vec<(String, String)>;

/// First value given for `name`; later repeats are ignored.
fn first_param<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/report/", get(api_report))
        .route("/report/", get(show_report))
        .route("/report/drivers/", get(show_report_drivers))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full report as JSON (default) or XML.
///
/// An unsupported `format` answers 200 with a `{status: 400}` body.
pub async fn api_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QueryPairs>,
) -> Result<Response, ReportError> {
    let format = match first_param(&query, "format").unwrap_or("json").parse::<ReportFormat>() {
        Ok(format) => format,
        Err(e) => {
            warn!("{}", e);
            return Ok(Json(BadRequestResponse::default()).into_response());
        }
    };
    debug!("API report requested as {:?}", format);

    let report = full_report_as_mapping(&state.store)?;

    let response = match format {
        ReportFormat::Json => (
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            to_report_json(&report)?,
        )
            .into_response(),
        ReportFormat::Xml => (
            [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
            to_report_xml(&report)?,
        )
            .into_response(),
    };
    Ok(response)
}

/// Common statistic page, best results above the border.
pub async fn show_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QueryPairs>,
) -> Html<String> {
    let order = match first_param(&query, "order").unwrap_or("asc").parse::<SortOrder>() {
        Ok(order) => order,
        Err(e) => {
            warn!("{}", e);
            return Html(html::common_statistic(&Page::Error(ErrorFlag::InvalidOrder)));
        }
    };

    let cfg = &state.config.report;
    let page = match full_report_as_lines(&state.store, &cfg.separator) {
        Ok(lines) => Page::Data(sectioned_lines(
            lines,
            cfg.best_results,
            cfg.borderline_length,
            order,
        )),
        Err(e) => {
            error!("Report lines unavailable: {}", e);
            Page::Error(ErrorFlag::DataUnevalable)
        }
    };
    Html(html::common_statistic(&page))
}

/// Driver directory, or a single driver's statistic when `driver_id` is given.
pub async fn show_report_drivers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QueryPairs>,
) -> Html<String> {
    if let Some(code) = first_param(&query, "driver_id").filter(|c| !c.is_empty()) {
        let page = match driver_statistic(&state.store, code) {
            Ok(stat) => Page::Data(stat),
            Err(e) => {
                match &e {
                    ReportError::DriverNotFound(_) => warn!("{}", e),
                    _ => error!("Driver statistic unavailable: {}", e),
                }
                Page::Error(ErrorFlag::UnknownCode)
            }
        };
        return Html(html::driver_statistic(&page));
    }

    let page = match driver_directory(&state.store) {
        Ok(drivers) => Page::Data(drivers),
        Err(e) => {
            error!("Driver directory unavailable: {}", e);
            Page::Error(ErrorFlag::DataUnevalable)
        }
    };
    Html(html::drivers_and_codes(&page))
}
