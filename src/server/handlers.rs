// HTTP request handlers

use super::form::read_form;
use super::routes::AppState;
use crate::error::Result;
use crate::metrics::gather_metrics;
use crate::models::health::{ApiKeyStatus, HealthResponse};
use crate::models::{EraseRequest, GenerateRequest, InpaintRequest};
use crate::translation::ImageOutput;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::warn;

type FormResult = std::result::Result<Multipart, MultipartRejection>;

/// `GET /`
pub async fn root_handler() -> &'static str {
    "stability-relay is running"
}

/// `POST /api/IsWorking`, the front end's reachability check
pub async fn is_working_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "POST works!" }))
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.translator.health_check())
}

pub async fn test_api_key_handler(State(state): State<AppState>) -> Result<Json<ApiKeyStatus>> {
    state.translator.api_key_status().map(Json)
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
}

/// Handler for `/generate` (text-to-image)
pub async fn generate_handler(
    State(state): State<AppState>,
    multipart: FormResult,
) -> Result<ImageOutput> {
    let form = read_form(multipart).await?;
    let req = GenerateRequest::try_from(form)?;
    log_failure("generate", state.translator.generate(req).await)
}

/// Handler for `/inpaint`
pub async fn inpaint_handler(
    State(state): State<AppState>,
    multipart: FormResult,
) -> Result<ImageOutput> {
    let form = read_form(multipart).await?;
    let req = InpaintRequest::try_from(form)?;
    log_failure("inpaint", state.translator.inpaint(req).await)
}

/// Handler for `/erase_direct_upload`
pub async fn erase_handler(
    State(state): State<AppState>,
    multipart: FormResult,
) -> Result<ImageOutput> {
    let form = read_form(multipart).await?;
    let req = EraseRequest::try_from(form)?;
    log_failure("erase", state.translator.erase(req).await)
}

fn log_failure(route: &str, result: Result<ImageOutput>) -> Result<ImageOutput> {
    if let Err(e) = &result {
        warn!("{} failed with {}: {}", route, e.status_code(), e);
    }
    result
}
