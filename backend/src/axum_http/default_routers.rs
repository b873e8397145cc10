use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub ok: bool,
    pub service: String,
}

pub async fn not_found() -> impl IntoResponse {
    info!("backend router: not_found handler invoked");
    (StatusCode::NOT_FOUND, "NOT_FOUND").into_response()
}

pub async fn service_info(State(service_name): State<Arc<str>>) -> impl IntoResponse {
    Json(ServiceInfo {
        ok: true,
        service: service_name.to_string(),
    })
}
