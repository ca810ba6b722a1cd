pub mod rest;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::service::ContactService;

pub fn router(service: Arc<ContactService>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/api/contact", post(rest::send_contact))
        .route("/api-doc/openapi.json", get(openapi))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> Response {
    (StatusCode::OK, "Hello from contact service!").into_response()
}

async fn openapi() -> Response {
    Json(rest::ApiDoc::openapi()).into_response()
}
