use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{ContactRequest, SubmissionResult},
    service::ContactService,
};

pub const FAILED_MESSAGE: &str = "Failed to send email";

#[derive(OpenApi)]
#[openapi(
    paths(send_contact),
    components(schemas(ContactRequest, SubmissionResult)),
    tags(
        (name = "contact", description = "Contact form relay")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Notification and acknowledgment sent", body = SubmissionResult),
        (status = 500, description = "Malformed request or mail delivery failure", body = SubmissionResult)
    ),
    tag = "contact"
)]
#[debug_handler]
pub async fn send_contact(
    State(service): State<Arc<ContactService>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("failed to parse contact request: {}", e);
            return failure();
        }
    };

    match service.send_contact_email(request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            tracing::error!("failed to send contact email: {}", e);
            failure()
        }
    }
}

fn failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmissionResult::failed(FAILED_MESSAGE)),
    )
        .into_response()
}
