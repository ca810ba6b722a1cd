use async_trait::async_trait;

use crate::dto::{ContactRequest, SubmissionResult};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to reach contact service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode contact service response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What came back from the contact endpoint: whether the status was 2xx,
/// and the decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub ok: bool,
    pub body: SubmissionResult,
}

#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn submit(&self, request: &ContactRequest) -> Result<ApiResponse, ClientError>;
}

/// Posts contact requests to `{base_url}/api/contact`.
pub struct HttpContactApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpContactApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn contact_url(&self) -> String {
        format!("{}/api/contact", self.base_url)
    }
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn submit(&self, request: &ContactRequest) -> Result<ApiResponse, ClientError> {
        tracing::info!("Posting contact request to {}", self.contact_url());

        let response = self
            .client
            .post(self.contact_url())
            .json(request)
            .send()
            .await?;

        let ok = response.status().is_success();
        if !ok {
            tracing::warn!("Contact service returned {}", response.status());
        }

        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes)?;

        Ok(ApiResponse { ok, body })
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        http::StatusCode,
        response::{Html, IntoResponse},
        routing::post,
    };

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}")
    }

    fn alice() -> ContactRequest {
        ContactRequest {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            subject: Some("Project inquiry".to_string()),
            message: "Hi".to_string(),
        }
    }

    #[tokio::test]
    async fn successful_post_is_ok_with_decoded_body() {
        let router = Router::new().route(
            "/api/contact",
            post(|Json(request): Json<ContactRequest>| async move {
                Json(SubmissionResult {
                    success: true,
                    message: format!("{} / {:?}", request.name, request.subject),
                })
            }),
        );
        let api = HttpContactApi::new(serve(router).await);

        let response = api.submit(&alice()).await.unwrap();

        assert!(response.ok);
        assert!(response.body.success);
        assert_eq!(response.body.message, "Alice / Some(\"Project inquiry\")");
    }

    #[tokio::test]
    async fn server_error_status_is_not_ok() {
        let router = Router::new().route(
            "/api/contact",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(SubmissionResult {
                        success: false,
                        message: "Failed to send email".to_string(),
                    }),
                )
            }),
        );
        let api = HttpContactApi::new(serve(router).await);

        let response = api.submit(&alice()).await.unwrap();

        assert!(!response.ok);
        assert!(!response.body.success);
        assert_eq!(response.body.message, "Failed to send email");
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let router = Router::new().route(
            "/api/contact",
            post(|| async { (StatusCode::BAD_GATEWAY, Html("<h1>Bad gateway</h1>")).into_response() }),
        );
        let api = HttpContactApi::new(serve(router).await);

        let result = api.submit(&alice()).await;

        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn closed_port_is_an_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = HttpContactApi::new(format!("http://{addr}"));

        let result = api.submit(&alice()).await;

        assert!(matches!(result, Err(ClientError::Http(_))));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = HttpContactApi::new("http://localhost:3000/");
        assert_eq!(api.contact_url(), "http://localhost:3000/api/contact");
    }

    #[test]
    fn request_without_subject_omits_the_field() {
        let request = ContactRequest {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            subject: None,
            message: "Hi".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("subject").is_none());
        assert_eq!(json["name"], "Alice");
    }
}
