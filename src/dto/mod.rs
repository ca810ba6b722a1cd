use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactRequest {
    /// Name of the person getting in touch
    #[serde(default = "undefined")]
    pub name: String,
    /// Address replies and the acknowledgment go to
    #[serde(default = "undefined")]
    pub email: String,
    /// Optional subject line for the owner notification
    #[serde(default)]
    pub subject: Option<String>,
    /// Free-form message body
    #[serde(default = "undefined")]
    pub message: String,
}

/// Placeholder for fields the client left out. The body is not validated,
/// so absent values are rendered into the emails as-is.
fn undefined() -> String {
    "undefined".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResult {
    /// Whether both emails went out
    pub success: bool,
    /// Human readable outcome
    pub message: String,
}

impl SubmissionResult {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
