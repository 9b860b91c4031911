//! MessageBird REST API wire types.

use serde::{Deserialize, Serialize};

/// Outbound message submission, `POST /messages`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    /// Sender shown to the recipient.
    pub originator: String,
    pub recipients: Vec<String>,
    pub body: String,
}

/// Created message resource, trimmed to what the relay reads.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// Account balance, `GET /balance`.
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    pub payment: String,
    #[serde(rename = "type")]
    pub balance_type: String,
    pub amount: f64,
}

/// Error envelope returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub code: i32,
    pub description: String,
    #[serde(default)]
    pub parameter: Option<String>,
}
