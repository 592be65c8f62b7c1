use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for an error
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: u16,
    pub status: String,
    pub error: String,
}

/// Rejection raised for a malformed mutation request.
#[derive(Debug)]
pub enum PayloadError {
    InvalidPayload(String),
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadError::InvalidPayload(reason) => write!(f, "Invalid payload: {}", reason),
        }
    }
}

impl std::error::Error for PayloadError {}
