use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API response for an accepted update
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UpdateResponse {
    pub status: String,
}
