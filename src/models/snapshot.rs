use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Current shared document plus the live participant count, for polling
/// clients that do not hold a push channel.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SnapshotResponse {
    pub text: String,
    pub image: String,
    #[schema(value_type = Vec<Object>)]
    pub files: Vec<Value>,
    pub users: usize,
}
