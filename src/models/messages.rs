use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot sent once to a newly attached client.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InitMessage {
    pub text: String,
    pub image: String,
    pub files: Vec<Value>,
    pub users: usize,
}

/// Full document state pushed after an accepted mutation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateMessage {
    pub text: String,
    pub image: String,
    pub files: Vec<Value>,
}

/// Participant count pushed after attach/detach.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserCountMessage {
    pub users: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PongMessage {
    pub date: String,
}

/// Mutation request carried over the push channel. Everything besides the
/// tag is treated as the partial-update mapping.
#[derive(Deserialize, Debug)]
pub struct InboundUpdate {
    #[serde(flatten)]
    pub partial: serde_json::Map<String, Value>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "update")]
    Update(InboundUpdate),
    #[serde(rename = "ping")]
    Ping,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    #[serde(rename = "init")]
    Init(InitMessage),
    #[serde(rename = "update")]
    Update(UpdateMessage),
    #[serde(rename = "users")]
    UserCount(UserCountMessage),
    #[serde(rename = "pong")]
    Pong(PongMessage),
}
