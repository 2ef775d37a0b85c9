use serde::{Deserialize, Serialize};

pub mod analytics;
pub mod movie;
pub mod preferences;
pub mod session;

pub use analytics::AggregateSnapshot;
pub use movie::Movie;
pub use preferences::{FilterSelection, Genre, PreferenceOrigin, PreferenceText, YearTag};
pub use session::{
    RequestGeneration, Session, SessionPhase, PREFERENCE_REQUIRED_MESSAGE,
    RECOMMENDATION_FAILED_MESSAGE,
};

// ============================================================================
// Anthropic Messages API Types
// ============================================================================

/// Request body for POST /v1/messages
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<MessageParam>,
}

/// A single conversation turn
#[derive(Debug, Clone, Serialize)]
pub struct MessageParam {
    pub role: String,
    pub content: String,
}

impl MessageParam {
    /// Creates a user-role message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response body from POST /v1/messages
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

impl MessagesResponse {
    /// Text of the first `text` content block, if any
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text.as_deref())
    }
}

/// One block of model output
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
}
