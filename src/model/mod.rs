mod catalog;
mod error;
mod gemini;
mod mock_backend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use catalog::{ModelDescriptor, ModelList, ModelListing, TEXT_GENERATION_METHOD};
pub use error::{BackendError, Failure};
pub use gemini::GeminiClient;
pub use mock_backend::{MockBackend, RecordedCall};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<String>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![text.into()],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![text.into()],
        }
    }

    pub fn text(&self) -> String {
        self.parts.concat()
    }
}

// The generative-language service behind the proxy
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    async fn send_message(
        &self,
        api_key: &str,
        history: Vec<Turn>,
        message: &str,
    ) -> Result<String, BackendError>;

    // Vendor error payloads come back as Ok, unchanged
    async fn list_models(&self, api_key: &str) -> Result<Value, BackendError>;
}
