use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Backend, BackendError, Role, Turn};
use crate::config::AppConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

// A client for the Gemini REST API
pub struct GeminiClient {
    base_url: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let model = config.model.trim_start_matches("models/").to_string();
        info!("Using Gemini model {} at {}", model, config.api_base_url);

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model,
            client: Client::builder().build()?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Backend for GeminiClient {
    async fn send_message(
        &self,
        api_key: &str,
        history: Vec<Turn>,
        message: &str,
    ) -> Result<String, BackendError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let contents = history
            .iter()
            .chain(std::iter::once(&Turn::user(message)))
            .map(Content::from)
            .collect();
        let payload = GenerateContentRequest { contents };

        info!(
            "Sending {} turn(s) to {}",
            payload.contents.len(),
            self.model
        );
        debug!("Payload: {}", serde_json::to_string(&payload)?);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&payload)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body: GenerateContentResponse = response.json().await?;
        let text = body.text();
        if text.is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        info!("Response length: {} characters", text.len());
        Ok(text)
    }

    async fn list_models(&self, api_key: &str) -> Result<Value, BackendError> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        // Vendor error payloads are handed back unchanged.
        let status = response.status();
        let body: Value = response.json().await?;
        debug!("Model listing returned {}", status);
        Ok(body)
    }
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let raw = response.text().await?;
    let message = serde_json::from_str::<ErrorEnvelope>(&raw)
        .map(|envelope| envelope.error.message)
        .unwrap_or(raw);

    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    })
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: Role,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

impl From<&Turn> for Content {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role,
            parts: turn
                .parts
                .iter()
                .map(|text| Part { text: text.clone() })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    // first candidate only
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
