use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use super::{Backend, BackendError, Turn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub api_key: String,
    pub history: Vec<Turn>,
    pub message: String,
}

/// An in-memory [`Backend`] for tests.
///
/// Canned results are handed out once. After that, chat calls fail with
/// [`BackendError::EmptyResponse`] and listings return an empty model list.
#[derive(Clone, Default)]
pub struct MockBackend {
    reply: Arc<Mutex<Option<Result<String, BackendError>>>>,
    listing: Arc<Mutex<Option<Result<Value, BackendError>>>>,
    chat_calls: Arc<Mutex<Vec<RecordedCall>>>,
    listing_calls: Arc<Mutex<usize>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, text: impl Into<String>) -> Self {
        *lock(&self.reply) = Some(Ok(text.into()));
        self
    }

    pub fn with_error(self, error: BackendError) -> Self {
        *lock(&self.reply) = Some(Err(error));
        self
    }

    pub fn with_models(self, payload: Value) -> Self {
        *lock(&self.listing) = Some(Ok(payload));
        self
    }

    pub fn with_listing_error(self, error: BackendError) -> Self {
        *lock(&self.listing) = Some(Err(error));
        self
    }

    pub fn chat_calls(&self) -> Vec<RecordedCall> {
        lock(&self.chat_calls).clone()
    }

    pub fn listing_calls(&self) -> usize {
        *lock(&self.listing_calls)
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn send_message(
        &self,
        api_key: &str,
        history: Vec<Turn>,
        message: &str,
    ) -> Result<String, BackendError> {
        lock(&self.chat_calls).push(RecordedCall {
            api_key: api_key.to_string(),
            history,
            message: message.to_string(),
        });

        lock(&self.reply)
            .take()
            .unwrap_or(Err(BackendError::EmptyResponse))
    }

    async fn list_models(&self, _api_key: &str) -> Result<Value, BackendError> {
        *lock(&self.listing_calls) += 1;

        lock(&self.listing)
            .take()
            .unwrap_or_else(|| Ok(serde_json::json!({ "models": [] })))
    }
}
