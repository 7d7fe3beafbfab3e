use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("[{status}] {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Risposta vuota")]
    EmptyResponse,

    #[error("{0}")]
    Unexpected(String),
}

// What the user is told about a backend failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    ModelNotFound,
    QuotaExhausted,
    Unavailable,
}

impl Failure {
    pub fn message(self) -> &'static str {
        match self {
            Failure::ModelNotFound => "Modello non trovato o non accessibile.",
            Failure::QuotaExhausted => "Troppe richieste (Quota esaurita).",
            Failure::Unavailable => "L'AI sta riposando. Riprova!",
        }
    }

    fn from_text(text: &str) -> Self {
        if text.contains("429") {
            Failure::QuotaExhausted
        } else if text.contains("404") {
            Failure::ModelNotFound
        } else {
            Failure::Unavailable
        }
    }
}

impl BackendError {
    pub fn failure(&self) -> Failure {
        match self {
            BackendError::Status { status: 404, .. } => Failure::ModelNotFound,
            BackendError::Status { status: 429, .. } => Failure::QuotaExhausted,
            BackendError::Status { .. } => Failure::Unavailable,
            BackendError::Transport(err) => match err.status().map(|s| s.as_u16()) {
                Some(404) => Failure::ModelNotFound,
                Some(429) => Failure::QuotaExhausted,
                _ => Failure::from_text(&err.to_string()),
            },
            // no structured code, only the text
            other => Failure::from_text(&other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, message: &str) -> BackendError {
        BackendError::Status {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn structured_status_drives_classification() {
        assert_eq!(status(404, "not here").failure(), Failure::ModelNotFound);
        assert_eq!(status(429, "slow down").failure(), Failure::QuotaExhausted);
        assert_eq!(status(503, "overloaded").failure(), Failure::Unavailable);
    }

    #[test]
    fn structured_status_ignores_numbers_in_the_message() {
        assert_eq!(
            status(400, "quota 429 mentioned in passing").failure(),
            Failure::Unavailable
        );
    }

    #[test]
    fn text_fallback_without_structured_code() {
        let not_found = BackendError::Unexpected("got status: 404 Not Found".into());
        let quota = BackendError::Unexpected("got status: 429 Too Many Requests".into());
        let other = BackendError::Unexpected("socket hang up".into());
        assert_eq!(not_found.failure(), Failure::ModelNotFound);
        assert_eq!(quota.failure(), Failure::QuotaExhausted);
        assert_eq!(other.failure(), Failure::Unavailable);
    }

    #[test]
    fn quota_wins_when_both_codes_appear() {
        let err = BackendError::Unexpected("404 then 429".into());
        assert_eq!(err.failure(), Failure::QuotaExhausted);
    }

    #[test]
    fn empty_response_is_generic() {
        assert_eq!(BackendError::EmptyResponse.failure(), Failure::Unavailable);
        assert_eq!(BackendError::EmptyResponse.to_string(), "Risposta vuota");
    }
}
