use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{debug, error, info};

use crate::error::ApiError;
use crate::model::ModelListing;
use crate::prompt;
use crate::web::models::{ChatReply, ChatRequest, HealthStatus, HistoryEntry};
use crate::AppState;

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
    })
}

// Any method a resource does not serve
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    debug!("Rejected {} {}", req.method(), req.path());
    Err(ApiError::MethodNotAllowed)
}

// Malformed or non-JSON bodies
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidBody(err.to_string()).into()
}

// Chat API endpoint
pub async fn chat(
    data: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    let ChatRequest {
        message,
        history,
        context,
    } = req.into_inner();

    let message = match message {
        Some(message) if !message.is_empty() => message,
        _ => return Err(ApiError::EmptyMessage),
    };

    let api_key = data.config.require_api_key().map_err(|e| {
        error!("{} is not set, cannot reach the backend", crate::config::API_KEY_VAR);
        e
    })?;

    let history: Vec<_> = history
        .unwrap_or_default()
        .into_iter()
        .filter_map(HistoryEntry::into_turn)
        .collect();

    info!(
        "Chat request: {} prior turn(s), context {}",
        history.len(),
        if context.is_some() { "present" } else { "absent" }
    );

    let turns = prompt::conversation(context.as_deref(), history);
    debug!("Message: {}", message);

    match data.backend.send_message(api_key, turns, &message).await {
        Ok(reply) => Ok(HttpResponse::Ok().json(ChatReply { reply })),
        Err(e) => {
            error!("Backend error: {}", e);
            Err(ApiError::Backend(e))
        }
    }
}

// Model listing endpoint
pub async fn list_models(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let api_key = data
        .config
        .require_api_key()
        .map_err(|_| ApiError::MissingListingKey)?;

    let listing = data
        .backend
        .list_models(api_key)
        .await
        .and_then(|payload| ModelListing::from_payload(payload).map_err(Into::into))
        .map_err(|e| {
            error!("Model listing failed: {}", e);
            ApiError::Listing(e)
        })?;

    if let ModelListing::Filtered(list) = &listing {
        info!("Listing {} text generation model(s)", list.count);
    }

    Ok(HttpResponse::Ok().json(listing))
}
