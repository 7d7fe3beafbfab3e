#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web::Data;
use orientation_chat::config::AppConfig;
use orientation_chat::model::MockBackend;
use orientation_chat::AppState;

pub const TEST_KEY: &str = "test-key";

pub fn state_with(backend: &MockBackend) -> Data<AppState> {
    Data::new(AppState::new(
        AppConfig::new(Some(TEST_KEY.to_string())),
        Arc::new(backend.clone()),
    ))
}

pub fn state_without_key(backend: &MockBackend) -> Data<AppState> {
    Data::new(AppState::new(AppConfig::new(None), Arc::new(backend.clone())))
}
