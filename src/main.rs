use std::sync::Arc;

use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use log::{info, warn};

use orientation_chat::config::{self, AppConfig};
use orientation_chat::model::GeminiClient;
use orientation_chat::web::routes;
use orientation_chat::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment
    let env_file = config::load_local_env();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    match env_file {
        Ok(Some(path)) => info!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => warn!("{} not loaded: {}", config::LOCAL_ENV_FILE, e),
    }

    info!("Starting orientation chat proxy");

    let config = AppConfig::from_env()?;
    if config.api_key.is_none() {
        warn!(
            "{} is not set; chat and model requests will fail",
            config::API_KEY_VAR
        );
    }

    let backend = GeminiClient::new(&config)?;
    let bind = (config.host.clone(), config.port);

    let app_state = Data::new(AppState::new(config, Arc::new(backend)));

    info!("Listening on {}:{}", bind.0, bind.1);

    // Start web server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
