use actix_web::web;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::json_error))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/chat")
                        .route(web::post().to(handlers::chat))
                        .default_service(web::route().to(handlers::method_not_allowed)),
                )
                .service(
                    web::resource("/models")
                        .route(web::get().to(handlers::list_models))
                        .default_service(web::route().to(handlers::method_not_allowed)),
                ),
        )
        .route("/health", web::get().to(handlers::health_check));
}
