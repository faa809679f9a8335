//! HTTP handlers and route configuration.

mod auth;
mod catalog;
mod comments;
mod health;
mod posts;
mod present;
mod profiles;

use actix_web::web;

use crate::middleware::error::AppError;

/// JSON body limits and RFC 7807 errors for malformed bodies.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/categories", web::get().to(catalog::categories))
            .route("/locations", web::get().to(catalog::locations))
            .route("/category/{slug}", web::get().to(posts::category))
            .route("/profile/{username}", web::get().to(profiles::show))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Blog routes; writes require a bearer token
            .service(
                web::resource("/posts")
                    .route(web::get().to(posts::feed))
                    .route(web::post().to(posts::create)),
            )
            .service(
                web::resource("/posts/{post_id}")
                    .route(web::get().to(posts::detail))
                    .route(web::put().to(posts::update))
                    .route(web::delete().to(posts::delete)),
            )
            .route("/posts/{post_id}/comments", web::post().to(comments::create))
            .service(
                web::resource("/posts/{post_id}/comments/{comment_id}")
                    .route(web::put().to(comments::update))
                    .route(web::delete().to(comments::delete)),
            )
            .route("/profile", web::put().to(profiles::update)),
    );
}
