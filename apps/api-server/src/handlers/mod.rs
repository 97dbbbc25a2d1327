//! HTTP handlers and route configuration.

mod convert;
mod health;
mod home;
mod posts;
mod tags;
mod users;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/", web::get().to(home::home))
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list))
                    .route("", web::post().to(users::create))
                    .route("/{id}", web::get().to(users::show))
                    .route("/{id}", web::patch().to(users::update))
                    .route("/{id}", web::delete().to(users::delete))
                    .route("/{id}/posts", web::get().to(users::posts))
                    .route("/{id}/posts", web::post().to(users::create_post)),
            )
            .service(
                web::scope("/posts")
                    .route("/{id}", web::get().to(posts::show))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            .service(
                web::scope("/tags")
                    .route("", web::get().to(tags::list))
                    .route("", web::post().to(tags::create))
                    .route("/{id}", web::get().to(tags::show))
                    .route("/{id}", web::patch().to(tags::update))
                    .route("/{id}", web::delete().to(tags::delete)),
            ),
    );
}

/// JSON extractor settings: malformed bodies become RFC 7807 bad requests.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
