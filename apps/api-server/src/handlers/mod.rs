//! HTTP handlers and route configuration.

mod health;
mod listings;
mod uploads;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/listings")
                .route(web::get().to(listings::list_listings))
                .route(web::post().to(listings::create_listing)),
        )
        .service(
            web::resource("/listings/{id}")
                .route(web::get().to(listings::get_listing))
                .route(web::put().to(listings::update_listing))
                .route(web::delete().to(listings::delete_listing)),
        )
        .route("/uploads/{filename}", web::get().to(uploads::serve_upload))
        .route("/signup", web::post().to(users::signup))
        .route("/users", web::get().to(users::list_users))
        .route("/login", web::post().to(users::login));
}
