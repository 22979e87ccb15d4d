//! # RecycleHub API Server
//!
//! Actix-web application for the RecycleHub marketplace. The binary in
//! `main.rs` and the integration tests build the app through [`configure_app`].

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

use actix_web::web;

use state::AppState;

/// Register state, extractor configs and routes on an `App`.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(middleware::error::json_config())
            .app_data(middleware::error::query_config());
        handlers::configure_routes(cfg);
    }
}
