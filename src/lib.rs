pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/auth/verify", post(handlers::auth::verify))
        .route(
            "/api/bookings",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route(
            "/api/bookings/:id",
            get(handlers::bookings::get_booking)
                .put(handlers::bookings::update_booking)
                .patch(handlers::bookings::update_booking)
                .delete(handlers::bookings::delete_booking),
        )
        .route(
            "/api/strings",
            get(handlers::strings::list_strings).post(handlers::strings::create_string),
        )
        .route("/api/strings/catalog", get(handlers::strings::catalog))
        .route(
            "/api/strings/:id",
            get(handlers::strings::get_string)
                .put(handlers::strings::update_string)
                .delete(handlers::strings::delete_string),
        )
        .route(
            "/api/availability",
            get(handlers::availability::list_availability)
                .post(handlers::availability::create_slot)
                .delete(handlers::availability::cleanup_past_slots),
        )
        .route(
            "/api/availability/:id",
            delete(handlers::availability::delete_slot),
        )
        .route(
            "/api/notices",
            get(handlers::notices::get_notice)
                .post(handlers::notices::save_notice)
                .delete(handlers::notices::delete_notice),
        )
        .route("/api/seed", post(handlers::seed::reseed))
        .with_state(state)
}
