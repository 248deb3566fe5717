pub mod auth;
pub mod availability;
pub mod bookings;
pub mod health;
pub mod notices;
pub mod seed;
pub mod strings;

use axum::http::HeaderMap;

use crate::errors::AppError;

/// Bearer-token gate for the admin surface. Public routes never call this.
pub fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() || token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}
