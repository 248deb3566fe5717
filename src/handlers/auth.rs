use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

// POST /api/auth/verify
#[derive(Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    valid: bool,
}

/// The dashboard asks once at load whether its token is good and carries the
/// answer around explicitly; nothing else reads ambient credentials.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(body): Json<VerifyRequest>,
) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: !body.token.is_empty() && body.token == state.config.admin_token,
    })
}
