use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::db::seed;
use crate::errors::AppError;
use crate::handlers::check_auth;
use crate::state::AppState;

// POST /api/seed
// Wipes strings, availability, and the notice, then loads the demo data set.
// Bookings survive.
pub async fn reseed(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let today = state.config.local_now().date();
    let counts = {
        let db = state.db.lock().unwrap();
        seed::reseed(&db, today)?
    };

    tracing::info!(
        strings = counts.strings,
        slots = counts.slots,
        "reseeded demo data"
    );

    Ok(Json(serde_json::json!({
        "ok": true,
        "strings": counts.strings,
        "slots": counts.slots,
        "notices": counts.notices,
    })))
}
