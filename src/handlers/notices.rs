use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::check_auth;
use crate::models::{DiscountType, Notice};
use crate::state::AppState;

// GET /api/notices
#[derive(Deserialize)]
pub struct NoticesQuery {
    pub active: Option<bool>,
}

/// `?active=true` is what the public site polls: the notice only when it is
/// live right now, `null` otherwise. Without the flag the raw record comes
/// back for the admin editor.
pub async fn get_notice(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NoticesQuery>,
) -> Result<Json<Option<Notice>>, AppError> {
    let notice = {
        let db = state.db.lock().unwrap();
        queries::get_notice(&db)?
    };

    let notice = match query.active {
        Some(true) => notice.filter(|n| n.is_live(state.config.local_now())),
        _ => notice,
    };

    Ok(Json(notice))
}

// POST /api/notices
#[derive(Deserialize)]
pub struct SaveNoticeRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_active: bool,
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: i64,
    #[serde(default)]
    pub discount_threshold: i64,
    pub discount_code: Option<String>,
    pub expires_at: Option<NaiveDateTime>,
}

pub async fn save_notice(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<SaveNoticeRequest>,
) -> Result<Json<Notice>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    if body.discount_value < 0 || body.discount_threshold < 0 {
        return Err(AppError::Validation(
            "discount amounts must not be negative".to_string(),
        ));
    }

    let notice = Notice {
        id: Notice::ACTIVE_ID.to_string(),
        message: body.message,
        is_active: body.is_active,
        discount_type: body.discount_type,
        discount_value: body.discount_value,
        discount_threshold: body.discount_threshold,
        discount_code: body.discount_code,
        expires_at: body.expires_at,
    };

    {
        let db = state.db.lock().unwrap();
        queries::upsert_notice(&db, &notice)?;
    }

    Ok(Json(notice))
}

// DELETE /api/notices
pub async fn delete_notice(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let removed = {
        let db = state.db.lock().unwrap();
        queries::delete_notice(&db)?
    };

    if removed {
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound("no notice to delete".to_string()))
    }
}
