use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::check_auth;
use crate::models::{parse_clock, AvailabilitySlot};
use crate::services::slots;
use crate::state::AppState;

// GET /api/availability
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Without filters this is the raw slot table. With a location it answers
/// "which days can I come in"; with a location and a date it answers "which
/// windows are left today", same-day cutoff applied.
pub async fn list_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let all = {
        let db = state.db.lock().unwrap();
        queries::list_slots(&db)?
    };

    let Some(location) = query.location else {
        return Ok(Json(serde_json::json!({ "slots": all })));
    };

    let now = state.config.local_now();

    match query.date {
        None => {
            let dates = slots::dates_for_location(&all, &location, now.date());
            let open = slots::slots_for_location(&all, &location);
            Ok(Json(serde_json::json!({ "dates": dates, "slots": open })))
        }
        Some(date) => {
            let open: Vec<serde_json::Value> = slots::slots_for_date(&all, &location, date, now)
                .into_iter()
                .map(|slot| {
                    serde_json::json!({
                        "slot": slot,
                        "windows": slots::thirty_minute_windows(&slot.start_time, &slot.end_time),
                    })
                })
                .collect();
            Ok(Json(serde_json::json!({ "slots": open })))
        }
    }
}

// POST /api/availability
#[derive(Deserialize)]
pub struct CreateSlotRequest {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
}

pub async fn create_slot(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateSlotRequest>,
) -> Result<(StatusCode, Json<AvailabilitySlot>), AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let start = parse_clock(&body.start_time)
        .ok_or_else(|| AppError::Validation(format!("invalid start time: {}", body.start_time)))?;
    let end = parse_clock(&body.end_time)
        .ok_or_else(|| AppError::Validation(format!("invalid end time: {}", body.end_time)))?;
    if end <= start {
        return Err(AppError::Validation(
            "slot must end after it starts".to_string(),
        ));
    }
    if body.location.trim().is_empty() {
        return Err(AppError::Validation("location is required".to_string()));
    }

    let slot = AvailabilitySlot {
        id: Uuid::new_v4().to_string(),
        date: body.date,
        start_time: body.start_time,
        end_time: body.end_time,
        location: body.location,
        available: true,
    };

    {
        let db = state.db.lock().unwrap();
        queries::insert_slot(&db, &slot)?;
    }

    Ok((StatusCode::CREATED, Json(slot)))
}

// DELETE /api/availability/:id
pub async fn delete_slot(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let removed = {
        let db = state.db.lock().unwrap();
        queries::delete_slot(&db, &id)?
    };

    if removed {
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound("slot not found".to_string()))
    }
}

// DELETE /api/availability (bulk cleanup of past days)
pub async fn cleanup_past_slots(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let today = state.config.local_now().date();
    let deleted = {
        let db = state.db.lock().unwrap();
        queries::delete_past_slots(&db, today)?
    };

    tracing::info!(deleted, "cleaned up past availability slots");
    Ok(Json(serde_json::json!({ "ok": true, "deleted": deleted })))
}
