use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::check_auth;
use crate::models::{Booking, BookingStatus, PaymentStatus};
use crate::services::booking::{submit, CreateBookingRequest, CreatedBooking, SubmitError};
use crate::services::notify::BookingNotification;
use crate::state::AppState;

fn submit_error(e: SubmitError) -> AppError {
    match e {
        SubmitError::Invalid(msg) => AppError::Validation(msg),
        SubmitError::Storage(inner) => AppError::Internal(inner),
        conflict => AppError::Conflict(conflict.to_string()),
    }
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreatedBooking>), AppError> {
    let now = state.config.local_now();

    let created = {
        let mut db = state.db.lock().unwrap();
        submit(&mut db, &body, now).map_err(submit_error)?
    };

    // Best effort: a lost notification never fails the booking.
    let notification = BookingNotification {
        booking_number: created.booking_number.clone(),
        full_name: body.full_name.clone(),
        email: created.email.clone(),
        turnaround: body.turnaround.as_str().to_string(),
        total_cents: created.breakdown.total_cents,
    };
    if let Err(e) = state.notifier.booking_created(&notification).await {
        tracing::warn!(
            error = %e,
            booking_number = %created.booking_number,
            "booking notification failed"
        );
    }

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50);
    let bookings = {
        let db = state.db.lock().unwrap();
        queries::list_bookings(&db, query.status.as_deref(), limit)?
    };

    Ok(Json(bookings))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking(&db, &id)?
    };

    booking
        .map(Json)
        .ok_or_else(|| AppError::NotFound("booking not found".to_string()))
}

// PUT/PATCH /api/bookings/:id
#[derive(Deserialize)]
pub struct UpdateBookingRequest {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub dropoff_time: Option<String>,
    pub pickup_location: Option<String>,
    pub pickup_time: Option<String>,
    pub notes: Option<String>,
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let db = state.db.lock().unwrap();

    let mut booking = queries::get_booking(&db, &id)?
        .ok_or_else(|| AppError::NotFound("booking not found".to_string()))?;

    if let Some(status) = body.status {
        booking.status = status;
    }
    if let Some(payment_status) = body.payment_status {
        booking.payment_status = payment_status;
    }
    if let Some(dropoff_time) = body.dropoff_time {
        booking.dropoff_time = Some(dropoff_time);
    }
    if let Some(pickup_location) = body.pickup_location {
        booking.pickup_location = pickup_location;
    }
    if let Some(pickup_time) = body.pickup_time {
        booking.pickup_time = Some(pickup_time);
    }
    if let Some(notes) = body.notes {
        booking.notes = Some(notes);
    }
    booking.updated_at = state.config.local_now();

    queries::save_booking(&db, &booking)?;

    Ok(Json(booking))
}

// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let removed = {
        let db = state.db.lock().unwrap();
        queries::delete_booking(&db, &id)?
    };

    if removed {
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound("booking not found".to_string()))
    }
}
