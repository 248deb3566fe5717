use anyhow::Context;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::queries;
use crate::models::{Booking, BookingStatus, PaymentStatus, RacketLineItem, Turnaround};
use crate::services::pricing::{price_booking, PriceBreakdown, PriceInputs};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub rackets: Vec<RacketLineItem>,
    pub turnaround: Turnaround,
    #[serde(default)]
    pub own_string: bool,
    #[serde(default)]
    pub grommet_replacement: bool,
    pub dropoff_location: String,
    pub dropoff_slot_id: Option<String>,
    pub dropoff_time: Option<String>,
    pub pickup_location: String,
    pub pickup_slot_id: Option<String>,
    pub pickup_time: Option<String>,
    pub notes: Option<String>,
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub agree_to_terms: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedBooking {
    pub id: String,
    pub booking_number: String,
    pub email: String,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(String),

    #[error("{name} ({color}) is not available in the requested quantity")]
    OutOfStock { name: String, color: String },

    #[error("the selected {0} slot was just taken, please pick another")]
    SlotTaken(&'static str),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

fn validate(req: &CreateBookingRequest) -> Result<(), SubmitError> {
    if req.full_name.trim().is_empty() {
        return Err(SubmitError::Invalid("full name is required".to_string()));
    }
    if req.email.trim().is_empty() {
        return Err(SubmitError::Invalid("email is required".to_string()));
    }
    if req.rackets.is_empty() {
        return Err(SubmitError::Invalid(
            "at least one racket is required".to_string(),
        ));
    }
    if req.rackets.iter().any(|r| r.quantity < 1) {
        return Err(SubmitError::Invalid(
            "racket quantity must be at least 1".to_string(),
        ));
    }
    if !req.agree_to_terms {
        return Err(SubmitError::Invalid(
            "the terms of service must be accepted".to_string(),
        ));
    }
    Ok(())
}

/// Create a booking: price it, then reserve stock and slots and insert the
/// row inside one transaction. Either everything is written or nothing is;
/// a stock or slot conflict rolls the whole submission back.
pub fn submit(
    conn: &mut Connection,
    req: &CreateBookingRequest,
    now: NaiveDateTime,
) -> Result<CreatedBooking, SubmitError> {
    validate(req)?;

    let notice = queries::get_notice(conn)?.filter(|n| n.is_live(now));
    let discount = notice.as_ref();
    let coupon = match (&req.coupon_code, notice.as_ref()) {
        (Some(code), Some(n)) if n.matches_code(code) => Some(n),
        _ => None,
    };

    let breakdown = price_booking(&PriceInputs {
        rackets: &req.rackets,
        turnaround: req.turnaround,
        own_string: req.own_string,
        grommet_replacement: req.grommet_replacement,
        dropoff_location: &req.dropoff_location,
        pickup_location: &req.pickup_location,
        discount,
        coupon,
    });

    let tx = conn
        .transaction()
        .context("failed to begin booking transaction")?;

    for racket in &req.rackets {
        let taken = queries::decrement_string_stock(
            &tx,
            &racket.string_name,
            &racket.string_color,
            racket.quantity,
        )?;
        if !taken {
            return Err(SubmitError::OutOfStock {
                name: racket.string_name.clone(),
                color: racket.string_color.clone(),
            });
        }
    }

    for (slot_id, endpoint) in [
        (&req.dropoff_slot_id, "drop-off"),
        (&req.pickup_slot_id, "pickup"),
    ] {
        if let Some(id) = slot_id {
            if !queries::consume_slot(&tx, id)? {
                return Err(SubmitError::SlotTaken(endpoint));
            }
        }
    }

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        booking_number: new_booking_number(),
        full_name: req.full_name.trim().to_string(),
        email: req.email.trim().to_string(),
        phone: req.phone.clone(),
        rackets: req.rackets.clone(),
        turnaround: req.turnaround,
        own_string: req.own_string,
        grommet_replacement: req.grommet_replacement,
        dropoff_location: req.dropoff_location.clone(),
        dropoff_time: req.dropoff_time.clone(),
        pickup_location: req.pickup_location.clone(),
        pickup_time: req.pickup_time.clone(),
        notes: req.notes.clone(),
        status: BookingStatus::Pending,
        payment_status: PaymentStatus::Pending,
        agree_to_terms: req.agree_to_terms,
        quoted_total_cents: breakdown.total_cents,
        created_at: now,
        updated_at: now,
    };

    queries::insert_booking(&tx, &booking)?;
    tx.commit().context("failed to commit booking")?;

    Ok(CreatedBooking {
        id: booking.id,
        booking_number: booking.booking_number,
        email: booking.email,
        breakdown,
    })
}

fn new_booking_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("RS-{}", id[..8].to_uppercase())
}
