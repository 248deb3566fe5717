use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::StringType;

/// One racket on a booking, paired with the string job requested for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RacketLineItem {
    pub racket_type: StringType,
    pub string_name: String,
    pub string_color: String,
    pub string_tension: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub booking_number: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub rackets: Vec<RacketLineItem>,
    pub turnaround: Turnaround,
    pub own_string: bool,
    pub grommet_replacement: bool,
    pub dropoff_location: String,
    pub dropoff_time: Option<String>,
    pub pickup_location: String,
    pub pickup_time: Option<String>,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub agree_to_terms: bool,
    pub quoted_total_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Turnaround {
    SameDay,
    NextDay,
    ThreeToFiveDays,
}

impl Turnaround {
    pub fn as_str(&self) -> &'static str {
        match self {
            Turnaround::SameDay => "same_day",
            Turnaround::NextDay => "next_day",
            Turnaround::ThreeToFiveDays => "three_to_five_days",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "same_day" => Turnaround::SameDay,
            "next_day" => Turnaround::NextDay,
            _ => Turnaround::ThreeToFiveDays,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "in_progress" => BookingStatus::InProgress,
            "completed" => BookingStatus::Completed,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "paid" => PaymentStatus::Paid,
            _ => PaymentStatus::Pending,
        }
    }
}
