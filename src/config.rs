use std::env;

use chrono::{Duration, NaiveDateTime, Utc};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_token: String,
    pub booking_webhook_url: Option<String>,
    /// The shop's wall clock as an offset from UTC; same-day slot cutoffs
    /// are computed against this.
    pub utc_offset_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "restring.db".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            booking_webhook_url: env::var("BOOKING_WEBHOOK_URL").ok().filter(|v| !v.is_empty()),
            utc_offset_minutes: env::var("TIMEZONE_OFFSET_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    pub fn local_now(&self) -> NaiveDateTime {
        (Utc::now() + Duration::minutes(self.utc_offset_minutes)).naive_utc()
    }
}
