pub mod webhook;

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BookingNotification {
    pub booking_number: String,
    pub full_name: String,
    pub email: String,
    pub turnaround: String,
    pub total_cents: i64,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn booking_created(&self, notification: &BookingNotification) -> anyhow::Result<()>;
}
