use anyhow::Context;
use async_trait::async_trait;

use super::{BookingNotification, Notifier};

/// Posts new-booking notifications to a configured webhook (the shop wires
/// this to its mail automation). With no URL configured it does nothing.
pub struct WebhookNotifier {
    url: Option<String>,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn booking_created(&self, notification: &BookingNotification) -> anyhow::Result<()> {
        let Some(url) = &self.url else {
            tracing::debug!(
                booking_number = %notification.booking_number,
                "no booking webhook configured, skipping notification"
            );
            return Ok(());
        };

        self.client
            .post(url)
            .json(notification)
            .send()
            .await
            .context("failed to reach booking webhook")?
            .error_for_status()
            .context("booking webhook returned error")?;

        Ok(())
    }
}
