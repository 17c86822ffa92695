use async_trait::async_trait;

use crate::domain::token::models::WarningMessage;
use crate::domain::token::ports::NotificationSink;
use crate::token::errors::NotificationError;

/// Sink that records alerts in the service log instead of sending mail.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationSink;

impl LogNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn notify(
        &self,
        destination: &str,
        message: &WarningMessage,
    ) -> Result<(), NotificationError> {
        tracing::warn!(
            destination = %destination,
            subject = %message.subject,
            body = %message.body,
            "Security notification"
        );
        Ok(())
    }
}
