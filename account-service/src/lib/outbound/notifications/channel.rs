use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::token::models::WarningMessage;
use crate::domain::token::ports::NotificationSink;
use crate::token::errors::NotificationError;

#[derive(Debug, Clone)]
pub struct DeliveredNotification {
    pub destination: String,
    pub message: WarningMessage,
}

/// Sink that forwards every alert to an in-process receiver.
pub struct ChannelNotificationSink {
    sender: mpsc::UnboundedSender<DeliveredNotification>,
}

impl ChannelNotificationSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DeliveredNotification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl NotificationSink for ChannelNotificationSink {
    async fn notify(
        &self,
        destination: &str,
        message: &WarningMessage,
    ) -> Result<(), NotificationError> {
        self.sender
            .send(DeliveredNotification {
                destination: destination.to_string(),
                message: message.clone(),
            })
            .map_err(|_| NotificationError::ChannelClosed)
    }
}
