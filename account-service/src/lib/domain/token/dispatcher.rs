use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::token::models::WarningMessage;
use crate::domain::token::ports::NotificationSink;

#[derive(Debug)]
struct Notification {
    destination: String,
    message: WarningMessage,
}

/// Fire-and-forget front of a `NotificationSink`.
///
/// `dispatch` only enqueues; a background task owns the sink, delivers in
/// order and logs failures. Callers never wait for or observe delivery.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    sender: mpsc::UnboundedSender<Notification>,
}

impl NotificationDispatcher {
    /// Start the delivery task on the current tokio runtime.
    ///
    /// The task stops once every dispatcher clone has been dropped.
    pub fn spawn<NS>(sink: Arc<NS>) -> Self
    where
        NS: NotificationSink + ?Sized,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Notification>();

        tokio::spawn(async move {
            while let Some(notification) = receiver.recv().await {
                match sink
                    .notify(&notification.destination, &notification.message)
                    .await
                {
                    Ok(()) => tracing::debug!(
                        destination = %notification.destination,
                        subject = %notification.message.subject,
                        "Notification delivered"
                    ),
                    Err(e) => tracing::error!(
                        destination = %notification.destination,
                        error = %e,
                        "Failed to deliver notification"
                    ),
                }
            }
            tracing::debug!("Notification dispatcher stopped");
        });

        Self { sender }
    }

    /// Queue `message` for delivery to `destination`.
    pub fn dispatch(&self, destination: impl Into<String>, message: WarningMessage) {
        let notification = Notification {
            destination: destination.into(),
            message,
        };

        if let Err(e) = self.sender.send(notification) {
            tracing::error!(
                destination = %e.0.destination,
                "Notification dropped: dispatcher task is gone"
            );
        }
    }
}
