use thiserror::Error;

/// Error for client address parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Expected ip:port, got {0}")]
    InvalidFormat(String),
}

/// Error for token lifetime configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenLifetimeError {
    #[error("{0} token lifetime must be greater than zero")]
    NotPositive(&'static str),

    #[error("{0} token lifetime exceeds the maximum of {1} days")]
    TooLong(&'static str, i64),
}

/// Error for outbound notification delivery
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Failed to deliver notification: {0}")]
    DeliveryFailed(String),

    #[error("Notification channel closed")]
    ChannelClosed,
}
