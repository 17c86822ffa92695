pub mod channel;
pub mod log;

pub use channel::ChannelNotificationSink;
pub use channel::DeliveredNotification;
pub use log::LogNotificationSink;
