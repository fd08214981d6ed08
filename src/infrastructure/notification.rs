use super::console::ConsoleRef;
use crate::domain::ports::Notification;
use crate::error::NotificationError;
use async_trait::async_trait;

fn deliver(console: &ConsoleRef, channel: &str, message: &str) -> Result<(), NotificationError> {
    console
        .write_line(&format!("sending {channel}:{message}"))
        .map_err(|e| NotificationError::Transient(e.to_string()))
}

pub struct EmailNotification {
    console: ConsoleRef,
}

impl EmailNotification {
    /// Creates a new email channel reporting through `console`.
    pub fn new(console: ConsoleRef) -> Self {
        Self { console }
    }
}

#[async_trait]
impl Notification for EmailNotification {
    async fn notify_customer(&self, message: &str) -> Result<(), NotificationError> {
        deliver(&self.console, "email", message)
    }
}

pub struct SmsNotification {
    console: ConsoleRef,
}

impl SmsNotification {
    /// Creates a new SMS channel reporting through `console`.
    pub fn new(console: ConsoleRef) -> Self {
        Self { console }
    }
}

#[async_trait]
impl Notification for SmsNotification {
    async fn notify_customer(&self, message: &str) -> Result<(), NotificationError> {
        deliver(&self.console, "sms", message)
    }
}
