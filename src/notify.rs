//! User-visible notifications ("toasts") on a `tokio::sync::broadcast` bus.
//!
//! Pages receive a [`Notifier`] when they are constructed and publish to it;
//! whatever renders notifications subscribes independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    /// Validation failures and declines
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
            created_at: Utc::now(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: NotificationVariant::Destructive,
            ..Self::new(title, description)
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// Publish side of the notification bus. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Notifier {
    /// When the buffer is full the oldest notifications are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers; dropped silently when nobody listens.
    pub fn publish(&self, notification: Notification) {
        match notification.variant {
            NotificationVariant::Default => tracing::info!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
            NotificationVariant::Destructive => tracing::warn!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
        }
        let _ = self.sender.send(notification);
    }

    pub fn notify(&self, title: impl Into<String>, description: impl Into<String>) {
        self.publish(Notification::new(title, description));
    }

    pub fn warn(&self, title: impl Into<String>, description: impl Into<String>) {
        self.publish(Notification::destructive(title, description));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Collect every notification already queued on `rx` without waiting.
pub fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    let mut received = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(notification) => received.push(notification),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped = skipped, "Notification receiver lagged");
            }
            Err(_) => break,
        }
    }
    received
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let notifier = Notifier::default();
        assert_eq!(notifier.subscriber_count(), 0);
        notifier.notify("OTP Sent", "Verification code sent");
    }

    #[test]
    fn test_every_subscriber_receives_in_order() {
        let notifier = Notifier::default();
        let mut first = notifier.subscribe();
        let mut second = notifier.clone().subscribe();

        notifier.notify("Job Accepted", "You accepted Priya Sharma's request");
        notifier.warn("Job Declined", "The request has been declined");

        for rx in [&mut first, &mut second] {
            let received = drain(rx);
            assert_eq!(received.len(), 2);
            assert_eq!(received[0].title, "Job Accepted");
            assert!(!received[0].is_destructive());
            assert!(received[1].is_destructive());
        }
    }

    #[test]
    fn test_lagging_receiver_keeps_latest() {
        let notifier = Notifier::new(2);
        let mut rx = notifier.subscribe();
        for i in 0..5 {
            notifier.notify(format!("n{i}"), "");
        }
        let titles: Vec<_> = drain(&mut rx).into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["n3", "n4"]);
    }
}
