//! Notification subsystem
//!
//! A single message slot with an optional auto-dismiss timer. Posting a new
//! message or dismissing aborts the pending timer first, and a timer only
//! ever clears the message it was scheduled for.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Kind of the visible message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    #[default]
    None,
    Success,
    Error,
}

/// Whether a message clears itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Expiry {
    /// Cleared after the configured delay
    AutoDismiss,
    /// Stays until replaced or dismissed
    #[default]
    Persistent,
}

/// The message currently in the slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    pub expiry: Expiry,
    serial: u64,
}

impl Notification {
    /// The empty slot
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether anything is shown
    pub fn is_visible(&self) -> bool {
        self.kind != NotificationKind::None
    }
}

/// Owner of the notification slot and its expiry timer
#[derive(Debug)]
pub struct Notifier {
    slot: Arc<watch::Sender<Notification>>,
    ttl: Duration,
    serial: u64,
    expiry: Option<JoinHandle<()>>,
}

impl Notifier {
    /// Create an empty slot whose auto-dismiss delay is `ttl`
    pub fn new(ttl: Duration) -> Self {
        let (sender, _) = watch::channel(Notification::none());
        Self {
            slot: Arc::new(sender),
            ttl,
            serial: 0,
            expiry: None,
        }
    }

    /// The visible message
    pub fn current(&self) -> Notification {
        self.slot.borrow().clone()
    }

    /// Observe the slot
    pub fn subscribe(&self) -> watch::Receiver<Notification> {
        self.slot.subscribe()
    }

    /// Replace the visible message
    ///
    /// Must be called within a Tokio runtime when `auto_expire` is set.
    pub fn notify(&mut self, kind: NotificationKind, text: impl Into<String>, auto_expire: bool) {
        self.cancel_expiry();

        self.serial += 1;
        let serial = self.serial;
        let expiry = if auto_expire {
            Expiry::AutoDismiss
        } else {
            Expiry::Persistent
        };

        let notification = Notification {
            kind,
            text: text.into(),
            expiry,
            serial,
        };
        debug!(?kind, ?expiry, text = %notification.text, "Notification posted");
        self.slot.send_replace(notification);

        if auto_expire {
            let slot = Arc::clone(&self.slot);
            let ttl = self.ttl;
            self.expiry = Some(tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                slot.send_if_modified(|current| {
                    if current.serial != serial {
                        return false;
                    }
                    *current = Notification::none();
                    true
                });
            }));
        }
    }

    /// Post a success message
    pub fn success(&mut self, text: impl Into<String>, auto_expire: bool) {
        self.notify(NotificationKind::Success, text, auto_expire);
    }

    /// Post an error message
    pub fn error(&mut self, text: impl Into<String>, auto_expire: bool) {
        self.notify(NotificationKind::Error, text, auto_expire);
    }

    /// Clear the message now
    pub fn dismiss(&mut self) {
        self.cancel_expiry();
        self.slot.send_replace(Notification::none());
    }

    fn cancel_expiry(&mut self) {
        if let Some(handle) = self.expiry.take() {
            handle.abort();
        }
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        self.cancel_expiry();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const TTL: Duration = Duration::from_secs(15);

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_after_ttl() {
        let mut notifier = Notifier::new(TTL);
        notifier.success("saved", true);

        sleep(Duration::from_secs(14)).await;
        assert_eq!(notifier.current().text, "saved");
        assert_eq!(notifier.current().expiry, Expiry::AutoDismiss);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(notifier.current(), Notification::none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistent_message_stays() {
        let mut notifier = Notifier::new(TTL);
        notifier.error("no results", false);

        sleep(Duration::from_secs(120)).await;
        let current = notifier.current();
        assert_eq!(current.kind, NotificationKind::Error);
        assert_eq!(current.expiry, Expiry::Persistent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_message_cancels_previous_timer() {
        let mut notifier = Notifier::new(TTL);
        notifier.success("A", true);

        sleep(Duration::from_secs(10)).await;
        notifier.error("B", true);

        // A's timer would have fired at t=15
        sleep(Duration::from_secs(6)).await;
        assert_eq!(notifier.current().text, "B");
        assert_eq!(notifier.current().kind, NotificationKind::Error);

        // B's own timer fires at t=25
        sleep(Duration::from_secs(10)).await;
        assert!(!notifier.current().is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistent_replacement_is_not_cleared_by_old_timer() {
        let mut notifier = Notifier::new(TTL);
        notifier.success("A", true);
        notifier.error("B", false);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(notifier.current().text, "B");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_clears_and_cancels() {
        let mut notifier = Notifier::new(TTL);
        let receiver = notifier.subscribe();
        notifier.success("A", true);
        assert!(receiver.borrow().is_visible());

        notifier.dismiss();
        assert!(!receiver.borrow().is_visible());

        sleep(Duration::from_secs(20)).await;
        assert_eq!(notifier.current(), Notification::none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_a_never_reappears() {
        let mut notifier = Notifier::new(TTL);
        let mut receiver = notifier.subscribe();

        notifier.success("A", true);
        notifier.error("B", true);
        receiver.borrow_and_update();

        let mut seen = Vec::new();
        let watcher = tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                seen.push(receiver.borrow_and_update().text.clone());
            }
            seen
        });

        sleep(Duration::from_secs(20)).await;
        drop(notifier);

        let seen = watcher.await.unwrap();
        assert_eq!(seen, vec![String::new()]);
    }
}
