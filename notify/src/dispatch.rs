//! Dispatcher contract and the channel-backed implementation.

use crate::Notification;
use tokio::sync::mpsc;

/// Delivers notifications through whatever channel the application provides.
///
/// The signature is infallible on purpose: delivery is attempted once, a
/// failure is logged by the implementation, and no failure ever reaches the
/// operation that produced the notification.
pub trait NotificationDispatcher: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Dispatcher that forwards requests onto an unbounded channel, decoupling
/// delivery from the decision that produced them. The receiving half is
/// drained by the application's delivery task.
pub struct ChannelDispatcher {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelDispatcher {
    /// Create a dispatcher and the receiver the delivery task will drain.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NotificationDispatcher for ChannelDispatcher {
    fn notify(&self, notification: Notification) {
        if let Err(err) = self.sender.send(notification) {
            // Receiver gone; the decision stands, the message is dropped.
            tracing::warn!(user = %err.0.user, title = %err.0.title, "notification dropped: delivery channel closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NotificationKind;
    use podium_types::UserId;

    #[test]
    fn forwards_onto_channel() {
        let (dispatcher, mut receiver) = ChannelDispatcher::pair();
        dispatcher.notify(Notification::claim_approved(
            UserId::new("s1"),
            "Early Bird",
            5,
        ));

        let delivered = receiver.try_recv().unwrap();
        assert_eq!(delivered.user, UserId::new("s1"));
        assert_eq!(delivered.kind, NotificationKind::Success);
        assert!(delivered.message.contains("Early Bird"));
    }

    #[test]
    fn closed_receiver_does_not_panic() {
        let (dispatcher, receiver) = ChannelDispatcher::pair();
        drop(receiver);
        dispatcher.notify(Notification::claim_rejected(
            UserId::new("s1"),
            "Early Bird",
            "no evidence",
        ));
    }
}
