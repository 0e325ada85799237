//! Notification side effects of the claim workflow.
//!
//! The verification engine hands fully-formed [`Notification`] requests to a
//! [`NotificationDispatcher`] after the state transition has committed.
//! Delivery is attempted once and is never part of the operation's result:
//! the source of truth is the claim/achievement pair, not the notification.

mod dispatch;
mod message;

pub use dispatch::{ChannelDispatcher, NotificationDispatcher};
pub use message::{Notification, NotificationKind};
