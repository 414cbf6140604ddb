//! Event bus and notification fan-out for trip availability planning.
//!
//! - [`EventBus`] is the in-process publish/subscribe hub, backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] is the event envelope.
//! - [`EventPersistence`] is a background service that writes every event
//!   to the `events` table.
//! - [`ResultNotifier`] tells members about new results without blocking
//!   the request that produced them.

pub mod bus;
pub mod delivery;
pub mod notifier;
pub mod persistence;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::{DbNotificationSink, DeliveryError, NotificationSink, OutgoingNotification};
pub use notifier::{DeliveryReport, ResultNotifier, SubmissionNotice};
pub use persistence::EventPersistence;
