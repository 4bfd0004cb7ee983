//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`AppEvent`]s. It is shared
//! via `Arc<EventBus>` across the application.

use chrono::Utc;
use intake_core::types::Timestamp;
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// AppEvent
// ---------------------------------------------------------------------------

/// Something worth an application log line.
///
/// Constructed via [`AppEvent::new`] and enriched with
/// [`by`](AppEvent::by) and [`at`](AppEvent::at).
#[derive(Debug, Clone, Serialize)]
pub struct AppEvent {
    /// Area of the application, e.g. `"projects"` or `"auth"`.
    pub logger_name: String,

    /// Free-text description of what happened.
    pub message: String,

    /// Username of whoever triggered the event; empty for anonymous clients.
    pub interacted_by: String,

    /// When the event happened (UTC).
    pub timestamp: Timestamp,
}

impl AppEvent {
    /// Create an anonymous event stamped with the current wall-clock time.
    pub fn new(logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            logger_name: logger_name.into(),
            message: message.into(),
            interacted_by: String::new(),
            timestamp: Utc::now(),
        }
    }

    /// Record who triggered the event.
    pub fn by(mut self, username: impl Into<String>) -> Self {
        self.interacted_by = username.into();
        self
    }

    /// Override the event time (use the injected clock in handlers).
    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use intake_events::bus::{AppEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(AppEvent::new("projects", "Project #1 submitted"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: AppEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
