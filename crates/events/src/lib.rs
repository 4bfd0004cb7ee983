//! Application event hooks.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`AppEvent`] -- one loggable occurrence (who did what, under which logger).
//! - [`LogPersistence`] -- background service that appends every event to
//!   the `application_logs` table.

pub mod bus;
pub mod persistence;

pub use bus::{AppEvent, EventBus};
pub use persistence::LogPersistence;
