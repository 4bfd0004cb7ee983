//! Durable application log writer.
//!
//! [`LogPersistence`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and appends every received [`AppEvent`] to `application_logs`. It runs as
//! a long-lived background task and exits when the bus sender is dropped.

use intake_core::types::DbId;
use intake_db::models::application_log::CreateApplicationLog;
use intake_db::repositories::ApplicationLogRepo;
use intake_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::AppEvent;

/// Background service that persists application events.
pub struct LogPersistence;

impl LogPersistence {
    /// Run the persistence loop until the channel closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<AppEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            logger_name = %event.logger_name,
                            "Failed to persist application log"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Log persistence lagged, some events were not persisted"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, log persistence shutting down");
                    break;
                }
            }
        }
    }

    /// Write a single event as an `application_logs` row.
    pub async fn persist(pool: &DbPool, event: &AppEvent) -> Result<DbId, sqlx::Error> {
        ApplicationLogRepo::insert(pool, &to_log_entry(event)).await
    }
}

fn to_log_entry(event: &AppEvent) -> CreateApplicationLog {
    CreateApplicationLog {
        message: event.message.clone(),
        logger_name: event.logger_name.clone(),
        interacted_by: event.interacted_by.clone(),
        created_at: event.timestamp,
    }
}
