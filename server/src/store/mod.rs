//! Persistence Layer
//!
//! Mirrors gateway traffic into `PostgreSQL` for the dashboard. The
//! [`Store`] trait is the narrow interface the webhook dispatcher talks
//! to; tests swap in an in-memory fake.

mod models;
mod pg;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
pub use models::{ContactRecord, MessageRecord, Stats};
pub use pg::PgStore;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A message arrived for a contact that has not been mirrored yet.
    #[error("Contact not found: {0}")]
    ContactNotFound(String),

    /// Database error.
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

/// Narrow persistence interface consumed by the webhook dispatcher and
/// the stats endpoint. Upserts are keyed by gateway identifiers, unique
/// per gateway account.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert or update a mirrored contact.
    async fn upsert_contact(&self, contact: &ContactRecord) -> Result<(), StoreError>;

    /// Insert or update a mirrored message. The counterparty contact
    /// must already be mirrored.
    async fn upsert_message(&self, message: &MessageRecord) -> Result<(), StoreError>;

    /// Aggregate dashboard counters over the mirrored traffic.
    async fn stats(&self) -> Result<Stats, StoreError>;
}

/// Shared store handle held in application state.
pub type DynStore = Arc<dyn Store>;

/// Create `PostgreSQL` connection pool with health configuration.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .min_connections(2)
        .max_connections(10)
        // Prevent hanging requests on pool exhaustion
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .test_before_acquire(true)
        .connect(database_url)
        .await?;

    info!("Connected to PostgreSQL");
    Ok(pool)
}

/// Run database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}
