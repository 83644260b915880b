//! `PostgreSQL` Store
//!
//! Upserts keyed by the gateway's own identifiers so redelivered
//! webhooks overwrite instead of duplicating.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{ContactRecord, MessageRecord, Stats};
use super::{Store, StoreError};

/// `PostgreSQL`-backed [`Store`].
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn upsert_contact(&self, contact: &ContactRecord) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO contacts (whatsapp_id, name, pushname, kind, image)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (whatsapp_id) DO UPDATE
            SET name = EXCLUDED.name,
                pushname = EXCLUDED.pushname,
                kind = EXCLUDED.kind,
                image = EXCLUDED.image,
                updated_at = now()
            ",
        )
        .bind(&contact.whatsapp_id)
        .bind(&contact.name)
        .bind(&contact.pushname)
        .bind(&contact.kind)
        .bind(&contact.image)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upsert_message(&self, message: &MessageRecord) -> Result<(), StoreError> {
        // The counterparty contact must already be mirrored.
        let counterparty = if message.sender == "me" {
            &message.recipient
        } else {
            &message.sender
        };

        let contact: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM contacts WHERE whatsapp_id = $1")
                .bind(counterparty)
                .fetch_optional(&self.pool)
                .await?;
        let (contact_id,) =
            contact.ok_or_else(|| StoreError::ContactNotFound(counterparty.clone()))?;

        sqlx::query(
            r#"
            INSERT INTO messages (whatsapp_id, sender, recipient, kind, content, "timestamp", contact_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (whatsapp_id) DO UPDATE
            SET content = EXCLUDED.content,
                "timestamp" = EXCLUDED."timestamp"
            "#,
        )
        .bind(&message.whatsapp_id)
        .bind(&message.sender)
        .bind(&message.recipient)
        .bind(&message.kind)
        .bind(&message.content)
        .bind(message.timestamp)
        .bind(contact_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn stats(&self) -> Result<Stats, StoreError> {
        let stats = sqlx::query_as::<_, Stats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM messages) AS total_messages,
                (SELECT COUNT(DISTINCT contact_id) FROM messages) AS active_chats,
                (SELECT COUNT(*) FROM (
                    SELECT DISTINCT ON (contact_id) sender
                    FROM messages
                    ORDER BY contact_id, "timestamp" DESC
                ) latest WHERE sender <> 'me') AS pending_responses,
                (SELECT COALESCE(jsonb_object_agg(kind, n), '{}'::jsonb)
                 FROM (SELECT kind, COUNT(*) AS n FROM messages GROUP BY kind) per_kind
                ) AS message_types
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
