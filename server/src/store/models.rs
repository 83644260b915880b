//! Store Models
//!
//! Normalized field sets supplied by the core for upserts, plus the
//! dashboard stats aggregate.

use serde::Serialize;
use serde_json::Value;

/// Field set for a contact upsert, keyed by the gateway contact id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub whatsapp_id: String,
    pub name: Option<String>,
    pub pushname: Option<String>,
    /// "individual" or "group", as reported by the gateway.
    pub kind: String,
    pub image: Option<String>,
}

/// Field set for a message upsert, keyed by the gateway message id.
///
/// `sender` is the literal `"me"` for outbound traffic; the counterparty
/// is whichever side is not `"me"`.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    pub whatsapp_id: String,
    pub sender: String,
    pub recipient: String,
    pub kind: String,
    pub content: Value,
    pub timestamp: i64,
}

/// Dashboard counters aggregated over the mirrored traffic.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Stats {
    pub total_messages: i64,
    pub active_chats: i64,
    /// Chats whose most recent message is inbound.
    pub pending_responses: i64,
    /// Message counts per message type.
    pub message_types: Value,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_messages: 0,
            active_chats: 0,
            pending_responses: 0,
            message_types: Value::Object(serde_json::Map::new()),
        }
    }
}
