// Domain model untuk Message
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Satu pesan di dalam conversation, disimpan di
/// `chats/{conversation_id}/messages/{push_key}`.
///
/// Parsing tidak pernah gagal: tiap field dibaca sendiri-sendiri dan field
/// yang hilang atau tipenya salah jadi default, supaya satu pesan rusak
/// tidak menyembunyikan seluruh conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Message {
    pub sender: String,
    pub text: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        let text_field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        // Timestamp bisa tersimpan sebagai float dari client
        let timestamp = value
            .get("timestamp")
            .and_then(|t| t.as_i64().or_else(|| t.as_f64().map(|f| f as i64)))
            .unwrap_or(0);

        Self {
            sender: text_field("sender"),
            text: text_field("text"),
            timestamp,
        }
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Message::from)
    }
}
