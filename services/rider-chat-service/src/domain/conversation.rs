// Domain model untuk Conversation
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::message::Message;

/// Teks pengganti ketika pesan terakhir tidak punya isi.
pub const NO_MESSAGES_PLACEHOLDER: &str = "No messages yet";

/// Record conversation di `chats/{conversation_id}`.
///
/// `users` adalah participant set (user id -> presence flag) dan `messages`
/// di-key dengan push key dari store, yang urut secara kronologis. Karena
/// itu iterasi `BTreeMap` mengikuti urutan insert.
///
/// Record hanya ditolak kalau `users` bukan object. Flag participant dibaca
/// dengan aturan truthy, dan pesan yang rusak tetap terbaca dengan default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Conversation {
    #[serde(default, deserialize_with = "participant_flags")]
    pub users: BTreeMap<String, bool>,
    #[serde(default, deserialize_with = "lenient_messages")]
    pub messages: BTreeMap<String, Message>,
}

// null, false, 0, NaN dan "" dianggap false, selain itu true
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn participant_flags<'de, D>(deserializer: D) -> Result<BTreeMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(BTreeMap::new()),
        Value::Object(users) => Ok(users
            .into_iter()
            .map(|(user_id, flag)| (user_id, is_truthy(&flag)))
            .collect()),
        other => Err(de::Error::custom(format!(
            "users harus object, bukan {}",
            other
        ))),
    }
}

fn lenient_messages<'de, D>(deserializer: D) -> Result<BTreeMap<String, Message>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(messages) => Ok(messages
            .into_iter()
            .map(|(key, message)| (key, Message::from(message)))
            .collect()),
        _ => Ok(BTreeMap::new()),
    }
}

impl Conversation {
    // Membuat conversation baru antara dua user, tanpa pesan
    pub fn between(user_a: &str, user_b: &str) -> Self {
        let mut users = BTreeMap::new();
        users.insert(user_a.to_string(), true);
        users.insert(user_b.to_string(), true);
        Self {
            users,
            messages: BTreeMap::new(),
        }
    }

    // Check apakah user adalah participant (flag harus true)
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.users.get(user_id).copied().unwrap_or(false)
    }

    pub fn includes_pair(&self, user_a: &str, user_b: &str) -> bool {
        self.is_participant(user_a) && self.is_participant(user_b)
    }

    // Get participant lainnya: key pertama yang bukan user ini
    pub fn other_participant_id(&self, current_user_id: &str) -> Option<&str> {
        self.users
            .keys()
            .map(String::as_str)
            .find(|id| *id != current_user_id)
    }

    /// Pesan yang paling terakhir di-append.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.values().next_back()
    }
}

/// Proyeksi read-only dari conversation untuk list "income".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub chat_id: String,
    pub other_user_id: Option<String>,
    pub other_user_name: String,
    pub last_message: String,
}

impl ConversationSummary {
    // Teks pesan terakhir, pakai placeholder kalau kosong
    pub fn last_message_text(message: &Message) -> String {
        if message.text.is_empty() {
            NO_MESSAGES_PLACEHOLDER.to_string()
        } else {
            message.text.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    pub driver_id: String,
}

/// Data yang dibutuhkan layar Message setelah chat di-resolve.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub chat_id: String,
    pub driver_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDetailResponse {
    pub chat_id: String,
    pub chat_data: Conversation,
}
