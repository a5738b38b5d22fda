// Repository untuk Conversation operations
use serde_json::Value;
use shared::utils::validation::{is_valid_store_key, participant_pair_key};
use std::sync::Arc;

use crate::domain::Conversation;
use crate::store::{DocumentStore, StoreError};

pub const CHATS_COLLECTION: &str = "chats";
pub const CHAT_INDEX_COLLECTION: &str = "chatIndex";

// Repository untuk conversation di document store
#[derive(Clone)]
pub struct ConversationRepository {
    store: Arc<dyn DocumentStore>,
}

impl ConversationRepository {
    // membuat new conversation repository
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Snapshot semua conversation dalam urutan iterasi store.
    ///
    /// Record yang tidak bisa di-parse di-skip (dengan warning) supaya satu
    /// record rusak tidak menggagalkan seluruh operasi.
    pub async fn list_all(&self) -> Result<Vec<(String, Conversation)>, StoreError> {
        let documents = self.store.get_all(CHATS_COLLECTION).await?;

        let mut conversations = Vec::with_capacity(documents.len());
        for (conversation_id, document) in documents {
            match serde_json::from_value::<Conversation>(document) {
                Ok(conversation) => conversations.push((conversation_id, conversation)),
                Err(e) => {
                    tracing::warn!("Skip malformed conversation {}: {}", conversation_id, e);
                }
            }
        }

        Ok(conversations)
    }

    // Get conversation by ID
    pub async fn get(&self, conversation_id: &str) -> Result<Option<Conversation>, StoreError> {
        let path = format!("{}/{}", CHATS_COLLECTION, conversation_id);

        match self.store.get_one(&path).await? {
            None => Ok(None),
            Some(document) => serde_json::from_value(document).map(Some).map_err(|e| {
                StoreError::Malformed(format!("conversation {}: {}", conversation_id, e))
            }),
        }
    }

    // membuat conversation baru dengan dua participant dan tanpa pesan
    pub async fn create(&self, user_a: &str, user_b: &str) -> Result<String, StoreError> {
        let document = serde_json::to_value(Conversation::between(user_a, user_b))
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        self.store.create_under(CHATS_COLLECTION, document).await
    }

    /// Lookup conversation id lewat index participant pair.
    ///
    /// Hasilnya hanya kandidat: caller tetap harus memastikan conversation
    /// tersebut masih ada dan berisi kedua user.
    pub async fn find_indexed(&self, user_a: &str, user_b: &str) -> Result<Option<String>, StoreError> {
        let Some(path) = index_path(user_a, user_b) else {
            return Ok(None);
        };

        match self.store.get_one(&path).await? {
            Some(Value::String(conversation_id)) => Ok(Some(conversation_id)),
            Some(other) => {
                tracing::warn!("Index {} berisi value yang tidak valid: {}", path, other);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    // Simpan index participant pair -> conversation id
    pub async fn write_index(
        &self,
        user_a: &str,
        user_b: &str,
        conversation_id: &str,
    ) -> Result<(), StoreError> {
        let Some(path) = index_path(user_a, user_b) else {
            tracing::debug!("Pair key terlalu panjang untuk index, skip");
            return Ok(());
        };

        self.store
            .set(&path, Value::String(conversation_id.to_string()))
            .await
    }
}

// Pair key bisa melewati batas panjang key walaupun tiap user id valid
fn index_path(user_a: &str, user_b: &str) -> Option<String> {
    let key = participant_pair_key(user_a, user_b);
    is_valid_store_key(&key).then(|| format!("{}/{}", CHAT_INDEX_COLLECTION, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn repo_with(data: Value) -> (ConversationRepository, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_data(data));
        (ConversationRepository::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_list_all_skips_only_records_without_participant_map() {
        let (repo, _) = repo_with(json!({
            "chats": {
                "c1": { "users": { "u1": true, "u2": true } },
                "c2": { "users": "not-a-map" },
                "c3": { "users": { "u1": true, "u3": true }, "messages": {} },
                "c4": {
                    "users": { "u1": 1, "u4": "yes" },
                    "messages": { "m1": { "text": 5, "timestamp": "kemarin" } }
                }
            }
        }));

        let conversations = repo.list_all().await.unwrap();
        let ids: Vec<&str> = conversations.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3", "c4"]);

        let (_, c4) = &conversations[2];
        assert!(c4.includes_pair("u1", "u4"));
        assert_eq!(c4.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_and_malformed() {
        let (repo, _) = repo_with(json!({ "chats": { "bad": { "users": "u1" } } }));

        assert!(repo.get("nope").await.unwrap().is_none());
        assert!(matches!(repo.get("bad").await, Err(StoreError::Malformed(_))));
        assert!(matches!(repo.get("a.b").await, Err(StoreError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_create_writes_expected_document() {
        let (repo, store) = repo_with(json!({}));

        let conversation_id = repo.create("u3", "u4").await.unwrap();
        let document = store
            .get_one(&format!("chats/{}", conversation_id))
            .await
            .unwrap();

        assert_eq!(
            document,
            Some(json!({ "users": { "u3": true, "u4": true }, "messages": {} }))
        );
    }

    #[tokio::test]
    async fn test_index_round_trip_is_order_independent() {
        let (repo, store) = repo_with(json!({}));

        assert_eq!(repo.find_indexed("u1", "u2").await.unwrap(), None);
        repo.write_index("u2", "u1", "c9").await.unwrap();

        assert_eq!(
            repo.find_indexed("u1", "u2").await.unwrap(),
            Some("c9".to_string())
        );
        assert_eq!(
            store.get_one("chatIndex/2_u1_u2").await.unwrap(),
            Some(json!("c9"))
        );
    }

    #[tokio::test]
    async fn test_non_string_index_entry_is_ignored() {
        let (repo, _) = repo_with(json!({ "chatIndex": { "2_u1_u2": { "oops": true } } }));
        assert_eq!(repo.find_indexed("u1", "u2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_oversized_pair_key_skips_index() {
        let (repo, store) = repo_with(json!({}));
        let long_a = "a".repeat(500);
        let long_b = "b".repeat(500);

        repo.write_index(&long_a, &long_b, "c1").await.unwrap();
        assert_eq!(repo.find_indexed(&long_a, &long_b).await.unwrap(), None);
        assert!(store.get_all("chatIndex").await.unwrap().is_empty());
    }
}
