use super::{validate_user_id, ChatService};
use crate::error::AppError;
use crate::store::StoreError;

impl ChatService {
    /// Cari conversation antara dua user, atau buat baru kalau belum ada.
    ///
    /// Lookup pertama lewat index participant pair. Kalau index kosong atau
    /// basi, semua conversation di-scan (O(n) terhadap jumlah conversation,
    /// untuk record lama yang belum punya index). Kalau ada lebih dari satu
    /// conversation untuk pasangan yang sama, yang pertama dalam urutan store
    /// yang dipakai.
    pub async fn resolve_or_create_conversation(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<String, AppError> {
        validate_user_id(user_a, "userId")?;
        validate_user_id(user_b, "driverId")?;
        if user_a == user_b {
            return Err(AppError::bad_request(
                "Tidak bisa membuat conversation dengan diri sendiri",
            ));
        }

        let _guard = self.resolve_lock.lock().await;

        if let Some(conversation_id) = self.lookup_indexed(user_a, user_b).await? {
            tracing::debug!(
                "Conversation {} resolved from index for {} and {}",
                conversation_id,
                user_a,
                user_b
            );
            return Ok(conversation_id);
        }

        if let Some(conversation_id) = self.scan_for_pair(user_a, user_b).await? {
            tracing::info!(
                "Existing conversation {} found for {} and {}",
                conversation_id,
                user_a,
                user_b
            );
            self.store_index(user_a, user_b, &conversation_id).await;
            return Ok(conversation_id);
        }

        let conversation_id = self.conversations.create(user_a, user_b).await?;
        tracing::info!(
            "Conversation {} created between {} and {}",
            conversation_id,
            user_a,
            user_b
        );
        self.store_index(user_a, user_b, &conversation_id).await;

        Ok(conversation_id)
    }

    // Index hanya dipercaya kalau conversation-nya masih berisi kedua user
    async fn lookup_indexed(&self, user_a: &str, user_b: &str) -> Result<Option<String>, AppError> {
        let Some(conversation_id) = self.conversations.find_indexed(user_a, user_b).await? else {
            return Ok(None);
        };

        match self.conversations.get(&conversation_id).await {
            Ok(Some(conversation)) if conversation.includes_pair(user_a, user_b) => {
                Ok(Some(conversation_id))
            }
            Ok(_) => {
                tracing::debug!("Stale index entry for conversation {}", conversation_id);
                Ok(None)
            }
            Err(StoreError::Malformed(msg)) | Err(StoreError::InvalidPath(msg)) => {
                tracing::warn!("Index menunjuk record yang tidak valid: {}", msg);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn scan_for_pair(&self, user_a: &str, user_b: &str) -> Result<Option<String>, AppError> {
        let conversations = self.conversations.list_all().await?;

        Ok(conversations
            .into_iter()
            .find(|(_, conversation)| conversation.includes_pair(user_a, user_b))
            .map(|(conversation_id, _)| conversation_id))
    }

    // Gagal menulis index tidak menggagalkan resolve, scan tetap jadi fallback
    async fn store_index(&self, user_a: &str, user_b: &str, conversation_id: &str) {
        if let Err(e) = self
            .conversations
            .write_index(user_a, user_b, conversation_id)
            .await
        {
            tracing::warn!("Gagal menulis index untuk conversation {}: {}", conversation_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{memory_service, DEFAULT_LOOKUP_CONCURRENCY};
    use super::*;
    use crate::store::{DocumentStore, MockDocumentStore};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_creates_once_then_returns_same_key() {
        let (service, store) = memory_service(json!({}));

        let first = service.resolve_or_create_conversation("u1", "u2").await.unwrap();
        let second = service.resolve_or_create_conversation("u1", "u2").await.unwrap();
        let reversed = service.resolve_or_create_conversation("u2", "u1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, reversed);
        assert_eq!(store.get_all("chats").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_new_conversation_document() {
        let (service, store) = memory_service(json!({}));

        let key = service.resolve_or_create_conversation("u3", "u4").await.unwrap();

        assert_eq!(
            store.get_one(&format!("chats/{}", key)).await.unwrap(),
            Some(json!({ "users": { "u3": true, "u4": true }, "messages": {} }))
        );
        assert_eq!(
            store.get_one("chatIndex/2_u3_u4").await.unwrap(),
            Some(json!(key))
        );
    }

    #[tokio::test]
    async fn test_existing_conversation_found_by_scan_and_indexed() {
        let (service, store) = memory_service(json!({
            "chats": {
                "c1": { "users": { "u1": true, "u5": true } },
                "c2": { "users": { "u1": true, "u2": true }, "messages": { "m1": { "text": "hi" } } }
            }
        }));

        let key = service.resolve_or_create_conversation("u2", "u1").await.unwrap();

        assert_eq!(key, "c2");
        assert_eq!(store.get_all("chats").await.unwrap().len(), 2);
        assert_eq!(store.get_one("chatIndex/2_u1_u2").await.unwrap(), Some(json!("c2")));
    }

    #[tokio::test]
    async fn test_malformed_message_does_not_hide_existing_conversation() {
        let (service, store) = memory_service(json!({
            "chats": {
                "c1": {
                    "users": { "u1": true, "u2": true },
                    "messages": { "m1": { "sender": "u2", "text": "hi", "timestamp": "2024-01-01" } }
                },
                "c2": {
                    "users": { "u3": true, "u4": true },
                    "messages": { "m1": { "sender": "u3", "text": 5 } }
                }
            }
        }));

        assert_eq!(service.resolve_or_create_conversation("u1", "u2").await.unwrap(), "c1");
        assert_eq!(service.resolve_or_create_conversation("u4", "u3").await.unwrap(), "c2");
        assert_eq!(store.get_all("chats").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_truthy_participant_flags_match_pair() {
        let (service, store) = memory_service(json!({
            "chats": { "c1": { "users": { "u1": 1, "u2": "true" } } }
        }));

        let key = service.resolve_or_create_conversation("u1", "u2").await.unwrap();

        assert_eq!(key, "c1");
        assert_eq!(store.get_all("chats").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_pairs_first_in_store_order_wins() {
        let (service, _) = memory_service(json!({
            "chats": {
                "-b": { "users": { "u1": true, "u2": true } },
                "-a": { "users": { "u1": true, "u2": true } }
            }
        }));

        let key = service.resolve_or_create_conversation("u1", "u2").await.unwrap();
        assert_eq!(key, "-a");
    }

    #[tokio::test]
    async fn test_false_participant_flag_does_not_match() {
        let (service, store) = memory_service(json!({
            "chats": { "c1": { "users": { "u1": true, "u2": false } } }
        }));

        let key = service.resolve_or_create_conversation("u1", "u2").await.unwrap();

        assert_ne!(key, "c1");
        assert_eq!(store.get_all("chats").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_index_falls_back_and_is_repaired() {
        let (service, store) = memory_service(json!({
            "chatIndex": { "2_u1_u2": "gone" },
            "chats": { "c7": { "users": { "u1": true, "u2": true } } }
        }));

        let key = service.resolve_or_create_conversation("u1", "u2").await.unwrap();

        assert_eq!(key, "c7");
        assert_eq!(store.get_one("chatIndex/2_u1_u2").await.unwrap(), Some(json!("c7")));
    }

    #[tokio::test]
    async fn test_index_pointing_to_other_pair_is_ignored() {
        let (service, _) = memory_service(json!({
            "chatIndex": { "2_u1_u2": "c1" },
            "chats": { "c1": { "users": { "u1": true, "u9": true } } }
        }));

        let key = service.resolve_or_create_conversation("u1", "u2").await.unwrap();
        assert_ne!(key, "c1");
    }

    #[tokio::test]
    async fn test_concurrent_resolves_create_single_conversation() {
        let (service, store) = memory_service(json!({}));

        let (a, b) = tokio::join!(
            service.resolve_or_create_conversation("u1", "u2"),
            service.resolve_or_create_conversation("u2", "u1"),
        );

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(store.get_all("chats").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_invalid_pairs() {
        let (service, _) = memory_service(json!({}));

        assert!(matches!(
            service.resolve_or_create_conversation("u1", "u1").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.resolve_or_create_conversation("", "u2").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.resolve_or_create_conversation("u1", "a/b").await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_index_hit_skips_scan() {
        let mut store = MockDocumentStore::new();
        store.expect_get_one().times(2).returning(|path| match path {
            "chatIndex/2_u1_u2" => Ok(Some(json!("c1"))),
            "chats/c1" => Ok(Some(json!({ "users": { "u1": true, "u2": true } }))),
            other => panic!("unexpected path {}", other),
        });
        store.expect_get_all().times(0);
        store.expect_create_under().times(0);

        let service = ChatService::new(Arc::new(store), DEFAULT_LOOKUP_CONCURRENCY);
        let key = service.resolve_or_create_conversation("u1", "u2").await.unwrap();
        assert_eq!(key, "c1");
    }

    #[tokio::test]
    async fn test_store_unavailable_creates_nothing() {
        let mut store = MockDocumentStore::new();
        store.expect_get_one().returning(|_| Ok(None));
        store
            .expect_get_all()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection refused".into())));
        store.expect_create_under().times(0);

        let service = ChatService::new(Arc::new(store), DEFAULT_LOOKUP_CONCURRENCY);
        let result = service.resolve_or_create_conversation("u1", "u2").await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_index_write_failure_still_returns_key() {
        let mut store = MockDocumentStore::new();
        store.expect_get_one().returning(|_| Ok(None));
        store.expect_get_all().returning(|_| Ok(BTreeMap::new()));
        store
            .expect_create_under()
            .times(1)
            .returning(|_, _| Ok("-Mnew".to_string()));
        store
            .expect_set()
            .times(1)
            .returning(|_, _| Err(StoreError::Timeout));

        let service = ChatService::new(Arc::new(store), DEFAULT_LOOKUP_CONCURRENCY);
        let key = service.resolve_or_create_conversation("u1", "u2").await.unwrap();
        assert_eq!(key, "-Mnew");
    }
}
