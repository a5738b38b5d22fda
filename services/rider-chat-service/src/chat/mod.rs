//! Logic chat antara rider dan driver.
//!
//! [`ChatService`] menyatukan repository yang dibutuhkan oleh tiga operasi:
//! resolve-or-create conversation (`resolver`), list conversation untuk
//! layar income (`lister`), dan kirim ride request ke driver (`request`).

use shared::utils::validation::is_valid_store_key;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::repositories::{ConversationRepository, NotificationRepository, UserRepository};
use crate::store::DocumentStore;

mod lister;
mod request;
mod resolver;

/// Default jumlah lookup profile yang berjalan bersamaan.
pub const DEFAULT_LOOKUP_CONCURRENCY: usize = 8;

#[derive(Clone)]
pub struct ChatService {
    conversations: ConversationRepository,
    users: UserRepository,
    notifications: NotificationRepository,
    // Serialisasi lookup+create supaya pasangan yang sama tidak dibuat dua kali
    resolve_lock: Arc<Mutex<()>>,
    lookup_concurrency: usize,
}

impl ChatService {
    pub fn new(store: Arc<dyn DocumentStore>, lookup_concurrency: usize) -> Self {
        Self {
            conversations: ConversationRepository::new(store.clone()),
            users: UserRepository::new(store.clone()),
            notifications: NotificationRepository::new(store),
            resolve_lock: Arc::new(Mutex::new(())),
            lookup_concurrency: lookup_concurrency.max(1),
        }
    }
}

// Validasi user id dari request sebelum dipakai sebagai key di store
fn validate_user_id(user_id: &str, field: &str) -> Result<(), AppError> {
    if is_valid_store_key(user_id) {
        Ok(())
    } else {
        Err(AppError::bad_request(format!("{} tidak valid", field)))
    }
}

#[cfg(test)]
pub(crate) fn memory_service(
    data: serde_json::Value,
) -> (ChatService, Arc<crate::store::MemoryStore>) {
    let store = Arc::new(crate::store::MemoryStore::with_data(data));
    (ChatService::new(store.clone(), DEFAULT_LOOKUP_CONCURRENCY), store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_user_id() {
        assert!(validate_user_id("u1", "userId").is_ok());
        assert!(matches!(
            validate_user_id("", "userId"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            validate_user_id("chats/x", "driverId"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_lookup_concurrency_at_least_one() {
        let store: Arc<dyn DocumentStore> = Arc::new(crate::store::MemoryStore::new());
        assert_eq!(ChatService::new(store, 0).lookup_concurrency, 1);
    }
}
