//! Akses ke document store (JSON tree ala realtime database).
//!
//! Semua repository menerima `Arc<dyn DocumentStore>` lewat constructor,
//! sehingga backend bisa diganti: [`RealtimeDbStore`] untuk hosted database
//! dan [`MemoryStore`] untuk test dan development lokal.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

mod error;
mod memory;
mod realtime;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use realtime::RealtimeDbStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Snapshot semua child di bawah collection, urut berdasarkan key.
    /// Collection yang belum ada menghasilkan map kosong.
    async fn get_all(&self, collection: &str) -> Result<BTreeMap<String, Value>, StoreError>;

    /// Ambil satu document, `None` kalau path belum ada.
    async fn get_one(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Tulis document baru di bawah collection dengan key yang di-generate
    /// store. Key yang dihasilkan urut secara kronologis.
    async fn create_under(&self, collection: &str, document: Value) -> Result<String, StoreError>;

    /// Overwrite value di path.
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Health check koneksi ke store.
    async fn ping(&self) -> Result<(), StoreError>;

    fn backend_name(&self) -> &'static str;
}

// Validasi path sebelum dipakai oleh implementasi store
pub(crate) fn checked_path(path: &str) -> Result<&str, StoreError> {
    if shared::utils::validation::is_valid_store_path(path) {
        Ok(path.trim_matches('/'))
    } else {
        Err(StoreError::InvalidPath(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_path() {
        assert_eq!(checked_path("/chats/c1/").unwrap(), "chats/c1");
        assert!(matches!(checked_path("chats/c.1"), Err(StoreError::InvalidPath(_))));
        assert!(matches!(checked_path(""), Err(StoreError::InvalidPath(_))));
    }
}
