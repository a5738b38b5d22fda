// Repository untuk profile user (read-only dari sisi chat)
use std::sync::Arc;

use crate::domain::UserProfile;
use crate::store::{DocumentStore, StoreError};

pub const USERS_COLLECTION: &str = "users";

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // Ambil profile user, None kalau user belum punya profile
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let path = format!("{}/{}", USERS_COLLECTION, user_id);

        match self.store.get_one(&path).await? {
            None => Ok(None),
            Some(document) => serde_json::from_value(document)
                .map(Some)
                .map_err(|e| StoreError::Malformed(format!("profile {}: {}", user_id, e))),
        }
    }
}
