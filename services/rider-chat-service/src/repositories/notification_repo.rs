// Repository untuk notification request ke driver
use std::sync::Arc;

use crate::domain::RideRequestNotification;
use crate::store::{DocumentStore, StoreError};

pub const NOTIFICATIONS_COLLECTION: &str = "notifications";

#[derive(Clone)]
pub struct NotificationRepository {
    store: Arc<dyn DocumentStore>,
}

impl NotificationRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // Append notification baru, return key yang di-generate store
    pub async fn append(&self, notification: &RideRequestNotification) -> Result<String, StoreError> {
        let document = serde_json::to_value(notification)
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        self.store
            .create_under(NOTIFICATIONS_COLLECTION, document)
            .await
    }
}
