use async_trait::async_trait;
use serde_json::Value;
use shared::utils::http_client::RealtimeDbClient;
use std::collections::BTreeMap;

use super::{checked_path, DocumentStore, StoreError};

/// Store yang bicara ke hosted realtime database lewat REST API.
#[derive(Debug, Clone)]
pub struct RealtimeDbStore {
    client: RealtimeDbClient,
}

impl RealtimeDbStore {
    pub fn new(client: RealtimeDbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentStore for RealtimeDbStore {
    async fn get_all(&self, collection: &str) -> Result<BTreeMap<String, Value>, StoreError> {
        let path = checked_path(collection)?;

        match self.client.get(path, &[]).await? {
            Value::Null => Ok(BTreeMap::new()),
            Value::Object(children) => Ok(children.into_iter().collect()),
            other => Err(StoreError::Malformed(format!(
                "{} bukan collection: {}",
                path, other
            ))),
        }
    }

    async fn get_one(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let path = checked_path(path)?;

        match self.client.get(path, &[]).await? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    async fn create_under(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        let collection = checked_path(collection)?;
        let response = self.client.post(collection, &document).await?;

        // Server membalas {"name": "<push key>"}
        let key = response
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                StoreError::Malformed(format!("push response tanpa key: {}", response))
            })?;

        tracing::debug!("Realtime database created {}/{}", collection, key);
        Ok(key.to_string())
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let path = checked_path(path)?;
        self.client.put(path, &value).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client.get("chats", &[("shallow", "true")]).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "realtime"
    }
}
