use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use super::{checked_path, DocumentStore, StoreError};

/// Store in-process dengan satu JSON tree, dipakai untuk test dan
/// development lokal tanpa hosted database.
#[derive(Debug)]
pub struct MemoryStore {
    root: RwLock<Value>,
    next_key: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        // Mulai dari waktu sekarang supaya key tetap urut setelah restart
        let seed = chrono::Utc::now().timestamp_millis().max(0) as u64 * 1_000;
        Self {
            root: RwLock::new(Value::Object(Map::new())),
            next_key: AtomicU64::new(seed),
        }
    }

    #[cfg(test)]
    pub fn with_data(data: Value) -> Self {
        Self {
            root: RwLock::new(data),
            ..Self::new()
        }
    }

    // Key dengan lebar tetap, jadi urutan string = urutan pembuatan
    fn generate_key(&self) -> String {
        format!("-M{:020}", self.next_key.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('/')
        .try_fold(root, |node, segment| node.as_object()?.get(segment))
        .filter(|value| !value.is_null())
}

fn write(root: &mut Value, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('/').collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut node = root;
    for segment in parents {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let Value::Object(map) = node else {
            return;
        };
        node = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        // Menulis null sama dengan menghapus, seperti di realtime database
        if value.is_null() {
            map.remove(*last);
        } else {
            map.insert(last.to_string(), value);
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_all(&self, collection: &str) -> Result<BTreeMap<String, Value>, StoreError> {
        let path = checked_path(collection)?;
        let root = self.root.read().await;

        match lookup(&root, path) {
            None => Ok(BTreeMap::new()),
            Some(Value::Object(children)) => Ok(children
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()),
            Some(other) => Err(StoreError::Malformed(format!(
                "{} bukan collection: {}",
                path, other
            ))),
        }
    }

    async fn get_one(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let path = checked_path(path)?;
        let root = self.root.read().await;
        Ok(lookup(&root, path).cloned())
    }

    async fn create_under(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        let collection = checked_path(collection)?;
        let key = self.generate_key();

        let mut root = self.root.write().await;
        write(&mut root, &format!("{}/{}", collection, key), document);

        tracing::debug!("Memory store created {}/{}", collection, key);
        Ok(key)
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let path = checked_path(path)?;
        let mut root = self.root.write().await;
        write(&mut root, path, value);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
