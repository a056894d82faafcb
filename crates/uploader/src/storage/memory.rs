use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use bytes::Bytes;

use super::ObjectStore;

/// In-process blob store: a mutexed map.
///
/// Fills the pluggable-backend role for local runs where no object storage
/// is reachable, and backs the server tests.
pub struct MemoryStore {
    bucket: String,
    objects: Mutex<HashMap<String, Bytes>>,
}

impl MemoryStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// Stored bytes for `key`, if any.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.objects
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, data: Bytes) -> Result<String> {
        self.objects
            .lock()
            .map_err(|_| anyhow!("store mutex poisoned"))?
            .insert(key.to_string(), data);
        Ok(format!("mem://{}/{}", self.bucket, key))
    }
}
