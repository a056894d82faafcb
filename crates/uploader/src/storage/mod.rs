mod memory;
mod s3;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

pub use memory::MemoryStore;
pub use s3::{S3Config, S3Store};

/// Key-addressed blob storage.
///
/// `put` persists the bytes under `key` and returns the stable locator the
/// object is reachable at, the string that ends up base64-encoded inside
/// signed URLs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, data: Bytes) -> Result<String>;
}
