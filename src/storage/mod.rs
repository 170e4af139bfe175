// Storage layer (S3-compatible)

use async_trait::async_trait;
use bytes::Bytes;

use crate::types::{ObjectEntry, StoreResult};

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod s3_client;

#[cfg(any(test, feature = "test-util"))]
pub use memory::{MemoryStore, Operation};
pub use s3_client::S3Client;

/// The object store operations the tools rely on.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create a bucket. A bucket that already belongs to the caller is reported as
    /// `StoreError::AlreadyOwned` so the caller can decide whether that is fine.
    async fn create_bucket(&self, name: &str) -> StoreResult<()>;

    /// Names of every bucket visible to the credentials in use.
    async fn list_buckets(&self) -> StoreResult<Vec<String>>;

    /// One listing call; entries come back in store order.
    async fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> StoreResult<Vec<ObjectEntry>>;

    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Bytes>;
}
