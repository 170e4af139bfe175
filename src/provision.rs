// Bucket provisioning: create-or-confirm

use std::io::Write;
use tracing::{error, info};

use crate::storage::ObjectStore;
use crate::types::{StoreError, ToolResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The bucket was created; `buckets` is the listing taken right after.
    Created { buckets: Vec<String> },
    AlreadyExists,
}

pub struct Provisioner<'a> {
    store: &'a dyn ObjectStore,
    bucket: &'a str,
}

impl<'a> Provisioner<'a> {
    pub fn new(store: &'a dyn ObjectStore, bucket: &'a str) -> Self {
        Self { store, bucket }
    }

    /// Create the bucket, or confirm it already belongs to us.
    ///
    /// Any other store error is reported to `out` once and returned; nothing is retried.
    pub async fn run(&self, out: &mut impl Write) -> ToolResult<ProvisionOutcome> {
        match self.store.create_bucket(self.bucket).await {
            Ok(()) => {
                info!(bucket = self.bucket, "Bucket created");
                writeln!(out, "✅ Successfully created bucket: {}", self.bucket)?;
            }
            Err(StoreError::AlreadyOwned(detail)) => {
                info!(bucket = self.bucket, %detail, "Bucket already exists");
                writeln!(out, "✅ Bucket {} already exists", self.bucket)?;
                return Ok(ProvisionOutcome::AlreadyExists);
            }
            Err(err) => {
                error!(bucket = self.bucket, kind = err.kind(), error = %err, "Failed to create bucket");
                writeln!(out, "❌ Error creating bucket: {}", err)?;
                return Err(err.into());
            }
        }

        let buckets = match self.store.list_buckets().await {
            Ok(buckets) => buckets,
            Err(err) => {
                error!(kind = err.kind(), error = %err, "Failed to list buckets");
                writeln!(out, "❌ Error listing buckets: {}", err)?;
                return Err(err.into());
            }
        };

        writeln!(out, "📋 Available buckets:")?;
        for name in &buckets {
            writeln!(out, "  - {}", name)?;
        }

        Ok(ProvisionOutcome::Created { buckets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, Operation};
    use crate::types::ToolError;
    use tokio_test::{assert_err, assert_ok};

    const BUCKET: &str = "test-data-lake";

    #[tokio::test]
    async fn test_create_then_confirm_is_idempotent() {
        let store = MemoryStore::new().with_bucket("warehouse");
        let provisioner = Provisioner::new(&store, BUCKET);

        let mut first = Vec::new();
        let outcome = assert_ok!(provisioner.run(&mut first).await);
        assert_eq!(
            outcome,
            ProvisionOutcome::Created {
                buckets: vec!["warehouse".to_string(), BUCKET.to_string()],
            }
        );
        assert_eq!(
            String::from_utf8(first).unwrap(),
            "✅ Successfully created bucket: test-data-lake\n\
             📋 Available buckets:\n  - warehouse\n  - test-data-lake\n"
        );

        let mut second = Vec::new();
        let outcome = assert_ok!(provisioner.run(&mut second).await);
        assert_eq!(outcome, ProvisionOutcome::AlreadyExists);
        assert_eq!(
            String::from_utf8(second).unwrap(),
            "✅ Bucket test-data-lake already exists\n"
        );

        let names = store.bucket_names().await;
        assert_eq!(names.iter().filter(|n| n.as_str() == BUCKET).count(), 1);
    }

    #[tokio::test]
    async fn test_bucket_owned_by_someone_else_is_a_failure() {
        let store = MemoryStore::new().with_foreign_bucket(BUCKET);

        let mut out = Vec::new();
        let err = assert_err!(Provisioner::new(&store, BUCKET).run(&mut out).await);

        assert!(matches!(err, ToolError::Store(StoreError::Conflict(_))));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "❌ Error creating bucket: Conflict: BucketAlreadyExists: test-data-lake\n"
        );
    }

    #[tokio::test]
    async fn test_store_error_is_reported_and_stops() {
        let store = MemoryStore::new().failing(
            Operation::CreateBucket,
            StoreError::PermissionDenied("AccessDenied: Access Denied.".into()),
        );

        let mut out = Vec::new();
        let result = Provisioner::new(&store, BUCKET).run(&mut out).await;

        assert!(matches!(result, Err(ToolError::Store(StoreError::PermissionDenied(_)))));
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("❌ Error creating bucket:"));
        assert!(output.contains("Access Denied."));
        assert_eq!(
            store.calls().await,
            vec![(Operation::CreateBucket, BUCKET.to_string())]
        );
    }

    #[tokio::test]
    async fn test_listing_failure_after_create() {
        let store = MemoryStore::new().failing(
            Operation::ListBuckets,
            StoreError::Transport("connection refused".into()),
        );

        let mut out = Vec::new();
        let result = Provisioner::new(&store, BUCKET).run(&mut out).await;

        assert!(result.is_err());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "✅ Successfully created bucket: test-data-lake\n\
             ❌ Error listing buckets: Transport error: connection refused\n"
        );
    }
}
