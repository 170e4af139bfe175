//! In-process object store.
//!
//! Keeps buckets and objects in insertion order, records every call made against
//! it, and can be told to fail a given operation. The tools run against it
//! unchanged, which is how their report output is tested.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::ObjectStore;
use crate::types::{ObjectEntry, StoreError, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateBucket,
    ListBuckets,
    ListObjects,
    GetObject,
}

#[derive(Debug)]
struct MemoryBucket {
    name: String,
    /// False for buckets that exist but belong to someone else.
    owned: bool,
    objects: Vec<(String, Bytes)>,
}

#[derive(Debug, Default)]
struct State {
    buckets: Vec<MemoryBucket>,
    failures: HashMap<Operation, StoreError>,
    calls: Vec<(Operation, String)>,
}

impl State {
    fn bucket(&self, name: &str) -> StoreResult<&MemoryBucket> {
        self.buckets
            .iter()
            .find(|b| b.name == name && b.owned)
            .ok_or_else(|| StoreError::NotFound(format!("NoSuchBucket: {}", name)))
    }

    fn bucket_mut(&mut self, name: &str) -> &mut MemoryBucket {
        if let Some(index) = self.buckets.iter().position(|b| b.name == name) {
            return &mut self.buckets[index];
        }
        self.buckets.push(MemoryBucket {
            name: name.to_string(),
            owned: true,
            objects: Vec::new(),
        });
        let last = self.buckets.len() - 1;
        &mut self.buckets[last]
    }

    /// Record the call, then return the injected failure if there is one.
    fn enter(&mut self, op: Operation, target: &str) -> StoreResult<()> {
        self.calls.push((op, target.to_string()));
        match self.failures.get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self, name: &str) -> Self {
        self.state.get_mut().bucket_mut(name);
        self
    }

    /// A bucket that exists under another owner; creating it is a hard conflict.
    pub fn with_foreign_bucket(mut self, name: &str) -> Self {
        self.state.get_mut().bucket_mut(name).owned = false;
        self
    }

    /// Add (or replace) an object. New keys are appended to the listing order.
    pub fn with_object(mut self, bucket: &str, key: &str, body: impl Into<Bytes>) -> Self {
        let objects = &mut self.state.get_mut().bucket_mut(bucket).objects;
        let body = body.into();
        match objects.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = body,
            None => objects.push((key.to_string(), body)),
        }
        self
    }

    /// Make every future call of `op` fail with `err`.
    pub fn failing(mut self, op: Operation, err: StoreError) -> Self {
        self.state.get_mut().failures.insert(op, err);
        self
    }

    /// Calls made so far, with the bucket or `bucket/key` they targeted.
    pub async fn calls(&self) -> Vec<(Operation, String)> {
        self.state.lock().await.calls.clone()
    }

    pub async fn bucket_names(&self) -> Vec<String> {
        let state = self.state.lock().await;
        state.buckets.iter().map(|b| b.name.clone()).collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn create_bucket(&self, name: &str) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state.enter(Operation::CreateBucket, name)?;

        let owned = state.buckets.iter().find(|b| b.name == name).map(|b| b.owned);
        match owned {
            Some(true) => Err(StoreError::AlreadyOwned(format!(
                "BucketAlreadyOwnedByYou: {}",
                name
            ))),
            Some(false) => Err(StoreError::Conflict(format!("BucketAlreadyExists: {}", name))),
            None => {
                state.bucket_mut(name);
                Ok(())
            }
        }
    }

    async fn list_buckets(&self) -> StoreResult<Vec<String>> {
        let mut state = self.state.lock().await;
        state.enter(Operation::ListBuckets, "")?;

        Ok(state
            .buckets
            .iter()
            .filter(|b| b.owned)
            .map(|b| b.name.clone())
            .collect())
    }

    async fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> StoreResult<Vec<ObjectEntry>> {
        let mut state = self.state.lock().await;
        state.enter(Operation::ListObjects, bucket)?;

        let prefix = prefix.unwrap_or_default();
        Ok(state
            .bucket(bucket)?
            .objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, body)| ObjectEntry::new(key.clone(), body.len() as u64))
            .collect())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Bytes> {
        let mut state = self.state.lock().await;
        state.enter(Operation::GetObject, &format!("{}/{}", bucket, key))?;

        state
            .bucket(bucket)?
            .objects
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| StoreError::NotFound(format!("NoSuchKey: {}", key)))
    }
}
