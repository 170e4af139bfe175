// S3 client backed by rust-s3

use async_trait::async_trait;
use bytes::Bytes;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use s3::BucketConfiguration;
use serde::Deserialize;
use tracing::{debug, info};

use super::ObjectStore;
use crate::config::StoreConfig;
use crate::types::{ObjectEntry, StoreError, StoreResult};

pub struct S3Client {
    region: Region,
    credentials: Credentials,
    path_style: bool,
}

impl S3Client {
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        };

        let credentials = if config.is_anonymous() {
            Credentials::anonymous()
        } else {
            Credentials::new(
                Some(&config.access_key),
                Some(&config.secret_key),
                None,
                None,
                None,
            )
        }
        .map_err(|e| StoreError::Config(e.to_string()))?;

        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            path_style = config.path_style,
            anonymous = config.is_anonymous(),
            "S3 client configured"
        );

        Ok(Self {
            region,
            credentials,
            path_style: config.path_style,
        })
    }

    fn bucket(&self, name: &str) -> StoreResult<Bucket> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(classify_error)?;
        Ok(if self.path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn create_bucket(&self, name: &str) -> StoreResult<()> {
        debug!(bucket = name, "Creating bucket");

        let config = BucketConfiguration::default();
        let response = if self.path_style {
            Bucket::create_with_path_style(name, self.region.clone(), self.credentials.clone(), config)
                .await
        } else {
            Bucket::create(name, self.region.clone(), self.credentials.clone(), config).await
        }
        .map_err(classify_error)?;

        if response.success() {
            Ok(())
        } else {
            Err(classify_status(response.response_code, &response.response_text))
        }
    }

    async fn list_buckets(&self) -> StoreResult<Vec<String>> {
        let response = Bucket::list_buckets(self.region.clone(), self.credentials.clone())
            .await
            .map_err(classify_error)?;
        Ok(response.bucket_names().collect())
    }

    async fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> StoreResult<Vec<ObjectEntry>> {
        let bucket = self.bucket(bucket)?;
        let (page, status) = bucket
            .list_page(prefix.unwrap_or_default().to_string(), None, None, None, None)
            .await
            .map_err(classify_error)?;

        debug!(
            bucket = %page.name,
            status,
            objects = page.contents.len(),
            truncated = page.is_truncated,
            "Listed objects"
        );

        Ok(page
            .contents
            .into_iter()
            .map(|object| ObjectEntry::new(object.key, object.size))
            .collect())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Bytes> {
        let response = self.bucket(bucket)?.get_object(key).await.map_err(classify_error)?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            let body = String::from_utf8_lossy(response.bytes()).into_owned();
            return Err(classify_status(status, &body));
        }

        Ok(response.bytes().clone())
    }
}

fn classify_error(err: S3Error) -> StoreError {
    match err {
        S3Error::HttpFailWithBody(status, body) => classify_status(status, &body),
        other => StoreError::Transport(other.to_string()),
    }
}

/// The `<Error>` document S3 sends with a failed request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorDocument {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl ErrorDocument {
    fn parse(body: &str) -> Option<Self> {
        quick_xml::de::from_str(body).ok()
    }
}

/// Map an S3 error response (status plus XML error document) onto a `StoreError`.
pub(crate) fn classify_status(status: u16, body: &str) -> StoreError {
    let (code, message) = match ErrorDocument::parse(body) {
        Some(doc) => (doc.code.trim().to_string(), doc.message.trim().to_string()),
        None => (String::new(), body.trim().to_string()),
    };
    let detail = match (code.is_empty(), message.is_empty()) {
        (true, true) => format!("HTTP {}", status),
        (true, false) => message.clone(),
        (false, true) => code.clone(),
        (false, false) => format!("{}: {}", code, message),
    };

    match (code.as_str(), status) {
        ("BucketAlreadyOwnedByYou", _) => StoreError::AlreadyOwned(detail),
        ("BucketAlreadyExists" | "OperationAborted", _) | (_, 409) => StoreError::Conflict(detail),
        ("NoSuchBucket" | "NoSuchKey", _) | (_, 404) => StoreError::NotFound(detail),
        ("AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch", _) | (_, 401 | 403) => {
            StoreError::PermissionDenied(detail)
        }
        _ => StoreError::Rejected {
            status,
            code: if code.is_empty() { "Unknown".to_string() } else { code },
            message,
        },
    }
}
