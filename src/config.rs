use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fmt;

use crate::cli::StoreArgs;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:9000";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_BUCKET: &str = "test-data-lake";
// MinIO's out-of-the-box root credentials
const DEFAULT_ACCESS_KEY: &str = "minioadmin";
const DEFAULT_SECRET_KEY: &str = "minioadmin";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub bucket: String,
    pub prefix: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct StoreConfig {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub path_style: bool,
}

impl StoreConfig {
    /// Requests are unsigned when either half of the key pair is missing.
    pub fn is_anonymous(&self) -> bool {
        self.access_key.is_empty() || self.secret_key.is_empty()
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .field("path_style", &self.path_style)
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: DEFAULT_ACCESS_KEY.to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            region: DEFAULT_REGION.to_string(),
            path_style: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            store: StoreConfig {
                endpoint: env::var("S3_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
                access_key: env::var("AWS_ACCESS_KEY_ID")
                    .unwrap_or_else(|_| DEFAULT_ACCESS_KEY.to_string()),
                secret_key: env::var("AWS_SECRET_ACCESS_KEY")
                    .unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string()),
                region: env::var("S3_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
                path_style: env::var("S3_PATH_STYLE")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .map_err(|e| anyhow::anyhow!("S3_PATH_STYLE must be true or false: {}", e))?,
            },
            bucket: env::var("S3_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            prefix: env::var("S3_PREFIX").ok().filter(|p| !p.is_empty()),
        })
    }

    /// Command-line values take precedence over the environment.
    pub fn apply(mut self, args: &StoreArgs) -> Self {
        if let Some(endpoint) = &args.endpoint {
            self.store.endpoint = endpoint.clone();
        }
        if let Some(access_key) = &args.access_key {
            self.store.access_key = access_key.clone();
        }
        if let Some(secret_key) = &args.secret_key {
            self.store.secret_key = secret_key.clone();
        }
        if let Some(region) = &args.region {
            self.store.region = region.clone();
        }
        if let Some(bucket) = &args.bucket {
            self.bucket = bucket.clone();
        }
        if args.virtual_host_style {
            self.store.path_style = false;
        }
        self
    }

    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        if prefix.is_some() {
            self.prefix = prefix.filter(|p| !p.is_empty());
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            anyhow::bail!("Bucket name must not be empty");
        }
        let endpoint = self.store.endpoint.as_str();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            anyhow::bail!("Endpoint must start with http:// or https://, got {:?}", endpoint);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            store: StoreConfig::default(),
            bucket: DEFAULT_BUCKET.to_string(),
            prefix: None,
        }
    }

    #[test]
    fn test_defaults_target_local_minio() {
        let config = base_config();
        assert_eq!(config.store.endpoint, "http://localhost:9000");
        assert_eq!(config.store.region, "us-east-1");
        assert!(config.store.path_style);
        assert!(!config.store.is_anonymous());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_args_override_environment() {
        let args = StoreArgs {
            endpoint: Some("https://s3.example.com".to_string()),
            access_key: None,
            secret_key: Some(String::new()),
            region: Some("eu-west-1".to_string()),
            bucket: Some("other-bucket".to_string()),
            virtual_host_style: true,
        };

        let config = base_config().apply(&args);

        assert_eq!(config.store.endpoint, "https://s3.example.com");
        assert_eq!(config.store.access_key, "minioadmin");
        assert_eq!(config.store.region, "eu-west-1");
        assert_eq!(config.bucket, "other-bucket");
        assert!(!config.store.path_style);
        assert!(config.store.is_anonymous());
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        let config = base_config().with_prefix(Some(String::new()));
        assert_eq!(config.prefix, None);

        let config = base_config().with_prefix(Some("events/".to_string()));
        assert_eq!(config.prefix.as_deref(), Some("events/"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = base_config();
        config.bucket = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.store.endpoint = "localhost:9000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", StoreConfig::default());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret_key: \"minioadmin\""));
    }
}
