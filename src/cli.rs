//! Command-line arguments shared by the bucket tools.
//!
//! Every flag is optional. Anything not given on the command line falls back to
//! the environment (and `.env`), then to the local MinIO defaults.

use clap::{Args, Parser};

/// Connection and target options common to both tools.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// S3-compatible endpoint URL [env: S3_ENDPOINT]
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Access key ID; empty for anonymous requests [env: AWS_ACCESS_KEY_ID]
    #[arg(long)]
    pub access_key: Option<String>,

    /// Secret access key [env: AWS_SECRET_ACCESS_KEY]
    #[arg(long)]
    pub secret_key: Option<String>,

    /// Region identifier [env: S3_REGION]
    #[arg(long)]
    pub region: Option<String>,

    /// Target bucket [env: S3_BUCKET]
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Address buckets as subdomains instead of path segments
    #[arg(long)]
    pub virtual_host_style: bool,
}

/// Create a bucket if it does not already exist, then list visible buckets.
#[derive(Parser, Debug)]
#[command(name = "create-bucket")]
#[command(version, about, long_about = None)]
pub struct CreateBucketCli {
    #[command(flatten)]
    pub store: StoreArgs,
}

/// List the objects in a bucket and preview the content of each one.
#[derive(Parser, Debug)]
#[command(name = "check-bucket")]
#[command(version, about, long_about = None)]
pub struct CheckBucketCli {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Only inspect keys under this prefix [env: S3_PREFIX]
    #[arg(short, long)]
    pub prefix: Option<String>,
}
