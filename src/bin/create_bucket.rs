//! create-bucket
//!
//! Creates the configured bucket, or confirms it already exists.

use std::process::ExitCode;

use bucket_tools::{cli::CreateBucketCli, utils::init_logger, Config, Provisioner, S3Client, RunStatus};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = CreateBucketCli::parse();
    init_logger();

    // Load configuration
    let config = Config::from_env()?.apply(&args.store);
    config.validate()?;
    info!("Configuration loaded: {:?}", config.store);

    let client = S3Client::new(&config.store)?;
    let mut stdout = std::io::stdout().lock();

    let result = Provisioner::new(&client, &config.bucket).run(&mut stdout).await;
    Ok(RunStatus::from_result(result)?.into())
}
