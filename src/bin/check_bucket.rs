//! check-bucket
//!
//! Lists the configured bucket and previews the content of every object in it.

use std::process::ExitCode;

use bucket_tools::{cli::CheckBucketCli, utils::init_logger, Config, Inspector, S3Client, RunStatus};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = CheckBucketCli::parse();
    init_logger();

    // Load configuration
    let config = Config::from_env()?
        .apply(&args.store)
        .with_prefix(args.prefix);
    config.validate()?;
    info!("Configuration loaded: {:?}", config);

    let client = S3Client::new(&config.store)?;
    let mut stdout = std::io::stdout().lock();

    let inspector = Inspector::new(&client, &config.bucket).with_prefix(config.prefix.as_deref());
    let result = inspector.run(&mut stdout).await;
    Ok(RunStatus::from_result(result)?.into())
}
