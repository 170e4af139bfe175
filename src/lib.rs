// Bucket Tools - provision and inspect buckets on S3-compatible object stores

pub mod cli;
pub mod config;
pub mod inspect;
pub mod provision;
pub mod storage;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::{Config, StoreConfig};
pub use inspect::{InspectionSummary, Inspector};
pub use provision::{ProvisionOutcome, Provisioner};
pub use storage::{ObjectStore, S3Client};
pub use types::{ObjectEntry, RunStatus, StoreError, StoreResult, ToolError, ToolResult};
