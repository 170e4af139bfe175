// Shared types and error kinds

use serde::Serialize;

/// One entry of a bucket listing, in the order the store returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectEntry {
    pub key: String,
    /// Size in bytes
    pub size: u64,
}

impl ObjectEntry {
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}

/// Failures reported by (or on the way to) the object store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The bucket exists and belongs to the caller. Benign for create-or-confirm.
    #[error("Bucket already owned by you: {0}")]
    AlreadyOwned(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Request rejected ({status} {code}): {message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Client configuration error: {0}")]
    Config(String),

    #[error("Content of {key} is not valid UTF-8: {source}")]
    Decode {
        key: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

impl StoreError {
    /// Short machine-friendly name of the error kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::AlreadyOwned(_) => "already_owned",
            StoreError::Conflict(_) => "conflict",
            StoreError::NotFound(_) => "not_found",
            StoreError::PermissionDenied(_) => "permission",
            StoreError::Rejected { .. } => "rejected",
            StoreError::Transport(_) => "transport",
            StoreError::Config(_) => "config",
            StoreError::Decode { .. } => "decode",
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Error returned by the tools: either the store failed or the report could not be written.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// How a finished tool run ends the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// A store failure was reported on the output.
    Failed,
}

impl RunStatus {
    /// Store failures have already been printed and end in `Failed`. A report that
    /// could not be written is handed back as an error.
    pub fn from_result<T>(result: ToolResult<T>) -> ToolResult<Self> {
        match result {
            Ok(_) => Ok(RunStatus::Completed),
            Err(ToolError::Store(_)) => Ok(RunStatus::Failed),
            Err(err) => Err(err),
        }
    }
}

impl From<RunStatus> for std::process::ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Completed => std::process::ExitCode::SUCCESS,
            RunStatus::Failed => std::process::ExitCode::FAILURE,
        }
    }
}
