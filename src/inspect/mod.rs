//! Bucket inspection
//!
//! Lists a bucket once, prints every key with its size, then walks the same
//! listing and prints a preview of each object's content. Nothing is written
//! back to the store.

use std::io::Write;
use tracing::{debug, error, info, warn};

use crate::storage::ObjectStore;
use crate::types::{ObjectEntry, StoreError, ToolError, ToolResult};

pub mod classify;

pub use classify::{classify, classify_text, pretty, Content};

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Counts gathered over one inspection run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InspectionSummary {
    /// The listing both passes worked from.
    pub objects: Vec<ObjectEntry>,
    pub json: usize,
    pub text: usize,
    pub undecodable: usize,
}

pub struct Inspector<'a> {
    store: &'a dyn ObjectStore,
    bucket: &'a str,
    prefix: Option<&'a str>,
}

impl<'a> Inspector<'a> {
    pub fn new(store: &'a dyn ObjectStore, bucket: &'a str) -> Self {
        Self {
            store,
            bucket,
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: Option<&'a str>) -> Self {
        self.prefix = prefix;
        self
    }

    /// Run both passes, writing the report to `out`.
    ///
    /// A store error stops the run: the failure line is written after whatever
    /// was already reported and the error is returned.
    pub async fn run(&self, out: &mut impl Write) -> ToolResult<InspectionSummary> {
        match self.inspect(&mut *out).await {
            Err(ToolError::Store(err)) => {
                error!(bucket = self.bucket, kind = err.kind(), error = %err, "Bucket inspection failed");
                writeln!(out, "❌ Error accessing S3: {}", err)?;
                Err(err.into())
            }
            other => other,
        }
    }

    async fn inspect(&self, out: &mut impl Write) -> ToolResult<InspectionSummary> {
        let entries = self.store.list_objects(self.bucket, self.prefix).await?;
        info!(bucket = self.bucket, prefix = ?self.prefix, objects = entries.len(), "Listed bucket");

        writeln!(out, "📋 Files in S3 bucket:")?;
        for entry in &entries {
            writeln!(out, "  📄 {} (size: {} bytes)", entry.key, entry.size)?;
        }

        let mut summary = InspectionSummary::default();
        for entry in &entries {
            writeln!(out)?;
            writeln!(out, "🔍 Content of {}:", entry.key)?;
            writeln!(out, "{}", rule())?;

            let body = self.store.get_object(self.bucket, &entry.key).await?;
            debug!(key = %entry.key, bytes = body.len(), "Fetched object");

            match classify(&entry.key, &body) {
                Ok(content) => {
                    if content.is_json() {
                        summary.json += 1;
                    } else {
                        summary.text += 1;
                    }
                    write_content(&mut *out, &content)?;
                }
                Err(err @ StoreError::Decode { .. }) => {
                    warn!(key = %entry.key, error = %err, "Skipping undecodable object");
                    writeln!(out, "⚠️  Not valid UTF-8, skipping content: {}", err)?;
                    summary.undecodable += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        writeln!(out)?;
        writeln!(out, "{}", rule())?;

        summary.objects = entries;
        info!(
            bucket = self.bucket,
            json = summary.json,
            text = summary.text,
            undecodable = summary.undecodable,
            "Bucket inspection completed"
        );
        Ok(summary)
    }
}

fn write_content(out: &mut impl Write, content: &Content) -> std::io::Result<()> {
    if let Content::Text(text) = content {
        writeln!(out, "⚠️  Not valid JSON, showing raw content:")?;
        return writeln!(out, "{}", text);
    }

    writeln!(out, "📊 Structure: {}", content.structure())?;
    if let Some(count) = content.record_count() {
        writeln!(out, "📊 Number of records: {}", count)?;
    }

    match content {
        Content::JsonArray { sample: Some(sample), .. } => {
            writeln!(out, "📄 Sample record:")?;
            writeln!(out, "{}", pretty(sample))
        }
        Content::JsonArray { sample: None, .. } => writeln!(out, "[]"),
        Content::JsonValue(value) => writeln!(out, "{}", pretty(value)),
        Content::Text(_) => Ok(()),
    }
}
