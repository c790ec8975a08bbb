use crate::domain::model::RunOutput;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Run-scoped configuration the core reads but never mutates.
pub trait ConfigProvider: Send + Sync {
    fn proxy_url(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn extra_block_domains(&self) -> &[String];
}

/// Sink for diagnostic snapshots (screenshot + HTML). Implementations
/// must be safe to call on every run; callers treat failures as
/// non-fatal.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn save(&self, key: &str, extension: &str, data: &[u8]) -> Result<()>;
}

/// Destination for the extracted reservation record.
#[async_trait]
pub trait DataSink: Send + Sync {
    async fn push(&self, output: &RunOutput) -> Result<()>;
}
