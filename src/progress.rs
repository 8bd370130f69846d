//! Progress reporting for group runs

use async_trait::async_trait;
use tracing::info;

/// Receives human-readable progress while a run executes
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A step started or finished
    async fn on_message(&self, message: &str);
}

/// Progress that goes to the tracing log at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

#[async_trait]
impl ProgressCallback for LogProgress {
    async fn on_message(&self, message: &str) {
        info!("{message}");
    }
}

/// Progress that is dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
}
