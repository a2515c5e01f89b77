use async_trait::async_trait;

use crate::error::{Result, ResultSyncError};

pub mod github;

pub use github::GitHubStore;

/// A file as currently stored remotely
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
    /// Revision id required to overwrite the file
    pub sha: String,
    pub content: String,
}

/// Versioned file store the result lines are committed to
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// `Ok(None)` only when the store confirms the file does not exist
    async fn read(&self, path: &str) -> Result<Option<RemoteFile>>;

    async fn create(&self, path: &str, content: &str, message: &str) -> Result<()>;

    async fn update(&self, path: &str, content: &str, sha: &str, message: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Created,
    Updated,
    /// Remote content already equals the line and `skip_unchanged` is set
    Unchanged,
}

/// Upserts result lines into a [`RemoteStore`]
pub struct Publisher {
    store: Box<dyn RemoteStore>,
    skip_unchanged: bool,
}

impl Publisher {
    pub fn new(store: Box<dyn RemoteStore>) -> Self {
        Self {
            store,
            skip_unchanged: false,
        }
    }

    /// Leave a file alone when it already holds the line. Off by default:
    /// an existing revision is always updated.
    pub fn with_skip_unchanged(mut self, skip_unchanged: bool) -> Self {
        self.skip_unchanged = skip_unchanged;
        self
    }

    pub async fn publish(
        &self,
        source_name: &str,
        target_file: &str,
        line: &str,
    ) -> Result<PublishOutcome> {
        tracing::debug!(path = target_file, "reading current remote file");

        let existing = self.store.read(target_file).await.map_err(|e| match e {
            publish @ ResultSyncError::Publish(_) => publish,
            other => ResultSyncError::publish(format!("reading '{}': {}", target_file, other)),
        })?;

        match existing {
            Some(file)
                if self.skip_unchanged && file.content.trim_end_matches(['\n', '\r']) == line =>
            {
                Ok(PublishOutcome::Unchanged)
            }
            Some(file) => {
                let message = format!("Update {}: {}", source_name, line);
                self.store
                    .update(target_file, line, &file.sha, &message)
                    .await?;
                Ok(PublishOutcome::Updated)
            }
            None => {
                let message = format!("Create {}: {}", source_name, line);
                self.store.create(target_file, line, &message).await?;
                Ok(PublishOutcome::Created)
            }
        }
    }
}
