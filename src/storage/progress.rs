//! Durable checkpoint state for resumable runs.

use std::path::PathBuf;

use crate::models::Progress;
use crate::storage::write_json_atomic;

/// Owns the progress record and the file it is checkpointed to.
pub struct ProgressStore {
    path: PathBuf,
    progress: Progress,
}

impl ProgressStore {
    /// Open the store, restoring a previous checkpoint when `resume` is set.
    ///
    /// A missing or unreadable checkpoint never aborts a run; it just
    /// means starting from scratch.
    pub async fn open(path: impl Into<PathBuf>, resume: bool) -> Self {
        let path = path.into();
        let progress = if resume {
            match load_progress(&path).await {
                Ok(progress) => {
                    log::info!(
                        "Resuming: {} of {} organizations already scraped",
                        progress.scraped_orgs,
                        progress.total_orgs
                    );
                    progress
                }
                Err(e) => {
                    log::warn!(
                        "Could not load progress from {}: {}. Starting fresh",
                        path.display(),
                        e
                    );
                    Progress::default()
                }
            }
        } else {
            Progress::default()
        };

        Self { path, progress }
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    /// Checkpoint the current state to disk.
    pub async fn save(&self) -> crate::error::Result<()> {
        write_json_atomic(&self.path, &self.progress).await
    }
}

async fn load_progress(path: &std::path::Path) -> crate::error::Result<Progress> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
