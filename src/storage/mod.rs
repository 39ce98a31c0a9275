//! Storage layer for scraped organizations and run progress.
//!
//! ## Directory Structure
//!
//! ```text
//! data/
//! ├── org_{key}.json                    # One file per organization
//! ├── org_{key}_{slug}.json             # When a usable websiteKey exists
//! └── all_organizations_detailed.json   # Aggregate, rebuilt each run
//! progress.json                         # Checkpoint for resumable runs
//! ```

pub mod local;
pub mod progress;

use std::path::Path;

use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;
pub use progress::ProgressStore;

/// Write pretty JSON atomically (write to temp, then rename).
pub(crate) async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("tmp");
    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(&bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
