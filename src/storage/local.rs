//! Local filesystem persistence for organization records.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::Organization;
use crate::storage::write_json_atomic;
use crate::utils::sanitize_filename;

/// Filesystem backend rooted at the output directory.
#[derive(Clone)]
pub struct LocalStorage {
    output_dir: PathBuf,
}

impl LocalStorage {
    /// Create a storage rooted at the given directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// File name for one organization.
    ///
    /// The website key is appended as a human-readable slug when it is
    /// usable; the literal string "null" counts as unusable. Both the id
    /// and the slug are sanitized so the file always lands directly in the
    /// output directory.
    fn organization_file_name(org: &Organization) -> String {
        let key = sanitize_filename(&org.key());
        let slug = org
            .website_key
            .as_deref()
            .filter(|slug| !slug.is_empty() && *slug != "null");
        match slug {
            Some(slug) => format!("org_{key}_{}.json", sanitize_filename(slug)),
            None => format!("org_{key}.json"),
        }
    }

    /// Persist one organization to its own JSON file.
    pub async fn write_organization(&self, org: &Organization) -> Result<()> {
        let name = Self::organization_file_name(org);
        write_json_atomic(&self.output_dir.join(name), org).await
    }

    /// Enumerate per-organization file names in stable lexicographic order.
    async fn organization_files(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.output_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(AppError::Io(e)),
        };

        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with("org_") && name.ends_with(".json") {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Rebuild the consolidated dataset from the files on disk.
    ///
    /// The aggregate reflects what was actually persisted, not in-memory
    /// state. Unreadable files are logged and skipped.
    pub async fn write_aggregate(&self, file_name: &str) -> Result<usize> {
        let names = self.organization_files().await?;
        let mut organizations = Vec::with_capacity(names.len());

        for name in &names {
            let path = self.output_dir.join(name);
            match read_organization(&path).await {
                Ok(org) => organizations.push(org),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }

        write_json_atomic(&self.output_dir.join(file_name), &organizations).await?;
        log::info!(
            "Aggregated {} organizations into {}",
            organizations.len(),
            file_name
        );
        Ok(organizations.len())
    }
}

async fn read_organization(path: &Path) -> Result<Organization> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
