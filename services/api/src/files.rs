//! Local file storage for evidence artifacts
//!
//! Files are stored flat under the uploads root, named
//! `{unix_millis}-{sanitized original name}`, and served back under the
//! public `/uploads/` prefix. Stored names never contain path separators, so
//! a crafted upload name cannot escape the root.

use crate::error::ApiError;
use std::path::{Path, PathBuf};
use types::errors::DomainError;

/// Public URL prefix the router serves the uploads root under
pub const PUBLIC_PREFIX: &str = "/uploads/";

#[derive(Debug, Clone)]
pub struct SavedFile {
    /// Name on disk, unique per upload
    pub disk_name: String,
    /// Public retrieval path, e.g. `/uploads/1710000000000-report.pdf`
    pub public_path: String,
}

#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_root(&self) -> Result<(), ApiError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DomainError::Storage(format!("creating uploads dir: {e}")))?;
        Ok(())
    }

    /// Write an uploaded payload and return its public path
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<SavedFile, ApiError> {
        let disk_name = format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            sanitize(original_name)
        );
        let target = self.root.join(&disk_name);
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| DomainError::Storage(format!("writing {disk_name}: {e}")))?;
        Ok(SavedFile {
            public_path: format!("{PUBLIC_PREFIX}{disk_name}"),
            disk_name,
        })
    }

    /// Remove the artifact behind a public path; already-gone files are fine
    pub async fn delete(&self, public_path: &str) -> Result<(), ApiError> {
        let Some(target) = self.resolve(public_path) else {
            return Ok(());
        };
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Storage(format!("deleting {public_path}: {e}")).into()),
        }
    }

    pub async fn exists(&self, public_path: &str) -> bool {
        match self.resolve(public_path) {
            Some(target) => tokio::fs::try_exists(&target).await.unwrap_or(false),
            None => false,
        }
    }

    /// Map a public path back onto the uploads root, basename only
    fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let name = Path::new(public_path).file_name()?;
        Some(self.root.join(name))
    }
}

/// Keep the base name only and replace anything outside [A-Za-z0-9._-]
fn sanitize(original_name: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_paths_and_odd_chars() {
        assert_eq!(sanitize("report.pdf"), "report.pdf");
        assert_eq!(sanitize("../../etc/passwd"), "passwd");
        assert_eq!(sanitize("my report (1).png"), "my_report__1_.png");
        assert_eq!(sanitize(""), "upload");
    }

    #[tokio::test]
    async fn test_save_then_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.ensure_root().await.unwrap();

        let saved = store.save("poc.txt", b"proof of concept").await.unwrap();
        assert!(saved.public_path.starts_with(PUBLIC_PREFIX));
        assert!(store.exists(&saved.public_path).await);

        store.delete(&saved.public_path).await.unwrap();
        assert!(!store.exists(&saved.public_path).await);

        // Deleting again is not an error
        store.delete(&saved.public_path).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_ignores_traversal_in_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.ensure_root().await.unwrap();

        let saved = store.save("keep.txt", b"data").await.unwrap();
        let sneaky = format!("/uploads/../{}", saved.disk_name);
        store.delete(&sneaky).await.unwrap();
        // Basename resolution means the legitimate file is what got removed
        assert!(!store.exists(&saved.public_path).await);
    }
}
