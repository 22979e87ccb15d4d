//! Local-disk media store - uploaded images in one flat directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use recyclehub_core::domain::sanitize_filename;
use recyclehub_core::ports::{MediaError, MediaStore};

/// Stores each image as `<root>/<name>`. Names must already be sanitized.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the upload directory if needed and return a store rooted there.
    pub async fn init(root: impl Into<PathBuf>) -> Result<Self, MediaError> {
        let store = Self::new(root);
        tokio::fs::create_dir_all(&store.root)
            .await
            .map_err(|e| MediaError::Io(format!("{}: {e}", store.root.display())))?;
        tracing::info!(dir = %store.root.display(), "Upload directory ready");
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Only names that sanitize to themselves can be stored, so anything
    /// else cannot escape the root.
    fn path_for(&self, name: &str) -> Option<PathBuf> {
        match sanitize_filename(name) {
            Some(clean) if clean == name => Some(self.root.join(clean)),
            _ => None,
        }
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save(&self, name: &str, bytes: &[u8]) -> Result<(), MediaError> {
        let path = self
            .path_for(name)
            .ok_or_else(|| MediaError::InvalidName(name.to_string()))?;

        tokio::fs::write(&path, bytes).await.map_err(|e| {
            tracing::error!("Failed to write file {}: {}", path.display(), e);
            MediaError::Io(e.to_string())
        })
    }

    async fn load(&self, name: &str) -> Result<Option<Vec<u8>>, MediaError> {
        let Some(path) = self.path_for(name) else {
            tracing::debug!(%name, "Rejected unsanitized media name");
            return Ok(None);
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::error!("Failed to read file {}: {}", path.display(), e);
                Err(MediaError::Io(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::init(dir.path().join("uploads")).await.unwrap();

        store.save("photo.png", b"\x89PNG bytes").await.unwrap();

        let loaded = store.load("photo.png").await.unwrap();
        assert_eq!(loaded.as_deref(), Some(&b"\x89PNG bytes"[..]));
        assert!(store.root().join("photo.png").exists());
    }

    #[tokio::test]
    async fn test_same_name_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::init(dir.path()).await.unwrap();

        store.save("photo.png", b"first").await.unwrap();
        store.save("photo.png", b"second").await.unwrap();

        assert_eq!(store.load("photo.png").await.unwrap().unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_missing_and_traversal_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::init(dir.path()).await.unwrap();

        assert!(store.load("nope.png").await.unwrap().is_none());
        assert!(store.load("../secret.png").await.unwrap().is_none());
        assert!(matches!(
            store.save("../escape.png", b"x").await,
            Err(MediaError::InvalidName(_))
        ));
    }
}
