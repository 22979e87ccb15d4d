//! Media storage port - where uploaded listing images live.

use async_trait::async_trait;

/// Flat key/value storage for uploaded images, keyed by sanitized filename.
///
/// Writing an existing name replaces the stored bytes.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist bytes under `name`.
    async fn save(&self, name: &str, bytes: &[u8]) -> Result<(), MediaError>;

    /// Read the bytes stored under `name`, `None` if nothing is stored.
    async fn load(&self, name: &str) -> Result<Option<Vec<u8>>, MediaError>;
}

/// Media storage errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Invalid media name: {0}")]
    InvalidName(String),

    #[error("Storage I/O failed: {0}")]
    Io(String),
}
