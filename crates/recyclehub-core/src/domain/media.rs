//! Upload validation rules for listing images.

use crate::error::DomainError;

/// Extensions accepted for listing images, compared case-insensitively.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Longest stored image name, matching the `image_reference` column.
pub const IMAGE_NAME_MAX_LEN: usize = 255;

/// An image file received alongside a listing request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

fn extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

fn is_allowed_image(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| {
        ALLOWED_IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    })
}

/// Reduce a client-supplied filename to something safe to store in a flat
/// directory. Path separators and whitespace become `_`, anything outside
/// `[A-Za-z0-9._-]` is dropped, and leading/trailing `.`/`_` are trimmed.
///
/// Returns `None` when nothing usable remains.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let spaced: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Content type served for a stored image.
pub fn content_type_for(filename: &str) -> &'static str {
    match extension(filename).map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Check the extension allow-list and return the name the file is stored under.
    pub fn storage_name(&self) -> Result<String, DomainError> {
        if !is_allowed_image(&self.filename) {
            return Err(DomainError::FileType(format!(
                "'{}' (allowed: {})",
                self.filename,
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            )));
        }

        let name = sanitize_filename(&self.filename)
            .ok_or_else(|| DomainError::Validation("Invalid image filename".to_string()))?;

        if !is_allowed_image(&name) {
            return Err(DomainError::FileType(format!("'{}'", self.filename)));
        }
        if name.len() > IMAGE_NAME_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "Image filename must be at most {IMAGE_NAME_MAX_LEN} characters"
            )));
        }

        Ok(name)
    }
}
