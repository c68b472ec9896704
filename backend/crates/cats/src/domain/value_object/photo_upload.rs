//! Photo Upload Rules
//!
//! Per-file checks applied before a blob is written, and the object key
//! layout in the bucket.

use std::path::Path;

use kernel::id::CatId;
use thiserror::Error;

/// Content types accepted for cat photos
pub const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Extension used when the uploaded file name has none
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Why a single file in a batch was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("file is empty")]
    Empty,
    #[error("file is too large")]
    TooLarge,
    #[error("file must be an image file (jpg, png, webp)")]
    NotAnImage,
}

/// Checks run in order: emptiness, size cap, content type
pub fn check_upload(size: u64, mime_type: &str, max_size: u64) -> Result<(), UploadRejection> {
    if size == 0 {
        return Err(UploadRejection::Empty);
    }
    if size > max_size {
        return Err(UploadRejection::TooLarge);
    }
    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(UploadRejection::NotAnImage);
    }
    Ok(())
}

/// `cat/{cat_id}/{32 hex}{ext}`, extension lower-cased from the original name
pub fn object_key(cat_id: CatId, file_name: &str) -> String {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    format!("cat/{}/{}{}", cat_id, platform::crypto::random_hex(16), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u64 = 50 * 1024 * 1024;

    #[test]
    fn test_check_order() {
        // Empty wins over a bad content type
        assert_eq!(
            check_upload(0, "text/plain", MAX),
            Err(UploadRejection::Empty)
        );
        // Size wins over a bad content type
        assert_eq!(
            check_upload(MAX + 1, "text/plain", MAX),
            Err(UploadRejection::TooLarge)
        );
        assert_eq!(
            check_upload(10, "text/plain", MAX),
            Err(UploadRejection::NotAnImage)
        );
    }

    #[test]
    fn test_allowed_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(check_upload(1, mime, MAX).is_ok());
        }
        assert!(check_upload(MAX, "image/png", MAX).is_ok());
        assert!(check_upload(1, "image/gif", MAX).is_err());
    }

    #[test]
    fn test_messages() {
        assert_eq!(UploadRejection::Empty.to_string(), "file is empty");
        assert_eq!(UploadRejection::TooLarge.to_string(), "file is too large");
        assert_eq!(
            UploadRejection::NotAnImage.to_string(),
            "file must be an image file (jpg, png, webp)"
        );
    }

    #[test]
    fn test_object_key_layout() {
        let cat_id = CatId::from_i64(12);

        let key = object_key(cat_id, "Photo.PNG");
        assert!(key.starts_with("cat/12/"));
        assert!(key.ends_with(".png"));
        let stem = &key["cat/12/".len()..key.len() - ".png".len()];
        assert_eq!(stem.len(), 32);
        assert!(stem.chars().all(|c| c.is_ascii_hexdigit()));

        assert!(object_key(cat_id, "noext").ends_with(".jpg"));
        assert_ne!(object_key(cat_id, "a.jpg"), object_key(cat_id, "a.jpg"));
    }
}
