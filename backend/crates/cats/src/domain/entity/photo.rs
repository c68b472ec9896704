//! Cat Photo Entity

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::domain::value_object::{CatId, PhotoId};

/// Stored photo metadata
#[derive(Debug, Clone)]
pub struct CatPhoto {
    pub id: PhotoId,
    pub cat_id: CatId,
    pub object_key: String,
    pub url: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

/// Row to insert once the blob is stored
#[derive(Debug, Clone)]
pub struct NewCatPhoto {
    pub cat_id: CatId,
    pub object_key: String,
    pub url: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
}

/// Photo as listed under a cat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef {
    pub id: PhotoId,
    pub url: String,
    pub is_primary: bool,
}

/// One file received in a multipart batch
///
/// `size` is the full length read from the stream. For a file over the cap
/// `data` is left empty so the oversized body is never held in memory.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
    pub data: Bytes,
}

/// Outcome of a batch upload
#[derive(Debug, Clone, Default)]
pub struct UploadReport {
    pub total: usize,
    pub uploaded: Vec<UploadedPhoto>,
    pub failed: Vec<FailedUpload>,
}

#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    pub id: PhotoId,
    pub url: String,
    pub file_name: String,
}

#[derive(Debug, Clone)]
pub struct FailedUpload {
    pub file_name: String,
    pub error: String,
    /// Storage or database failure rather than a rejected file
    pub server_side: bool,
}

impl UploadReport {
    pub fn message(&self) -> String {
        format!("Uploaded {} out of {} files", self.uploaded.len(), self.total)
    }

    /// True when at least one failure came from storage or the database
    pub fn has_server_failures(&self) -> bool {
        self.failed.iter().any(|f| f.server_side)
    }
}
