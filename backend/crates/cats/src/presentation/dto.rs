//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::cat::{Cat, CatSummary, CatWithPhotos};
use crate::domain::entity::photo::{CatPhoto, FailedUpload, PhotoRef, UploadReport, UploadedPhoto};

// ============================================================================
// Cats
// ============================================================================

/// Cat with all of its photos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub created_by: i64,
    pub photos: Vec<PhotoRefResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoRefResponse {
    pub id: i64,
    pub url: String,
    pub is_primary: bool,
}

impl From<PhotoRef> for PhotoRefResponse {
    fn from(photo: PhotoRef) -> Self {
        Self {
            id: photo.id.value(),
            url: photo.url,
            is_primary: photo.is_primary,
        }
    }
}

impl From<CatWithPhotos> for CatResponse {
    fn from(value: CatWithPhotos) -> Self {
        let CatWithPhotos { cat, photos } = value;
        Self {
            id: cat.id.value(),
            name: cat.name.as_str().to_string(),
            age: cat.age.value(),
            description: cat.description.as_str().to_string(),
            created_at: cat.created_at,
            created_by: cat.created_by.value(),
            photos: photos.into_iter().map(PhotoRefResponse::from).collect(),
        }
    }
}

/// List entry with the display photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatSummaryResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub photo_id: Option<i64>,
    pub url: Option<String>,
}

impl From<CatSummary> for CatSummaryResponse {
    fn from(cat: CatSummary) -> Self {
        Self {
            id: cat.id.value(),
            name: cat.name.as_str().to_string(),
            age: cat.age.value(),
            photo_id: cat.photo_id.map(|id| id.value()),
            url: cat.url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCatResponse {
    pub id: i64,
    pub photo: UploadResponse,
}

// ============================================================================
// Updates
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCatRequest {
    pub name: String,
    pub age: i32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCatResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub description: String,
}

impl From<Cat> for UpdateCatResponse {
    fn from(cat: Cat) -> Self {
        Self {
            id: cat.id.value(),
            name: cat.name.as_str().to_string(),
            age: cat.age.value(),
            description: cat.description.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAgeRequest {
    pub age: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDescriptionRequest {
    pub description: String,
}

/// Id of the cat or photo that was changed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: i64,
}

// ============================================================================
// Photos
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub id: i64,
    pub url: String,
    pub cat_id: i64,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CatPhoto> for PhotoResponse {
    fn from(photo: CatPhoto) -> Self {
        Self {
            id: photo.id.value(),
            url: photo.url,
            cat_id: photo.cat_id.value(),
            file_name: photo.file_name,
            file_size: photo.file_size,
            mime_type: photo.mime_type,
            is_primary: photo.is_primary,
            created_at: photo.created_at,
        }
    }
}

/// Per-file upload report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub uploaded_count: usize,
    pub failed_count: usize,
    pub uploaded_photos: Vec<UploadedPhotoResponse>,
    pub errors: Vec<UploadErrorResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedPhotoResponse {
    pub id: i64,
    pub url: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadErrorResponse {
    pub file_name: String,
    pub error: String,
}

impl From<UploadedPhoto> for UploadedPhotoResponse {
    fn from(photo: UploadedPhoto) -> Self {
        Self {
            id: photo.id.value(),
            url: photo.url,
            file_name: photo.file_name,
        }
    }
}

impl From<FailedUpload> for UploadErrorResponse {
    fn from(failed: FailedUpload) -> Self {
        Self {
            file_name: failed.file_name,
            error: failed.error,
        }
    }
}

impl From<UploadReport> for UploadResponse {
    fn from(report: UploadReport) -> Self {
        Self {
            message: report.message(),
            uploaded_count: report.uploaded.len(),
            failed_count: report.failed.len(),
            uploaded_photos: report.uploaded.into_iter().map(Into::into).collect(),
            errors: report.failed.into_iter().map(Into::into).collect(),
        }
    }
}
