//! Add Photos Use Case
//!
//! Uploads a batch of files for one cat. Every file is handled on its own:
//! a rejected or failed file is recorded in the report and the rest of the
//! batch carries on.

use std::sync::Arc;

use crate::application::config::CatsConfig;
use crate::domain::entity::photo::{
    FailedUpload, NewCatPhoto, PhotoUpload, UploadReport, UploadedPhoto,
};
use crate::domain::repository::{CatPhotoRepository, PhotoStorage};
use crate::domain::value_object::{
    CatId,
    photo_upload::{check_upload, object_key},
};
use crate::error::{CatsError, CatsResult};

const SAVE_FAILED: &str = "failed to save file";

pub struct AddPhotosUseCase<P, S>
where
    P: CatPhotoRepository,
    S: PhotoStorage,
{
    photo_repo: Arc<P>,
    storage: Arc<S>,
    config: Arc<CatsConfig>,
}

impl<P, S> AddPhotosUseCase<P, S>
where
    P: CatPhotoRepository,
    S: PhotoStorage,
{
    pub fn new(photo_repo: Arc<P>, storage: Arc<S>, config: Arc<CatsConfig>) -> Self {
        Self {
            photo_repo,
            storage,
            config,
        }
    }

    /// Reject the batch as a whole only for its size; per-file problems
    /// go into the report.
    pub async fn execute(&self, cat_id: CatId, files: Vec<PhotoUpload>) -> CatsResult<UploadReport> {
        if files.is_empty() {
            return Err(CatsError::InvalidForm("no file found in form".to_string()));
        }
        if files.len() > self.config.max_files {
            return Err(CatsError::InvalidForm("too many files in form".to_string()));
        }

        Ok(self.upload_batch(cat_id, files).await)
    }

    /// Same as [`execute`](Self::execute) but an empty batch is fine
    pub(crate) async fn upload_batch(&self, cat_id: CatId, files: Vec<PhotoUpload>) -> UploadReport {
        let mut report = UploadReport {
            total: files.len(),
            ..Default::default()
        };

        for file in files {
            match self.upload_one(cat_id, file).await {
                Ok(uploaded) => report.uploaded.push(uploaded),
                Err(failed) => report.failed.push(failed),
            }
        }

        tracing::info!(
            cat_id = %cat_id,
            uploaded = report.uploaded.len(),
            failed = report.failed.len(),
            "Photo batch processed"
        );

        report
    }

    async fn upload_one(&self, cat_id: CatId, file: PhotoUpload) -> Result<UploadedPhoto, FailedUpload> {
        if let Err(rejection) = check_upload(file.size, &file.mime_type, self.config.max_file_size) {
            return Err(FailedUpload {
                file_name: file.file_name,
                error: rejection.to_string(),
                server_side: false,
            });
        }

        let key = object_key(cat_id, &file.file_name);
        let file_size = file.size as i64;

        let url = match self.storage.put(&key, file.data, &file.mime_type).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(cat_id = %cat_id, key = %key, error = %e, "Photo blob upload failed");
                return Err(server_failure(file.file_name));
            }
        };

        let row = NewCatPhoto {
            cat_id,
            object_key: key,
            url,
            file_name: file.file_name,
            file_size,
            mime_type: file.mime_type,
        };

        match self.photo_repo.insert(&row).await {
            Ok(photo) => Ok(UploadedPhoto {
                id: photo.id,
                url: photo.url,
                file_name: photo.file_name,
            }),
            Err(e) => {
                tracing::warn!(cat_id = %cat_id, key = %row.object_key, error = %e, "Photo row insert failed");
                // Orphaned blob otherwise
                if let Err(e) = self.storage.delete(&row.object_key).await {
                    tracing::warn!(key = %row.object_key, error = %e, "Orphaned photo blob left behind");
                }
                Err(server_failure(row.file_name))
            }
        }
    }
}

fn server_failure(file_name: String) -> FailedUpload {
    FailedUpload {
        file_name,
        error: SAVE_FAILED.to_string(),
        server_side: true,
    }
}
