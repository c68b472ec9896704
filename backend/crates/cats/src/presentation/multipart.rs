//! Multipart Form Reader
//!
//! Collects text fields and the `files` parts of a cat form. File parts are
//! read chunk by chunk; once a file passes the size cap the rest of it is
//! drained and dropped, so memory per file stays bounded by the cap. Text
//! parts are capped at [`MAX_TEXT_FIELD_BYTES`] and fail the form past it.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};
use bytes::BytesMut;

use crate::application::config::CatsConfig;
use crate::domain::entity::photo::PhotoUpload;
use crate::error::{CatsError, CatsResult};

/// Name of the multipart part carrying photos
pub const FILES_FIELD: &str = "files";

/// Largest accepted text part. A 1000 character description fits in it.
pub const MAX_TEXT_FIELD_BYTES: usize = 4 * 1024;

#[derive(Debug, Default)]
pub struct CatForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<PhotoUpload>,
}

impl CatForm {
    /// A text field that must be present
    pub fn required(&self, name: &str) -> CatsResult<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| CatsError::InvalidForm(format!("missing form field: {}", name)))
    }
}

fn form_error(e: MultipartError) -> CatsError {
    tracing::debug!(error = %e, "Multipart read failed");
    CatsError::InvalidForm("failed to parse multipart form".to_string())
}

pub async fn read_form(mut multipart: Multipart, config: &CatsConfig) -> CatsResult<CatForm> {
    let mut form = CatForm::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or("").to_string();

        if name == FILES_FIELD {
            if form.files.len() == config.max_files {
                return Err(CatsError::InvalidForm("too many files in form".to_string()));
            }
            form.files.push(read_file(field, config.max_file_size).await?);
        } else if field.file_name().is_none() {
            let text = read_text(field, &name).await?;
            form.fields.insert(name, text);
        }
        // Unknown file parts are skipped by the next `next_field` call
    }

    Ok(form)
}

async fn read_text(mut field: Field<'_>, name: &str) -> CatsResult<String> {
    let mut buf = Vec::new();

    while let Some(chunk) = field.chunk().await.map_err(form_error)? {
        if buf.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(CatsError::InvalidForm(format!("form field too large: {}", name)));
        }
        buf.extend_from_slice(&chunk);
    }

    String::from_utf8(buf)
        .map_err(|_| CatsError::InvalidForm("failed to parse multipart form".to_string()))
}

async fn read_file(mut field: Field<'_>, max_size: u64) -> CatsResult<PhotoUpload> {
    let file_name = field.file_name().unwrap_or("").to_string();
    let mime_type = field.content_type().unwrap_or("").to_string();

    let mut buf = BytesMut::new();
    let mut size: u64 = 0;

    while let Some(chunk) = field.chunk().await.map_err(form_error)? {
        size += chunk.len() as u64;
        if size <= max_size {
            buf.extend_from_slice(&chunk);
        } else if !buf.is_empty() {
            buf = BytesMut::new();
        }
    }

    Ok(PhotoUpload {
        file_name,
        mime_type,
        size,
        data: buf.freeze(),
    })
}
