//! Object Store Photo Storage
//!
//! Photo blobs in an S3-compatible bucket (MinIO in deployment,
//! `object_store::memory::InMemory` in tests).

use std::sync::Arc;

use bytes::Bytes;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use crate::domain::repository::PhotoStorage;
use crate::error::CatsResult;

/// Photo storage over any `ObjectStore`
#[derive(Clone)]
pub struct ObjectStorePhotoStorage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    public_base_url: String,
}

impl ObjectStorePhotoStorage {
    /// `public_base_url` is the externally reachable endpoint, without the
    /// bucket; URLs come out as `{public_base_url}/{bucket}/{key}`.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.public_base_url.trim_end_matches('/'),
            self.bucket,
            key
        )
    }
}

impl PhotoStorage for ObjectStorePhotoStorage {
    async fn put(&self, key: &str, data: Bytes, mime_type: &str) -> CatsResult<String> {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, mime_type.to_string().into());

        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&ObjectPath::from(key), PutPayload::from(data), opts)
            .await?;

        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> CatsResult<()> {
        match self.store.delete(&ObjectPath::from(key)).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
