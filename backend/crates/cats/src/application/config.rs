//! Application Configuration
//!
//! Configuration for the Cats application layer.

use std::time::Duration;

/// Cats application configuration
#[derive(Debug, Clone)]
pub struct CatsConfig {
    /// Largest accepted photo (50 MiB)
    pub max_file_size: u64,
    /// Most files accepted in one multipart batch
    pub max_files: usize,
    /// Wall-clock budget for plain CRUD routes
    pub request_timeout: Duration,
    /// Wall-clock budget for routes that upload photos
    pub upload_timeout: Duration,
}

impl Default for CatsConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_files: 20,
            request_timeout: Duration::from_secs(5),
            upload_timeout: Duration::from_secs(30),
        }
    }
}

impl CatsConfig {
    /// Create config for development
    pub fn development() -> Self {
        Self::default()
    }

    /// Request body limit for upload routes
    ///
    /// Room for a full batch plus one oversized file, so the oversized file
    /// is reported per file instead of failing the whole request.
    pub fn upload_body_limit(&self) -> usize {
        let files = self.max_files as u64 + 1;
        usize::try_from(files.saturating_mul(self.max_file_size)).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatsConfig::default();
        assert_eq!(config.max_file_size, 52_428_800);
        assert_eq!(config.max_files, 20);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.upload_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_upload_body_limit() {
        let config = CatsConfig {
            max_file_size: 10,
            max_files: 2,
            ..Default::default()
        };
        assert_eq!(config.upload_body_limit(), 30);
    }
}
