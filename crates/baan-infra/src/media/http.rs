//! HTTP-backed media store.

use async_trait::async_trait;
use serde::Deserialize;

use baan_core::ports::{MediaError, MediaStore};

/// Object-storage service configuration.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Upload endpoint of the storage service.
    pub upload_url: String,
    /// Folder the service files uploads under.
    pub folder: String,
}

/// Response body returned by the storage service.
#[derive(Debug, Deserialize)]
struct UploadReply {
    url: String,
}

/// Media store that ships binaries to an external storage service over
/// HTTP and echoes back the URL the service assigns.
pub struct HttpMediaStore {
    client: reqwest::Client,
    config: MediaConfig,
}

impl HttpMediaStore {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<String, MediaError> {
        tracing::debug!(filename, size = bytes.len(), "Uploading to storage service");

        let response = self
            .client
            .post(&self.config.upload_url)
            .query(&[
                ("folder", self.config.folder.as_str()),
                ("filename", filename),
            ])
            .body(bytes)
            .send()
            .await
            .map_err(|e| MediaError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MediaError::Rejected(format!(
                "storage service returned {}",
                response.status()
            )));
        }

        let reply: UploadReply = response
            .json()
            .await
            .map_err(|e| MediaError::Unavailable(e.to_string()))?;

        Ok(reply.url)
    }
}
