//! Object storage port.
//!
//! The application never interprets image binaries; it hands them to the
//! storage service and stores whatever URL comes back.

use async_trait::async_trait;

/// External object-storage service.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload a binary and return its stable public URL.
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<String, MediaError>;
}

/// Object-storage errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Storage service unavailable: {0}")]
    Unavailable(String),
}
