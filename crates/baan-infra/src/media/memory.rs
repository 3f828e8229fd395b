//! In-memory media store - used as fallback when no storage service is
//! configured. Returned URLs are stable for the process lifetime only.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use baan_core::ports::{MediaError, MediaStore};

/// Media store that keeps uploads in a process-local map.
#[derive(Default)]
pub struct InMemoryMediaStore {
    uploads: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<String, MediaError> {
        let key = format!("{}/{}", Uuid::new_v4(), filename);
        self.uploads.write().await.insert(key.clone(), bytes);
        Ok(format!("memory://{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_returns_stable_url() {
        let store = InMemoryMediaStore::new();

        let url = store.upload("photo.jpg", vec![1, 2, 3]).await.unwrap();

        assert!(url.starts_with("memory://"));
        assert!(url.ends_with("/photo.jpg"));
        assert_eq!(store.uploads.read().await.len(), 1);
    }
}
