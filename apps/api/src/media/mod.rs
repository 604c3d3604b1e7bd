//! Media storage for user-uploaded images (profile pictures, company logos).
//!
//! `AppState` holds an `Arc<dyn MediaStore>`; production uses `S3MediaStore`
//! against S3 or MinIO.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

/// Upper bound on a single uploaded image.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Stores `body` under `key` and returns the public URL of the object.
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<String, AppError>;
}

pub struct S3MediaStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
}

impl S3MediaStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_url: String) -> Self {
        Self {
            client,
            bucket,
            public_url,
        }
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<String, AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded media to s3://{}/{}", self.bucket, key);
        Ok(public_url(&self.public_url, key))
    }
}

/// Joins the public base URL and an object key.
pub fn public_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key.trim_start_matches('/'))
}

/// Maps an accepted image content type to a file extension.
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Keeps uploads in a map; used by router tests.
    #[derive(Default)]
    pub struct InMemoryMediaStore {
        pub objects: Mutex<HashMap<String, (Bytes, String)>>,
    }

    #[async_trait]
    impl MediaStore for InMemoryMediaStore {
        async fn put(
            &self,
            key: &str,
            body: Bytes,
            content_type: &str,
        ) -> Result<String, AppError> {
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_string(), (body, content_type.to_string()));
            Ok(public_url("memory://media", key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryMediaStore;
    use super::*;

    #[test]
    fn test_public_url_normalizes_slashes() {
        assert_eq!(
            public_url("http://cdn.local/bucket/", "/avatars/a.png"),
            "http://cdn.local/bucket/avatars/a.png"
        );
    }

    #[test]
    fn test_image_extension_accepts_common_types() {
        assert_eq!(image_extension("image/jpeg"), Some("jpg"));
        assert_eq!(image_extension("image/png"), Some("png"));
        assert_eq!(image_extension("image/webp"), Some("webp"));
    }

    #[test]
    fn test_image_extension_rejects_non_images() {
        assert_eq!(image_extension("application/pdf"), None);
        assert_eq!(image_extension("text/plain"), None);
    }

    #[tokio::test]
    async fn test_in_memory_store_records_object() {
        let store = InMemoryMediaStore::default();
        let url = store
            .put("avatars/x.png", Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap();
        assert_eq!(url, "memory://media/avatars/x.png");
        assert!(store.objects.lock().unwrap().contains_key("avatars/x.png"));
    }
}
