use std::sync::Arc;

use sqlx::PgPool;

use crate::media::MediaStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable media backend. Default: S3MediaStore.
    pub media: Arc<dyn MediaStore>,
}
