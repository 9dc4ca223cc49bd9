use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::analysis::extract::TextExtractor;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Session store backend.
    pub redis: RedisClient,
    /// Uploaded deck files land here.
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable deck text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}
