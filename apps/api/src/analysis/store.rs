//! Persistence for completed analyses: one Postgres row per analysis, one
//! S3 object per uploaded deck file.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, DeckAnalysis};

pub async fn insert_analysis(pool: &PgPool, analysis: &DeckAnalysis) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO analyses
            (id, user_id, file_name, file_url, scores, insights,
             recommendations, created_at, is_premium)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(analysis.id)
    .bind(analysis.user_id)
    .bind(&analysis.file_name)
    .bind(&analysis.file_url)
    .bind(Json(&analysis.scores))
    .bind(Json(&analysis.insights))
    .bind(Json(&analysis.recommendations))
    .bind(analysis.created_at)
    .bind(analysis.is_premium)
    .execute(pool)
    .await?;
    Ok(())
}

/// All analyses for a user, newest first.
pub async fn list_analyses(pool: &PgPool, user_id: Uuid) -> Result<Vec<DeckAnalysis>, AppError> {
    let rows: Vec<AnalysisRow> =
        sqlx::query_as("SELECT * FROM analyses WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(DeckAnalysis::from).collect())
}

/// One analysis, scoped to its owner.
pub async fn get_analysis(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<DeckAnalysis, AppError> {
    let row: Option<AnalysisRow> =
        sqlx::query_as("SELECT * FROM analyses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    row.map(DeckAnalysis::from)
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}

/// Uploads the original deck PDF and returns its stored location.
pub async fn upload_deck_file(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    user_id: Uuid,
    analysis_id: Uuid,
    data: Bytes,
) -> Result<String, AppError> {
    let key = format!("decks/{user_id}/{analysis_id}.pdf");
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .content_type("application/pdf")
        .body(ByteStream::from(data))
        .send()
        .await
        .map_err(|e| AppError::S3(e.to_string()))?;

    info!("Uploaded deck file to s3://{bucket}/{key}");
    Ok(format!("s3://{bucket}/{key}"))
}
