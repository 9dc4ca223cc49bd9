use axum::{
    extract::{Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::pipeline::analyze_deck;
use crate::analysis::readiness::{category_advice, classify_readiness, ReadinessLevel};
use crate::analysis::store;
use crate::auth::authenticate;
use crate::errors::AppError;
use crate::models::analysis::DeckAnalysis;
use crate::questions::{compose_deck_text, FormResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub deck_text: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionnaireRequest {
    pub responses: Vec<FormResponse>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: DeckAnalysis,
    pub readiness: ReadinessLevel,
}

impl From<DeckAnalysis> for AnalysisResponse {
    fn from(analysis: DeckAnalysis) -> Self {
        let readiness = classify_readiness(f64::from(analysis.scores.overall));
        AnalysisResponse {
            analysis,
            readiness,
        }
    }
}

/// POST /api/v1/decks/analyze — score already-extracted deck text.
pub async fn handle_analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let user = authenticate(&state, &headers).await?;
    if req.deck_text.trim().is_empty() {
        return Err(AppError::Validation("Deck text must not be empty".to_string()));
    }

    let analysis = analyze_deck(&req.deck_text, req.file_name, user.id, &state.llm).await?;
    store::insert_analysis(&state.db, &analysis).await?;

    info!(
        "Analyzed deck for user {}: overall {}",
        user.id, analysis.scores.overall
    );
    Ok(Json(AnalysisResponse::from(analysis)))
}

/// POST /api/v1/decks/upload — multipart PDF upload; extract, store, score.
pub async fn handle_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let user = authenticate(&state, &headers).await?;

    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(str::to_string);
            data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?,
            );
        }
    }
    let data = data.ok_or_else(|| AppError::Validation("Missing `file` field".to_string()))?;

    let deck_text = state.extractor.extract(data.clone()).await?;
    let mut analysis = analyze_deck(&deck_text, file_name, user.id, &state.llm).await?;

    let file_url = store::upload_deck_file(
        &state.s3,
        &state.config.s3_bucket,
        user.id,
        analysis.id,
        data,
    )
    .await?;
    analysis.file_url = Some(file_url);

    store::insert_analysis(&state.db, &analysis).await?;
    Ok(Json(AnalysisResponse::from(analysis)))
}

/// POST /api/v1/decks/questionnaire — score composed questionnaire answers.
pub async fn handle_questionnaire(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<QuestionnaireRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let user = authenticate(&state, &headers).await?;

    let deck_text = compose_deck_text(&req.responses);
    if deck_text.is_empty() {
        return Err(AppError::Validation(
            "At least one question must be answered".to_string(),
        ));
    }

    let analysis = analyze_deck(&deck_text, None, user.id, &state.llm).await?;
    store::insert_analysis(&state.db, &analysis).await?;
    Ok(Json(AnalysisResponse::from(analysis)))
}

/// GET /api/v1/decks
pub async fn handle_list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<DeckAnalysis>>, AppError> {
    let user = authenticate(&state, &headers).await?;
    let analyses = store::list_analyses(&state.db, user.id).await?;
    Ok(Json(analyses))
}

/// GET /api/v1/decks/:id
pub async fn handle_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let user = authenticate(&state, &headers).await?;
    let analysis = store::get_analysis(&state.db, user.id, id).await?;
    Ok(Json(AnalysisResponse::from(analysis)))
}

/// GET /api/v1/advice/:category
pub async fn handle_advice(
    Path(category): Path<String>,
) -> Json<&'static [&'static str]> {
    Json(category_advice(&category))
}
