//! Meeting data endpoints: generate from a transcript, list, fetch.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::MeetingData;
use crate::pipeline::assemble;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub transcript_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
    pub meeting_data_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_processed: Option<bool>,
}

/// `POST /api/meeting-data/generate`: run the extraction pipeline on a
/// stored transcript.
///
/// Generation is idempotent per transcript: a transcript that already
/// has a meeting record returns that record's id instead of
/// reprocessing.
pub async fn generate(
    State(ctx): State<ApiContext>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let transcript_id = request.transcript_id;

    if let Some(existing) = ctx
        .store
        .find_by_source(&transcript_id)
        .map_err(ApiError::from)?
    {
        tracing::info!(
            transcript_id = %transcript_id,
            meeting_id = %existing.id,
            "Transcript already processed"
        );
        return Ok(Json(GenerateResponse {
            success: true,
            message: "Meeting data already exists for this transcript".to_string(),
            meeting_data_id: existing.id,
            already_processed: Some(true),
        }));
    }

    let (_, content) = ctx
        .store
        .get_transcript(&transcript_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Transcript not found: {transcript_id}")))?;

    let pipeline = ctx.pipeline.clone();
    let store = ctx.store.clone();
    let source = transcript_id.clone();

    // The pipeline makes blocking generation calls; keep it off the
    // async workers.
    let meeting_data_id = tokio::task::spawn_blocking(move || -> Result<String, ApiError> {
        let record = pipeline
            .run(&content, &source)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let data = assemble(&record, None, Local::now().naive_local());
        store.persist_outputs(&record, &data).map_err(ApiError::from)?;
        Ok(data.id)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Pipeline task failed: {e}")))??;

    Ok(Json(GenerateResponse {
        success: true,
        message: "Meeting data generated successfully".to_string(),
        meeting_data_id,
        already_processed: None,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDataListResponse {
    pub meeting_data: Vec<MeetingData>,
}

/// `GET /api/meeting-data/list`: every assembled meeting record.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<MeetingDataListResponse>, ApiError> {
    let meeting_data = ctx.store.list_meeting_data().map_err(ApiError::from)?;
    Ok(Json(MeetingDataListResponse { meeting_data }))
}

/// `GET /api/meeting-data/:id`: one assembled meeting record.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<MeetingData>, ApiError> {
    ctx.store
        .get_meeting_data(&id)
        .map_err(ApiError::from)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Meeting data not found: {id}")))
}
