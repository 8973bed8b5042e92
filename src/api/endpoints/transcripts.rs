//! Transcript endpoints: list, fetch, upload.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::TranscriptEntry;

const ALLOWED_EXTENSIONS: &[&str] = &[".txt", ".md", ".docx"];

#[derive(Serialize)]
pub struct TranscriptListResponse {
    pub transcripts: Vec<TranscriptEntry>,
}

/// `GET /api/transcripts/list`: stored transcripts with their
/// processed flags.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<TranscriptListResponse>, ApiError> {
    let transcripts = ctx.store.list_transcripts().map_err(ApiError::from)?;
    Ok(Json(TranscriptListResponse { transcripts }))
}

#[derive(Serialize)]
pub struct TranscriptDetailResponse {
    pub success: bool,
    pub filename: String,
    pub content: String,
}

/// `GET /api/transcripts/:id`: transcript content by blob key.
///
/// Keys contain a slash, so clients URL-encode them into the path
/// segment.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptDetailResponse>, ApiError> {
    let (filename, content) = ctx
        .store
        .get_transcript(&id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Transcript not found: {id}")))?;

    Ok(Json(TranscriptDetailResponse {
        success: true,
        filename,
        content,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub file_id: String,
}

/// `POST /api/transcripts/upload`: multipart upload of a transcript
/// file under the `file` field.
pub async fn upload(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("transcript.txt").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {e}")))?;
            file = Some((filename, bytes.to_vec()));
        }
    }

    let Some((filename, bytes)) = file else {
        return Err(ApiError::BadRequest("No file provided.".to_string()));
    };

    let lower = filename.to_lowercase();
    if !ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return Err(ApiError::BadRequest(
            "Invalid file format. Only .txt, .md, and .docx files are supported.".to_string(),
        ));
    }

    let file_id = ctx
        .store
        .save_transcript(&filename, &bytes)
        .map_err(ApiError::from)?;

    Ok(Json(UploadResponse {
        success: true,
        message: "File uploaded successfully".to_string(),
        file_id,
    }))
}
