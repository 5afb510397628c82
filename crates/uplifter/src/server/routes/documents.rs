//! Document upload endpoint

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::ingestion::classify;
use crate::server::state::AppState;
use crate::types::{ExtractorKind, SourceFile};

/// Response from document upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub job_id: Uuid,
    pub filename: String,
    pub byte_size: u64,
    pub supported: bool,
    pub kind: Option<ExtractorKind>,
}

/// POST /api/documents - Upload one document and start extraction
///
/// Takes the first multipart field that carries a file name. Any previous
/// document is replaced.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let mime_hint = field.content_type().unwrap_or("").to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidRequest(format!("Failed to read file {}: {}", filename, e)))?;

        let file = SourceFile::new(filename, mime_hint, data);
        let filename = file.name().to_string();
        let byte_size = file.byte_size();
        let kind = classify(&filename);

        tracing::info!(
            "Received upload: {} ({} bytes, {})",
            filename,
            byte_size,
            file.mime_hint()
        );

        let job_id = state.coordinator().submit(file);

        return Ok((
            StatusCode::ACCEPTED,
            Json(UploadResponse {
                job_id,
                filename,
                byte_size,
                supported: kind.is_some(),
                kind,
            }),
        ));
    }

    Err(Error::InvalidRequest("No file provided".to_string()))
}
