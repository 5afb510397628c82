//! Extraction progress endpoints

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio_stream::wrappers::WatchStream;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::processing::{DegradedReason, ExtractionSnapshot, JobStatus};
use crate::server::state::AppState;

/// GET /api/extraction - Current job progress
pub async fn get_extraction(State(state): State<AppState>) -> Result<Json<ExtractionSnapshot>> {
    state
        .coordinator()
        .current()
        .map(|job| Json(job.snapshot()))
        .ok_or_else(|| Error::NotFound("No document has been uploaded".to_string()))
}

/// GET /api/extraction/events - Stream of job snapshots
///
/// Sends the current snapshot on connect, then one event per change.
pub async fn extraction_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>> {
    let stream = WatchStream::new(state.coordinator().subscribe())
        .filter_map(futures::future::ready)
        .map(|job| Event::default().event("extraction").json_data(job.snapshot()));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Extracted text of the current job
#[derive(Debug, Serialize)]
pub struct ExtractionTextResponse {
    pub job_id: Uuid,
    pub filename: String,
    pub status: JobStatus,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<DegradedReason>,
}

/// GET /api/extraction/text - Normalized text of the current job
pub async fn get_extraction_text(
    State(state): State<AppState>,
) -> Result<Json<ExtractionTextResponse>> {
    let job = state
        .coordinator()
        .current()
        .ok_or_else(|| Error::NotFound("No document has been uploaded".to_string()))?;

    let text = match (job.status.is_terminal(), job.result_text) {
        (true, Some(text)) => text,
        _ => return Err(Error::ExtractionInProgress(job.file.name)),
    };

    Ok(Json(ExtractionTextResponse {
        job_id: job.id,
        filename: job.file.name,
        status: job.status,
        text,
        degraded: job.degraded,
    }))
}
