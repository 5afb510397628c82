//! Extraction job state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ExtractorKind, SourceFileInfo};

/// Text stored for files with no matching extractor
pub const UNSUPPORTED_PLACEHOLDER: &str =
    "Document uploaded successfully. Processing may take a moment...";

/// Text stored when extraction succeeds with nothing to show
pub const EMPTY_PLACEHOLDER: &str = "Text extracted successfully. Ready for analysis.";

/// Text stored when the extractor fails
pub const FAILED_PLACEHOLDER: &str = "Document loaded. Click analyze to process with AI.";

/// Job status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    /// Not produced by the coordinator; extractor errors and panics settle as
    /// `Succeeded` with a degraded flag
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Why the stored text differs from what the file actually contains
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DegradedReason {
    /// No extractor handles this file
    UnsupportedFormat,
    /// The extractor returned an error
    ExtractionFailed { message: String },
    /// The extractor returned no text
    EmptyExtraction,
    /// Text was cut to the configured character cap
    Truncated { original_chars: usize },
}

impl DegradedReason {
    /// Whether the stored text is a placeholder rather than document content
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, Self::Truncated { .. })
    }
}

/// One attempt to turn a source file into plain text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionJob {
    pub id: Uuid,
    pub file: SourceFileInfo,
    /// `None` when the file is unsupported
    pub kind: Option<ExtractorKind>,
    pub status: JobStatus,
    pub progress_percent: u8,
    pub result_text: Option<String>,
    pub degraded: Option<DegradedReason>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExtractionJob {
    pub fn new(file: SourceFileInfo, kind: Option<ExtractorKind>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            file,
            kind,
            status: JobStatus::Pending,
            progress_percent: 0,
            result_text: None,
            degraded: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to a terminal state with the given text
    pub(crate) fn finish(
        &mut self,
        status: JobStatus,
        text: String,
        degraded: Option<DegradedReason>,
    ) {
        self.status = status;
        self.progress_percent = 100;
        self.result_text = Some(text);
        self.degraded = degraded;
        self.updated_at = Utc::now();
    }

    pub fn snapshot(&self) -> ExtractionSnapshot {
        ExtractionSnapshot::from(self)
    }
}

/// Job view without the extracted text, for progress polling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSnapshot {
    pub job_id: Uuid,
    pub filename: String,
    pub byte_size: u64,
    pub kind: Option<ExtractorKind>,
    pub status: JobStatus,
    pub progress_percent: u8,
    pub text_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<DegradedReason>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ExtractionJob> for ExtractionSnapshot {
    fn from(job: &ExtractionJob) -> Self {
        Self {
            job_id: job.id,
            filename: job.file.name.clone(),
            byte_size: job.file.byte_size,
            kind: job.kind,
            status: job.status,
            progress_percent: job.progress_percent,
            text_chars: job.result_text.as_ref().map(|t| t.chars().count()),
            degraded: job.degraded.clone(),
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// Cap `text` at `max_chars` characters, never splitting a code point
pub fn normalize_text(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Settle raw extractor output into stored text plus degradation marker
pub(crate) fn settle_text(text: String, max_chars: usize) -> (String, Option<DegradedReason>) {
    if text.trim().is_empty() {
        return (EMPTY_PLACEHOLDER.to_string(), Some(DegradedReason::EmptyExtraction));
    }

    let capped = normalize_text(&text, max_chars);
    if capped.len() < text.len() {
        let original_chars = text.chars().count();
        (
            capped.to_string(),
            Some(DegradedReason::Truncated { original_chars }),
        )
    } else {
        (text, None)
    }
}
