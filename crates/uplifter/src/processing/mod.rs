//! Background extraction with a single current job

mod coordinator;
mod job;

pub use coordinator::ExtractionCoordinator;
pub use job::{
    normalize_text, DegradedReason, ExtractionJob, ExtractionSnapshot, JobStatus,
    EMPTY_PLACEHOLDER, FAILED_PLACEHOLDER, UNSUPPORTED_PLACEHOLDER,
};
