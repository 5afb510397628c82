//! uplifter: document intake and analysis service
//!
//! Accepts a document (plain text, Word, PDF or image), extracts its text with
//! progress reporting, and produces a structured report. Reports come from a
//! remote language-model service when one is configured, otherwise (or when
//! the service fails) from a deterministic heuristic analyzer.

pub mod analysis;
pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod processing;
pub mod providers;
pub mod server;
pub mod types;

pub use analysis::{DocumentAnalyzer, HeuristicAnalyzer};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use processing::{ExtractionCoordinator, ExtractionJob, JobStatus};
pub use types::{
    document::{Category, ExtractorKind, NormalizedDocument, SourceFile},
    report::{AnalysisOutcome, AnalysisReport, ReportSource},
};
