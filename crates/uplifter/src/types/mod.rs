//! Core types for the document pipeline

pub mod document;
pub mod report;

pub use document::{Category, ExtractorKind, NormalizedDocument, SourceFile, SourceFileInfo};
pub use report::{AnalysisOutcome, AnalysisReport, ReportSource};
