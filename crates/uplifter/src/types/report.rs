//! Analysis report types

use serde::{Deserialize, Serialize};

/// Formatted analysis report. Always produced whole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AnalysisReport(String);

impl AnalysisReport {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which stage produced a report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportSource {
    /// Remote language-model service
    Remote { provider: String, model: String },
    /// Local lexical heuristics
    Heuristic,
}

/// Report plus provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    pub source: ReportSource,
    /// Why the remote service was not used, if it was configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl AnalysisOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ReportSource::Heuristic)
    }
}
