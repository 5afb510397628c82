//! Report selection: remote analysis first, heuristic fallback

use std::sync::Arc;

use super::heuristic::HeuristicAnalyzer;
use crate::config::AppConfig;
use crate::error::Result;
use crate::providers::{AnalysisProvider, AnthropicClient};
use crate::types::{AnalysisOutcome, AnalysisReport, NormalizedDocument, ReportSource};

/// Produces a report for every document; never fails
#[derive(Clone)]
pub struct DocumentAnalyzer {
    provider: Option<Arc<dyn AnalysisProvider>>,
    heuristic: HeuristicAnalyzer,
}

impl DocumentAnalyzer {
    pub fn new(provider: Option<Arc<dyn AnalysisProvider>>, heuristic: HeuristicAnalyzer) -> Self {
        Self {
            provider,
            heuristic,
        }
    }

    /// Build from config; the remote provider is enabled only with an API key
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let provider: Option<Arc<dyn AnalysisProvider>> = if config.llm.is_enabled() {
            let client = AnthropicClient::new(&config.llm)?;
            tracing::info!("Remote analysis enabled: anthropic ({})", config.llm.model);
            Some(Arc::new(client))
        } else {
            tracing::info!("No ANTHROPIC_API_KEY set; using heuristic analysis only");
            None
        };

        Ok(Self::new(provider, HeuristicAnalyzer::new(&config.analyzer)))
    }

    pub fn provider(&self) -> Option<&dyn AnalysisProvider> {
        self.provider.as_deref()
    }

    pub fn heuristic(&self) -> &HeuristicAnalyzer {
        &self.heuristic
    }

    /// Analyze `document` with the remote provider, falling back to the heuristic
    pub async fn analyze(&self, document: &NormalizedDocument) -> AnalysisOutcome {
        let Some(provider) = &self.provider else {
            return self.fallback(document, None);
        };

        match provider.analyze(document).await {
            Ok(text) => {
                tracing::info!(
                    "Remote analysis complete via {} ({} chars)",
                    provider.name(),
                    text.len()
                );
                AnalysisOutcome {
                    report: AnalysisReport::new(text),
                    source: ReportSource::Remote {
                        provider: provider.name().to_string(),
                        model: provider.model().to_string(),
                    },
                    fallback_reason: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Remote analysis via {} failed, using heuristic report: {}",
                    provider.name(),
                    e
                );
                self.fallback(document, Some(e.to_string()))
            }
        }
    }

    fn fallback(&self, document: &NormalizedDocument, reason: Option<String>) -> AnalysisOutcome {
        AnalysisOutcome {
            report: self.heuristic.analyze_document(document),
            source: ReportSource::Heuristic,
            fallback_reason: reason,
        }
    }
}
