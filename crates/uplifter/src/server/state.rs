//! Application state for the uplifter server

use std::sync::Arc;

use crate::analysis::DocumentAnalyzer;
use crate::config::AppConfig;
use crate::error::Result;
use crate::ingestion::ExtractorRegistry;
use crate::processing::ExtractionCoordinator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Current extraction job and its extractors
    coordinator: ExtractionCoordinator,
    /// Remote analysis with heuristic fallback
    analyzer: DocumentAnalyzer,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing uplifter application state...");

        let registry = ExtractorRegistry::with_defaults(&config.extraction);
        tracing::info!(
            "Extractors registered: {} (OCR via {} -l {})",
            registry.len(),
            config.extraction.ocr.binary.display(),
            config.extraction.ocr.language
        );

        let coordinator = ExtractionCoordinator::new(registry, config.extraction.max_chars);
        let analyzer = DocumentAnalyzer::from_config(&config)?;

        Ok(Self::from_parts(config, coordinator, analyzer))
    }

    /// Assemble state from prebuilt components
    pub fn from_parts(
        config: AppConfig,
        coordinator: ExtractionCoordinator,
        analyzer: DocumentAnalyzer,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                coordinator,
                analyzer,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn coordinator(&self) -> &ExtractionCoordinator {
        &self.inner.coordinator
    }

    pub fn analyzer(&self) -> &DocumentAnalyzer {
        &self.inner.analyzer
    }
}
