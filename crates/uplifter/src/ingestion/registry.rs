//! Extractor registry keyed by extractor kind

use std::collections::HashMap;
use std::sync::Arc;

use super::docx::DocxExtractor;
use super::extractor::TextExtractor;
use super::ocr::{ImageOcrExtractor, OcrEngine, TesseractEngine};
use super::plain_text::{PdfPlaceholderExtractor, PlainTextExtractor};
use crate::config::ExtractionConfig;
use crate::types::ExtractorKind;

/// Lookup table from [`ExtractorKind`] to the extractor that implements it
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<ExtractorKind, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in extractor; OCR goes through tesseract
    pub fn with_defaults(config: &ExtractionConfig) -> Self {
        let engine: Arc<dyn OcrEngine> = Arc::new(TesseractEngine::new(&config.ocr));
        Self::with_ocr_engine(engine)
    }

    /// Registry with every built-in extractor and a caller-supplied OCR engine
    pub fn with_ocr_engine(engine: Arc<dyn OcrEngine>) -> Self {
        let mut registry = Self::new();
        registry.register(PlainTextExtractor);
        registry.register(DocxExtractor);
        registry.register(PdfPlaceholderExtractor);
        registry.register(ImageOcrExtractor::new(engine));
        registry
    }

    /// Register an extractor under its own kind, replacing any previous one
    pub fn register<E: TextExtractor + 'static>(&mut self, extractor: E) {
        self.register_arc(Arc::new(extractor));
    }

    pub fn register_arc(&mut self, extractor: Arc<dyn TextExtractor>) {
        self.extractors.insert(extractor.kind(), extractor);
    }

    /// Get the extractor for a kind
    pub fn get(&self, kind: ExtractorKind) -> Option<Arc<dyn TextExtractor>> {
        self.extractors.get(&kind).cloned()
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}
