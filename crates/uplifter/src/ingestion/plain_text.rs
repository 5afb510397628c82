//! Plain-text and PDF placeholder extractors

use async_trait::async_trait;

use super::extractor::{ProgressReporter, TextExtractor};
use crate::error::Result;
use crate::types::{ExtractorKind, SourceFile};

/// Advisory returned for PDF uploads in place of extracted text
pub const PDF_ADVISORY: &str =
    "PDF processing with OCR is being prepared. Please convert to image format for best results.";

/// Decodes the file as UTF-8, replacing invalid sequences
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::PlainText
    }

    async fn extract(&self, file: &SourceFile, progress: &ProgressReporter) -> Result<String> {
        let text = String::from_utf8_lossy(file.data()).into_owned();
        progress.complete();
        Ok(text)
    }
}

/// Named placeholder for PDF extraction; never reads the file
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfPlaceholderExtractor;

#[async_trait]
impl TextExtractor for PdfPlaceholderExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::PdfPlaceholder
    }

    async fn extract(&self, _file: &SourceFile, progress: &ProgressReporter) -> Result<String> {
        progress.complete();
        Ok(PDF_ADVISORY.to_string())
    }
}
