//! Source files, extractor kinds and normalized documents

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Extractor variants the pipeline knows how to drive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    /// UTF-8 text file
    PlainText,
    /// Microsoft Word document (.docx)
    Docx,
    /// PDF (advisory text only, no extraction)
    PdfPlaceholder,
    /// Raster image run through OCR
    ImageOcr,
}

impl ExtractorKind {
    /// Every kind, in registration order
    pub const ALL: [ExtractorKind; 4] = [
        ExtractorKind::PlainText,
        ExtractorKind::Docx,
        ExtractorKind::PdfPlaceholder,
        ExtractorKind::ImageOcr,
    ];
}

impl std::fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractorKind::PlainText => write!(f, "plain_text"),
            ExtractorKind::Docx => write!(f, "docx"),
            ExtractorKind::PdfPlaceholder => write!(f, "pdf_placeholder"),
            ExtractorKind::ImageOcr => write!(f, "image_ocr"),
        }
    }
}

/// A user-selected file. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    mime_hint: String,
    data: Bytes,
}

impl SourceFile {
    /// Create a source file; the MIME hint is guessed from the name when empty
    pub fn new(name: impl Into<String>, mime_hint: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mut mime_hint = mime_hint.into();
        if mime_hint.trim().is_empty() {
            mime_hint = mime_guess::from_path(&name)
                .first_or_octet_stream()
                .essence_str()
                .to_string();
        }

        Self {
            name,
            mime_hint,
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_hint(&self) -> &str {
        &self.mime_hint
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Shared handle to the payload for work moved off the async runtime
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    pub fn byte_size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Serializable descriptor without the payload
    pub fn info(&self) -> SourceFileInfo {
        SourceFileInfo {
            name: self.name.clone(),
            byte_size: self.byte_size(),
            mime_hint: self.mime_hint.clone(),
        }
    }
}

/// File descriptor carried in job snapshots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceFileInfo {
    pub name: String,
    pub byte_size: u64,
    pub mime_hint: String,
}

/// Document-type tag controlling report framing and prompt selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Legal,
    Business,
    Academic,
    Technical,
    #[default]
    General,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Legal,
        Category::Business,
        Category::Academic,
        Category::Technical,
        Category::General,
    ];

    /// Parse a category name; unknown names fall back to `General`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "legal" => Self::Legal,
            "business" => Self::Business,
            "academic" => Self::Academic,
            "technical" => Self::Technical,
            _ => Self::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::Business => "business",
            Self::Academic => "academic",
            Self::Technical => "technical",
            Self::General => "general",
        }
    }

    /// Capitalized name used in report titles
    pub fn title(&self) -> &'static str {
        match self {
            Self::Legal => "Legal",
            Self::Business => "Business",
            Self::Academic => "Academic",
            Self::Technical => "Technical",
            Self::General => "General",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Legal => "Legal Documents",
            Self::Business => "Business Documents",
            Self::Academic => "Academic Documents",
            Self::Technical => "Technical Documents",
            Self::General => "General Documents",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Legal => "Expert analysis of contracts, agreements, and legal documents",
            Self::Business => "Analyze business plans, reports, and strategic documents",
            Self::Academic => "Research papers, theses, and academic publications",
            Self::Technical => "Technical specifications, architecture, and documentation",
            Self::General => "Any other document type for comprehensive analysis",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length-capped, category-tagged text ready for analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedDocument {
    text: String,
    category: Category,
}

impl NormalizedDocument {
    /// Build a normalized document, truncating `text` to `max_chars` characters
    pub fn new(text: &str, category: Category, max_chars: usize) -> Self {
        Self {
            text: crate::processing::normalize_text(text, max_chars).to_string(),
            category,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_name() {
        assert_eq!(Category::from_name("legal"), Category::Legal);
        assert_eq!(Category::from_name(" Technical "), Category::Technical);
        assert_eq!(Category::from_name("ACADEMIC"), Category::Academic);
        assert_eq!(Category::from_name("poetry"), Category::General);
        assert_eq!(Category::from_name(""), Category::General);
    }

    #[test]
    fn test_source_file_mime_guess() {
        let file = SourceFile::new("notes.txt", "", b"hello".to_vec());
        assert_eq!(file.mime_hint(), "text/plain");
        assert_eq!(file.byte_size(), 5);

        let file = SourceFile::new("scan.png", "image/x-custom", Vec::new());
        assert_eq!(file.mime_hint(), "image/x-custom");
    }

    #[test]
    fn test_normalized_document_caps_text() {
        let doc = NormalizedDocument::new("abcdef", Category::Business, 4);
        assert_eq!(doc.text(), "abcd");
        assert_eq!(doc.category(), Category::Business);
    }
}
