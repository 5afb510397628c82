//! Document intake: format detection and text extraction

mod classifier;
mod docx;
mod extractor;
pub mod ocr;
mod plain_text;
mod registry;

pub use classifier::{classify, SUPPORTED_EXTENSIONS};
pub use docx::DocxExtractor;
pub use extractor::{ProgressReporter, TextExtractor};
pub use ocr::{ImageOcrExtractor, OcrEngine, TesseractEngine};
pub use plain_text::{PdfPlaceholderExtractor, PlainTextExtractor, PDF_ADVISORY};
pub use registry::ExtractorRegistry;
