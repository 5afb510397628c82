//! Routes a file name to the extractor that can handle it

use crate::types::ExtractorKind;

/// Extensions accepted for upload, lower-case without the dot
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "txt", "docx", "pdf", "png", "jpg", "jpeg", "gif", "bmp", "tiff",
];

/// Pick an extractor from the final extension of `file_name`.
///
/// Matching is case-insensitive. Returns `None` for unsupported files,
/// including names with no extension at all.
pub fn classify(file_name: &str) -> Option<ExtractorKind> {
    let (_, ext) = file_name.rsplit_once('.')?;

    match ext.to_lowercase().as_str() {
        "txt" => Some(ExtractorKind::PlainText),
        "docx" => Some(ExtractorKind::Docx),
        "pdf" => Some(ExtractorKind::PdfPlaceholder),
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "tiff" => Some(ExtractorKind::ImageOcr),
        _ => None,
    }
}
