//! Word document extraction

use async_trait::async_trait;

use super::extractor::{ProgressReporter, TextExtractor};
use crate::error::{Error, Result};
use crate::types::{ExtractorKind, SourceFile};

/// Extracts raw paragraph text from `.docx` containers.
///
/// Run text is concatenated per paragraph and paragraphs are separated by a
/// blank line. Styling is dropped. Hyperlink text stays inline, and each
/// table cell paragraph becomes its own paragraph in row order.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocxExtractor {
    fn read_paragraphs(file_name: &str, data: &[u8]) -> Result<Vec<String>> {
        let doc = docx_rs::read_docx(data).map_err(|e| Error::file_parse(file_name, e.to_string()))?;

        let mut paragraphs = Vec::new();
        for child in &doc.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(p) => paragraphs.push(paragraph_text(p)),
                docx_rs::DocumentChild::Table(t) => collect_table(t, &mut paragraphs),
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    push_children(&paragraph.children, &mut text);
    text
}

fn push_children(children: &[docx_rs::ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                for child in &run.children {
                    if let docx_rs::RunChild::Text(t) = child {
                        text.push_str(&t.text);
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => push_children(&link.children, text),
            _ => {}
        }
    }
}

fn collect_table(table: &docx_rs::Table, paragraphs: &mut Vec<String>) {
    for docx_rs::TableChild::TableRow(row) in &table.rows {
        for docx_rs::TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(p) => paragraphs.push(paragraph_text(p)),
                    docx_rs::TableCellContent::Table(nested) => collect_table(nested, paragraphs),
                    _ => {}
                }
            }
        }
    }
}

#[async_trait]
impl TextExtractor for DocxExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Docx
    }

    async fn extract(&self, file: &SourceFile, progress: &ProgressReporter) -> Result<String> {
        progress.report(10);

        // Container parsing is synchronous and scales with the upload
        let name = file.name().to_string();
        let data = file.bytes();
        let paragraphs =
            tokio::task::spawn_blocking(move || Self::read_paragraphs(&name, &data))
                .await
                .map_err(|e| Error::file_parse(file.name(), format!("Parser task failed: {}", e)))??;
        progress.report(50);

        tracing::debug!(
            "Read {} paragraphs from '{}'",
            paragraphs.len(),
            file.name()
        );

        let text = paragraphs.join("\n\n");
        progress.complete();
        Ok(text)
    }
}
