//! Optical character recognition for raster images
//!
//! The recognizer itself is external: [`TesseractEngine`] shells out to the
//! `tesseract` binary (tesseract-ocr package). Install with:
//! - Ubuntu/Debian: `apt install tesseract-ocr`
//! - macOS: `brew install tesseract`

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

use super::extractor::{ProgressReporter, TextExtractor};
use crate::config::OcrConfig;
use crate::error::{Error, Result};
use crate::types::{ExtractorKind, SourceFile};

/// Recognizes text in an image, reporting progress through `progress`
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Engine name for logging
    fn name(&self) -> &str;

    /// Recognize text in `image`. `file_name` carries the original extension.
    async fn recognize(
        &self,
        image: &[u8],
        file_name: &str,
        progress: &ProgressReporter,
    ) -> Result<String>;
}

/// OCR engine backed by the `tesseract` command-line tool
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
    language: String,
    timeout: Duration,
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            language: config.language.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Check if the binary can be launched
    pub async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn recognize(
        &self,
        image: &[u8],
        file_name: &str,
        progress: &ProgressReporter,
    ) -> Result<String> {
        progress.report_fraction(0.0);

        // tesseract sniffs the format from the extension, so keep it
        let suffix = file_name
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();
        let staged = tempfile::Builder::new()
            .prefix("uplifter-ocr-")
            .suffix(&suffix)
            .tempfile()
            .map_err(|e| Error::ocr(format!("Failed to create temp file: {}", e)))?;
        tokio::fs::write(staged.path(), image)
            .await
            .map_err(|e| Error::ocr(format!("Failed to stage image: {}", e)))?;

        tracing::debug!(
            "Running {} on '{}' ({} bytes, lang={})",
            self.binary.display(),
            file_name,
            image.len(),
            self.language
        );

        let run = Command::new(&self.binary)
            .arg(staged.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| {
                Error::ocr(format!(
                    "tesseract timed out after {}s on '{}'",
                    self.timeout.as_secs(),
                    file_name
                ))
            })?
            .map_err(|e| {
                Error::ocr(format!(
                    "Failed to run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        progress.report_fraction(1.0);
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Extractor that runs images through an [`OcrEngine`]
#[derive(Clone)]
pub struct ImageOcrExtractor {
    engine: Arc<dyn OcrEngine>,
}

impl ImageOcrExtractor {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl TextExtractor for ImageOcrExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::ImageOcr
    }

    async fn extract(&self, file: &SourceFile, progress: &ProgressReporter) -> Result<String> {
        let text = self
            .engine
            .recognize(file.data(), file.name(), progress)
            .await?;

        tracing::debug!(
            "{} recognized {} chars in '{}'",
            self.engine.name(),
            text.chars().count(),
            file.name()
        );

        progress.complete();
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedEngine {
        steps: Vec<f32>,
        text: &'static str,
    }

    #[async_trait]
    impl OcrEngine for ScriptedEngine {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn recognize(
            &self,
            _image: &[u8],
            _file_name: &str,
            progress: &ProgressReporter,
        ) -> Result<String> {
            for step in &self.steps {
                progress.report_fraction(*step);
            }
            Ok(self.text.to_string())
        }
    }

    #[tokio::test]
    async fn test_maps_engine_progress() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let progress = ProgressReporter::new(move |p| sink.lock().unwrap().push(p));

        let extractor = ImageOcrExtractor::new(Arc::new(ScriptedEngine {
            steps: vec![0.0, 0.25, 0.504],
            text: "scanned words",
        }));
        let file = SourceFile::new("scan.png", "", vec![0u8; 8]);

        let text = extractor.extract(&file, &progress).await.unwrap();
        assert_eq!(text, "scanned words");
        assert_eq!(*seen.lock().unwrap(), vec![0, 25, 50, 100]);
    }

    #[tokio::test]
    async fn test_empty_recognition_is_success() {
        let extractor = ImageOcrExtractor::new(Arc::new(ScriptedEngine {
            steps: vec![],
            text: "",
        }));
        let file = SourceFile::new("blank.jpg", "", vec![0u8; 8]);
        let text = extractor
            .extract(&file, &ProgressReporter::noop())
            .await
            .unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_missing_binary_is_ocr_error() {
        let engine = TesseractEngine::new(&OcrConfig {
            binary: PathBuf::from("/nonexistent/uplifter-tesseract"),
            language: "eng".to_string(),
            timeout_secs: 5,
        });
        assert!(!engine.is_available().await);

        let err = engine
            .recognize(b"\x89PNG", "scan.png", &ProgressReporter::noop())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Ocr(_)));
    }
}
