//! Extraction coordinator owning the current job slot
//!
//! At most one job is current. Each submission replaces the slot; extractor
//! tasks for superseded jobs keep running but their progress and results are
//! dropped because every write is checked against the current job id.

use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

use super::job::{
    settle_text, DegradedReason, ExtractionJob, JobStatus, FAILED_PLACEHOLDER,
    UNSUPPORTED_PLACEHOLDER,
};
use crate::error::{Error, Result};
use crate::ingestion::{classify, ExtractorRegistry, ProgressReporter, TextExtractor};
use crate::types::{Category, NormalizedDocument, SourceFile};

struct Inner {
    registry: ExtractorRegistry,
    max_chars: usize,
    slot: watch::Sender<Option<ExtractionJob>>,
}

/// Drives extraction jobs and publishes their state
#[derive(Clone)]
pub struct ExtractionCoordinator {
    inner: Arc<Inner>,
}

impl ExtractionCoordinator {
    pub fn new(registry: ExtractorRegistry, max_chars: usize) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                registry,
                max_chars,
                slot,
            }),
        }
    }

    pub fn max_chars(&self) -> usize {
        self.inner.max_chars
    }

    /// Start extracting `file`, superseding any current job.
    ///
    /// Returns immediately with the new job id; observe progress through
    /// [`current`](Self::current) or [`subscribe`](Self::subscribe).
    pub fn submit(&self, file: SourceFile) -> Uuid {
        let kind = classify(file.name());
        let mut job = ExtractionJob::new(file.info(), kind);
        let id = job.id;

        let extractor = kind.and_then(|k| self.inner.registry.get(k));
        let Some(extractor) = extractor else {
            tracing::info!(
                "No extractor for '{}', storing upload placeholder (job {})",
                file.name(),
                id
            );
            job.finish(
                JobStatus::Succeeded,
                UNSUPPORTED_PLACEHOLDER.to_string(),
                Some(DegradedReason::UnsupportedFormat),
            );
            self.inner.slot.send_replace(Some(job));
            return id;
        };

        tracing::info!(
            "Extraction job {} submitted: '{}' ({} bytes) via {}",
            id,
            file.name(),
            file.byte_size(),
            extractor.kind()
        );
        self.inner.slot.send_replace(Some(job));

        let coordinator = self.clone();
        tokio::spawn(async move {
            coordinator.run(id, extractor, file).await;
        });

        id
    }

    async fn run(&self, id: Uuid, extractor: Arc<dyn TextExtractor>, file: SourceFile) {
        let started = self.update(id, |job| {
            job.status = JobStatus::Running;
            job.updated_at = chrono::Utc::now();
            true
        });
        if !started {
            tracing::debug!("Job {} superseded before it started", id);
            return;
        }

        let progress = self.progress_reporter(id);
        let name = file.name().to_string();
        let start_time = std::time::Instant::now();

        // Run in its own task so a panicking extractor still settles the job.
        // Errors and panics both end as Succeeded with the generic placeholder.
        let handle = tokio::spawn(async move { extractor.extract(&file, &progress).await });

        let (status, text, degraded) = match handle.await {
            Ok(Ok(text)) => {
                let (text, degraded) = settle_text(text, self.inner.max_chars);
                (JobStatus::Succeeded, text, degraded)
            }
            Ok(Err(e)) => {
                tracing::warn!("Extraction failed for '{}': {}", name, e);
                (
                    JobStatus::Succeeded,
                    FAILED_PLACEHOLDER.to_string(),
                    Some(DegradedReason::ExtractionFailed {
                        message: e.to_string(),
                    }),
                )
            }
            Err(e) => {
                tracing::error!("Extraction task for '{}' aborted: {}", name, e);
                (
                    JobStatus::Succeeded,
                    FAILED_PLACEHOLDER.to_string(),
                    Some(DegradedReason::ExtractionFailed {
                        message: e.to_string(),
                    }),
                )
            }
        };

        let chars = text.chars().count();
        let applied = self.update(id, move |job| {
            job.finish(status, text, degraded);
            true
        });

        if applied {
            tracing::info!(
                "Job {} finished in {:?}: {} chars from '{}'",
                id,
                start_time.elapsed(),
                chars,
                name
            );
        } else {
            tracing::debug!("Discarding result of superseded job {} ('{}')", id, name);
        }
    }

    /// Reporter that raises the job's progress, ignoring stale or lower values
    fn progress_reporter(&self, id: Uuid) -> ProgressReporter {
        let coordinator = self.clone();
        ProgressReporter::new(move |percent| {
            coordinator.update(id, |job| {
                if job.status != JobStatus::Running || percent <= job.progress_percent {
                    return false;
                }
                tracing::debug!("Job {} progress {}%", id, percent);
                job.progress_percent = percent;
                job.updated_at = chrono::Utc::now();
                true
            });
        })
    }

    /// Apply `f` to the slot if it still holds job `id`. Returns whether it changed.
    fn update<F>(&self, id: Uuid, f: F) -> bool
    where
        F: FnOnce(&mut ExtractionJob) -> bool,
    {
        self.inner.slot.send_if_modified(|slot| match slot {
            Some(job) if job.id == id => f(job),
            _ => false,
        })
    }

    /// Snapshot of the current job
    pub fn current(&self) -> Option<ExtractionJob> {
        self.inner.slot.borrow().clone()
    }

    /// Receiver notified on every job change
    pub fn subscribe(&self) -> watch::Receiver<Option<ExtractionJob>> {
        self.inner.slot.subscribe()
    }

    /// Wait until job `id` reaches a terminal state.
    ///
    /// Returns `None` if the job is superseded (or was never current).
    pub async fn wait_for_completion(&self, id: Uuid) -> Option<ExtractionJob> {
        let mut rx = self.subscribe();
        let settled = rx
            .wait_for(|slot| match slot {
                Some(job) if job.id == id => job.status.is_terminal(),
                _ => true,
            })
            .await
            .ok()?;

        match &*settled {
            Some(job) if job.id == id => Some(job.clone()),
            _ => None,
        }
    }

    /// Normalized document for the current job, once it has settled
    pub fn document(&self, category: Category) -> Option<NormalizedDocument> {
        self.require_document(category).ok()
    }

    /// Like [`document`](Self::document), but says why nothing is available
    pub fn require_document(&self, category: Category) -> Result<NormalizedDocument> {
        let slot = self.inner.slot.borrow();
        let job = slot
            .as_ref()
            .ok_or_else(|| Error::NoDocument("upload a document first".to_string()))?;

        match (&job.result_text, job.status.is_terminal()) {
            (Some(text), true) => Ok(NormalizedDocument::new(text, category, self.inner.max_chars)),
            _ => Err(Error::ExtractionInProgress(job.file.name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::{OcrEngine, PlainTextExtractor, PDF_ADVISORY};
    use crate::processing::job::EMPTY_PLACEHOLDER;
    use crate::types::ExtractorKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// OCR engine that fails on demand or blocks until released
    struct TestEngine {
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
        result: std::result::Result<&'static str, &'static str>,
    }

    impl TestEngine {
        fn ok(text: &'static str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                gate: None,
                result: Ok(text),
            })
        }

        fn failing(message: &'static str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                gate: None,
                result: Err(message),
            })
        }

        fn gated(gate: Arc<Notify>, text: &'static str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                gate: Some(gate),
                result: Ok(text),
            })
        }
    }

    #[async_trait]
    impl OcrEngine for TestEngine {
        fn name(&self) -> &str {
            "test"
        }

        async fn recognize(
            &self,
            _image: &[u8],
            _file_name: &str,
            progress: &ProgressReporter,
        ) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            progress.report_fraction(0.3);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            progress.report_fraction(0.2);
            progress.report_fraction(0.9);
            match self.result {
                Ok(text) => Ok(text.to_string()),
                Err(message) => Err(Error::ocr(message)),
            }
        }
    }

    fn coordinator(engine: Arc<TestEngine>, max_chars: usize) -> ExtractionCoordinator {
        ExtractionCoordinator::new(ExtractorRegistry::with_ocr_engine(engine), max_chars)
    }

    #[tokio::test]
    async fn test_plain_text_job() {
        let coord = coordinator(TestEngine::ok(""), 15_000);
        let id = coord.submit(SourceFile::new("notes.txt", "", b"Some notes.".to_vec()));

        let job = coord.wait_for_completion(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Succeeded);
        assert_eq!(job.progress_percent, 100);
        assert_eq!(job.kind, Some(ExtractorKind::PlainText));
        assert_eq!(job.result_text.as_deref(), Some("Some notes."));
        assert!(job.degraded.is_none());

        let doc = coord.document(Category::Legal).unwrap();
        assert_eq!(doc.text(), "Some notes.");
        assert_eq!(doc.category(), Category::Legal);
    }

    #[tokio::test]
    async fn test_unsupported_file_is_immediate() {
        let engine = TestEngine::ok("never");
        let coord = coordinator(engine.clone(), 15_000);
        let id = coord.submit(SourceFile::new("archive.zip", "", vec![1, 2, 3]));

        let job = coord.current().unwrap();
        assert_eq!(job.id, id);
        assert_eq!(job.status, JobStatus::Succeeded);
        assert_eq!(job.progress_percent, 100);
        assert_eq!(job.kind, None);
        assert_eq!(job.result_text.as_deref(), Some(UNSUPPORTED_PLACEHOLDER));
        assert_eq!(job.degraded, Some(DegradedReason::UnsupportedFormat));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failing_extractor_degrades() {
        let coord = coordinator(TestEngine::failing("engine crashed"), 15_000);
        let id = coord.submit(SourceFile::new("scan.png", "", vec![0u8; 4]));

        let job = coord.wait_for_completion(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Succeeded);
        assert_eq!(job.progress_percent, 100);
        assert_eq!(job.result_text.as_deref(), Some(FAILED_PLACEHOLDER));
        match job.degraded {
            Some(DegradedReason::ExtractionFailed { message }) => {
                assert!(message.contains("engine crashed"))
            }
            other => panic!("unexpected degraded state: {:?}", other),
        }
    }

    /// Extractor that reports some progress and then panics
    struct PanickingExtractor;

    #[async_trait]
    impl TextExtractor for PanickingExtractor {
        fn kind(&self) -> ExtractorKind {
            ExtractorKind::PlainText
        }

        async fn extract(&self, _file: &SourceFile, progress: &ProgressReporter) -> Result<String> {
            progress.report(40);
            panic!("extractor blew up");
        }
    }

    #[tokio::test]
    async fn test_panicking_extractor_degrades() {
        let mut registry = ExtractorRegistry::new();
        registry.register(PanickingExtractor);
        let coord = ExtractionCoordinator::new(registry, 15_000);

        let id = coord.submit(SourceFile::new("notes.txt", "", b"never read".to_vec()));

        let job = coord.wait_for_completion(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Succeeded);
        assert_eq!(job.progress_percent, 100);
        assert_eq!(job.result_text.as_deref(), Some(FAILED_PLACEHOLDER));
        assert!(matches!(
            job.degraded,
            Some(DegradedReason::ExtractionFailed { .. })
        ));
        assert!(coord.document(Category::General).is_some());
    }

    #[tokio::test]
    async fn test_corrupt_docx_degrades() {
        let coord = coordinator(TestEngine::ok(""), 15_000);
        let id = coord.submit(SourceFile::new("broken.docx", "", b"garbage".to_vec()));

        let job = coord.wait_for_completion(id).await.unwrap();
        assert_eq!(job.result_text.as_deref(), Some(FAILED_PLACEHOLDER));
        assert!(matches!(
            job.degraded,
            Some(DegradedReason::ExtractionFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_extraction_placeholder() {
        let coord = coordinator(TestEngine::ok(""), 15_000);
        let id = coord.submit(SourceFile::new("blank.png", "", vec![0u8; 4]));

        let job = coord.wait_for_completion(id).await.unwrap();
        assert_eq!(job.result_text.as_deref(), Some(EMPTY_PLACEHOLDER));
        assert_eq!(job.degraded, Some(DegradedReason::EmptyExtraction));
    }

    #[tokio::test]
    async fn test_long_text_truncated() {
        let coord = coordinator(TestEngine::ok(""), 10);
        let id = coord.submit(SourceFile::new("long.txt", "", "a".repeat(25).into_bytes()));

        let job = coord.wait_for_completion(id).await.unwrap();
        assert_eq!(job.result_text.as_deref(), Some("aaaaaaaaaa"));
        assert_eq!(
            job.degraded,
            Some(DegradedReason::Truncated { original_chars: 25 })
        );
    }

    #[tokio::test]
    async fn test_pdf_gets_advisory() {
        let coord = coordinator(TestEngine::ok(""), 15_000);
        let id = coord.submit(SourceFile::new("paper.PDF", "", b"%PDF".to_vec()));

        let job = coord.wait_for_completion(id).await.unwrap();
        assert_eq!(job.result_text.as_deref(), Some(PDF_ADVISORY));
    }

    #[tokio::test]
    async fn test_progress_is_monotonic() {
        let gate = Arc::new(Notify::new());
        let coord = coordinator(TestEngine::gated(gate.clone(), "recognized"), 15_000);
        let mut rx = coord.subscribe();

        let id = coord.submit(SourceFile::new("scan.png", "", vec![0u8; 4]));

        // Engine reports 30 then parks on the gate
        rx.wait_for(|slot| slot.as_ref().is_some_and(|j| j.progress_percent == 30))
            .await
            .unwrap();
        gate.notify_one();

        let mut seen = Vec::new();
        loop {
            let job = rx.borrow_and_update().clone().unwrap();
            seen.push(job.progress_percent);
            if job.status.is_terminal() {
                break;
            }
            rx.changed().await.unwrap();
        }

        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{:?}", seen);
        assert_eq!(seen.last(), Some(&100));
        assert!(!seen.contains(&20));

        let job = coord.wait_for_completion(id).await.unwrap();
        assert_eq!(job.result_text.as_deref(), Some("recognized"));
    }

    #[tokio::test]
    async fn test_superseded_result_discarded() {
        let gate = Arc::new(Notify::new());
        let coord = coordinator(TestEngine::gated(gate.clone(), "stale text"), 15_000);

        let first = coord.submit(SourceFile::new("slow.png", "", vec![0u8; 4]));
        let mut rx = coord.subscribe();
        rx.wait_for(|slot| slot.as_ref().is_some_and(|j| j.progress_percent == 30))
            .await
            .unwrap();

        let second = coord.submit(SourceFile::new("fresh.txt", "", b"fresh text".to_vec()));
        assert!(coord.wait_for_completion(first).await.is_none());

        let job = coord.wait_for_completion(second).await.unwrap();
        assert_eq!(job.result_text.as_deref(), Some("fresh text"));

        // Let the stale OCR finish; it must not overwrite the slot
        gate.notify_one();
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let current = coord.current().unwrap();
        assert_eq!(current.id, second);
        assert_eq!(current.result_text.as_deref(), Some("fresh text"));
    }

    #[tokio::test]
    async fn test_document_requires_settled_job() {
        let gate = Arc::new(Notify::new());
        let coord = coordinator(TestEngine::gated(gate.clone(), "words"), 15_000);

        assert!(matches!(
            coord.require_document(Category::General),
            Err(Error::NoDocument(_))
        ));

        let id = coord.submit(SourceFile::new("scan.png", "", vec![0u8; 4]));
        assert!(matches!(
            coord.require_document(Category::General),
            Err(Error::ExtractionInProgress(_))
        ));
        assert!(coord.document(Category::General).is_none());

        gate.notify_one();
        coord.wait_for_completion(id).await.unwrap();
        assert_eq!(coord.document(Category::General).unwrap().text(), "words");
    }

    #[tokio::test]
    async fn test_custom_registry() {
        let mut registry = ExtractorRegistry::new();
        registry.register(PlainTextExtractor);
        let coord = ExtractionCoordinator::new(registry, 100);

        // Supported kind with no registered extractor behaves as unsupported
        let id = coord.submit(SourceFile::new("scan.png", "", vec![0u8; 4]));
        let job = coord.wait_for_completion(id).await.unwrap();
        assert_eq!(job.degraded, Some(DegradedReason::UnsupportedFormat));
    }
}
