//! Text extractor contract and progress reporting

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{ExtractorKind, SourceFile};

/// Cloneable progress sink handed to extractors.
///
/// Values are percentages in `0..=100`; anything larger is clamped.
#[derive(Clone)]
pub struct ProgressReporter {
    sink: Arc<dyn Fn(u8) + Send + Sync>,
}

impl ProgressReporter {
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(u8) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Reporter that discards every update
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn report(&self, percent: u8) {
        (self.sink)(percent.min(100));
    }

    /// Report a fraction in `0.0..=1.0` as `round(fraction * 100)`
    pub fn report_fraction(&self, fraction: f32) {
        let percent = if fraction.is_finite() {
            (fraction * 100.0).round().clamp(0.0, 100.0) as u8
        } else {
            0
        };
        self.report(percent);
    }

    pub fn complete(&self) {
        self.report(100);
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter").finish_non_exhaustive()
    }
}

/// Turns a source file into plain text.
///
/// Implementations report 100 before returning `Ok`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Variant this extractor implements
    fn kind(&self) -> ExtractorKind;

    /// Extract plain text from `file`
    async fn extract(&self, file: &SourceFile, progress: &ProgressReporter) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording() -> (ProgressReporter, Arc<Mutex<Vec<u8>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter = ProgressReporter::new(move |p| sink.lock().unwrap().push(p));
        (reporter, seen)
    }

    #[test]
    fn test_report_clamps() {
        let (reporter, seen) = recording();
        reporter.report(42);
        reporter.report(250);
        assert_eq!(*seen.lock().unwrap(), vec![42, 100]);
    }

    #[test]
    fn test_report_fraction() {
        let (reporter, seen) = recording();
        reporter.report_fraction(0.0);
        reporter.report_fraction(0.456);
        reporter.report_fraction(1.7);
        reporter.report_fraction(-0.5);
        reporter.report_fraction(f32::NAN);
        assert_eq!(*seen.lock().unwrap(), vec![0, 46, 100, 0, 0]);
    }

    #[test]
    fn test_complete_and_clone_share_sink() {
        let (reporter, seen) = recording();
        let cloned = reporter.clone();
        cloned.complete();
        assert_eq!(*seen.lock().unwrap(), vec![100]);
    }
}
