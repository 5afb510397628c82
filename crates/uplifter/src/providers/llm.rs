//! Remote analysis provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::NormalizedDocument;

/// Trait for remote language-model analysis
///
/// Implementations:
/// - `AnthropicClient`: Anthropic Messages API
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Produce a report for the document, framed by its category
    async fn analyze(&self, document: &NormalizedDocument) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
