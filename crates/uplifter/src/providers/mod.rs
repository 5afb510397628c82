//! External service providers

pub mod anthropic;
pub mod llm;

pub use anthropic::AnthropicClient;
pub use llm::AnalysisProvider;
