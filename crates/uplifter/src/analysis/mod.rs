//! Document analysis: remote service with heuristic fallback

mod framing;
mod heuristic;
mod service;

pub use framing::{CategoryFraming, Depth};
pub use heuristic::{DocumentStats, HeuristicAnalyzer, REPORT_SECTIONS};
pub use service::DocumentAnalyzer;
