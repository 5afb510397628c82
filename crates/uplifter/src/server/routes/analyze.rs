//! Document analysis endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{AnalysisOutcome, Category, NormalizedDocument};

/// Analysis request
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Category name; unknown or missing names mean `general`
    #[serde(default)]
    pub category: Option<String>,
    /// Text to analyze instead of the current upload
    #[serde(default)]
    pub text: Option<String>,
}

/// Analysis response
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub category: Category,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

/// POST /api/analyze - Produce a report for the current document or supplied text
pub async fn analyze_document(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    let category = Category::from_name(request.category.as_deref().unwrap_or_default());

    let document = match request.text {
        Some(text) => NormalizedDocument::new(&text, category, state.coordinator().max_chars()),
        None => state.coordinator().require_document(category)?,
    };

    tracing::info!(
        "Analyzing {} chars as {} document",
        document.text().chars().count(),
        category
    );

    let outcome = state.analyzer().analyze(&document).await;

    Ok(Json(AnalyzeResponse { category, outcome }))
}
