//! API routes for the uplifter server

pub mod analyze;
pub mod documents;
pub mod extraction;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::ingestion::SUPPORTED_EXTENSIONS;
use crate::server::state::AppState;
use crate::types::Category;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Upload - with larger body limit for file uploads
        .route(
            "/documents",
            post(documents::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Extraction progress
        .route("/extraction", get(extraction::get_extraction))
        .route("/extraction/events", get(extraction::extraction_events))
        .route("/extraction/text", get(extraction::get_extraction_text))
        // Analysis
        .route("/analyze", post(analyze::analyze_document))
        .route("/categories", get(list_categories))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "uplifter",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document text extraction and analysis with a heuristic fallback",
        "endpoints": {
            "POST /api/documents": "Upload a document (multipart) and start extraction",
            "GET /api/extraction": "Current extraction job progress",
            "GET /api/extraction/events": "Server-sent events for extraction progress",
            "GET /api/extraction/text": "Extracted text of the current document",
            "POST /api/analyze": "Analyze the current document or supplied text",
            "GET /api/categories": "Document categories"
        },
        "supported_extensions": SUPPORTED_EXTENSIONS,
        "categories": Category::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>()
    }))
}

/// One selectable document category
#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub id: Category,
    pub label: &'static str,
    pub description: &'static str,
}

/// GET /api/categories - List document categories
async fn list_categories() -> Json<Vec<CategoryInfo>> {
    Json(
        Category::ALL
            .iter()
            .map(|&category| CategoryInfo {
                id: category,
                label: category.label(),
                description: category.description(),
            })
            .collect(),
    )
}
