//! Uplifter server binary
//!
//! Run with: cargo run -p uplifter --bin uplifter-server

use uplifter::{config::AppConfig, ingestion::TesseractEngine, server::UplifterServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "uplifter=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                     Document Uplifter                     ║
║        Text Extraction & Structured Document Reports      ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration (.env + environment)
    let config = AppConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Max document chars: {}", config.extraction.max_chars);
    tracing::info!("  - Max upload bytes: {}", config.server.max_upload_size);
    tracing::info!("  - OCR language: {}", config.extraction.ocr.language);
    tracing::info!("  - Analysis model: {}", config.llm.model);

    // Check tesseract
    let tesseract = TesseractEngine::new(&config.extraction.ocr);
    if tesseract.is_available().await {
        tracing::info!("tesseract is available");
    } else {
        tracing::warn!(
            "tesseract not available at {}; image uploads will fall back to placeholder text",
            config.extraction.ocr.binary.display()
        );
        tracing::warn!("  Install: apt install tesseract-ocr  (or: brew install tesseract)");
    }

    if !config.llm.is_enabled() {
        tracing::warn!("ANTHROPIC_API_KEY not set; reports will use heuristic analysis");
    }

    // Create and start server
    let server = UplifterServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/documents  - Upload a document");
    println!("  GET  /api/extraction - Extraction progress");
    println!("  POST /api/analyze    - Analyze the document");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
