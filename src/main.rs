use deal_sniper::config::{AppConfig, load_config};
use deal_sniper::logo::LogoFetcher;
use deal_sniper::parser::{DealParser, PdfDocumentReader};
use deal_sniper::service::DealService;
use deal_sniper::web::{AppState, build_router};

use std::fs;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config: Arc<AppConfig> = match load_config("config.json") {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    if let Err(e) = fs::create_dir_all(&config.logo_directory) {
        error!(
            "Failed to create logo directory {}: {}",
            config.logo_directory.display(),
            e
        );
        return;
    }
    if !config.default_logo_file().exists() {
        warn!(
            "Default logo {} is missing; fallback images will not load",
            config.default_logo_file().display()
        );
    }

    let service = Arc::new(DealService::new(
        &config,
        Box::new(PdfDocumentReader::new()),
        Box::new(DealParser::new()),
        Arc::new(LogoFetcher::new(&config)),
    ));

    if !config.extract_on_request {
        info!("Running initial extraction...");
        if let Err(e) = service.refresh().await {
            warn!("Initial extraction failed: {}", e);
        }
    }

    let app = build_router(AppState::new(service), &config);
    let listener = match tokio::net::TcpListener::bind(&config.bind_address).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind_address, e);
            return;
        }
    };

    info!("🚀 DealSniper listening on {}", config.bind_address);
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
