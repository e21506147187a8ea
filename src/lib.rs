pub mod analysis; // Pattern analysis engine
pub mod api; // HTTP API for the diary frontend
pub mod config;
pub mod core_state;
pub mod db;
pub mod journal; // Entry/symptom/profile workflow
pub mod models;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Process entry point: logging, runtime, HTTP server until Ctrl-C.
pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::ServerConfig::from_env();
    tracing::info!(db_path = %settings.db_path.display(), bind = %settings.bind, "Configuration loaded");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("error while building the tokio runtime");

    runtime.block_on(async move {
        let core = Arc::new(core_state::CoreState::new(settings.db_path));

        // Migrate up front so a broken database fails at startup.
        if let Err(e) = core.open_db() {
            tracing::error!("Cannot open database: {e}");
            std::process::exit(1);
        }

        let mut server = match api::start_api_server(core, settings.bind).await {
            Ok(server) => server,
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        };

        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C: {e}");
        }
        server.shutdown();
        server.stopped().await;
    });
}
