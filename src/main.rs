//! Course catalog server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use course_catalog::config::{Config, StorageKind};
use course_catalog::db::{
    self, CourseRepository, CourseStorage, IdStrategy, JsonFileStorage, SlotStorage,
};
use course_catalog::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting course catalog server");
    tracing::info!("Storage: {:?}", config.storage);
    tracing::info!("Public dir: {:?}", config.public_dir);

    let storage: Arc<dyn CourseStorage> = match config.storage {
        StorageKind::File => {
            tracing::info!("Data file: {:?}", config.data_file);
            Arc::new(JsonFileStorage::open(&config.data_file).await?)
        }
        StorageKind::Sqlite => {
            tracing::info!("Slot database: {:?}", config.db_path);
            let pool = db::init_database(&config.db_path).await?;
            Arc::new(SlotStorage::new(pool))
        }
    };

    // A store that cannot be read starts empty; the next write replaces it.
    let repo = match CourseRepository::open(storage.clone(), IdStrategy::Sequential).await {
        Ok(repo) => repo,
        Err(e) => {
            tracing::warn!("No usable courses in {}, starting fresh: {}", storage.describe(), e);
            CourseRepository::with_courses(storage, IdStrategy::Sequential, Vec::new())
        }
    };
    let repo = Arc::new(repo);

    let state = AppState {
        repo: repo.clone(),
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        "Server listening on http://{} with {} courses loaded",
        config.bind_addr,
        repo.count().await
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Saving courses before shutdown");
    if let Err(e) = repo.flush().await {
        tracing::error!("Final save failed: {}", e);
    }

    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
