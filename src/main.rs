use clap::Parser;
use recipe_finder::{
    api::{handlers::AppState, routes},
    cli::{Cli, Commands},
    config::{DatasetConfig, Settings},
    dataset::RecipeTable,
    Error, Result,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipe_finder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            host,
            dataset,
        } => {
            let mut settings = Settings::from_env()?;
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(dataset) = dataset {
                settings.dataset.path = dataset;
            }
            settings.validate()?;

            serve(settings).await?;
        }
        Commands::Match {
            ingredients,
            dataset,
            limit,
            json,
        } => {
            let path = dataset_path(dataset);
            recipe_finder::cli::commands::match_local(&path, &ingredients, limit, json)?;
        }
        Commands::Find {
            ingredients,
            server,
            limit,
        } => {
            recipe_finder::cli::commands::find(&server, &ingredients, limit).await?;
        }
        Commands::Check { dataset } => {
            let path = dataset_path(dataset);
            recipe_finder::cli::commands::check_dataset(&path)?;
        }
    }

    Ok(())
}

fn dataset_path(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path.unwrap_or_else(|| DatasetConfig::from_env().path)
}

async fn serve(settings: Settings) -> Result<()> {
    info!("Starting Recipe Finder server");
    info!("Dataset: {}", settings.dataset.path.display());
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // A missing or malformed dataset degrades the service instead of stopping it
    let dataset = match RecipeTable::from_path(&settings.dataset.path) {
        Ok(table) => {
            let stats = table.stats();
            if stats.unparseable_ingredients > 0 || stats.unparseable_directions > 0 {
                warn!(
                    "{} recipes have unparseable ingredients and {} have unparseable directions",
                    stats.unparseable_ingredients, stats.unparseable_directions
                );
            }
            Some(Arc::new(table))
        }
        Err(e) => {
            error!("Error loading recipe dataset: {}", e.log_safe());
            warn!("Continuing without a dataset - every match request will report it as unavailable");
            None
        }
    };

    let state = AppState {
        dataset,
        settings: settings.clone(),
    };

    let app = routes::create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
