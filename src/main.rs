// src/main.rs

use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ensa_portal::auth::Role;
use ensa_portal::cli::{Cli, Command};
use ensa_portal::{create_router, db, AppState, CONFIG};

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received, draining connections...");
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CONFIG.clone();
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config.logging.level)?;
    config.validate()?;

    match cli.command() {
        Command::Serve => serve(config).await,
        Command::Migrate => {
            let pool = db::init(&config.database).await?;
            info!("Schema version {}", db::schema_version(&pool).await?);
            Ok(())
        }
        Command::Promote { email } => set_role(config, &email, Role::Admin).await,
        Command::Demote { email } => set_role(config, &email, Role::User).await,
    }
}

async fn serve(config: ensa_portal::PortalConfig) -> anyhow::Result<()> {
    info!("Starting ENSA portal");
    let bind_address = config.bind_address();

    let app_state = AppState::from_config(config).await?;
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("API listening on http://{}/api", bind_address);
    info!("Health endpoints: /health, /ready, /live");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn set_role(config: ensa_portal::PortalConfig, email: &str, role: Role) -> anyhow::Result<()> {
    let state = AppState::from_config(config).await?;
    let user = state.auth_service.set_role_by_email(email, role).await?;
    info!("{} <{}> is now {}", user.name, user.email, user.role);
    Ok(())
}
