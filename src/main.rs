use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

mod api;
mod auth;
mod cli;
mod config;
mod db;
mod shutdown;
mod state;
mod telemetry;

use crate::auth::TokenIssuer;
use crate::cli::{Cmd, Command};
use crate::shutdown::ShutdownCoordinator;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cmd = Cmd::parse();

    // Load configuration from environment
    let config = config::Config::from_env().context("Failed to load configuration")?;

    telemetry::init(&config.log_dir).context("Failed to initialize logging")?;

    if let Err(e) = run(cmd.command(), config).await {
        error!("Job portal failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(command: &Command, config: config::Config) -> anyhow::Result<()> {
    let pool = db::connection::get_connection(&config.database_url, config.max_db_connections)
        .await
        .context("Failed to connect to database")?;
    info!("Database connection pool established");

    db::migrations::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    if *command == Command::Migrate {
        pool.close().await;
        return Ok(());
    }

    info!("Starting job-portal application");
    info!("Configuration loaded successfully:");
    info!("  - Environment: {:?}", config.environment);
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);

    let state = AppState::new(
        pool.clone(),
        TokenIssuer::new(&config.jwt_secret),
        config.cookie_policy(),
        config.max_payload_size,
    );

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| state.configure(cfg))
    });

    info!("Job portal running on http://{}:{}", config.host, config.port);

    let server = server
        .bind((config.host.as_str(), config.port))
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
        .run();

    // Get server handle for graceful shutdown
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let coordinator = ShutdownCoordinator::new(server_handle, server_task, pool);
    coordinator.wait_for_shutdown().await?;
    info!("Graceful shutdown completed successfully");
    Ok(())
}
