use crate::config::{database, parameter};
use crate::config::database::DatabaseTrait;
use crate::service::login_attempt_service::{start_cleanup_task, InMemoryAttemptStore};
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod dto;
mod entity;
mod error;
mod handler;
mod middleware;
mod repository;
mod response;
mod routes;
mod service;
mod state;
mod validation;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("Starting training-management backend...");

    parameter::init();
    crate::config::logging::init();

    let connection = match database::Database::init().await {
        Ok(conn) => {
            info!("Database connection established");
            conn
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(Box::new(e) as Box<dyn std::error::Error>);
        }
    };

    let server_address = parameter::get("SERVER_ADDRESS");
    let server_port = parameter::get("SERVER_PORT");
    let host = format!("{}:{}", server_address, server_port);
    info!("Server will bind to: {}", host);

    // Shared login-attempt store plus its expiry sweeper.
    let attempt_store = InMemoryAttemptStore::new_shared();
    let cleanup_interval_minutes = parameter::get_u64("LOGIN_ATTEMPT_CLEANUP_INTERVAL_MINUTES");

    let cleanup_shutdown_token = tokio_util::sync::CancellationToken::new();
    let cleanup_task_handle = start_cleanup_task(
        attempt_store.clone(),
        cleanup_interval_minutes,
        cleanup_shutdown_token.clone(),
    );

    let listener = match tokio::net::TcpListener::bind(&host).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", host, e);
            return Err(e.into());
        }
    };

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal, initiating graceful shutdown...");
                cleanup_shutdown_token.cancel();
                let _ = shutdown_tx.send(());
            }
            Err(err) => {
                error!("Unable to listen for shutdown signal: {}", err);
            }
        }
    });

    let app = match routes::root::routes(Arc::new(connection), attempt_store) {
        Ok(router) => router,
        Err(e) => {
            error!("Failed to initialize routes: {}", e);
            return Err(Box::new(e) as Box<dyn std::error::Error>);
        }
    };

    info!("Server starting...");

    match axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_rx.await.ok();
            if let Err(e) = cleanup_task_handle.await {
                error!("Error waiting for cleanup task to finish: {}", e);
            }
        })
        .await
    {
        Ok(_) => {
            info!("Server shutdown gracefully");
            Ok(())
        }
        Err(e) => {
            error!("Server error: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
