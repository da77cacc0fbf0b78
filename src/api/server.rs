//! HTTP server lifecycle.
//!
//! `serve()` runs in the foreground until Ctrl-C. `start_server_on()` binds,
//! spawns the server in a background task and returns a handle with a
//! shutdown channel; binding port 0 picks an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::router::api_router;
use crate::config::AppConfig;
use crate::consult::ConsultationService;

/// Handle to a server running in a background task.
pub struct RunningServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RunningServer {
    /// Address the server is actually bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Signal shutdown and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.task.await {
            error!("API server task failed: {}", e);
        }
    }
}

/// Run the API on the configured address until Ctrl-C.
pub async fn serve(config: &AppConfig, service: Arc<ConsultationService>) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Medical consultation backend listening on {}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, api_router(service))
        .with_graceful_shutdown(ctrl_c())
        .await
        .context("API server error")?;

    info!("API server stopped");
    Ok(())
}

/// Start the API in a background task.
pub async fn start_server_on(
    addr: SocketAddr,
    service: Arc<ConsultationService>,
) -> Result<RunningServer> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let addr = listener
        .local_addr()
        .context("Failed to get server address")?;

    let app = api_router(service);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            info!("API server received shutdown signal");
        };

        info!("API server started on {}", addr);
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            error!("API server error: {}", e);
        }
        info!("API server stopped");
    });

    Ok(RunningServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
