//! HTTP server assembly and lifecycle

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use crate::api;
use crate::core::config::Config;
use crate::core::state::ServerState;

pub struct Server {
    state: ServerState,
}

impl Server {
    /// Build a server from configuration
    pub async fn new(config: Config) -> Result<Self> {
        let state = ServerState::initialize(config).await?;
        Ok(Self { state })
    }

    /// Build a server over pre-initialized state
    pub fn with_state(state: ServerState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// Run until ctrl-c, then stop background tasks before returning
    pub async fn run(self) -> Result<()> {
        let tasks = self.state.start_background_tasks();
        let app = api::router(self.state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        info!(%addr, "http server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("shutdown signal received");
            })
            .await
            .context("http server error")?;

        tasks.shutdown().await;
        info!("server stopped");
        Ok(())
    }
}
