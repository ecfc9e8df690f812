//! Background task registry
//!
//! Long-running tasks spawned at server startup and cancelled together on
//! shutdown. Currently a single task: the periodic expiry sweep that
//! catches reservations whose TTL elapsed while nobody touched them.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::reservations::ReservationEngine;
use crate::utils::time::utc_now;

pub struct BackgroundTasks {
    token: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            handles: Vec::new(),
        }
    }

    /// Periodic expiry sweep
    ///
    /// Lazy materialization already expires reservations at every touchpoint;
    /// the sweep bounds how long an untouched reservation can keep its hold
    /// past its deadline.
    pub fn spawn_expiry_sweep(&mut self, engine: Arc<ReservationEngine>, interval_seconds: u64) {
        let token = self.token.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));
            // first tick fires immediately, skip it
            interval.tick().await;
            info!(interval_seconds, "expiry sweep started");
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let expired = engine.sweep(utc_now());
                        if expired > 0 {
                            info!(expired, "expiry sweep released holds");
                        } else {
                            debug!("expiry sweep found nothing");
                        }
                    }
                    _ = token.cancelled() => {
                        info!("expiry sweep stopped");
                        break;
                    }
                }
            }
        });
        self.handles.push(handle);
    }

    /// Cancel every task and wait for them to finish
    pub async fn shutdown(self) {
        self.token.cancel();
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}
