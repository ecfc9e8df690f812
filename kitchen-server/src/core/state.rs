//! Server state
//!
//! Wires the in-memory stores, the reservation engine and the change
//! notifier together; one [`ServerState`] is shared by every handler and
//! background task.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::catalog::Catalog;
use crate::core::config::Config;
use crate::core::tasks::BackgroundTasks;
use crate::ledger::Ledger;
use crate::reservations::{ReservationEngine, TtlPolicy};
use crate::seed;
use crate::services::ChangeNotifier;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub ledger: Arc<Ledger>,
    pub catalog: Arc<Catalog>,
    pub ttl: Arc<TtlPolicy>,
    pub engine: Arc<ReservationEngine>,
    pub notifier: ChangeNotifier,
}

impl ServerState {
    /// Build the full state graph from configuration
    pub async fn initialize(config: Config) -> Result<Self> {
        let ledger = Arc::new(Ledger::new());
        let catalog = Arc::new(Catalog::new());
        let ttl = Arc::new(TtlPolicy::new(
            config.reservation_ttl_seconds,
            config.reservation_warning_threshold_seconds,
        ));
        let notifier = ChangeNotifier::new();

        if config.seed_demo_data && ledger.is_empty() && catalog.is_empty() {
            seed::seed_demo_data(&ledger, &catalog);
            info!("seeded demo inventory and menu");
        }

        let engine = Arc::new(ReservationEngine::new(
            Arc::clone(&ledger),
            Arc::clone(&catalog),
            Arc::clone(&ttl),
            notifier.clone(),
        ));

        info!(
            environment = %config.environment,
            ttl_seconds = ttl.ttl_seconds(),
            "server state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            ledger,
            catalog,
            ttl,
            engine,
            notifier,
        })
    }

    /// Spawn the background tasks tied to this state
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();
        tasks.spawn_expiry_sweep(
            Arc::clone(&self.engine),
            self.config.expiration_interval_seconds,
        );
        tasks
    }
}
