//! Debounced cart write-through
//!
//! The syncer owns at most one reservation id and keeps at most one write
//! in flight. Edits are staged locally and flushed after a quiet window;
//! only the latest staged cart ever goes out, so writes reach the server
//! in issuance order with intermediate states collapsed.
//!
//! ```text
//! stage(cart) ──▶ staged (latest wins) ──debounce──▶ flush
//!                                                      │ no id yet: POST /reservations
//!                                                      │ id held:   PATCH /reservations/{id}
//!                                                      ▼
//!   Synced          staged cleared, id + expires_at stored
//!   Conflict        staged cleared, id kept, shortfalls surfaced
//!   Ended           local reservation state dropped
//!   Retry           staged kept, re-armed for the next tick
//! ```

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use shared::error::IngredientShortfall;
use shared::request::ReservationItemInput;
use shared::types::ReservationId;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::debounce::Debouncer;
use crate::{ClientConfig, ClientError, ClientResult, HttpClient};

/// Result of one flush attempt
#[derive(Debug)]
pub enum SyncOutcome {
    /// Nothing was staged
    Clean,
    /// The server accepted the cart
    Synced {
        reservation_id: ReservationId,
        expires_at: DateTime<Utc>,
    },
    /// The server rejected the cart for lack of stock; the reservation (if
    /// any) keeps its previous items on the server
    Conflict(Vec<IngredientShortfall>),
    /// The reservation ended on the server; local state was dropped and the
    /// application should reset its cart
    Ended,
    /// Transient failure, the staged cart is kept for the next tick
    Retry,
    /// Non-retryable rejection
    Rejected(ClientError),
}

#[derive(Default)]
struct LocalState {
    reservation_id: Option<ReservationId>,
    expires_at: Option<DateTime<Utc>>,
    staged: Option<Vec<ReservationItemInput>>,
    generation: u64,
}

pub struct CartSyncer {
    http: HttpClient,
    debouncer: Debouncer,
    state: Mutex<LocalState>,
}

impl CartSyncer {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            debouncer: Debouncer::new(config.debounce),
            state: Mutex::new(LocalState::default()),
        })
    }

    /// Stage a cart edit; the full item list replaces anything staged
    pub fn stage(&self, items: Vec<ReservationItemInput>) {
        let mut state = self.state.lock();
        state.staged = Some(items);
        state.generation += 1;
        drop(state);
        self.debouncer.poke();
    }

    /// Reservation id currently held, if any
    pub fn reservation_id(&self) -> Option<ReservationId> {
        self.state.lock().reservation_id
    }

    /// Deadline of the held reservation as last reported by the server
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().expires_at
    }

    /// Whether an edit is staged and waiting to flush
    pub fn is_dirty(&self) -> bool {
        self.state.lock().staged.is_some()
    }

    /// Drop all local reservation state (cart reset)
    pub fn reset(&self) {
        *self.state.lock() = LocalState::default();
    }

    /// Run the debounce/flush loop until cancelled
    pub async fn run(&self, token: CancellationToken) {
        loop {
            tokio::select! {
                _ = self.debouncer.ready() => {
                    self.flush().await;
                }
                _ = token.cancelled() => return,
            }
        }
    }

    /// Flush the latest staged cart, if any
    pub async fn flush(&self) -> SyncOutcome {
        let (items, reservation_id, generation) = {
            let state = self.state.lock();
            match &state.staged {
                None => return SyncOutcome::Clean,
                Some(items) => (items.clone(), state.reservation_id, state.generation),
            }
        };

        let result = match reservation_id {
            None => self
                .http
                .create_reservation(items)
                .await
                .map(|created| (created.id, created.expires_at)),
            Some(id) => self
                .http
                .update_reservation(id, items)
                .await
                .map(|view| (view.id, view.expires_at)),
        };

        match result {
            Ok((id, expires_at)) => {
                let mut state = self.state.lock();
                state.reservation_id = Some(id);
                state.expires_at = Some(expires_at);
                // an edit staged while the write was in flight stays dirty
                if state.generation == generation {
                    state.staged = None;
                }
                debug!(reservation_id = id, %expires_at, "cart synced");
                SyncOutcome::Synced {
                    reservation_id: id,
                    expires_at,
                }
            }
            Err(ClientError::InsufficientIngredients(shortfalls)) => {
                let mut state = self.state.lock();
                if state.generation == generation {
                    state.staged = None;
                }
                warn!(
                    shortfalls = shortfalls.len(),
                    "cart rejected for insufficient stock"
                );
                SyncOutcome::Conflict(shortfalls)
            }
            Err(err) if err.ends_reservation() => {
                self.reset();
                debug!("reservation ended on the server, local state dropped");
                SyncOutcome::Ended
            }
            Err(err) if err.is_transient() => {
                warn!(error = %err, "cart sync failed, will retry");
                self.debouncer.poke();
                SyncOutcome::Retry
            }
            Err(err) => {
                let mut state = self.state.lock();
                if state.generation == generation {
                    state.staged = None;
                }
                warn!(error = %err, "cart sync rejected");
                SyncOutcome::Rejected(err)
            }
        }
    }

    /// Fetch the held reservation's current status from the server
    pub async fn poll_status(
        &self,
    ) -> ClientResult<Option<shared::response::ReservationView>> {
        let Some(id) = self.reservation_id() else {
            return Ok(None);
        };
        match self.http.get_reservation(id).await {
            Ok(view) => {
                if view.status.is_terminal() {
                    self.reset();
                } else {
                    self.state.lock().expires_at = Some(view.expires_at);
                }
                Ok(Some(view))
            }
            Err(err) if err.ends_reservation() => {
                self.reset();
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Commit the held reservation
    pub async fn commit(&self) -> ClientResult<()> {
        if let Some(id) = self.reservation_id() {
            self.http.commit_reservation(id).await?;
            self.reset();
        }
        Ok(())
    }

    /// Release the held reservation
    pub async fn release(&self) -> ClientResult<()> {
        if let Some(id) = self.reservation_id() {
            self.http.release_reservation(id).await?;
            self.reset();
        }
        Ok(())
    }
}
