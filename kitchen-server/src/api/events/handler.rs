//! Server-sent change notifications
//!
//! Every state change (reservation lifecycle, stock edit, TTL policy)
//! produces one payload-free `stateChanged` event; clients refetch the
//! views they care about. Delivery is best-effort at-most-once: a lagged
//! subscriber still gets a single event, which is enough to trigger a
//! refetch.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;

/// GET /api/events
pub async fn subscribe(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.notifier.subscribe();
    let stream = futures::stream::unfold(rx, |mut rx| async move {
        let event = match rx.recv().await {
            Ok(_) | Err(RecvError::Lagged(_)) => Event::default().event("stateChanged").data("{}"),
            Err(RecvError::Closed) => return None,
        };
        Some((Ok(event), rx))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
