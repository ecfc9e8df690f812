//! Kitchen Client - reservation sync library for ordering surfaces
//!
//! Wraps the kitchen server's HTTP API and implements the client side of
//! the reservation protocol:
//!
//! - [`http`]: typed HTTP calls with conflict-aware error decoding
//! - [`sync`]: debounced cart write-through with a single in-flight write
//! - [`countdown`]: local deadline tracking against `expires_at`
//! - [`events`]: `stateChanged` SSE subscription as a refetch hint

pub mod config;
pub mod countdown;
pub mod debounce;
pub mod error;
pub mod events;
pub mod http;
pub mod sync;

pub use config::ClientConfig;
pub use countdown::{Countdown, CountdownPhase};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use sync::{CartSyncer, SyncOutcome};
