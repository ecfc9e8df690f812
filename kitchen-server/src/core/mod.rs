//! Server core: configuration, state, assembly, background tasks

mod config;
mod server;
mod state;
pub mod tasks;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
pub use tasks::BackgroundTasks;
