//! Server services
//!
//! - [`notifier`]: payload-free "state changed" broadcast

pub mod notifier;

pub use notifier::{ChangeEvent, ChangeNotifier};
