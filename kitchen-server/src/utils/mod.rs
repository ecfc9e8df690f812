//! Server utilities
//!
//! - [`error`]: application error type and HTTP response mapping
//! - [`logger`]: tracing setup
//! - [`time`]: UTC clock helper

pub mod error;
pub mod logger;
pub mod time;

pub use error::{AppError, AppResult};
pub use time::utc_now;
