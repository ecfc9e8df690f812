//! Client configuration

use std::time::Duration;

/// Configuration for connecting to a kitchen server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g. "http://localhost:5000")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Cart edit debounce window before a write goes out
    pub debounce: Duration,
    /// Poll interval once a reservation is likely expired locally
    pub fast_poll: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            debounce: Duration::from_millis(400),
            fast_poll: Duration::from_secs(2),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_fast_poll(mut self, fast_poll: Duration) -> Self {
        self.fast_poll = fast_poll;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}
