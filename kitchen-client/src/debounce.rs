//! Edit debouncing
//!
//! Collapses bursts of cart edits into one flush: every poke pushes the
//! deadline out by the full window, and [`Debouncer::ready`] resolves once
//! the window has passed with no further pokes.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::Instant;

pub struct Debouncer {
    window: Duration,
    deadline: Mutex<Option<Instant>>,
    notify: Notify,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: Mutex::new(None),
            notify: Notify::new(),
        }
    }

    /// Record an edit, pushing the flush deadline out
    pub fn poke(&self) {
        *self.deadline.lock() = Some(Instant::now() + self.window);
        self.notify.notify_one();
    }

    /// Whether a flush is pending
    pub fn is_armed(&self) -> bool {
        self.deadline.lock().is_some()
    }

    /// Wait until the current quiet period ends, then disarm
    ///
    /// Pokes arriving while waiting extend the deadline; the wait only
    /// resolves after a full window of silence.
    pub async fn ready(&self) {
        loop {
            let deadline = *self.deadline.lock();
            match deadline {
                None => self.notify.notified().await,
                Some(at) => {
                    tokio::select! {
                        _ = tokio::time::sleep_until(at) => {
                            let mut slot = self.deadline.lock();
                            // a poke may have moved the deadline mid-sleep
                            if *slot == Some(at) {
                                *slot = None;
                                return;
                            }
                        }
                        _ = self.notify.notified() => {}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(400);

    #[tokio::test(start_paused = true)]
    async fn resolves_after_quiet_window() {
        let debouncer = Debouncer::new(WINDOW);
        debouncer.poke();
        tokio::time::timeout(Duration::from_millis(500), debouncer.ready())
            .await
            .expect("should resolve within the window");
        assert!(!debouncer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_pokes_extend_the_deadline() {
        let debouncer = std::sync::Arc::new(Debouncer::new(WINDOW));

        let waiter = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move {
                debouncer.ready().await;
                Instant::now()
            })
        };

        let start = Instant::now();
        debouncer.poke();
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.poke();
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.poke();

        let resolved_at = waiter.await.unwrap();
        // last poke at +600ms, so resolution is at +1000ms, not +400ms
        assert!(resolved_at.duration_since(start) >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn not_ready_without_a_poke() {
        let debouncer = Debouncer::new(WINDOW);
        let result =
            tokio::time::timeout(Duration::from_secs(5), debouncer.ready()).await;
        assert!(result.is_err());
    }
}
