//! Change Notifier
//!
//! Broadcasts a generic "state changed" signal whenever ingredient or
//! reservation state mutates. The signal carries no payload and is
//! best-effort, at-most-once per subscriber: clients treat it purely as a
//! cache-invalidation hint and re-fetch, never as authoritative state.

use tokio::sync::broadcast;

/// Payload-free change signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent;

/// Broadcast hub for state-change signals
///
/// Cheap to clone; all clones share one channel. Sending never blocks:
/// slow subscribers lag and coalesce missed signals into one.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        // Small buffer: the signal is idempotent, lagging is harmless
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Emit a state-changed signal to every connected subscriber
    pub fn notify(&self) {
        // Err means no subscribers are connected right now
        let _ = self.tx.send(ChangeEvent);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_signals() {
        let notifier = ChangeNotifier::new();
        let mut rx = notifier.subscribe();
        notifier.notify();
        assert_eq!(rx.recv().await.unwrap(), ChangeEvent);
    }

    #[test]
    fn notify_without_subscribers_does_not_panic() {
        ChangeNotifier::new().notify();
    }
}
