//! Local reservation countdown
//!
//! Tracks `expires_at` against the wall clock without trusting local time
//! for correctness: the server remains authoritative, the countdown only
//! decides what to show and how eagerly to poll.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// What the countdown means for the UI and the poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    /// Plenty of time left
    Normal,
    /// Remaining time at or under the server's warning threshold
    Warning,
    /// Deadline passed locally; the server may already have expired the
    /// hold, poll fast until a terminal status resolves
    LikelyExpired,
}

#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    expires_at: DateTime<Utc>,
    warning_threshold_seconds: u32,
}

impl Countdown {
    pub fn new(expires_at: DateTime<Utc>, warning_threshold_seconds: u32) -> Self {
        Self {
            expires_at,
            warning_threshold_seconds,
        }
    }

    /// Seconds until the deadline, negative once past it
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds()
    }

    pub fn phase(&self, now: DateTime<Utc>) -> CountdownPhase {
        let remaining = self.remaining_seconds(now);
        if remaining <= 0 {
            CountdownPhase::LikelyExpired
        } else if remaining <= i64::from(self.warning_threshold_seconds) {
            CountdownPhase::Warning
        } else {
            CountdownPhase::Normal
        }
    }

    /// Poll interval appropriate for the current phase
    ///
    /// `fast_poll` applies once likely expired; before that a 1 s tick is
    /// enough to keep a displayed countdown honest.
    pub fn poll_interval(&self, now: DateTime<Utc>, fast_poll: Duration) -> Duration {
        match self.phase(now) {
            CountdownPhase::LikelyExpired => fast_poll,
            _ => Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn countdown_at(seconds_left: i64) -> (Countdown, DateTime<Utc>) {
        let now = Utc::now();
        (
            Countdown::new(now + ChronoDuration::seconds(seconds_left), 30),
            now,
        )
    }

    #[test]
    fn normal_above_warning_threshold() {
        let (countdown, now) = countdown_at(31);
        assert_eq!(countdown.phase(now), CountdownPhase::Normal);
    }

    #[test]
    fn warning_at_and_below_threshold() {
        let (countdown, now) = countdown_at(30);
        assert_eq!(countdown.phase(now), CountdownPhase::Warning);
        let (countdown, now) = countdown_at(1);
        assert_eq!(countdown.phase(now), CountdownPhase::Warning);
    }

    #[test]
    fn likely_expired_at_zero_and_past() {
        let (countdown, now) = countdown_at(0);
        assert_eq!(countdown.phase(now), CountdownPhase::LikelyExpired);
        let (countdown, now) = countdown_at(-5);
        assert_eq!(countdown.phase(now), CountdownPhase::LikelyExpired);
        assert_eq!(countdown.remaining_seconds(now), -5);
    }

    #[test]
    fn fast_poll_only_once_likely_expired() {
        let fast = Duration::from_secs(2);
        let (countdown, now) = countdown_at(10);
        assert_eq!(countdown.poll_interval(now, fast), Duration::from_secs(1));
        let (countdown, now) = countdown_at(-1);
        assert_eq!(countdown.poll_interval(now, fast), fast);
    }
}
