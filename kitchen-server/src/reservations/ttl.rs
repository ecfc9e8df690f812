//! Runtime reservation TTL policy
//!
//! Process-wide, operator-mutable values with fixed bounds. Reservation
//! creation reads the TTL at call time; changing the policy never touches
//! `expires_at` on reservations that already exist.

use parking_lot::RwLock;
use shared::response::TtlSnapshot;
use thiserror::Error;

pub const MIN_TTL_SECONDS: u32 = 60;
pub const MAX_TTL_SECONDS: u32 = 15 * 60;
pub const MIN_WARNING_SECONDS: u32 = 5;
pub const MAX_WARNING_SECONDS: u32 = 120;

pub const DEFAULT_TTL_SECONDS: u32 = 10 * 60;
pub const DEFAULT_WARNING_SECONDS: u32 = 30;

/// TTL policy errors
#[derive(Debug, Error)]
pub enum TtlError {
    #[error("ttl_minutes must be between {} and {}", MIN_TTL_SECONDS / 60, MAX_TTL_SECONDS / 60)]
    TtlOutOfRange,

    #[error("warning_threshold_seconds must be between {MIN_WARNING_SECONDS} and {MAX_WARNING_SECONDS}")]
    WarningOutOfRange,

    #[error("ttl_minutes or warning_threshold_seconds is required")]
    PayloadRequired,
}

#[derive(Debug)]
struct TtlValues {
    ttl_seconds: u32,
    warning_threshold_seconds: u32,
}

/// Mutable runtime TTL policy with fixed bounds
#[derive(Debug)]
pub struct TtlPolicy {
    inner: RwLock<TtlValues>,
}

impl TtlPolicy {
    /// Build from configured values, clamped into bounds
    pub fn new(ttl_seconds: u32, warning_threshold_seconds: u32) -> Self {
        Self {
            inner: RwLock::new(TtlValues {
                ttl_seconds: ttl_seconds.clamp(MIN_TTL_SECONDS, MAX_TTL_SECONDS),
                warning_threshold_seconds: warning_threshold_seconds
                    .clamp(MIN_WARNING_SECONDS, MAX_WARNING_SECONDS),
            }),
        }
    }

    /// TTL applied to reservations created right now
    pub fn ttl_seconds(&self) -> u32 {
        self.inner.read().ttl_seconds
    }

    pub fn warning_threshold_seconds(&self) -> u32 {
        self.inner.read().warning_threshold_seconds
    }

    pub fn snapshot(&self) -> TtlSnapshot {
        let values = self.inner.read();
        TtlSnapshot {
            ttl_seconds: values.ttl_seconds,
            ttl_minutes: values.ttl_seconds / 60,
            min_seconds: MIN_TTL_SECONDS,
            max_seconds: MAX_TTL_SECONDS,
            min_minutes: MIN_TTL_SECONDS / 60,
            max_minutes: MAX_TTL_SECONDS / 60,
            warning_threshold_seconds: values.warning_threshold_seconds,
            warning_min_seconds: MIN_WARNING_SECONDS,
            warning_max_seconds: MAX_WARNING_SECONDS,
        }
    }

    /// Apply an operator update; both fields optional but not both absent
    ///
    /// Out-of-range values reject the whole update without mutating either
    /// field. Returns the new snapshot plus whether anything changed.
    pub fn update(
        &self,
        ttl_minutes: Option<u32>,
        warning_threshold_seconds: Option<u32>,
    ) -> Result<(TtlSnapshot, bool), TtlError> {
        if ttl_minutes.is_none() && warning_threshold_seconds.is_none() {
            return Err(TtlError::PayloadRequired);
        }

        // Validate everything before mutating anything
        let new_ttl_seconds = match ttl_minutes {
            Some(minutes) => {
                let seconds = minutes.saturating_mul(60);
                if !(MIN_TTL_SECONDS..=MAX_TTL_SECONDS).contains(&seconds) {
                    return Err(TtlError::TtlOutOfRange);
                }
                Some(seconds)
            }
            None => None,
        };
        if let Some(seconds) = warning_threshold_seconds
            && !(MIN_WARNING_SECONDS..=MAX_WARNING_SECONDS).contains(&seconds)
        {
            return Err(TtlError::WarningOutOfRange);
        }

        let mut values = self.inner.write();
        let mut changed = false;
        if let Some(seconds) = new_ttl_seconds
            && values.ttl_seconds != seconds
        {
            values.ttl_seconds = seconds;
            changed = true;
        }
        if let Some(seconds) = warning_threshold_seconds
            && values.warning_threshold_seconds != seconds
        {
            values.warning_threshold_seconds = seconds;
            changed = true;
        }
        drop(values);

        Ok((self.snapshot(), changed))
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECONDS, DEFAULT_WARNING_SECONDS)
    }
}
