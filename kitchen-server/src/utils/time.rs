//! Time helpers

use chrono::{DateTime, Utc};

/// Current UTC time
///
/// Single call site for the wall clock; engine operations take `now` as a
/// parameter so tests can drive expiry without sleeping.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}
