//! Timestamp-derived identifiers.
//!
//! Services read wall-clock time through [`mockable::Clock`] so tests can pin
//! it; production code passes [`mockable::DefaultClock`].
//!
//! # Invariants
//! - Ids are decimal Unix epoch milliseconds.
//! - Generated ids never collide with ids already present in the same scope.

use chrono::{DateTime, Utc};
use mockable::Clock;

/// Current UTC time truncated to whole milliseconds, matching what the store
/// can round-trip through `createdAt`.
pub(crate) fn now_millis(clock: &dyn Clock) -> DateTime<Utc> {
    let now = clock.utc();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Returns the decimal form of the first value `>= now_ms` not already taken.
///
/// Two records created within the same millisecond therefore still get
/// distinct ids.
pub(crate) fn unique_time_token<F>(now_ms: i64, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut candidate = now_ms;
    loop {
        let token = candidate.to_string();
        if !is_taken(&token) {
            return token;
        }
        candidate = candidate.saturating_add(1);
    }
}
