//! Internal helpers shared by the analytics.
//!
//! These utilities are **not** part of the public API.

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Round half up to two decimals: `floor(x * 100 + 0.5) / 100`.
///
/// Unlike `f64::round`, negative halves round towards positive infinity.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Fractional number of days elapsed from `from` to `to` (negative when
/// `to` is earlier).
pub(crate) fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}
