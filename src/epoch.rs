//! Weekly epoch clock.
//!
//! Epochs start every Monday 00:00 UTC. The boss phase covers the last two
//! days of each epoch (Saturday and Sunday UTC). Everything here is a pure
//! function of the supplied time.

use crate::core::constants::{BOSS_PHASE_OFFSET_DAYS, EPOCH_LENGTH_DAYS};
use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};

/// Start of the epoch enclosing `now` (Monday 00:00 UTC).
pub fn current_epoch_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_since_monday = now.weekday().num_days_from_monday() as i64;
    let monday = now.date_naive() - Duration::days(days_since_monday);
    Utc.from_utc_datetime(&monday.and_time(NaiveTime::MIN))
}

/// Canonical epoch key: the epoch start as Unix milliseconds.
pub fn epoch_key(now: DateTime<Utc>) -> i64 {
    current_epoch_start(now).timestamp_millis()
}

pub fn next_epoch_start(now: DateTime<Utc>) -> DateTime<Utc> {
    current_epoch_start(now) + Duration::days(EPOCH_LENGTH_DAYS)
}

/// When the boss phase of the epoch starting at `epoch_start` opens.
pub fn boss_phase_start(epoch_start: DateTime<Utc>) -> DateTime<Utc> {
    epoch_start + Duration::days(BOSS_PHASE_OFFSET_DAYS)
}

/// True during Saturday and Sunday UTC.
pub fn is_boss_phase(now: DateTime<Utc>) -> bool {
    now >= boss_phase_start(current_epoch_start(now))
}
