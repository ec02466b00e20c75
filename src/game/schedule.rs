//! Calendar-driven seeds and session lifetimes

use super::GameMode;
use chrono::{DateTime, Datelike, Duration, Utc};
use rand::Rng;

/// Upper bound (exclusive) for random-mode seeds
pub const RANDOM_SEED_RANGE: u32 = 1_000_000_000;

/// Seed shared by every daily session on the UTC date of `now`
///
/// Encoded as `YYYYMMDD`, e.g. 2024-01-01 becomes `20240101`.
#[must_use]
pub fn daily_seed(now: DateTime<Utc>) -> u32 {
    let year = u32::try_from(now.year()).unwrap_or(0);
    year * 10_000 + now.month() * 100 + now.day()
}

/// Fresh seed for a random-mode session
#[must_use]
pub fn random_seed() -> u32 {
    rand::rng().random_range(0..RANDOM_SEED_RANGE)
}

/// Whole seconds until the next UTC midnight, never less than 1
#[must_use]
pub fn seconds_until_midnight_utc(now: DateTime<Utc>) -> i64 {
    let next_midnight = now
        .date_naive()
        .succ_opt()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc());

    next_midnight.map_or(1, |midnight| (midnight - now).num_seconds().max(1))
}

/// How long a session record lives after its last write
#[must_use]
pub fn session_ttl(mode: GameMode) -> Duration {
    match mode {
        GameMode::Daily => Duration::hours(48),
        GameMode::Random => Duration::hours(24),
    }
}
