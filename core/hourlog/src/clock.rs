//! Time sources.
//!
//! Both the hour bucket and the file name are derived from one `Clock` reading,
//! always in UTC, so a bucket never maps to two different file names.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

const SECONDS_PER_HOUR: i64 = 3600;

/// Source of wall-clock time for rotation and line timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Holds microseconds since the Unix epoch, so it can be shared between a
/// writer and the test driving it.
#[derive(Debug)]
pub struct ManualClock {
    micros: AtomicI64,
}

impl ManualClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        ManualClock {
            micros: AtomicI64::new(at.timestamp_micros()),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.micros.store(at.timestamp_micros(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: chrono::Duration) {
        let delta = by.num_microseconds().unwrap_or(i64::MAX);
        self.micros.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let micros = self.micros.load(Ordering::SeqCst);
        Utc.timestamp_micros(micros)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Hour bucket of an instant: whole hours since the Unix epoch.
pub fn hour_bucket(at: &DateTime<Utc>) -> i64 {
    at.timestamp().div_euclid(SECONDS_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_bucket_is_constant_within_an_hour() {
        assert_eq!(
            hour_bucket(&at("2024-03-05T10:00:00Z")),
            hour_bucket(&at("2024-03-05T10:59:59Z"))
        );
    }

    #[test]
    fn test_bucket_changes_on_the_hour() {
        let before = hour_bucket(&at("2024-03-05T10:59:59Z"));
        let after = hour_bucket(&at("2024-03-05T11:00:00Z"));
        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_bucket_matches_unix_division() {
        let t = at("2024-03-05T10:15:00Z");
        assert_eq!(hour_bucket(&t), t.timestamp() / 3600);
    }

    #[test]
    fn test_bucket_floors_before_epoch() {
        assert_eq!(hour_bucket(&at("1969-12-31T23:30:00Z")), -1);
    }

    #[test]
    fn test_manual_clock_set_and_advance() {
        let clock = ManualClock::new(at("2024-03-05T10:15:00Z"));
        assert_eq!(clock.now(), at("2024-03-05T10:15:00Z"));

        clock.advance(Duration::minutes(45));
        assert_eq!(clock.now(), at("2024-03-05T11:00:00Z"));

        clock.set(at("2025-01-01T00:00:00Z"));
        assert_eq!(clock.now(), at("2025-01-01T00:00:00Z"));
    }
}
