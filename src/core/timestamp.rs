//! Clock abstraction and epoch-millisecond conversion
//!
//! Records carry their timestamp as integer milliseconds since the Unix
//! epoch. The wall clock is injected through [`Clock`] so that emission can
//! be tested against a frozen time.

use chrono::{DateTime, Utc};

/// Source of the current time for record timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant
///
/// # Examples
///
/// ```
/// use mdc_logger::core::{epoch_millis, Clock, FixedClock};
///
/// let clock = FixedClock::from_epoch_secs_f64(1554806251.4388545);
/// assert_eq!(epoch_millis(&clock.now()), 1554806251439);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Build from fractional seconds since the epoch.
    ///
    /// The fraction is kept to microsecond precision, which is all an `f64`
    /// of present-day epoch seconds carries.
    pub fn from_epoch_secs_f64(secs: f64) -> Self {
        let micros = (secs * 1_000_000.0).round() as i64;
        let instant =
            DateTime::<Utc>::from_timestamp_micros(micros).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Milliseconds since the epoch, rounding the sub-millisecond remainder
/// half-up.
#[must_use]
pub fn epoch_millis(datetime: &DateTime<Utc>) -> i64 {
    let millis = datetime.timestamp_millis();
    let sub_milli_nanos = datetime.timestamp_subsec_nanos() % 1_000_000;
    if sub_milli_nanos >= 500_000 {
        millis + 1
    } else {
        millis
    }
}
