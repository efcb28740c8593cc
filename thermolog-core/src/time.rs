//! Time management for the duty-cycle logger
//!
//! Two distinct clocks drive the system:
//!
//! - A monotonic [`Clock`] in milliseconds since boot. Owned by the
//!   controller for its cycle timers; never runs backwards, survives
//!   nothing across deep sleep (each wake starts a fresh epoch).
//! - A wall-clock [`WallClockTime`] built on a [`NetworkTime`] client.
//!   Produces calendar timestamps for log records, applying a time-zone
//!   offset and tolerating transient sync failure with a *bounded* retry
//!   loop. The reference deployment retried forever; here the attempt cap
//!   turns a dead uplink into a typed [`TimeError`] so the caller can skip
//!   the cycle instead of hanging.
//!
//! Timestamps are also clamped monotonically non-decreasing: a sync that
//! steps the clock backwards re-reports the last known instant rather than
//! letting record timestamps regress.

use core::fmt::Write as _;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::constants::MAX_SYNC_ATTEMPTS;
use crate::errors::TimeError;

/// Milliseconds since boot.
pub type Millis = u64;

/// Monotonic time source driving the cycle timers.
pub trait Clock {
    /// Milliseconds elapsed since boot.
    fn now_ms(&self) -> Millis;
}

impl<C: Clock> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// System clock (requires std).
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Start counting from now.
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.start.elapsed().as_millis() as Millis
    }
}

/// Manually advanced clock for testing.
///
/// Interior mutability lets a test keep a shared reference for advancing
/// time while the controller owns another as its [`Clock`].
#[derive(Debug, Default)]
pub struct FixedClock {
    ms: AtomicU64,
}

impl FixedClock {
    /// Create a clock at the given instant.
    pub fn new(ms: Millis) -> Self {
        Self {
            ms: AtomicU64::new(ms),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, ms: Millis) {
        self.ms.store(ms, Ordering::Relaxed);
    }

    /// Move time forward.
    pub fn advance(&self, ms: Millis) {
        self.ms.fetch_add(ms, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> Millis {
        self.ms.load(Ordering::Relaxed)
    }
}

/// Calendar date as logged: `YYYY-MM-DD`.
pub type DateStamp = heapless::String<10>;

/// Clock time as logged: `HH:MM:SS`.
pub type TimeStamp = heapless::String<8>;

/// A calendar timestamp split the way log records want it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallClock {
    /// Local calendar date.
    pub date: DateStamp,
    /// Local clock time.
    pub time: TimeStamp,
}

/// One network time protocol exchange.
///
/// Implementations perform a single sync attempt per call; retry policy
/// lives in [`WallClockTime`], not here. May block briefly for the
/// round-trip but must not loop.
pub trait NetworkTime {
    /// Seconds since the Unix epoch, UTC.
    fn epoch_seconds(&mut self) -> Result<u64, TimeError>;
}

/// Wall-clock adapter over a [`NetworkTime`] client.
pub struct WallClockTime<T: NetworkTime> {
    client: T,
    tz_offset_s: i32,
    max_attempts: u8,
    last_epoch: u64,
}

impl<T: NetworkTime> WallClockTime<T> {
    /// Wrap a protocol client with the given time-zone offset.
    pub fn new(client: T, tz_offset_s: i32) -> Self {
        Self {
            client,
            tz_offset_s,
            max_attempts: MAX_SYNC_ATTEMPTS,
            last_epoch: 0,
        }
    }

    /// Override the sync attempt budget.
    pub fn with_max_attempts(mut self, attempts: u8) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Current calendar timestamp, local to the configured offset.
    ///
    /// Retries the protocol client up to the attempt budget, then returns
    /// the last failure. Successive calls never observe time going
    /// backwards.
    pub fn now(&mut self) -> Result<WallClock, TimeError> {
        let mut last_err = TimeError::NotSynced;
        for _ in 0..self.max_attempts {
            match self.client.epoch_seconds() {
                Ok(epoch) => {
                    let local = apply_offset(epoch, self.tz_offset_s);
                    // Clamp against backwards steps from the sync source.
                    let local = local.max(self.last_epoch);
                    self.last_epoch = local;
                    return Ok(split_epoch(local));
                }
                Err(e) => last_err = e,
            }
        }
        match last_err {
            TimeError::NotSynced => Err(TimeError::SyncFailed {
                attempts: self.max_attempts,
            }),
            other => Err(other),
        }
    }
}

fn apply_offset(epoch: u64, offset_s: i32) -> u64 {
    if offset_s >= 0 {
        epoch.saturating_add(offset_s as u64)
    } else {
        epoch.saturating_sub(offset_s.unsigned_abs() as u64)
    }
}

/// Split epoch seconds into the logged date and time stamps.
fn split_epoch(epoch: u64) -> WallClock {
    let days = (epoch / 86_400) as i64;
    let secs_of_day = epoch % 86_400;

    let (year, month, day) = civil_from_days(days);
    let (hour, minute, second) = (
        secs_of_day / 3600,
        (secs_of_day % 3600) / 60,
        secs_of_day % 60,
    );

    let mut date = DateStamp::new();
    let mut time = TimeStamp::new();
    // Capacities are exact for the fixed-width formats below.
    let _ = write!(date, "{:04}-{:02}-{:02}", year, month, day);
    let _ = write!(time, "{:02}:{:02}:{:02}", hour, minute, second);

    WallClock { date, time }
}

/// Gregorian date from days since 1970-01-01 (Howard Hinnant's algorithm).
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = (z - era * 146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

/// Fixed network time for testing.
#[derive(Debug)]
pub struct FixedEpoch {
    epoch: u64,
    fail_next: u8,
}

impl FixedEpoch {
    /// Always report the given epoch.
    pub fn new(epoch: u64) -> Self {
        Self {
            epoch,
            fail_next: 0,
        }
    }

    /// Change the reported epoch.
    pub fn set(&mut self, epoch: u64) {
        self.epoch = epoch;
    }

    /// Fail the next N sync attempts before succeeding again.
    pub fn fail_next(&mut self, attempts: u8) {
        self.fail_next = attempts;
    }
}

impl NetworkTime for FixedEpoch {
    fn epoch_seconds(&mut self) -> Result<u64, TimeError> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(TimeError::NotSynced);
        }
        Ok(self.epoch)
    }
}
