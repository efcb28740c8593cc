//! Wake/sleep manager contract
//!
//! Deep sleep is armed with two wake sources - a timer and a
//! level-triggered external signal - then entered with [`suspend`].
//! On hardware, `suspend` does not return: the wake event restarts the
//! process from initialization with only retained memory preserved.
//!
//! The controller calls this only from the idle state, never mid-sample
//! or mid-append, so a half-completed write can never be lost to sleep.
//!
//! [`suspend`]: SleepManager::suspend

use crate::config::WakeLevel;
use crate::errors::SleepError;

/// Platform suspend/resume surface.
pub trait SleepManager {
    /// Arm both wake sources ahead of suspension.
    ///
    /// `timer_s` is the timer wake in seconds; the external source fires
    /// when `wake_pin` reaches `level`.
    fn arm(&mut self, timer_s: u32, wake_pin: u8, level: WakeLevel) -> Result<(), SleepError>;

    /// Enter deep sleep.
    ///
    /// Hardware implementations never return from this call; host and
    /// test implementations return so callers can observe the transition.
    fn suspend(&mut self);
}

/// Recording sleep manager for hosts and tests.
#[derive(Debug, Default)]
pub struct MockSleep {
    /// Last armed wake sources, if any.
    pub armed: Option<(u32, u8, WakeLevel)>,
    /// Number of suspensions entered.
    pub suspend_count: u32,
    /// When set, `arm` fails with the given error.
    pub arm_failure: Option<SleepError>,
}

impl MockSleep {
    /// Sleep manager that arms and suspends without side effects.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SleepManager for MockSleep {
    fn arm(&mut self, timer_s: u32, wake_pin: u8, level: WakeLevel) -> Result<(), SleepError> {
        if let Some(err) = self.arm_failure {
            return Err(err);
        }
        self.armed = Some((timer_s, wake_pin, level));
        Ok(())
    }

    fn suspend(&mut self) {
        self.suspend_count += 1;
    }
}
