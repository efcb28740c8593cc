//! Logger configuration
//!
//! Builder-style configuration for the duty-cycle controller, mirroring the
//! environment constants of the field deployment: sample interval, sleep
//! budget, deep-sleep timer, time-zone offset, and the external wake source.
//!
//! Network credentials are carried here only as a precondition surface for
//! the (external) join layer; the core never touches them.

use crate::constants::{
    DEFAULT_SAMPLE_INTERVAL_MS, DEFAULT_SLEEP_BUDGET_MS, DEFAULT_SLEEP_TIMER_S,
    DEFAULT_TZ_OFFSET_S, DEFAULT_WAKE_PIN,
};

/// Active level of the external wake signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeLevel {
    /// Wake when the pin is pulled low (button to ground).
    Low,
    /// Wake when the pin is driven high.
    High,
}

#[cfg(feature = "defmt")]
impl defmt::Format for WakeLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Low => defmt::write!(fmt, "low"),
            Self::High => defmt::write!(fmt, "high"),
        }
    }
}

/// Duty-cycle controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Minimum time between samples (milliseconds).
    pub sample_interval_ms: u64,
    /// Awake time after which the controller enters deep sleep (milliseconds).
    pub sleep_budget_ms: u64,
    /// Deep-sleep timer wake duration (seconds).
    pub sleep_timer_s: u32,
    /// Time-zone offset applied to network time (seconds).
    pub tz_offset_s: i32,
    /// GPIO carrying the external wake signal.
    pub wake_pin: u8,
    /// Active level of the external wake signal.
    pub wake_level: WakeLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            sleep_budget_ms: DEFAULT_SLEEP_BUDGET_MS,
            sleep_timer_s: DEFAULT_SLEEP_TIMER_S,
            tz_offset_s: DEFAULT_TZ_OFFSET_S,
            wake_pin: DEFAULT_WAKE_PIN,
            wake_level: WakeLevel::Low,
        }
    }
}

impl LoggerConfig {
    /// Create a configuration with the deployment defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling interval in seconds.
    pub fn sample_interval_secs(mut self, secs: u32) -> Self {
        self.sample_interval_ms = secs as u64 * 1000;
        self
    }

    /// Set the awake budget in seconds.
    pub fn sleep_budget_secs(mut self, secs: u32) -> Self {
        self.sleep_budget_ms = secs as u64 * 1000;
        self
    }

    /// Set the deep-sleep timer duration in seconds.
    pub fn sleep_timer_secs(mut self, secs: u32) -> Self {
        self.sleep_timer_s = secs;
        self
    }

    /// Set the time-zone offset in seconds.
    pub fn tz_offset_secs(mut self, secs: i32) -> Self {
        self.tz_offset_s = secs;
        self
    }

    /// Set the external wake source.
    pub fn wake_source(mut self, pin: u8, level: WakeLevel) -> Self {
        self.wake_pin = pin;
        self.wake_level = level;
        self
    }
}

/// Network join credentials.
///
/// Consumed by the external transport layer; the core only requires
/// "connected, have an address" as a precondition.
#[derive(Debug, Clone, Copy)]
pub struct NetworkConfig {
    /// Access point SSID.
    pub ssid: &'static str,
    /// Access point passphrase.
    pub password: &'static str,
}
