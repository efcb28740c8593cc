//! Timing, Storage, and Sensor Constants
//!
//! This module defines the duty-cycle intervals, storage layout, and sensor
//! sentinels used throughout the Thermolog system. Values mirror the field
//! deployment they were tuned on; override them through
//! [`LoggerConfig`](crate::config::LoggerConfig) where the defaults do not fit.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Microseconds per second.
///
/// Deep-sleep timer hardware is programmed in microseconds.
pub const US_PER_SECOND: u64 = 1_000_000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = MS_PER_SECOND * SECONDS_PER_MINUTE as u64;

// ===== DUTY-CYCLE INTERVALS =====

/// Default sampling interval (milliseconds).
///
/// One reading per minute is sufficient resolution for ambient
/// temperature while keeping the log compact on small cards.
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 60 * MS_PER_SECOND;

/// Default awake budget before entering deep sleep (milliseconds).
///
/// Five minutes of responsiveness per wake covers several sample
/// cycles plus interactive use of the network surface.
pub const DEFAULT_SLEEP_BUDGET_MS: u64 = 5 * MS_PER_MINUTE;

/// Default deep-sleep timer duration (seconds).
///
/// The device wakes on its own after ten minutes even if the
/// external wake signal never fires.
pub const DEFAULT_SLEEP_TIMER_S: u32 = 600;

// ===== TIME SOURCE =====

/// Default time-zone offset applied to network time (seconds).
///
/// UTC+2; adjust per deployment site.
pub const DEFAULT_TZ_OFFSET_S: i32 = 7200;

/// Maximum network time sync attempts per timestamp request.
///
/// Bounds the retry loop so a dead uplink cannot stall a cycle
/// indefinitely; the cycle is skipped once exhausted.
pub const MAX_SYNC_ATTEMPTS: u8 = 3;

// ===== LOG STORE LAYOUT =====

/// Path of the append-only log on removable storage.
pub const LOG_PATH: &str = "/data.txt";

/// Header line written exactly once when the log is first created.
pub const LOG_HEADER: &str = "Reading ID, Date, Hour, Temperature \r\n";

/// Capacity of a single serialized record line, including CRLF.
///
/// `u32` id + ISO date + time + signed temperature with two decimals
/// fits well under this with margin for future fields.
pub const RECORD_CAPACITY: usize = 64;

// ===== SENSOR =====

/// Reading reported by a DS18B20 when no probe answers on the bus.
///
/// Source: DS18B20 datasheet (power-on reset value of the
/// temperature register as exposed by common drivers).
pub const DISCONNECTED_C: f32 = -127.0;

// ===== WAKE SOURCES =====

/// Default GPIO carrying the external wake signal (push button).
pub const DEFAULT_WAKE_PIN: u8 = 14;

/// Maximum live-channel observers tracked at once.
///
/// Matches the handful of concurrent browser sessions a single
/// embedded deployment realistically serves.
pub const MAX_OBSERVERS: usize = 8;
