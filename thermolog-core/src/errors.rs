//! Error Types for the Duty-Cycle Logger
//!
//! Errors are kept small and `Copy` for the embedded hot path: no heap,
//! inline data only, cheap to return every cycle.
//!
//! The taxonomy follows the failure domains of the system:
//!
//! - [`SensorError`] - transient probe failures; the sample is discarded
//!   and retried next interval.
//! - [`TimeError`] - network time sync failures; bounded retries, then the
//!   cycle is skipped.
//! - [`StoreError`] - persistent log failures; the append is abandoned for
//!   the cycle, export/clear failures surface to the network caller.
//! - [`SleepError`] - wake-source arming failures; the device stays awake
//!   and retries on the next pass.
//! - [`InitError`] - fatal to the periodic loop; the controller refuses to
//!   start rather than running a silent no-op loop.

use thiserror_no_std::Error;

/// Result alias for sensor reads.
pub type SensorResult<T> = Result<T, SensorError>;

/// Result alias for log store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Transient sensor failures - recovered locally, never fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No probe answered on the bus (sentinel reading observed).
    #[error("no probe attached")]
    Disconnected,

    /// Reading is NaN or otherwise not a usable number.
    #[error("reading is not a valid number")]
    InvalidValue,

    /// Bus-level failure reported by the driver.
    #[error("sensor bus error")]
    Bus,
}

/// Network time source failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeError {
    /// Sync did not succeed within the attempt budget.
    #[error("time sync failed after {attempts} attempts")]
    SyncFailed {
        /// Attempts made before giving up.
        attempts: u8,
    },

    /// No successful sync has happened yet this boot.
    #[error("wall clock not yet synchronized")]
    NotSynced,
}

/// Persistent log store failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Backing storage is missing or failed to mount.
    #[error("storage not mounted")]
    NotMounted,

    /// Log file absent where one was required.
    #[error("log not found")]
    NotFound,

    /// Append or header write failed.
    #[error("write failed")]
    WriteFailed,

    /// Bulk read for export failed.
    #[error("read failed")]
    ReadFailed,

    /// Truncate-to-empty failed.
    #[error("clear failed")]
    ClearFailed,

    /// Record or buffer capacity exceeded.
    #[error("capacity exceeded")]
    Overflow,
}

/// Wake/sleep manager failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepError {
    /// Timer wake source could not be armed.
    #[error("timer wake source rejected")]
    TimerRejected,

    /// External wake source (pin/level) could not be armed.
    #[error("external wake source rejected")]
    ExternalRejected,
}

/// Initialization failures - fatal to the periodic loop.
///
/// The controller surfaces these instead of entering `AWAKE_IDLE`; the
/// caller decides whether to report and halt or sleep and retry on the
/// next wake. The controller itself only produces [`Storage`]; the time
/// and sensor variants are for platform initializers that bring those
/// peripherals up before constructing the controller.
///
/// [`Storage`]: InitError::Storage
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// Log store could not be brought up (mount or header write).
    #[error("storage init failed: {0}")]
    Storage(#[from] StoreError),

    /// Time source could not complete its first sync.
    #[error("time source init failed: {0}")]
    Time(#[from] TimeError),

    /// Sensor bus could not be brought up.
    #[error("sensor init failed: {0}")]
    Sensor(#[from] SensorError),
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Disconnected => defmt::write!(fmt, "no probe attached"),
            Self::InvalidValue => defmt::write!(fmt, "invalid reading"),
            Self::Bus => defmt::write!(fmt, "sensor bus error"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::SyncFailed { attempts } => defmt::write!(fmt, "sync failed after {}", attempts),
            Self::NotSynced => defmt::write!(fmt, "not synchronized"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StoreError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NotMounted => defmt::write!(fmt, "storage not mounted"),
            Self::NotFound => defmt::write!(fmt, "log not found"),
            Self::WriteFailed => defmt::write!(fmt, "write failed"),
            Self::ReadFailed => defmt::write!(fmt, "read failed"),
            Self::ClearFailed => defmt::write!(fmt, "clear failed"),
            Self::Overflow => defmt::write!(fmt, "capacity exceeded"),
        }
    }
}
