//! Temperature sensor contract
//!
//! Thin adapter boundary over the physical probe. The bus driver itself is
//! out of scope; the core needs only "latest Celsius reading or a typed
//! failure". Reads are non-blocking in the `nb` style: a conversion still
//! in flight reports [`nb::Error::WouldBlock`] so the idle loop stays
//! responsive to the wake flag and network requests.

use crate::constants::DISCONNECTED_C;
use crate::errors::{SensorError, SensorResult};

/// A single temperature probe.
pub trait TemperatureSensor {
    /// Latest raw Celsius reading.
    ///
    /// `WouldBlock` means a conversion is in progress; poll again later.
    /// The raw value may still be a sentinel - run it through
    /// [`validate_reading`] before constructing a record.
    fn read(&mut self) -> nb::Result<f32, SensorError>;
}

/// Reject sentinel and non-finite readings.
///
/// DS18B20-style probes report `-127.0` when nothing answers on the bus;
/// NaN or infinite values indicate a misread. Neither may ever reach the
/// log or the live channel.
pub fn validate_reading(raw: f32) -> SensorResult<f32> {
    if !raw.is_finite() {
        return Err(SensorError::InvalidValue);
    }
    if (raw - DISCONNECTED_C).abs() < 0.5 {
        return Err(SensorError::Disconnected);
    }
    Ok(raw)
}

/// Sensor fed from a fixed script, for tests and simulation.
///
/// Yields each scripted value once, then reports `WouldBlock` forever.
/// NaN entries model a misread; [`DISCONNECTED_C`] models a pulled probe.
#[derive(Debug)]
pub struct ScriptedSensor<'a> {
    script: &'a [f32],
    pos: usize,
}

impl<'a> ScriptedSensor<'a> {
    /// Script the given sequence of raw readings.
    pub fn new(script: &'a [f32]) -> Self {
        Self { script, pos: 0 }
    }

    /// Readings consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl TemperatureSensor for ScriptedSensor<'_> {
    fn read(&mut self) -> nb::Result<f32, SensorError> {
        match self.script.get(self.pos) {
            Some(&raw) => {
                self.pos += 1;
                Ok(raw)
            }
            None => Err(nb::Error::WouldBlock),
        }
    }
}
