//! Duty-cycle engine for Thermolog
//!
//! Battery-oriented temperature logging: sample on a fixed interval,
//! timestamp via network time, append to an append-only log on removable
//! storage, push changes to live observers, and deep-sleep between duty
//! cycles while staying externally wakeable.
//!
//! Key constraints:
//! - Single thread of control, no blocking in the idle loop
//! - One-word atomic wake flag is the only cross-context state
//! - No heap allocation in the cycle path
//!
//! ```no_run
//! use thermolog_core::{
//!     DutyCycleController, CycleEvent, LoggerConfig, LivePublisher,
//!     MemoryStore, MockSleep, RamRetained, ScriptedSensor, WakeFlag,
//!     publish::Observer,
//!     time::{FixedClock, FixedEpoch},
//! };
//!
//! static WAKE: WakeFlag = WakeFlag::new();
//!
//! # struct NoObserver;
//! # impl Observer for NoObserver {
//! #     fn id(&self) -> u32 { 0 }
//! #     fn send_text(&mut self, _: &str) -> Result<(), thermolog_core::publish::SendError> { Ok(()) }
//! # }
//! let script = [21.5];
//! let mut controller: DutyCycleController<_, _, _, NoObserver, _, _, _, 8> =
//!     DutyCycleController::new(
//!         ScriptedSensor::new(&script),
//!         FixedEpoch::new(1_527_523_213),
//!         MemoryStore::<4096>::new(),
//!         LivePublisher::new(),
//!         MockSleep::new(),
//!         RamRetained::new(),
//!         FixedClock::new(0),
//!         LoggerConfig::default(),
//!         &WAKE,
//!     )
//!     .expect("init");
//!
//! match controller.poll() {
//!     CycleEvent::Logged { .. } => { /* record appended */ }
//!     _ => {}
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod publish;
pub mod reading;
pub mod retained;
pub mod sensor;
pub mod sleep;
pub mod storage;
pub mod time;

// Public API
pub use config::{LoggerConfig, NetworkConfig, WakeLevel};
pub use controller::{CycleEvent, CycleState, DutyCycleController};
pub use errors::{InitError, SensorError, SleepError, StoreError, TimeError};
pub use publish::LivePublisher;
pub use reading::Reading;
pub use retained::{RamRetained, RetainedState, WakeFlag};
pub use sensor::{ScriptedSensor, TemperatureSensor};
pub use sleep::{MockSleep, SleepManager};
pub use storage::LogStore;
#[cfg(feature = "store-file")]
pub use storage::FileStore;
#[cfg(feature = "store-memory")]
pub use storage::MemoryStore;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
