//! Duty-cycle controller
//!
//! The core state machine: `AWAKE_IDLE → SAMPLING → LOGGING → AWAKE_IDLE`
//! on a repeating interval, with an `AWAKE_IDLE → SLEEPING` exit once the
//! awake budget is exhausted. Sleep is a full suspend; the wake event is a
//! fresh boot of the control flow with only retained memory preserved.
//!
//! One logical thread drives everything through [`poll`], which never
//! blocks: interval checks are elapsed-time comparisons, sensor reads
//! report `WouldBlock` mid-conversion, and the only cross-context state is
//! the one-word [`WakeFlag`]. The external transport layer stays
//! responsive because every pass returns promptly.
//!
//! [`poll`]: DutyCycleController::poll

use crate::config::LoggerConfig;
use crate::errors::{InitError, SensorError, SleepError, StoreError, TimeError};
use crate::publish::{LivePublisher, Observer};
use crate::reading::Reading;
use crate::retained::{RetainedMemory, RetainedState, WakeFlag};
use crate::sensor::{validate_reading, TemperatureSensor};
use crate::sleep::SleepManager;
use crate::storage::LogStore;
use crate::time::{Clock, Millis, NetworkTime, WallClockTime};

/// Controller states, in transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// Waiting for the next sample interval; responsive to wake and network.
    AwakeIdle,
    /// Requesting a reading and a timestamp.
    Sampling,
    /// Appending the record and updating the live channel.
    Logging,
    /// Suspended; next observation is a fresh boot.
    Sleeping,
}

/// Outcome of one controller pass, for observability at the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleEvent {
    /// Nothing due this pass.
    Idle,
    /// Wake signal observed; sleep deferred for this pass.
    WakeDeferred,
    /// A record was appended; `published` reports a live-channel broadcast.
    Logged {
        /// Id assigned to the new record.
        id: u32,
        /// Logged temperature.
        celsius: f32,
        /// Whether the value changed and was pushed to observers.
        published: bool,
    },
    /// Sample was invalid and discarded; retried next interval.
    SampleDiscarded(SensorError),
    /// Timestamp unavailable within the retry budget; cycle skipped.
    TimestampFailed(TimeError),
    /// Append failed; record dropped, next cycle retries.
    StoreFailed(StoreError),
    /// Wake sources could not be armed; staying awake.
    SleepFailed(SleepError),
    /// Deep sleep was entered (host implementations observe the return).
    Slept,
}

/// Cycle timer state, reset at every wake.
#[derive(Debug, Clone, Copy)]
struct CycleTimers {
    cycle_start_ms: Millis,
    last_sample_ms: Millis,
}

/// The duty-cycle state machine over its collaborator ports.
pub struct DutyCycleController<'a, S, T, L, O, M, R, C, const N: usize>
where
    S: TemperatureSensor,
    T: NetworkTime,
    L: LogStore,
    O: Observer,
    M: SleepManager,
    R: RetainedMemory,
    C: Clock,
{
    sensor: S,
    time: WallClockTime<T>,
    store: L,
    publisher: LivePublisher<O, N>,
    sleep: M,
    retained: R,
    clock: C,
    config: LoggerConfig,
    wake: &'a WakeFlag,
    state: CycleState,
    timers: CycleTimers,
    reading_id: u32,
}

impl<'a, S, T, L, O, M, R, C, const N: usize> DutyCycleController<'a, S, T, L, O, M, R, C, N>
where
    S: TemperatureSensor,
    T: NetworkTime,
    L: LogStore,
    O: Observer,
    M: SleepManager,
    R: RetainedMemory,
    C: Clock,
{
    /// Initialize the controller and enter `AWAKE_IDLE`.
    ///
    /// The wall clock is built over `time_client` with the configured
    /// time-zone offset. Restores retained state (a wake signal pending
    /// from before the suspension is re-raised so the first pass observes
    /// it) and brings the log store up with its header. Any failure here
    /// is fatal to the periodic loop and surfaces as [`InitError`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sensor: S,
        time_client: T,
        mut store: L,
        publisher: LivePublisher<O, N>,
        sleep: M,
        retained: R,
        clock: C,
        config: LoggerConfig,
        wake: &'a WakeFlag,
    ) -> Result<Self, InitError> {
        let restored = retained.load();
        if restored.wake_pending {
            wake.raise();
        }

        store.ensure_header()?;

        let now = clock.now_ms();
        Ok(Self {
            sensor,
            time: WallClockTime::new(time_client, config.tz_offset_s),
            store,
            publisher,
            sleep,
            retained,
            clock,
            config,
            wake,
            state: CycleState::AwakeIdle,
            timers: CycleTimers {
                cycle_start_ms: now,
                last_sample_ms: now,
            },
            reading_id: restored.reading_id,
        })
    }

    /// Run one non-blocking pass of the state machine.
    pub fn poll(&mut self) -> CycleEvent {
        let now = self.clock.now_ms();

        // The wake flag takes priority over the sleep decision. It is
        // cleared on observation and defers sleep for this pass only; the
        // budget clock keeps running, so the signal must keep arriving to
        // keep the device awake.
        let wake_deferral = self.wake.take();
        #[cfg(feature = "log")]
        if wake_deferral {
            log::info!("wake signal observed; deferring sleep");
        }

        if !wake_deferral && self.awake_budget_spent(now) {
            return self.enter_sleep();
        }

        if self.sample_due(now) {
            return self.run_cycle(now);
        }

        if wake_deferral {
            CycleEvent::WakeDeferred
        } else {
            CycleEvent::Idle
        }
    }

    fn awake_budget_spent(&self, now: Millis) -> bool {
        now.saturating_sub(self.timers.cycle_start_ms) >= self.config.sleep_budget_ms
    }

    fn sample_due(&self, now: Millis) -> bool {
        now.saturating_sub(self.timers.last_sample_ms) >= self.config.sample_interval_ms
    }

    /// `SAMPLING` then `LOGGING`: read, validate, timestamp, append,
    /// publish. Every early exit returns to `AWAKE_IDLE` without touching
    /// the reading id or the store.
    fn run_cycle(&mut self, now: Millis) -> CycleEvent {
        self.state = CycleState::Sampling;

        let raw = match self.sensor.read() {
            Ok(raw) => raw,
            Err(nb::Error::WouldBlock) => {
                // Conversion in flight; the sample stays due.
                self.state = CycleState::AwakeIdle;
                return CycleEvent::Idle;
            }
            Err(nb::Error::Other(e)) => {
                return self.discard_sample(now, e);
            }
        };

        let celsius = match validate_reading(raw) {
            Ok(celsius) => celsius,
            Err(e) => return self.discard_sample(now, e),
        };

        let stamp = match self.time.now() {
            Ok(stamp) => stamp,
            Err(e) => {
                #[cfg(feature = "log")]
                log::warn!("timestamp unavailable, skipping cycle: {}", e);
                self.finish_cycle(now);
                return CycleEvent::TimestampFailed(e);
            }
        };

        self.state = CycleState::Logging;

        // The id advances only once the record is durably appended; a
        // failed append leaves it untouched for the next cycle.
        let candidate = self.reading_id.wrapping_add(1);
        let reading = Reading {
            id: candidate,
            date: stamp.date,
            time: stamp.time,
            celsius,
        };
        let Some(line) = reading.record() else {
            self.finish_cycle(now);
            return CycleEvent::StoreFailed(StoreError::Overflow);
        };

        // Re-create the header first in case the log was cleared while awake.
        if let Err(e) = self
            .store
            .ensure_header()
            .and_then(|_| self.store.append_line(&line))
        {
            #[cfg(feature = "log")]
            log::warn!("append failed, retrying next cycle: {}", e);
            self.finish_cycle(now);
            return CycleEvent::StoreFailed(e);
        }

        self.reading_id = candidate;
        let published = self.publisher.publish(celsius);

        self.finish_cycle(now);
        CycleEvent::Logged {
            id: candidate,
            celsius,
            published,
        }
    }

    fn discard_sample(&mut self, now: Millis, err: SensorError) -> CycleEvent {
        #[cfg(feature = "log")]
        log::warn!("sample discarded: {}", err);
        self.finish_cycle(now);
        CycleEvent::SampleDiscarded(err)
    }

    fn finish_cycle(&mut self, now: Millis) {
        self.timers.last_sample_ms = now;
        self.state = CycleState::AwakeIdle;
    }

    /// `AWAKE_IDLE → SLEEPING`. Retained state is saved before the
    /// suspension; a wake signal raised between the pass's observation
    /// and this point survives into the next boot.
    fn enter_sleep(&mut self) -> CycleEvent {
        if let Err(e) = self.sleep.arm(
            self.config.sleep_timer_s,
            self.config.wake_pin,
            self.config.wake_level,
        ) {
            #[cfg(feature = "log")]
            log::warn!("could not arm wake sources, staying awake: {}", e);
            return CycleEvent::SleepFailed(e);
        }

        self.retained.save(RetainedState {
            reading_id: self.reading_id,
            wake_pending: self.wake.is_raised(),
        });

        #[cfg(feature = "log")]
        log::info!("entering deep sleep");
        self.state = CycleState::Sleeping;
        self.sleep.suspend();

        // Hardware never reaches this point. Hosts return from suspend;
        // model the resume as a fresh wake with reset cycle timers.
        let now = self.clock.now_ms();
        self.timers = CycleTimers {
            cycle_start_ms: now,
            last_sample_ms: now,
        };
        self.state = CycleState::AwakeIdle;
        CycleEvent::Slept
    }

    /// Current state of the machine.
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Last assigned reading id.
    pub fn reading_id(&self) -> u32 {
        self.reading_id
    }

    /// Live channel publisher, for pull-style requests.
    pub fn publisher(&self) -> &LivePublisher<O, N> {
        &self.publisher
    }

    /// Mutable publisher access, for observer churn from the transport.
    pub fn publisher_mut(&mut self) -> &mut LivePublisher<O, N> {
        &mut self.publisher
    }

    /// Log store access, for the export/clear network surface.
    pub fn store_mut(&mut self) -> &mut L {
        &mut self.store
    }
}
