//! Retained memory and the wake flag
//!
//! Deep sleep is a full suspend: execution resumes at process start, not
//! at the suspension point. Exactly two fields survive the boundary, held
//! in [`RetainedState`] with an explicit save/restore contract. Full power
//! loss clears retained memory and resets both.
//!
//! The [`WakeFlag`] is the single piece of state shared between the
//! asynchronous signal context (button interrupt) and the main control
//! flow. It is a one-word atomic: the signal context only ever performs a
//! single store, never a read-modify-write.

use core::sync::atomic::{AtomicBool, Ordering};

/// Fields preserved across a deep-sleep/wake boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetainedState {
    /// Last assigned reading id.
    pub reading_id: u32,
    /// Whether a wake signal fired and was not yet observed.
    pub wake_pending: bool,
}

/// Backing region for [`RetainedState`].
///
/// On hardware this maps to RTC/backup RAM; [`RamRetained`] is the host
/// and test backend. `save` is called immediately before suspension,
/// `load` once at initialization.
pub trait RetainedMemory {
    /// Restore the state saved before the last suspension.
    fn load(&self) -> RetainedState;

    /// Persist state for the next boot.
    fn save(&mut self, state: RetainedState);
}

/// Plain-RAM retained backend for hosts and tests.
#[derive(Debug, Default)]
pub struct RamRetained {
    state: RetainedState,
}

impl RamRetained {
    /// Start with cleared retained memory, as after full power loss.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously saved state.
    pub fn with_state(state: RetainedState) -> Self {
        Self { state }
    }
}

impl RetainedMemory for RamRetained {
    fn load(&self) -> RetainedState {
        self.state
    }

    fn save(&mut self, state: RetainedState) {
        self.state = state;
    }
}

/// Single-writer wake flag set from the signal context.
///
/// `raise` is the only operation permitted in the interrupt handler; the
/// main loop consumes the flag with `take`.
#[derive(Debug)]
pub struct WakeFlag {
    raised: AtomicBool,
}

impl WakeFlag {
    /// New, lowered flag. `const` so it can live in a `static`.
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Signal-context entry point: mark the wake request.
    ///
    /// A single atomic store; safe at any interrupt priority.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Observe and clear the flag in one step.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }

    /// Peek without clearing, for retained-state snapshots.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

impl Default for WakeFlag {
    fn default() -> Self {
        Self::new()
    }
}
