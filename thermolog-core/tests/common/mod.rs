//! Shared test doubles for controller integration tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use thermolog_core::config::WakeLevel;
use thermolog_core::errors::{SleepError, StoreError, StoreResult};
use thermolog_core::publish::{Observer, SendError};
use thermolog_core::retained::{RetainedMemory, RetainedState};
use thermolog_core::sleep::SleepManager;
use thermolog_core::storage::{LogStore, MemoryStore};

/// Observer writing into a shared transcript the test can inspect.
pub struct RecordingObserver {
    id: u32,
    pub transcript: Rc<RefCell<Vec<String>>>,
}

impl RecordingObserver {
    pub fn new(id: u32) -> (Self, Rc<RefCell<Vec<String>>>) {
        let transcript = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                id,
                transcript: transcript.clone(),
            },
            transcript,
        )
    }
}

impl Observer for RecordingObserver {
    fn id(&self) -> u32 {
        self.id
    }

    fn send_text(&mut self, text: &str) -> Result<(), SendError> {
        self.transcript.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// Memory store that can be told to fail upcoming appends.
pub struct FlakyStore {
    inner: MemoryStore<4096>,
    pub fail_appends: Cell<u32>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_appends: Cell::new(0),
        }
    }

    pub fn contents(&self) -> &str {
        self.inner.contents()
    }
}

impl LogStore for FlakyStore {
    fn is_present(&self) -> bool {
        self.inner.is_present()
    }

    fn ensure_header(&mut self) -> StoreResult<()> {
        self.inner.ensure_header()
    }

    fn append_line(&mut self, line: &str) -> StoreResult<()> {
        let pending = self.fail_appends.get();
        if pending > 0 {
            self.fail_appends.set(pending - 1);
            return Err(StoreError::WriteFailed);
        }
        self.inner.append_line(line)
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.inner.clear()
    }

    fn read_all<W: core::fmt::Write>(&mut self, out: &mut W) -> StoreResult<()> {
        self.inner.read_all(out)
    }
}

/// Retained backend the test can observe after the controller saves.
#[derive(Clone, Default)]
pub struct SharedRetained {
    state: Rc<Cell<RetainedState>>,
}

impl SharedRetained {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: RetainedState) -> Self {
        let shared = Self::default();
        shared.state.set(state);
        shared
    }

    pub fn get(&self) -> RetainedState {
        self.state.get()
    }
}

impl RetainedMemory for SharedRetained {
    fn load(&self) -> RetainedState {
        self.state.get()
    }

    fn save(&mut self, state: RetainedState) {
        self.state.set(state);
    }
}

/// Sleep manager the test can observe after the controller suspends.
#[derive(Clone, Default)]
pub struct SharedSleep {
    pub armed: Rc<Cell<Option<(u32, u8, WakeLevel)>>>,
    pub suspends: Rc<Cell<u32>>,
    pub fail_arm: Rc<Cell<bool>>,
}

impl SharedSleep {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SleepManager for SharedSleep {
    fn arm(&mut self, timer_s: u32, wake_pin: u8, level: WakeLevel) -> Result<(), SleepError> {
        if self.fail_arm.get() {
            return Err(SleepError::TimerRejected);
        }
        self.armed.set(Some((timer_s, wake_pin, level)));
        Ok(())
    }

    fn suspend(&mut self) {
        self.suspends.set(self.suspends.get() + 1);
    }
}
