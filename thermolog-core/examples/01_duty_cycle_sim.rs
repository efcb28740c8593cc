//! Simulated duty cycle on the host
//!
//! Drives the controller through a full awake window with a scripted
//! sensor and a manually advanced clock, printing each cycle outcome and
//! the resulting log. A wake signal is injected right as the sleep budget
//! runs out to show the deferral.
//!
//! Run with: `cargo run --example 01_duty_cycle_sim`

use thermolog_core::{
    publish::{Observer, SendError},
    time::{FixedClock, FixedEpoch},
    CycleEvent, DutyCycleController, LivePublisher, LoggerConfig, MemoryStore, MockSleep,
    NetworkConfig, RamRetained, ScriptedSensor, WakeFlag,
};

/// Observer printing pushed values like a connected browser would see them.
struct ConsoleObserver;

impl Observer for ConsoleObserver {
    fn id(&self) -> u32 {
        1
    }

    fn send_text(&mut self, text: &str) -> Result<(), SendError> {
        println!("  live push -> {text}");
        Ok(())
    }
}

fn main() {
    // The transport layer joins before the first time sync; here it only
    // narrates the step.
    let network = NetworkConfig {
        ssid: "glasshouse",
        password: "changeme",
    };
    println!("joining '{}'", network.ssid);

    let script = [20.0, 20.0, 21.5, f32::NAN, 21.5];
    let clock = FixedClock::new(0);
    let wake = WakeFlag::new();

    let mut publisher = LivePublisher::<ConsoleObserver, 4>::new();
    let _ = publisher.attach(ConsoleObserver);

    let mut controller = DutyCycleController::new(
        ScriptedSensor::new(&script),
        FixedEpoch::new(1_527_523_213),
        MemoryStore::<4096>::new(),
        publisher,
        MockSleep::new(),
        RamRetained::new(),
        &clock,
        LoggerConfig::default().sleep_budget_secs(330),
        &wake,
    )
    .expect("controller init");

    // Five sample intervals inside the awake budget.
    for minute in 1..=script.len() {
        clock.advance(60_000);
        let event = controller.poll();
        println!("t={minute:>2}min {event:?}");
    }

    // Budget exhausted between samples, but the button fires first.
    clock.advance(30_000);
    wake.raise();
    assert!(matches!(controller.poll(), CycleEvent::WakeDeferred));
    println!("wake signal deferred sleep for one pass");

    assert!(matches!(controller.poll(), CycleEvent::Slept));
    println!("entered deep sleep after {} records", controller.reading_id());

    println!("\n--- {} ---", thermolog_core::constants::LOG_PATH);
    print!("{}", controller.store_mut().contents());
}
