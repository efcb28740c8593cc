//! Live channel publisher
//!
//! Pushes the latest Celsius value to every connected observer when - and
//! only when - it changes. Independent of the persistent log: a value can
//! be published without ever being logged (it never is in practice, since
//! publish runs from the logging stage), and connection churn never
//! surfaces as a controller-visible error.
//!
//! Delivery is fire-and-forget: a failing observer is logged and skipped,
//! never awaited, never retried. The publisher also caches the last value
//! so pull-style requests (`get_temperature`) can be answered without
//! touching the sensor.

use core::fmt::Write as _;

use crate::constants::MAX_OBSERVERS;

/// Formatted live value, two decimals like the log records.
pub type LiveText = heapless::String<16>;

/// Observer-side delivery failure. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// Transport reports the peer is gone.
    Disconnected,
    /// Transport cannot accept the message right now.
    Busy,
}

/// A connected live-channel client.
///
/// Implemented by the external transport layer; the publisher only pushes
/// text through it.
pub trait Observer {
    /// Transport-assigned client id, for churn logging.
    fn id(&self) -> u32;

    /// Best-effort text delivery.
    fn send_text(&mut self, text: &str) -> Result<(), SendError>;
}

/// Publish-on-change fan-out over a bounded observer set.
pub struct LivePublisher<O: Observer, const N: usize = MAX_OBSERVERS> {
    observers: heapless::Vec<O, N>,
    last_sent: Option<f32>,
}

impl<O: Observer, const N: usize> LivePublisher<O, N> {
    /// Empty publisher; nothing cached, nobody connected.
    pub fn new() -> Self {
        Self {
            observers: heapless::Vec::new(),
            last_sent: None,
        }
    }

    /// Track a newly connected observer.
    ///
    /// Returns the observer back when the set is full so the transport
    /// can close it; the controller never sees this.
    pub fn attach(&mut self, observer: O) -> Result<(), O> {
        #[cfg(feature = "log")]
        log::info!("live client #{} connected", observer.id());
        self.observers.push(observer)
    }

    /// Drop a disconnected observer by id.
    pub fn detach(&mut self, id: u32) {
        if let Some(pos) = self.observers.iter().position(|o| o.id() == id) {
            self.observers.swap_remove(pos);
            #[cfg(feature = "log")]
            log::info!("live client #{} disconnected", id);
        }
    }

    /// Connected observer count.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Push `celsius` to all observers if it differs from the last
    /// published value. Returns whether a broadcast happened.
    pub fn publish(&mut self, celsius: f32) -> bool {
        if self.last_sent == Some(celsius) {
            return false;
        }
        self.last_sent = Some(celsius);

        let text = format_value(celsius);
        for observer in self.observers.iter_mut() {
            if let Err(_e) = observer.send_text(&text) {
                #[cfg(feature = "log")]
                log::warn!("live client #{} send failed: {:?}", observer.id(), _e);
            }
        }
        true
    }

    /// Last published value, if any.
    pub fn latest(&self) -> Option<f32> {
        self.last_sent
    }

    /// Last published value in wire form.
    pub fn latest_text(&self) -> Option<LiveText> {
        self.last_sent.map(format_value)
    }
}

impl<O: Observer, const N: usize> Default for LivePublisher<O, N> {
    fn default() -> Self {
        Self::new()
    }
}

fn format_value(celsius: f32) -> LiveText {
    let mut text = LiveText::new();
    // 16 bytes holds any two-decimal f32 the validator lets through.
    let _ = write!(text, "{:.2}", celsius);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        id: u32,
        sent: std::vec::Vec<std::string::String>,
        fail: bool,
    }

    impl Recorder {
        fn new(id: u32) -> Self {
            Self {
                id,
                sent: std::vec::Vec::new(),
                fail: false,
            }
        }
    }

    impl Observer for Recorder {
        fn id(&self) -> u32 {
            self.id
        }

        fn send_text(&mut self, text: &str) -> Result<(), SendError> {
            if self.fail {
                return Err(SendError::Disconnected);
            }
            self.sent.push(text.into());
            Ok(())
        }
    }

    #[test]
    fn publishes_only_on_change() {
        let mut publisher: LivePublisher<Recorder, 4> = LivePublisher::new();
        publisher.attach(Recorder::new(1)).ok().unwrap();

        let values = [20.0, 20.0, 21.5, 21.5, 21.5, 20.0];
        let published = values.iter().filter(|&&v| publisher.publish(v)).count();

        // Adjacent-distinct count, not sample count.
        assert_eq!(published, 3);
        assert_eq!(
            publisher.observers[0].sent,
            ["20.00", "21.50", "20.00"]
        );
    }

    #[test]
    fn first_value_always_publishes() {
        let mut publisher: LivePublisher<Recorder, 4> = LivePublisher::new();
        assert!(publisher.publish(0.0));
        assert_eq!(publisher.latest(), Some(0.0));
    }

    #[test]
    fn failing_observer_does_not_poison_broadcast() {
        let mut publisher: LivePublisher<Recorder, 4> = LivePublisher::new();
        let mut bad = Recorder::new(1);
        bad.fail = true;
        publisher.attach(bad).ok().unwrap();
        publisher.attach(Recorder::new(2)).ok().unwrap();

        assert!(publisher.publish(19.25));
        assert_eq!(publisher.observers[1].sent, ["19.25"]);
    }

    #[test]
    fn detach_by_id() {
        let mut publisher: LivePublisher<Recorder, 4> = LivePublisher::new();
        publisher.attach(Recorder::new(7)).ok().unwrap();
        publisher.attach(Recorder::new(8)).ok().unwrap();

        publisher.detach(7);
        assert_eq!(publisher.observer_count(), 1);
        assert_eq!(publisher.observers[0].id(), 8);
    }

    #[test]
    fn set_full_returns_observer() {
        let mut publisher: LivePublisher<Recorder, 1> = LivePublisher::new();
        publisher.attach(Recorder::new(1)).ok().unwrap();
        assert!(publisher.attach(Recorder::new(2)).is_err());
    }

    #[test]
    fn latest_text_matches_wire_form() {
        let mut publisher: LivePublisher<Recorder, 4> = LivePublisher::new();
        publisher.publish(21.5);
        assert_eq!(publisher.latest_text().unwrap().as_str(), "21.50");
    }
}
