//! Test fixtures for integration tests.

use std::time::Duration;

use tokio::sync::mpsc;

use odometer::app::{dispatch, Timers};
use odometer::config::Config;
use odometer::digits::{self, DigitElement};
use odometer::tea::{Message, Model};

/// Settled glyphs for `value`, as if it had been on screen for a while.
pub fn settled(value: i64) -> Vec<DigitElement> {
    let mut elements = digits::reconcile(&[], value, value, ',', 0);
    digits::prune_exiting(&mut elements);
    elements
}

/// Fast-ticking config with a fixed seed.
pub fn fast_config(tick_ms: u64, settle_ms: u64) -> Config {
    Config {
        tick_interval_ms: tick_ms,
        settle_ms,
        seed: Some(17),
        ..Config::default()
    }
}

/// Model and live timers wired to one message channel, like the logic thread.
pub struct Harness {
    pub model: Model,
    pub timers: Timers,
    pub rx: mpsc::UnboundedReceiver<Message>,
}

impl Harness {
    /// Must be called inside a tokio runtime.
    pub fn start(config: Config) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let timers = Timers::start(tx, &config);
        let initial = config.initial_value;
        let mut harness = Self {
            model: Model::new(config),
            timers,
            rx,
        };
        harness.send(Message::ValueChanged(initial));
        harness
    }

    pub fn send(&mut self, msg: Message) -> bool {
        dispatch(&mut self.model, &mut self.timers, msg)
    }

    /// Wait for the next background message and feed it to the model.
    pub async fn pump(&mut self) -> Message {
        let msg = self.rx.recv().await.expect("timer channel closed");
        let echo = match &msg {
            Message::ValueChanged(v) => Message::ValueChanged(*v),
            Message::Settled(c) => Message::Settled(*c),
            other => panic!("unexpected background message {:?}", other),
        };
        self.send(msg);
        echo
    }
}

pub const SETTLE_SLACK: Duration = Duration::from_millis(1);
