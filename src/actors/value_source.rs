//! Value source actor: emits a random value on a fixed cadence.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::tea::Message;
use crate::{olog_debug, olog_trace};

use super::ActorHandle;

const TICK_INTERVAL: Duration = Duration::from_millis(2000);
const DEFAULT_RANGE: RangeInclusive<i64> = -9999..=90000;

/// Draw one value uniformly from `range`.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, range: &RangeInclusive<i64>) -> i64 {
    rng.gen_range(range.clone())
}

/// Actor that replaces the current value with a random one every tick.
///
/// The first tick fires one full interval after spawning. The value on
/// screen until then is the caller's initial value.
pub struct ValueSource {
    msg_tx: mpsc::UnboundedSender<Message>,
    interval: Duration,
    range: RangeInclusive<i64>,
    rng: StdRng,
}

impl ValueSource {
    pub fn new(msg_tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            msg_tx,
            interval: TICK_INTERVAL,
            range: DEFAULT_RANGE,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_range(mut self, range: RangeInclusive<i64>) -> Self {
        self.range = range;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn spawn(mut self) -> ActorHandle {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        olog_debug!(
            "ValueSource::spawn interval={:?} range={:?}",
            self.interval,
            self.range
        );

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel_clone.cancelled() => {
                        olog_debug!("ValueSource cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        let value = sample(&mut self.rng, &self.range);
                        olog_trace!("ValueSource: tick {}", value);
                        if self.msg_tx.send(Message::ValueChanged(value)).is_err() {
                            olog_debug!("ValueSource: message channel closed");
                            break;
                        }
                    }
                }
            }
        });

        ActorHandle::new(cancel)
    }
}
