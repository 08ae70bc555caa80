use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::actors::{ActorHandle, SettleTimer, ValueSource};
use crate::config::Config;
use crate::render::RenderState;
use crate::tea::{update, Command, Message, Model};
use crate::{olog, olog_debug, Result};

const MAX_BG_MESSAGES: usize = 50;

/// The two timers behind the display: the recurring value source and the
/// settle timer of the current cycle. Both stop when this is dropped.
pub struct Timers {
    msg_tx: mpsc::UnboundedSender<Message>,
    value_source: Option<ActorHandle>,
    settle: Option<ActorHandle>,
}

impl Timers {
    /// Spawn the value source. Must be called inside a tokio runtime.
    pub fn start(msg_tx: mpsc::UnboundedSender<Message>, config: &Config) -> Self {
        let mut source = ValueSource::new(msg_tx.clone())
            .with_interval(config.tick_interval())
            .with_range(config.min_value..=config.max_value);
        if let Some(seed) = config.seed {
            source = source.with_seed(seed);
        }

        Self {
            msg_tx,
            value_source: Some(source.spawn()),
            settle: None,
        }
    }

    /// Run a command. Returns `true` when the app should quit.
    pub fn execute(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::ArmSettle { cycle, after } => {
                olog_debug!("Command::ArmSettle cycle={} after={:?}", cycle, after);
                // Replacing the handle disarms the previous timer
                self.settle = Some(SettleTimer::new(self.msg_tx.clone(), cycle, after).spawn());
                false
            }
            Command::Quit => {
                olog_debug!("Command::Quit");
                true
            }
        }
    }

    pub fn is_settle_armed(&self) -> bool {
        self.settle.as_ref().is_some_and(|h| !h.is_cancelled())
    }

    pub fn stop(&mut self) {
        olog_debug!("Stopping timers");
        if let Some(handle) = self.value_source.take() {
            handle.shutdown();
        }
        if let Some(handle) = self.settle.take() {
            handle.shutdown();
        }
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Feed one message through `update` and execute the resulting commands.
/// Returns `true` when the app should quit.
pub fn dispatch(model: &mut Model, timers: &mut Timers, msg: Message) -> bool {
    let mut quit = false;
    for cmd in update(model, msg) {
        quit |= timers.execute(cmd);
    }
    quit
}

/// Latest-wins publisher for render snapshots over a bounded(1) channel.
pub struct StatePublisher {
    tx: Sender<RenderState>,
    drain: Receiver<RenderState>,
}

impl StatePublisher {
    pub fn new(tx: Sender<RenderState>, drain: Receiver<RenderState>) -> Self {
        Self { tx, drain }
    }

    /// Replace any snapshot the render thread has not picked up yet.
    pub fn publish(&self, state: RenderState) {
        let _ = self.drain.try_recv();
        let _ = self.tx.try_send(state);
    }
}

pub struct LogicThread;

impl LogicThread {
    pub fn run(config: Config, publisher: StatePublisher, shutdown: Arc<AtomicBool>) -> Result<()> {
        Runtime::new()?.block_on(Self::run_async(config, publisher, shutdown))
    }

    async fn run_async(
        config: Config,
        publisher: StatePublisher,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        olog!(
            "LogicThread::run_async interval={}ms settle={}ms",
            config.tick_interval_ms,
            config.settle_ms
        );
        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Message>();
        let initial = config.initial_value;
        let mut model = Model::new(config);
        let mut timers = Timers::start(msg_tx, &model.config);

        // Show the starting value right away
        dispatch(&mut model, &mut timers, Message::ValueChanged(initial));
        publish(&publisher, &mut model);

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Keyboard input (priority)
            while event::poll(Duration::ZERO)? {
                let msg = match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => Message::Key(key),
                    Event::Resize(w, h) => Message::Resize(w, h),
                    _ => continue,
                };
                if dispatch(&mut model, &mut timers, msg) {
                    shutdown.store(true, Ordering::Relaxed);
                    timers.stop();
                    return Ok(());
                }
                publish(&publisher, &mut model);
            }

            // Background messages (bounded)
            for _ in 0..MAX_BG_MESSAGES {
                let Ok(msg) = msg_rx.try_recv() else { break };
                if dispatch(&mut model, &mut timers, msg) {
                    shutdown.store(true, Ordering::Relaxed);
                    timers.stop();
                    return Ok(());
                }
            }

            publish(&publisher, &mut model);

            tokio::time::sleep(Duration::from_micros(500)).await;
        }

        timers.stop();
        Ok(())
    }
}

fn publish(publisher: &StatePublisher, model: &mut Model) {
    if model.dirty {
        publisher.publish(model.snapshot());
        model.dirty = false;
    }
}
