use std::io::{self, stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use odometer::app::{LogicThread, StatePublisher};
use odometer::config::Config;
use odometer::digits;
use odometer::render::RenderState;
use odometer::{olog, olog_error, ui, Error, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps

/// Odometer - animated numeric display driven by a random value source
#[derive(Parser, Debug)]
#[command(name = "odometer")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    ODOMETER_DEBUG=1     Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.odometer/odometer.log)
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Milliseconds between new values
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Length of the settle window in milliseconds
    #[arg(long)]
    pub settle_ms: Option<u64>,

    /// Smallest value the source may produce
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Largest value the source may produce
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Seed for a reproducible value sequence
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the glyph transitions between two values and exit
    Diff {
        /// Value currently displayed
        #[arg(allow_negative_numbers = true)]
        from: i64,
        /// Value to animate to
        #[arg(allow_negative_numbers = true)]
        to: i64,
    },
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(ms) = self.interval_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(ms) = self.settle_ms {
            config.settle_ms = ms;
        }
        if let Some(min) = self.min {
            config.min_value = min;
        }
        if let Some(max) = self.max {
            config.max_value = max;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    odometer::log::init_with_debug(cli.debug);

    let mut config = Config::load()?;
    cli.apply(&mut config);
    config.validate()?;

    if let Some(Command::Diff { from, to }) = cli.command {
        return run_diff(&config, from, to);
    }

    olog!("Odometer starting");

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);
    let publisher = StatePublisher::new(state_tx, state_rx.clone());

    let shutdown_clone = shutdown.clone();
    let logic_handle =
        thread::spawn(move || LogicThread::run(config, publisher, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let logic_result = logic_handle
        .join()
        .map_err(|_| Error::TaskJoin("logic thread panicked".to_string()));
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        olog_error!("Render loop failed: {}", e);
    }
    olog!("Odometer stopped");
    result?;
    logic_result?
}

fn run_diff(config: &Config, from: i64, to: i64) -> Result<()> {
    let sep = config.group_separator;
    let mut shown = digits::reconcile(&[], from, from, sep, 0);
    digits::prune_exiting(&mut shown);

    let elements = digits::reconcile(&shown, from, to, sep, 1);
    for e in &elements {
        println!("{} {} {}", e.position, e.value, e.presentation());
    }
    println!(
        "{} -> {}",
        digits::format_grouped(from, sep),
        digits::settled_text(&elements)
    );
    Ok(())
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let started = Instant::now();
    let mut last_frame = Instant::now();
    let mut last_loader_tick = usize::MAX;
    let mut dirty = true;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        let loader_tick =
            (started.elapsed().as_millis() / ui::LOADER_FRAME_DURATION.as_millis()) as usize;

        // Mid-transition frames differ even without a new snapshot
        if dirty || state.is_animating() || loader_tick != last_loader_tick {
            terminal.draw(|f| ui::draw(f, &state, last_frame, loader_tick))?;
            last_version = state.version;
            last_loader_tick = loader_tick;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
