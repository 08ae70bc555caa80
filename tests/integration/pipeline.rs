//! End-to-end pipeline tests on a paused clock.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::time::Instant;

use odometer::animator::Phase;
use odometer::digits::{settled_text, Status};
use odometer::tea::Message;

use super::fixtures::{fast_config, Harness, SETTLE_SLACK};

#[tokio::test(start_paused = true)]
async fn test_initial_value_is_shown_and_settles() {
    let mut h = Harness::start(fast_config(2000, 500));
    assert_eq!(h.model.source_value, 0);
    assert_eq!(settled_text(h.model.animator.elements()), "0");
    assert!(h.timers.is_settle_armed());

    let start = Instant::now();
    let msg = h.pump().await;
    assert!(matches!(msg, Message::Settled(0)));
    assert!(start.elapsed() >= Duration::from_millis(500) - SETTLE_SLACK);
    assert_eq!(h.model.animator.phase(), Phase::Idle);
    assert!(h.model.transition_started.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_value_tick_animates_after_one_interval() {
    let mut h = Harness::start(fast_config(2000, 500));
    h.pump().await; // settle of the initial value

    let start = Instant::now();
    let Message::ValueChanged(v) = h.pump().await else {
        panic!("expected a value tick");
    };
    assert!(start.elapsed() >= Duration::from_millis(1500) - SETTLE_SLACK);
    assert!((-9999..=90000).contains(&v));
    assert_eq!(h.model.source_value, v);
    assert_eq!(h.model.animator.value(), v);
    assert!(h.model.animator.is_animating());
}

#[tokio::test(start_paused = true)]
async fn test_ticks_during_window_coalesce_to_latest() {
    // Ticks at 100, 200, 300 and 400ms all land inside the first 450ms window
    let mut h = Harness::start(fast_config(100, 450));

    let mut buffered = Vec::new();
    loop {
        match h.pump().await {
            Message::ValueChanged(v) => buffered.push(v),
            Message::Settled(cycle) => {
                assert_eq!(cycle, 0);
                break;
            }
            _ => unreachable!(),
        }
    }

    assert_eq!(buffered.len(), 4);
    let latest = *buffered.last().unwrap();
    assert_eq!(h.model.animator.value(), latest);
    assert_eq!(h.model.animator.phase(), Phase::Animating { cycle: 1 });
    assert_eq!(h.model.animator.pending(), None);
    assert_eq!(
        settled_text(h.model.animator.elements()),
        odometer::digits::format_grouped(latest, ',')
    );
}

#[tokio::test(start_paused = true)]
async fn test_settle_prunes_exiting_glyphs() {
    let mut h = Harness::start(fast_config(600, 500));
    h.pump().await; // initial settle at 500ms

    // Tick at 600ms starts a cycle; keep pumping until it settles
    loop {
        if let Message::Settled(_) = h.pump().await {
            break;
        }
    }
    assert!(h
        .model
        .animator
        .elements()
        .iter()
        .all(|e| e.status == Status::Entering));
}

#[tokio::test(start_paused = true)]
async fn test_quit_key_requests_shutdown() {
    let mut h = Harness::start(fast_config(2000, 500));
    let quit = h.send(Message::Key(KeyEvent::new(
        KeyCode::Char('q'),
        KeyModifiers::NONE,
    )));
    assert!(quit);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_timers_stops_all_messages() {
    let h = Harness::start(fast_config(100, 500));
    let Harness { timers, mut rx, .. } = h;
    assert!(timers.is_settle_armed());

    drop(timers);
    // Every sender lives in a cancelled task or in the dropped Timers
    while rx.recv().await.is_some() {}
}
