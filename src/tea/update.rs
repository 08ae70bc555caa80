//! Update function for the TEA (The Elm Architecture) pattern.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::animator::{Phase, Transition};
use crate::{olog_debug, olog_warn};

use super::command::Command;
use super::message::Message;
use super::model::Model;

/// Model + Message → Commands
///
/// All timer and terminal side effects happen via the returned Commands.
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => update_key(key, &mut cmds),

        Message::Resize(_, _) => {
            model.dirty = true;
        }

        Message::ValueChanged(value) => {
            model.source_value = value;
            match model.animator.submit(value) {
                Some(transition) => begin_transition(model, transition, &mut cmds),
                None => olog_debug!("Value {} buffered until current cycle settles", value),
            }
            model.dirty = true;
        }

        Message::Settled(cycle) => {
            let was_current = model.animator.phase() == Phase::Animating { cycle };
            if !was_current {
                olog_warn!("Ignoring stale settle for cycle {}", cycle);
                return cmds;
            }

            match model.animator.settle(cycle) {
                Some(transition) => begin_transition(model, transition, &mut cmds),
                None => model.transition_started = None,
            }
            model.dirty = true;
        }
    }

    cmds
}

fn update_key(key: KeyEvent, cmds: &mut Vec<Command>) {
    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
    if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
        cmds.push(Command::Quit);
    }
}

fn begin_transition(model: &mut Model, transition: Transition, cmds: &mut Vec<Command>) {
    olog_debug!(
        "Cycle {} animating to {}",
        transition.cycle,
        transition.target
    );
    model.transition_started = Some(Instant::now());
    cmds.push(Command::ArmSettle {
        cycle: transition.cycle,
        after: model.config.settle(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::digits::{settled_text, Status};
    use std::time::Duration;

    fn test_model() -> Model {
        Model::new(Config::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn armed_cycle(cmds: &[Command]) -> u64 {
        match cmds {
            [Command::ArmSettle { cycle, .. }] => *cycle,
            other => panic!("expected one ArmSettle, got {:?}", other),
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut model = test_model();
        assert_eq!(update(&mut model, Message::Key(key(KeyCode::Char('q')))), vec![Command::Quit]);
        assert_eq!(update(&mut model, Message::Key(key(KeyCode::Esc))), vec![Command::Quit]);
        assert_eq!(
            update(
                &mut model,
                Message::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            ),
            vec![Command::Quit]
        );
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let mut model = test_model();
        assert!(update(&mut model, Message::Key(key(KeyCode::Char('x')))).is_empty());
        assert!(update(&mut model, Message::Key(key(KeyCode::Char('c')))).is_empty());
    }

    #[test]
    fn test_resize_marks_dirty() {
        let mut model = test_model();
        model.dirty = false;
        assert!(update(&mut model, Message::Resize(80, 24)).is_empty());
        assert!(model.dirty);
    }

    #[test]
    fn test_value_when_idle_arms_settle() {
        let mut model = test_model();
        let cmds = update(&mut model, Message::ValueChanged(42));
        assert_eq!(
            cmds,
            vec![Command::ArmSettle {
                cycle: 0,
                after: Duration::from_millis(500)
            }]
        );
        assert!(model.transition_started.is_some());
        assert_eq!(model.source_value, 42);
    }

    #[test]
    fn test_value_while_animating_is_buffered() {
        let mut model = test_model();
        update(&mut model, Message::ValueChanged(1));
        let cmds = update(&mut model, Message::ValueChanged(2));
        assert!(cmds.is_empty());
        assert_eq!(model.animator.pending(), Some(2));
        assert_eq!(model.source_value, 2);
    }

    #[test]
    fn test_settle_applies_latest_buffered_value() {
        let mut model = test_model();
        let first = armed_cycle(&update(&mut model, Message::ValueChanged(10)));
        update(&mut model, Message::ValueChanged(20));
        update(&mut model, Message::ValueChanged(30));

        let second = armed_cycle(&update(&mut model, Message::Settled(first)));
        assert_ne!(first, second);
        assert_eq!(settled_text(model.animator.elements()), "30");

        assert!(update(&mut model, Message::Settled(second)).is_empty());
        assert!(model.transition_started.is_none());
        assert!(!model.animator.is_animating());
    }

    #[test]
    fn test_stale_settle_leaves_model_alone() {
        let mut model = test_model();
        let first = armed_cycle(&update(&mut model, Message::ValueChanged(150)));
        update(&mut model, Message::Settled(first));
        update(&mut model, Message::ValueChanged(99));
        model.dirty = false;

        assert!(update(&mut model, Message::Settled(first)).is_empty());
        assert!(!model.dirty);
        assert!(model
            .animator
            .elements()
            .iter()
            .any(|e| e.status == Status::Exiting));
    }
}
