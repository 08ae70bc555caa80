//! Coalescing state machine around the digit reconciler.
//!
//! Only one transition runs at a time. A value submitted while a transition
//! is in flight goes into a single pending slot (last write wins) and is
//! applied when the settle window closes.

use crate::digits::{self, DigitElement};
use crate::{olog_debug, olog_trace};

pub use crate::digits::CycleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Animating { cycle: CycleId },
}

/// A transition the caller must time: call [`Animator::settle`] with
/// `cycle` once the settle window has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub cycle: CycleId,
    pub target: i64,
}

#[derive(Debug)]
pub struct Animator {
    phase: Phase,
    pending: Option<i64>,
    value: i64,
    elements: Vec<DigitElement>,
    next_cycle: CycleId,
    separator: char,
}

impl Animator {
    /// An idle animator with nothing on screen. `baseline` is the value the
    /// first transition's direction is measured against.
    pub fn new(baseline: i64, separator: char) -> Self {
        Self {
            phase: Phase::Idle,
            pending: None,
            value: baseline,
            elements: Vec::new(),
            next_cycle: 0,
            separator,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    pub fn pending(&self) -> Option<i64> {
        self.pending
    }

    /// The value the display is showing or moving towards.
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn elements(&self) -> &[DigitElement] {
        &self.elements
    }

    /// Whether `element` is moving as part of the transition in flight.
    /// Glyphs carried over from earlier cycles stay at rest.
    pub fn is_in_motion(&self, element: &DigitElement) -> bool {
        self.phase == Phase::Animating { cycle: element.cycle }
    }

    /// Offer a new target. Starts a transition when idle, otherwise replaces
    /// whatever value was waiting.
    pub fn submit(&mut self, target: i64) -> Option<Transition> {
        match self.phase {
            Phase::Idle => Some(self.begin(target)),
            Phase::Animating { cycle } => {
                if let Some(dropped) = self.pending.replace(target) {
                    olog_debug!("Animator: cycle {} pending {} replaced by {}", cycle, dropped, target);
                }
                None
            }
        }
    }

    /// Close the settle window for `cycle`: prune exiting glyphs, then apply
    /// the pending value if there is one.
    ///
    /// Returns `None` both when the animator goes idle and when `cycle` is
    /// stale; use [`Animator::phase`] to tell them apart.
    pub fn settle(&mut self, cycle: CycleId) -> Option<Transition> {
        match self.phase {
            Phase::Animating { cycle: current } if current == cycle => {}
            _ => return None,
        }

        digits::prune_exiting(&mut self.elements);
        self.phase = Phase::Idle;
        olog_debug!("Animator: cycle {} settled at {}", cycle, self.value);

        self.pending.take().map(|target| self.begin(target))
    }

    fn begin(&mut self, target: i64) -> Transition {
        let cycle = self.next_cycle;
        self.next_cycle += 1;

        self.elements = digits::reconcile(&self.elements, self.value, target, self.separator, cycle);
        olog_trace!("Animator: cycle {} {} -> {} {:?}", cycle, self.value, target, self.elements);
        self.value = target;
        self.phase = Phase::Animating { cycle };

        Transition { cycle, target }
    }
}
