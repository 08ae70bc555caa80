//! Per-position digit diffing.
//!
//! A displayed number is a sequence of [`DigitElement`]s, one glyph each
//! (digits, the sign and group separators alike). Reconciling a settled
//! sequence against a new value keeps glyphs that did not change and
//! overlaps changed positions with an exiting/entering pair. Once the
//! settle window closes, [`prune_exiting`] drops the exiting glyphs again.

use std::fmt;

/// Animation phase of a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Entering,
    Exiting,
}

/// Direction the number moved in; drives which way glyphs slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Up,
    Down,
}

impl Direction {
    /// Ties go `Up`: only a strictly smaller value moves down.
    pub fn between(previous: i64, next: i64) -> Self {
        if previous <= next {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// Identifies one settle window. A settle for any other cycle is stale.
pub type CycleId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitElement {
    pub position: usize,
    pub value: char,
    pub status: Status,
    pub direction: Direction,
    /// The transition that put this glyph in motion. Kept glyphs carry
    /// their original cycle forward.
    pub cycle: CycleId,
}

impl DigitElement {
    pub fn presentation(&self) -> Presentation {
        Presentation::of(self.status, self.direction)
    }
}

/// Styling hook for a glyph, one per (status, direction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    EnteringUp,
    EnteringDown,
    ExitingUp,
    ExitingDown,
}

impl Presentation {
    pub fn of(status: Status, direction: Direction) -> Self {
        match (status, direction) {
            (Status::Entering, Direction::Up) => Presentation::EnteringUp,
            (Status::Entering, Direction::Down) => Presentation::EnteringDown,
            (Status::Exiting, Direction::Up) => Presentation::ExitingUp,
            (Status::Exiting, Direction::Down) => Presentation::ExitingDown,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Presentation::EnteringUp => "entering-up",
            Presentation::EnteringDown => "entering-down",
            Presentation::ExitingUp => "exiting-up",
            Presentation::ExitingDown => "exiting-down",
        }
    }

    pub fn is_entering(&self) -> bool {
        matches!(self, Presentation::EnteringUp | Presentation::EnteringDown)
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Format `value` with thousands grouping, `en-US` style: `-12,345`.
pub fn format_grouped(value: i64, separator: char) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Diff a settled sequence against the grouped rendering of `next`.
///
/// `previous_value` is the number `previous` currently shows; it only decides
/// the direction. Exiting elements left in `previous` are ignored. New and
/// exiting elements are stamped with `cycle`.
pub fn reconcile(
    previous: &[DigitElement],
    previous_value: i64,
    next: i64,
    separator: char,
    cycle: CycleId,
) -> Vec<DigitElement> {
    let direction = Direction::between(previous_value, next);
    let settled: Vec<DigitElement> = previous
        .iter()
        .filter(|e| e.status == Status::Entering)
        .copied()
        .collect();
    let target: Vec<char> = format_grouped(next, separator).chars().collect();

    let mut out = Vec::with_capacity(settled.len().max(target.len()) * 2);
    for (i, &c) in target.iter().enumerate() {
        match settled.get(i) {
            Some(prev) if prev.value == c => out.push(*prev),
            Some(prev) => {
                out.push(DigitElement {
                    position: i,
                    value: prev.value,
                    status: Status::Exiting,
                    direction,
                    cycle,
                });
                out.push(DigitElement {
                    position: i,
                    value: c,
                    status: Status::Entering,
                    direction,
                    cycle,
                });
            }
            None => out.push(DigitElement {
                position: i,
                value: c,
                status: Status::Entering,
                direction,
                cycle,
            }),
        }
    }

    if settled.len() > target.len() {
        out.extend(settled[target.len()..].iter().map(|e| DigitElement {
            status: Status::Exiting,
            direction,
            cycle,
            ..*e
        }));
    }
    out
}

/// Remove glyphs whose exit animation has finished.
pub fn prune_exiting(elements: &mut Vec<DigitElement>) {
    elements.retain(|e| e.status == Status::Entering);
}

/// Number of glyph slots the container needs: one per entering element.
pub fn visible_slots(elements: &[DigitElement]) -> usize {
    elements
        .iter()
        .filter(|e| e.status == Status::Entering)
        .count()
}

/// The characters of the entering elements in position order.
pub fn settled_text(elements: &[DigitElement]) -> String {
    let mut entering: Vec<&DigitElement> = elements
        .iter()
        .filter(|e| e.status == Status::Entering)
        .collect();
    entering.sort_by_key(|e| e.position);
    entering.iter().map(|e| e.value).collect()
}
