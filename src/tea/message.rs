//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages are inputs to the update function - they come from the terminal
//! or from background actors.

use crossterm::event::KeyEvent;

use crate::animator::CycleId;

/// Input messages to the update function.
#[derive(Debug)]
pub enum Message {
    // Keyboard/terminal events
    Key(KeyEvent),
    Resize(u16, u16),

    // From background actors
    /// New value from the value source
    ValueChanged(i64),
    /// Settle window for the given cycle has elapsed
    Settled(CycleId),
}
