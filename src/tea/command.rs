//! Commands for the TEA (The Elm Architecture) pattern.
//!
//! Commands are outputs from the update function - they represent side effects
//! to be executed by the runtime.

use std::time::Duration;

use crate::animator::CycleId;

/// Output commands from the update function.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the one-shot settle timer for `cycle`, replacing any armed one.
    ArmSettle { cycle: CycleId, after: Duration },

    // App lifecycle
    Quit,
}
