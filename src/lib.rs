pub mod animator;
pub mod config;
pub mod digits;
pub mod error;
pub mod log;

// Decoupled game loop architecture
pub mod actors;
pub mod app;
pub mod render;
pub mod tea;
pub mod ui;

pub use animator::{Animator, CycleId, Phase, Transition};
pub use digits::{DigitElement, Direction, Presentation, Status};
pub use error::{Error, Result};
