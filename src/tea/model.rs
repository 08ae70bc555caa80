//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is pure application state - no channels, no handles, no runtime infrastructure.

use std::time::Instant;

use crate::animator::Animator;
use crate::config::Config;
use crate::render::{next_version, GlyphView, RenderState};

/// Pure application state - the single source of truth.
pub struct Model {
    pub animator: Animator,

    /// When the current transition began; `None` while idle.
    pub transition_started: Option<Instant>,

    /// Last value reported by the value source, applied or not.
    pub source_value: i64,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,

    // Config (immutable after init)
    pub config: Config,
}

impl Model {
    pub fn new(config: Config) -> Self {
        Self {
            animator: Animator::new(config.initial_value, config.group_separator),
            transition_started: None,
            source_value: config.initial_value,
            dirty: true,
            config,
        }
    }

    /// Create an immutable snapshot for the render thread.
    ///
    /// Each snapshot gets a monotonically increasing version number so the
    /// render thread can skip redundant draws.
    pub fn snapshot(&self) -> RenderState {
        let glyphs = self
            .animator
            .elements()
            .iter()
            .map(|e| GlyphView {
                position: e.position,
                value: e.value,
                presentation: e.presentation(),
                in_motion: self.animator.is_in_motion(e),
            })
            .collect();

        RenderState {
            version: next_version(),
            glyphs,
            value: self.animator.value(),
            pending: self.animator.pending(),
            transition_started: self.transition_started,
            settle: self.config.settle(),
            stagger: self.config.stagger(),
            glyph_width: self.config.glyph_width,
            group_separator: self.config.group_separator,
            currency: self.config.currency.clone(),
        }
    }
}
