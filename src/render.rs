use crate::digits::Presentation;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// One glyph of the displayed number as the render thread sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphView {
    pub position: usize,
    pub value: char,
    pub presentation: Presentation,
    /// Part of the running transition. Glyphs at rest are drawn in place.
    pub in_motion: bool,
}

/// Where and how brightly a glyph is drawn at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphFrame {
    /// Column offset from the left edge of the number container.
    pub column: u16,
    /// Vertical offset from the baseline: negative is above.
    pub row_offset: i16,
    /// 0.0 is invisible, 1.0 is fully drawn.
    pub intensity: f32,
}

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub glyphs: Vec<GlyphView>,
    /// Value the display is showing or moving towards.
    pub value: i64,
    /// Value waiting for the current transition to settle.
    pub pending: Option<i64>,
    /// Start of the running transition; `None` when settled.
    pub transition_started: Option<Instant>,
    pub settle: Duration,
    pub stagger: Duration,
    pub glyph_width: u16,
    pub group_separator: char,
    pub currency: String,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            version: 0,
            glyphs: Vec::new(),
            value: 0,
            pending: None,
            transition_started: None,
            settle: Duration::from_millis(500),
            stagger: Duration::from_millis(15),
            glyph_width: 1,
            group_separator: ',',
            currency: "$".to_string(),
        }
    }
}

impl RenderState {
    pub fn is_animating(&self) -> bool {
        self.transition_started.is_some()
    }

    /// Width of the number container: one glyph slot per entering glyph.
    pub fn container_width(&self) -> u16 {
        let slots = self
            .glyphs
            .iter()
            .filter(|g| g.presentation.is_entering())
            .count() as u16;
        slots.saturating_mul(self.glyph_width)
    }

    /// Transition progress of `glyph` in [0, 1], delayed by its stagger.
    pub fn progress(&self, glyph: &GlyphView, now: Instant) -> f32 {
        let Some(started) = self.transition_started else {
            return 1.0;
        };
        if !glyph.in_motion {
            return 1.0;
        }
        // A delay past what Duration can hold never starts
        let Some(delay) = u32::try_from(glyph.position)
            .ok()
            .and_then(|position| self.stagger.checked_mul(position))
        else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(started);
        let Some(running) = elapsed.checked_sub(delay) else {
            return 0.0;
        };
        if self.settle.is_zero() {
            return 1.0;
        }
        (running.as_secs_f32() / self.settle.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn frame(&self, glyph: &GlyphView, now: Instant) -> GlyphFrame {
        let p = self.progress(glyph, now);
        // Entering glyphs travel from one row away to the baseline;
        // exiting glyphs travel from the baseline to one row away.
        let (row_offset, intensity) = match glyph.presentation {
            Presentation::EnteringUp => (travel(1.0 - p), p),
            Presentation::EnteringDown => (-travel(1.0 - p), p),
            Presentation::ExitingUp => (-travel(p), 1.0 - p),
            Presentation::ExitingDown => (travel(p), 1.0 - p),
        };
        GlyphFrame {
            column: (glyph.position as u16).saturating_mul(self.glyph_width),
            row_offset,
            intensity,
        }
    }
}

fn travel(fraction: f32) -> i16 {
    if fraction >= 0.5 {
        1
    } else {
        0
    }
}
