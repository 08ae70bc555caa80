//! Terminal rendering for the odometer display.
//!
//! Renders from RenderState (immutable snapshot) - it never mutates
//! application state. Glyph motion is derived from the snapshot plus the
//! current instant, so frames in between snapshots still animate.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::digits;
use crate::render::RenderState;

const COLOR_TEXT_MUTED: Color = Color::DarkGray;
const COLOR_CURRENCY: Color = Color::Gray;
const COLOR_LOADER: Color = Color::Cyan;

// 24-step grayscale ramp of the 256-colour palette
const GRAY_RAMP_START: u8 = 232;
const GRAY_RAMP_STEPS: f32 = 23.0;

/// Glyphs fainter than this are not drawn at all.
const MIN_VISIBLE_INTENSITY: f32 = 0.05;

const LOADER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
pub const LOADER_FRAME_DURATION: Duration = Duration::from_millis(80);

// Number row plus one row of travel above and below
const NUMBER_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, state: &RenderState, now: Instant, loader_tick: usize) {
    let [_, number_area, _, loader_area, _, footer_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(NUMBER_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_number(frame.buffer_mut(), state, number_area, now);
    render_loader(frame, loader_area, loader_tick);
    render_footer(frame, state, footer_area);
}

fn render_number(buf: &mut Buffer, state: &RenderState, area: Rect, now: Instant) {
    let container = state.container_width();
    let currency_width = state.currency.chars().count() as u16;
    let total = container + 1 + currency_width;
    let left = area.x + area.width.saturating_sub(total) / 2;
    let baseline = area.y + area.height / 2;

    for glyph in &state.glyphs {
        let f = state.frame(glyph, now);
        if f.intensity < MIN_VISIBLE_INTENSITY {
            continue;
        }
        let x = left.saturating_add(f.column);
        let y = baseline as i32 + f.row_offset as i32;
        if x >= area.right() || y < area.y as i32 || y >= area.bottom() as i32 {
            continue;
        }
        buf.set_string(
            x,
            y as u16,
            glyph.value.to_string(),
            Style::default().fg(intensity_color(f.intensity)),
        );
    }

    let currency_x = left + container + 1;
    if currency_x < area.right() {
        buf.set_stringn(
            currency_x,
            baseline,
            &state.currency,
            (area.right() - currency_x) as usize,
            Style::default().fg(COLOR_CURRENCY),
        );
    }
}

fn render_loader(frame: &mut Frame, area: Rect, tick: usize) {
    let loader = Paragraph::new(Line::from(Span::styled(
        loader_frame(tick),
        Style::default().fg(COLOR_LOADER),
    )))
    .centered();
    frame.render_widget(loader, area);
}

fn render_footer(frame: &mut Frame, state: &RenderState, area: Rect) {
    let mut spans = vec![
        Span::styled("q", Style::default().fg(Color::White)),
        Span::styled(" quit", Style::default().fg(COLOR_TEXT_MUTED)),
    ];
    if let Some(pending) = state.pending {
        spans.push(Span::styled(
            format!("  next {}", digits::format_grouped(pending, state.group_separator)),
            Style::default().fg(COLOR_TEXT_MUTED),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Map glyph intensity to a grayscale palette colour.
pub fn intensity_color(intensity: f32) -> Color {
    let step = (intensity.clamp(0.0, 1.0) * GRAY_RAMP_STEPS).round() as u8;
    Color::Indexed(GRAY_RAMP_START + step)
}

pub fn loader_frame(tick: usize) -> &'static str {
    LOADER_FRAMES[tick % LOADER_FRAMES.len()]
}
