//! GameView: maps a `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Words live in percent space (`x` from the left edge, `y` above the floor)
//! and are mapped onto a fixed-size character play-field: `y = 100` is the
//! top row, `y = 0` the floor row. Outside a running session the play-field
//! is replaced by a full-frame panel (idle, victory, defeat), and a status
//! line under the frame always shows the input echo and the countdown.

use crate::core::GameState;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Status;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const FIELD_BG: Rgb = Rgb::new(30, 30, 44);
const CHIP: CellStyle = CellStyle::new(Rgb::new(250, 240, 240), Rgb::new(205, 92, 92));
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const STATUS: CellStyle = CellStyle::new(Rgb::new(160, 160, 160), Rgb::new(0, 0, 0));

const IDLE_BG: Rgb = Rgb::new(64, 64, 64);
const WON_BG: Rgb = Rgb::new(52, 112, 52);
const LOST_BG: Rgb = Rgb::new(128, 56, 56);

/// A lightweight terminal renderer for the falling-words game.
pub struct GameView {
    /// Play-field width in terminal columns (inside the border).
    field_w: u16,
    /// Play-field height in terminal rows (inside the border).
    field_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Fits a classic 80x24 terminal with the border and status line.
        Self {
            field_w: 64,
            field_h: 18,
        }
    }
}

impl GameView {
    pub fn new(field_w: u16, field_h: u16) -> Self {
        Self { field_w, field_h }
    }

    /// Render the given snapshot into an existing framebuffer.
    pub fn render_into(&self, state: &GameState, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Default::default());

        let frame_w = self.field_w + 2;
        let frame_h = self.field_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        // One extra row under the frame for the status line.
        let start_y = viewport.height.saturating_sub(frame_h + 1) / 2;

        match state.status {
            Status::Running | Status::Paused => {
                self.draw_field(fb, state, start_x, start_y);
            }
            Status::Stopped => {
                self.draw_panel(fb, start_x, start_y, IDLE_BG, "Typing Game", "Click anywhere to start!");
            }
            Status::Won => {
                self.draw_panel(fb, start_x, start_y, WON_BG, "Victory!", "Click anywhere to try again!");
            }
            Status::Lost => {
                self.draw_panel(fb, start_x, start_y, LOST_BG, "Defeat!", "Click anywhere to try again!");
            }
        }

        self.draw_status_line(fb, state, start_x, start_y + frame_h, frame_w);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    fn draw_field(&self, fb: &mut FrameBuffer, state: &GameState, start_x: u16, start_y: u16) {
        let field = CellStyle::new(Rgb::new(90, 90, 110), FIELD_BG);
        fb.fill_rect(start_x + 1, start_y + 1, self.field_w, self.field_h, ' ', field);
        self.draw_border(fb, start_x, start_y);

        for word in &state.words {
            let (col, row) = self.word_cell(word.text.chars().count() as u16, word.x, word.y);
            fb.put_str(start_x + 1 + col, start_y + 1 + row, &word.text, CHIP);
        }
    }

    /// Map a percent-space position to a play-field cell, keeping the whole
    /// word inside the field.
    fn word_cell(&self, text_w: u16, x: f32, y: f32) -> (u16, u16) {
        let max_col = self.field_w.saturating_sub(text_w);
        let col = (x / 100.0 * max_col as f32).round() as u16;
        let row = ((100.0 - y) / 100.0 * (self.field_h - 1) as f32).round() as u16;
        (col.min(max_col), row.min(self.field_h - 1))
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let w = self.field_w + 2;
        let h = self.field_h + 2;

        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        bg: Rgb,
        title: &str,
        prompt: &str,
    ) {
        let w = self.field_w + 2;
        let h = self.field_h + 2;
        let body = CellStyle::new(Rgb::new(235, 235, 235), bg);
        fb.fill_rect(start_x, start_y, w, h, ' ', body);

        let mid_y = start_y + h / 2;
        let center = |text: &str| start_x + w.saturating_sub(text.chars().count() as u16) / 2;
        fb.put_str(center(title), mid_y.saturating_sub(1), title, body.bold());
        fb.put_str(center(prompt), mid_y + 1, prompt, body.dim());
    }

    fn draw_status_line(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        x: u16,
        y: u16,
        w: u16,
    ) {
        let left = left_copy(state);
        let right = right_copy(state);
        fb.put_str(x, y, &left, STATUS);
        let rx = x + w.saturating_sub(right.chars().count() as u16);
        fb.put_str(rx, y, &right, STATUS);
    }
}

/// Input echo side of the status line.
fn left_copy(state: &GameState) -> String {
    match state.status {
        Status::Running if state.input.is_empty() => "Lets Go!".to_string(),
        Status::Running => format!("{}▌", state.input),
        Status::Paused => "...".to_string(),
        Status::Stopped | Status::Won | Status::Lost => "Lets Go!".to_string(),
    }
}

/// Countdown/caption side of the status line.
fn right_copy(state: &GameState) -> String {
    match state.status {
        Status::Running => format!("Seconds left: {}", state.seconds_left),
        Status::Paused => "[PAUSED]".to_string(),
        Status::Won => ":)".to_string(),
        Status::Lost => ":(".to_string(),
        Status::Stopped => "^_^".to_string(),
    }
}
