//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders into a simple framebuffer that can be flushed to a terminal
//! backend, keeping the drawing logic pure and unit-testable.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Make the view a pure function of one `GameState` snapshot
//! - Let the host flush frames whenever a trigger changed the state

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_wordfall_core as core;
pub use tui_wordfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
