//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into [`crate::types::GameTrigger`]s and
//! performs the host's filtering duty: only alphanumeric characters pass
//! through as typed input, everything else is dropped here.

pub mod map;

pub use tui_wordfall_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit};
