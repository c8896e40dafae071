//! TUI Wordfall (workspace facade crate).
//!
//! This package keeps the `tui_wordfall::{core,input,term,types}` public API
//! in one place while the implementation lives in dedicated crates under
//! `crates/`.

pub use tui_wordfall_core as core;
pub use tui_wordfall_input as input;
pub use tui_wordfall_term as term;
pub use tui_wordfall_types as types;
