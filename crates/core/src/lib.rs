//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical word sequences and drift
//! - **Testable**: Comprehensive unit tests for all transition rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`engine`]: Game state machine - status transitions, input matching, win/lose rules
//! - [`factory`]: Word factory - random word text, spawn placement, drift
//! - [`rng`]: Seeded LCG used for all randomness
//!
//! # Game Rules
//!
//! Words fall from the top of a percent-space play-field toward the floor
//! (`y == 0`). Typing a word's full text removes it and clears the pending
//! input. The session is won when the countdown reaches zero or the field is
//! cleared, and lost when any word reaches the floor; the win condition is
//! evaluated first when both hold at once.
//!
//! # Example
//!
//! ```
//! use tui_wordfall_core::{GameEngine, WordFactory};
//! use tui_wordfall_types::{GameTrigger, Status};
//!
//! let factory = WordFactory::new(vec!["react".to_string()], 12345).unwrap();
//! let mut engine = GameEngine::new(factory);
//!
//! assert_eq!(engine.state().status, Status::Stopped);
//! assert!(engine.handle(GameTrigger::Start));
//! assert_eq!(engine.state().status, Status::Running);
//!
//! // Ticks arriving while paused are rejected without touching state.
//! assert!(engine.handle(GameTrigger::Pause));
//! assert!(!engine.handle(GameTrigger::SimTick));
//! ```

pub mod engine;
pub mod factory;
pub mod rng;

pub use tui_wordfall_types as types;

// Re-export commonly used types for convenience
pub use engine::{GameEngine, GameState};
pub use factory::{
    Drift, EmptyVocabulary, Placement, SpawnArea, Word, WordFactory, DEFAULT_VOCABULARY,
};
pub use rng::SimpleRng;
