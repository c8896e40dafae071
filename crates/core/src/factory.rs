//! Word factory module - random word text, spawn placement, and drift
//!
//! The factory is a leaf dependency of the game engine: it draws word texts
//! uniformly at random (with replacement) from a fixed vocabulary and computes
//! board-relative positions, but knows nothing about game status or timing.
//!
//! Placement is per axis: either a uniform random range or a deterministic
//! fan-out from the batch index (used at game start so the initial words are
//! evenly spread along `x`). Drift sign conventions are the caller's policy;
//! the factory only samples the given ranges and clamps back into the field.

use std::error::Error;
use std::fmt;

use tui_wordfall_types::{FIELD_MAX, FIELD_MIN};

use crate::rng::SimpleRng;

/// Built-in word list, used when the host supplies no vocabulary of its own.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "react", "angular", "jquery", "vue", "backbone", "svelte", "ember", "preact", "solid",
    "astro", "lit", "qwik",
];

/// A falling word: immutable text plus a percent-space position.
///
/// `y == 0.0` means the word sits on the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// How one position axis is chosen at spawn time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Uniform random in `[min, max]`
    Uniform { min: f32, max: f32 },
    /// Deterministic `index * step`, clamped to the field
    Spread { step: f32 },
}

/// Spawn placement for both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    pub x: Placement,
    pub y: Placement,
}

/// Per-tick positional delta ranges. Negative y-range drifts toward the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

/// Construction error: the factory requires at least one word to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyVocabulary;

impl fmt::Display for EmptyVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "word factory requires a nonempty vocabulary")
    }
}

impl Error for EmptyVocabulary {}

/// Generates words and advances their positions.
///
/// Holds the vocabulary and the session RNG; all randomness flows through it.
#[derive(Debug, Clone, PartialEq)]
pub struct WordFactory {
    vocabulary: Vec<String>,
    rng: SimpleRng,
}

impl WordFactory {
    /// Create a factory over a nonempty vocabulary with the given RNG seed.
    pub fn new(vocabulary: Vec<String>, seed: u32) -> Result<Self, EmptyVocabulary> {
        if vocabulary.is_empty() {
            return Err(EmptyVocabulary);
        }
        Ok(Self {
            vocabulary,
            rng: SimpleRng::new(seed),
        })
    }

    /// Draw one word. `index` feeds `Placement::Spread`; uniform placements
    /// ignore it.
    pub fn generate_word(&mut self, index: usize, area: SpawnArea) -> Word {
        let text = self.vocabulary[self.rng.next_index(self.vocabulary.len())].clone();
        let x = self.place(index, area.x);
        let y = self.place(index, area.y);
        Word { text, x, y }
    }

    /// Draw `n` words, each indexed by its batch position so a `Spread`
    /// placement fans them out across the field.
    pub fn generate_batch(&mut self, n: usize, area: SpawnArea) -> Vec<Word> {
        (0..n).map(|i| self.generate_word(i, area)).collect()
    }

    /// Return a new word moved by an independent random delta per axis,
    /// clamped back into the field. The input word is untouched.
    pub fn advance(&mut self, word: &Word, drift: Drift) -> Word {
        let dx = self.rng.next_range_f32(drift.x_min, drift.x_max);
        let dy = self.rng.next_range_f32(drift.y_min, drift.y_max);
        Word {
            text: word.text.clone(),
            x: (word.x + dx).clamp(FIELD_MIN, FIELD_MAX),
            y: (word.y + dy).clamp(FIELD_MIN, FIELD_MAX),
        }
    }

    fn place(&mut self, index: usize, placement: Placement) -> f32 {
        match placement {
            Placement::Uniform { min, max } => self.rng.next_range_f32(min, max),
            Placement::Spread { step } => (index as f32 * step).clamp(FIELD_MIN, FIELD_MAX),
        }
    }
}
