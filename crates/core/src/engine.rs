//! Game engine module - the session state machine
//!
//! The engine owns the authoritative [`GameState`] and applies one external
//! trigger at a time. Every transition is a pure function from the previous
//! state (plus the word factory's RNG) to a brand-new state; the prior value
//! is never mutated, which keeps the host's render step a pure function of
//! the latest snapshot and makes replay trivial in tests.
//!
//! Match and win/lose evaluation run as a single post-condition pass after
//! *every* applied trigger, so the set of game-over conditions is defined in
//! one place and cannot be missed by a future transition.

use tui_wordfall_types::{
    GameTrigger, Status, DRIFT_X_MAX, DRIFT_X_MIN, DRIFT_Y_MAX, DRIFT_Y_MIN, FIELD_MAX, FIELD_MIN,
    GAME_SECONDS, INITIAL_WORD_COUNT, INITIAL_X_STEP, SPAWN_Y_MAX, SPAWN_Y_MIN,
};

use crate::factory::{Drift, Placement, SpawnArea, Word, WordFactory};

/// Initial batch placement: fanned out across `x`, clustered near the top.
const INITIAL_AREA: SpawnArea = SpawnArea {
    x: Placement::Spread {
        step: INITIAL_X_STEP,
    },
    y: Placement::Uniform {
        min: SPAWN_Y_MIN,
        max: SPAWN_Y_MAX,
    },
};

/// Spawn-tick placement: anywhere along `x`, clustered near the top.
const SPAWN_AREA: SpawnArea = SpawnArea {
    x: Placement::Uniform {
        min: FIELD_MIN,
        max: FIELD_MAX,
    },
    y: Placement::Uniform {
        min: SPAWN_Y_MIN,
        max: SPAWN_Y_MAX,
    },
};

/// Per-tick gravity: small lateral jitter, steady fall toward the floor.
const GRAVITY: Drift = Drift {
    x_min: DRIFT_X_MIN,
    x_max: DRIFT_X_MAX,
    y_min: DRIFT_Y_MIN,
    y_max: DRIFT_Y_MAX,
};

/// One immutable session snapshot.
///
/// `words` keeps spawn order (used only for rendering). The host receives a
/// reference to the live value after every transition and must not hold it
/// across triggers.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub words: Vec<Word>,
    pub input: String,
    pub seconds_left: u32,
    pub status: Status,
}

impl GameState {
    /// The pre-session state: frozen defaults awaiting the start trigger.
    fn stopped() -> Self {
        Self {
            words: Vec::new(),
            input: String::new(),
            seconds_left: GAME_SECONDS,
            status: Status::Stopped,
        }
    }

    fn with_status(&self, status: Status) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    fn with_input(&self, input: String) -> Self {
        Self {
            input,
            ..self.clone()
        }
    }
}

/// Applies triggers to the session state.
///
/// The factory is the engine's only collaborator (a leaf dependency); all
/// timing lives in the host, which delivers triggers one at a time.
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    factory: WordFactory,
}

impl GameEngine {
    pub fn new(factory: WordFactory) -> Self {
        Self {
            state: GameState::stopped(),
            factory,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply one trigger. Returns `false` (state untouched) when the
    /// trigger's precondition does not hold.
    pub fn handle(&mut self, trigger: GameTrigger) -> bool {
        let running = self.state.status == Status::Running;
        let next = match trigger {
            GameTrigger::Start if self.state.status.awaiting_start() => {
                start_game(&mut self.factory)
            }
            GameTrigger::Pause if running => self.state.with_status(Status::Paused),
            GameTrigger::Resume if self.state.status == Status::Paused => {
                self.state.with_status(Status::Running)
            }
            GameTrigger::Char(c) if running && c.is_ascii_alphanumeric() => {
                let mut input = self.state.input.clone();
                input.push(c);
                self.state.with_input(input)
            }
            GameTrigger::Commit if running => self.state.with_input(String::new()),
            GameTrigger::SimTick if running => next_tick(&self.state, &mut self.factory),
            GameTrigger::SpawnTick if running => add_word(&self.state, &mut self.factory),
            GameTrigger::IdleClear if running => self.state.with_input(String::new()),
            _ => return false,
        };
        self.state = resolve(next);
        true
    }
}

/// Start transition: a fresh running state with the initial word batch.
fn start_game(factory: &mut WordFactory) -> GameState {
    GameState {
        words: factory.generate_batch(INITIAL_WORD_COUNT, INITIAL_AREA),
        input: String::new(),
        seconds_left: GAME_SECONDS,
        status: Status::Running,
    }
}

/// Simulation tick: countdown plus gravity. Repositions only; never adds or
/// removes a word.
fn next_tick(state: &GameState, factory: &mut WordFactory) -> GameState {
    GameState {
        seconds_left: state.seconds_left.saturating_sub(1),
        words: state
            .words
            .iter()
            .map(|word| factory.advance(word, GRAVITY))
            .collect(),
        ..state.clone()
    }
}

/// Spawn tick: append one new word near the top of the field.
fn add_word(state: &GameState, factory: &mut WordFactory) -> GameState {
    let mut words = state.words.clone();
    words.push(factory.generate_word(0, SPAWN_AREA));
    GameState {
        words,
        ..state.clone()
    }
}

/// Post-condition evaluator, run after every applied trigger.
///
/// First the match check: a word whose text equals the pending input is
/// removed (first occurrence only) and the input cleared. Then win/lose: the
/// countdown reaching zero or an empty field wins; otherwise a word on the
/// floor loses. Win is checked first, so it takes priority when both
/// conditions hold at once.
fn resolve(mut state: GameState) -> GameState {
    if state.status != Status::Running {
        return state;
    }

    if let Some(hit) = state.words.iter().position(|w| w.text == state.input) {
        state.words.remove(hit);
        state.input.clear();
    }

    if state.seconds_left == 0 || state.words.is_empty() {
        state.status = Status::Won;
    } else if state.words.iter().any(|w| w.y == 0.0) {
        state.status = Status::Lost;
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::DEFAULT_VOCABULARY;

    fn engine_with(vocabulary: &[&str], seed: u32) -> GameEngine {
        let vocab = vocabulary.iter().map(|w| w.to_string()).collect();
        GameEngine::new(WordFactory::new(vocab, seed).unwrap())
    }

    fn engine() -> GameEngine {
        engine_with(DEFAULT_VOCABULARY, 12345)
    }

    fn word(text: &str, x: f32, y: f32) -> Word {
        Word {
            text: text.to_string(),
            x,
            y,
        }
    }

    fn type_word(engine: &mut GameEngine, text: &str) {
        for c in text.chars() {
            assert!(engine.handle(GameTrigger::Char(c)));
        }
    }

    #[test]
    fn test_new_engine_is_stopped_with_frozen_defaults() {
        let engine = engine();
        let state = engine.state();

        assert_eq!(state.status, Status::Stopped);
        assert_eq!(state.seconds_left, GAME_SECONDS);
        assert!(state.words.is_empty());
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_start_spawns_the_initial_batch() {
        let mut engine = engine();
        assert!(engine.handle(GameTrigger::Start));

        let state = engine.state();
        assert_eq!(state.status, Status::Running);
        assert_eq!(state.seconds_left, GAME_SECONDS);
        assert_eq!(state.words.len(), INITIAL_WORD_COUNT);
        assert!(state.input.is_empty());

        // Fanned out along x, clustered near the top in y.
        let xs: Vec<f32> = state.words.iter().map(|w| w.x).collect();
        assert_eq!(xs, vec![0.0, 20.0, 40.0, 60.0, 80.0]);
        for w in &state.words {
            assert!((SPAWN_Y_MIN..=SPAWN_Y_MAX).contains(&w.y));
        }
    }

    #[test]
    fn test_start_is_rejected_while_running_or_paused() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);

        let before = engine.state().clone();
        assert!(!engine.handle(GameTrigger::Start));
        assert_eq!(engine.state(), &before);

        engine.handle(GameTrigger::Pause);
        assert!(!engine.handle(GameTrigger::Start));
        assert_eq!(engine.state().status, Status::Paused);
    }

    #[test]
    fn test_pause_and_resume_preconditions() {
        let mut engine = engine();

        // Not running yet: both rejected.
        assert!(!engine.handle(GameTrigger::Pause));
        assert!(!engine.handle(GameTrigger::Resume));

        engine.handle(GameTrigger::Start);
        assert!(!engine.handle(GameTrigger::Resume));
        assert!(engine.handle(GameTrigger::Pause));
        assert_eq!(engine.state().status, Status::Paused);

        // A second pause has a false precondition and must not double-mutate.
        let before = engine.state().clone();
        assert!(!engine.handle(GameTrigger::Pause));
        assert_eq!(engine.state(), &before);

        assert!(engine.handle(GameTrigger::Resume));
        assert_eq!(engine.state().status, Status::Running);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        engine.handle(GameTrigger::Char('a'));
        engine.handle(GameTrigger::Pause);

        let before = engine.state().clone();
        assert!(!engine.handle(GameTrigger::SimTick));
        assert!(!engine.handle(GameTrigger::SpawnTick));
        assert!(!engine.handle(GameTrigger::Char('b')));
        assert!(!engine.handle(GameTrigger::Commit));
        assert!(!engine.handle(GameTrigger::IdleClear));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_char_appends_and_commit_clears() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);

        engine.handle(GameTrigger::Char('z'));
        engine.handle(GameTrigger::Char('9'));
        assert_eq!(engine.state().input, "z9");

        let words_before = engine.state().words.clone();
        assert!(engine.handle(GameTrigger::Commit));
        assert!(engine.state().input.is_empty());
        // Commit forfeits partial progress; it never removes a word.
        assert_eq!(engine.state().words, words_before);
    }

    #[test]
    fn test_non_alphanumeric_characters_are_rejected() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);

        assert!(!engine.handle(GameTrigger::Char(' ')));
        assert!(!engine.handle(GameTrigger::Char('-')));
        assert!(engine.state().input.is_empty());
    }

    #[test]
    fn test_idle_clear_drops_pending_input() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        type_word(&mut engine, "rea");
        assert_eq!(engine.state().input, "rea");

        assert!(engine.handle(GameTrigger::IdleClear));
        assert!(engine.state().input.is_empty());
    }

    #[test]
    fn test_sim_tick_counts_down_and_applies_gravity() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        let before = engine.state().clone();

        assert!(engine.handle(GameTrigger::SimTick));
        let after = engine.state();

        assert_eq!(after.seconds_left, GAME_SECONDS - 1);
        assert_eq!(after.words.len(), before.words.len());
        for (prev, next) in before.words.iter().zip(after.words.iter()) {
            assert_eq!(prev.text, next.text);
            assert!(next.y < prev.y);
            assert!((prev.x - next.x).abs() <= DRIFT_X_MAX);
        }
    }

    #[test]
    fn test_seconds_never_go_negative() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        engine.state.seconds_left = 0;

        engine.handle(GameTrigger::SimTick);
        assert_eq!(engine.state().seconds_left, 0);
    }

    #[test]
    fn test_spawn_tick_appends_one_word_near_the_top() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);

        assert!(engine.handle(GameTrigger::SpawnTick));
        let state = engine.state();
        assert_eq!(state.words.len(), INITIAL_WORD_COUNT + 1);

        let spawned = state.words.last().unwrap();
        assert!((FIELD_MIN..=FIELD_MAX).contains(&spawned.x));
        assert!((SPAWN_Y_MIN..=SPAWN_Y_MAX).contains(&spawned.y));
    }

    #[test]
    fn test_full_match_removes_exactly_that_word() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        engine.state.words = vec![word("cat", 10.0, 50.0), word("dog", 60.0, 50.0)];

        type_word(&mut engine, "cat");
        let state = engine.state();
        assert_eq!(state.words, vec![word("dog", 60.0, 50.0)]);
        assert!(state.input.is_empty());
        assert_eq!(state.status, Status::Running);
    }

    #[test]
    fn test_partial_match_removes_nothing() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        engine.state.words = vec![word("cat", 10.0, 50.0), word("dog", 60.0, 50.0)];

        type_word(&mut engine, "ca");
        let state = engine.state();
        assert_eq!(state.words.len(), 2);
        assert_eq!(state.input, "ca");
    }

    #[test]
    fn test_duplicate_texts_first_occurrence_wins() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        engine.state.words = vec![
            word("cat", 10.0, 50.0),
            word("cat", 60.0, 70.0),
            word("dog", 90.0, 50.0),
        ];

        type_word(&mut engine, "cat");
        let state = engine.state();
        assert_eq!(
            state.words,
            vec![word("cat", 60.0, 70.0), word("dog", 90.0, 50.0)]
        );
    }

    #[test]
    fn test_clearing_the_last_word_wins() {
        let mut engine = engine_with(&["cat"], 1);
        engine.handle(GameTrigger::Start);
        engine.state.words = vec![word("cat", 10.0, 50.0)];

        type_word(&mut engine, "cat");
        let state = engine.state();
        assert!(state.words.is_empty());
        assert_eq!(state.status, Status::Won);
    }

    #[test]
    fn test_countdown_reaching_zero_wins() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        engine.state.seconds_left = 1;

        engine.handle(GameTrigger::SimTick);
        assert_eq!(engine.state().seconds_left, 0);
        assert_eq!(engine.state().status, Status::Won);
    }

    #[test]
    fn test_word_on_the_floor_loses() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        engine.state.words = vec![word("cat", 10.0, 0.0), word("dog", 60.0, 50.0)];

        // Any applied trigger runs the evaluator.
        engine.handle(GameTrigger::Char('x'));
        assert_eq!(engine.state().status, Status::Lost);
    }

    #[test]
    fn test_word_above_the_floor_does_not_lose() {
        let state = resolve(GameState {
            words: vec![word("cat", 10.0, 0.5)],
            input: String::new(),
            seconds_left: 30,
            status: Status::Running,
        });
        assert_eq!(state.status, Status::Running);
    }

    #[test]
    fn test_win_takes_priority_over_lose() {
        // Countdown exhausted AND a word on the floor at the same instant.
        let state = resolve(GameState {
            words: vec![word("cat", 10.0, 0.0)],
            input: String::new(),
            seconds_left: 0,
            status: Status::Running,
        });
        assert_eq!(state.status, Status::Won);
    }

    #[test]
    fn test_terminal_states_are_frozen_until_restart() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        engine.state.words = vec![word("cat", 10.0, 0.0)];
        engine.handle(GameTrigger::Char('x'));
        assert_eq!(engine.state().status, Status::Lost);

        let before = engine.state().clone();
        assert!(!engine.handle(GameTrigger::SimTick));
        assert!(!engine.handle(GameTrigger::SpawnTick));
        assert!(!engine.handle(GameTrigger::Char('a')));
        assert!(!engine.handle(GameTrigger::Pause));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_restart_leaves_no_residue() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        type_word(&mut engine, "leftover");
        for _ in 0..10 {
            engine.handle(GameTrigger::SimTick);
        }
        engine.state.status = Status::Won;

        assert!(engine.handle(GameTrigger::Start));
        let state = engine.state();
        assert_eq!(state.status, Status::Running);
        assert_eq!(state.seconds_left, GAME_SECONDS);
        assert_eq!(state.words.len(), INITIAL_WORD_COUNT);
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_transitions_yield_new_values() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);
        let snapshot = engine.state().clone();

        engine.handle(GameTrigger::SimTick);
        // The old snapshot is untouched by the transition.
        assert_eq!(snapshot.seconds_left, GAME_SECONDS);
        assert_ne!(engine.state(), &snapshot);
    }

    #[test]
    fn test_unattended_game_eventually_ends() {
        let mut engine = engine();
        engine.handle(GameTrigger::Start);

        // Gravity pulls at least 2 percent per tick from at most 100, so the
        // floor is reached well before the 60-second countdown.
        let mut ticks = 0;
        while engine.handle(GameTrigger::SimTick) {
            ticks += 1;
            assert!(ticks <= GAME_SECONDS, "game never ended");
        }
        assert_eq!(engine.state().status, Status::Lost);
    }
}
