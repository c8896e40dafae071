//! Terminal falling-words runner (default binary).
//!
//! This is the host side of the game: it owns the timers, forwards input
//! events to the engine one trigger at a time, and pushes every new state
//! snapshot to the terminal renderer. All game rules live in the core; this
//! loop only schedules triggers.
//!
//! An optional CLI argument names a vocabulary file (a JSON array of
//! strings); without it the built-in word list is used.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_wordfall::core::{GameEngine, WordFactory, DEFAULT_VOCABULARY};
use tui_wordfall::input::{handle_key_event, handle_mouse_event, should_quit};
use tui_wordfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_wordfall::types::{GameTrigger, Status, IDLE_CLEAR_MS, SIM_TICK_MS, SPAWN_TICK_MS};

/// Poll timeout while no timer is armed (status outside `Running`).
const IDLE_POLL_MS: u64 = 250;

/// Explicit owned timer handles for one session.
///
/// The three deadlines exist only while the game is `Running`; leaving
/// `Running` (pause or a terminal state) cancels all of them, so a tick can
/// never arrive after a pause transition has fired. The idle deadline is a
/// debounce: it is rearmed on every typed character and fires at most once.
struct Timers {
    sim: Option<Instant>,
    spawn: Option<Instant>,
    idle: Option<Instant>,
}

impl Timers {
    fn stopped() -> Self {
        Self {
            sim: None,
            spawn: None,
            idle: None,
        }
    }

    /// Arm the periodic deadlines on `Running` entry, cancel everything
    /// otherwise. Already-armed deadlines are left untouched.
    fn sync(&mut self, status: Status) {
        if status == Status::Running {
            let now = Instant::now();
            self.sim.get_or_insert(now + Duration::from_millis(SIM_TICK_MS));
            self.spawn
                .get_or_insert(now + Duration::from_millis(SPAWN_TICK_MS));
        } else {
            *self = Timers::stopped();
        }
    }

    /// Rearm the idle-input debounce after a typed character.
    fn arm_idle(&mut self) {
        self.idle = Some(Instant::now() + Duration::from_millis(IDLE_CLEAR_MS));
    }

    fn next_deadline(&self) -> Option<Instant> {
        [self.sim, self.spawn, self.idle].into_iter().flatten().min()
    }

    /// Collect the triggers whose deadlines have passed, rearming the
    /// periodic ones and disarming the debounce.
    fn take_due(&mut self, now: Instant) -> Vec<GameTrigger> {
        let mut due = Vec::new();
        if self.sim.is_some_and(|at| now >= at) {
            self.sim = Some(now + Duration::from_millis(SIM_TICK_MS));
            due.push(GameTrigger::SimTick);
        }
        if self.spawn.is_some_and(|at| now >= at) {
            self.spawn = Some(now + Duration::from_millis(SPAWN_TICK_MS));
            due.push(GameTrigger::SpawnTick);
        }
        if self.idle.is_some_and(|at| now >= at) {
            self.idle = None;
            due.push(GameTrigger::IdleClear);
        }
        due
    }
}

fn main() -> Result<()> {
    let vocabulary = load_vocabulary()?;
    let factory = WordFactory::new(vocabulary, session_seed())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, GameEngine::new(factory));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut engine: GameEngine) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut timers = Timers::stopped();

    loop {
        // Render the latest snapshot.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(engine.state(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input, with a timeout until the nearest armed deadline.
        let timeout = match timers.next_deadline() {
            Some(at) => at.saturating_duration_since(Instant::now()),
            None => Duration::from_millis(IDLE_POLL_MS),
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(trigger) = handle_key_event(key, engine.state().status) {
                        let applied = engine.handle(trigger);
                        if applied && matches!(trigger, GameTrigger::Char(_)) {
                            timers.arm_idle();
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(trigger) = handle_mouse_event(mouse) {
                        engine.handle(trigger);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Cancel or arm deadlines before firing any: a pause or game-over
        // transition above must tear the clock down, not race it.
        timers.sync(engine.state().status);

        // Fire whatever came due while we were waiting.
        let now = Instant::now();
        for trigger in timers.take_due(now) {
            engine.handle(trigger);
        }

        timers.sync(engine.state().status);
    }
}

/// Read the vocabulary from the optional CLI argument, falling back to the
/// built-in list.
fn load_vocabulary() -> Result<Vec<String>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let data = std::fs::read_to_string(&path)
                .with_context(|| format!("read vocabulary file {}", path))?;
            let words: Vec<String> = serde_json::from_str(&data)
                .with_context(|| format!("parse vocabulary file {}", path))?;
            Ok(words)
        }
        None => Ok(DEFAULT_VOCABULARY.iter().map(|w| w.to_string()).collect()),
    }
}

/// A fresh seed per process, so every session sees different words.
fn session_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
