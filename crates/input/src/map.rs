//! Key and mouse mapping from terminal events to game triggers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::types::{GameTrigger, Status};

/// Map keyboard input to a game trigger.
///
/// The pause key is interpreted against the current status (pause while
/// running, resume while paused); every other mapping is status-independent
/// and the engine's preconditions do the rest. Only alphanumeric characters
/// are forwarded as typed input.
pub fn handle_key_event(key: KeyEvent, status: Status) -> Option<GameTrigger> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Esc => match status {
            Status::Running => Some(GameTrigger::Pause),
            Status::Paused => Some(GameTrigger::Resume),
            _ => None,
        },
        KeyCode::Enter => Some(GameTrigger::Commit),
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => Some(GameTrigger::Char(c)),
        _ => None,
    }
}

/// Map mouse input to a game trigger: any left click asks for a start or
/// restart (the engine rejects it mid-game).
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<GameTrigger> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(GameTrigger::Start),
        _ => None,
    }
}

/// Check if key should quit the host.
///
/// Plain letters are gameplay input here, so quitting is modifier-only.
pub fn should_quit(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
}
