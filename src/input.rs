/// Keyboard mapping.
///
/// Translates raw key presses and releases into [`Command`]s.  Which menu key
/// does what depends on the screen; movement keys work everywhere and simply
/// set the player's velocity.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::entities::Facing;
use crate::session::Screen;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Quit,
    PlayAgain,
    /// Leave the program.
    Exit,
    /// Movement key pressed.
    Steer(Facing),
    /// Movement key released.
    Release,
}

/// ArrowLeft / `a` steer left, ArrowRight / `d` steer right.
pub fn movement_for(code: &KeyCode) -> Option<Facing> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Facing::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Facing::Right),
        _ => None,
    }
}

pub fn on_key_down(code: &KeyCode, modifiers: KeyModifiers, screen: Screen) -> Option<Command> {
    if matches!(code, KeyCode::Char('c')) && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Exit);
    }
    if let Some(facing) = movement_for(code) {
        return Some(Command::Steer(facing));
    }

    match (screen, code) {
        (Screen::MainMenu, KeyCode::Enter | KeyCode::Char('s')) => Some(Command::Start),
        (Screen::MainMenu, KeyCode::Char('q')) => Some(Command::Exit),

        (Screen::Playing, KeyCode::Char('p') | KeyCode::Esc) => Some(Command::Pause),

        (Screen::Paused, KeyCode::Char('r') | KeyCode::Char('p')) => Some(Command::Resume),
        (Screen::Paused, KeyCode::Char('q')) => Some(Command::Quit),

        (Screen::GameOver, KeyCode::Enter | KeyCode::Char('r')) => Some(Command::PlayAgain),
        (Screen::GameOver, KeyCode::Char('q')) => Some(Command::Quit),

        _ => None,
    }
}

/// Releasing any movement key stops the player, whichever key is still down.
pub fn on_key_up(code: &KeyCode) -> Option<Command> {
    movement_for(code).map(|_| Command::Release)
}

// ── Held-key fallback ─────────────────────────────────────────────────────────

/// On terminals that never report key releases, a movement key counts as
/// released once no press/repeat has arrived for this long.  OS key repeat
/// runs at 15 Hz or more, so a held key keeps refreshing it.
pub const HOLD_WINDOW_MS: u64 = 140;

/// Tracks whether a movement key is still held down.
///
/// Once the terminal has reported any release, releases are trusted and the
/// window never expires a key on its own.
#[derive(Clone, Copy, Debug)]
pub struct HeldKey {
    window_ms: u64,
    last_seen_ms: Option<u64>,
    sees_releases: bool,
}

impl Default for HeldKey {
    fn default() -> Self {
        HeldKey::new(HOLD_WINDOW_MS)
    }
}

impl HeldKey {
    pub fn new(window_ms: u64) -> Self {
        HeldKey { window_ms, last_seen_ms: None, sees_releases: false }
    }

    /// Press or repeat of any key.
    pub fn pressed(&mut self, code: &KeyCode, now_ms: u64) {
        if movement_for(code).is_some() {
            self.last_seen_ms = Some(now_ms);
        }
    }

    /// Release of any key.
    pub fn released(&mut self, code: &KeyCode) {
        self.sees_releases = true;
        if movement_for(code).is_some() {
            self.last_seen_ms = None;
        }
    }

    /// `Release` once the held key has gone quiet for longer than the window.
    pub fn expire(&mut self, now_ms: u64) -> Option<Command> {
        if self.sees_releases {
            return None;
        }
        let last = self.last_seen_ms?;
        if now_ms.saturating_sub(last) > self.window_ms {
            self.last_seen_ms = None;
            return Some(Command::Release);
        }
        None
    }

    pub fn is_held(&self) -> bool {
        self.last_seen_ms.is_some()
    }
}
