use crossterm::event::{KeyCode, KeyModifiers};

use street_shooter::entities::Facing;
use street_shooter::input::*;
use street_shooter::session::Screen;

const NONE: KeyModifiers = KeyModifiers::NONE;

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn arrows_and_letters_steer_the_same_way() {
    for screen in [Screen::MainMenu, Screen::Playing, Screen::Paused, Screen::GameOver] {
        assert_eq!(on_key_down(&KeyCode::Left, NONE, screen), Some(Command::Steer(Facing::Left)));
        assert_eq!(
            on_key_down(&KeyCode::Char('a'), NONE, screen),
            Some(Command::Steer(Facing::Left))
        );
        assert_eq!(
            on_key_down(&KeyCode::Right, NONE, screen),
            Some(Command::Steer(Facing::Right))
        );
        assert_eq!(
            on_key_down(&KeyCode::Char('d'), NONE, screen),
            Some(Command::Steer(Facing::Right))
        );
    }
}

#[test]
fn releasing_any_movement_key_stops() {
    for code in [KeyCode::Left, KeyCode::Right, KeyCode::Char('a'), KeyCode::Char('d')] {
        assert_eq!(on_key_up(&code), Some(Command::Release));
    }
    assert_eq!(on_key_up(&KeyCode::Char('x')), None);
    assert_eq!(on_key_up(&KeyCode::Enter), None);
}

#[test]
fn unrelated_keys_do_nothing() {
    assert_eq!(on_key_down(&KeyCode::Char('x'), NONE, Screen::Playing), None);
    assert_eq!(movement_for(&KeyCode::Up), None);
}

// ── Menu keys ─────────────────────────────────────────────────────────────────

#[test]
fn menu_keys_depend_on_screen() {
    assert_eq!(on_key_down(&KeyCode::Enter, NONE, Screen::MainMenu), Some(Command::Start));
    assert_eq!(on_key_down(&KeyCode::Char('q'), NONE, Screen::MainMenu), Some(Command::Exit));
    assert_eq!(on_key_down(&KeyCode::Esc, NONE, Screen::MainMenu), None);

    assert_eq!(on_key_down(&KeyCode::Char('p'), NONE, Screen::Playing), Some(Command::Pause));
    assert_eq!(on_key_down(&KeyCode::Esc, NONE, Screen::Playing), Some(Command::Pause));
    assert_eq!(on_key_down(&KeyCode::Enter, NONE, Screen::Playing), None);

    assert_eq!(on_key_down(&KeyCode::Char('p'), NONE, Screen::Paused), Some(Command::Resume));
    assert_eq!(on_key_down(&KeyCode::Char('r'), NONE, Screen::Paused), Some(Command::Resume));
    assert_eq!(on_key_down(&KeyCode::Char('q'), NONE, Screen::Paused), Some(Command::Quit));

    assert_eq!(on_key_down(&KeyCode::Enter, NONE, Screen::GameOver), Some(Command::PlayAgain));
    assert_eq!(on_key_down(&KeyCode::Char('q'), NONE, Screen::GameOver), Some(Command::Quit));
}

#[test]
fn ctrl_c_exits_anywhere() {
    for screen in [Screen::MainMenu, Screen::Playing, Screen::Paused, Screen::GameOver] {
        assert_eq!(
            on_key_down(&KeyCode::Char('c'), KeyModifiers::CONTROL, screen),
            Some(Command::Exit)
        );
    }
}

// ── Held-key fallback ─────────────────────────────────────────────────────────

#[test]
fn quiet_key_releases_after_the_window() {
    let mut held = HeldKey::new(HOLD_WINDOW_MS);
    held.pressed(&KeyCode::Left, 1000);
    assert!(held.is_held());
    assert_eq!(held.expire(1000 + HOLD_WINDOW_MS), None);
    assert_eq!(held.expire(1001 + HOLD_WINDOW_MS), Some(Command::Release));
    assert!(!held.is_held());
    assert_eq!(held.expire(5000), None);
}

#[test]
fn repeats_keep_the_key_held() {
    let mut held = HeldKey::default();
    held.pressed(&KeyCode::Char('d'), 0);
    for t in (60..=600).step_by(60) {
        held.pressed(&KeyCode::Char('d'), t);
        assert_eq!(held.expire(t + 10), None, "at {} ms", t);
    }
    assert_eq!(held.expire(600 + HOLD_WINDOW_MS + 1), Some(Command::Release));
}

#[test]
fn other_keys_do_not_hold() {
    let mut held = HeldKey::default();
    held.pressed(&KeyCode::Char('p'), 0);
    assert!(!held.is_held());
    assert_eq!(held.expire(10_000), None);
}

#[test]
fn reported_releases_disable_the_window() {
    let mut held = HeldKey::default();
    held.pressed(&KeyCode::Right, 0);
    held.released(&KeyCode::Right);
    assert!(!held.is_held());

    held.pressed(&KeyCode::Right, 100);
    assert_eq!(held.expire(10_000), None);
    assert!(held.is_held());
}

#[test]
fn any_release_marks_the_terminal_as_reporting() {
    let mut held = HeldKey::default();
    held.pressed(&KeyCode::Left, 0);
    held.released(&KeyCode::Enter);
    assert!(held.is_held());
    assert_eq!(held.expire(10_000), None);
}
