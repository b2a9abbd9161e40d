//! Keyboard state for the terminal client.
//!
//! `crossterm` reports key presses as discrete events, while the battle
//! scene samples held keys once per frame. [`KeyboardState`] bridges the two:
//! events are folded into a held-key set that the scene reads through
//! [`InputSource`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use strum::EnumCount;
use tactics_core::{InputSource, Key};

/// What the application loop should do after a key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// The event was folded into the held-key state (or ignored).
    Continue,
}

/// Held-key set fed by terminal events.
///
/// Most terminals never report key releases. Until the first release event
/// is seen the state runs in pulse mode: every press counts as held for the
/// frame it arrived in and is cleared by [`KeyboardState::end_frame`].
#[derive(Clone, Debug, Default)]
pub struct KeyboardState {
    held: [bool; Key::COUNT],
    reports_release: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> KeyAction {
        if is_quit(&event) {
            return KeyAction::Quit;
        }
        let Some(key) = map_key(event.code) else {
            return KeyAction::Continue;
        };

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.held[key.slot()] = true,
            KeyEventKind::Release => {
                self.reports_release = true;
                self.held[key.slot()] = false;
            }
        }
        KeyAction::Continue
    }

    /// Called after the scene sampled this frame.
    pub fn end_frame(&mut self) {
        if !self.reports_release {
            self.held = [false; Key::COUNT];
        }
    }
}

impl InputSource for KeyboardState {
    fn is_down(&self, key: Key) -> bool {
        self.held[key.slot()]
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

/// Default bindings: arrows, `hjkl` or `wasd` steer, Enter/Space/`z`
/// confirm, Esc/Backspace/`x` cancel, `f` attacks.
fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Esc | KeyCode::Backspace => Key::Cancel,
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'k' | 'w' => Key::Up,
            'j' | 's' => Key::Down,
            'h' | 'a' => Key::Left,
            'l' | 'd' => Key::Right,
            ' ' | 'z' => Key::Confirm,
            'x' => Key::Cancel,
            'f' => Key::Attack,
            _ => return None,
        },
        _ => return None,
    };
    Some(key)
}
