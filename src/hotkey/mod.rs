pub mod combo;
pub mod router;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use combo::{Combo, KeyToken};

/// A key-down event on its way to the active screen.
///
/// Handlers call [`KeyInput::prevent_default`] to claim the key so the
/// application does not apply its own default (quit prompts, text entry) and
/// [`KeyInput::stop_propagation`] when nothing after them may see it.
#[derive(Clone, Debug)]
pub struct KeyInput {
    event: KeyEvent,
    /// When the key was pressed; timers scheduled from a handler start here.
    pub at: Instant,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyInput {
    pub fn new(event: KeyEvent, at: Instant) -> Self {
        Self {
            event,
            at,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Plain key press with no modifiers.
    pub fn key(code: KeyCode, at: Instant) -> Self {
        Self::new(KeyEvent::new(code, KeyModifiers::NONE), at)
    }

    /// `Ctrl+<ch>` key press.
    pub fn ctrl(ch: char, at: Instant) -> Self {
        Self::new(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL), at)
    }

    pub fn event(&self) -> &KeyEvent {
        &self.event
    }

    pub fn code(&self) -> KeyCode {
        self.event.code
    }

    pub fn modifiers(&self) -> KeyModifiers {
        self.event.modifiers
    }

    pub fn token(&self) -> Option<KeyToken> {
        KeyToken::from_code(self.event.code)
    }

    pub fn combo(&self) -> Option<Combo> {
        Combo::from_event(&self.event)
    }

    /// Ctrl or Cmd held. Mission screens treat both as the command modifier.
    pub fn is_command(&self) -> bool {
        self.event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META)
    }

    /// The lower-cased letter of a command chord (`Ctrl+S` -> `'s'`).
    pub fn command_char(&self) -> Option<char> {
        if !self.is_command() {
            return None;
        }
        match self.event.code {
            KeyCode::Char(ch) => Some(ch.to_ascii_lowercase()),
            _ => None,
        }
    }

    /// True for printable input without Ctrl/Alt/Cmd (Shift is fine).
    pub fn typed_char(&self) -> Option<char> {
        let blocked = KeyModifiers::CONTROL
            | KeyModifiers::ALT
            | KeyModifiers::SUPER
            | KeyModifiers::META;
        match self.event.code {
            KeyCode::Char(ch) if !self.event.modifiers.intersects(blocked) => Some(ch),
            _ => None,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Swallow the key entirely.
    pub fn suppress(&mut self) {
        self.prevent_default();
        self.stop_propagation();
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
