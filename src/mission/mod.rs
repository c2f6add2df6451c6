pub mod asteroid;
pub mod final_mission;
pub mod galactic;
pub mod guard;
pub mod history;
pub mod navigation;
pub mod search;

use crossterm::event::KeyCode;

use crate::hotkey::KeyInput;

/// Single-slot clipboard. Holding a new payload replaces the old one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buffer(Option<String>);

impl Buffer {
    pub fn put(&mut self, payload: impl Into<String>) {
        self.0 = Some(payload.into());
    }

    pub fn take(&mut self) -> Option<String> {
        self.0.take()
    }

    pub fn peek(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// The editing chords mission screens react to. Ctrl and Cmd both count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chord {
    SelectAll,
    Cut,
    Copy,
    Paste,
    Undo,
    Save,
    Search,
}

impl Chord {
    pub fn from_input(input: &KeyInput) -> Option<Self> {
        let chord = match input.command_char()? {
            'a' => Chord::SelectAll,
            'x' => Chord::Cut,
            'c' => Chord::Copy,
            'v' => Chord::Paste,
            'z' => Chord::Undo,
            's' => Chord::Save,
            'f' => Chord::Search,
            _ => return None,
        };
        Some(chord)
    }
}

/// Focus movement keys shared by the mission boards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nav {
    Up,
    Down,
    Left,
    Right,
    Next,
    Prev,
    Activate,
}

impl Nav {
    pub fn from_input(input: &KeyInput) -> Option<Self> {
        if input.is_command() {
            return None;
        }
        let nav = match input.code() {
            KeyCode::Up => Nav::Up,
            KeyCode::Down => Nav::Down,
            KeyCode::Left => Nav::Left,
            KeyCode::Right => Nav::Right,
            KeyCode::Tab => Nav::Next,
            KeyCode::BackTab => Nav::Prev,
            KeyCode::Enter => Nav::Activate,
            _ => return None,
        };
        Some(nav)
    }
}

/// Move `index` one step within `0..len`, clamped at both ends.
pub(crate) fn step(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1).min(len.saturating_sub(1))
    } else {
        index.saturating_sub(1)
    }
}
