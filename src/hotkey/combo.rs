use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};
use thiserror::Error;

use crate::keyboard::layout;

/// Set of held modifiers. Left and right variants of a modifier are the same bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const ALT: Modifiers = Modifiers(0b0010);
    pub const SHIFT: Modifiers = Modifiers(0b0100);
    pub const CMD: Modifiers = Modifiers(0b1000);

    /// Canonical order used when a combo is spelled out.
    const ORDERED: [(Modifiers, &'static str); 4] = [
        (Modifiers::CTRL, "ctrl"),
        (Modifiers::ALT, "alt"),
        (Modifiers::SHIFT, "shift"),
        (Modifiers::CMD, "cmd"),
    ];

    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn from_crossterm(mods: KeyModifiers) -> Self {
        let mut out = Modifiers::NONE;
        if mods.contains(KeyModifiers::CONTROL) {
            out = out.union(Modifiers::CTRL);
        }
        if mods.contains(KeyModifiers::ALT) {
            out = out.union(Modifiers::ALT);
        }
        if mods.contains(KeyModifiers::SHIFT) {
            out = out.union(Modifiers::SHIFT);
        }
        if mods.intersects(KeyModifiers::SUPER | KeyModifiers::META) {
            out = out.union(Modifiers::CMD);
        }
        out
    }

    /// Key tokens for the held modifiers, in canonical order.
    pub fn tokens(self) -> Vec<KeyToken> {
        let mut out = Vec::new();
        if self.contains(Modifiers::CTRL) {
            out.push(KeyToken::Ctrl);
        }
        if self.contains(Modifiers::ALT) {
            out.push(KeyToken::Alt);
        }
        if self.contains(Modifiers::SHIFT) {
            out.push(KeyToken::Shift);
        }
        if self.contains(Modifiers::CMD) {
            out.push(KeyToken::Cmd);
        }
        out
    }
}

/// Canonical name of one physical key.
///
/// Printable keys are stored unshifted and lower-cased, so `Shift+1` and `!`
/// both land on `Char('1')`. Modifier keys collapse left/right variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Char(char),
    Space,
    Esc,
    Backspace,
    Enter,
    Tab,
    Caps,
    Menu,
    Delete,
    Insert,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Ctrl,
    Shift,
    Alt,
    Cmd,
}

impl KeyToken {
    /// Normalize a terminal key code to its token. Returns `None` for codes
    /// that have no physical key on the on-screen keyboard (media keys etc).
    pub fn from_code(code: KeyCode) -> Option<KeyToken> {
        let token = match code {
            KeyCode::Char(' ') => KeyToken::Space,
            KeyCode::Char(ch) => KeyToken::Char(layout::base_char(ch.to_ascii_lowercase())),
            KeyCode::Esc => KeyToken::Esc,
            KeyCode::Backspace => KeyToken::Backspace,
            KeyCode::Enter => KeyToken::Enter,
            KeyCode::Tab | KeyCode::BackTab => KeyToken::Tab,
            KeyCode::CapsLock => KeyToken::Caps,
            KeyCode::Menu => KeyToken::Menu,
            KeyCode::Delete => KeyToken::Delete,
            KeyCode::Insert => KeyToken::Insert,
            KeyCode::Left => KeyToken::Left,
            KeyCode::Right => KeyToken::Right,
            KeyCode::Up => KeyToken::Up,
            KeyCode::Down => KeyToken::Down,
            KeyCode::Home => KeyToken::Home,
            KeyCode::End => KeyToken::End,
            KeyCode::PageUp => KeyToken::PageUp,
            KeyCode::PageDown => KeyToken::PageDown,
            KeyCode::F(n) => KeyToken::F(n),
            KeyCode::Modifier(m) => match m {
                ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => KeyToken::Ctrl,
                ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => KeyToken::Shift,
                ModifierKeyCode::LeftAlt
                | ModifierKeyCode::RightAlt
                | ModifierKeyCode::IsoLevel3Shift => KeyToken::Alt,
                ModifierKeyCode::LeftSuper
                | ModifierKeyCode::RightSuper
                | ModifierKeyCode::LeftMeta
                | ModifierKeyCode::RightMeta
                | ModifierKeyCode::LeftHyper
                | ModifierKeyCode::RightHyper => KeyToken::Cmd,
                ModifierKeyCode::IsoLevel5Shift => return None,
            },
            _ => return None,
        };
        Some(token)
    }

    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            KeyToken::Ctrl | KeyToken::Shift | KeyToken::Alt | KeyToken::Cmd
        )
    }

    /// Parse a lower-cased token name as written in a combo string.
    fn from_name(name: &str) -> Option<KeyToken> {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Some(KeyToken::Char(layout::base_char(ch)));
        }
        let token = match name {
            "space" => KeyToken::Space,
            "esc" | "escape" => KeyToken::Esc,
            "backspace" => KeyToken::Backspace,
            "enter" | "return" => KeyToken::Enter,
            "tab" => KeyToken::Tab,
            "caps" | "capslock" => KeyToken::Caps,
            "menu" => KeyToken::Menu,
            "delete" | "del" => KeyToken::Delete,
            "insert" | "ins" => KeyToken::Insert,
            "left" => KeyToken::Left,
            "right" => KeyToken::Right,
            "up" => KeyToken::Up,
            "down" => KeyToken::Down,
            "home" => KeyToken::Home,
            "end" => KeyToken::End,
            "pageup" => KeyToken::PageUp,
            "pagedown" => KeyToken::PageDown,
            _ => {
                let n = name.strip_prefix('f')?.parse::<u8>().ok()?;
                if (1..=24).contains(&n) {
                    KeyToken::F(n)
                } else {
                    return None;
                }
            }
        };
        Some(token)
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Char(ch) => write!(f, "{ch}"),
            KeyToken::F(n) => write!(f, "f{n}"),
            KeyToken::Space => f.write_str("space"),
            KeyToken::Esc => f.write_str("esc"),
            KeyToken::Backspace => f.write_str("backspace"),
            KeyToken::Enter => f.write_str("enter"),
            KeyToken::Tab => f.write_str("tab"),
            KeyToken::Caps => f.write_str("caps"),
            KeyToken::Menu => f.write_str("menu"),
            KeyToken::Delete => f.write_str("delete"),
            KeyToken::Insert => f.write_str("insert"),
            KeyToken::Left => f.write_str("left"),
            KeyToken::Right => f.write_str("right"),
            KeyToken::Up => f.write_str("up"),
            KeyToken::Down => f.write_str("down"),
            KeyToken::Home => f.write_str("home"),
            KeyToken::End => f.write_str("end"),
            KeyToken::PageUp => f.write_str("pageup"),
            KeyToken::PageDown => f.write_str("pagedown"),
            KeyToken::Ctrl => f.write_str("Ctrl"),
            KeyToken::Shift => f.write_str("Shift"),
            KeyToken::Alt => f.write_str("Alt"),
            KeyToken::Cmd => f.write_str("Cmd"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComboParseError {
    #[error("empty key combination")]
    Empty,
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    #[error("combination `{0}` has no base key")]
    MissingKey(String),
    #[error("combination `{0}` has more than one base key")]
    MultipleKeys(String),
}

/// A chord: zero or more modifiers plus exactly one base key.
///
/// Equality is structural, so `Shift+Ctrl+Z` and `ctrl+shift+z` are the same
/// combo. [`fmt::Display`] spells the canonical lower-case form
/// (`ctrl+alt+shift+cmd+key`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Combo {
    pub mods: Modifiers,
    pub key: KeyToken,
}

impl Combo {
    pub const fn new(mods: Modifiers, key: KeyToken) -> Self {
        Self { mods, key }
    }

    pub const fn ctrl(ch: char) -> Self {
        Self::new(Modifiers::CTRL, KeyToken::Char(ch))
    }

    /// Build the combo a key press represents. Pressing a bare modifier key
    /// yields `None`: it only becomes a combo once a base key joins it.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        let key = KeyToken::from_code(event.code)?;
        if key.is_modifier() {
            return None;
        }
        let mut mods = Modifiers::from_crossterm(event.modifiers);
        // Terminals without enhanced reporting drop the SHIFT flag on letters
        // and BackTab.
        match event.code {
            KeyCode::Char(ch) if ch.is_ascii_uppercase() => mods = mods.union(Modifiers::SHIFT),
            KeyCode::BackTab => mods = mods.union(Modifiers::SHIFT),
            _ => {}
        }
        Some(Self { mods, key })
    }

    pub fn has_modifier(&self) -> bool {
        !self.mods.is_empty()
    }

    /// Every key that has to be held, modifiers first.
    pub fn keys(&self) -> Vec<KeyToken> {
        let mut keys = self.mods.tokens();
        keys.push(self.key);
        keys
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in Modifiers::ORDERED {
            if self.mods.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key.to_string().to_lowercase())
    }
}

impl FromStr for Combo {
    type Err = ComboParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(ComboParseError::Empty);
        }
        let mut mods = Modifiers::NONE;
        let mut key = None;
        // "ctrl++" names the plus key itself.
        let parts: Vec<&str> = if let Some(head) = lowered.strip_suffix("++") {
            head.split('+').chain(std::iter::once("+")).collect()
        } else {
            lowered.split('+').collect()
        };
        for part in parts {
            let part = part.trim();
            let flag = match part {
                "ctrl" | "control" => Some(Modifiers::CTRL),
                "alt" | "option" => Some(Modifiers::ALT),
                "shift" => Some(Modifiers::SHIFT),
                "cmd" | "command" | "meta" | "super" => Some(Modifiers::CMD),
                _ => None,
            };
            if let Some(flag) = flag {
                mods = mods.union(flag);
                continue;
            }
            if part.is_empty() {
                continue;
            }
            let token = KeyToken::from_name(part)
                .ok_or_else(|| ComboParseError::UnknownKey(part.to_string()))?;
            if key.replace(token).is_some() {
                return Err(ComboParseError::MultipleKeys(s.trim().to_string()));
            }
        }
        let key = key.ok_or_else(|| ComboParseError::MissingKey(s.trim().to_string()))?;
        Ok(Self { mods, key })
    }
}
