//! Key labels for the keyboard diagram and hint text.
//!
//! Tokens print lower-case in combo strings (`ctrl+s`); these functions give
//! the friendlier forms shown to the player.

use crate::hotkey::combo::{Combo, KeyToken};

/// Label printed on a key cap.
pub fn cap_label(token: KeyToken) -> String {
    match token {
        KeyToken::Char(ch) => ch.to_ascii_uppercase().to_string(),
        KeyToken::Space => String::new(),
        KeyToken::Backspace => "Bksp".to_string(),
        KeyToken::Enter => "Enter".to_string(),
        KeyToken::Tab => "Tab".to_string(),
        KeyToken::Caps => "Caps".to_string(),
        KeyToken::Esc => "Esc".to_string(),
        KeyToken::Menu => "Menu".to_string(),
        other => key_display_name(other),
    }
}

/// Human-readable key name used in hints ("Ctrl", "S", "Space").
pub fn key_display_name(token: KeyToken) -> String {
    match token {
        KeyToken::Char(ch) => ch.to_ascii_uppercase().to_string(),
        KeyToken::Space => "Space".to_string(),
        KeyToken::Esc => "Esc".to_string(),
        KeyToken::Backspace => "Backspace".to_string(),
        KeyToken::Enter => "Enter".to_string(),
        KeyToken::Tab => "Tab".to_string(),
        KeyToken::Caps => "Caps Lock".to_string(),
        KeyToken::Delete => "Delete".to_string(),
        KeyToken::Insert => "Insert".to_string(),
        KeyToken::Left => "Left".to_string(),
        KeyToken::Right => "Right".to_string(),
        KeyToken::Up => "Up".to_string(),
        KeyToken::Down => "Down".to_string(),
        KeyToken::Home => "Home".to_string(),
        KeyToken::End => "End".to_string(),
        KeyToken::PageUp => "PgUp".to_string(),
        KeyToken::PageDown => "PgDn".to_string(),
        KeyToken::F(n) => format!("F{n}"),
        KeyToken::Menu => "Menu".to_string(),
        KeyToken::Ctrl => "Ctrl".to_string(),
        KeyToken::Shift => "Shift".to_string(),
        KeyToken::Alt => "Alt".to_string(),
        KeyToken::Cmd => "Cmd".to_string(),
    }
}

/// "Ctrl + S" style rendering of a combo.
pub fn combo_label(combo: &Combo) -> String {
    combo
        .keys()
        .into_iter()
        .map(key_display_name)
        .collect::<Vec<_>>()
        .join(" + ")
}
