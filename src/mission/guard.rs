use crossterm::event::KeyCode;

use crate::hotkey::KeyInput;
use crate::mission::Chord;

/// What a clipboard-only field does with a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKey {
    /// Backspace/Delete wipe the whole field.
    Clear,
    /// Editing chords and focus movement go on to the mission.
    Allow,
    /// Anything typed directly is swallowed.
    Block,
}

pub fn classify(input: &KeyInput) -> FieldKey {
    match input.code() {
        KeyCode::Backspace | KeyCode::Delete => FieldKey::Clear,
        KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Up
        | KeyCode::Down
        | KeyCode::Home
        | KeyCode::End
        | KeyCode::Modifier(_) => FieldKey::Allow,
        _ if Chord::from_input(input).is_some() => FieldKey::Allow,
        _ => FieldKey::Block,
    }
}
