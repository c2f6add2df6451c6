use std::ops::Range;

use crossterm::event::KeyCode;

use crate::hotkey::KeyInput;
use crate::ui::text_input::{InputResult, TextInput};

/// First case-insensitive occurrence of `query` in `text`, as a byte range
/// into `text`. Blank queries never match.
pub fn find_match(text: &str, query: &str) -> Option<Range<usize>> {
    if query.trim().is_empty() {
        return None;
    }
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    for (start, _) in text.char_indices() {
        let mut hay = text[start..].char_indices();
        let mut matched = 0;
        let mut end = start;
        while matched < needle.len() {
            let Some((offset, ch)) = hay.next() else {
                break;
            };
            let lowered: Vec<char> = ch.to_lowercase().collect();
            if needle.get(matched..matched + lowered.len()) != Some(lowered.as_slice()) {
                break;
            }
            matched += lowered.len();
            end = start + offset + ch.len_utf8();
        }
        if matched == needle.len() {
            return Some(start..end);
        }
    }
    None
}

/// Filter box opened with the search chord. Closing it keeps the query, so
/// highlights stay on screen.
#[derive(Clone, Debug)]
pub struct SearchBox {
    input: TextInput,
    active: bool,
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            input: TextInput::new(""),
            active: false,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn query(&self) -> &str {
        self.input.value()
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn set_query(&mut self, query: &str) {
        self.input.set_value(query);
    }

    pub fn highlight(&self, text: &str) -> Option<Range<usize>> {
        find_match(text, self.query())
    }

    /// Feed a key to the open box. Returns false for keys it leaves alone:
    /// everything while closed, and command chords while open.
    pub fn handle_key(&mut self, input: &mut KeyInput) -> bool {
        if !self.active || input.is_command() {
            return false;
        }
        input.prevent_default();
        match input.code() {
            KeyCode::Tab | KeyCode::BackTab => {
                self.active = false;
            }
            _ => {
                if self.input.handle(*input.event()) != InputResult::Continue {
                    self.active = false;
                }
            }
        }
        true
    }
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(find_match("NOVA-15", "va"), Some(2..4));
        assert_eq!(find_match("nova-15", "NOVA"), Some(0..4));
        assert_eq!(find_match("NOVA-15", "x"), None);
    }

    #[test]
    fn test_blank_query_never_matches() {
        assert_eq!(find_match("SEGMENT 01", ""), None);
        assert_eq!(find_match("SEGMENT 01", "   "), None);
    }

    #[test]
    fn test_match_returns_first_occurrence_as_byte_range() {
        let text = "Ключ: ключ";
        let range = find_match(text, "КЛЮЧ").unwrap();
        assert_eq!(range, 0..8);
        assert_eq!(&text[range], "Ключ");
    }

    #[test]
    fn test_box_types_only_while_active() {
        let now = Instant::now();
        let mut search = SearchBox::new();
        assert!(!search.handle_key(&mut KeyInput::key(KeyCode::Char('a'), now)));
        assert_eq!(search.query(), "");

        search.activate();
        for ch in "ori".chars() {
            let mut input = KeyInput::key(KeyCode::Char(ch), now);
            assert!(search.handle_key(&mut input));
            assert!(input.is_default_prevented());
        }
        assert_eq!(search.query(), "ori");
        assert!(!search.handle_key(&mut KeyInput::ctrl('v', now)));
    }

    #[test]
    fn test_blur_keeps_query() {
        let now = Instant::now();
        let mut search = SearchBox::new();
        search.activate();
        search.handle_key(&mut KeyInput::key(KeyCode::Char('k'), now));
        search.handle_key(&mut KeyInput::key(KeyCode::Esc, now));
        assert!(!search.is_active());
        assert_eq!(search.query(), "k");
        assert_eq!(search.highlight("KEY"), Some(0..1));

        search.activate();
        search.handle_key(&mut KeyInput::key(KeyCode::Tab, now));
        assert!(!search.is_active());
    }
}
