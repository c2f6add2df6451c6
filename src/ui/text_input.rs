use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Editable text with a char-indexed cursor. Single-line inputs submit on
/// Enter; multiline inputs insert a newline instead.
#[derive(Clone, Debug)]
pub struct TextInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
    multiline: bool,
}

impl TextInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
            multiline: false,
        }
    }

    pub fn multiline(text: &str) -> Self {
        Self {
            multiline: true,
            ..Self::new(text)
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole text and park the cursor at the end.
    pub fn set_value(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        match self.text[byte_offset..].chars().next() {
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
            None => (&self.text, None, ""),
        }
    }

    /// Zero-based (line, column) of the cursor, both counted in chars.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.text.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Returns true when the text changed.
    pub fn edit(&mut self, key: KeyEvent) -> bool {
        let before = self.text.clone();
        self.handle(key);
        before != self.text
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter if self.multiline => self.insert('\n'),
            KeyCode::Enter => return InputResult::Submit,

            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Right => {
                if self.cursor < self.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Up if self.multiline => self.move_vertical(false),
            KeyCode::Down if self.multiline => self.move_vertical(true),
            KeyCode::Home => self.cursor = self.line_start(),
            KeyCode::End => self.cursor = self.line_end(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.remove_at(self.cursor - 1);
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.len() {
                    self.remove_at(self.cursor);
                }
            }
            KeyCode::Char('e') if ctrl => self.cursor = self.line_end(),
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.insert(ch)
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn insert(&mut self, ch: char) {
        let byte_offset = self.char_to_byte(self.cursor);
        self.text.insert(byte_offset, ch);
        self.cursor += 1;
    }

    fn remove_at(&mut self, char_idx: usize) {
        let byte_offset = self.char_to_byte(char_idx);
        if let Some(ch) = self.text[byte_offset..].chars().next() {
            self.text
                .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn line_start(&self) -> usize {
        if !self.multiline {
            return 0;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1] != '\n' {
            pos -= 1;
        }
        pos
    }

    fn line_end(&self) -> usize {
        if !self.multiline {
            return self.len();
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;
        while pos < chars.len() && chars[pos] != '\n' {
            pos += 1;
        }
        pos
    }

    fn move_vertical(&mut self, down: bool) {
        let (line, col) = self.cursor_line_col();
        let lines: Vec<usize> = self.text.split('\n').map(|l| l.chars().count()).collect();
        let target = if down {
            if line + 1 >= lines.len() {
                return;
            }
            line + 1
        } else {
            if line == 0 {
                return;
            }
            line - 1
        };
        let start: usize = lines[..target].iter().map(|len| len + 1).sum();
        self.cursor = start + col.min(lines[target]);
    }

    /// Delete word before cursor (unix-word-rubout: skip whitespace, then non-whitespace).
    fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn insert_at_start_middle_end() {
        let mut input = TextInput::new("ac");
        input.handle(key(KeyCode::Char('d')));
        assert_eq!(input.value(), "acd");

        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Char('z')));
        assert_eq!(input.value(), "zacd");
        assert_eq!(input.cursor(), 1);

        input.handle(key(KeyCode::Right));
        input.handle(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "zabcd");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn backspace_and_delete_at_boundaries() {
        let mut input = TextInput::new("ab");
        input.handle(key(KeyCode::Backspace));
        input.handle(key(KeyCode::Backspace));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor(), 0);

        let mut input = TextInput::new("ab");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
        input.handle(key(KeyCode::End));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn ctrl_w_word_delete() {
        let mut input = TextInput::new("foo bar  ");
        input.handle(ctrl('w'));
        assert_eq!(input.value(), "foo ");
    }

    #[test]
    fn enter_and_esc_results() {
        let mut input = TextInput::new("x");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
        assert_eq!(input.value(), "x");
    }

    #[test]
    fn multiline_enter_inserts_newline() {
        let mut input = TextInput::multiline("a");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Continue);
        input.handle(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "a\nb");
        assert_eq!(input.cursor_line_col(), (1, 1));
    }

    #[test]
    fn multiline_vertical_moves_keep_column() {
        let mut input = TextInput::multiline("abcd\nx\nefgh");
        assert_eq!(input.cursor_line_col(), (2, 4));
        input.handle(key(KeyCode::Up));
        assert_eq!(input.cursor_line_col(), (1, 1));
        input.handle(key(KeyCode::Up));
        assert_eq!(input.cursor_line_col(), (0, 1));
        input.handle(key(KeyCode::Up));
        assert_eq!(input.cursor_line_col(), (0, 1));
        input.handle(key(KeyCode::End));
        assert_eq!(input.cursor_line_col(), (0, 4));
        input.handle(key(KeyCode::Down));
        input.handle(key(KeyCode::Down));
        assert_eq!(input.cursor_line_col(), (2, 1));
        input.handle(key(KeyCode::Home));
        assert_eq!(input.cursor(), 7);
    }

    #[test]
    fn edit_reports_changes_only() {
        let mut input = TextInput::new("ab");
        assert!(!input.edit(key(KeyCode::Left)));
        assert!(input.edit(key(KeyCode::Char('c'))));
        assert_eq!(input.value(), "acb");
    }

    #[test]
    fn render_parts_splits_on_cursor() {
        let mut input = TextInput::new("héllo");
        assert_eq!(input.render_parts(), ("héllo", None, ""));
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Right));
        assert_eq!(input.render_parts(), ("h", Some('é'), "llo"));
    }
}
