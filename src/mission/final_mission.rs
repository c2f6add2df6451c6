use std::ops::Range;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers};

use crate::hotkey::KeyInput;
use crate::mission::guard::{FieldKey, classify};
use crate::mission::history::UndoHistory;
use crate::mission::search::SearchBox;
use crate::mission::{Buffer, Chord, Nav, step};
use crate::session::timers::{TimerId, Timers};

pub const REQUIRED_CODES: [&str; 3] = ["RESCUE-KEY-7X", "ASTRO-CODE-4B", "GALAXY-PASS-9Z"];

pub const SIGNAL: [&str; 6] = [
    "SEGMENT 01: Cosmic background noise, station interference.",
    "SEGMENT 02: Fragments of an old communication protocol detected.",
    "SEGMENT 03: Emergency rescue key RESCUE-KEY-7X found near the ORI nebula.",
    "SEGMENT 04: An unknown astro module activated code ASTRO-CODE-4B and requested access to the navigation core.",
    "SEGMENT 05: Leaving the critical zone requires pass GALAXY-PASS-9Z, confirming the fleet's right to evacuate.",
    "SEGMENT 06: The rest is cosmic noise and scraps of messages.",
];

pub const SLOT_HINTS: [&str; 3] = [
    "Emergency rescue key (look for the word \"key\").",
    "Astro access code (look for the word \"code\").",
    "Galactic pass (look for the word \"pass\").",
];

pub const SUCCESS_MESSAGE_TIME: Duration = Duration::from_millis(2500);
pub const COMPLETE_DELAY: Duration = Duration::from_millis(2600);
pub const FAILURE_MESSAGE_TIME: Duration = Duration::from_secs(2);

/// Word ranges (byte offsets) of a signal line.
pub fn words(line: &str) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = None;
    for (idx, ch) in line.char_indices() {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(idx),
            (true, Some(s)) => {
                out.push(s..idx);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push(s..line.len());
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot {
    panel: [String; 3],
    cut: Vec<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Signal,
    Slot(usize),
}

/// Word caret over the signal. The selection runs from `anchor` to `word`
/// on the caret's line and always covers at least the caret word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caret {
    pub line: usize,
    pub word: usize,
    pub anchor: usize,
}

impl Caret {
    pub fn selection(&self) -> Range<usize> {
        self.anchor.min(self.word)..self.anchor.max(self.word) + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveMessage {
    Success,
    Failure,
}

impl SaveMessage {
    pub fn text(self) -> &'static str {
        match self {
            SaveMessage::Success => "Codes saved! You rescued the Galaxy!",
            SaveMessage::Failure => "Not every code is in its place. Check the hints under the slots!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FinalTimer {
    ClearMessage,
    Complete,
}

/// Pick the three codes out of the signal and place each in its slot.
#[derive(Clone, Debug)]
pub struct FinalMission {
    lines: Vec<Vec<Range<usize>>>,
    panel: [String; 3],
    cut: Vec<&'static str>,
    buffer: Buffer,
    history: UndoHistory<Snapshot>,
    focus: Focus,
    caret: Caret,
    pub search: SearchBox,
    message: Option<SaveMessage>,
    message_timer: Option<TimerId>,
    saved: bool,
    complete: bool,
    timers: Timers<FinalTimer>,
}

impl FinalMission {
    pub fn new() -> Self {
        Self {
            lines: SIGNAL.iter().map(|line| words(line)).collect(),
            panel: Default::default(),
            cut: Vec::new(),
            buffer: Buffer::default(),
            history: UndoHistory::new(),
            focus: Focus::Signal,
            caret: Caret {
                line: 0,
                word: 0,
                anchor: 0,
            },
            search: SearchBox::new(),
            message: None,
            message_timer: None,
            saved: false,
            complete: false,
            timers: Timers::new(),
        }
    }

    pub fn panel(&self) -> &[String; 3] {
        &self.panel
    }

    pub fn is_cut(&self, code: &str) -> bool {
        self.cut.iter().any(|c| *c == code)
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn words(&self, line: usize) -> &[Range<usize>] {
        self.lines.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn message(&self) -> Option<SaveMessage> {
        self.message
    }

    pub fn all_placed(&self) -> bool {
        REQUIRED_CODES.iter().zip(&self.panel).all(|(code, value)| value == code)
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Set once the closing delay after a good save has passed.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Select words `from..=to` on `line`, as if dragged over with the caret.
    pub fn select(&mut self, line: usize, from: usize, to: usize) {
        let last = self.words(line).len().saturating_sub(1);
        self.focus = Focus::Signal;
        self.caret = Caret {
            line: line.min(SIGNAL.len() - 1),
            anchor: from.min(last),
            word: to.min(last),
        };
    }

    /// The selected stretch of the signal, inter-word spacing included.
    pub fn selected_text(&self) -> &'static str {
        let line = SIGNAL[self.caret.line];
        let words = self.words(self.caret.line);
        let range = self.caret.selection();
        match (words.get(range.start), words.get(range.end - 1)) {
            (Some(first), Some(last)) => &line[first.start..last.end],
            _ => "",
        }
    }

    fn selected_code(&self) -> Option<&'static str> {
        let text = self.selected_text().trim();
        if text.is_empty() {
            return None;
        }
        REQUIRED_CODES.iter().copied().find(|code| text.contains(code))
    }

    fn snapshot(&mut self) {
        self.history.push(Snapshot {
            panel: self.panel.clone(),
            cut: self.cut.clone(),
        });
    }

    pub fn handle_key(&mut self, input: &mut KeyInput) {
        if self.search.handle_key(input) {
            return;
        }
        if let Some(chord) = Chord::from_input(input) {
            self.apply(chord, input);
            return;
        }
        if let Focus::Slot(i) = self.focus {
            match classify(input) {
                FieldKey::Clear => {
                    input.prevent_default();
                    self.snapshot();
                    self.panel[i].clear();
                    return;
                }
                FieldKey::Block => {
                    input.prevent_default();
                    return;
                }
                FieldKey::Allow => {}
            }
        }
        if self.focus == Focus::Signal {
            let extend = input.modifiers().contains(KeyModifiers::SHIFT);
            if self.move_caret(input.code(), extend) {
                input.prevent_default();
                return;
            }
        }
        if let Some(nav) = Nav::from_input(input) {
            input.prevent_default();
            self.navigate(nav);
        }
    }

    fn apply(&mut self, chord: Chord, input: &mut KeyInput) {
        match chord {
            Chord::Search => {
                input.prevent_default();
                self.search.activate();
            }
            Chord::SelectAll => {
                if self.focus == Focus::Signal {
                    input.prevent_default();
                    let last = self.words(self.caret.line).len().saturating_sub(1);
                    self.caret.anchor = 0;
                    self.caret.word = last;
                }
            }
            Chord::Copy => {
                if let Some(code) = self.selected_code() {
                    input.prevent_default();
                    self.buffer.put(code);
                }
            }
            Chord::Cut => {
                if let Some(code) = self.selected_code() {
                    input.prevent_default();
                    self.snapshot();
                    self.buffer.put(code);
                    if !self.cut.contains(&code) {
                        self.cut.push(code);
                    }
                }
            }
            Chord::Paste => {
                if let (Focus::Slot(i), Some(copied)) = (self.focus, self.buffer.peek()) {
                    let copied = copied.to_string();
                    input.prevent_default();
                    self.snapshot();
                    self.panel[i] = copied;
                }
            }
            Chord::Undo => {
                if let Some(last) = self.history.pop() {
                    input.prevent_default();
                    self.panel = last.panel;
                    self.cut = last.cut;
                }
            }
            Chord::Save => {
                input.prevent_default();
                self.save(input.at);
            }
        }
    }

    pub fn save(&mut self, now: Instant) {
        if let Some(id) = self.message_timer.take() {
            self.timers.cancel(id);
        }
        if self.all_placed() {
            self.message = Some(SaveMessage::Success);
            self.message_timer =
                Some(self.timers.after(now, SUCCESS_MESSAGE_TIME, FinalTimer::ClearMessage));
            if !self.saved {
                self.saved = true;
                self.timers.after(now, COMPLETE_DELAY, FinalTimer::Complete);
                tracing::info!("final codes saved");
            }
        } else {
            self.message = Some(SaveMessage::Failure);
            self.message_timer =
                Some(self.timers.after(now, FAILURE_MESSAGE_TIME, FinalTimer::ClearMessage));
        }
    }

    fn move_caret(&mut self, code: KeyCode, extend: bool) -> bool {
        let word_count = self.words(self.caret.line).len();
        match code {
            KeyCode::Left => self.caret.word = self.caret.word.saturating_sub(1),
            KeyCode::Right => self.caret.word = step(self.caret.word, word_count, true),
            KeyCode::Home => self.caret.word = 0,
            KeyCode::End => self.caret.word = word_count.saturating_sub(1),
            KeyCode::Up | KeyCode::Down => {
                self.caret.line = step(self.caret.line, SIGNAL.len(), code == KeyCode::Down);
                let last = self.words(self.caret.line).len().saturating_sub(1);
                self.caret.word = self.caret.word.min(last);
                self.caret.anchor = self.caret.word;
                return true;
            }
            _ => return false,
        }
        if !extend {
            self.caret.anchor = self.caret.word;
        }
        true
    }

    fn navigate(&mut self, nav: Nav) {
        self.focus = match (nav, self.focus) {
            (Nav::Next, Focus::Signal) => Focus::Slot(0),
            (Nav::Prev, Focus::Signal) => Focus::Slot(2),
            (Nav::Next, Focus::Slot(i)) if i < 2 => Focus::Slot(i + 1),
            (Nav::Prev, Focus::Slot(i)) if i > 0 => Focus::Slot(i - 1),
            (Nav::Next | Nav::Prev, Focus::Slot(_)) => Focus::Signal,
            (Nav::Up, Focus::Slot(i)) => Focus::Slot(step(i, 3, false)),
            (Nav::Down, Focus::Slot(i)) => Focus::Slot(step(i, 3, true)),
            (_, focus) => focus,
        };
    }

    pub fn tick(&mut self, now: Instant) {
        for event in self.timers.drain_due(now) {
            match event {
                FinalTimer::ClearMessage => {
                    self.message = None;
                    self.message_timer = None;
                }
                FinalTimer::Complete => {
                    self.complete = true;
                    tracing::info!("final mission complete");
                }
            }
        }
    }
}

impl Default for FinalMission {
    fn default() -> Self {
        Self::new()
    }
}
