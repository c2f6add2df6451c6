use crate::hotkey::KeyInput;
use crate::mission::{Buffer, Chord, Nav, step};

pub const PACKETS: [(&str, &str); 3] = [
    ("Packet 1", "LOG: AST-01\nSIGNAL: 78.2%\nSECTOR: Z-19"),
    ("Packet 2", "LOG: AST-02\nSIGNAL: 63.9%\nSECTOR: K-07"),
    ("Packet 3", "LOG: AST-03\nSIGNAL: 91.4%\nSECTOR: Q-42"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Packet(usize),
    Archive(usize),
}

/// Move every data packet into the archive with select-all, cut and paste.
#[derive(Clone, Debug)]
pub struct AsteroidMission {
    packets: [String; 3],
    archive: [String; 3],
    focus: Focus,
    selected: Option<usize>,
    buffer: Buffer,
    continue_requested: bool,
}

impl AsteroidMission {
    pub fn new() -> Self {
        Self {
            packets: PACKETS.map(|(_, content)| content.to_string()),
            archive: Default::default(),
            focus: Focus::Packet(0),
            selected: None,
            buffer: Buffer::default(),
            continue_requested: false,
        }
    }

    pub fn packets(&self) -> &[String; 3] {
        &self.packets
    }

    pub fn archive(&self) -> &[String; 3] {
        &self.archive
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn is_won(&self) -> bool {
        self.packets.iter().all(String::is_empty) && self.archive.iter().all(|s| !s.is_empty())
    }

    pub fn wants_continue(&self) -> bool {
        self.continue_requested
    }

    /// Focusing an archive slot drops the packet selection with it.
    pub fn set_focus(&mut self, focus: Focus) {
        if let Focus::Archive(_) = focus {
            self.selected = None;
        }
        self.focus = focus;
    }

    pub fn handle_key(&mut self, input: &mut KeyInput) {
        if let Some(chord) = Chord::from_input(input) {
            self.apply(chord, input);
            return;
        }
        let Some(nav) = Nav::from_input(input) else {
            return;
        };
        input.prevent_default();
        match (nav, self.focus) {
            (Nav::Activate, _) if self.is_won() => self.continue_requested = true,
            (Nav::Activate, _) => {}
            (Nav::Up | Nav::Down, Focus::Packet(i)) => {
                self.set_focus(Focus::Packet(step(i, 3, nav == Nav::Down)))
            }
            (Nav::Up | Nav::Down, Focus::Archive(i)) => {
                self.set_focus(Focus::Archive(step(i, 3, nav == Nav::Down)))
            }
            (Nav::Right | Nav::Next | Nav::Prev, Focus::Packet(i)) => {
                self.set_focus(Focus::Archive(i))
            }
            (Nav::Left | Nav::Next | Nav::Prev, Focus::Archive(i)) => {
                self.set_focus(Focus::Packet(i))
            }
            _ => {}
        }
    }

    fn apply(&mut self, chord: Chord, input: &mut KeyInput) {
        match (chord, self.focus) {
            (Chord::SelectAll, Focus::Packet(i)) if !self.packets[i].is_empty() => {
                input.prevent_default();
                self.selected = Some(i);
            }
            (Chord::Cut, Focus::Packet(i))
                if self.selected == Some(i) && !self.packets[i].is_empty() =>
            {
                input.prevent_default();
                self.buffer.put(std::mem::take(&mut self.packets[i]));
                self.selected = None;
                tracing::debug!(packet = i, "packet cut");
            }
            (Chord::Paste, Focus::Archive(i)) if self.archive[i].is_empty() => {
                if let Some(payload) = self.buffer.take() {
                    input.prevent_default();
                    self.archive[i] = payload;
                    tracing::debug!(slot = i, "archive slot filled");
                    if self.is_won() {
                        tracing::info!("asteroid archive complete");
                    }
                }
            }
            _ => {}
        }
    }
}

impl Default for AsteroidMission {
    fn default() -> Self {
        Self::new()
    }
}
