use rand::Rng;
use rand::seq::SliceRandom;

use crate::hotkey::KeyInput;
use crate::mission::guard::{FieldKey, classify};
use crate::mission::search::SearchBox;
use crate::mission::{Buffer, Chord, Nav, step};

pub const CODES: [&str; 80] = [
    "PHI-22", "ZETA-49", "OMEGA-77", "ALFA-72", "SIGMA-61", "NOVA-15", "CON-72", "UVIS-49",
    "OSP-55", "RIBG-62", "TAURI-77", "YETA-49", "VMCAR-71", "ULVA-72", "RAYER-35", "MCA-55",
    "XI-93", "DELTA-99", "BETA-69", "GAMMA-26", "LAMBDA-31", "THETA-11", "KAPPA-84", "EPSI-40",
    "META-66", "HELI-09", "TERRA-28", "ROXA-53", "QUARK-18", "DRACO-21", "PYRA-58", "ZENIT-64",
    "HYDRA-12", "PLASM-37", "VEGA-42", "LYRA-87", "ARION-73", "CORUS-29", "JUNO-83", "VORTA-59",
    "ORION-38", "TRION-07", "VARIS-19", "SIREN-33", "LETO-65", "REBUS-45", "SOLAR-88", "POLAR-96",
    "VEXEL-17", "CENTA-23", "URSA-75", "NEO-54", "SIRIUS-48", "ARCUS-41", "XENON-24", "GLOBE-27",
    "LINAR-14", "MEGA-79", "POSEI-10", "VULCA-52", "MATRIX-60", "TITAN-95", "SAGAN-08", "FERRO-70",
    "CARMA-13", "KELVIN-36", "ASTRA-81", "ORCA-56", "YURON-32", "DIONE-25", "VANTA-74", "PYXIS-57",
    "IONIX-34", "DORAD-86", "ANTAR-03", "HORIZ-94", "SEREN-63", "PEGAS-39", "FINIX-51", "HALON-20",
];

/// Cells per row on the code board.
pub const COLUMNS: usize = 8;
pub const FIELDS: usize = 3;

/// `count` distinct code words, drawn by shuffling the board's prefixes.
pub fn secret_words<R: Rng>(rng: &mut R, count: usize) -> Vec<&'static str> {
    let mut words: Vec<&'static str> = Vec::new();
    for code in CODES {
        let word = code.split('-').next().unwrap_or(code);
        if !words.contains(&word) {
            words.push(word);
        }
    }
    words.shuffle(rng);
    words.truncate(count);
    words
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldStatus {
    Empty,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Code(usize),
    Field(usize),
}

/// Find the secret words on the code board and send one matching code per
/// message field.
#[derive(Clone, Debug)]
pub struct GalacticMission {
    secrets: Vec<&'static str>,
    fields: [String; FIELDS],
    focus: Focus,
    selected: Option<&'static str>,
    buffer: Buffer,
    pub search: SearchBox,
    continue_requested: bool,
}

impl GalacticMission {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::with_secrets(secret_words(rng, FIELDS))
    }

    pub fn with_secrets(secrets: Vec<&'static str>) -> Self {
        Self {
            secrets,
            fields: Default::default(),
            focus: Focus::Code(0),
            selected: None,
            buffer: Buffer::default(),
            search: SearchBox::new(),
            continue_requested: false,
        }
    }

    pub fn secrets(&self) -> &[&'static str] {
        &self.secrets
    }

    pub fn fields(&self) -> &[String; FIELDS] {
        &self.fields
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn selected(&self) -> Option<&'static str> {
        self.selected
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn wants_continue(&self) -> bool {
        self.continue_requested
    }

    fn secret_of(&self, value: &str) -> Option<&'static str> {
        self.secrets
            .iter()
            .copied()
            .find(|word| value.strip_prefix(word).is_some_and(|rest| rest.starts_with('-')))
    }

    pub fn field_status(&self, idx: usize) -> FieldStatus {
        match self.fields.get(idx) {
            None => FieldStatus::Empty,
            Some(value) if value.is_empty() => FieldStatus::Empty,
            Some(value) if self.secret_of(value).is_some() => FieldStatus::Correct,
            Some(_) => FieldStatus::Incorrect,
        }
    }

    /// Every field holds a code for a different secret word.
    pub fn is_won(&self) -> bool {
        let mut used: Vec<&str> = Vec::with_capacity(FIELDS);
        for value in &self.fields {
            match self.secret_of(value) {
                Some(word) if !used.contains(&word) => used.push(word),
                _ => return false,
            }
        }
        true
    }

    pub fn handle_key(&mut self, input: &mut KeyInput) {
        if self.search.handle_key(input) {
            return;
        }
        if let Some(chord) = Chord::from_input(input) {
            self.apply(chord, input);
            return;
        }
        if self.is_won() && Nav::from_input(input) == Some(Nav::Activate) {
            input.prevent_default();
            self.continue_requested = true;
            return;
        }
        if let Focus::Field(i) = self.focus {
            match classify(input) {
                FieldKey::Clear => {
                    input.prevent_default();
                    self.fields[i].clear();
                    return;
                }
                FieldKey::Block => {
                    input.prevent_default();
                    return;
                }
                FieldKey::Allow => {}
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
            Chord::Copy => {
                if let Some(code) = self.selected {
                    input.prevent_default();
                    self.buffer.put(code);
                }
            }
            Chord::Paste => {
                let Some(copied) = self.buffer.peek().map(str::to_string) else {
                    return;
                };
                if self.search.is_active() {
                    input.prevent_default();
                    self.search.set_query(&copied);
                } else if let Focus::Field(i) = self.focus {
                    input.prevent_default();
                    self.fields[i] = copied;
                    if self.is_won() {
                        tracing::info!("galactic search complete");
                    }
                }
            }
            _ => {}
        }
    }

    fn navigate(&mut self, nav: Nav) {
        let rows = CODES.len().div_ceil(COLUMNS);
        self.focus = match (nav, self.focus) {
            (Nav::Activate, Focus::Code(i)) => {
                self.selected = Some(CODES[i]);
                Focus::Code(i)
            }
            (Nav::Left, Focus::Code(i)) => Focus::Code(i.saturating_sub(1)),
            (Nav::Right, Focus::Code(i)) => Focus::Code((i + 1).min(CODES.len() - 1)),
            (Nav::Up, Focus::Code(i)) => Focus::Code(i.saturating_sub(COLUMNS)),
            (Nav::Down, Focus::Code(i)) if i / COLUMNS + 1 < rows => {
                Focus::Code((i + COLUMNS).min(CODES.len() - 1))
            }
            (Nav::Down, Focus::Code(_)) => Focus::Field(0),
            (Nav::Next, Focus::Code(_)) => Focus::Field(0),
            (Nav::Prev, Focus::Code(_)) => Focus::Field(FIELDS - 1),
            (Nav::Up, Focus::Field(0)) => Focus::Code(CODES.len() - COLUMNS),
            (Nav::Up | Nav::Left, Focus::Field(i)) => Focus::Field(step(i, FIELDS, false)),
            (Nav::Down | Nav::Right, Focus::Field(i)) => Focus::Field(step(i, FIELDS, true)),
            (Nav::Next, Focus::Field(i)) if i + 1 < FIELDS => Focus::Field(i + 1),
            (Nav::Prev, Focus::Field(i)) if i > 0 => Focus::Field(i - 1),
            (Nav::Next | Nav::Prev, Focus::Field(_)) => Focus::Code(0),
            (Nav::Activate, focus) => focus,
        };
    }
}
