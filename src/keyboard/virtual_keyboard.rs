use std::collections::HashSet;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;

use crate::audio::Cue;
use crate::hotkey::KeyInput;
use crate::hotkey::combo::{Combo, KeyToken, Modifiers};
use crate::keyboard::pressed::PressedKeys;

/// How long matched keys stay lit after a success.
pub const SUCCESS_FLASH: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The chord is not part of this lesson at all.
    NotAllowed,
    /// A lesson chord, but not the one being asked for.
    WrongShortcut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Matched,
    Rejected(Rejection),
    /// No modifier held: ordinary typing, not judged.
    Ignored,
}

/// The one decision every chord goes through.
pub fn judge(target: &Combo, allowed: &HashSet<Combo>, pressed: &Combo) -> Verdict {
    if !pressed.has_modifier() {
        return Verdict::Ignored;
    }
    if pressed == target {
        Verdict::Matched
    } else if allowed.contains(pressed) {
        Verdict::Rejected(Rejection::WrongShortcut)
    } else {
        Verdict::Rejected(Rejection::NotAllowed)
    }
}

/// What the diagram should light up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Highlight {
    Pressed(Vec<KeyToken>),
    Success(Vec<KeyToken>),
}

#[derive(Clone, Debug)]
struct Flash {
    keys: Vec<KeyToken>,
    until: Instant,
}

/// On-screen keyboard state for one lesson: which keys are held, which chord
/// is wanted, and the chords the lesson knows about.
#[derive(Clone, Debug)]
pub struct VirtualKeyboard {
    target: Combo,
    allowed: HashSet<Combo>,
    pressed: PressedKeys,
    flash: Option<Flash>,
    cues: Vec<Cue>,
}

impl VirtualKeyboard {
    pub fn new(target: Combo, allowed: impl IntoIterator<Item = Combo>) -> Self {
        Self {
            target,
            allowed: allowed.into_iter().collect(),
            pressed: PressedKeys::new(),
            flash: None,
            cues: Vec::new(),
        }
    }

    pub fn target(&self) -> &Combo {
        &self.target
    }

    pub fn set_target(&mut self, target: Combo) {
        self.target = target;
    }

    pub fn pressed(&self) -> &PressedKeys {
        &self.pressed
    }

    /// Record the key as held, then judge it. A match or a rejection both
    /// swallow the event so the terminal never acts on a lesson chord.
    pub fn key_down(&mut self, input: &mut KeyInput) -> Verdict {
        if let Some(token) = input.token() {
            self.pressed.press(token, input.at);
        }
        if let Some(mods) = input.combo().map(|c| c.mods) {
            for token in mods.tokens() {
                self.pressed.press(token, input.at);
            }
        }

        let Some(combo) = input.combo() else {
            return Verdict::Ignored;
        };
        let verdict = judge(&self.target, &self.allowed, &combo);
        match verdict {
            Verdict::Matched => {
                input.suppress();
                self.cues.push(Cue::Success);
                self.flash = Some(Flash {
                    keys: self.target.keys(),
                    until: input.at + SUCCESS_FLASH,
                });
                tracing::debug!(combo = %combo, "shortcut matched");
            }
            Verdict::Rejected(reason) => {
                input.suppress();
                self.cues.push(Cue::Failure);
                tracing::debug!(combo = %combo, ?reason, target = %self.target, "shortcut rejected");
            }
            Verdict::Ignored => {}
        }
        verdict
    }

    pub fn key_up(&mut self, event: &KeyEvent) {
        if let Some(token) = KeyToken::from_code(event.code) {
            self.pressed.release(token);
        }
        self.pressed
            .retain_modifiers(Modifiers::from_crossterm(event.modifiers));
    }

    pub fn tick(&mut self, now: Instant) {
        if self.flash.as_ref().is_some_and(|f| now >= f.until) {
            self.flash = None;
        }
        self.pressed.expire(now);
    }

    pub fn highlight(&self) -> Highlight {
        match &self.flash {
            Some(flash) => Highlight::Success(flash.keys.clone()),
            None => Highlight::Pressed(self.pressed.tokens().collect()),
        }
    }

    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

    use super::*;

    fn lesson(target: &str) -> VirtualKeyboard {
        let allowed = ["ctrl+s", "ctrl+c", "ctrl+v", "ctrl+x", "ctrl+f", "ctrl+a", "ctrl+z"]
            .iter()
            .map(|s| s.parse::<Combo>().unwrap());
        VirtualKeyboard::new(target.parse().unwrap(), allowed)
    }

    #[test]
    fn test_target_press_matches_once() {
        let mut kb = lesson("ctrl+s");
        let mut input = KeyInput::ctrl('s', Instant::now());
        assert_eq!(kb.key_down(&mut input), Verdict::Matched);
        assert!(input.is_default_prevented());
        assert_eq!(kb.take_cues(), vec![Cue::Success]);
        assert!(kb.take_cues().is_empty());
    }

    #[test]
    fn test_other_lesson_chord_is_wrong_shortcut() {
        let mut kb = lesson("ctrl+s");
        let mut input = KeyInput::ctrl('c', Instant::now());
        assert_eq!(
            kb.key_down(&mut input),
            Verdict::Rejected(Rejection::WrongShortcut)
        );
        assert!(input.is_default_prevented());
        assert_eq!(kb.take_cues(), vec![Cue::Failure]);
    }

    #[test]
    fn test_unknown_chord_is_not_allowed() {
        let mut kb = lesson("ctrl+s");
        let mut input = KeyInput::ctrl('p', Instant::now());
        assert_eq!(kb.key_down(&mut input), Verdict::Rejected(Rejection::NotAllowed));
        assert!(input.is_default_prevented());
    }

    #[test]
    fn test_plain_typing_is_ignored() {
        let mut kb = lesson("ctrl+s");
        let mut input = KeyInput::key(KeyCode::Char('s'), Instant::now());
        assert_eq!(kb.key_down(&mut input), Verdict::Ignored);
        assert!(!input.is_default_prevented());
        assert!(kb.take_cues().is_empty());
        assert!(kb.pressed().contains(KeyToken::Char('s')));
    }

    #[test]
    fn test_bare_modifier_press_only_lights_key() {
        let mut kb = lesson("ctrl+s");
        let ev = KeyEvent::new(
            KeyCode::Modifier(crossterm::event::ModifierKeyCode::RightControl),
            KeyModifiers::CONTROL,
        );
        let mut input = KeyInput::new(ev, Instant::now());
        assert_eq!(kb.key_down(&mut input), Verdict::Ignored);
        assert!(kb.pressed().contains(KeyToken::Ctrl));
    }

    #[test]
    fn test_success_flash_expires() {
        let now = Instant::now();
        let mut kb = lesson("ctrl+s");
        kb.key_down(&mut KeyInput::ctrl('s', now));
        assert_eq!(
            kb.highlight(),
            Highlight::Success(vec![KeyToken::Ctrl, KeyToken::Char('s')])
        );
        kb.tick(now + Duration::from_millis(299));
        assert!(matches!(kb.highlight(), Highlight::Success(_)));
        kb.tick(now + SUCCESS_FLASH);
        assert!(matches!(kb.highlight(), Highlight::Pressed(_)));
    }

    #[test]
    fn test_chord_release_clears_modifiers() {
        let now = Instant::now();
        let mut kb = lesson("ctrl+s");
        kb.key_down(&mut KeyInput::ctrl('s', now));
        assert!(kb.pressed().contains(KeyToken::Ctrl));

        let mut release = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        kb.key_up(&release);
        kb.tick(now + Duration::from_secs(5));
        assert!(kb.pressed().is_empty());
        assert_eq!(kb.highlight(), Highlight::Pressed(Vec::new()));
    }

    #[test]
    fn test_key_release_keeps_modifier_still_down() {
        let now = Instant::now();
        let mut kb = lesson("ctrl+s");
        kb.key_down(&mut KeyInput::ctrl('c', now));

        let mut release = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        release.kind = KeyEventKind::Release;
        kb.key_up(&release);
        assert!(kb.pressed().contains(KeyToken::Ctrl));
        assert!(!kb.pressed().contains(KeyToken::Char('c')));
    }

    #[test]
    fn test_shift_variant_of_target_is_rejected() {
        let mut kb = lesson("ctrl+z");
        let ev = KeyEvent::new(KeyCode::Char('Z'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        let mut input = KeyInput::new(ev, Instant::now());
        assert_eq!(kb.key_down(&mut input), Verdict::Rejected(Rejection::NotAllowed));
    }
}
