use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::hotkey::combo::{KeyToken, Modifiers};

/// Without release events, a key counts as held for this long after its
/// last press.
const RELEASE_FALLBACK: Duration = Duration::from_millis(150);

/// Keys currently held down, paired from press/release events.
#[derive(Clone, Debug, Default)]
pub struct PressedKeys {
    held: HashSet<KeyToken>,
    last_press: Option<Instant>,
    /// Set once the terminal has delivered a release event; from then on
    /// presses are only cleared by their releases.
    releases_reported: bool,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, token: KeyToken, at: Instant) {
        self.held.insert(token);
        self.last_press = Some(at);
    }

    pub fn release(&mut self, token: KeyToken) {
        self.releases_reported = true;
        self.held.remove(&token);
    }

    /// Release every held modifier that is missing from `still_held`. Terminals
    /// only send bare modifier events with extra enhancement flags, so the
    /// modifier state on a key release is the only reliable signal.
    pub fn retain_modifiers(&mut self, still_held: Modifiers) {
        let keep = still_held.tokens();
        self.held
            .retain(|token| !token.is_modifier() || keep.contains(token));
    }

    pub fn contains(&self, token: KeyToken) -> bool {
        self.held.contains(&token)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = KeyToken> + '_ {
        self.held.iter().copied()
    }

    pub fn clear(&mut self) {
        self.held.clear();
        self.last_press = None;
    }

    /// Drop stale presses when the terminal never reports releases.
    pub fn expire(&mut self, now: Instant) {
        if self.releases_reported {
            return;
        }
        if let Some(last) = self.last_press {
            if now.saturating_duration_since(last) > RELEASE_FALLBACK && !self.held.is_empty() {
                self.clear();
            }
        }
    }
}
