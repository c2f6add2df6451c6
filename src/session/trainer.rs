use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::SmallRng;

use crate::audio::Cue;
use crate::hotkey::KeyInput;
use crate::keyboard::display::combo_label;
use crate::keyboard::virtual_keyboard::{Verdict, VirtualKeyboard};
use crate::session::shortcuts::{self, CATALOG, ShortcutTask};
use crate::session::timers::{TimerId, Timers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TrainerTimer {
    Countdown,
    RevealHint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrainerSettings {
    pub seconds: u32,
    pub hint_delay: Duration,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            seconds: 30,
            hint_delay: Duration::from_secs(3),
        }
    }
}

/// Timed shortcut drill. Runs until the clock hits zero, then shows the
/// results and waits for restart or continue.
pub struct TrainerState {
    queue: VecDeque<ShortcutTask>,
    pub score: u32,
    pub time_left: u32,
    pub hint_visible: bool,
    pub keyboard: VirtualKeyboard,
    settings: TrainerSettings,
    timers: Timers<TrainerTimer>,
    hint: Option<TimerId>,
    rng: SmallRng,
    continue_requested: bool,
}

impl TrainerState {
    pub fn new(settings: TrainerSettings, mut rng: SmallRng, now: Instant) -> Self {
        let queue: VecDeque<ShortcutTask> = shortcuts::shuffled(&mut rng).into();
        let target = queue.front().copied().unwrap_or(CATALOG[0]).combo;
        let mut state = Self {
            queue,
            score: 0,
            time_left: settings.seconds,
            hint_visible: false,
            keyboard: VirtualKeyboard::new(target, shortcuts::allowed_combos()),
            settings,
            timers: Timers::new(),
            hint: None,
            rng,
            continue_requested: false,
        };
        state.start_clock(now);
        state
    }

    fn start_clock(&mut self, now: Instant) {
        self.timers.clear();
        self.hint = None;
        if self.time_left > 0 {
            self.timers
                .every(now, Duration::from_secs(1), TrainerTimer::Countdown);
        }
        self.reset_hint(now);
    }

    /// The task on screen. The queue is refilled before it can run dry.
    pub fn current_task(&self) -> ShortcutTask {
        self.queue.front().copied().unwrap_or(CATALOG[0])
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_finished(&self) -> bool {
        self.time_left == 0
    }

    pub fn wants_continue(&self) -> bool {
        self.continue_requested
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Combo text for the hint bubble, once it has been revealed.
    pub fn hint_text(&self) -> Option<String> {
        self.hint_visible
            .then(|| combo_label(&self.current_task().combo))
    }

    pub fn handle_key(&mut self, input: &mut KeyInput) {
        if self.is_finished() {
            match input.code() {
                KeyCode::Char('r') | KeyCode::Char('R') if input.typed_char().is_some() => {
                    input.prevent_default();
                    self.restart(input.at);
                }
                KeyCode::Enter => {
                    input.prevent_default();
                    self.continue_requested = true;
                }
                _ => {}
            }
            return;
        }

        if self.keyboard.key_down(input) == Verdict::Matched {
            self.on_success(input.at);
        }
    }

    pub fn key_up(&mut self, event: &KeyEvent) {
        self.keyboard.key_up(event);
    }

    /// Score the current task and move to the next one, reshuffling the whole
    /// catalog when the queue is used up.
    pub fn on_success(&mut self, now: Instant) {
        self.score += 1;
        self.queue.pop_front();
        if self.queue.is_empty() {
            self.queue = shortcuts::shuffled(&mut self.rng).into();
        }
        self.keyboard.set_target(self.current_task().combo);
        self.reset_hint(now);
    }

    fn reset_hint(&mut self, now: Instant) {
        if let Some(id) = self.hint.take() {
            self.timers.cancel(id);
        }
        self.hint_visible = false;
        if !self.is_finished() {
            self.hint = Some(
                self.timers
                    .after(now, self.settings.hint_delay, TrainerTimer::RevealHint),
            );
        }
    }

    pub fn tick(&mut self, now: Instant) {
        for event in self.timers.drain_due(now) {
            match event {
                TrainerTimer::Countdown => {
                    self.time_left = self.time_left.saturating_sub(1);
                    if self.time_left == 0 {
                        self.finish();
                        break;
                    }
                }
                TrainerTimer::RevealHint => {
                    self.hint = None;
                    self.hint_visible = true;
                }
            }
        }
        self.keyboard.tick(now);
    }

    fn finish(&mut self) {
        self.timers.clear();
        self.hint = None;
        self.hint_visible = false;
        tracing::info!(score = self.score, "trainer time is up");
    }

    /// Start over from the results screen: new queue, zero score, full clock.
    pub fn restart(&mut self, now: Instant) {
        self.queue = shortcuts::shuffled(&mut self.rng).into();
        self.score = 0;
        self.time_left = self.settings.seconds;
        self.continue_requested = false;
        self.keyboard.set_target(self.current_task().combo);
        self.start_clock(now);
        tracing::info!("trainer restarted");
    }

    pub fn take_cues(&mut self) -> Vec<Cue> {
        self.keyboard.take_cues()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn trainer(now: Instant) -> TrainerState {
        TrainerState::new(TrainerSettings::default(), SmallRng::seed_from_u64(11), now)
    }

    fn press_current(t: &mut TrainerState, at: Instant) {
        let combo = t.current_task().combo;
        let ch = match combo.key {
            crate::hotkey::combo::KeyToken::Char(ch) => ch,
            other => panic!("unexpected key {other:?}"),
        };
        t.handle_key(&mut KeyInput::ctrl(ch, at));
    }

    #[test]
    fn test_success_scores_and_advances() {
        let now = Instant::now();
        let mut t = trainer(now);
        let first = t.current_task();
        press_current(&mut t, now);
        assert_eq!(t.score, 1);
        assert_eq!(t.queue_len(), 6);
        assert_ne!(t.current_task(), first);
        assert_eq!(t.take_cues(), vec![Cue::Success]);
    }

    #[test]
    fn test_queue_refills_after_last_task() {
        let now = Instant::now();
        let mut t = trainer(now);
        for _ in 0..7 {
            press_current(&mut t, now);
        }
        assert_eq!(t.score, 7);
        assert_eq!(t.queue_len(), 7);
        press_current(&mut t, now);
        assert_eq!(t.queue_len(), 6);
    }

    #[test]
    fn test_wrong_chord_does_not_score() {
        let now = Instant::now();
        let mut t = trainer(now);
        let target = t.current_task().combo;
        let wrong = shortcuts::CATALOG
            .iter()
            .find(|task| task.combo != target)
            .unwrap();
        let ch = match wrong.combo.key {
            crate::hotkey::combo::KeyToken::Char(ch) => ch,
            _ => unreachable!(),
        };
        let mut input = KeyInput::ctrl(ch, now);
        t.handle_key(&mut input);
        assert_eq!(t.score, 0);
        assert!(input.is_default_prevented());
        assert_eq!(t.take_cues(), vec![Cue::Failure]);
    }

    #[test]
    fn test_countdown_stops_at_zero() {
        let now = Instant::now();
        let mut t = trainer(now);
        t.tick(now + Duration::from_secs(10));
        assert_eq!(t.time_left, 20);
        t.tick(now + Duration::from_secs(45));
        assert_eq!(t.time_left, 0);
        assert!(t.is_finished());
        assert!(!t.has_pending_timers());
        t.tick(now + Duration::from_secs(60));
        assert_eq!(t.time_left, 0);
    }

    #[test]
    fn test_hint_appears_after_delay_and_resets_on_new_task() {
        let now = Instant::now();
        let mut t = trainer(now);
        t.tick(now + Duration::from_millis(2900));
        assert!(!t.hint_visible);
        t.tick(now + Duration::from_millis(3000));
        assert!(t.hint_visible);
        assert_eq!(t.hint_text(), Some(combo_label(&t.current_task().combo)));

        let later = now + Duration::from_millis(3100);
        press_current(&mut t, later);
        assert!(!t.hint_visible);
        t.tick(later + Duration::from_millis(2999));
        assert!(!t.hint_visible);
        t.tick(later + Duration::from_millis(3000));
        assert!(t.hint_visible);
    }

    #[test]
    fn test_keys_after_time_up_do_not_score() {
        let now = Instant::now();
        let mut t = trainer(now);
        t.tick(now + Duration::from_secs(30));
        press_current(&mut t, now + Duration::from_secs(31));
        assert_eq!(t.score, 0);
    }

    #[test]
    fn test_results_restart_and_continue() {
        let now = Instant::now();
        let mut t = trainer(now);
        press_current(&mut t, now);
        let end = now + Duration::from_secs(30);
        t.tick(end);
        assert!(t.is_finished());

        t.handle_key(&mut KeyInput::key(KeyCode::Char('r'), end));
        assert_eq!(t.score, 0);
        assert_eq!(t.time_left, 30);
        assert!(t.has_pending_timers());
        assert!(!t.wants_continue());

        t.tick(end + Duration::from_secs(30));
        t.handle_key(&mut KeyInput::key(KeyCode::Enter, end + Duration::from_secs(30)));
        assert!(t.wants_continue());
    }
}
