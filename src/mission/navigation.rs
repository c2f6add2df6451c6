use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::hotkey::KeyInput;
use crate::mission::Chord;
use crate::session::timers::{TimerId, Timers};
use crate::ui::text_input::TextInput;

pub const INITIAL_ROUTES: [&str; 3] = [
    "ROUTE A:\nX = 12.4\nY = 47.9\nSECTOR: ORI-7",
    "ROUTE B:\nX = -3.2\nY = 18.6\nSECTOR: LYRA-3",
    "ROUTE C:\nX = 88.1\nY = -12.5\nSECTOR: DRACO-9",
];

pub const TARGET_ROUTES: [&str; 3] = [
    "ROUTE A:\nX = 14.4\nY = 50.0\nSECTOR: ORI-7",
    "ROUTE B:\nX = -1.0\nY = 22.0\nSECTOR: LYRA-3",
    "ROUTE C:\nX = 90.0\nY = -10.0\nSECTOR: DRACO-9",
];

pub const ROUTE_HINTS: [&str; 3] = [
    "Fix the coordinates to match:\nX = 14.4\nY = 50.0\nSECTOR: ORI-7",
    "Fix the coordinates to match:\nX = -1.0\nY = 22.0\nSECTOR: LYRA-3",
    "Fix the coordinates to match:\nX = 90.0\nY = -10.0\nSECTOR: DRACO-9",
];

/// The route the space storm hits.
pub const STORM_ROUTE: usize = 1;
pub const DAMAGE_NOTICE: &str = "! NAVIGATION ERROR: route damaged by a space storm";

pub const TOAST_TIME: Duration = Duration::from_millis(1200);
pub const STORM_DELAY: Duration = Duration::from_millis(1500);
pub const BANNER_TIME: Duration = Duration::from_secs(4);

const STORM_BANNER: &str =
    "Space storm! The route is damaged. Press Ctrl+Z on that route to bring the data back.";
const REPAIRED_BANNER: &str = "Data restored! Now save the route again (Ctrl+S).";

/// The storm hits once per mission: it brews after the first correct save of
/// the storm route, strikes, and stays repaired after undo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Storm {
    Calm,
    Brewing,
    Struck { original: String },
    Repaired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteStatus {
    Clean,
    Dirty,
    Saved,
    Damaged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toast {
    Saved,
    Mismatch,
}

impl Toast {
    pub fn text(self) -> &'static str {
        match self {
            Toast::Saved => "Saved!",
            Toast::Mismatch => "Check the route against the sample",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NavTimer {
    ClearToast(usize),
    StormStrikes,
    ClearBanner,
}

#[derive(Clone, Debug)]
pub struct Route {
    pub editor: TextInput,
    pub saved: bool,
    pub dirty: bool,
    pub toast: Option<Toast>,
    toast_timer: Option<TimerId>,
}

impl Route {
    fn new(text: &str) -> Self {
        Self {
            editor: TextInput::multiline(text),
            saved: false,
            dirty: false,
            toast: None,
            toast_timer: None,
        }
    }

    pub fn text(&self) -> &str {
        self.editor.value()
    }
}

/// Correct three routes and save each one. One save sets off a storm that has
/// to be undone and saved again.
#[derive(Clone, Debug)]
pub struct NavigationMission {
    routes: Vec<Route>,
    focus: usize,
    storm: Storm,
    banner: Option<&'static str>,
    banner_timer: Option<TimerId>,
    timers: Timers<NavTimer>,
    continue_requested: bool,
}

impl NavigationMission {
    pub fn new() -> Self {
        Self {
            routes: INITIAL_ROUTES.iter().map(|text| Route::new(text)).collect(),
            focus: 0,
            storm: Storm::Calm,
            banner: None,
            banner_timer: None,
            timers: Timers::new(),
            continue_requested: false,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focus(&mut self, idx: usize) {
        if idx < self.routes.len() {
            self.focus = idx;
        }
    }

    pub fn storm(&self) -> &Storm {
        &self.storm
    }

    pub fn banner(&self) -> Option<&'static str> {
        self.banner
    }

    pub fn status(&self, idx: usize) -> RouteStatus {
        let route = &self.routes[idx];
        if idx == STORM_ROUTE && matches!(self.storm, Storm::Struck { .. }) {
            RouteStatus::Damaged
        } else if route.saved {
            RouteStatus::Saved
        } else if route.dirty {
            RouteStatus::Dirty
        } else {
            RouteStatus::Clean
        }
    }

    /// All routes saved correctly and the storm damage repaired.
    pub fn is_complete(&self) -> bool {
        self.routes.iter().all(|r| r.saved) && self.storm == Storm::Repaired
    }

    pub fn wants_continue(&self) -> bool {
        self.continue_requested
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn handle_key(&mut self, input: &mut KeyInput) {
        match Chord::from_input(input) {
            Some(Chord::Save) => {
                input.prevent_default();
                self.save_route(self.focus, input.at);
                return;
            }
            Some(Chord::Undo) => {
                if self.undo_storm(input.at) {
                    input.prevent_default();
                }
                return;
            }
            _ => {}
        }

        match input.code() {
            KeyCode::Tab => {
                input.prevent_default();
                self.focus = (self.focus + 1) % self.routes.len();
            }
            KeyCode::BackTab => {
                input.prevent_default();
                self.focus = (self.focus + self.routes.len() - 1) % self.routes.len();
            }
            KeyCode::Enter if self.is_complete() => {
                input.prevent_default();
                self.continue_requested = true;
            }
            _ => {
                let route = &mut self.routes[self.focus];
                if route.editor.edit(*input.event()) {
                    input.prevent_default();
                    route.dirty = true;
                    route.saved = false;
                }
            }
        }
    }

    pub fn save_route(&mut self, idx: usize, now: Instant) {
        let correct = self.routes[idx].text().trim() == TARGET_ROUTES[idx].trim();
        let route = &mut self.routes[idx];
        route.saved = correct;
        route.dirty = !correct;
        route.toast = Some(if correct { Toast::Saved } else { Toast::Mismatch });
        if let Some(id) = route.toast_timer.take() {
            self.timers.cancel(id);
        }
        route.toast_timer = Some(self.timers.after(now, TOAST_TIME, NavTimer::ClearToast(idx)));
        tracing::debug!(route = idx, correct, "route saved");

        if idx == STORM_ROUTE && correct && self.storm == Storm::Calm {
            self.storm = Storm::Brewing;
            self.timers.after(now, STORM_DELAY, NavTimer::StormStrikes);
        }
        if self.is_complete() {
            tracing::info!("navigation routes complete");
        }
    }

    fn undo_storm(&mut self, now: Instant) -> bool {
        if self.focus != STORM_ROUTE {
            return false;
        }
        let Storm::Struck { original } = &self.storm else {
            return false;
        };
        let route = &mut self.routes[STORM_ROUTE];
        route.editor.set_value(original);
        route.dirty = true;
        route.saved = false;
        self.storm = Storm::Repaired;
        self.show_banner(REPAIRED_BANNER, now);
        tracing::info!("storm damage undone");
        true
    }

    fn strike(&mut self, now: Instant) {
        if self.storm != Storm::Brewing {
            return;
        }
        let route = &mut self.routes[STORM_ROUTE];
        let original = route.text().to_string();
        route.editor.set_value(DAMAGE_NOTICE);
        self.storm = Storm::Struck { original };
        self.show_banner(STORM_BANNER, now);
        tracing::info!(route = STORM_ROUTE, "storm damaged route");
    }

    fn show_banner(&mut self, text: &'static str, now: Instant) {
        if let Some(id) = self.banner_timer.take() {
            self.timers.cancel(id);
        }
        self.banner = Some(text);
        self.banner_timer = Some(self.timers.after(now, BANNER_TIME, NavTimer::ClearBanner));
    }

    pub fn tick(&mut self, now: Instant) {
        for event in self.timers.drain_due(now) {
            match event {
                NavTimer::ClearToast(idx) => {
                    if let Some(route) = self.routes.get_mut(idx) {
                        route.toast = None;
                        route.toast_timer = None;
                    }
                }
                NavTimer::StormStrikes => self.strike(now),
                NavTimer::ClearBanner => {
                    self.banner = None;
                    self.banner_timer = None;
                }
            }
        }
    }
}

impl Default for NavigationMission {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_route(m: &mut NavigationMission, idx: usize, text: &str, at: Instant) {
        m.set_focus(idx);
        m.handle_key(&mut KeyInput::ctrl('u', at));
        for ch in text.chars() {
            let code = if ch == '\n' { KeyCode::Enter } else { KeyCode::Char(ch) };
            m.handle_key(&mut KeyInput::key(code, at));
        }
    }

    fn save(m: &mut NavigationMission, idx: usize, at: Instant) {
        m.set_focus(idx);
        let mut input = KeyInput::ctrl('s', at);
        m.handle_key(&mut input);
        assert!(input.is_default_prevented());
    }

    #[test]
    fn test_typing_marks_route_dirty() {
        let now = Instant::now();
        let mut m = NavigationMission::new();
        assert_eq!(m.status(0), RouteStatus::Clean);
        m.handle_key(&mut KeyInput::key(KeyCode::Char('!'), now));
        assert_eq!(m.status(0), RouteStatus::Dirty);
        assert!(m.routes()[0].text().ends_with('!'));
    }

    #[test]
    fn test_wrong_save_shows_mismatch_toast_that_clears() {
        let now = Instant::now();
        let mut m = NavigationMission::new();
        save(&mut m, 0, now);
        assert_eq!(m.routes()[0].toast, Some(Toast::Mismatch));
        assert_eq!(m.status(0), RouteStatus::Dirty);
        m.tick(now + Duration::from_millis(1199));
        assert!(m.routes()[0].toast.is_some());
        m.tick(now + TOAST_TIME);
        assert!(m.routes()[0].toast.is_none());
    }

    #[test]
    fn test_correct_save_ignores_surrounding_whitespace() {
        let now = Instant::now();
        let mut m = NavigationMission::new();
        type_route(&mut m, 0, &format!("  {}\n", TARGET_ROUTES[0]), now);
        save(&mut m, 0, now);
        assert_eq!(m.status(0), RouteStatus::Saved);
        assert_eq!(m.routes()[0].toast, Some(Toast::Saved));
        assert_eq!(m.storm(), &Storm::Calm);
    }

    #[test]
    fn test_storm_strikes_after_delay_and_undo_restores() {
        let now = Instant::now();
        let mut m = NavigationMission::new();
        type_route(&mut m, STORM_ROUTE, TARGET_ROUTES[STORM_ROUTE], now);
        save(&mut m, STORM_ROUTE, now);
        assert_eq!(m.storm(), &Storm::Brewing);

        m.tick(now + Duration::from_millis(1499));
        assert_eq!(m.routes()[STORM_ROUTE].text(), TARGET_ROUTES[STORM_ROUTE]);
        let struck_at = now + STORM_DELAY;
        m.tick(struck_at);
        assert_eq!(m.routes()[STORM_ROUTE].text(), DAMAGE_NOTICE);
        assert_eq!(m.status(STORM_ROUTE), RouteStatus::Damaged);
        assert!(m.banner().is_some());

        // Undo only works on the damaged route.
        m.set_focus(0);
        let mut undo = KeyInput::ctrl('z', struck_at);
        m.handle_key(&mut undo);
        assert!(!undo.is_default_prevented());

        m.set_focus(STORM_ROUTE);
        let mut undo = KeyInput::ctrl('z', struck_at);
        m.handle_key(&mut undo);
        assert!(undo.is_default_prevented());
        assert_eq!(m.routes()[STORM_ROUTE].text(), TARGET_ROUTES[STORM_ROUTE]);
        assert_eq!(m.storm(), &Storm::Repaired);
        assert_eq!(m.status(STORM_ROUTE), RouteStatus::Dirty);

        save(&mut m, STORM_ROUTE, struck_at);
        assert_eq!(m.status(STORM_ROUTE), RouteStatus::Saved);
        m.tick(struck_at + Duration::from_secs(10));
        assert_eq!(m.routes()[STORM_ROUTE].text(), TARGET_ROUTES[STORM_ROUTE]);
        assert!(m.banner().is_none());
    }

    #[test]
    fn test_storm_fires_at_most_once() {
        let now = Instant::now();
        let mut m = NavigationMission::new();
        type_route(&mut m, STORM_ROUTE, TARGET_ROUTES[STORM_ROUTE], now);
        save(&mut m, STORM_ROUTE, now);
        save(&mut m, STORM_ROUTE, now + Duration::from_millis(100));
        m.tick(now + Duration::from_secs(2));
        m.handle_key(&mut KeyInput::ctrl('z', now + Duration::from_secs(2)));
        save(&mut m, STORM_ROUTE, now + Duration::from_secs(3));
        m.tick(now + Duration::from_secs(10));
        assert_eq!(m.storm(), &Storm::Repaired);
        assert_eq!(m.routes()[STORM_ROUTE].text(), TARGET_ROUTES[STORM_ROUTE]);
    }

    #[test]
    fn test_completion_needs_storm_cycle() {
        let now = Instant::now();
        let mut m = NavigationMission::new();
        for idx in 0..3 {
            type_route(&mut m, idx, TARGET_ROUTES[idx], now);
            save(&mut m, idx, now);
        }
        assert!(!m.is_complete());

        let later = now + Duration::from_secs(2);
        m.tick(later);
        m.set_focus(STORM_ROUTE);
        m.handle_key(&mut KeyInput::ctrl('z', later));
        assert!(!m.is_complete());
        save(&mut m, STORM_ROUTE, later);
        assert!(m.is_complete());

        m.handle_key(&mut KeyInput::key(KeyCode::Enter, later));
        assert!(m.wants_continue());
    }

    #[test]
    fn test_tab_cycles_focus() {
        let now = Instant::now();
        let mut m = NavigationMission::new();
        m.handle_key(&mut KeyInput::key(KeyCode::Tab, now));
        assert_eq!(m.focus(), 1);
        m.handle_key(&mut KeyInput::key(KeyCode::BackTab, now));
        m.handle_key(&mut KeyInput::key(KeyCode::BackTab, now));
        assert_eq!(m.focus(), 2);
    }
}
