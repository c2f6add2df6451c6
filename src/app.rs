use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::audio::Cue;
use crate::config::Config;
use crate::hotkey::KeyInput;
use crate::hotkey::router::{Handler, HotkeyRouter};
use crate::mission::asteroid::AsteroidMission;
use crate::mission::final_mission::FinalMission;
use crate::mission::galactic::GalacticMission;
use crate::mission::navigation::NavigationMission;
use crate::session::trainer::TrainerState;
use crate::story::{StoryBook, StoryId, StoryScreen, WelcomeScreen};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    StoryTrainer,
    Trainer,
    StoryGalactic,
    Galactic,
    StoryAsteroid,
    Asteroid,
    StoryNavigation,
    Navigation,
    StoryFinal,
    Final,
    Epilogue,
}

impl Screen {
    /// The fixed campaign order. Every screen has exactly one successor.
    pub fn next(self) -> Screen {
        match self {
            Screen::Welcome => Screen::StoryTrainer,
            Screen::StoryTrainer => Screen::Trainer,
            Screen::Trainer => Screen::StoryGalactic,
            Screen::StoryGalactic => Screen::Galactic,
            Screen::Galactic => Screen::StoryAsteroid,
            Screen::StoryAsteroid => Screen::Asteroid,
            Screen::Asteroid => Screen::StoryNavigation,
            Screen::StoryNavigation => Screen::Navigation,
            Screen::Navigation => Screen::StoryFinal,
            Screen::StoryFinal => Screen::Final,
            Screen::Final => Screen::Epilogue,
            Screen::Epilogue => Screen::Welcome,
        }
    }

    pub fn story(self) -> Option<StoryId> {
        match self {
            Screen::StoryTrainer => Some(StoryId::Trainer),
            Screen::StoryGalactic => Some(StoryId::Galactic),
            Screen::StoryAsteroid => Some(StoryId::Asteroid),
            Screen::StoryNavigation => Some(StoryId::Navigation),
            Screen::StoryFinal => Some(StoryId::Final),
            Screen::Epilogue => Some(StoryId::Epilogue),
            _ => None,
        }
    }
}

/// State of the screen on display. Replaced wholesale on every transition,
/// which also drops any timers the old screen had pending.
pub enum Stage {
    Welcome(WelcomeScreen),
    Story(StoryScreen),
    Trainer(TrainerState),
    Galactic(GalacticMission),
    Asteroid(AsteroidMission),
    Navigation(NavigationMission),
    Final(FinalMission),
}

fn welcome_keys(stage: &mut Stage, input: &mut KeyInput) {
    if let Stage::Welcome(screen) = stage {
        screen.handle_key(input);
    }
}

fn story_keys(stage: &mut Stage, input: &mut KeyInput) {
    if let Stage::Story(screen) = stage {
        screen.handle_key(input);
    }
}

fn trainer_keys(stage: &mut Stage, input: &mut KeyInput) {
    if let Stage::Trainer(trainer) = stage {
        trainer.handle_key(input);
    }
}

fn galactic_keys(stage: &mut Stage, input: &mut KeyInput) {
    if let Stage::Galactic(mission) = stage {
        mission.handle_key(input);
    }
}

fn asteroid_keys(stage: &mut Stage, input: &mut KeyInput) {
    if let Stage::Asteroid(mission) = stage {
        mission.handle_key(input);
    }
}

fn navigation_keys(stage: &mut Stage, input: &mut KeyInput) {
    if let Stage::Navigation(mission) = stage {
        mission.handle_key(input);
    }
}

fn final_keys(stage: &mut Stage, input: &mut KeyInput) {
    if let Stage::Final(mission) = stage {
        mission.handle_key(input);
    }
}

fn handler_for(screen: Screen) -> Handler<Stage> {
    match screen {
        Screen::Welcome => Box::new(welcome_keys),
        Screen::Trainer => Box::new(trainer_keys),
        Screen::Galactic => Box::new(galactic_keys),
        Screen::Asteroid => Box::new(asteroid_keys),
        Screen::Navigation => Box::new(navigation_keys),
        Screen::Final => Box::new(final_keys),
        _ => Box::new(story_keys),
    }
}

pub struct App {
    pub screen: Screen,
    pub stage: Stage,
    pub theme: &'static Theme,
    pub config: Config,
    pub stories: StoryBook,
    /// Trainer score carried across the campaign until the epilogue.
    pub score: u32,
    pub should_quit: bool,
    router: HotkeyRouter<Stage>,
    cues: Vec<Cue>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        Self::build(config, SmallRng::from_entropy())
    }

    /// Deterministic shuffles for tests.
    pub fn with_seed(config: Config, seed: u64) -> Result<Self> {
        Self::build(config, SmallRng::seed_from_u64(seed))
    }

    fn build(config: Config, rng: SmallRng) -> Result<Self> {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let stories = StoryBook::bundled()?;

        let mut router = HotkeyRouter::new();
        router.set_handler(Some(handler_for(Screen::Welcome)));

        Ok(Self {
            screen: Screen::Welcome,
            stage: Stage::Welcome(WelcomeScreen::default()),
            theme,
            config,
            stories,
            score: 0,
            should_quit: false,
            router,
            cues: Vec::new(),
            rng,
        })
    }

    /// Swap in the state and key handler of `screen` in one step.
    pub fn go_to(&mut self, screen: Screen, now: Instant) {
        if let Stage::Trainer(trainer) = &self.stage {
            self.score = trainer.score;
        }
        if self.screen == Screen::Epilogue {
            self.score = 0;
        }

        self.stage = match screen {
            Screen::Welcome => Stage::Welcome(WelcomeScreen::default()),
            Screen::Trainer => Stage::Trainer(TrainerState::new(
                self.config.trainer_settings(),
                SmallRng::seed_from_u64(self.rng.next_u64()),
                now,
            )),
            Screen::Galactic => Stage::Galactic(GalacticMission::new(&mut self.rng)),
            Screen::Asteroid => Stage::Asteroid(AsteroidMission::new()),
            Screen::Navigation => Stage::Navigation(NavigationMission::new()),
            Screen::Final => Stage::Final(FinalMission::new()),
            story => match story.story() {
                Some(id) => Stage::Story(StoryScreen::new(id)),
                None => Stage::Welcome(WelcomeScreen::default()),
            },
        };
        self.router.set_handler(Some(handler_for(screen)));
        tracing::info!(from = ?self.screen, to = ?screen, score = self.score, "screen changed");
        self.screen = screen;
    }

    pub fn advance(&mut self, now: Instant) {
        self.go_to(self.screen.next(), now);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match key.kind {
            KeyEventKind::Release => {
                if let Stage::Trainer(trainer) = &mut self.stage {
                    trainer.key_up(&key);
                }
                return;
            }
            // Only process Press events; ignore Repeat to avoid double chords
            KeyEventKind::Repeat => return,
            KeyEventKind::Press => {}
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        let mut input = KeyInput::new(key, now);
        self.router.dispatch(&mut self.stage, &mut input);
        self.settle(now);
    }

    pub fn tick(&mut self, now: Instant) {
        match &mut self.stage {
            Stage::Trainer(trainer) => trainer.tick(now),
            Stage::Navigation(mission) => mission.tick(now),
            Stage::Final(mission) => mission.tick(now),
            _ => {}
        }
        self.settle(now);
    }

    /// Collect cues and follow the screen's request to move on, if any.
    fn settle(&mut self, now: Instant) {
        if let Stage::Trainer(trainer) = &mut self.stage {
            self.cues.extend(trainer.take_cues());
        }

        let done = match &self.stage {
            Stage::Welcome(screen) => {
                if screen.wants_quit() {
                    self.should_quit = true;
                }
                screen.started()
            }
            Stage::Story(screen) => screen.is_done(),
            Stage::Trainer(trainer) => trainer.wants_continue(),
            Stage::Galactic(mission) => mission.wants_continue(),
            Stage::Asteroid(mission) => mission.wants_continue(),
            Stage::Navigation(mission) => mission.wants_continue(),
            Stage::Final(mission) => mission.is_complete(),
        };
        if done && !self.should_quit {
            self.advance(now);
        }
    }

    /// Score for the header. The trainer keeps its own tally until the
    /// screen is left.
    pub fn display_score(&self) -> u32 {
        match &self.stage {
            Stage::Trainer(trainer) => trainer.score,
            _ => self.score,
        }
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn handler_registrations(&self) -> u64 {
        self.router.registrations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::with_seed(Config::default(), 5).unwrap()
    }

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    #[test]
    fn test_transition_table_is_a_single_cycle() {
        let mut screen = Screen::Welcome;
        let mut seen = Vec::new();
        for _ in 0..12 {
            assert!(!seen.contains(&screen));
            seen.push(screen);
            screen = screen.next();
        }
        assert_eq!(screen, Screen::Welcome);
    }

    #[test]
    fn test_story_screens_map_to_stories() {
        assert_eq!(Screen::StoryFinal.story(), Some(StoryId::Final));
        assert_eq!(Screen::Epilogue.story(), Some(StoryId::Epilogue));
        assert_eq!(Screen::Trainer.story(), None);
    }

    #[test]
    fn test_enter_walks_from_welcome_to_trainer() {
        let now = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.screen, Screen::StoryTrainer);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.screen, Screen::Trainer);
        assert!(matches!(app.stage, Stage::Trainer(_)));
    }

    #[test]
    fn test_each_transition_installs_one_handler() {
        let now = Instant::now();
        let mut app = app();
        let before = app.handler_registrations();
        app.advance(now);
        app.advance(now);
        assert_eq!(app.handler_registrations(), before + 2);
    }

    #[test]
    fn test_ctrl_q_quits_anywhere() {
        let now = Instant::now();
        let mut app = app();
        app.go_to(Screen::Galactic, now);
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL), now);
        assert!(app.should_quit);
    }

    #[test]
    fn test_esc_on_welcome_quits() {
        let now = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Esc, now);
        assert!(app.should_quit);
        assert_eq!(app.screen, Screen::Welcome);
    }

    #[test]
    fn test_repeat_events_are_ignored() {
        let now = Instant::now();
        let mut app = app();
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Repeat;
        app.handle_key(key, now);
        assert_eq!(app.screen, Screen::Welcome);
    }

    #[test]
    fn test_trainer_success_emits_cue() {
        let now = Instant::now();
        let mut app = app();
        app.go_to(Screen::Trainer, now);
        let combo = match &app.stage {
            Stage::Trainer(trainer) => trainer.current_task().combo,
            _ => unreachable!(),
        };
        let ch = match combo.key {
            crate::hotkey::combo::KeyToken::Char(ch) => ch,
            _ => unreachable!(),
        };
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL), now);
        assert_eq!(app.drain_cues(), vec![Cue::Success]);
        assert!(app.drain_cues().is_empty());
    }

    #[test]
    fn test_leaving_trainer_keeps_score_until_epilogue() {
        let now = Instant::now();
        let mut app = app();
        app.go_to(Screen::Trainer, now);
        if let Stage::Trainer(trainer) = &mut app.stage {
            trainer.on_success(now);
            trainer.on_success(now);
        }
        app.go_to(Screen::StoryGalactic, now);
        assert_eq!(app.score, 2);
        app.go_to(Screen::Epilogue, now);
        assert_eq!(app.score, 2);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.screen, Screen::Welcome);
        assert_eq!(app.score, 0);
    }

    #[test]
    fn test_display_score_follows_live_trainer() {
        let now = Instant::now();
        let mut app = app();
        app.go_to(Screen::Trainer, now);
        if let Stage::Trainer(trainer) = &mut app.stage {
            trainer.on_success(now);
        }
        assert_eq!(app.score, 0);
        assert_eq!(app.display_score(), 1);
        app.go_to(Screen::StoryGalactic, now);
        assert_eq!(app.display_score(), 1);
    }
}
