use std::collections::HashMap;

use crossterm::event::KeyCode;
use rust_embed::Embed;
use serde::Deserialize;
use thiserror::Error;

use crate::hotkey::KeyInput;

#[derive(Embed)]
#[folder = "assets/stories/"]
struct StoryAssets;

const STORY_FILE: &str = "stories.toml";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoryId {
    Trainer,
    Galactic,
    Asteroid,
    Navigation,
    Final,
    Epilogue,
}

impl StoryId {
    pub const ALL: [StoryId; 6] = [
        StoryId::Trainer,
        StoryId::Galactic,
        StoryId::Asteroid,
        StoryId::Navigation,
        StoryId::Final,
        StoryId::Epilogue,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StoryId::Trainer => "trainer",
            StoryId::Galactic => "galactic",
            StoryId::Asteroid => "asteroid",
            StoryId::Navigation => "navigation",
            StoryId::Final => "final",
            StoryId::Epilogue => "epilogue",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("bundled story file {0} is missing")]
    MissingFile(&'static str),
    #[error("story file is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("could not parse story file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no story for `{0}`")]
    MissingStory(&'static str),
    #[error("story `{0}` has no text")]
    EmptyStory(&'static str),
}

fn default_prompt() -> String {
    "Press Enter to continue".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct Story {
    pub title: String,
    pub body: Vec<String>,
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

/// Every narrative screen, checked complete at load time.
#[derive(Clone, Debug)]
pub struct StoryBook {
    stories: Vec<Story>,
}

impl StoryBook {
    pub fn bundled() -> Result<Self, StoryError> {
        let file = StoryAssets::get(STORY_FILE).ok_or(StoryError::MissingFile(STORY_FILE))?;
        let content = std::str::from_utf8(file.data.as_ref())?;
        Self::from_toml(content)
    }

    pub fn from_toml(content: &str) -> Result<Self, StoryError> {
        let mut parsed: HashMap<String, Story> = toml::from_str(content)?;
        let mut stories = Vec::with_capacity(StoryId::ALL.len());
        for id in StoryId::ALL {
            let story = parsed
                .remove(id.key())
                .ok_or(StoryError::MissingStory(id.key()))?;
            if story.body.iter().all(|p| p.trim().is_empty()) {
                return Err(StoryError::EmptyStory(id.key()));
            }
            stories.push(story);
        }
        Ok(Self { stories })
    }

    pub fn get(&self, id: StoryId) -> &Story {
        &self.stories[id.index()]
    }
}

/// Title screen. Enter starts the campaign, Esc leaves.
#[derive(Clone, Debug, Default)]
pub struct WelcomeScreen {
    started: bool,
    quit: bool,
}

impl WelcomeScreen {
    pub fn handle_key(&mut self, input: &mut KeyInput) {
        match input.code() {
            KeyCode::Enter | KeyCode::Char(' ') => {
                input.prevent_default();
                self.started = true;
            }
            KeyCode::Esc => {
                input.prevent_default();
                self.quit = true;
            }
            _ => {}
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn wants_quit(&self) -> bool {
        self.quit
    }
}

/// Narrative interstitial. Enter or Space moves on.
#[derive(Clone, Debug)]
pub struct StoryScreen {
    pub id: StoryId,
    done: bool,
}

impl StoryScreen {
    pub fn new(id: StoryId) -> Self {
        Self { id, done: false }
    }

    pub fn handle_key(&mut self, input: &mut KeyInput) {
        if matches!(input.code(), KeyCode::Enter | KeyCode::Char(' ')) && !input.is_command() {
            input.prevent_default();
            self.done = true;
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_bundled_stories_cover_every_screen() {
        let book = StoryBook::bundled().unwrap();
        for id in StoryId::ALL {
            let story = book.get(id);
            assert!(!story.title.is_empty(), "{id:?} has no title");
            assert!(!story.body.is_empty());
        }
        assert_eq!(book.get(StoryId::Galactic).prompt, "Press Enter to continue");
    }

    #[test]
    fn test_missing_story_is_reported() {
        let err = StoryBook::from_toml("[trainer]\ntitle = \"t\"\nbody = [\"b\"]\n").unwrap_err();
        assert!(matches!(err, StoryError::MissingStory("galactic")));
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let err = StoryBook::from_toml("[trainer").unwrap_err();
        assert!(matches!(err, StoryError::Parse(_)));
    }

    #[test]
    fn test_story_screen_finishes_on_enter() {
        let now = Instant::now();
        let mut screen = StoryScreen::new(StoryId::Asteroid);
        screen.handle_key(&mut KeyInput::key(KeyCode::Char('x'), now));
        assert!(!screen.is_done());
        screen.handle_key(&mut KeyInput::key(KeyCode::Enter, now));
        assert!(screen.is_done());
    }

    #[test]
    fn test_welcome_start_and_quit() {
        let now = Instant::now();
        let mut welcome = WelcomeScreen::default();
        welcome.handle_key(&mut KeyInput::key(KeyCode::Esc, now));
        assert!(welcome.wants_quit());
        welcome.handle_key(&mut KeyInput::key(KeyCode::Enter, now));
        assert!(welcome.started());
    }
}
