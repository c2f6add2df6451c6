use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

pub const DEFAULT_THEME: &str = "cosmos";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_pending: String,
    pub focused_key: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub highlight_bg: String,
    pub highlight_fg: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// User themes under `<config>/keyquest/themes/` shadow the bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("keyquest")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => {
                        tracing::warn!(path = %user_theme_path.display(), %err, "ignoring bad theme file")
                    }
                }
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#0b1026".to_string(),
            fg: "#e6e9ff".to_string(),
            text_correct: "#7ee8a1".to_string(),
            text_incorrect: "#ff6f91".to_string(),
            text_pending: "#5c6391".to_string(),
            focused_key: "#ffd166".to_string(),
            accent: "#7aa2ff".to_string(),
            accent_dim: "#2a3163".to_string(),
            border: "#2a3163".to_string(),
            border_focused: "#7aa2ff".to_string(),
            header_bg: "#161d45".to_string(),
            header_fg: "#e6e9ff".to_string(),
            bar_filled: "#c792ea".to_string(),
            bar_empty: "#161d45".to_string(),
            highlight_bg: "#ffd166".to_string(),
            highlight_fg: "#0b1026".to_string(),
            error: "#ff6f91".to_string(),
            warning: "#ffd166".to_string(),
            success: "#7ee8a1".to_string(),
        }
    }
}

impl ThemeColors {
    /// `#rrggbb` to an RGB color. Anything else (including `reset`) falls
    /// back to the terminal's own color.
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::Reset
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_correct(&self) -> Color { Self::parse_color(&self.text_correct) }
    pub fn text_incorrect(&self) -> Color { Self::parse_color(&self.text_incorrect) }
    pub fn text_pending(&self) -> Color { Self::parse_color(&self.text_pending) }
    pub fn focused_key(&self) -> Color { Self::parse_color(&self.focused_key) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn highlight_bg(&self) -> Color { Self::parse_color(&self.highlight_bg) }
    pub fn highlight_fg(&self) -> Color { Self::parse_color(&self.highlight_fg) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
