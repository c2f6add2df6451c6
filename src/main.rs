use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing_subscriber::EnvFilter;

use keyquest::app::{App, Screen, Stage};
use keyquest::audio::Chime;
use keyquest::config::Config;
use keyquest::event::{AppEvent, EventHandler};
use keyquest::ui::components::asteroid_panel::AsteroidPanel;
use keyquest::ui::components::code_board::CodeBoard;
use keyquest::ui::components::route_editor::RouteEditor;
use keyquest::ui::components::signal_panel::SignalPanel;
use keyquest::ui::components::story_card::StoryCard;
use keyquest::ui::components::trainer_panel::TrainerPanel;
use keyquest::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use keyquest::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "keyquest", version, about = "Keyboard-shortcut adventure for young pilots")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Seconds on the trainer clock")]
    seconds: Option<u32>,

    #[arg(short, long, help = "Turn off the terminal bell")]
    mute: bool,

    #[arg(long, help = "Write logs here instead of the data directory")]
    log_file: Option<PathBuf>,
}

fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyquest")
        .join("keyquest.log")
}

/// Logs go to a file; the terminal belongs to the TUI.
fn init_logging(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_result = Config::load();
    let mut config = match &config_result {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Err(err) = init_logging(&log_path, &config.log_level) {
        eprintln!("logging disabled: {err:#}");
    }
    if let Err(err) = config_result {
        tracing::warn!(error = %err, "could not read config, using defaults");
    }

    if let Some(seconds) = cli.seconds {
        config.trainer_seconds = seconds;
    }
    if cli.mute {
        config.sound = false;
    }

    let mut app = App::new(config)?;
    if let Some(theme_name) = cli.theme {
        match Theme::load(&theme_name) {
            Some(theme) => app.theme = Box::leak(Box::new(theme)),
            None => tracing::warn!(theme = %theme_name, "unknown theme"),
        }
    }
    tracing::info!(theme = %app.theme.name, seconds = app.config.trainer_seconds, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events drive the on-screen keyboard when the terminal has them
    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(app.config.tick_rate());
    let mut chime = Chime::new(app.config.sound);

    let result = run_app(&mut terminal, &mut app, &events, &mut chime);

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "exited with error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    chime: &mut Chime,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => app.handle_key(key, Instant::now()),
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize => {}
        }

        for cue in app.drain_cues() {
            chime.play(cue);
        }

        if app.should_quit {
            tracing::info!(screen = ?app.screen, "quit");
            return Ok(());
        }
    }
}

fn hints(screen: Screen) -> &'static [&'static str] {
    match screen {
        Screen::Welcome => &["[Enter] Start", "[Esc] Quit"],
        Screen::Trainer => &["Press the shortcut shown", "[Ctrl+Q] Quit"],
        Screen::Galactic => &[
            "[Arrows/Tab] Move",
            "[Enter] Pick code",
            "[Ctrl+F] Search",
            "[Ctrl+C] Copy",
            "[Ctrl+V] Paste",
            "[Backspace] Clear field",
            "[Ctrl+Q] Quit",
        ],
        Screen::Asteroid => &[
            "[Arrows/Tab] Move",
            "[Ctrl+A] Select all",
            "[Ctrl+X] Cut",
            "[Ctrl+V] Paste",
            "[Ctrl+Q] Quit",
        ],
        Screen::Navigation => &[
            "[Tab] Next route",
            "[Ctrl+S] Save",
            "[Ctrl+Z] Undo storm",
            "[Ctrl+Q] Quit",
        ],
        Screen::Final => &[
            "[Arrows] Move",
            "[Shift+Arrows] Select",
            "[Ctrl+A] Select line",
            "[Ctrl+F] Search",
            "[Ctrl+C/X/V] Copy/Cut/Paste",
            "[Ctrl+Z] Undo",
            "[Ctrl+S] Save",
            "[Tab] Slots",
            "[Ctrl+Q] Quit",
        ],
        _ => &["[Enter] Continue", "[Ctrl+Q] Quit"],
    }
}

fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Welcome => "Welcome",
        Screen::Trainer => "Shortcut Trainer",
        Screen::Galactic => "Galactic Message",
        Screen::Asteroid => "Asteroid Archive",
        Screen::Navigation => "Navigation Routes",
        Screen::Final => "Final Signal",
        _ => "Story",
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hint_lines = pack_hint_lines(hints(app.screen), area.width as usize);
    let layout = AppLayout::new(area, hint_lines.len() as u16);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " keyquest ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} | Score {}", screen_title(app.screen), app.display_score()),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    match &app.stage {
        Stage::Welcome(_) => {
            let card = centered_rect(60, 50, layout.main);
            frame.render_widget(StoryCard::welcome(app.theme), card);
        }
        Stage::Story(screen) => {
            let card = centered_rect(70, 60, layout.main);
            frame.render_widget(StoryCard::new(app.stories.get(screen.id), app.theme), card);
        }
        Stage::Trainer(trainer) => {
            let panel = TrainerPanel::new(trainer, app.config.trainer_seconds, app.theme);
            frame.render_widget(panel, layout.main);
        }
        Stage::Galactic(mission) => {
            frame.render_widget(CodeBoard::new(mission, app.theme), layout.main);
        }
        Stage::Asteroid(mission) => {
            frame.render_widget(AsteroidPanel::new(mission, app.theme), layout.main);
        }
        Stage::Navigation(mission) => {
            frame.render_widget(RouteEditor::new(mission, app.theme), layout.main);
        }
        Stage::Final(mission) => {
            frame.render_widget(SignalPanel::new(mission, app.theme), layout.main);
        }
    }

    let footer_lines: Vec<Line> = hint_lines
        .into_iter()
        .map(|line| {
            Line::from(Span::styled(
                line,
                Style::default().fg(colors.text_pending()),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), layout.footer);
}
