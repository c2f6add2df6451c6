use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use keyquest::app::{App, Screen, Stage};
use keyquest::config::Config;
use keyquest::hotkey::combo::KeyToken;
use keyquest::mission::asteroid::Focus as AsteroidFocus;
use keyquest::mission::final_mission::{self, COMPLETE_DELAY, Focus as FinalFocus, REQUIRED_CODES, SIGNAL};
use keyquest::mission::galactic::{CODES, Focus as GalacticFocus};
use keyquest::mission::navigation::{STORM_DELAY, STORM_ROUTE, TARGET_ROUTES};

fn new_app() -> App {
    let config = Config {
        trainer_seconds: 5,
        ..Config::default()
    };
    App::with_seed(config, 42).unwrap()
}

fn press(app: &mut App, code: KeyCode, at: Instant) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), at);
}

fn ctrl(app: &mut App, ch: char, at: Instant) {
    app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL), at);
}

fn type_text(app: &mut App, text: &str, at: Instant) {
    for ch in text.chars() {
        let code = if ch == '\n' { KeyCode::Enter } else { KeyCode::Char(ch) };
        press(app, code, at);
    }
}

fn play_trainer(app: &mut App, start: Instant) -> Instant {
    for _ in 0..3 {
        let ch = match &app.stage {
            Stage::Trainer(trainer) => match trainer.current_task().combo.key {
                KeyToken::Char(ch) => ch,
                other => panic!("unexpected trainer key {other:?}"),
            },
            _ => panic!("not on the trainer"),
        };
        ctrl(app, ch, start);
    }
    let mut now = start;
    for _ in 0..5 {
        now += Duration::from_secs(1);
        app.tick(now);
    }
    match &app.stage {
        Stage::Trainer(trainer) => assert!(trainer.is_finished()),
        _ => panic!("trainer left early"),
    }
    press(app, KeyCode::Enter, now);
    now
}

fn play_galactic(app: &mut App, now: Instant) {
    let secrets: Vec<&str> = match &app.stage {
        Stage::Galactic(mission) => mission.secrets().to_vec(),
        _ => panic!("not on the galactic screen"),
    };
    for (field, secret) in secrets.iter().enumerate() {
        let idx = CODES
            .iter()
            .position(|code| code.starts_with(&format!("{secret}-")))
            .unwrap();
        if let Stage::Galactic(mission) = &mut app.stage {
            mission.set_focus(GalacticFocus::Code(idx));
        }
        press(app, KeyCode::Enter, now);
        ctrl(app, 'c', now);
        if let Stage::Galactic(mission) = &mut app.stage {
            mission.set_focus(GalacticFocus::Field(field));
        }
        ctrl(app, 'v', now);
    }
    match &app.stage {
        Stage::Galactic(mission) => assert!(mission.is_won()),
        _ => panic!("galactic left early"),
    }
    press(app, KeyCode::Enter, now);
}

fn play_asteroid(app: &mut App, now: Instant) {
    for idx in 0..3 {
        if let Stage::Asteroid(mission) = &mut app.stage {
            mission.set_focus(AsteroidFocus::Packet(idx));
        }
        ctrl(app, 'a', now);
        ctrl(app, 'x', now);
        if let Stage::Asteroid(mission) = &mut app.stage {
            mission.set_focus(AsteroidFocus::Archive(idx));
        }
        ctrl(app, 'v', now);
    }
    match &app.stage {
        Stage::Asteroid(mission) => assert!(mission.is_won()),
        _ => panic!("asteroid left early"),
    }
    press(app, KeyCode::Enter, now);
}

fn play_navigation(app: &mut App, start: Instant) -> Instant {
    for idx in 0..3 {
        if let Stage::Navigation(mission) = &mut app.stage {
            mission.set_focus(idx);
        }
        ctrl(app, 'u', start);
        type_text(app, TARGET_ROUTES[idx], start);
        ctrl(app, 's', start);
    }

    let struck = start + STORM_DELAY;
    app.tick(struck);
    if let Stage::Navigation(mission) = &mut app.stage {
        assert!(!mission.is_complete());
        mission.set_focus(STORM_ROUTE);
    }
    ctrl(app, 'z', struck);
    ctrl(app, 's', struck);
    match &app.stage {
        Stage::Navigation(mission) => assert!(mission.is_complete()),
        _ => panic!("navigation left early"),
    }
    press(app, KeyCode::Enter, struck);
    struck
}

fn locate(code: &str) -> (usize, usize) {
    for (line_idx, line) in SIGNAL.iter().enumerate() {
        for (word_idx, range) in final_mission::words(line).iter().enumerate() {
            if line[range.clone()].contains(code) {
                return (line_idx, word_idx);
            }
        }
    }
    panic!("{code} not in signal");
}

fn play_final(app: &mut App, now: Instant) -> Instant {
    for (slot, code) in REQUIRED_CODES.iter().enumerate() {
        let (line, word) = locate(code);
        if let Stage::Final(mission) = &mut app.stage {
            mission.select(line, word, word);
        }
        ctrl(app, 'x', now);
        if let Stage::Final(mission) = &mut app.stage {
            mission.set_focus(FinalFocus::Slot(slot));
        }
        ctrl(app, 'v', now);
    }
    ctrl(app, 's', now);
    assert_eq!(app.screen, Screen::Final);

    let done = now + COMPLETE_DELAY;
    app.tick(done);
    done
}

#[test]
fn full_campaign_reaches_epilogue_and_loops() {
    let start = Instant::now();
    let mut app = new_app();
    assert_eq!(app.screen, Screen::Welcome);

    press(&mut app, KeyCode::Enter, start);
    assert_eq!(app.screen, Screen::StoryTrainer);
    press(&mut app, KeyCode::Enter, start);
    assert_eq!(app.screen, Screen::Trainer);

    let now = play_trainer(&mut app, start);
    assert_eq!(app.screen, Screen::StoryGalactic);
    assert_eq!(app.score, 3);

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.screen, Screen::Galactic);
    play_galactic(&mut app, now);
    assert_eq!(app.screen, Screen::StoryAsteroid);

    press(&mut app, KeyCode::Enter, now);
    play_asteroid(&mut app, now);
    assert_eq!(app.screen, Screen::StoryNavigation);

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.screen, Screen::Navigation);
    let now = play_navigation(&mut app, now);
    assert_eq!(app.screen, Screen::StoryFinal);

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.screen, Screen::Final);
    let now = play_final(&mut app, now);
    assert_eq!(app.screen, Screen::Epilogue);
    assert_eq!(app.score, 3);

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.screen, Screen::Welcome);
    assert_eq!(app.score, 0);
    assert!(!app.should_quit);
}

#[test]
fn leaving_a_mission_drops_its_timers() {
    let now = Instant::now();
    let mut app = new_app();
    app.go_to(Screen::Navigation, now);
    if let Stage::Navigation(mission) = &mut app.stage {
        mission.set_focus(STORM_ROUTE);
    }
    ctrl(&mut app, 'u', now);
    type_text(&mut app, TARGET_ROUTES[STORM_ROUTE], now);
    ctrl(&mut app, 's', now);

    app.go_to(Screen::StoryFinal, now);
    app.tick(now + Duration::from_secs(10));
    assert_eq!(app.screen, Screen::StoryFinal);
    assert!(matches!(app.stage, Stage::Story(_)));
}

#[test]
fn ctrl_q_quits_mid_mission() {
    let now = Instant::now();
    let mut app = new_app();
    app.go_to(Screen::Asteroid, now);
    ctrl(&mut app, 'q', now);
    assert!(app.should_quit);
    assert_eq!(app.screen, Screen::Asteroid);
}
