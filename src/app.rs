use crate::command::Command;
use crate::config::Config;
use crate::engine::{Direction, GameEngine, GameState};
use crate::highscore::HighScoreFile;
use crate::ticker::Ticker;
use crate::view::{GameScreen, LatestSnapshot};
use crossterm::event::{poll, read, Event};
use log::info;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

pub(crate) type Engine = GameEngine<rand::rngs::ThreadRng, HighScoreFile, Ticker, LatestSnapshot>;

/// The terminal front end: feeds key presses and due ticks to the engine and
/// draws whatever it last emitted
#[derive(Debug)]
pub(crate) struct App {
    engine: Engine,
    quitting: bool,
}

impl App {
    pub(crate) fn new(config: &Config) -> App {
        App::with_engine(GameEngine::new(
            rand::rng(),
            config.high_score_store(),
            Ticker::new(),
            LatestSnapshot::default(),
            config.speed_up,
        ))
    }

    pub(crate) fn high_score_path(&self) -> Option<&std::path::Path> {
        self.engine.store().path()
    }

    fn with_engine(engine: Engine) -> App {
        App {
            engine,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self.screen(), frame.area()))?;
        Ok(())
    }

    fn screen(&self) -> GameScreen<'_> {
        match self.engine.view().latest() {
            Some(snap) => GameScreen::Run(snap),
            None => GameScreen::Idle {
                high_score: self.engine.high_score(),
            },
        }
    }

    /// Wait for either the next key press or the next tick, whichever comes
    /// first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        if let Some(when) = self.engine.ticker().deadline() {
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                if self.engine.ticker_mut().fire(Instant::now()) {
                    self.engine.tick();
                }
                return Ok(());
            }
        }
        self.handle_event(read()?);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return;
        };
        match cmd {
            Command::Quit => {
                info!("Quitting");
                self.quitting = true;
            }
            Command::Up => self.engine.set_direction(Direction::Up),
            Command::Down => self.engine.set_direction(Direction::Down),
            Command::Left => self.engine.set_direction(Direction::Left),
            Command::Right => self.engine.set_direction(Direction::Right),
            Command::Start => {
                if self.engine.state() != GameState::Playing {
                    self.engine.start();
                }
            }
            Command::Restart => self.engine.start(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SpeedUpPolicy;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn new_app() -> App {
        App::with_engine(GameEngine::new(
            rand::rng(),
            HighScoreFile::disabled(),
            Ticker::new(),
            LatestSnapshot::default(),
            SpeedUpPolicy::Restart,
        ))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn idle_until_space() {
        let mut app = new_app();
        assert_eq!(app.screen(), GameScreen::Idle { high_score: 0 });
        assert_eq!(app.engine.ticker().deadline(), None);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.engine.state(), GameState::Idle);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.engine.state(), GameState::Playing);
        assert!(
            app.engine.ticker().deadline().is_some(),
            "no tick was scheduled"
        );
        assert!(
            matches!(app.screen(), GameScreen::Run(snap) if snap.score == 0),
            "screen should show the new run"
        );
    }

    #[test]
    fn space_does_not_restart_a_run() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char(' '));
        app.engine.tick();
        let before = app.engine.snapshot();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.engine.snapshot(), before);
    }

    #[test]
    fn r_restarts_a_run() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Down);
        app.engine.tick();
        press(&mut app, KeyCode::Char('r'));
        let snap = app.engine.snapshot().expect("run should have started");
        assert_eq!(snap.snake, [crate::consts::SNAKE_START]);
        assert_eq!(snap.direction, Direction::Right);
    }

    #[test]
    fn arrow_keys_steer() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Up);
        app.engine.tick();
        let snap = app.engine.snapshot().expect("run should have started");
        assert_eq!(snap.direction, Direction::Up);
    }

    #[test]
    fn disabled_store_has_no_path() {
        assert_eq!(new_app().high_score_path(), None);
    }

    #[test]
    fn q_quits() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.quitting, "app should be quitting");
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = new_app();
        app.handle_event(Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
            crossterm::event::KeyEventKind::Release,
        )));
        assert_eq!(app.engine.state(), GameState::Idle);
    }
}
