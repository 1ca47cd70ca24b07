use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::VecDeque;
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::assets::Sprites;
use crate::audio::{AudioSink, Cue, play_or_log};
use crate::game::{Direction, GameEngine, InputEvent};
use crate::input::{KeyAction, spawn_key_reader};
use crate::render::Renderer;
use crate::scheduler::{Signal, Ticker};

pub struct HumanMode {
    engine: GameEngine,
    renderer: Renderer,
    audio: Box<dyn AudioSink>,
    /// Directions pressed since the last tick, oldest first
    pending: VecDeque<Direction>,
    should_quit: bool,
}

impl HumanMode {
    pub fn with_engine(engine: GameEngine, sprites: Sprites, audio: Box<dyn AudioSink>) -> Self {
        Self {
            engine,
            renderer: Renderer::new(sprites),
            audio,
            pending: VecDeque::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let period = Duration::from_millis(self.engine.config().tick_ms);
        let mut ticker = Ticker::new(period, tx.clone());
        let key_reader = spawn_key_reader(tx);

        info!("game started");
        play_or_log(self.audio.as_mut(), Cue::Start);
        ticker.start();
        self.draw(terminal)?;

        loop {
            tokio::select! {
                maybe_signal = rx.recv() => {
                    match maybe_signal {
                        Some(signal) => self.handle_signal(signal, &mut ticker),
                        None => self.should_quit = true,
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            self.draw(terminal)?;
        }

        ticker.stop();
        key_reader.abort();
        info!("quitting");
        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let snapshot = self.engine.snapshot();
        terminal
            .draw(|frame| self.renderer.render(frame, &snapshot))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_signal(&mut self, signal: Signal, ticker: &mut Ticker) {
        match signal {
            Signal::Tick => self.update_game(ticker),
            Signal::Key(KeyAction::Game(InputEvent::Move(direction))) => {
                self.pending.push_back(direction);
            }
            Signal::Key(KeyAction::Game(InputEvent::Restart)) => self.restart_game(ticker),
            Signal::Key(KeyAction::Quit) => self.should_quit = true,
            Signal::Key(KeyAction::None) | Signal::Redraw => {}
        }
    }

    fn update_game(&mut self, ticker: &mut Ticker) {
        for direction in self.pending.drain(..) {
            self.engine.set_direction(direction);
        }

        let outcome = self.engine.tick();
        for cue in &outcome.cues {
            play_or_log(self.audio.as_mut(), *cue);
        }

        if outcome.is_game_over() {
            ticker.stop();
        }
    }

    fn restart_game(&mut self, ticker: &mut Ticker) {
        if let Some(cue) = self.engine.restart() {
            self.pending.clear();
            play_or_log(self.audio.as_mut(), cue);
            ticker.start();
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioError;
    use crate::game::{GameConfig, GameStatus, Position, Snake};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Cue>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            self.0.borrow_mut().push(cue);
            Ok(())
        }
    }

    fn mode_at(head: Position, direction: Option<Direction>) -> (HumanMode, Recorder) {
        let engine = GameEngine::from_parts(
            GameConfig::small(),
            Snake::new(head, 3),
            Position::new(0, 9),
            direction,
        );
        let recorder = Recorder::default();
        let mode = HumanMode::with_engine(engine, Sprites::default(), Box::new(recorder.clone()));
        (mode, recorder)
    }

    fn ticker() -> (Ticker, mpsc::UnboundedReceiver<Signal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Ticker::new(Duration::from_millis(140), tx), rx)
    }

    fn key(event: InputEvent) -> Signal {
        Signal::Key(KeyAction::Game(event))
    }

    #[tokio::test]
    async fn test_directions_wait_for_tick() {
        let (mut mode, _) = mode_at(Position::new(5, 5), None);
        let (mut ticker, _rx) = ticker();

        mode.handle_signal(key(InputEvent::Move(Direction::Up)), &mut ticker);
        mode.handle_signal(key(InputEvent::Move(Direction::Down)), &mut ticker);
        assert_eq!(mode.engine.direction(), None);

        mode.handle_signal(Signal::Tick, &mut ticker);
        // Down was a reversal of Up and got dropped
        assert_eq!(mode.engine.direction(), Some(Direction::Up));
        assert_eq!(mode.engine.head(), Position::new(5, 4));
        assert!(mode.pending.is_empty());
    }

    #[tokio::test]
    async fn test_game_over_stops_ticker() {
        let (mut mode, recorder) = mode_at(Position::new(10, 5), Some(Direction::Right));
        let (mut ticker, _rx) = ticker();
        ticker.start();

        mode.handle_signal(Signal::Tick, &mut ticker);

        assert_eq!(mode.engine.status(), GameStatus::GameOver);
        assert!(!ticker.is_running());
        assert_eq!(*recorder.0.borrow(), vec![Cue::Loss]);
    }

    #[tokio::test]
    async fn test_restart_after_game_over() {
        let (mut mode, recorder) = mode_at(Position::new(-1, 5), Some(Direction::Left));
        let (mut ticker, _rx) = ticker();

        mode.handle_signal(Signal::Tick, &mut ticker);
        mode.handle_signal(key(InputEvent::Move(Direction::Down)), &mut ticker);
        mode.handle_signal(key(InputEvent::Restart), &mut ticker);

        assert!(mode.engine.is_running());
        assert_eq!(mode.engine.length(), 3);
        assert_eq!(mode.engine.direction(), None);
        assert!(mode.pending.is_empty());
        assert!(ticker.is_running());
        assert_eq!(*recorder.0.borrow(), vec![Cue::Loss, Cue::Start]);
    }

    #[tokio::test]
    async fn test_restart_ignored_while_running() {
        let (mut mode, recorder) = mode_at(Position::new(5, 5), Some(Direction::Up));
        let (mut ticker, _rx) = ticker();

        mode.handle_signal(key(InputEvent::Restart), &mut ticker);

        assert!(!ticker.is_running());
        assert_eq!(mode.engine.head(), Position::new(5, 5));
        assert!(recorder.0.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_quit() {
        let (mut mode, _) = mode_at(Position::new(5, 5), None);
        let (mut ticker, _rx) = ticker();

        mode.handle_signal(Signal::Key(KeyAction::Quit), &mut ticker);
        assert!(mode.should_quit);
    }
}
