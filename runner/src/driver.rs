use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use snake_common::games::snake::{GameSession, GameStatus, SessionEvent, TickOutcome};
use snake_common::persistence::BestScoreStore;
use snake_common::{debug_log, log};

use crate::frame::render_frame;
use crate::input::DriverCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the session and plays the external collaborators around it: the tick
/// scheduler, the input sink and the best-score persistence.
pub struct Driver<S: BestScoreStore> {
    session: GameSession,
    store: S,
    persisted_best: u32,
    max_ticks: Option<u64>,
    ticks_run: u64,
    print_frames: bool,
}

impl<S: BestScoreStore> Driver<S> {
    pub fn new(session: GameSession, store: S, max_ticks: Option<u64>, print_frames: bool) -> Self {
        let persisted_best = session.best_score();
        Self {
            session,
            store,
            persisted_best,
            max_ticks,
            ticks_run: 0,
            print_frames,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn handle_command(&mut self, command: DriverCommand) -> Flow {
        match command {
            DriverCommand::Turn(direction) => {
                if !self.session.request_direction(direction) {
                    debug_log!("Ignored turn to {:?}", direction);
                }
            }
            DriverCommand::TogglePause => {
                if self.session.status() != GameStatus::Over {
                    let status = self.session.toggle_pause();
                    log!("Status: {:?}", status);
                    self.print_frame();
                }
            }
            DriverCommand::Restart => {
                self.persist_best_score();
                self.session.restart();
                self.print_frame();
            }
            DriverCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Runs one tick if the session is active. Paused and finished sessions are
    /// left alone.
    pub fn tick(&mut self) -> Flow {
        if self.session.status() != GameStatus::Active {
            return Flow::Continue;
        }

        let outcome = self.session.on_tick();
        self.ticks_run += 1;

        for event in self.session.take_events() {
            match event {
                SessionEvent::FoodEaten { score, .. } => log!("Score: {}", score),
                SessionEvent::SpeedChanged { tick_interval } => {
                    log!("Speed up: {}ms per tick", tick_interval.as_millis())
                }
                SessionEvent::BestScoreBeaten { best_score } => {
                    log!("New best score: {}", best_score);
                    self.persist_best_score();
                }
                SessionEvent::RivalCrashed { crash } => debug_log!("Rival crash: {:?}", crash),
                SessionEvent::GameOver { reason, final_score } => {
                    log!("Game over ({}), final score {}", reason, final_score);
                    self.persist_best_score();
                }
            }
        }

        self.print_frame();

        if let TickOutcome::Over { .. } = outcome {
            log!("Press r to restart or q to quit");
        }

        match self.max_ticks {
            Some(max_ticks) if self.ticks_run >= max_ticks => Flow::Quit,
            _ => Flow::Continue,
        }
    }

    /// Store failures are logged and otherwise ignored; gameplay never depends
    /// on them.
    pub fn persist_best_score(&mut self) {
        let best_score = self.session.best_score();
        if best_score <= self.persisted_best {
            return;
        }

        match self.store.save_best_score(best_score) {
            Ok(()) => {
                self.persisted_best = best_score;
                debug_log!("Best score {} saved", best_score);
            }
            Err(e) => log!("Failed to save best score: {}", e),
        }
    }

    /// Ticks on the session's current interval, read again after every tick,
    /// and applies commands as they arrive in between. Returns once quit is
    /// requested, the tick limit is hit, `shutdown` resolves, or input is closed
    /// while the game is over.
    pub async fn run(
        mut self,
        mut command_rx: mpsc::UnboundedReceiver<DriverCommand>,
        shutdown: impl Future<Output = ()>,
    ) -> GameSession {
        tokio::pin!(shutdown);
        let mut input_open = true;
        let mut next_tick = Instant::now() + self.session.tick_interval();

        self.print_frame();

        loop {
            tokio::select! {
                _ = sleep_until(next_tick) => {
                    if self.tick() == Flow::Quit {
                        break;
                    }
                    if !input_open && self.session.status() == GameStatus::Over {
                        break;
                    }
                    next_tick = Instant::now() + self.session.tick_interval();
                }
                command = command_rx.recv(), if input_open => {
                    match command {
                        Some(command) => {
                            if self.handle_command(command) == Flow::Quit {
                                break;
                            }
                        }
                        None => {
                            debug_log!("Input closed");
                            input_open = false;
                            if self.session.status() == GameStatus::Over {
                                break;
                            }
                        }
                    }
                }
                _ = &mut shutdown => {
                    log!("Shutdown requested");
                    break;
                }
            }
        }

        self.persist_best_score();
        self.session
    }

    fn print_frame(&self) {
        if self.print_frames {
            println!("{}", render_frame(&self.session));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use snake_common::games::SessionRng;
    use snake_common::games::snake::{
        Board, DeathReason, Difficulty, Direction, Point, Snake, SnakeGameState,
        SnakeSessionSettings,
    };
    use snake_common::persistence::{MemoryBestScoreStore, PersistenceError};

    struct FailingStore;

    impl BestScoreStore for FailingStore {
        fn load_best_score(&self) -> Result<u32, PersistenceError> {
            Err(PersistenceError::Storage("disk unavailable".to_string()))
        }

        fn save_best_score(&self, _score: u32) -> Result<(), PersistenceError> {
            Err(PersistenceError::Storage("disk unavailable".to_string()))
        }
    }

    /// Player one cell from food at the right edge: eats, then hits the wall.
    fn doomed_session(best_score: u32) -> GameSession {
        let mut settings =
            SnakeSessionSettings::for_difficulty(Board::new(10, 10), Difficulty::Easy);
        settings.initial_tick_interval = Duration::from_millis(50);
        let player = Snake::new(Point::new(8, 5), Direction::Right);
        let state = SnakeGameState::from_parts(&settings, player, Point::new(9, 5));
        GameSession::from_state(settings, state, best_score, SessionRng::new(4))
    }

    fn open_session() -> GameSession {
        let mut settings =
            SnakeSessionSettings::for_difficulty(Board::new(12, 12), Difficulty::Easy);
        settings.initial_tick_interval = Duration::from_millis(50);
        GameSession::new(settings, 0, SessionRng::new(4))
    }

    #[test]
    fn test_game_over_saves_new_best() {
        let store = MemoryBestScoreStore::in_memory("tester");
        let mut driver = Driver::new(doomed_session(0), store, None, false);

        driver.tick();
        driver.tick();

        assert_eq!(driver.session().status(), GameStatus::Over);
        assert_eq!(driver.store.load_best_score().unwrap(), 1);
    }

    #[test]
    fn test_new_best_saved_while_game_continues() {
        let store = MemoryBestScoreStore::in_memory("tester");
        let mut driver = Driver::new(doomed_session(0), store, None, false);

        driver.tick();

        assert_eq!(driver.session().status(), GameStatus::Active);
        assert_eq!(driver.session().best_score(), 1);
        assert_eq!(driver.store.load_best_score().unwrap(), 1);
    }

    #[test]
    fn test_lower_score_is_not_saved() {
        let store = MemoryBestScoreStore::in_memory("tester");
        let mut driver = Driver::new(doomed_session(5), store, None, false);

        driver.tick();
        driver.tick();

        assert_eq!(driver.store.load_best_score().unwrap(), 0);
    }

    #[test]
    fn test_store_failure_does_not_affect_game() {
        let mut driver = Driver::new(doomed_session(0), FailingStore, None, false);

        driver.tick();
        driver.tick();

        assert_eq!(
            driver.session().death_reason(),
            Some(DeathReason::WallCollision)
        );
        assert_eq!(driver.session().best_score(), 1);

        assert_eq!(driver.handle_command(DriverCommand::Restart), Flow::Continue);
        assert_eq!(driver.session().status(), GameStatus::Active);
        assert_eq!(driver.session().best_score(), 1);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let store = MemoryBestScoreStore::in_memory("tester");
        let mut driver = Driver::new(open_session(), store, None, false);

        driver.handle_command(DriverCommand::TogglePause);
        driver.tick();

        assert_eq!(driver.session().status(), GameStatus::Paused);
        assert_eq!(driver.session().tick(), 0);
    }

    #[test]
    fn test_turn_command_applies_on_next_tick() {
        let store = MemoryBestScoreStore::in_memory("tester");
        let mut driver = Driver::new(open_session(), store, None, false);

        driver.handle_command(DriverCommand::Turn(Direction::Down));
        driver.tick();

        assert_eq!(driver.session().state().player.head(), Point::new(6, 7));
    }

    #[test]
    fn test_max_ticks_quits() {
        let store = MemoryBestScoreStore::in_memory("tester");
        let mut driver = Driver::new(open_session(), store, Some(2), false);

        assert_eq!(driver.tick(), Flow::Continue);
        assert_eq!(driver.tick(), Flow::Quit);
    }

    #[test]
    fn test_quit_command() {
        let store = MemoryBestScoreStore::in_memory("tester");
        let mut driver = Driver::new(open_session(), store, None, false);

        assert_eq!(driver.handle_command(DriverCommand::Quit), Flow::Quit);
    }

    #[tokio::test]
    async fn test_run_stops_after_max_ticks() {
        let store = MemoryBestScoreStore::in_memory("tester");
        let driver = Driver::new(open_session(), store, Some(3), false);
        let (_command_tx, command_rx) = mpsc::unbounded_channel();

        let session = driver.run(command_rx, std::future::pending()).await;

        assert_eq!(session.tick(), 3);
        assert_eq!(session.state().player.head(), Point::new(9, 6));
    }

    #[tokio::test]
    async fn test_run_stops_when_input_closes_after_game_over() {
        let store = MemoryBestScoreStore::in_memory("tester");
        let driver = Driver::new(doomed_session(0), store, None, false);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        drop(command_tx);

        let session = driver.run(command_rx, std::future::pending()).await;

        assert_eq!(session.status(), GameStatus::Over);
        assert_eq!(session.score(), 1);
    }

    #[tokio::test]
    async fn test_run_applies_commands_between_ticks() {
        let store = MemoryBestScoreStore::in_memory("tester");
        let driver = Driver::new(open_session(), store, Some(1), false);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        command_tx.send(DriverCommand::Turn(Direction::Up)).unwrap();

        let session = driver.run(command_rx, std::future::pending()).await;

        assert_eq!(session.state().player.head(), Point::new(6, 5));
    }
}
