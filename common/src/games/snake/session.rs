use std::time::Duration;

use crate::games::SessionRng;
use crate::{debug_log, log};
use super::direction_buffer::DirectionBuffer;
use super::game_state::{SnakeGameState, StepOutcome};
use super::rival::RivalCrash;
use super::settings::SnakeSessionSettings;
use super::types::{DeathReason, Direction, GameStatus, Point};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    FoodEaten { position: Point, score: u32 },
    SpeedChanged { tick_interval: Duration },
    BestScoreBeaten { best_score: u32 },
    RivalCrashed { crash: RivalCrash },
    GameOver { reason: DeathReason, final_score: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or over, nothing moved.
    Skipped,
    Advanced { ate_food: bool },
    Over { reason: DeathReason, final_score: u32 },
}

/// Everything the driver owns for one player: the committed state, the input
/// buffer, the status flag and the best score. The driver calls `on_tick` once
/// per interval and reads `tick_interval` before scheduling the next call.
pub struct GameSession {
    settings: SnakeSessionSettings,
    state: SnakeGameState,
    direction_buffer: DirectionBuffer,
    status: GameStatus,
    best_score: u32,
    rng: SessionRng,
    tick: u64,
    death_reason: Option<DeathReason>,
    pending_events: Vec<SessionEvent>,
}

impl GameSession {
    pub fn new(settings: SnakeSessionSettings, best_score: u32, mut rng: SessionRng) -> Self {
        let state = SnakeGameState::new(&settings, &mut rng);
        Self::from_state(settings, state, best_score, rng)
    }

    /// Starts from a prepared state instead of the settings' initial layout.
    pub fn from_state(
        settings: SnakeSessionSettings,
        state: SnakeGameState,
        best_score: u32,
        rng: SessionRng,
    ) -> Self {
        Self {
            settings,
            state,
            direction_buffer: DirectionBuffer::new(),
            status: GameStatus::Active,
            best_score,
            rng,
            tick: 0,
            death_reason: None,
            pending_events: Vec::new(),
        }
    }

    /// Requests are buffered while Active or Paused. Returns `false` when the
    /// request was dropped as a reversal or the game is over.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.status == GameStatus::Over {
            return false;
        }
        self.direction_buffer
            .request(direction, self.state.player.direction())
    }

    pub fn on_tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Active {
            return TickOutcome::Skipped;
        }

        let heading = self
            .direction_buffer
            .consume(self.state.player.direction());
        self.tick += 1;

        match self.state.step(heading, &mut self.rng) {
            StepOutcome::Advanced(report) => {
                let previous_interval = self.state.tick_interval;
                self.state = report.state;

                if let Some(crash) = report.rival_crash {
                    log!("Rival crashed at tick {}: {:?}", self.tick, crash);
                    self.pending_events.push(SessionEvent::RivalCrashed { crash });
                }

                if let Some(position) = report.ate_food {
                    self.record_food_eaten(position, previous_interval);
                }

                TickOutcome::Advanced {
                    ate_food: report.ate_food.is_some(),
                }
            }
            StepOutcome::Over {
                reason,
                final_score,
            } => {
                self.status = GameStatus::Over;
                self.death_reason = Some(reason);
                self.direction_buffer.clear();
                log!(
                    "Game over at tick {}: snake {}, final score {}",
                    self.tick,
                    reason,
                    final_score
                );
                self.pending_events.push(SessionEvent::GameOver {
                    reason,
                    final_score,
                });
                TickOutcome::Over {
                    reason,
                    final_score,
                }
            }
        }
    }

    fn record_food_eaten(&mut self, position: Point, previous_interval: Duration) {
        let score = self.state.score;
        debug_log!("Score {} at tick {}", score, self.tick);
        self.pending_events
            .push(SessionEvent::FoodEaten { position, score });

        if self.state.tick_interval != previous_interval {
            debug_log!(
                "Tick interval {}ms -> {}ms",
                previous_interval.as_millis(),
                self.state.tick_interval.as_millis()
            );
            self.pending_events.push(SessionEvent::SpeedChanged {
                tick_interval: self.state.tick_interval,
            });
        }

        if score > self.best_score {
            self.best_score = score;
            self.pending_events.push(SessionEvent::BestScoreBeaten { best_score: score });
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Active {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Active;
        true
    }

    pub fn toggle_pause(&mut self) -> GameStatus {
        if !self.pause() {
            self.resume();
        }
        self.status
    }

    /// Fresh snake, food and score. The best score and the random stream carry
    /// over.
    pub fn restart(&mut self) {
        self.state = SnakeGameState::new(&self.settings, &mut self.rng);
        self.direction_buffer.clear();
        self.status = GameStatus::Active;
        self.tick = 0;
        self.death_reason = None;
        self.pending_events.clear();
        log!("Session restarted, best score {}", self.best_score);
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn state(&self) -> &SnakeGameState {
        &self.state
    }

    pub fn settings(&self) -> &SnakeSessionSettings {
        &self.settings
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn tick_interval(&self) -> Duration {
        self.state.tick_interval
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::snake::Snake;
    use crate::games::snake::types::{Board, Difficulty};

    fn points(cells: &[(usize, usize)]) -> Vec<Point> {
        cells.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn create_session(
        body: &[(usize, usize)],
        direction: Direction,
        food: (usize, usize),
    ) -> GameSession {
        let settings = SnakeSessionSettings::for_difficulty(Board::new(10, 10), Difficulty::Easy);
        let player = Snake::from_body(points(body), direction).unwrap();
        let state = SnakeGameState::from_parts(&settings, player, Point::new(food.0, food.1));
        GameSession::from_state(settings, state, 0, SessionRng::new(12345))
    }

    fn body_of(session: &GameSession) -> Vec<Point> {
        session.state().player.body().copied().collect()
    }

    #[test]
    fn test_new_session_is_active() {
        let settings = SnakeSessionSettings::for_difficulty(Board::new(10, 10), Difficulty::Easy);
        let session = GameSession::new(settings, 7, SessionRng::new(1));

        assert_eq!(session.status(), GameStatus::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.best_score(), 7);
        assert_eq!(session.state().player.len(), 1);
    }

    #[test]
    fn test_scenario_walk_right_and_eat() {
        let mut session = create_session(&[(5, 5)], Direction::Right, (9, 5));

        for _ in 0..3 {
            assert_eq!(session.on_tick(), TickOutcome::Advanced { ate_food: false });
        }
        assert_eq!(session.on_tick(), TickOutcome::Advanced { ate_food: true });

        assert_eq!(body_of(&session), points(&[(9, 5), (8, 5)]));
        assert_eq!(session.score(), 1);
        assert_ne!(session.state().food, Point::new(9, 5));

        let events = session.take_events();
        assert!(events.contains(&SessionEvent::FoodEaten {
            position: Point::new(9, 5),
            score: 1
        }));
        assert!(events.contains(&SessionEvent::BestScoreBeaten { best_score: 1 }));
    }

    #[test]
    fn test_scenario_wall_ends_session() {
        let mut session = create_session(&[(0, 5), (1, 5)], Direction::Left, (7, 7));

        let outcome = session.on_tick();

        assert_eq!(
            outcome,
            TickOutcome::Over {
                reason: DeathReason::WallCollision,
                final_score: 0
            }
        );
        assert_eq!(session.status(), GameStatus::Over);
        assert_eq!(session.score(), 0);
        assert_eq!(session.death_reason(), Some(DeathReason::WallCollision));
    }

    #[test]
    fn test_scenario_reversal_rejected() {
        let mut session = create_session(&[(5, 5), (5, 6), (5, 7)], Direction::Up, (0, 0));

        assert!(!session.request_direction(Direction::Down));
        session.on_tick();

        assert_eq!(session.state().player.direction(), Direction::Up);
        assert_eq!(session.state().player.head(), Point::new(5, 4));
    }

    #[test]
    fn test_over_is_absorbing() {
        let mut session = create_session(&[(0, 5)], Direction::Left, (7, 7));
        session.on_tick();
        let body = body_of(&session);

        assert_eq!(session.on_tick(), TickOutcome::Skipped);
        assert!(!session.request_direction(Direction::Up));
        assert!(!session.resume());
        assert_eq!(body_of(&session), body);
    }

    #[test]
    fn test_game_over_event_carries_final_score() {
        let mut session = create_session(&[(8, 5)], Direction::Right, (9, 5));
        session.on_tick();
        let _ = session.take_events();

        session.on_tick();
        let events = session.take_events();

        assert_eq!(
            events,
            vec![SessionEvent::GameOver {
                reason: DeathReason::WallCollision,
                final_score: 1
            }]
        );
    }

    #[test]
    fn test_pause_skips_ticks() {
        let mut session = create_session(&[(5, 5)], Direction::Right, (0, 0));

        assert!(session.pause());
        assert_eq!(session.on_tick(), TickOutcome::Skipped);
        assert_eq!(body_of(&session), points(&[(5, 5)]));

        assert_eq!(session.toggle_pause(), GameStatus::Active);
        session.on_tick();
        assert_eq!(body_of(&session), points(&[(6, 5)]));
    }

    #[test]
    fn test_direction_buffered_while_paused_applies_after_resume() {
        let mut session = create_session(&[(5, 5)], Direction::Right, (0, 0));
        session.pause();

        assert!(session.request_direction(Direction::Down));
        session.resume();
        session.on_tick();

        assert_eq!(session.state().player.head(), Point::new(5, 6));
    }

    #[test]
    fn test_restart_keeps_best_score() {
        let mut session = create_session(&[(8, 5)], Direction::Right, (9, 5));
        session.on_tick();
        session.on_tick();
        assert_eq!(session.status(), GameStatus::Over);

        session.restart();

        assert_eq!(session.status(), GameStatus::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.best_score(), 1);
        assert_eq!(session.state().player.len(), 1);
        assert_eq!(session.tick(), 0);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_best_score_not_beaten_below_record() {
        let settings = SnakeSessionSettings::for_difficulty(Board::new(10, 10), Difficulty::Easy);
        let player = Snake::new(Point::new(5, 5), Direction::Right);
        let state = SnakeGameState::from_parts(&settings, player, Point::new(6, 5));
        let mut session = GameSession::from_state(settings, state, 10, SessionRng::new(1));

        session.on_tick();

        assert_eq!(session.best_score(), 10);
        assert!(!session
            .take_events()
            .iter()
            .any(|e| matches!(e, SessionEvent::BestScoreBeaten { .. })));
    }

    #[test]
    fn test_medium_emits_speed_change() {
        let settings = SnakeSessionSettings::for_difficulty(Board::new(10, 10), Difficulty::Medium);
        let player = Snake::new(Point::new(5, 5), Direction::Right);
        let state = SnakeGameState::from_parts(&settings, player, Point::new(6, 5));
        let mut session = GameSession::from_state(settings, state, 0, SessionRng::new(1));

        session.on_tick();

        assert_eq!(session.tick_interval(), Duration::from_millis(285));
        assert!(session.take_events().contains(&SessionEvent::SpeedChanged {
            tick_interval: Duration::from_millis(285)
        }));
    }

    #[test]
    fn test_same_seed_same_game() {
        let settings = SnakeSessionSettings::for_difficulty(Board::new(10, 10), Difficulty::Hard);
        let mut first = GameSession::new(settings.clone(), 0, SessionRng::new(5));
        let mut second = GameSession::new(settings, 0, SessionRng::new(5));

        for turn in [Direction::Down, Direction::Left, Direction::Up, Direction::Right] {
            first.request_direction(turn);
            second.request_direction(turn);
            for _ in 0..3 {
                assert_eq!(first.on_tick(), second.on_tick());
            }
        }

        assert_eq!(body_of(&first), body_of(&second));
        assert_eq!(first.state().food, second.state().food);
    }
}
