use std::time::Duration;

use crate::config::GameConfig;
use super::speed::{DEFAULT_TICK_INTERVAL, ScoreSpeedPolicy};
use super::types::{Board, Difficulty, Direction, Point, SelfCollisionRule};

pub const START_DIRECTION: Direction = Direction::Right;

#[derive(Clone, Debug)]
pub struct SnakeSessionSettings {
    pub board: Board,
    pub start: Point,
    pub start_direction: Direction,
    pub initial_tick_interval: Duration,
    pub speed_policy: ScoreSpeedPolicy,
    pub self_collision_rule: SelfCollisionRule,
    pub rival_enabled: bool,
}

impl SnakeSessionSettings {
    /// Preset for `difficulty` with the snake starting in the board centre.
    pub fn for_difficulty(board: Board, difficulty: Difficulty) -> Self {
        let speed_policy = if difficulty.speeds_up() {
            ScoreSpeedPolicy {
                speed_up: true,
                ..ScoreSpeedPolicy::default()
            }
        } else {
            ScoreSpeedPolicy::constant()
        };

        Self {
            board,
            start: board.center(),
            start_direction: START_DIRECTION,
            initial_tick_interval: DEFAULT_TICK_INTERVAL,
            speed_policy,
            self_collision_rule: SelfCollisionRule::default(),
            rival_enabled: difficulty.has_rival(),
        }
    }
}

impl From<&GameConfig> for SnakeSessionSettings {
    fn from(config: &GameConfig) -> Self {
        let board = Board::new(config.board_width as usize, config.board_height as usize);

        Self {
            board,
            start: config.start.unwrap_or_else(|| board.center()),
            start_direction: START_DIRECTION,
            initial_tick_interval: Duration::from_millis(config.tick_interval_ms as u64),
            speed_policy: ScoreSpeedPolicy {
                speed_up: config.difficulty.speeds_up(),
                decrement: Duration::from_millis(config.speed.decrement_ms as u64),
                min_interval: Duration::from_millis(config.speed.min_interval_ms as u64),
            },
            self_collision_rule: config.self_collision_rule,
            rival_enabled: config.difficulty.has_rival(),
        }
    }
}
