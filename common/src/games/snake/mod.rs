mod direction_buffer;
mod food;
mod game_state;
mod rival;
mod session;
mod settings;
mod snake;
mod speed;
mod types;

pub use direction_buffer::DirectionBuffer;
pub use food::place_food;
pub use game_state::{SnakeGameState, StepOutcome, StepReport};
pub use rival::{Rival, RivalController, RivalCrash};
pub use session::{GameSession, SessionEvent, TickOutcome};
pub use settings::{START_DIRECTION, SnakeSessionSettings};
pub use snake::Snake;
pub use speed::{
    DEFAULT_MIN_TICK_INTERVAL, DEFAULT_SPEED_DECREMENT, DEFAULT_TICK_INTERVAL, SCORE_PER_FOOD,
    ScoreSpeedPolicy,
};
pub use types::{
    Board, DeathReason, Difficulty, Direction, GameStatus, Point, SelfCollisionRule,
};
