pub mod config;
pub mod games;
pub mod logger;
pub mod persistence;

pub use games::snake::{Difficulty, Direction, Point, SnakeSessionSettings};
pub use games::SessionRng;
