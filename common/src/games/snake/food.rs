use std::collections::HashSet;

use crate::games::SessionRng;
use super::types::{Board, Point};

const SAMPLING_ATTEMPTS_PER_CELL: usize = 4;

/// Picks a free cell for the next food. Random draws come first; if they keep
/// hitting occupied cells the board is scanned row by row. The origin is
/// returned only when every cell is taken.
pub fn place_food(board: &Board, occupied: &HashSet<Point>, rng: &mut SessionRng) -> Point {
    if board.area() == 0 {
        return Point::new(0, 0);
    }

    if occupied.len() < board.area() {
        for _ in 0..board.area() * SAMPLING_ATTEMPTS_PER_CELL {
            let x = rng.random_range(0..board.width);
            let y = rng.random_range(0..board.height);
            let pos = Point::new(x, y);

            if !occupied.contains(&pos) {
                return pos;
            }
        }
    }

    board
        .cells()
        .find(|cell| !occupied.contains(cell))
        .unwrap_or(Point::new(0, 0))
}
