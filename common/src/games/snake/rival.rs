use super::snake::Snake;
use super::types::{Board, Direction, Point, SelfCollisionRule};

/// Greedy chaser: steps towards the target head over any safe cell.
pub struct RivalController;

impl RivalController {
    /// Candidates that would hit a wall or the rival's own body are skipped.
    /// Equal distances resolve in `Direction::ALL` order.
    pub fn choose_direction(
        rival: &Snake,
        target: Point,
        board: &Board,
        rule: SelfCollisionRule,
    ) -> Option<Direction> {
        let head = rival.head();
        let mut best: Option<(Direction, usize)> = None;

        for direction in Self::candidate_directions(rival.direction()) {
            let Some(next_pos) = board.next_position(head, direction) else {
                continue;
            };
            if rival.collides_with_self(next_pos, rule) {
                continue;
            }

            let distance = next_pos.manhattan_distance(target);
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((direction, distance));
            }
        }

        best.map(|(direction, _)| direction)
    }

    fn candidate_directions(current: Direction) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |d| !d.is_opposite(&current))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RivalPlan {
    Move { direction: Direction, next_head: Point },
    Crash,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RivalCrash {
    Respawned,
    Removed,
}

#[derive(Clone, Debug)]
pub struct Rival {
    snake: Snake,
    spawn: Point,
}

impl Rival {
    pub const SPAWN_DIRECTION: Direction = Direction::Left;

    /// Two cells in from the bottom-right corner.
    pub fn spawn_point(board: &Board) -> Point {
        Point::new(board.width.saturating_sub(2), board.height.saturating_sub(2))
    }

    pub fn new(spawn: Point) -> Self {
        Self {
            snake: Snake::new(spawn, Self::SPAWN_DIRECTION),
            spawn,
        }
    }

    pub fn with_snake(snake: Snake, spawn: Point) -> Self {
        Self { snake, spawn }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn spawn(&self) -> Point {
        self.spawn
    }

    pub(crate) fn plan(&self, target: Point, board: &Board, rule: SelfCollisionRule) -> RivalPlan {
        match RivalController::choose_direction(&self.snake, target, board, rule) {
            Some(direction) => match board.next_position(self.snake.head(), direction) {
                Some(next_head) => RivalPlan::Move { direction, next_head },
                None => RivalPlan::Crash,
            },
            None => RivalPlan::Crash,
        }
    }

    pub(crate) fn advance(&mut self, direction: Direction, next_head: Point) {
        self.snake.advance(next_head, direction, false);
    }

    pub(crate) fn respawn(&mut self) {
        self.snake = Snake::new(self.spawn, Self::SPAWN_DIRECTION);
    }
}
