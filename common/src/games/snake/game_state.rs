use std::collections::HashSet;
use std::time::Duration;

use crate::debug_log;
use crate::games::SessionRng;
use super::food::place_food;
use super::rival::{Rival, RivalCrash, RivalPlan};
use super::settings::SnakeSessionSettings;
use super::snake::Snake;
use super::speed::ScoreSpeedPolicy;
use super::types::{Board, DeathReason, Direction, Point, SelfCollisionRule};

#[derive(Clone, Debug)]
pub struct SnakeGameState {
    pub board: Board,
    pub player: Snake,
    pub rival: Option<Rival>,
    pub food: Point,
    pub score: u32,
    pub tick_interval: Duration,
    pub speed_policy: ScoreSpeedPolicy,
    pub self_collision_rule: SelfCollisionRule,
}

#[derive(Debug)]
pub struct StepReport {
    pub state: SnakeGameState,
    pub ate_food: Option<Point>,
    pub rival_crash: Option<RivalCrash>,
}

#[derive(Debug)]
pub enum StepOutcome {
    Advanced(StepReport),
    Over { reason: DeathReason, final_score: u32 },
}

impl SnakeGameState {
    pub fn new(settings: &SnakeSessionSettings, rng: &mut SessionRng) -> Self {
        let player = Snake::new(settings.start, settings.start_direction);

        let rival = if settings.rival_enabled {
            let spawn = Rival::spawn_point(&settings.board);
            (spawn != settings.start).then(|| Rival::new(spawn))
        } else {
            None
        };

        let mut state = Self::from_parts(settings, player, Point::new(0, 0));
        state.rival = rival;
        state.food = place_food(&state.board, &state.occupied_cells(), rng);
        state
    }

    /// State with an explicit player and food, e.g. to replay a known position.
    pub fn from_parts(settings: &SnakeSessionSettings, player: Snake, food: Point) -> Self {
        Self {
            board: settings.board,
            player,
            rival: None,
            food,
            score: 0,
            tick_interval: settings.initial_tick_interval,
            speed_policy: settings.speed_policy,
            self_collision_rule: settings.self_collision_rule,
        }
    }

    pub fn with_rival(mut self, rival: Rival) -> Self {
        self.rival = Some(rival);
        self
    }

    pub fn occupied_cells(&self) -> HashSet<Point> {
        let mut occupied: HashSet<Point> = self.player.body().copied().collect();
        if let Some(rival) = &self.rival {
            occupied.extend(rival.snake().body().copied());
        }
        occupied
    }

    /// Advances one tick with the player moving along `heading`.
    ///
    /// Checks run in order: walls, the player's own body, the rival. The rival
    /// plans its move from the state before this tick and moves after the
    /// player. `self` is left untouched.
    pub fn step(&self, heading: Direction, rng: &mut SessionRng) -> StepOutcome {
        let head = self.player.head();
        let over = |reason| StepOutcome::Over {
            reason,
            final_score: self.score,
        };

        let rival_plan = self
            .rival
            .as_ref()
            .map(|rival| rival.plan(head, &self.board, self.self_collision_rule));

        let Some(new_head) = self.board.next_position(head, heading) else {
            return over(DeathReason::WallCollision);
        };

        if self.player.collides_with_self(new_head, self.self_collision_rule) {
            return over(DeathReason::SelfCollision);
        }

        if let Some(rival) = &self.rival {
            if rival.snake().contains(new_head) {
                return over(DeathReason::RivalCollision);
            }
            if let Some(RivalPlan::Move { next_head, .. }) = rival_plan
                && next_head == head
            {
                return over(DeathReason::RivalCollision);
            }
        }

        // A full board leaves the food on a body cell; that cell is never eaten.
        let ate_food = new_head == self.food && !self.player.contains(self.food);

        let mut next = self.clone();
        next.player.advance(new_head, heading, ate_food);

        let mut rival_crash = None;
        match rival_plan {
            Some(RivalPlan::Move { direction, next_head }) => {
                if next.player.contains(next_head) {
                    return over(DeathReason::RivalCollision);
                }
                if let Some(rival) = next.rival.as_mut() {
                    rival.advance(direction, next_head);
                }
            }
            Some(RivalPlan::Crash) => {
                rival_crash = Some(next.crash_rival());
            }
            None => {}
        }

        if ate_food {
            next.score = next.speed_policy.score_after_food(next.score);
            next.tick_interval = next.speed_policy.interval_after_food(next.tick_interval);
            next.food = place_food(&next.board, &next.occupied_cells(), rng);
            debug_log!(
                "Food eaten at ({}, {}), next food at ({}, {})",
                new_head.x,
                new_head.y,
                next.food.x,
                next.food.y
            );
        }

        StepOutcome::Advanced(StepReport {
            state: next,
            ate_food: ate_food.then_some(new_head),
            rival_crash,
        })
    }

    fn crash_rival(&mut self) -> RivalCrash {
        let Some(rival) = self.rival.as_mut() else {
            return RivalCrash::Removed;
        };

        if self.player.contains(rival.spawn()) {
            self.rival = None;
            RivalCrash::Removed
        } else {
            rival.respawn();
            RivalCrash::Respawned
        }
    }
}
