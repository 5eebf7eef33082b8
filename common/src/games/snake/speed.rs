use std::time::Duration;

pub const SCORE_PER_FOOD: u32 = 1;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(300);
pub const DEFAULT_SPEED_DECREMENT: Duration = Duration::from_millis(15);
pub const DEFAULT_MIN_TICK_INTERVAL: Duration = Duration::from_millis(80);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreSpeedPolicy {
    pub speed_up: bool,
    pub decrement: Duration,
    pub min_interval: Duration,
}

impl ScoreSpeedPolicy {
    pub fn constant() -> Self {
        Self {
            speed_up: false,
            ..Self::default()
        }
    }

    pub fn accelerating(decrement: Duration, min_interval: Duration) -> Self {
        Self {
            speed_up: true,
            decrement,
            min_interval,
        }
    }

    pub fn score_after_food(&self, score: u32) -> u32 {
        score.saturating_add(SCORE_PER_FOOD)
    }

    /// Never goes below `min_interval`, and never raises an interval that
    /// already is below it.
    pub fn interval_after_food(&self, interval: Duration) -> Duration {
        if !self.speed_up || interval <= self.min_interval {
            return interval;
        }
        interval.saturating_sub(self.decrement).max(self.min_interval)
    }
}

impl Default for ScoreSpeedPolicy {
    fn default() -> Self {
        Self {
            speed_up: false,
            decrement: DEFAULT_SPEED_DECREMENT,
            min_interval: DEFAULT_MIN_TICK_INTERVAL,
        }
    }
}
