use super::types::Direction;

/// Single-slot buffer for the heading requested between two ticks.
/// A later request overwrites an earlier one.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectionBuffer {
    pending: Option<Direction>,
}

impl DirectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers `direction` unless it reverses `current`. Returns whether the
    /// request was kept.
    pub fn request(&mut self, direction: Direction, current: Direction) -> bool {
        if direction.is_opposite(&current) {
            return false;
        }
        self.pending = Some(direction);
        true
    }

    /// Heading for the next tick. Clears the buffer.
    pub fn consume(&mut self, current: Direction) -> Direction {
        match self.pending.take() {
            Some(direction) if !direction.is_opposite(&current) => direction,
            _ => current,
        }
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
