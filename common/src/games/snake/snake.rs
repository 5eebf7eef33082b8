use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point, SelfCollisionRule};

/// Ordered body, head first, mirrored into a set for occupancy checks.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
    direction: Direction,
}

impl Snake {
    pub fn new(start_pos: Point, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([start_pos]),
            body_set: HashSet::from([start_pos]),
            direction,
        }
    }

    /// Builds a snake from an explicit body, head first. Returns `None` for an
    /// empty body, repeated cells or a diagonal/gapped link.
    pub fn from_body(body: Vec<Point>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }

        let body_set: HashSet<Point> = body.iter().copied().collect();
        if body_set.len() != body.len() {
            return None;
        }
        if body.windows(2).any(|pair| !pair[0].is_adjacent(pair[1])) {
            return None;
        }

        Some(Self {
            body: body.into(),
            body_set,
            direction,
        })
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn body(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.body_set.contains(&point)
    }

    pub fn collides_with_self(&self, next_head: Point, rule: SelfCollisionRule) -> bool {
        if !self.body_set.contains(&next_head) {
            return false;
        }

        match rule {
            SelfCollisionRule::IncludeTail => true,
            SelfCollisionRule::TailVacates => next_head != self.tail(),
        }
    }

    /// Moves the head to `next_head`. The tail is kept when `grow` is set.
    pub(crate) fn advance(&mut self, next_head: Point, direction: Direction, grow: bool) {
        if !grow
            && let Some(tail) = self.body.pop_back()
        {
            self.body_set.remove(&tail);
        }

        self.body.push_front(next_head);
        self.body_set.insert(next_head);
        self.direction = direction;
    }

    /// Body cells are unique and every link is orthogonal.
    pub fn is_well_formed(&self) -> bool {
        !self.body.is_empty()
            && self.body_set.len() == self.body.len()
            && self
                .body
                .iter()
                .zip(self.body.iter().skip(1))
                .all(|(a, b)| a.is_adjacent(*b))
    }
}
