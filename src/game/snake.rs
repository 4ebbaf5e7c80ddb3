use std::collections::VecDeque;

use super::grid::{contains_pos, Direction, Pos};

/// Length of a freshly placed snek.
pub const START_LENGTH: usize = 3;

/// One player's body, head first.
#[derive(Clone, Debug)]
pub struct Snek {
    body: VecDeque<Pos>,
    direction: Direction,
    grow_pending: bool,
}

impl Snek {
    pub fn new(start: Pos, direction: Direction) -> Self {
        let mut snek = Snek {
            body: VecDeque::with_capacity(START_LENGTH),
            direction,
            grow_pending: false,
        };
        snek.reset(start, direction);
        snek
    }

    /// Lays the body out behind `start`, opposite to the heading.
    pub fn reset(&mut self, start: Pos, direction: Direction) {
        self.body.clear();
        let mut segment = start;
        for _ in 0..START_LENGTH {
            self.body.push_back(segment);
            segment = segment.step_back(direction);
        }
        self.direction = direction;
        self.grow_pending = false;
    }

    pub fn head(&self) -> Pos {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Pos> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn is_growing(&self) -> bool {
        self.grow_pending
    }

    /// Turns unless the request would reverse the snek into its own neck.
    pub fn change_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.opposite() == self.direction {
            return false;
        }
        self.direction = new_direction;
        true
    }

    /// Repeated requests before the next slither still add a single segment.
    pub fn request_growth(&mut self) {
        self.grow_pending = true;
    }

    pub fn slither(&mut self) {
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);

        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.body.pop_back();
        }
    }

    #[cfg(test)]
    pub(crate) fn from_body(body: impl IntoIterator<Item = Pos>, direction: Direction) -> Snek {
        Snek {
            body: body.into_iter().collect(),
            direction,
            grow_pending: false,
        }
    }

    pub fn occupies(&self, pos: Pos) -> bool {
        contains_pos(&self.body, pos)
    }

    pub fn bites_itself(&self) -> bool {
        contains_pos(self.body.iter().skip(1), self.head())
    }
}
