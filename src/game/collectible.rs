use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use super::error::{ArenaError, Result};
use super::grid::{contains_pos, Grid, Pos};

/// Random draws tried before falling back to scanning for free cells.
const MAX_RANDOM_ATTEMPTS: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorselKind {
    Food,
    PowerUp,
}

impl MorselKind {
    pub fn name(&self) -> &'static str {
        match self {
            MorselKind::Food => "food",
            MorselKind::PowerUp => "power-up",
        }
    }
}

/// Something a snek can eat. Food is always on the board; a power-up spends
/// most of its time parked at [`Pos::NOWHERE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Morsel {
    pos: Pos,
    kind: MorselKind,
}

impl Morsel {
    pub fn food<'a>(
        grid: Grid,
        occupied_a: impl IntoIterator<Item = &'a Pos> + Clone,
        occupied_b: impl IntoIterator<Item = &'a Pos> + Clone,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let mut morsel = Morsel {
            pos: Pos::NOWHERE,
            kind: MorselKind::Food,
        };
        morsel.relocate(grid, occupied_a, occupied_b, rng)?;
        Ok(morsel)
    }

    /// Power-ups start off the board and are placed when they first show up.
    pub fn power_up() -> Self {
        Morsel {
            pos: Pos::NOWHERE,
            kind: MorselKind::PowerUp,
        }
    }

    pub fn kind(&self) -> MorselKind {
        self.kind
    }

    pub fn position(&self) -> Option<Pos> {
        (self.pos != Pos::NOWHERE).then_some(self.pos)
    }

    pub fn is_active(&self) -> bool {
        self.pos != Pos::NOWHERE
    }

    pub fn is_at(&self, pos: Pos) -> bool {
        self.is_active() && self.pos == pos
    }

    pub fn deactivate(&mut self) {
        debug_assert_eq!(self.kind, MorselKind::PowerUp, "food never leaves the board");
        self.pos = Pos::NOWHERE;
    }

    /// Moves to a uniformly random cell outside both bodies. On a full grid
    /// the position is left untouched and [`ArenaError::NoFreeCell`] returned.
    pub fn relocate<'a>(
        &mut self,
        grid: Grid,
        occupied_a: impl IntoIterator<Item = &'a Pos> + Clone,
        occupied_b: impl IntoIterator<Item = &'a Pos> + Clone,
        rng: &mut impl Rng,
    ) -> Result<Pos> {
        let is_free = |pos: Pos| {
            !contains_pos(occupied_a.clone(), pos) && !contains_pos(occupied_b.clone(), pos)
        };

        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let pos = grid.random_cell(rng);
            if is_free(pos) {
                self.pos = pos;
                return Ok(pos);
            }
        }

        warn!(
            "No free cell for {} after {} random draws, scanning the grid",
            self.kind.name(),
            MAX_RANDOM_ATTEMPTS
        );
        let free: Vec<Pos> = grid.cells().filter(|pos| is_free(*pos)).collect();
        match free.choose(rng) {
            Some(&pos) => {
                self.pos = pos;
                Ok(pos)
            }
            None => Err(ArenaError::NoFreeCell(self.kind.name())),
        }
    }

    #[cfg(test)]
    pub(crate) fn place_at(&mut self, pos: Pos) {
        self.pos = pos;
    }
}
