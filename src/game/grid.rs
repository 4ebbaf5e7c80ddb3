use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// A grid cell. Coordinates may fall outside the grid, which is how a snake
/// that ran into a wall is detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PosDelta {
    pub x: i32,
    pub y: i32,
}

impl From<Direction> for PosDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::North => PosDelta { x: 0, y: -1 },
            Direction::South => PosDelta { x: 0, y: 1 },
            Direction::East => PosDelta { x: 1, y: 0 },
            Direction::West => PosDelta { x: -1, y: 0 },
        }
    }
}

impl Pos {
    /// Marks a collectible that is not on the board.
    pub const NOWHERE: Pos = Pos { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Pos { x, y }
    }

    pub fn offset(&self, delta: PosDelta) -> Pos {
        Pos {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }

    pub fn step(&self, dir: Direction) -> Pos {
        self.offset(dir.into())
    }

    pub fn step_back(&self, dir: Direction) -> Pos {
        self.offset(dir.opposite().into())
    }
}

/// Membership test over an ordered run of cells.
pub fn contains_pos<'a>(cells: impl IntoIterator<Item = &'a Pos>, pos: Pos) -> bool {
    cells.into_iter().any(|cell| *cell == pos)
}

/// The square playing field, `cell_count` cells on each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub cell_count: i32,
}

impl Grid {
    pub fn new(cell_count: i32) -> Self {
        Grid { cell_count }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        (0..self.cell_count).contains(&pos.x) && (0..self.cell_count).contains(&pos.y)
    }

    pub fn random_cell(&self, rng: &mut impl Rng) -> Pos {
        Pos {
            x: rng.gen_range(0..self.cell_count),
            y: rng.gen_range(0..self.cell_count),
        }
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cell_count).flat_map(move |y| (0..self.cell_count).map(move |x| Pos { x, y }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_opposite_directions() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::South.opposite(), Direction::North);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::West.opposite(), Direction::East);

        for dir in [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ] {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_all_directions() {
        let pos = Pos::new(5, 5);

        assert_eq!(pos.step(Direction::North), Pos::new(5, 4));
        assert_eq!(pos.step(Direction::South), Pos::new(5, 6));
        assert_eq!(pos.step(Direction::East), Pos::new(6, 5));
        assert_eq!(pos.step(Direction::West), Pos::new(4, 5));
    }

    #[test]
    fn test_step_back_undoes_step() {
        let pos = Pos::new(6, 9);
        assert_eq!(pos.step_back(Direction::East), Pos::new(5, 9));
        assert_eq!(pos.step(Direction::North).step_back(Direction::North), pos);
    }

    #[test]
    fn test_no_wrapping_at_edges() {
        // Leaving the grid must produce an out-of-bounds position, not a wrap.
        let grid = Grid::new(10);

        let pos = Pos::new(0, 0).step(Direction::North);
        assert_eq!(pos, Pos::new(0, -1));
        assert!(!grid.contains(pos));

        let pos = Pos::new(9, 5).step(Direction::East);
        assert_eq!(pos, Pos::new(10, 5));
        assert!(!grid.contains(pos));
    }

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(25);
        assert!(grid.contains(Pos::new(0, 0)));
        assert!(grid.contains(Pos::new(24, 24)));
        assert!(!grid.contains(Pos::new(25, 0)));
        assert!(!grid.contains(Pos::new(0, -1)));
        assert!(!grid.contains(Pos::NOWHERE));
    }

    #[test]
    fn test_random_cell_stays_in_grid() {
        let grid = Grid::new(4);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(grid.contains(grid.random_cell(&mut rng)));
        }
    }

    #[test]
    fn test_cells_covers_grid() {
        let grid = Grid::new(3);
        let cells: Vec<Pos> = grid.cells().collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Pos::new(0, 0));
        assert_eq!(cells[8], Pos::new(2, 2));
    }

    #[test]
    fn test_contains_pos() {
        let cells = [Pos::new(1, 1), Pos::new(1, 2)];
        assert!(contains_pos(&cells, Pos::new(1, 2)));
        assert!(!contains_pos(&cells, Pos::new(2, 1)));
        assert!(!contains_pos(&Vec::new(), Pos::new(0, 0)));
    }
}
