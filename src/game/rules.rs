use std::time::Duration;

use super::error::{ArenaError, Result};
use super::grid::{Direction, Grid, Pos};
use super::snake::START_LENGTH;

/// Where a snek is placed at the start of every round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Start {
    pub head: Pos,
    pub direction: Direction,
}

impl Start {
    /// The cells the snek covers right after being placed.
    pub fn body(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..START_LENGTH).scan(self.head, |segment, _| {
            let current = *segment;
            *segment = segment.step_back(self.direction);
            Some(current)
        })
    }
}

/// The constants of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    pub cell_count: i32,
    /// Player one first.
    pub starts: [Start; 2],
    pub food_reward: u32,
    pub power_up_reward: u32,
    /// How long a power-up stays on the board once shown.
    pub power_up_lifetime: Duration,
    /// Inclusive range, in whole seconds, for the wait before the next power-up.
    pub power_up_gap_secs: (u64, u64),
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            cell_count: 25,
            starts: [
                Start {
                    head: Pos::new(6, 9),
                    direction: Direction::East,
                },
                Start {
                    head: Pos::new(18, 9),
                    direction: Direction::West,
                },
            ],
            food_reward: 1,
            power_up_reward: 5,
            power_up_lifetime: Duration::from_secs(10),
            power_up_gap_secs: (15, 16),
        }
    }
}

impl Rules {
    pub fn grid(&self) -> Grid {
        Grid::new(self.cell_count)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_count < 1 {
            return Err(ArenaError::InvalidRules(format!(
                "grid needs at least one cell per side, got {}",
                self.cell_count
            )));
        }

        let (min_gap, max_gap) = self.power_up_gap_secs;
        if min_gap == 0 || min_gap > max_gap {
            return Err(ArenaError::InvalidRules(format!(
                "power-up gap {min_gap}..={max_gap}s is empty or zero"
            )));
        }

        let grid = self.grid();
        let mut occupied: Vec<Pos> = Vec::with_capacity(START_LENGTH * 2);
        for (index, start) in self.starts.iter().enumerate() {
            for segment in start.body() {
                if !grid.contains(segment) {
                    return Err(ArenaError::InvalidRules(format!(
                        "player {} starts partly outside the {}x{} grid",
                        index + 1,
                        self.cell_count,
                        self.cell_count
                    )));
                }
                if occupied.contains(&segment) {
                    return Err(ArenaError::InvalidRules(format!(
                        "starting sneks overlap at ({}, {})",
                        segment.x, segment.y
                    )));
                }
                occupied.push(segment);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = Rules::default();
        assert_eq!(rules.cell_count, 25);
        assert_eq!(rules.food_reward, 1);
        assert_eq!(rules.power_up_reward, 5);
        assert_eq!(rules.power_up_lifetime, Duration::from_secs(10));
        assert_eq!(rules.power_up_gap_secs, (15, 16));
        assert_eq!(rules.validate(), Ok(()));
    }

    #[test]
    fn test_start_body() {
        let start = Start {
            head: Pos::new(18, 9),
            direction: Direction::West,
        };
        let body: Vec<Pos> = start.body().collect();
        assert_eq!(body, vec![Pos::new(18, 9), Pos::new(19, 9), Pos::new(20, 9)]);
    }

    #[test]
    fn test_grid_too_small() {
        let rules = Rules {
            cell_count: 10,
            ..Rules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(ArenaError::InvalidRules(_))
        ));

        let rules = Rules {
            cell_count: 0,
            ..Rules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_smallest_grid_that_fits_both() {
        // Two 3-long sneks on a 3x3 grid still leave three free cells
        let rules = Rules {
            cell_count: 3,
            starts: [
                Start {
                    head: Pos::new(2, 0),
                    direction: Direction::East,
                },
                Start {
                    head: Pos::new(2, 2),
                    direction: Direction::East,
                },
            ],
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Ok(()));

        let rules = Rules {
            cell_count: 2,
            ..rules
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_overlapping_starts() {
        let rules = Rules {
            starts: [
                Start {
                    head: Pos::new(6, 9),
                    direction: Direction::East,
                },
                Start {
                    head: Pos::new(5, 9),
                    direction: Direction::North,
                },
            ],
            ..Rules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(ArenaError::InvalidRules(msg)) if msg.contains("overlap")
        ));
    }

    #[test]
    fn test_bad_gap_range() {
        let rules = Rules {
            power_up_gap_secs: (16, 15),
            ..Rules::default()
        };
        assert!(rules.validate().is_err());
    }
}
