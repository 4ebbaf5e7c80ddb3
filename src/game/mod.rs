//! Rules and state of a two-player snek match, free of any terminal I/O.
//!
//! The [`Arena`] is driven from outside: the caller decides when a tick is
//! due, passes in the current time, and reacts to the [`TickReport`].

pub mod arena;
pub mod collectible;
pub mod error;
pub mod grid;
pub mod rules;
pub mod snake;

pub use arena::{Arena, Crash, GameEvent, Phase, Player, TickReport};
pub use collectible::{Morsel, MorselKind};
pub use error::ArenaError;
pub use grid::{Direction, Grid, Pos};
pub use rules::{Rules, Start};
pub use snake::Snek;
