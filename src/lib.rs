pub mod game;
pub mod input;
pub mod tick;
pub mod ui;
