use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    #[error("invalid rules: {0}")]
    InvalidRules(String),

    #[error("no free cell left to place a {0}")]
    NoFreeCell(&'static str),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
