// Puzzle domain: tile vocabulary, hand codec, question codec.
// Pure and synchronous; nothing in here performs I/O.

pub mod hand;
pub mod question;
pub mod tile;

use thiserror::Error;

pub use hand::Hand;
pub use question::{Question, StoredQuestion};
pub use tile::{all_tiles, Tile};

/// Codec failures. Only `InvalidHandLength` is retried by the generator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MahjongError {
    #[error("Cannot parse mahjong tile token: {0:?}")]
    InvalidTileToken(String),

    #[error("Unexpected mahjong hand length: expected={expected}, actual={actual}")]
    InvalidHandLength { expected: usize, actual: usize },

    #[error("Missing field in question block: {0}")]
    MissingField(&'static str),

    #[error("Difficulty must be an integer from 1 to 5, got {0:?}")]
    InvalidDifficulty(String),
}
