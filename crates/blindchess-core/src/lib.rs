//! Core engine for blindfold chess training games
//!
//! Everything here is a pure function or a plain value: squares and their
//! colors, relative move instructions, obstacle fields, knight reachability and
//! the per-game round state. Presentation and storage live in the front-end
//! crates.

mod error;
mod generator;
mod knight;
mod moves;
mod obstacles;
mod path;
mod scores;
mod square;

pub mod games;

pub use error::{CoreError, CoreResult};
pub use generator::{Generator, GeneratorConfig};
pub use knight::{knight_instructions, valid_knight_jumps, KNIGHT_OFFSETS};
pub use moves::{candidate_moves, Difficulty, MoveInstruction, MoveKind, MAX_STEP};
pub use obstacles::{ObstacleField, PieceKind};
pub use path::{follow, KnightRound, WalkerRound};
pub use scores::{GameMode, MemoryScoreStore, ScoreBook, ScoreError, ScoreStore};
pub use square::{Diagonal, Diagonals, Square, SquareColor, BOARD_SIZE};
