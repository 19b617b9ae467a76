//! Best-score bookkeeping per game mode
//!
//! The core only defines the contract and an in-memory store; durable backends
//! live with the front ends.

use crate::Difficulty;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

/// A game mode with its own best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Speed Colors, untimed; score is the best streak
    Zen,
    /// Speed Colors against the clock; score is correct answers
    Blitz,
    /// The Walker; score is the wave reached
    Walker(Difficulty),
    /// Knight Vision; score is the wave reached
    KnightVision,
}

impl GameMode {
    pub const ALL: [GameMode; 6] = [
        GameMode::Zen,
        GameMode::Blitz,
        GameMode::Walker(Difficulty::Easy),
        GameMode::Walker(Difficulty::Medium),
        GameMode::Walker(Difficulty::Hard),
        GameMode::KnightVision,
    ];

    /// Stable storage key
    pub fn key(self) -> &'static str {
        match self {
            GameMode::Zen => "zen",
            GameMode::Blitz => "blitz",
            GameMode::Walker(Difficulty::Easy) => "walker_easy",
            GameMode::Walker(Difficulty::Medium) => "walker_medium",
            GameMode::Walker(Difficulty::Hard) => "walker_hard",
            GameMode::KnightVision => "knight_vision",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.key() == key)
    }

    /// What the stored number counts
    pub fn score_label(self) -> &'static str {
        match self {
            GameMode::Zen => "best streak",
            GameMode::Blitz => "points",
            GameMode::Walker(_) | GameMode::KnightVision => "wave",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Zen => write!(f, "Speed Colors Zen"),
            GameMode::Blitz => write!(f, "Speed Colors Blitz"),
            GameMode::Walker(difficulty) => write!(f, "The Walker ({})", difficulty),
            GameMode::KnightVision => write!(f, "Knight Vision"),
        }
    }
}

/// Best score per mode key; also the on-disk format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBook {
    #[serde(default)]
    scores: BTreeMap<String, u32>,
}

impl ScoreBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score for `mode`, 0 if never recorded
    pub fn get(&self, mode: GameMode) -> u32 {
        self.scores.get(mode.key()).copied().unwrap_or(0)
    }

    /// Store `value` if it beats the current best; returns whether it did
    pub fn record(&mut self, mode: GameMode, value: u32) -> bool {
        if value > self.get(mode) {
            self.scores.insert(mode.key().to_string(), value);
            true
        } else {
            false
        }
    }

    /// All modes with their best scores, in [`GameMode::ALL`] order
    pub fn entries(&self) -> Vec<(GameMode, u32)> {
        GameMode::ALL
            .into_iter()
            .map(|mode| (mode, self.get(mode)))
            .collect()
    }
}

/// Errors that can occur while reading or writing scores
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    /// The backing file could not be read or written
    #[error("score storage error: {0}")]
    Storage(String),
    /// The stored data could not be encoded or decoded
    #[error("score format error: {0}")]
    Format(String),
    /// The backend is switched off
    #[error("score backend unavailable: {0}")]
    Unavailable(String),
}

/// Persistence contract for best scores
pub trait ScoreStore: Send + Sync {
    /// Best score for `mode`, 0 if never recorded
    fn high_score(&self, mode: GameMode) -> Result<u32, ScoreError>;

    /// Persist `value` if it beats the stored best; returns whether it did
    fn set_high_score_if_greater(&self, mode: GameMode, value: u32) -> Result<bool, ScoreError>;

    /// Snapshot of every stored score
    fn book(&self) -> Result<ScoreBook, ScoreError>;

    /// Backend name for display
    fn backend_name(&self) -> &'static str;
}

/// Score store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    book: Mutex<ScoreBook>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_book(book: ScoreBook) -> Self {
        Self {
            book: Mutex::new(book),
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn high_score(&self, mode: GameMode) -> Result<u32, ScoreError> {
        Ok(self.book.lock().unwrap().get(mode))
    }

    fn set_high_score_if_greater(&self, mode: GameMode, value: u32) -> Result<bool, ScoreError> {
        Ok(self.book.lock().unwrap().record(mode, value))
    }

    fn book(&self) -> Result<ScoreBook, ScoreError> {
        Ok(self.book.lock().unwrap().clone())
    }

    fn backend_name(&self) -> &'static str {
        "Memory"
    }
}
