//! Round state for each game.
//!
//! Every game is a plain value owned by the caller. The caller drives phase
//! changes with `advance()` after waiting `phase_duration()`, and passes player
//! answers in; nothing here reads a clock or keeps global state.

mod colors;
mod knight_vision;
mod walker;

pub use colors::{BlitzGame, BlitzPhase, ColorReveal, ZenGame, ZenPhase, BLITZ_DURATION, BLITZ_PENALTY};
pub use knight_vision::{KnightVisionGame, INSTRUCTION_INTERVAL, PREVIEW_DURATION};
pub use walker::WalkerGame;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lives at the start of a Walker or Knight Vision game
pub const STARTING_LIVES: u32 = 3;
/// Countdown before the start square is shown
pub const COUNTDOWN_DURATION: Duration = Duration::from_secs(3);
/// How long the start square stays on screen
pub const START_SQUARE_DURATION: Duration = Duration::from_secs(2);

/// Where a round is in its show-then-guess cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Obstacles on screen to memorize (Knight Vision only)
    Preview,
    Countdown,
    /// Start square on screen
    StartSquare,
    /// Showing instruction `index`
    Instructions { index: usize },
    /// Waiting for the player to click
    Guessing,
    GameOver,
}

/// Result of a player's click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// Click not accepted in this phase, or on a square that does not count
    Ignored,
    /// A Knight Vision target found, `remaining` still to find
    Found { remaining: usize },
    /// Round won; a new round has been planned
    RoundCleared { wave_advanced: bool },
    /// Wrong square, one life lost
    Miss { lives_left: u32 },
    /// Last life lost; `wave` is the final score
    GameOver { wave: u32 },
}

/// Wave and round counters
///
/// Wave 1 has three rounds, every later wave five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveProgress {
    wave: u32,
    round: u32,
}

impl Default for WaveProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveProgress {
    pub fn new() -> Self {
        Self { wave: 1, round: 1 }
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn rounds_in_wave(&self) -> u32 {
        Self::rounds_in(self.wave)
    }

    pub fn rounds_in(wave: u32) -> u32 {
        if wave == 1 {
            3
        } else {
            5
        }
    }

    /// Rounds already cleared in the current wave
    pub fn cleared(&self) -> u32 {
        self.round - 1
    }

    /// Move past a cleared round; returns `true` when a new wave starts
    pub fn advance(&mut self) -> bool {
        if self.round < self.rounds_in_wave() {
            self.round += 1;
            false
        } else {
            self.wave += 1;
            self.round = 1;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_progress() {
        let mut progress = WaveProgress::new();
        assert_eq!((progress.wave(), progress.round()), (1, 1));
        assert_eq!(progress.rounds_in_wave(), 3);

        assert!(!progress.advance());
        assert!(!progress.advance());
        assert_eq!(progress.cleared(), 2);
        assert!(progress.advance());
        assert_eq!((progress.wave(), progress.round()), (2, 1));
        assert_eq!(progress.rounds_in_wave(), 5);

        for _ in 0..4 {
            assert!(!progress.advance());
        }
        assert!(progress.advance());
        assert_eq!(progress.wave(), 3);
    }
}
