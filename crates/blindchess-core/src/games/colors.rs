use crate::{Diagonals, GameMode, Generator, Square, SquareColor};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time budget for one Blitz game
pub const BLITZ_DURATION: Duration = Duration::from_secs(60);
/// Time taken off the Blitz clock for a wrong answer
pub const BLITZ_PENALTY: Duration = Duration::from_secs(5);

/// What the player saw after answering a Zen square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorReveal {
    pub square: Square,
    pub color: SquareColor,
    pub correct: bool,
    pub diagonals: Diagonals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZenPhase {
    Guessing,
    /// Answer given; the reveal is on screen until `next`
    Result,
}

/// Speed Colors without a clock
#[derive(Debug, Clone)]
pub struct ZenGame {
    square: Square,
    streak: u32,
    best_streak: u32,
    reveal: Option<ColorReveal>,
    phase: ZenPhase,
}

impl ZenGame {
    pub fn new(generator: &mut Generator) -> Self {
        Self {
            square: generator.random_square(),
            streak: 0,
            best_streak: 0,
            reveal: None,
            phase: ZenPhase::Guessing,
        }
    }

    pub fn mode(&self) -> GameMode {
        GameMode::Zen
    }

    pub fn square(&self) -> Square {
        self.square
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn phase(&self) -> ZenPhase {
        self.phase
    }

    /// Reveal for the last answer, while in `Result`
    pub fn reveal(&self) -> Option<&ColorReveal> {
        match self.phase {
            ZenPhase::Result => self.reveal.as_ref(),
            ZenPhase::Guessing => None,
        }
    }

    pub fn score(&self) -> u32 {
        self.best_streak
    }

    /// Score the current square; `None` if an answer is already showing
    pub fn answer(&mut self, color: SquareColor) -> Option<ColorReveal> {
        if self.phase != ZenPhase::Guessing {
            return None;
        }

        let actual = self.square.color();
        let correct = actual == color;
        if correct {
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }

        let reveal = ColorReveal {
            square: self.square,
            color: actual,
            correct,
            diagonals: self.square.diagonals(),
        };
        self.reveal = Some(reveal);
        self.phase = ZenPhase::Result;
        Some(reveal)
    }

    /// Draw the next square
    pub fn next(&mut self, generator: &mut Generator) {
        self.square = generator.random_square();
        self.phase = ZenPhase::Guessing;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlitzPhase {
    Ready,
    Playing,
    Finished,
}

/// Speed Colors against a 60 second clock
#[derive(Debug, Clone)]
pub struct BlitzGame {
    square: Square,
    score: u32,
    remaining: Duration,
    phase: BlitzPhase,
}

impl BlitzGame {
    pub fn new(generator: &mut Generator) -> Self {
        Self {
            square: generator.random_square(),
            score: 0,
            remaining: BLITZ_DURATION,
            phase: BlitzPhase::Ready,
        }
    }

    pub fn mode(&self) -> GameMode {
        GameMode::Blitz
    }

    pub fn square(&self) -> Square {
        self.square
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Time left on the clock
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn phase(&self) -> BlitzPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == BlitzPhase::Finished
    }

    /// Reset the clock and score and begin playing
    pub fn start(&mut self, generator: &mut Generator) {
        self.square = generator.random_square();
        self.score = 0;
        self.remaining = BLITZ_DURATION;
        self.phase = BlitzPhase::Playing;
    }

    /// Run the clock down by `elapsed`; returns `true` if this tick ended the game
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.phase != BlitzPhase::Playing {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.finish_if_out_of_time()
    }

    /// Answer the current square; returns whether it was right, or `None`
    /// when the game is not running
    pub fn answer(&mut self, color: SquareColor, generator: &mut Generator) -> Option<bool> {
        if self.phase != BlitzPhase::Playing {
            return None;
        }

        let correct = self.square.color() == color;
        if correct {
            self.score += 1;
        } else {
            self.remaining = self.remaining.saturating_sub(BLITZ_PENALTY);
        }
        self.square = generator.random_square();
        self.finish_if_out_of_time();
        Some(correct)
    }

    fn finish_if_out_of_time(&mut self) -> bool {
        if self.remaining.is_zero() {
            log::debug!("blitz finished with {} points", self.score);
            self.phase = BlitzPhase::Finished;
            true
        } else {
            false
        }
    }
}
