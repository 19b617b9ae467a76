use super::{
    GuessOutcome, RoundPhase, WaveProgress, COUNTDOWN_DURATION, START_SQUARE_DURATION,
    STARTING_LIVES,
};
use crate::{Difficulty, GameMode, Generator, MoveInstruction, Square, WalkerRound};
use std::time::Duration;

/// The Walker: follow the instructions in your head, then click where you end up.
#[derive(Debug, Clone)]
pub struct WalkerGame {
    difficulty: Difficulty,
    progress: WaveProgress,
    lives: u32,
    round: WalkerRound,
    phase: RoundPhase,
}

impl WalkerGame {
    pub fn new(difficulty: Difficulty, generator: &mut Generator) -> Self {
        let progress = WaveProgress::new();
        Self {
            difficulty,
            progress,
            lives: STARTING_LIVES,
            round: generator.plan_walker_round(progress.wave(), difficulty),
            phase: RoundPhase::Countdown,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> GameMode {
        GameMode::Walker(self.difficulty)
    }

    pub fn progress(&self) -> WaveProgress {
        self.progress
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> &WalkerRound {
        &self.round
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }

    /// Wave reached; the value stored as the mode's score
    pub fn score(&self) -> u32 {
        self.progress.wave()
    }

    /// Time each instruction stays on screen: 2s in wave 1, 0.1s less per
    /// wave, never below 0.5s
    pub fn instruction_interval(&self) -> Duration {
        let secs = 2.0 - (self.progress.wave() as f64 - 1.0) * 0.1;
        Duration::from_secs_f64(secs.max(0.5))
    }

    /// How long the current phase lasts; `None` while waiting on the player
    pub fn phase_duration(&self) -> Option<Duration> {
        match self.phase {
            RoundPhase::Countdown => Some(COUNTDOWN_DURATION),
            RoundPhase::StartSquare => Some(START_SQUARE_DURATION),
            RoundPhase::Instructions { .. } => Some(self.instruction_interval()),
            RoundPhase::Preview | RoundPhase::Guessing | RoundPhase::GameOver => None,
        }
    }

    /// Instruction on screen during the `Instructions` phase
    pub fn current_instruction(&self) -> Option<&MoveInstruction> {
        match self.phase {
            RoundPhase::Instructions { index } => self.round.instructions.get(index),
            _ => None,
        }
    }

    /// Move to the next timed phase
    pub fn advance(&mut self) {
        self.phase = match self.phase {
            RoundPhase::Preview => RoundPhase::Countdown,
            RoundPhase::Countdown => RoundPhase::StartSquare,
            RoundPhase::StartSquare if self.round.instructions.is_empty() => RoundPhase::Guessing,
            RoundPhase::StartSquare => RoundPhase::Instructions { index: 0 },
            RoundPhase::Instructions { index } if index + 1 < self.round.instructions.len() => {
                RoundPhase::Instructions { index: index + 1 }
            }
            RoundPhase::Instructions { .. } => RoundPhase::Guessing,
            other => other,
        };
    }

    /// Player clicked `square` as the final position.
    ///
    /// Right or wrong, a surviving player gets a fresh round.
    pub fn select(&mut self, square: Square, generator: &mut Generator) -> GuessOutcome {
        if self.phase != RoundPhase::Guessing {
            return GuessOutcome::Ignored;
        }

        if square == self.round.target {
            let wave_advanced = self.progress.advance();
            self.next_round(generator);
            return GuessOutcome::RoundCleared { wave_advanced };
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            log::debug!("walker game over at wave {}", self.progress.wave());
            self.phase = RoundPhase::GameOver;
            return GuessOutcome::GameOver {
                wave: self.progress.wave(),
            };
        }

        self.next_round(generator);
        GuessOutcome::Miss {
            lives_left: self.lives,
        }
    }

    /// Start over at wave 1 with full lives
    pub fn restart(&mut self, generator: &mut Generator) {
        *self = Self::new(self.difficulty, generator);
    }

    fn next_round(&mut self, generator: &mut Generator) {
        self.round = generator.plan_walker_round(self.progress.wave(), self.difficulty);
        self.phase = RoundPhase::Countdown;
    }
}
