use super::{
    GuessOutcome, RoundPhase, WaveProgress, COUNTDOWN_DURATION, START_SQUARE_DURATION,
    STARTING_LIVES,
};
use crate::{CoreResult, GameMode, Generator, KnightRound, MoveInstruction, Square};
use std::collections::BTreeSet;
use std::time::Duration;

/// How long the obstacle field is shown before the countdown
pub const PREVIEW_DURATION: Duration = Duration::from_secs(5);
/// How long each knight instruction stays on screen
pub const INSTRUCTION_INTERVAL: Duration = Duration::from_secs(2);

/// Knight Vision: remember the obstacles, follow the knight, then find every
/// square it can jump to.
#[derive(Debug, Clone)]
pub struct KnightVisionGame {
    progress: WaveProgress,
    lives: u32,
    round: KnightRound,
    found: BTreeSet<Square>,
    phase: RoundPhase,
}

impl KnightVisionGame {
    pub fn new(generator: &mut Generator) -> CoreResult<Self> {
        let progress = WaveProgress::new();
        Ok(Self {
            progress,
            lives: STARTING_LIVES,
            round: generator.plan_knight_round(progress.wave())?,
            found: BTreeSet::new(),
            phase: RoundPhase::Preview,
        })
    }

    pub fn mode(&self) -> GameMode {
        GameMode::KnightVision
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

    pub fn round(&self) -> &KnightRound {
        &self.round
    }

    /// Targets the player has already clicked this round
    pub fn found(&self) -> &BTreeSet<Square> {
        &self.found
    }

    pub fn remaining(&self) -> usize {
        self.round.valid_targets.len() - self.found.len()
    }

    pub fn is_round_cleared(&self) -> bool {
        self.remaining() == 0
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }

    /// Wave reached; the value stored as the mode's score
    pub fn score(&self) -> u32 {
        self.progress.wave()
    }

    /// How long the current phase lasts; `None` while waiting on the player
    pub fn phase_duration(&self) -> Option<Duration> {
        match self.phase {
            RoundPhase::Preview => Some(PREVIEW_DURATION),
            RoundPhase::Countdown => Some(COUNTDOWN_DURATION),
            RoundPhase::StartSquare => Some(START_SQUARE_DURATION),
            RoundPhase::Instructions { .. } => Some(INSTRUCTION_INTERVAL),
            RoundPhase::Guessing | RoundPhase::GameOver => None,
        }
    }

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

    /// Player clicked `square` as a knight jump from the final position.
    ///
    /// Clicks on the knight itself or on an already found target are ignored.
    /// A round whose final square has no legal jump is cleared by the next click.
    pub fn select(&mut self, square: Square, generator: &mut Generator) -> CoreResult<GuessOutcome> {
        if self.phase != RoundPhase::Guessing {
            return Ok(GuessOutcome::Ignored);
        }

        if self.round.valid_targets.is_empty() {
            log::debug!("knight on {} has no jumps, clearing round", self.round.end);
            return self.clear_round(generator);
        }

        if square == self.round.end || self.found.contains(&square) {
            return Ok(GuessOutcome::Ignored);
        }

        if self.round.valid_targets.contains(&square) {
            self.found.insert(square);
            if self.is_round_cleared() {
                return self.clear_round(generator);
            }
            return Ok(GuessOutcome::Found {
                remaining: self.remaining(),
            });
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            log::debug!("knight vision game over at wave {}", self.progress.wave());
            self.phase = RoundPhase::GameOver;
            return Ok(GuessOutcome::GameOver {
                wave: self.progress.wave(),
            });
        }
        Ok(GuessOutcome::Miss {
            lives_left: self.lives,
        })
    }

    /// Start over at wave 1 with full lives
    pub fn restart(&mut self, generator: &mut Generator) -> CoreResult<()> {
        *self = Self::new(generator)?;
        Ok(())
    }

    fn clear_round(&mut self, generator: &mut Generator) -> CoreResult<GuessOutcome> {
        let wave_advanced = self.progress.advance();
        self.round = generator.plan_knight_round(self.progress.wave())?;
        self.found.clear();
        self.phase = RoundPhase::Preview;
        Ok(GuessOutcome::RoundCleared { wave_advanced })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{valid_knight_jumps, ObstacleField, PieceKind};

    fn to_guessing(game: &mut KnightVisionGame) {
        while game.phase() != RoundPhase::Guessing {
            game.advance();
        }
    }

    fn wrong_square(game: &KnightVisionGame) -> Square {
        let round = game.round();
        Square::all()
            .find(|s| *s != round.end && !round.valid_targets.contains(s))
            .unwrap()
    }

    /// Seeded generator whose first round has at least two targets
    fn game_with_targets() -> (KnightVisionGame, Generator) {
        for seed in 0.. {
            let mut generator = Generator::with_seed(seed);
            let game = KnightVisionGame::new(&mut generator).unwrap();
            if game.round().valid_targets.len() >= 2 {
                return (game, generator);
            }
        }
        unreachable!()
    }

    #[test]
    fn test_phase_sequence() {
        let mut generator = Generator::with_seed(17);
        let mut game = KnightVisionGame::new(&mut generator).unwrap();

        assert_eq!(game.phase(), RoundPhase::Preview);
        assert_eq!(game.phase_duration(), Some(PREVIEW_DURATION));
        game.advance();
        assert_eq!(game.phase(), RoundPhase::Countdown);
        game.advance();
        assert_eq!(game.phase(), RoundPhase::StartSquare);
        game.advance();
        assert_eq!(game.phase(), RoundPhase::Instructions { index: 0 });
        assert_eq!(game.phase_duration(), Some(INSTRUCTION_INTERVAL));
        game.advance();
        game.advance();
        assert_eq!(game.phase(), RoundPhase::Guessing);
    }

    #[test]
    fn test_find_all_targets() {
        let (mut game, mut generator) = game_with_targets();
        to_guessing(&mut game);

        let end = game.round().end;
        assert_eq!(game.select(end, &mut generator).unwrap(), GuessOutcome::Ignored);

        let targets: Vec<Square> = game.round().valid_targets.iter().copied().collect();
        let (last, rest) = targets.split_last().unwrap();
        for (i, &target) in rest.iter().enumerate() {
            assert_eq!(
                game.select(target, &mut generator).unwrap(),
                GuessOutcome::Found {
                    remaining: targets.len() - i - 1
                }
            );
            assert_eq!(game.select(target, &mut generator).unwrap(), GuessOutcome::Ignored);
        }

        assert_eq!(
            game.select(*last, &mut generator).unwrap(),
            GuessOutcome::RoundCleared {
                wave_advanced: false
            }
        );
        assert_eq!(game.progress().round(), 2);
        assert!(game.found().is_empty());
        assert_eq!(game.phase(), RoundPhase::Preview);
        assert_eq!(game.lives(), STARTING_LIVES);
    }

    #[test]
    fn test_misses_cost_lives() {
        let (mut game, mut generator) = game_with_targets();
        to_guessing(&mut game);

        let wrong = wrong_square(&game);
        assert_eq!(
            game.select(wrong, &mut generator).unwrap(),
            GuessOutcome::Miss { lives_left: 2 }
        );
        // The round stays open after a miss
        assert_eq!(game.phase(), RoundPhase::Guessing);
        assert_eq!(
            game.select(wrong, &mut generator).unwrap(),
            GuessOutcome::Miss { lives_left: 1 }
        );
        assert_eq!(
            game.select(wrong, &mut generator).unwrap(),
            GuessOutcome::GameOver { wave: 1 }
        );
        assert!(game.is_game_over());
        assert_eq!(game.select(wrong, &mut generator).unwrap(), GuessOutcome::Ignored);

        game.restart(&mut generator).unwrap();
        assert_eq!(game.lives(), STARTING_LIVES);
        assert_eq!(game.progress().wave(), 1);
    }

    #[test]
    fn test_round_without_jumps_clears_on_click() {
        let corner: Square = "a1".parse().unwrap();
        let mut obstacles = ObstacleField::empty(corner);
        obstacles.insert("b3".parse().unwrap(), PieceKind::Pawn);
        obstacles.insert("c2".parse().unwrap(), PieceKind::Rook);
        let valid_targets = valid_knight_jumps(corner, &obstacles);
        assert!(valid_targets.is_empty());

        let mut generator = Generator::with_seed(3);
        let mut game = KnightVisionGame {
            progress: WaveProgress::new(),
            lives: STARTING_LIVES,
            round: KnightRound {
                start: corner,
                obstacles,
                instructions: vec![],
                end: corner,
                valid_targets,
            },
            found: BTreeSet::new(),
            phase: RoundPhase::Guessing,
        };
        assert!(game.is_round_cleared());

        let far: Square = "h8".parse().unwrap();
        assert_eq!(
            game.select(far, &mut generator).unwrap(),
            GuessOutcome::RoundCleared {
                wave_advanced: false
            }
        );
        assert_eq!(game.lives(), STARTING_LIVES);
        assert_eq!(game.progress().round(), 2);
        assert_eq!(game.phase(), RoundPhase::Preview);
    }
}
