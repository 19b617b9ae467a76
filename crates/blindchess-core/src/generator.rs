use crate::knight::{knight_instructions, valid_knight_jumps};
use crate::moves::candidate_moves;
use crate::{
    CoreError, CoreResult, Difficulty, KnightRound, MoveInstruction, ObstacleField, PieceKind,
    Square, WalkerRound, BOARD_SIZE,
};

/// Limits for round generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Knight paths tried from one start/obstacle layout before regenerating it
    pub max_path_attempts: usize,
    /// Fresh start/obstacle layouts tried before giving up on a knight round
    pub max_regenerations: usize,
    /// Obstacles in the first wave
    pub base_obstacles: usize,
    /// Obstacle ceiling for later waves
    pub max_obstacles: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_path_attempts: 20,
            max_regenerations: 64,
            base_obstacles: 3,
            max_obstacles: 6,
        }
    }
}

/// Random source for squares, moves, obstacle fields and whole rounds.
///
/// All randomness in the engine flows through one `Generator`, so a seeded
/// generator replays the same sequence of rounds.
pub struct Generator {
    config: GeneratorConfig,
    rng: SimpleRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator seeded from the OS
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with custom limits
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::with_seed(seed),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of instructions in a round of `wave`
    pub fn moves_for_wave(wave: u32) -> usize {
        wave as usize + 1
    }

    /// Number of obstacles requested for a Knight Vision round of `wave`
    pub fn obstacles_for_wave(&self, wave: u32) -> usize {
        (self.config.base_obstacles + wave as usize / 2).min(self.config.max_obstacles)
    }

    /// A uniformly random square
    pub fn random_square(&mut self) -> Square {
        let squares = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);
        Square::from_index(self.rng.next_usize(squares) as u8)
    }

    /// Pick one legal move for `difficulty` uniformly at random
    pub fn generate_move(&mut self, current: Square, difficulty: Difficulty) -> MoveInstruction {
        let moves = candidate_moves(current, difficulty);
        // Every square has at least seven straight moves
        moves[self.rng.next_usize(moves.len())]
    }

    /// Place up to `count` obstacles on random squares other than `exclude`.
    ///
    /// Each scanned square draws a random piece kind and is skipped when that
    /// kind is already at its cap, so the field can come out smaller than
    /// `count`.
    pub fn generate_obstacles(&mut self, count: usize, exclude: Square) -> ObstacleField {
        let mut squares: Vec<Square> = Square::all().filter(|&s| s != exclude).collect();
        self.shuffle(&mut squares);

        let mut field = ObstacleField::empty(exclude);
        for square in squares {
            if field.len() >= count {
                break;
            }
            let kind = PieceKind::ALL[self.rng.next_usize(PieceKind::ALL.len())];
            field.insert(square, kind);
        }

        if field.len() < count {
            log::debug!(
                "obstacle field short: placed {} of {} requested",
                field.len(),
                count
            );
        }
        field
    }

    /// Pick one knight jump from `current` that avoids the obstacles
    pub fn knight_instruction(
        &mut self,
        current: Square,
        obstacles: &ObstacleField,
    ) -> CoreResult<MoveInstruction> {
        let moves = knight_instructions(current, obstacles);
        if moves.is_empty() {
            return Err(CoreError::Trapped { square: current });
        }
        Ok(moves[self.rng.next_usize(moves.len())])
    }

    /// Build a Walker path of `steps` instructions from `start`
    pub fn build_path(&mut self, start: Square, steps: usize, difficulty: Difficulty) -> WalkerRound {
        let mut instructions = Vec::with_capacity(steps);
        let mut current = start;

        for _ in 0..steps {
            let instruction = self.generate_move(current, difficulty);
            // Candidates are filtered to on-board destinations
            current = instruction.apply(current).unwrap_or(current);
            instructions.push(instruction);
        }

        WalkerRound {
            start,
            instructions,
            target: current,
        }
    }

    /// Build a knight path of `steps` jumps from `start` that never lands on an obstacle.
    ///
    /// Fails with [`CoreError::Trapped`] as soon as the knight has nowhere to go.
    pub fn build_knight_path(
        &mut self,
        start: Square,
        steps: usize,
        obstacles: &ObstacleField,
    ) -> CoreResult<Vec<MoveInstruction>> {
        self.knight_walk(start, steps, obstacles)
            .map(|(instructions, _)| instructions)
    }

    fn knight_walk(
        &mut self,
        start: Square,
        steps: usize,
        obstacles: &ObstacleField,
    ) -> CoreResult<(Vec<MoveInstruction>, Square)> {
        let mut instructions = Vec::with_capacity(steps);
        let mut current = start;

        for _ in 0..steps {
            let instruction = self.knight_instruction(current, obstacles)?;
            current = instruction
                .apply(current)
                .ok_or(CoreError::Trapped { square: current })?;
            instructions.push(instruction);
        }

        Ok((instructions, current))
    }

    /// Plan a Walker round for `wave` from a random start
    pub fn plan_walker_round(&mut self, wave: u32, difficulty: Difficulty) -> WalkerRound {
        let start = self.random_square();
        self.build_path(start, Self::moves_for_wave(wave), difficulty)
    }

    /// Plan a Knight Vision round for `wave`.
    ///
    /// A trapped path restarts from the same start square, up to
    /// `max_path_attempts` times. After that the start and obstacles are
    /// regenerated, up to `max_regenerations` times.
    pub fn plan_knight_round(&mut self, wave: u32) -> CoreResult<KnightRound> {
        let obstacle_count = self.obstacles_for_wave(wave);
        let steps = Self::moves_for_wave(wave);

        for regeneration in 0..self.config.max_regenerations {
            let start = self.random_square();
            let obstacles = self.generate_obstacles(obstacle_count, start);

            for attempt in 0..self.config.max_path_attempts {
                match self.knight_walk(start, steps, &obstacles) {
                    Ok((instructions, end)) => {
                        let valid_targets = valid_knight_jumps(end, &obstacles);
                        return Ok(KnightRound {
                            start,
                            obstacles,
                            instructions,
                            end,
                            valid_targets,
                        });
                    }
                    Err(CoreError::Trapped { square }) => {
                        log::trace!("knight trapped on {square} (attempt {attempt}), restarting from {start}");
                    }
                    Err(err) => return Err(err),
                }
            }

            log::debug!(
                "no knight path from {start} after {} attempts, regenerating layout ({})",
                self.config.max_path_attempts,
                regeneration + 1
            );
        }

        log::warn!(
            "giving up on knight round for wave {wave} after {} regenerations",
            self.config.max_regenerations
        );
        Err(CoreError::RoundGenerationFailed {
            regenerations: self.config.max_regenerations,
        })
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.rng.next_usize(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Small PCG-style PRNG, seeded through getrandom so it also works on wasm
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        if let Err(err) = getrandom::getrandom(&mut seed_bytes) {
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            log::warn!("getrandom failed ({err}), falling back to counter seed");
            seed_bytes = counter.to_le_bytes();
        }
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{follow, MoveKind, KNIGHT_OFFSETS};

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_random_square_covers_board() {
        let mut generator = Generator::with_seed(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(generator.random_square());
        }
        assert_eq!(seen.len(), 64);
    }

    #[test]
    fn test_generated_moves_respect_difficulty() {
        let mut generator = Generator::with_seed(42);
        for square in Square::all() {
            for _ in 0..20 {
                let easy = generator.generate_move(square, Difficulty::Easy);
                assert_eq!(easy.kind, MoveKind::Straight);
                assert!(easy.apply(square).is_some());

                let medium = generator.generate_move(square, Difficulty::Medium);
                assert_ne!(medium.kind, MoveKind::Knight);
                assert!(medium.apply(square).is_some());

                let hard = generator.generate_move(square, Difficulty::Hard);
                if hard.kind == MoveKind::Knight {
                    assert!(KNIGHT_OFFSETS.contains(&(hard.df, hard.dr)));
                }
                assert!(hard.apply(square).is_some());
            }
        }
    }

    #[test]
    fn test_obstacle_field_invariants() {
        let mut generator = Generator::with_seed(3);
        for count in [0, 3, 6, 20, 63, 100] {
            for _ in 0..50 {
                let exclude = generator.random_square();
                let field = generator.generate_obstacles(count, exclude);
                assert!(field.len() <= count);
                assert!(!field.contains(exclude));
                for kind in PieceKind::ALL {
                    assert!(field.count_of(kind) <= kind.max_count());
                }
            }
        }
    }

    #[test]
    fn test_small_fields_are_full() {
        // With at most 6 requested, no kind can hit its cap except the king,
        // and a rejected king still leaves 62 more squares to scan.
        let mut generator = Generator::with_seed(11);
        for _ in 0..200 {
            let field = generator.generate_obstacles(6, sq("e4"));
            assert_eq!(field.len(), 6);
        }
    }

    #[test]
    fn test_build_path_lands_on_target() {
        let mut generator = Generator::with_seed(99);
        for difficulty in Difficulty::ALL {
            let round = generator.build_path(sq("d4"), 12, difficulty);
            assert_eq!(round.instructions.len(), 12);
            assert_eq!(follow(round.start, &round.instructions), Some(round.target));
        }
    }

    #[test]
    fn test_knight_path_avoids_obstacles() {
        let mut generator = Generator::with_seed(5);
        let mut field = ObstacleField::empty(sq("d4"));
        field.insert(sq("e6"), PieceKind::Rook);
        field.insert(sq("f5"), PieceKind::Bishop);

        let path = generator.build_knight_path(sq("d4"), 10, &field).unwrap();
        assert_eq!(path.len(), 10);
        let mut current = sq("d4");
        for step in path {
            current = step.apply(current).unwrap();
            assert!(!field.contains(current));
        }
    }

    #[test]
    fn test_knight_trapped() {
        let mut generator = Generator::with_seed(1);
        let mut field = ObstacleField::empty(sq("a1"));
        field.insert(sq("b3"), PieceKind::Pawn);
        field.insert(sq("c2"), PieceKind::Pawn);

        assert_eq!(
            generator.build_knight_path(sq("a1"), 2, &field),
            Err(CoreError::Trapped { square: sq("a1") })
        );
        assert!(generator.knight_instruction(sq("a1"), &field).is_err());
        assert_eq!(generator.build_knight_path(sq("a1"), 0, &field), Ok(vec![]));
    }

    #[test]
    fn test_plan_knight_round() {
        let mut generator = Generator::with_seed(2024);
        for wave in 1..=8 {
            let round = generator.plan_knight_round(wave).unwrap();
            assert_eq!(round.instructions.len(), wave as usize + 1);
            assert!(!round.obstacles.contains(round.start));
            assert_eq!(round.obstacles.excluded(), round.start);
            assert!(round.obstacles.len() <= generator.obstacles_for_wave(wave));
            assert_eq!(follow(round.start, &round.instructions), Some(round.end));
            assert_eq!(round.valid_targets, valid_knight_jumps(round.end, &round.obstacles));
        }
    }

    #[test]
    fn test_obstacles_for_wave() {
        let generator = Generator::with_seed(0);
        assert_eq!(generator.obstacles_for_wave(1), 3);
        assert_eq!(generator.obstacles_for_wave(2), 4);
        assert_eq!(generator.obstacles_for_wave(6), 6);
        assert_eq!(generator.obstacles_for_wave(40), 6);
        assert_eq!(Generator::moves_for_wave(1), 2);
    }

    #[test]
    fn test_round_generation_gives_up() {
        // Zero layouts allowed means the planner fails without looping
        let mut generator = Generator::with_config(GeneratorConfig {
            max_regenerations: 0,
            ..GeneratorConfig::default()
        });
        assert_eq!(
            generator.plan_knight_round(1),
            Err(CoreError::RoundGenerationFailed { regenerations: 0 })
        );
    }

    #[test]
    fn test_plan_knight_round_crowded_board() {
        // A crowded board traps walks often, so retries and fresh layouts get used
        let mut generator = Generator::with_config(GeneratorConfig {
            max_path_attempts: 2,
            base_obstacles: 40,
            max_obstacles: 40,
            ..GeneratorConfig::default()
        });
        for _ in 0..20 {
            let round = generator.plan_knight_round(1).unwrap();
            assert!(round.obstacles.len() > 30);
            assert!(!round.obstacles.contains(round.start));
            assert_eq!(round.instructions.len(), 2);

            let mut current = round.start;
            for step in &round.instructions {
                assert_eq!(step.kind, MoveKind::Knight);
                current = step.apply(current).unwrap();
                assert!(!round.obstacles.contains(current));
            }
            assert_eq!(current, round.end);
            assert_eq!(round.valid_targets, valid_knight_jumps(round.end, &round.obstacles));
        }
    }

    #[test]
    fn test_round_generation_exhausts_regenerations() {
        let mut generator = Generator::with_config(GeneratorConfig {
            max_path_attempts: 0,
            max_regenerations: 3,
            ..GeneratorConfig::default()
        });
        assert_eq!(
            generator.plan_knight_round(2),
            Err(CoreError::RoundGenerationFailed { regenerations: 3 })
        );
    }

    #[test]
    fn test_seed_reproducibility() {
        let mut a = Generator::with_seed(12345);
        let mut b = Generator::with_seed(12345);
        assert_eq!(a.plan_walker_round(3, Difficulty::Hard), b.plan_walker_round(3, Difficulty::Hard));
        assert_eq!(a.plan_knight_round(3), b.plan_knight_round(3));
    }
}
