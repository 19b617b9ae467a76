use blindchess_core::games::{
    BlitzGame, BlitzPhase, GuessOutcome, KnightVisionGame, RoundPhase, WalkerGame, ZenGame,
};
use blindchess_core::{
    CoreError, Difficulty, GameMode, Generator, MoveInstruction, MoveKind, ObstacleField,
    PieceKind, ScoreBook, ScoreError, ScoreStore, Square, SquareColor,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

uniffi::setup_scaffolding!();

/// Errors surfaced to the host app
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum BlindChessError {
    #[error("invalid square: {name}")]
    InvalidSquare { name: String },
    #[error("knight trapped on {square}")]
    Trapped { square: String },
    #[error("could not plan a round after {regenerations} regenerations")]
    RoundGenerationFailed { regenerations: u32 },
    #[error("score storage error: {message}")]
    Storage { message: String },
}

impl From<CoreError> for BlindChessError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidSquare(name) => BlindChessError::InvalidSquare { name },
            CoreError::RoundGenerationFailed { regenerations } => {
                BlindChessError::RoundGenerationFailed {
                    regenerations: regenerations as u32,
                }
            }
            CoreError::Trapped { square } => BlindChessError::Trapped {
                square: square.to_string(),
            },
        }
    }
}

impl From<ScoreError> for BlindChessError {
    fn from(e: ScoreError) -> Self {
        BlindChessError::Storage {
            message: e.to_string(),
        }
    }
}

fn parse_square(name: &str) -> Result<Square, BlindChessError> {
    Ok(name.parse::<Square>()?)
}

// MARK: - Records and enums

/// Difficulty profile for The Walker
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum GameDifficulty {
    Easy,
    Medium,
    Hard,
}

impl From<GameDifficulty> for Difficulty {
    fn from(d: GameDifficulty) -> Self {
        match d {
            GameDifficulty::Easy => Difficulty::Easy,
            GameDifficulty::Medium => Difficulty::Medium,
            GameDifficulty::Hard => Difficulty::Hard,
        }
    }
}

impl From<Difficulty> for GameDifficulty {
    fn from(d: Difficulty) -> Self {
        match d {
            Difficulty::Easy => GameDifficulty::Easy,
            Difficulty::Medium => GameDifficulty::Medium,
            Difficulty::Hard => GameDifficulty::Hard,
        }
    }
}

/// A board square for UI rendering
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct BoardSquare {
    /// File index, 0 for the a-file
    pub file: u8,
    /// Rank index, 0 for rank 1
    pub rank: u8,
    /// Algebraic name, e.g. "e4"
    pub name: String,
    pub is_white: bool,
}

impl From<Square> for BoardSquare {
    fn from(square: Square) -> Self {
        BoardSquare {
            file: square.file_index(),
            rank: square.rank_index(),
            name: square.to_string(),
            is_white: square.color() == SquareColor::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum InstructionKind {
    Straight,
    Diagonal,
    Knight,
}

/// One move instruction as shown to the player
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct Instruction {
    /// Arrow or knight glyph
    pub icon: String,
    /// English text, e.g. "2 Up, 1 Left"
    pub text: String,
    pub df: i8,
    pub dr: i8,
    pub kind: InstructionKind,
}

impl From<&MoveInstruction> for Instruction {
    fn from(m: &MoveInstruction) -> Self {
        Instruction {
            icon: m.icon().to_string(),
            text: m.describe(),
            df: m.df,
            dr: m.dr,
            kind: match m.kind {
                MoveKind::Straight => InstructionKind::Straight,
                MoveKind::Diagonal => InstructionKind::Diagonal,
                MoveKind::Knight => InstructionKind::Knight,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ObstaclePiece {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl From<PieceKind> for ObstaclePiece {
    fn from(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => ObstaclePiece::Pawn,
            PieceKind::Rook => ObstaclePiece::Rook,
            PieceKind::Knight => ObstaclePiece::Knight,
            PieceKind::Bishop => ObstaclePiece::Bishop,
            PieceKind::Queen => ObstaclePiece::Queen,
            PieceKind::King => ObstaclePiece::King,
        }
    }
}

/// A piece marker on the Knight Vision board
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct Obstacle {
    pub square: BoardSquare,
    pub piece: ObstaclePiece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum SquareTone {
    White,
    Black,
}

/// The two diagonals through a square
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct SquareDiagonals {
    /// Toward h8, e.g. "b1-h7"
    pub rising: String,
    /// Toward h1, e.g. "a8-h1"
    pub falling: String,
    /// Every square on either diagonal
    pub squares: Vec<BoardSquare>,
}

/// Phase of a Walker or Knight Vision round
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum GamePhase {
    Preview,
    Countdown,
    StartSquare,
    Instructions { index: u32 },
    Guessing,
    GameOver,
}

impl From<RoundPhase> for GamePhase {
    fn from(phase: RoundPhase) -> Self {
        match phase {
            RoundPhase::Preview => GamePhase::Preview,
            RoundPhase::Countdown => GamePhase::Countdown,
            RoundPhase::StartSquare => GamePhase::StartSquare,
            RoundPhase::Instructions { index } => GamePhase::Instructions {
                index: index as u32,
            },
            RoundPhase::Guessing => GamePhase::Guessing,
            RoundPhase::GameOver => GamePhase::GameOver,
        }
    }
}

/// Result of clicking a square
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum SelectOutcome {
    Ignored,
    Found { remaining: u32 },
    RoundCleared { wave_advanced: bool },
    Miss { lives_left: u32 },
    GameOver { wave: u32 },
}

impl From<GuessOutcome> for SelectOutcome {
    fn from(outcome: GuessOutcome) -> Self {
        match outcome {
            GuessOutcome::Ignored => SelectOutcome::Ignored,
            GuessOutcome::Found { remaining } => SelectOutcome::Found {
                remaining: remaining as u32,
            },
            GuessOutcome::RoundCleared { wave_advanced } => {
                SelectOutcome::RoundCleared { wave_advanced }
            }
            GuessOutcome::Miss { lives_left } => SelectOutcome::Miss { lives_left },
            GuessOutcome::GameOver { wave } => SelectOutcome::GameOver { wave },
        }
    }
}

/// Game mode with its own high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ScoreMode {
    Zen,
    Blitz,
    WalkerEasy,
    WalkerMedium,
    WalkerHard,
    KnightVision,
}

impl From<ScoreMode> for GameMode {
    fn from(mode: ScoreMode) -> Self {
        match mode {
            ScoreMode::Zen => GameMode::Zen,
            ScoreMode::Blitz => GameMode::Blitz,
            ScoreMode::WalkerEasy => GameMode::Walker(Difficulty::Easy),
            ScoreMode::WalkerMedium => GameMode::Walker(Difficulty::Medium),
            ScoreMode::WalkerHard => GameMode::Walker(Difficulty::Hard),
            ScoreMode::KnightVision => GameMode::KnightVision,
        }
    }
}

impl From<GameMode> for ScoreMode {
    fn from(mode: GameMode) -> Self {
        match mode {
            GameMode::Zen => ScoreMode::Zen,
            GameMode::Blitz => ScoreMode::Blitz,
            GameMode::Walker(Difficulty::Easy) => ScoreMode::WalkerEasy,
            GameMode::Walker(Difficulty::Medium) => ScoreMode::WalkerMedium,
            GameMode::Walker(Difficulty::Hard) => ScoreMode::WalkerHard,
            GameMode::KnightVision => ScoreMode::KnightVision,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ScoreEntry {
    pub mode: ScoreMode,
    /// Display name, e.g. "The Walker (Hard)"
    pub title: String,
    /// What the value counts, e.g. "wave"
    pub unit: String,
    pub value: u32,
}

/// Reveal after a Speed Colors answer
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ColorAnswer {
    pub square: BoardSquare,
    pub correct: bool,
    pub diagonals: SquareDiagonals,
}

fn diagonals_of(square: Square) -> SquareDiagonals {
    let diagonals = square.diagonals();
    let mut squares: Vec<Square> = diagonals.rising.squares();
    squares.extend(
        diagonals
            .falling
            .squares()
            .into_iter()
            .filter(|s| *s != square),
    );
    SquareDiagonals {
        rising: diagonals.rising.to_string(),
        falling: diagonals.falling.to_string(),
        squares: squares.into_iter().map(BoardSquare::from).collect(),
    }
}

fn duration_ms(d: Duration) -> u64 {
    d.as_millis() as u64
}

fn tone(is_white: bool) -> SquareColor {
    if is_white {
        SquareColor::White
    } else {
        SquareColor::Black
    }
}

fn new_generator(seed: Option<u64>) -> Generator {
    match seed {
        Some(seed) => Generator::with_seed(seed),
        None => Generator::new(),
    }
}

// MARK: - The Walker

struct WalkerState {
    game: WalkerGame,
    generator: Generator,
}

/// A Walker game for mobile platforms
#[derive(uniffi::Object)]
pub struct WalkerSession {
    state: Mutex<WalkerState>,
}

impl WalkerSession {
    fn create(difficulty: GameDifficulty, seed: Option<u64>) -> Arc<Self> {
        let mut generator = new_generator(seed);
        let game = WalkerGame::new(difficulty.into(), &mut generator);
        Arc::new(Self {
            state: Mutex::new(WalkerState { game, generator }),
        })
    }
}

#[uniffi::export]
impl WalkerSession {
    #[uniffi::constructor]
    pub fn new(difficulty: GameDifficulty) -> Arc<Self> {
        Self::create(difficulty, None)
    }

    /// Reproducible session for tests and daily challenges
    #[uniffi::constructor]
    pub fn with_seed(difficulty: GameDifficulty, seed: u64) -> Arc<Self> {
        Self::create(difficulty, Some(seed))
    }

    pub fn difficulty(&self) -> GameDifficulty {
        self.state.lock().unwrap().game.difficulty().into()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.lock().unwrap().game.phase().into()
    }

    /// How long to show the current phase, `None` while waiting on the player
    pub fn phase_duration_ms(&self) -> Option<u64> {
        self.state.lock().unwrap().game.phase_duration().map(duration_ms)
    }

    pub fn advance(&self) {
        self.state.lock().unwrap().game.advance();
    }

    pub fn start_square(&self) -> BoardSquare {
        self.state.lock().unwrap().game.round().start.into()
    }

    pub fn instructions(&self) -> Vec<Instruction> {
        let state = self.state.lock().unwrap();
        state.game.round().instructions.iter().map(Instruction::from).collect()
    }

    pub fn current_instruction(&self) -> Option<Instruction> {
        let state = self.state.lock().unwrap();
        state.game.current_instruction().map(Instruction::from)
    }

    /// Click a square as the final position
    pub fn select(&self, square: String) -> Result<SelectOutcome, BlindChessError> {
        let square = parse_square(&square)?;
        let mut state = self.state.lock().unwrap();
        let WalkerState { game, generator } = &mut *state;
        Ok(game.select(square, generator).into())
    }

    pub fn wave(&self) -> u32 {
        self.state.lock().unwrap().game.progress().wave()
    }

    pub fn round(&self) -> u32 {
        self.state.lock().unwrap().game.progress().round()
    }

    pub fn rounds_in_wave(&self) -> u32 {
        self.state.lock().unwrap().game.progress().rounds_in_wave()
    }

    pub fn lives(&self) -> u32 {
        self.state.lock().unwrap().game.lives()
    }

    pub fn score(&self) -> u32 {
        self.state.lock().unwrap().game.score()
    }

    pub fn score_mode(&self) -> ScoreMode {
        self.state.lock().unwrap().game.mode().into()
    }

    pub fn restart(&self) {
        let mut state = self.state.lock().unwrap();
        let WalkerState { game, generator } = &mut *state;
        game.restart(generator);
    }
}

// MARK: - Knight Vision

struct KnightVisionState {
    game: KnightVisionGame,
    generator: Generator,
}

/// A Knight Vision game for mobile platforms
#[derive(uniffi::Object)]
pub struct KnightVisionSession {
    state: Mutex<KnightVisionState>,
}

impl KnightVisionSession {
    fn create(seed: Option<u64>) -> Result<Arc<Self>, BlindChessError> {
        let mut generator = new_generator(seed);
        let game = KnightVisionGame::new(&mut generator)?;
        Ok(Arc::new(Self {
            state: Mutex::new(KnightVisionState { game, generator }),
        }))
    }
}

#[uniffi::export]
impl KnightVisionSession {
    #[uniffi::constructor]
    pub fn new() -> Result<Arc<Self>, BlindChessError> {
        Self::create(None)
    }

    #[uniffi::constructor]
    pub fn with_seed(seed: u64) -> Result<Arc<Self>, BlindChessError> {
        Self::create(Some(seed))
    }

    pub fn phase(&self) -> GamePhase {
        self.state.lock().unwrap().game.phase().into()
    }

    pub fn phase_duration_ms(&self) -> Option<u64> {
        self.state.lock().unwrap().game.phase_duration().map(duration_ms)
    }

    pub fn advance(&self) {
        self.state.lock().unwrap().game.advance();
    }

    pub fn obstacles(&self) -> Vec<Obstacle> {
        let state = self.state.lock().unwrap();
        state
            .game
            .round()
            .obstacles
            .iter()
            .map(|(square, kind)| Obstacle {
                square: square.into(),
                piece: kind.into(),
            })
            .collect()
    }

    pub fn start_square(&self) -> BoardSquare {
        self.state.lock().unwrap().game.round().start.into()
    }

    pub fn instructions(&self) -> Vec<Instruction> {
        let state = self.state.lock().unwrap();
        state.game.round().instructions.iter().map(Instruction::from).collect()
    }

    pub fn current_instruction(&self) -> Option<Instruction> {
        let state = self.state.lock().unwrap();
        state.game.current_instruction().map(Instruction::from)
    }

    /// Where the knight ends up, for the reveal after a round
    pub fn final_square(&self) -> BoardSquare {
        self.state.lock().unwrap().game.round().end.into()
    }

    pub fn found_targets(&self) -> Vec<BoardSquare> {
        let state = self.state.lock().unwrap();
        state.game.found().iter().map(|&s| s.into()).collect()
    }

    pub fn target_count(&self) -> u32 {
        self.state.lock().unwrap().game.round().valid_targets.len() as u32
    }

    /// Click a square as a knight jump from the final position
    pub fn select(&self, square: String) -> Result<SelectOutcome, BlindChessError> {
        let square = parse_square(&square)?;
        let mut state = self.state.lock().unwrap();
        let KnightVisionState { game, generator } = &mut *state;
        Ok(game.select(square, generator)?.into())
    }

    pub fn wave(&self) -> u32 {
        self.state.lock().unwrap().game.progress().wave()
    }

    pub fn round(&self) -> u32 {
        self.state.lock().unwrap().game.progress().round()
    }

    pub fn rounds_in_wave(&self) -> u32 {
        self.state.lock().unwrap().game.progress().rounds_in_wave()
    }

    pub fn lives(&self) -> u32 {
        self.state.lock().unwrap().game.lives()
    }

    pub fn score(&self) -> u32 {
        self.state.lock().unwrap().game.score()
    }

    pub fn restart(&self) -> Result<(), BlindChessError> {
        let mut state = self.state.lock().unwrap();
        let KnightVisionState { game, generator } = &mut *state;
        Ok(game.restart(generator)?)
    }
}

// MARK: - Speed Colors

struct ZenState {
    game: ZenGame,
    generator: Generator,
}

/// Untimed Speed Colors
#[derive(uniffi::Object)]
pub struct ZenSession {
    state: Mutex<ZenState>,
}

#[uniffi::export]
impl ZenSession {
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        let mut generator = Generator::new();
        let game = ZenGame::new(&mut generator);
        Arc::new(Self {
            state: Mutex::new(ZenState { game, generator }),
        })
    }

    pub fn square(&self) -> BoardSquare {
        self.state.lock().unwrap().game.square().into()
    }

    /// Answer the current square; `None` if an answer is already showing
    pub fn answer(&self, is_white: bool) -> Option<ColorAnswer> {
        let reveal = self.state.lock().unwrap().game.answer(tone(is_white))?;
        Some(ColorAnswer {
            square: reveal.square.into(),
            correct: reveal.correct,
            diagonals: diagonals_of(reveal.square),
        })
    }

    pub fn next(&self) {
        let mut state = self.state.lock().unwrap();
        let ZenState { game, generator } = &mut *state;
        game.next(generator);
    }

    pub fn streak(&self) -> u32 {
        self.state.lock().unwrap().game.streak()
    }

    pub fn best_streak(&self) -> u32 {
        self.state.lock().unwrap().game.best_streak()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum BlitzState {
    Ready,
    Playing,
    Finished,
}

struct BlitzSessionState {
    game: BlitzGame,
    generator: Generator,
}

/// Speed Colors against the clock; the host drives the clock with `tick`
#[derive(uniffi::Object)]
pub struct BlitzSession {
    state: Mutex<BlitzSessionState>,
}

#[uniffi::export]
impl BlitzSession {
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        let mut generator = Generator::new();
        let game = BlitzGame::new(&mut generator);
        Arc::new(Self {
            state: Mutex::new(BlitzSessionState { game, generator }),
        })
    }

    pub fn state(&self) -> BlitzState {
        match self.state.lock().unwrap().game.phase() {
            BlitzPhase::Ready => BlitzState::Ready,
            BlitzPhase::Playing => BlitzState::Playing,
            BlitzPhase::Finished => BlitzState::Finished,
        }
    }

    pub fn start(&self) {
        let mut state = self.state.lock().unwrap();
        let BlitzSessionState { game, generator } = &mut *state;
        game.start(generator);
    }

    /// Run the clock down; returns `true` when this tick ended the game
    pub fn tick(&self, elapsed_ms: u64) -> bool {
        self.state
            .lock()
            .unwrap()
            .game
            .tick(Duration::from_millis(elapsed_ms))
    }

    /// Answer the current square; `None` unless playing
    pub fn answer(&self, is_white: bool) -> Option<bool> {
        let mut state = self.state.lock().unwrap();
        let BlitzSessionState { game, generator } = &mut *state;
        game.answer(tone(is_white), generator)
    }

    pub fn square(&self) -> BoardSquare {
        self.state.lock().unwrap().game.square().into()
    }

    pub fn remaining_ms(&self) -> u64 {
        duration_ms(self.state.lock().unwrap().game.remaining())
    }

    pub fn score(&self) -> u32 {
        self.state.lock().unwrap().game.score()
    }
}

// MARK: - High scores

/// Best scores stored as JSON at a path chosen by the host app
#[derive(uniffi::Object)]
pub struct HighScores {
    path: PathBuf,
    book: Mutex<ScoreBook>,
}

impl HighScores {
    fn save(&self, book: &ScoreBook) -> Result<(), ScoreError> {
        let json =
            serde_json::to_string_pretty(book).map_err(|e| ScoreError::Format(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ScoreError::Storage(e.to_string()))?;
        }
        std::fs::write(&self.path, json).map_err(|e| ScoreError::Storage(e.to_string()))
    }
}

impl ScoreStore for HighScores {
    fn high_score(&self, mode: GameMode) -> Result<u32, ScoreError> {
        Ok(self.book.lock().unwrap().get(mode))
    }

    fn set_high_score_if_greater(&self, mode: GameMode, value: u32) -> Result<bool, ScoreError> {
        let mut book = self.book.lock().unwrap();
        // Only a written score becomes the in-memory best
        let mut updated = book.clone();
        if !updated.record(mode, value) {
            return Ok(false);
        }
        self.save(&updated)?;
        *book = updated;
        Ok(true)
    }

    fn book(&self) -> Result<ScoreBook, ScoreError> {
        Ok(self.book.lock().unwrap().clone())
    }

    fn backend_name(&self) -> &'static str {
        "File"
    }
}

#[uniffi::export]
impl HighScores {
    /// Open the score file at `path`; a missing or unreadable file starts empty
    #[uniffi::constructor]
    pub fn new(path: String) -> Arc<Self> {
        let path = PathBuf::from(path);
        let book = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable score file {}: {}", path.display(), e);
                ScoreBook::default()
            }),
            Err(_) => ScoreBook::default(),
        };
        Arc::new(Self {
            path,
            book: Mutex::new(book),
        })
    }

    pub fn get(&self, mode: ScoreMode) -> u32 {
        self.book.lock().unwrap().get(mode.into())
    }

    /// Store `value` if it beats the best for `mode`; returns whether it did
    pub fn submit(&self, mode: ScoreMode, value: u32) -> Result<bool, BlindChessError> {
        Ok(self.set_high_score_if_greater(mode.into(), value)?)
    }

    pub fn all(&self) -> Vec<ScoreEntry> {
        self.book
            .lock()
            .unwrap()
            .entries()
            .into_iter()
            .map(|(mode, value)| ScoreEntry {
                mode: mode.into(),
                title: mode.to_string(),
                unit: mode.score_label().to_string(),
                value,
            })
            .collect()
    }
}

// MARK: - Free functions

/// Color of a named square
#[uniffi::export]
pub fn square_color(name: String) -> Result<SquareTone, BlindChessError> {
    Ok(match parse_square(&name)?.color() {
        SquareColor::White => SquareTone::White,
        SquareColor::Black => SquareTone::Black,
    })
}

/// Both diagonals through a named square
#[uniffi::export]
pub fn square_diagonals(name: String) -> Result<SquareDiagonals, BlindChessError> {
    Ok(diagonals_of(parse_square(&name)?))
}

/// Squares a knight on `from` can reach, skipping squares in `obstacles`
#[uniffi::export]
pub fn valid_knight_jumps(
    from: String,
    obstacles: Vec<String>,
) -> Result<Vec<BoardSquare>, BlindChessError> {
    let from = parse_square(&from)?;
    let jumps = blindchess_core::valid_knight_jumps(from, &ObstacleField::empty(from));
    let mut field = ObstacleField::empty(from);
    for name in &obstacles {
        let square = parse_square(name)?;
        // At most eight jump squares, so the pawn cap is never reached
        if jumps.contains(&square) {
            field.insert(square, PieceKind::Pawn);
        }
    }
    Ok(blindchess_core::valid_knight_jumps(from, &field)
        .into_iter()
        .map(BoardSquare::from)
        .collect())
}

/// Parse a stored difficulty tag; anything unknown is Easy
#[uniffi::export]
pub fn parse_difficulty(tag: String) -> GameDifficulty {
    Difficulty::parse_or_default(&tag).into()
}
