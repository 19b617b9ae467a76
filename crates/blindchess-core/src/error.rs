use crate::Square;

/// Errors produced by the core engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A square name that is not `a1`..`h8`
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    /// The knight has no on-board, unoccupied jump from `square`
    #[error("knight trapped on {square}")]
    Trapped { square: Square },

    /// Every start/obstacle configuration tried produced a trapped path
    #[error("could not plan a knight round after {regenerations} regenerations")]
    RoundGenerationFailed { regenerations: usize },
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
