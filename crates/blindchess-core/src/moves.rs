use crate::knight::KNIGHT_OFFSETS;
use crate::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest straight or diagonal step an instruction may ask for
pub const MAX_STEP: i8 = 5;

/// Step magnitudes in both directions, `-5..=-1` then `1..=5`
const STEPS: [i8; 10] = [-5, -4, -3, -2, -1, 1, 2, 3, 4, 5];

/// Capability profile gating which move shapes a Walker round may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Straight moves only
    Easy,
    /// Straight and diagonal moves
    Medium,
    /// Straight, diagonal and knight moves
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse a difficulty tag such as `"HARD"` or `"medium"`
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a difficulty tag, falling back to `Easy` when it is not recognized
    pub fn parse_or_default(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_else(|| {
            log::warn!("unrecognized difficulty {tag:?}, using Easy");
            Difficulty::Easy
        })
    }

    /// Lowercase tag used in score keys
    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn allows_diagonals(self) -> bool {
        matches!(self, Difficulty::Medium | Difficulty::Hard)
    }

    pub fn allows_knight(self) -> bool {
        self == Difficulty::Hard
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Shape of a generated move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Purely horizontal or purely vertical
    Straight,
    /// Equal non-zero steps on both axes
    Diagonal,
    /// One of the eight knight jumps
    Knight,
}

/// A relative move shown to the player: "2 Up", "3 Down Left", "2 Up, 1 Right"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveInstruction {
    pub kind: MoveKind,
    /// File displacement, positive toward the h-file
    pub df: i8,
    /// Rank displacement, positive toward rank 8
    pub dr: i8,
}

impl MoveInstruction {
    pub fn straight(df: i8, dr: i8) -> Self {
        debug_assert!((df == 0) != (dr == 0));
        Self {
            kind: MoveKind::Straight,
            df,
            dr,
        }
    }

    pub fn diagonal(df: i8, dr: i8) -> Self {
        debug_assert!(df != 0 && df.abs() == dr.abs());
        Self {
            kind: MoveKind::Diagonal,
            df,
            dr,
        }
    }

    pub fn knight(df: i8, dr: i8) -> Self {
        debug_assert!(KNIGHT_OFFSETS.contains(&(df, dr)));
        Self {
            kind: MoveKind::Knight,
            df,
            dr,
        }
    }

    /// Where this move lands from `square`, if that is still on the board
    pub fn apply(&self, square: Square) -> Option<Square> {
        square.offset(self.df, self.dr)
    }

    /// Arrow glyph for the direction, or a knight for knight jumps
    pub fn icon(&self) -> &'static str {
        if self.kind == MoveKind::Knight {
            return "♞";
        }
        match (self.df.signum(), self.dr.signum()) {
            (0, 1) => "↑",
            (0, -1) => "↓",
            (1, 0) => "→",
            (-1, 0) => "←",
            (1, 1) => "↗",
            (1, -1) => "↘",
            (-1, 1) => "↖",
            _ => "↙",
        }
    }

    /// English description of the move
    pub fn describe(&self) -> String {
        match self.kind {
            MoveKind::Straight if self.df == 0 => {
                format!("{} {}", self.dr.abs(), vertical_word(self.dr))
            }
            MoveKind::Straight => format!("{} {}", self.df.abs(), horizontal_word(self.df)),
            MoveKind::Diagonal => format!(
                "{} {} {}",
                self.dr.abs(),
                vertical_word(self.dr),
                horizontal_word(self.df)
            ),
            MoveKind::Knight => format!(
                "{} {}, {} {}",
                self.dr.abs(),
                vertical_word(self.dr),
                self.df.abs(),
                horizontal_word(self.df)
            ),
        }
    }
}

impl fmt::Display for MoveInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn vertical_word(dr: i8) -> &'static str {
    if dr > 0 {
        "Up"
    } else {
        "Down"
    }
}

fn horizontal_word(df: i8) -> &'static str {
    if df > 0 {
        "Right"
    } else {
        "Left"
    }
}

/// Every move allowed by `difficulty` that keeps `current` on the board.
///
/// Order: horizontal steps, vertical steps, diagonals (Medium and Hard), then
/// knight jumps (Hard only). Never empty.
pub fn candidate_moves(current: Square, difficulty: Difficulty) -> Vec<MoveInstruction> {
    let mut moves = Vec::new();

    for df in STEPS {
        if current.offset(df, 0).is_some() {
            moves.push(MoveInstruction::straight(df, 0));
        }
    }
    for dr in STEPS {
        if current.offset(0, dr).is_some() {
            moves.push(MoveInstruction::straight(0, dr));
        }
    }

    if difficulty.allows_diagonals() {
        for df in STEPS {
            for dr in STEPS {
                if df.abs() == dr.abs() && current.offset(df, dr).is_some() {
                    moves.push(MoveInstruction::diagonal(df, dr));
                }
            }
        }
    }

    if difficulty.allows_knight() {
        for (df, dr) in KNIGHT_OFFSETS {
            if current.offset(df, dr).is_some() {
                moves.push(MoveInstruction::knight(df, dr));
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse(" medium "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("nightmare"), None);
        assert_eq!(Difficulty::parse_or_default("nightmare"), Difficulty::Easy);
        assert_eq!(Difficulty::parse_or_default(""), Difficulty::Easy);
    }

    #[test]
    fn test_easy_candidates_are_straight() {
        for square in Square::all() {
            let moves = candidate_moves(square, Difficulty::Easy);
            assert!(!moves.is_empty());
            for m in moves {
                assert_eq!(m.kind, MoveKind::Straight);
                assert!((m.df == 0) != (m.dr == 0));
                assert!(m.apply(square).is_some());
            }
        }
    }

    #[test]
    fn test_corner_candidates() {
        // a1: five steps right, five steps up
        assert_eq!(candidate_moves(sq("a1"), Difficulty::Easy).len(), 10);
        // plus five up-right diagonals
        assert_eq!(candidate_moves(sq("a1"), Difficulty::Medium).len(), 15);
        // plus b3 and c2
        assert_eq!(candidate_moves(sq("a1"), Difficulty::Hard).len(), 17);
    }

    #[test]
    fn test_center_candidates() {
        // d4: 3 left, 4 right, 3 down, 4 up
        let easy = candidate_moves(sq("d4"), Difficulty::Easy);
        assert_eq!(easy.len(), 14);

        let hard = candidate_moves(sq("d4"), Difficulty::Hard);
        let knights = hard.iter().filter(|m| m.kind == MoveKind::Knight).count();
        assert_eq!(knights, 8);
        for m in hard.iter().filter(|m| m.kind == MoveKind::Diagonal) {
            assert_eq!(m.df.abs(), m.dr.abs());
            assert!(m.df != 0);
        }
    }

    #[test]
    fn test_describe_and_icon() {
        let up = MoveInstruction::straight(0, 2);
        assert_eq!(up.describe(), "2 Up");
        assert_eq!(up.icon(), "↑");
        assert_eq!(up.apply(sq("c3")), Some(sq("c5")));

        let left = MoveInstruction::straight(-3, 0);
        assert_eq!(left.describe(), "3 Left");
        assert_eq!(left.icon(), "←");

        let diag = MoveInstruction::diagonal(2, -2);
        assert_eq!(diag.describe(), "2 Down Right");
        assert_eq!(diag.icon(), "↘");

        let jump = MoveInstruction::knight(-1, 2);
        assert_eq!(jump.describe(), "2 Up, 1 Left");
        assert_eq!(jump.icon(), "♞");
    }
}
