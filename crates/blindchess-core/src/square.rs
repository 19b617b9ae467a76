use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Files and ranks per side
pub const BOARD_SIZE: u8 = 8;

/// Color of a board square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareColor {
    White,
    Black,
}

impl SquareColor {
    pub fn name(self) -> &'static str {
        match self {
            SquareColor::White => "White",
            SquareColor::Black => "Black",
        }
    }
}

impl fmt::Display for SquareColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A square on the 8x8 board.
///
/// Stored as zero-based file and rank indices, so `a1` is `(0, 0)` and `h8` is
/// `(7, 7)`. Every constructor checks bounds; an off-board `Square` cannot be
/// built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Create a square from zero-based indices
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < BOARD_SIZE && rank < BOARD_SIZE {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Create a square from its letter and number, e.g. `('c', 3)`
    pub fn from_chars(file: char, rank: u8) -> Option<Self> {
        if !('a'..='h').contains(&file) || !(1..=BOARD_SIZE).contains(&rank) {
            return None;
        }
        Self::new(file as u8 - b'a', rank - 1)
    }

    /// Square number `0..64` in file-major order, wrapping larger values
    pub fn from_index(index: u8) -> Self {
        let index = index % (BOARD_SIZE * BOARD_SIZE);
        Self {
            file: index / BOARD_SIZE,
            rank: index % BOARD_SIZE,
        }
    }

    /// Zero-based file index (a = 0)
    pub fn file_index(self) -> u8 {
        self.file
    }

    /// Zero-based rank index (rank 1 = 0)
    pub fn rank_index(self) -> u8 {
        self.rank
    }

    /// File letter, `'a'..='h'`
    pub fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    /// Rank number, `1..=8`
    pub fn rank_number(self) -> u8 {
        self.rank + 1
    }

    /// Dark squares have an even index sum, so `a1` is black and `h1` is white
    pub fn color(self) -> SquareColor {
        if (self.file + self.rank) % 2 == 0 {
            SquareColor::Black
        } else {
            SquareColor::White
        }
    }

    /// The square displaced by `(df, dr)`, or `None` when it falls off the board
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (0..BOARD_SIZE as i8).contains(&file) && (0..BOARD_SIZE as i8).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// All 64 squares, file-major (a1, a2, ..., h8)
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|file| (0..BOARD_SIZE).map(move |rank| Square { file, rank }))
    }

    /// The two diagonals through this square
    pub fn diagonals(self) -> Diagonals {
        Diagonals {
            rising: Diagonal {
                from: self.ray_end(-1, -1),
                to: self.ray_end(1, 1),
            },
            falling: Diagonal {
                from: self.ray_end(-1, 1),
                to: self.ray_end(1, -1),
            },
        }
    }

    /// Last on-board square walking from here in direction `(df, dr)`
    fn ray_end(self, df: i8, dr: i8) -> Square {
        let mut end = self;
        while let Some(next) = end.offset(df, dr) {
            end = next;
        }
        end
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_number())
    }
}

impl FromStr for Square {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidSquare(s.to_string());
        let mut chars = s.trim().chars();
        let file = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        let rank = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }
        Square::from_chars(file, rank as u8).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Square {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

/// One board diagonal, given by its two end squares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagonal {
    pub from: Square,
    pub to: Square,
}

impl Diagonal {
    /// Every square on the diagonal, walking from `from` to `to`
    pub fn squares(&self) -> Vec<Square> {
        let df = (self.to.file as i8 - self.from.file as i8).signum();
        let dr = (self.to.rank as i8 - self.from.rank as i8).signum();

        let mut squares = vec![self.from];
        let mut current = self.from;
        while current != self.to {
            match current.offset(df, dr) {
                Some(next) => {
                    squares.push(next);
                    current = next;
                }
                None => break,
            }
        }
        squares
    }

    pub fn contains(&self, square: Square) -> bool {
        self.squares().contains(&square)
    }
}

impl fmt::Display for Diagonal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Both diagonals through a square: `rising` runs toward h8, `falling` toward h1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagonals {
    pub rising: Diagonal,
    pub falling: Diagonal,
}

impl Diagonals {
    pub fn contains(&self, square: Square) -> bool {
        self.rising.contains(square) || self.falling.contains(square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_color_convention() {
        assert_eq!(sq("a1").color(), SquareColor::Black);
        assert_eq!(sq("h1").color(), SquareColor::White);
        assert_eq!(sq("h8").color(), SquareColor::Black);
        assert_eq!(sq("e4").color(), SquareColor::White);
        assert_eq!(sq("d4").color(), SquareColor::Black);
    }

    #[test]
    fn test_parse_and_display() {
        let square = sq("c3");
        assert_eq!(square.file_char(), 'c');
        assert_eq!(square.rank_number(), 3);
        assert_eq!(square.to_string(), "c3");
        assert_eq!(sq("E4"), sq("e4"));

        for bad in ["", "a", "i1", "a9", "a0", "e44", "4e"] {
            assert!(bad.parse::<Square>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_offset_bounds() {
        assert_eq!(sq("c3").offset(0, 2), Some(sq("c5")));
        assert_eq!(sq("a1").offset(-1, 0), None);
        assert_eq!(sq("h8").offset(0, 1), None);
        assert_eq!(sq("g1").offset(1, 2), Some(sq("h3")));
    }

    #[test]
    fn test_all_squares() {
        let all: Vec<Square> = Square::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], sq("a1"));
        assert_eq!(all[1], sq("a2"));
        assert_eq!(all[63], sq("h8"));
    }

    #[test]
    fn test_diagonals() {
        let diagonals = sq("e4").diagonals();
        assert_eq!(diagonals.rising.to_string(), "b1-h7");
        assert_eq!(diagonals.falling.to_string(), "a8-h1");
        assert_eq!(diagonals.rising.squares().len(), 7);
        assert!(diagonals.contains(sq("c6")));
        assert!(!diagonals.contains(sq("e5")));

        let corner = sq("a1").diagonals();
        assert_eq!(corner.rising.to_string(), "a1-h8");
        assert_eq!(corner.falling.to_string(), "a1-a1");
        assert_eq!(corner.falling.squares(), vec![sq("a1")]);
    }

    #[test]
    fn test_serde_as_name() {
        let json = serde_json::to_string(&sq("g7")).unwrap();
        assert_eq!(json, "\"g7\"");
        let back: Square = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sq("g7"));
        assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
    }
}
