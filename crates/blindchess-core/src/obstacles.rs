use crate::Square;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Piece kinds used as Knight Vision obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Most pieces of this kind a single field may hold
    pub fn max_count(self) -> usize {
        match self {
            PieceKind::King => 1,
            _ => 8,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            PieceKind::Pawn => '♟',
            PieceKind::Rook => '♜',
            PieceKind::Knight => '♞',
            PieceKind::Bishop => '♝',
            PieceKind::Queen => '♛',
            PieceKind::King => '♚',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Obstacles placed on the board for one Knight Vision round.
///
/// Keys are distinct squares, the excluded square is never occupied, and no
/// kind exceeds [`PieceKind::max_count`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawObstacleField")]
pub struct ObstacleField {
    pieces: BTreeMap<Square, PieceKind>,
    excluded: Square,
}

/// Wire form of [`ObstacleField`], checked by replaying `insert`
#[derive(Deserialize)]
struct RawObstacleField {
    pieces: BTreeMap<Square, PieceKind>,
    excluded: Square,
}

impl TryFrom<RawObstacleField> for ObstacleField {
    type Error = String;

    fn try_from(raw: RawObstacleField) -> Result<Self, Self::Error> {
        let mut field = ObstacleField::empty(raw.excluded);
        for (square, kind) in raw.pieces {
            if !field.insert(square, kind) {
                return Err(format!("{kind} on {square} breaks the obstacle field rules"));
            }
        }
        Ok(field)
    }
}

impl ObstacleField {
    /// A field with no obstacles that keeps `excluded` free
    pub fn empty(excluded: Square) -> Self {
        Self {
            pieces: BTreeMap::new(),
            excluded,
        }
    }

    /// Place `kind` on `square`.
    ///
    /// Returns `false` and leaves the field unchanged when the square is the
    /// excluded one, already occupied, or the kind is at its cap.
    pub fn insert(&mut self, square: Square, kind: PieceKind) -> bool {
        if square == self.excluded
            || self.pieces.contains_key(&square)
            || self.count_of(kind) >= kind.max_count()
        {
            return false;
        }
        self.pieces.insert(square, kind);
        true
    }

    pub fn contains(&self, square: Square) -> bool {
        self.pieces.contains_key(&square)
    }

    pub fn get(&self, square: Square) -> Option<PieceKind> {
        self.pieces.get(&square).copied()
    }

    pub fn excluded(&self) -> Square {
        self.excluded
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Number of obstacles of `kind`
    pub fn count_of(&self, kind: PieceKind) -> usize {
        self.pieces.values().filter(|&&k| k == kind).count()
    }

    /// Obstacles in square order
    pub fn iter(&self) -> impl Iterator<Item = (Square, PieceKind)> + '_ {
        self.pieces.iter().map(|(&square, &kind)| (square, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_insert_rules() {
        let mut field = ObstacleField::empty(sq("e4"));
        assert!(field.is_empty());

        assert!(!field.insert(sq("e4"), PieceKind::Pawn));
        assert!(field.insert(sq("a1"), PieceKind::King));
        assert!(!field.insert(sq("a1"), PieceKind::Rook));
        assert!(!field.insert(sq("a2"), PieceKind::King));

        assert_eq!(field.len(), 1);
        assert_eq!(field.get(sq("a1")), Some(PieceKind::King));
        assert_eq!(field.count_of(PieceKind::King), 1);
    }

    #[test]
    fn test_kind_cap() {
        let mut field = ObstacleField::empty(sq("h8"));
        let squares: Vec<Square> = Square::all().take(10).collect();
        let placed = squares
            .iter()
            .filter(|&&s| field.insert(s, PieceKind::Pawn))
            .count();
        assert_eq!(placed, 8);
        assert_eq!(field.count_of(PieceKind::Pawn), 8);
    }

    #[test]
    fn test_serialize_field() {
        let mut field = ObstacleField::empty(sq("d5"));
        field.insert(sq("c7"), PieceKind::Bishop);
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"c7\":\"Bishop\""));
        let back: ObstacleField = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_deserialize_rejects_broken_fields() {
        let on_excluded = r#"{"pieces":{"d5":"Pawn"},"excluded":"d5"}"#;
        assert!(serde_json::from_str::<ObstacleField>(on_excluded).is_err());

        let two_kings = r#"{"pieces":{"a1":"King","h8":"King"},"excluded":"d5"}"#;
        assert!(serde_json::from_str::<ObstacleField>(two_kings).is_err());

        let fine = r#"{"pieces":{"a1":"King","h8":"Queen"},"excluded":"d5"}"#;
        let field: ObstacleField = serde_json::from_str(fine).unwrap();
        assert_eq!(field.len(), 2);
        assert_eq!(field.get(sq("h8")), Some(PieceKind::Queen));
    }
}
