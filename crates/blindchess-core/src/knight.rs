//! Knight reachability over an obstacle field

use crate::{MoveInstruction, ObstacleField, Square};
use std::collections::BTreeSet;

/// The eight knight jumps as `(df, dr)`, clockwise from up-right
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Knight jumps from `from` that stay on the board and avoid every obstacle
pub fn knight_instructions(from: Square, obstacles: &ObstacleField) -> Vec<MoveInstruction> {
    KNIGHT_OFFSETS
        .iter()
        .filter(|&&(df, dr)| {
            from.offset(df, dr)
                .is_some_and(|target| !obstacles.contains(target))
        })
        .map(|&(df, dr)| MoveInstruction::knight(df, dr))
        .collect()
}

/// Squares a knight on `from` can jump to, given the obstacles
pub fn valid_knight_jumps(from: Square, obstacles: &ObstacleField) -> BTreeSet<Square> {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .filter(|target| !obstacles.contains(*target))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_open_board() {
        let empty = ObstacleField::empty(sq("d4"));
        assert_eq!(valid_knight_jumps(sq("d4"), &empty).len(), 8);
        assert_eq!(valid_knight_jumps(sq("a1"), &empty).len(), 2);
        assert_eq!(valid_knight_jumps(sq("h8"), &empty).len(), 2);
        assert_eq!(valid_knight_jumps(sq("b1"), &empty).len(), 3);
    }

    #[test]
    fn test_obstacles_block_targets() {
        let mut field = ObstacleField::empty(sq("a1"));
        field.insert(sq("b3"), PieceKind::Rook);

        let jumps = valid_knight_jumps(sq("a1"), &field);
        assert_eq!(jumps.into_iter().collect::<Vec<_>>(), vec![sq("c2")]);

        let moves = knight_instructions(sq("a1"), &field);
        assert_eq!(moves, vec![MoveInstruction::knight(2, 1)]);

        field.insert(sq("c2"), PieceKind::Pawn);
        assert!(valid_knight_jumps(sq("a1"), &field).is_empty());
        assert!(knight_instructions(sq("a1"), &field).is_empty());
    }

    #[test]
    fn test_instructions_match_jumps() {
        let mut field = ObstacleField::empty(sq("e4"));
        field.insert(sq("f6"), PieceKind::Queen);
        field.insert(sq("c3"), PieceKind::King);

        let from_moves: BTreeSet<Square> = knight_instructions(sq("e4"), &field)
            .iter()
            .filter_map(|m| m.apply(sq("e4")))
            .collect();
        assert_eq!(from_moves, valid_knight_jumps(sq("e4"), &field));
        assert_eq!(from_moves.len(), 6);
    }
}
