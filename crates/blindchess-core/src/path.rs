use crate::{MoveInstruction, ObstacleField, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Apply `instructions` to `start` in order.
///
/// Returns `None` if any step would leave the board.
pub fn follow(start: Square, instructions: &[MoveInstruction]) -> Option<Square> {
    instructions
        .iter()
        .try_fold(start, |square, instruction| instruction.apply(square))
}

/// A generated Walker round: start square, instructions and the square they lead to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerRound {
    pub start: Square,
    pub instructions: Vec<MoveInstruction>,
    pub target: Square,
}

/// A generated Knight Vision round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnightRound {
    pub start: Square,
    pub obstacles: ObstacleField,
    pub instructions: Vec<MoveInstruction>,
    /// Where the knight stands after the last instruction
    pub end: Square,
    /// Every legal jump from `end`; the squares the player must find
    pub valid_targets: BTreeSet<Square>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow() {
        let start: Square = "c3".parse().unwrap();
        let path = [
            MoveInstruction::straight(0, 2),
            MoveInstruction::diagonal(2, 2),
            MoveInstruction::knight(-1, -2),
        ];
        assert_eq!(follow(start, &path), Some("d5".parse().unwrap()));
        assert_eq!(follow(start, &[]), Some(start));

        let off_board = [MoveInstruction::straight(0, 5), MoveInstruction::straight(0, 1)];
        assert_eq!(follow(start, &off_board), None);
    }
}
