use blindchess_core::games::{GuessOutcome, KnightVisionGame, RoundPhase, WalkerGame};
use blindchess_core::{
    follow, valid_knight_jumps, Difficulty, Generator, MoveInstruction, MoveKind, ObstacleField,
    PieceKind, Square, SquareColor,
};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn corner_colors() {
    assert_eq!(sq("a1").color(), SquareColor::Black);
    assert_eq!(sq("h1").color(), SquareColor::White);
    assert_eq!(sq("a8").color(), SquareColor::White);
    assert_eq!(sq("h8").color(), SquareColor::Black);
}

#[test]
fn straight_move_from_c3() {
    let up_two = MoveInstruction::straight(0, 2);
    assert_eq!(up_two.apply(sq("c3")), Some(sq("c5")));
    assert_eq!(up_two.describe(), "2 Up");
    assert_eq!(MoveInstruction::straight(0, 2).apply(sq("c7")), None);
}

#[test]
fn obstacles_never_cover_the_excluded_square() {
    let mut generator = Generator::with_seed(99);
    let e4 = sq("e4");
    for _ in 0..200 {
        let field = generator.generate_obstacles(3, e4);
        assert!(field.len() <= 3);
        assert!(!field.contains(e4));
        assert!(field.count_of(PieceKind::King) <= 1);
    }
}

#[test]
fn knight_jumps_respect_edges_and_obstacles() {
    let field = ObstacleField::empty(sq("a1"));
    let jumps = valid_knight_jumps(sq("a1"), &field);
    assert_eq!(jumps.into_iter().collect::<Vec<_>>(), vec![sq("b3"), sq("c2")]);

    let mut field = ObstacleField::empty(sq("d4"));
    assert!(field.insert(sq("e6"), PieceKind::Rook));
    assert!(field.insert(sq("c2"), PieceKind::Pawn));
    let jumps = valid_knight_jumps(sq("d4"), &field);
    assert_eq!(jumps.len(), 6);
    assert!(!jumps.contains(&sq("e6")));
    assert!(!jumps.contains(&sq("c2")));
}

#[test]
fn seeded_generators_agree() {
    let mut a = Generator::with_seed(2024);
    let mut b = Generator::with_seed(2024);

    assert_eq!(
        a.plan_walker_round(4, Difficulty::Hard),
        b.plan_walker_round(4, Difficulty::Hard)
    );
    assert_eq!(a.plan_knight_round(3).unwrap(), b.plan_knight_round(3).unwrap());
}

#[test]
fn walker_rounds_lead_to_their_target() {
    let mut generator = Generator::with_seed(31);
    for wave in 1..=8 {
        for difficulty in Difficulty::ALL {
            let round = generator.plan_walker_round(wave, difficulty);
            assert_eq!(round.instructions.len(), wave as usize + 1);
            assert_eq!(follow(round.start, &round.instructions), Some(round.target));
        }
    }
}

#[test]
fn knight_rounds_only_use_knight_jumps() {
    let mut generator = Generator::with_seed(77);
    for wave in 1..=10 {
        let round = generator.plan_knight_round(wave).unwrap();
        assert!(round
            .instructions
            .iter()
            .all(|i| i.kind == MoveKind::Knight));

        let mut current = round.start;
        for instruction in &round.instructions {
            current = instruction.apply(current).unwrap();
            assert!(!round.obstacles.contains(current));
        }
        assert_eq!(current, round.end);
        assert_eq!(round.valid_targets, valid_knight_jumps(round.end, &round.obstacles));
    }
}

#[test]
fn a_perfect_walker_run_reaches_wave_three() {
    let mut generator = Generator::with_seed(3);
    let mut game = WalkerGame::new(Difficulty::Medium, &mut generator);

    // Wave 1 has three rounds, wave 2 five
    for _ in 0..8 {
        while game.phase() != RoundPhase::Guessing {
            game.advance();
        }
        let target = game.round().target;
        assert!(matches!(
            game.select(target, &mut generator),
            GuessOutcome::RoundCleared { .. }
        ));
    }
    assert_eq!(game.score(), 3);
}

#[test]
fn knight_vision_round_can_be_cleared() {
    let mut generator = Generator::with_seed(12);
    let mut game = KnightVisionGame::new(&mut generator).unwrap();
    while game.phase() != RoundPhase::Guessing {
        game.advance();
    }

    let targets: Vec<Square> = game.round().valid_targets.iter().copied().collect();
    let mut last = GuessOutcome::Ignored;
    if targets.is_empty() {
        // Nothing to find; any click clears the round
        last = game.select(sq("a1"), &mut generator).unwrap();
    }
    for target in targets {
        last = game.select(target, &mut generator).unwrap();
    }
    assert_eq!(
        last,
        GuessOutcome::RoundCleared {
            wave_advanced: false
        }
    );
    assert_eq!(game.progress().round(), 2);
}
