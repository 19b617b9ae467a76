//! Basic example of using the blindchess engine

use blindchess_core::{valid_knight_jumps, Difficulty, Generator, Square};

fn main() {
    let mut generator = Generator::new();

    // Speed Colors: a random square, its color and diagonals
    let square = generator.random_square();
    let diagonals = square.diagonals();
    println!("{} is {}", square, square.color());
    println!("Diagonals: {} and {}\n", diagonals.rising, diagonals.falling);

    // The Walker: a wave 3 path on Hard
    println!("--- The Walker (wave 3, Hard) ---\n");
    let round = generator.plan_walker_round(3, Difficulty::Hard);
    println!("Start on {}", round.start);
    for instruction in &round.instructions {
        println!("  {} {}", instruction.icon(), instruction.describe());
    }
    println!("Answer: {}\n", round.target);

    // Knight Vision: obstacles, a knight path and every jump from its end
    println!("--- Knight Vision (wave 2) ---\n");
    match generator.plan_knight_round(2) {
        Ok(round) => {
            let pieces: Vec<String> = round
                .obstacles
                .iter()
                .map(|(square, kind)| format!("{}{}", kind.glyph(), square))
                .collect();
            println!("Obstacles: {}", pieces.join(" "));
            println!("Knight starts on {}", round.start);
            for instruction in &round.instructions {
                println!("  {}", instruction.describe());
            }
            let targets: Vec<String> = round.valid_targets.iter().map(|s| s.to_string()).collect();
            println!("Knight ends on {}, can jump to {}", round.end, targets.join(", "));
        }
        Err(err) => println!("Could not plan a round: {}", err),
    }

    // Parse a square from text
    println!("\n--- Parsing a square ---\n");
    if let Ok(corner) = "a1".parse::<Square>() {
        let field = blindchess_core::ObstacleField::empty(corner);
        let jumps = valid_knight_jumps(corner, &field);
        println!("A knight on {} ({}) has {} jumps", corner, corner.color(), jumps.len());
    }
}
