/// One "How to play" page
pub struct HelpPage {
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

pub const PAGES: [HelpPage; 4] = [
    HelpPage {
        title: "Speed Colors: Zen",
        lines: &[
            "A square name appears, e.g. c3.",
            "Press w if it is a light square, b if it is dark.",
            "The answer shows the square's color and both diagonals.",
            "Press n for the next square. No clock, just your streak.",
        ],
    },
    HelpPage {
        title: "Speed Colors: Blitz",
        lines: &[
            "Same question as Zen, against a 60 second clock.",
            "Every correct answer scores a point.",
            "A wrong answer costs 5 seconds.",
            "Press Enter to start the clock.",
        ],
    },
    HelpPage {
        title: "The Walker",
        lines: &[
            "Watch the start square, then follow each move in your head.",
            "Moves read like \"2 Up, 1 Left\"; the board stays hidden.",
            "Move the cursor to where the walk ends and press Enter.",
            "Medium adds diagonal moves, Hard adds knight jumps.",
            "Three lives; each wave adds one more move.",
        ],
    },
    HelpPage {
        title: "Knight Vision",
        lines: &[
            "Memorize the pieces on the board before they vanish.",
            "Follow the knight's jumps from its start square.",
            "Then select every square the knight can jump to next.",
            "Squares holding a piece are not valid jumps.",
            "A wrong square costs one of three lives.",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_have_text() {
        for page in &PAGES {
            assert!(!page.title.is_empty());
            assert!(page.lines.len() >= 3);
        }
    }
}
