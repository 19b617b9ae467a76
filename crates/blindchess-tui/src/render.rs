use crate::app::{App, MenuItem, Screen};
use crate::help;
use crate::theme::Theme;
use blindchess_core::games::{
    BlitzGame, BlitzPhase, KnightVisionGame, RoundPhase, WalkerGame, ZenGame, ZenPhase,
};
use blindchess_core::{MoveInstruction, ScoreBook, Square, SquareColor, BOARD_SIZE};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;
use std::time::Duration;

/// Board is 8 squares of 3 columns plus rank labels
const BOARD_WIDTH: u16 = 2 + BOARD_SIZE as u16 * 3;
const BOARD_HEIGHT: u16 = BOARD_SIZE as u16 + 1;

/// Overlay for one board square
struct SquareMark {
    glyph: char,
    bg: Option<Color>,
}

impl SquareMark {
    fn glyph(glyph: char) -> Self {
        Self { glyph, bg: None }
    }

    fn highlight(glyph: char, bg: Color) -> Self {
        Self { glyph, bg: Some(bg) }
    }
}

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;
    execute!(
        stdout,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    match &app.screen {
        Screen::Menu => render_menu(stdout, app, term_width)?,
        Screen::Zen(game) => render_zen(stdout, app, game, term_width)?,
        Screen::Blitz(game) => render_blitz(stdout, app, game, term_width)?,
        Screen::Walker(game) => render_walker(stdout, app, game, term_width)?,
        Screen::KnightVision(game) => render_knight_vision(stdout, app, game, term_width)?,
        Screen::Help(page) => render_help(stdout, app, *page, term_width)?,
        Screen::Scores(book) => render_scores(stdout, app, book, term_width)?,
    }

    render_controls(stdout, app, term_height)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn centered_x(term_width: u16, text: &str) -> u16 {
    term_width.saturating_sub(text.chars().count() as u16) / 2
}

fn print_centered(
    stdout: &mut io::Stdout,
    term_width: u16,
    y: u16,
    color: Color,
    text: &str,
) -> io::Result<()> {
    execute!(
        stdout,
        MoveTo(centered_x(term_width, text), y),
        SetForegroundColor(color),
        Print(text)
    )
}

fn render_title(stdout: &mut io::Stdout, theme: &Theme, title: &str, term_width: u16) -> io::Result<()> {
    let title = format!("═══ {} ═══", title);
    print_centered(stdout, term_width, 1, theme.key, &title)
}

fn render_menu(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    render_title(stdout, theme, "BLINDFOLD CHESS", term_width)?;

    let x = term_width.saturating_sub(40) / 2;
    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let y = 4 + i as u16 * 2;
        let selected = i == app.menu_selection;
        let (marker, color) = if selected {
            ("▶ ", theme.key)
        } else {
            ("  ", theme.fg)
        };
        execute!(
            stdout,
            MoveTo(x, y),
            SetForegroundColor(color),
            Print(format!("{}{}", marker, item.label()))
        )?;

        if *item == MenuItem::Walker {
            execute!(
                stdout,
                SetForegroundColor(theme.info),
                Print(format!("   ◀ {} ▶", app.difficulty))
            )?;
        }
    }

    let tip_y = 4 + MenuItem::ALL.len() as u16 * 2 + 1;
    print_centered(stdout, term_width, tip_y, theme.info, &format!("Tip: {}", app.tip))?;
    print_centered(
        stdout,
        term_width,
        tip_y + 1,
        theme.border,
        &format!("Scores: {} | Theme: {}", app.scores_backend(), theme.name),
    )?;

    Ok(())
}

fn render_zen(stdout: &mut io::Stdout, app: &App, game: &ZenGame, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    render_title(stdout, theme, "SPEED COLORS: ZEN", term_width)?;

    print_centered(
        stdout,
        term_width,
        3,
        theme.info,
        &format!("Streak: {}   Best: {}", game.streak(), game.best_streak()),
    )?;
    print_centered(stdout, term_width, 5, theme.fg, &format!("[ {} ]", game.square()))?;

    match game.phase() {
        ZenPhase::Guessing => {
            print_centered(stdout, term_width, 7, theme.info, "White or Black?")?;
        }
        ZenPhase::Result => {
            if let Some(reveal) = game.reveal() {
                let (verdict, color) = if reveal.correct {
                    ("Correct", theme.success)
                } else {
                    ("Wrong", theme.error)
                };
                print_centered(
                    stdout,
                    term_width,
                    7,
                    color,
                    &format!("{}! {} is {}", verdict, reveal.square, reveal.color),
                )?;
                print_centered(
                    stdout,
                    term_width,
                    8,
                    theme.info,
                    &format!(
                        "Diagonals: {} and {}",
                        reveal.diagonals.rising, reveal.diagonals.falling
                    ),
                )?;

                let square = reveal.square;
                let diagonals = reveal.diagonals;
                let board_x = term_width.saturating_sub(BOARD_WIDTH) / 2;
                render_board(stdout, theme, board_x, 10, None, |s| {
                    if s == square {
                        Some(SquareMark::highlight('●', theme.highlight_bg))
                    } else if diagonals.contains(s) {
                        Some(SquareMark::glyph('·'))
                    } else {
                        None
                    }
                })?;
            }
        }
    }

    Ok(())
}

fn render_blitz(stdout: &mut io::Stdout, app: &App, game: &BlitzGame, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    render_title(stdout, theme, "SPEED COLORS: BLITZ", term_width)?;

    match game.phase() {
        BlitzPhase::Ready => {
            print_centered(stdout, term_width, 4, theme.fg, "60 seconds. One point per square.")?;
            print_centered(stdout, term_width, 5, theme.info, "Wrong answers cost 5 seconds.")?;
            print_centered(stdout, term_width, 7, theme.key, "Press Enter to start")?;
        }
        BlitzPhase::Playing => {
            let secs = game.remaining().as_secs_f32().ceil() as u32;
            let clock_color = if secs <= 10 { theme.error } else { theme.key };
            print_centered(stdout, term_width, 3, clock_color, &format!("Time: {}", secs))?;
            print_centered(stdout, term_width, 4, theme.info, &format!("Score: {}", game.score()))?;
            print_centered(stdout, term_width, 7, theme.fg, &format!("[ {} ]", game.square()))?;
        }
        BlitzPhase::Finished => {
            print_centered(stdout, term_width, 4, theme.key, "Time!")?;
            print_centered(stdout, term_width, 6, theme.fg, &format!("Score: {}", game.score()))?;
            print_centered(stdout, term_width, 8, theme.info, "Press Enter to play again")?;
        }
    }

    Ok(())
}

/// Wave, round and lives line shared by the board games
fn render_status(
    stdout: &mut io::Stdout,
    theme: &Theme,
    wave: u32,
    round: u32,
    rounds: u32,
    lives: u32,
    term_width: u16,
) -> io::Result<()> {
    let hearts: String = "♥".repeat(lives as usize);
    print_centered(
        stdout,
        term_width,
        3,
        theme.info,
        &format!("Wave {}  Round {}/{}  {}", wave, round, rounds, hearts),
    )
}

fn render_countdown(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let secs = app
        .phase_remaining()
        .unwrap_or(Duration::ZERO)
        .as_secs_f32()
        .ceil() as u32;
    print_centered(stdout, term_width, 8, app.theme.key, &format!("{}", secs.max(1)))
}

fn render_instruction(
    stdout: &mut io::Stdout,
    theme: &Theme,
    instruction: Option<&MoveInstruction>,
    index: usize,
    total: usize,
    term_width: u16,
) -> io::Result<()> {
    if let Some(instruction) = instruction {
        print_centered(stdout, term_width, 6, theme.info, &format!("Move {}/{}", index + 1, total))?;
        print_centered(stdout, term_width, 8, theme.key, instruction.icon())?;
        print_centered(stdout, term_width, 10, theme.fg, &instruction.describe())?;
    }
    Ok(())
}

fn render_walker(stdout: &mut io::Stdout, app: &App, game: &WalkerGame, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    render_title(
        stdout,
        theme,
        &format!("THE WALKER ({})", game.difficulty()),
        term_width,
    )?;
    let progress = game.progress();
    render_status(
        stdout,
        theme,
        progress.wave(),
        progress.round(),
        progress.rounds_in_wave(),
        game.lives(),
        term_width,
    )?;

    let round = game.round();
    match game.phase() {
        RoundPhase::Preview | RoundPhase::Countdown => render_countdown(stdout, app, term_width)?,
        RoundPhase::StartSquare => {
            print_centered(stdout, term_width, 8, theme.fg, &format!("Start: {}", round.start))?;
        }
        RoundPhase::Instructions { index } => render_instruction(
            stdout,
            theme,
            game.current_instruction(),
            index,
            round.instructions.len(),
            term_width,
        )?,
        RoundPhase::Guessing => {
            print_centered(stdout, term_width, 5, theme.fg, "Where are you now?")?;
            let board_x = term_width.saturating_sub(BOARD_WIDTH) / 2;
            render_board(stdout, theme, board_x, 7, Some(app.cursor), |_| None)?;
        }
        RoundPhase::GameOver => render_game_over(stdout, theme, progress.wave(), term_width)?,
    }

    Ok(())
}

fn render_knight_vision(
    stdout: &mut io::Stdout,
    app: &App,
    game: &KnightVisionGame,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    render_title(stdout, theme, "KNIGHT VISION", term_width)?;
    let progress = game.progress();
    render_status(
        stdout,
        theme,
        progress.wave(),
        progress.round(),
        progress.rounds_in_wave(),
        game.lives(),
        term_width,
    )?;

    let round = game.round();
    let board_x = term_width.saturating_sub(BOARD_WIDTH) / 2;
    match game.phase() {
        RoundPhase::Preview => {
            let secs = app.phase_remaining().unwrap_or(Duration::ZERO).as_secs_f32().ceil();
            print_centered(
                stdout,
                term_width,
                5,
                theme.error,
                &format!("Memorize the pieces! {}s", secs as u32),
            )?;
            render_board(stdout, theme, board_x, 7, None, |s| {
                round.obstacles.get(s).map(|kind| SquareMark::glyph(kind.glyph()))
            })?;
        }
        RoundPhase::Countdown => render_countdown(stdout, app, term_width)?,
        RoundPhase::StartSquare => {
            print_centered(
                stdout,
                term_width,
                8,
                theme.fg,
                &format!("Knight starts on {}", round.start),
            )?;
        }
        RoundPhase::Instructions { index } => render_instruction(
            stdout,
            theme,
            game.current_instruction(),
            index,
            round.instructions.len(),
            term_width,
        )?,
        RoundPhase::Guessing => {
            print_centered(
                stdout,
                term_width,
                5,
                theme.fg,
                &format!(
                    "Find every jump: {}/{}",
                    game.found().len(),
                    round.valid_targets.len()
                ),
            )?;
            let found = game.found();
            render_board(stdout, theme, board_x, 7, Some(app.cursor), |s| {
                found
                    .contains(&s)
                    .then(|| SquareMark::highlight('✓', theme.success))
            })?;
        }
        RoundPhase::GameOver => render_game_over(stdout, theme, progress.wave(), term_width)?,
    }

    Ok(())
}

fn render_game_over(stdout: &mut io::Stdout, theme: &Theme, wave: u32, term_width: u16) -> io::Result<()> {
    print_centered(stdout, term_width, 7, theme.error, "GAME OVER")?;
    print_centered(stdout, term_width, 9, theme.fg, &format!("Reached wave {}", wave))?;
    print_centered(stdout, term_width, 11, theme.info, "Press r to try again")
}

fn render_help(stdout: &mut io::Stdout, app: &App, page: usize, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    render_title(stdout, theme, "HOW TO PLAY", term_width)?;

    let Some(help) = help::PAGES.get(page) else {
        return Ok(());
    };
    print_centered(stdout, term_width, 3, theme.key, help.title)?;

    let x = term_width.saturating_sub(60) / 2;
    for (i, line) in help.lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, 5 + i as u16 * 2),
            SetForegroundColor(theme.fg),
            Print(format!("• {}", line))
        )?;
    }

    let footer = format!("Page {} of {}", page + 1, help::PAGES.len());
    let y = 6 + help.lines.len() as u16 * 2;
    print_centered(stdout, term_width, y, theme.info, &footer)
}

fn render_scores(stdout: &mut io::Stdout, app: &App, book: &ScoreBook, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    render_title(stdout, theme, "HIGH SCORES", term_width)?;

    let x = term_width.saturating_sub(44) / 2;
    execute!(
        stdout,
        MoveTo(x, 3),
        SetForegroundColor(theme.fg),
        Print(format!("{:<28} {:>6}", "Mode", "Best")),
        MoveTo(x, 4),
        SetForegroundColor(theme.border),
        Print("─".repeat(44))
    )?;

    for (i, (mode, value)) in book.entries().into_iter().enumerate() {
        let color = if value > 0 { theme.fg } else { theme.info };
        execute!(
            stdout,
            MoveTo(x, 5 + i as u16),
            SetForegroundColor(color),
            Print(format!("{:<28} {:>6}  {}", mode.to_string(), value, mode.score_label()))
        )?;
    }

    Ok(())
}

/// Draw the board with rank 8 at the top. `mark` overlays a glyph and
/// optional background per square; the cursor background wins.
fn render_board<F>(
    stdout: &mut io::Stdout,
    theme: &Theme,
    x: u16,
    y: u16,
    cursor: Option<Square>,
    mark: F,
) -> io::Result<()>
where
    F: Fn(Square) -> Option<SquareMark>,
{
    for row in 0..BOARD_SIZE {
        let rank = BOARD_SIZE - 1 - row;
        let row_y = y + row as u16;
        execute!(
            stdout,
            MoveTo(x, row_y),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print(format!("{} ", rank + 1))
        )?;

        for file in 0..BOARD_SIZE {
            let Some(square) = Square::new(file, rank) else {
                continue;
            };
            let base = match square.color() {
                SquareColor::White => theme.light_square,
                SquareColor::Black => theme.dark_square,
            };
            let overlay = mark(square);
            let glyph = overlay.as_ref().map_or(' ', |m| m.glyph);
            let mut bg = overlay.and_then(|m| m.bg).unwrap_or(base);
            if cursor == Some(square) {
                bg = theme.cursor_bg;
            }

            execute!(
                stdout,
                SetBackgroundColor(bg),
                SetForegroundColor(theme.piece),
                Print(format!(" {} ", glyph))
            )?;
        }
    }

    execute!(
        stdout,
        MoveTo(x, y + BOARD_HEIGHT - 1),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        Print("   a  b  c  d  e  f  g  h")
    )?;

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, term_height: u16) -> io::Result<()> {
    let theme = &app.theme;

    let controls: &[(&str, &str)] = match &app.screen {
        Screen::Menu => &[
            ("↑/↓", "Choose"),
            ("←/→", "Difficulty"),
            ("Enter", "Start"),
            ("t", "Theme"),
            ("q", "Quit"),
        ],
        Screen::Zen(_) => &[("w/b", "White/Black"), ("n", "Next"), ("Esc", "Menu"), ("q", "Quit")],
        Screen::Blitz(_) => &[("w/b", "White/Black"), ("Enter", "Start"), ("Esc", "Menu"), ("q", "Quit")],
        Screen::Walker(_) | Screen::KnightVision(_) => &[
            ("Arrows", "Move"),
            ("Enter", "Select"),
            ("r", "Restart"),
            ("Esc", "Menu"),
            ("q", "Quit"),
        ],
        Screen::Help(_) => &[("←/→", "Page"), ("Esc", "Menu"), ("q", "Quit")],
        Screen::Scores(_) => &[("Esc", "Menu"), ("q", "Quit")],
    };

    let y = term_height.saturating_sub(2);
    execute!(stdout, MoveTo(2, y), SetBackgroundColor(theme.bg))?;
    for (key, desc) in controls {
        execute!(
            stdout,
            SetForegroundColor(theme.key),
            Print(format!("{:>6}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}  ", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);

    execute!(
        stdout,
        MoveTo(centered_x(term_width, &padded), 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.cursor_bg),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}
