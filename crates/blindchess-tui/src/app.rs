use crate::help;
use crate::theme::Theme;
use blindchess_core::games::{
    BlitzGame, BlitzPhase, GuessOutcome, KnightVisionGame, WalkerGame, ZenGame, ZenPhase,
};
use blindchess_core::{Difficulty, GameMode, Generator, ScoreBook, ScoreStore, Square, SquareColor};
use crossterm::event::{KeyCode, KeyEvent};
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;

/// Ticks a message stays on screen (~3 seconds at 100ms)
const MESSAGE_TICKS: u32 = 30;

const TIPS: [&str; 5] = [
    "a1 is dark, h1 is light",
    "Squares whose file and rank add to an even number are dark",
    "A knight always lands on the other color",
    "Say each move out loud as it appears",
    "Picture the diagonals, not the whole board",
];

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Zen,
    Blitz,
    Walker,
    KnightVision,
    Help,
    Scores,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 7] = [
        MenuItem::Zen,
        MenuItem::Blitz,
        MenuItem::Walker,
        MenuItem::KnightVision,
        MenuItem::Help,
        MenuItem::Scores,
        MenuItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Zen => "Speed Colors: Zen",
            MenuItem::Blitz => "Speed Colors: Blitz",
            MenuItem::Walker => "The Walker",
            MenuItem::KnightVision => "Knight Vision",
            MenuItem::Help => "How to Play",
            MenuItem::Scores => "High Scores",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Current screen, owning the running game
pub enum Screen {
    Menu,
    Zen(ZenGame),
    Blitz(BlitzGame),
    Walker(WalkerGame),
    KnightVision(KnightVisionGame),
    /// Index into the help pages
    Help(usize),
    Scores(ScoreBook),
}

/// Startup options from the command line
pub struct AppConfig {
    pub start: Option<MenuItem>,
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
    pub theme: Theme,
}

/// The main application state
pub struct App {
    pub screen: Screen,
    /// Board cursor for click-style answers
    pub cursor: Square,
    pub menu_selection: usize,
    /// Walker difficulty chosen in the menu
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub message: Option<String>,
    message_timer: u32,
    /// Time spent in the current timed phase
    phase_elapsed: Duration,
    /// Menu tip
    pub tip: &'static str,
    generator: Generator,
    scores: Arc<dyn ScoreStore>,
}

impl App {
    pub fn new(config: AppConfig, scores: Arc<dyn ScoreStore>) -> Self {
        let generator = match config.seed {
            Some(seed) => Generator::with_seed(seed),
            None => Generator::new(),
        };
        let mut app = Self {
            screen: Screen::Menu,
            cursor: Square::from_index(27),
            menu_selection: 0,
            difficulty: config.difficulty,
            theme: config.theme,
            message: None,
            message_timer: 0,
            phase_elapsed: Duration::ZERO,
            tip: TIPS.choose(&mut rand::thread_rng()).copied().unwrap_or(TIPS[0]),
            generator,
            scores,
        };
        if let Some(item) = config.start {
            app.open(item);
        }
        app
    }

    /// Get the tick rate based on current screen
    pub fn get_tick_rate(&self) -> Duration {
        Duration::from_millis(100)
    }

    pub fn scores_backend(&self) -> &'static str {
        self.scores.backend_name()
    }

    /// Advance timers by `elapsed` (called every tick)
    pub fn tick(&mut self, elapsed: Duration) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        let mut finished: Option<(GameMode, u32)> = None;
        match &mut self.screen {
            Screen::Blitz(game) => {
                if game.tick(elapsed) {
                    finished = Some((game.mode(), game.score()));
                }
            }
            Screen::Walker(game) => {
                if let Some(limit) = game.phase_duration() {
                    self.phase_elapsed += elapsed;
                    if self.phase_elapsed >= limit {
                        game.advance();
                        self.phase_elapsed = Duration::ZERO;
                    }
                }
            }
            Screen::KnightVision(game) => {
                if let Some(limit) = game.phase_duration() {
                    self.phase_elapsed += elapsed;
                    if self.phase_elapsed >= limit {
                        game.advance();
                        self.phase_elapsed = Duration::ZERO;
                    }
                }
            }
            Screen::Menu | Screen::Zen(_) | Screen::Help(_) | Screen::Scores(_) => {}
        }

        if let Some((mode, score)) = finished {
            self.show_message(&format!("Time! {} points", score));
            self.record_score(mode, score);
        }
    }

    /// Time left in the current timed phase
    pub fn phase_remaining(&self) -> Option<Duration> {
        let limit = match &self.screen {
            Screen::Walker(game) => game.phase_duration(),
            Screen::KnightVision(game) => game.phase_duration(),
            _ => None,
        }?;
        Some(limit.saturating_sub(self.phase_elapsed))
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = MESSAGE_TICKS;
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen {
            Screen::Menu => return self.handle_menu_key(key),
            Screen::Scores(_) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
                    self.screen = Screen::Menu;
                }
            }
            Screen::Help(page) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.screen = Screen::Help(page.saturating_sub(1));
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter | KeyCode::Char(' ') => {
                    self.screen = Screen::Help((page + 1).min(help::PAGES.len() - 1));
                }
                KeyCode::Esc => self.screen = Screen::Menu,
                _ => {}
            },
            Screen::Zen(_) => self.handle_zen_key(key),
            Screen::Blitz(_) => self.handle_blitz_key(key),
            Screen::Walker(_) | Screen::KnightVision(_) => self.handle_board_key(key),
        }

        match key.code {
            KeyCode::Char('q') => AppAction::Quit,
            _ => AppAction::Continue,
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_selection = self.menu_selection.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_selection = (self.menu_selection + 1).min(MenuItem::ALL.len() - 1);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.difficulty = step_difficulty(self.difficulty, -1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.difficulty = step_difficulty(self.difficulty, 1);
            }
            KeyCode::Char('t') => {
                self.theme = self.theme.next();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let item = MenuItem::ALL[self.menu_selection];
                if item == MenuItem::Quit {
                    return AppAction::Quit;
                }
                self.open(item);
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Start the game (or screen) for a menu entry
    pub fn open(&mut self, item: MenuItem) {
        self.phase_elapsed = Duration::ZERO;
        self.screen = match item {
            MenuItem::Zen => Screen::Zen(ZenGame::new(&mut self.generator)),
            MenuItem::Blitz => Screen::Blitz(BlitzGame::new(&mut self.generator)),
            MenuItem::Walker => {
                Screen::Walker(WalkerGame::new(self.difficulty, &mut self.generator))
            }
            MenuItem::KnightVision => match KnightVisionGame::new(&mut self.generator) {
                Ok(game) => Screen::KnightVision(game),
                Err(e) => {
                    log::error!("could not start knight vision: {}", e);
                    self.show_message("Could not build a round, try again");
                    Screen::Menu
                }
            },
            MenuItem::Help => Screen::Help(0),
            MenuItem::Scores => match self.scores.book() {
                Ok(book) => Screen::Scores(book),
                Err(e) => {
                    log::warn!("could not read scores: {}", e);
                    self.show_message(&format!("Scores unavailable ({})", e));
                    Screen::Menu
                }
            },
            MenuItem::Quit => Screen::Menu,
        };
    }

    fn handle_zen_key(&mut self, key: KeyEvent) {
        let Screen::Zen(game) = &mut self.screen else {
            return;
        };

        let mut best = None;
        match (key.code, game.phase()) {
            (KeyCode::Esc, _) => {
                self.screen = Screen::Menu;
                return;
            }
            (KeyCode::Char('w'), ZenPhase::Guessing) => {
                game.answer(SquareColor::White);
                best = Some(game.score());
            }
            (KeyCode::Char('b'), ZenPhase::Guessing) => {
                game.answer(SquareColor::Black);
                best = Some(game.score());
            }
            (KeyCode::Char('n') | KeyCode::Enter | KeyCode::Char(' '), ZenPhase::Result) => {
                game.next(&mut self.generator);
            }
            _ => {}
        }

        if let Some(best) = best {
            self.record_score(GameMode::Zen, best);
        }
    }

    fn handle_blitz_key(&mut self, key: KeyEvent) {
        let Screen::Blitz(game) = &mut self.screen else {
            return;
        };

        let mut finished = None;
        match (key.code, game.phase()) {
            (KeyCode::Esc, _) => {
                self.screen = Screen::Menu;
                return;
            }
            (
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r'),
                BlitzPhase::Ready | BlitzPhase::Finished,
            ) => {
                game.start(&mut self.generator);
            }
            (KeyCode::Char(c @ ('w' | 'b')), BlitzPhase::Playing) => {
                let color = if c == 'w' {
                    SquareColor::White
                } else {
                    SquareColor::Black
                };
                if game.answer(color, &mut self.generator) == Some(false) {
                    self.message = Some("-5s".to_string());
                    self.message_timer = MESSAGE_TICKS / 3;
                }
                if game.is_finished() {
                    finished = Some(game.score());
                }
            }
            _ => {}
        }

        if let Some(score) = finished {
            self.show_message(&format!("Time! {} points", score));
            self.record_score(GameMode::Blitz, score);
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Menu;
                return;
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, 1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, -1),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Enter | KeyCode::Char(' ') => self.select_cursor(),
            KeyCode::Char('r') => self.restart_board_game(),
            _ => {}
        }
    }

    fn select_cursor(&mut self) {
        let square = self.cursor;
        let (mode, outcome) = match &mut self.screen {
            Screen::Walker(game) => (game.mode(), game.select(square, &mut self.generator)),
            Screen::KnightVision(game) => match game.select(square, &mut self.generator) {
                Ok(outcome) => (game.mode(), outcome),
                Err(e) => {
                    log::error!("could not plan the next knight round: {}", e);
                    self.show_message("Could not build a round, back to menu");
                    self.screen = Screen::Menu;
                    return;
                }
            },
            _ => return,
        };

        match outcome {
            GuessOutcome::Ignored => {}
            GuessOutcome::Found { remaining } => {
                self.show_message(&format!("Yes! {} to go", remaining));
            }
            GuessOutcome::RoundCleared { wave_advanced } => {
                self.phase_elapsed = Duration::ZERO;
                if wave_advanced {
                    self.show_message("Wave cleared!");
                } else {
                    self.show_message("Correct!");
                }
            }
            GuessOutcome::Miss { lives_left } => {
                self.phase_elapsed = Duration::ZERO;
                self.show_message(&format!(
                    "Wrong! {} {} left",
                    lives_left,
                    if lives_left == 1 { "life" } else { "lives" }
                ));
            }
            GuessOutcome::GameOver { wave } => {
                self.show_message(&format!("Game over at wave {}", wave));
                self.record_score(mode, wave);
            }
        }
    }

    fn restart_board_game(&mut self) {
        self.phase_elapsed = Duration::ZERO;
        match &mut self.screen {
            Screen::Walker(game) => game.restart(&mut self.generator),
            Screen::KnightVision(game) => {
                if let Err(e) = game.restart(&mut self.generator) {
                    log::error!("could not restart knight vision: {}", e);
                    self.screen = Screen::Menu;
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, df: i8, dr: i8) {
        if let Some(next) = self.cursor.offset(df, dr) {
            self.cursor = next;
        }
    }

    /// Store `value` if it is a new best; errors are logged and shown, never fatal
    fn record_score(&mut self, mode: GameMode, value: u32) {
        match self.scores.set_high_score_if_greater(mode, value) {
            Ok(true) => {
                if matches!(self.screen, Screen::Walker(_) | Screen::KnightVision(_) | Screen::Blitz(_)) {
                    self.show_message(&format!("New best for {}: {}", mode, value));
                }
            }
            Ok(false) => {}
            Err(e) => {
                log::warn!("could not save {} score: {}", mode.key(), e);
                self.show_message("Could not save score");
            }
        }
    }
}

fn step_difficulty(current: Difficulty, delta: i32) -> Difficulty {
    let levels = Difficulty::ALL;
    let idx = levels.iter().position(|&d| d == current).unwrap_or(0) as i32;
    let len = levels.len() as i32;
    levels[(idx + delta).rem_euclid(len) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::MockScores;
    use blindchess_core::games::RoundPhase;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app(start: Option<MenuItem>) -> (App, Arc<MockScores>) {
        let scores = Arc::new(MockScores::new());
        let config = AppConfig {
            start,
            difficulty: Difficulty::Medium,
            seed: Some(42),
            theme: Theme::dark(),
        };
        (App::new(config, scores.clone()), scores)
    }

    #[test]
    fn test_menu_navigation() {
        let (mut app, _) = test_app(None);
        assert!(matches!(app.screen, Screen::Menu));

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.difficulty, Difficulty::Hard);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.difficulty, Difficulty::Easy);

        app.handle_key(key(KeyCode::Enter));
        match &app.screen {
            Screen::Walker(game) => assert_eq!(game.difficulty(), Difficulty::Easy),
            _ => panic!("expected the walker"),
        }

        app.handle_key(key(KeyCode::Esc));
        assert!(matches!(app.screen, Screen::Menu));
        assert!(matches!(app.handle_key(key(KeyCode::Char('q'))), AppAction::Quit));
    }

    #[test]
    fn test_help_pages() {
        let (mut app, _) = test_app(None);
        app.open(MenuItem::Help);
        assert!(matches!(app.screen, Screen::Help(0)));

        app.handle_key(key(KeyCode::Left));
        assert!(matches!(app.screen, Screen::Help(0)));
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Right));
        }
        assert!(matches!(app.screen, Screen::Help(3)));

        app.handle_key(key(KeyCode::Esc));
        assert!(matches!(app.screen, Screen::Menu));
    }

    #[test]
    fn test_zen_records_best_streak() {
        let (mut app, scores) = test_app(Some(MenuItem::Zen));

        for _ in 0..2 {
            let color = match &app.screen {
                Screen::Zen(game) => game.square().color(),
                _ => panic!("expected zen"),
            };
            let answer = if color == SquareColor::White { 'w' } else { 'b' };
            app.handle_key(key(KeyCode::Char(answer)));
            app.handle_key(key(KeyCode::Char('n')));
        }

        assert_eq!(scores.high_score(GameMode::Zen).unwrap(), 2);
    }

    #[test]
    fn test_blitz_clock_records_score() {
        let (mut app, scores) = test_app(Some(MenuItem::Blitz));
        app.handle_key(key(KeyCode::Enter));

        let color = match &app.screen {
            Screen::Blitz(game) => game.square().color(),
            _ => panic!("expected blitz"),
        };
        let answer = if color == SquareColor::White { 'w' } else { 'b' };
        app.handle_key(key(KeyCode::Char(answer)));

        app.tick(Duration::from_secs(60));
        match &app.screen {
            Screen::Blitz(game) => assert!(game.is_finished()),
            _ => panic!("expected blitz"),
        }
        assert_eq!(scores.high_score(GameMode::Blitz).unwrap(), 1);
    }

    #[test]
    fn test_walker_phases_follow_ticks() {
        let (mut app, _) = test_app(Some(MenuItem::Walker));

        app.tick(Duration::from_secs(3));
        match &app.screen {
            Screen::Walker(game) => assert_eq!(game.phase(), RoundPhase::StartSquare),
            _ => panic!("expected walker"),
        }

        for _ in 0..10 {
            app.tick(Duration::from_secs(2));
        }
        let target = match &app.screen {
            Screen::Walker(game) => {
                assert_eq!(game.phase(), RoundPhase::Guessing);
                game.round().target
            }
            _ => panic!("expected walker"),
        };

        app.cursor = target;
        app.handle_key(key(KeyCode::Enter));
        match &app.screen {
            Screen::Walker(game) => {
                assert_eq!(game.progress().round(), 2);
                assert_eq!(game.phase(), RoundPhase::Countdown);
            }
            _ => panic!("expected walker"),
        }
    }

    #[test]
    fn test_score_errors_are_not_fatal() {
        let (mut app, scores) = test_app(Some(MenuItem::Zen));
        scores.set_available(false);

        let color = match &app.screen {
            Screen::Zen(game) => game.square().color(),
            _ => panic!("expected zen"),
        };
        let answer = if color == SquareColor::White { 'w' } else { 'b' };
        app.handle_key(key(KeyCode::Char(answer)));
        assert_eq!(app.message.as_deref(), Some("Could not save score"));

        app.handle_key(key(KeyCode::Esc));
        app.open(MenuItem::Scores);
        assert!(matches!(app.screen, Screen::Menu));
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let (mut app, _) = test_app(Some(MenuItem::Walker));
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Up));
            app.handle_key(key(KeyCode::Left));
        }
        assert_eq!(app.cursor.to_string(), "a8");
    }
}
