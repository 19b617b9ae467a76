mod app;
mod help;
mod render;
mod scores;
mod theme;

use app::{App, AppConfig, MenuItem};
use blindchess_core::Difficulty;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use theme::Theme;

/// Blindfold chess training in the terminal
#[derive(Parser, Debug)]
#[command(name = "blindchess", version, about)]
struct Cli {
    /// Skip the menu and start this game
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Walker difficulty: easy, medium or hard
    #[arg(long, default_value = "easy")]
    difficulty: String,

    /// Seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeArg::Dark)]
    theme: ThemeArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Zen,
    Blitz,
    Walker,
    KnightVision,
}

impl From<ModeArg> for MenuItem {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Zen => MenuItem::Zen,
            ModeArg::Blitz => MenuItem::Blitz,
            ModeArg::Walker => MenuItem::Walker,
            ModeArg::KnightVision => MenuItem::KnightVision,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
    HighContrast,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Dark => Theme::dark(),
            ThemeArg::Light => Theme::light(),
            ThemeArg::HighContrast => Theme::high_contrast(),
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Silent unless RUST_LOG is set, so the alternate screen stays clean
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = AppConfig {
        start: cli.mode.map(MenuItem::from),
        difficulty: Difficulty::parse_or_default(&cli.difficulty),
        seed: cli.seed,
        theme: cli.theme.into(),
    };
    let backend = scores::create_backend(scores::Environment::detect());
    log::info!("starting with {} score backend", backend.backend_name());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, App::new(config, backend));

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        render::render(stdout, &app)?;
        stdout.flush()?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
            }
        }

        // Phase timers and the Blitz clock run on real elapsed time
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_rate {
            app.tick(elapsed);
            last_tick = Instant::now();
        }
    }

    Ok(())
}
