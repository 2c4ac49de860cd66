//! Zen Tetris terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from
//! `zen_tetris::term`. The core is stepped at a fixed timestep.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use log::info;

use zen_tetris::app::{App, AppSettings, Control};
use zen_tetris::core::config::{parse_mode, parse_soft_drop, validate_tick_ms};
use zen_tetris::term::{screen_fingerprint, FrameBuffer, MatchView, RedrawGate, TerminalRenderer, Viewport};
use zen_tetris::types::{MatchMode, SoftDropStyle, TICK_MS};

/// Log file used when only `RUST_LOG` is set.
const DEFAULT_LOG_FILE: &str = "zen-tetris.log";

#[derive(Parser, Debug)]
#[command(
    name = "zen-tetris",
    version,
    about = "Falling-block puzzle in the terminal, for one player or two on one keyboard",
    after_help = "CONTROLS:\n  Player 1   arrows or WASD (up/W rotates, down/S soft drop)\n  Player 2   I rotate, J left, L right, K soft drop\n  Space      pause        Esc   back to title\n  O / T      one / two players on the title screen, Q quits"
)]
struct Cli {
    /// Start a match right away instead of showing the title screen (single or dual).
    #[arg(long, value_parser = parse_mode)]
    mode: Option<MatchMode>,

    /// RNG seed for the first match. Defaults to the current time.
    #[arg(long)]
    seed: Option<u32>,

    /// Fixed timestep of the game loop in milliseconds.
    #[arg(long, default_value_t = TICK_MS, value_name = "MS")]
    tick_ms: u32,

    /// Soft drop style: tap (one row per press) or sticky (keeps dropping until the piece locks).
    #[arg(long, default_value = "tap", value_parser = parse_soft_drop)]
    soft_drop: SoftDropStyle,

    /// Do not ring the terminal bell for game sounds.
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (filter with RUST_LOG, default info).
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let tick_ms = validate_tick_ms(cli.tick_ms)?;

    let seed = cli.seed.unwrap_or_else(time_seed);
    info!("zen-tetris starting: seed {seed}, tick {tick_ms}ms");

    let mut app = App::new(AppSettings {
        soft_drop: cli.soft_drop,
        seed,
        muted: cli.mute,
    });
    if let Some(mode) = cli.mode {
        app.start_match(mode)?;
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, tick_ms);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// The terminal owns stderr, so logs go to a file. Nothing is logged unless a
/// file is given or `RUST_LOG` is set.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None if std::env::var_os("RUST_LOG").is_some() => PathBuf::from(DEFAULT_LOG_FILE),
        None => return Ok(()),
    };
    let file = File::create(&path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, app: &mut App, tick_ms: u32) -> Result<()> {
    let view = MatchView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut gate = RedrawGate::new(None);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(tick_ms as u64);
    let dt = tick_ms as f64 / 1000.0;

    loop {
        // Render when something changed.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fingerprint = screen_fingerprint(&[app.screen().id(), w as u64, h as u64]);
        let now_ms = started.elapsed().as_millis() as u64;
        if gate.should_draw(now_ms, fingerprint, app.take_dirty()) {
            app.render_into(&view, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }
        if app.take_bell() {
            term.bell()?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) == Control::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    gate.reset();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.tick(dt);
        }
    }
}
