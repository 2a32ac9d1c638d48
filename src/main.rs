//! Terminal 2048 runner (default binary).
//!
//! Draws the board with crossterm and a framebuffer renderer, or with
//! `--headless` speaks the line-delimited JSON protocol on stdin/stdout.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tui_2048::adapter::{self, Session};
use tui_2048::core::{BestScoreStore, Game, JsonFileStore, MemoryStore, SimpleRng};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

#[derive(Parser, Debug)]
#[command(name = "tui-2048")]
#[command(about = "Slide, merge, reach 2048", version)]
struct Args {
    /// Seed for tile spawning (defaults to the system clock)
    #[arg(long, env = "TUI_2048_SEED")]
    seed: Option<u32>,

    /// JSON file that keeps the best score between runs (in memory when omitted)
    #[arg(long, env = "TUI_2048_BEST_SCORE_FILE")]
    best_score_file: Option<PathBuf>,

    /// Speak the JSON line protocol on stdin/stdout instead of drawing the board
    #[arg(long)]
    headless: bool,

    /// Write logs to this file; the terminal UI discards them otherwise
    #[arg(long, env = "TUI_2048_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let seed = args.seed.unwrap_or_else(clock_seed);
    let store: Box<dyn BestScoreStore + Send> = match &args.best_score_file {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };
    info!(seed, headless = args.headless, "starting");

    let mut game = Game::new(SimpleRng::new(seed), store);

    if args.headless {
        let mut session = Session::new(game);
        adapter::run(&mut session, io::stdin().lock(), io::stdout().lock())?;
        return Ok(());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Turn-based: block until the next key.
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    match game.apply_action(action) {
                        Ok(_) => dirty = true,
                        Err(e) => debug!(action = action.as_str(), error = %e, "action rejected"),
                    }
                }
            }
            Event::Resize(..) => {
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match (&args.log_file, args.headless) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow!(e))
        }
        (None, true) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
            .map_err(|e| anyhow!(e)),
        // The alternate screen owns the terminal; nowhere to log.
        (None, false) => Ok(()),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
