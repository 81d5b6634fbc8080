//! A terminal diagram of the uranium–plutonium breeding chain.
//!
//! U-238 captures a neutron, the excited U-239 β⁻-decays twice through Np-239
//! to Pu-239, which in turn fissions.  Run the binary to open the diagram full
//! screen, or pass `--dump` to print a single rendered frame to stdout.

mod app;
mod config;
mod core;
mod error;
mod ui;

use std::io::{self, stderr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler, headless,
    state::AppState,
};
use crate::config::{AppConfig, MarkerKind};
use crate::core::labels::Lang;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "U-238 → Pu-239 breeding chain diagram")]
struct Cli {
    /// Annotation language (`zh` or `en`).
    #[arg(long)]
    lang: Option<Lang>,

    /// Canvas marker: braille, halfblock, dot or block.
    #[arg(long)]
    marker: Option<MarkerKind>,

    /// Replace superscript minus signs with ASCII `-`.
    #[arg(long = "ascii-minus")]
    ascii_minus: bool,

    /// Hide the explanatory footer.
    #[arg(long = "no-footer")]
    no_footer: bool,

    /// Print one rendered frame to stdout and exit.
    #[arg(long)]
    dump: bool,

    /// Print the effective settings in config-file format and exit.
    #[arg(long = "print-config", conflicts_with = "dump")]
    print_config: bool,

    /// Width of the `--dump` frame in cells.
    #[arg(long, default_value_t = 160, requires = "dump")]
    width: u16,

    /// Height of the `--dump` frame in cells.
    #[arg(long, default_value_t = 40, requires = "dump")]
    height: u16,
}

impl Cli {
    /// Layer command-line flags over the file config.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(lang) = self.lang {
            config.lang = lang;
        }
        if let Some(marker) = self.marker {
            config.marker = marker;
        }
        if self.ascii_minus {
            config.ascii_minus = true;
        }
        if self.no_footer {
            config.show_footer = false;
        }
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (filtered by RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load();
    cli.apply(&mut config);

    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }

    let mut state = AppState::new(config);

    // ── headless mode ─────────────────────────────────────────
    if cli.dump {
        print!("{}", headless::render_text(&state, cli.width, cli.height)?);
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode().context("enabling raw mode")?;
    let mut terminal = match enter_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            // Half-way setup: undo what we can and report the setup error.
            let mut err = stderr();
            let _ = execute!(err, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            return Err(e);
        }
    };

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    // Always restore the terminal, even when the loop failed.
    let restored = restore_terminal(&mut terminal);
    first_error(result, restored)
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<io::Stderr>>> {
    let mut err = stderr();
    execute!(err, EnterAlternateScreen).context("entering alternate screen")?;
    Terminal::new(CrosstermBackend::new(stderr())).context("creating terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stderr>>) -> Result<()> {
    disable_raw_mode().context("disabling raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leaving alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

/// The loop's error wins over a teardown error, which is then only logged.
fn first_error(outcome: Result<()>, teardown: Result<()>) -> Result<()> {
    match (outcome, teardown) {
        (Err(e), Err(t)) => {
            tracing::warn!("restoring terminal failed: {t:#}");
            Err(e)
        }
        (outcome, teardown) => outcome.and(teardown),
    }
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(250));

    loop {
        terminal.draw(|frame| ui::draw(frame, &*state))?;

        // Resize and tick only need a redraw.
        match events.recv().await {
            Some(AppEvent::Key(k)) => handler::handle_key(state, k),
            Some(AppEvent::Resize(w, h)) => tracing::debug!("resize {w}x{h}"),
            Some(AppEvent::Tick) => {}
            None => break,
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
