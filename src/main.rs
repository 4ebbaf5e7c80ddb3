use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use snekduel::game::{Arena, GameEvent, Rules};
use snekduel::input::{map_key, Command};
use snekduel::tick::TickGate;
use snekduel::ui;

const CONTROLS_HINT: &str = "Arrows steer player 1, WASD steer player 2, q quits";

#[derive(Parser, Debug)]
#[command(name = "snekduel")]
#[command(version, about = "Two-player snake with power-ups")]
struct Cli {
    /// Milliseconds between game steps
    #[arg(long, default_value_t = 200)]
    tick_ms: u64,

    /// Seed for food and power-up placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log; the terminal is taken by the game
    #[arg(long, default_value = "snekduel.log")]
    log_file: PathBuf,

    /// Log every game event
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(level, Config::default(), log_file).context("Failed to initialize logger")?;

    info!("Starting snekduel");

    let rng = match cli.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let arena =
        Arena::new(Rules::default(), rng, Instant::now()).context("Failed to set up the arena")?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run(&mut terminal, arena, Duration::from_millis(cli.tick_ms));

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("Game stopped: {:#}", e);
    }
    info!("Exiting snekduel");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut arena: Arena,
    tick_rate: Duration,
) -> Result<()> {
    let mut gate = TickGate::new(tick_rate, Instant::now());
    let mut status = CONTROLS_HINT.to_string();

    loop {
        terminal.draw(|f| ui::render(f, &arena, &status))?;

        // Handle input; nothing to wait for while the round is over
        let timeout = if arena.is_running() {
            gate.until_next(Instant::now())
        } else {
            tick_rate
        };
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    Command::Quit => break,
                    Command::Steer(player, direction) => {
                        arena.steer(player, direction);
                    }
                    Command::Restart if !arena.is_running() => {
                        arena.reset(Instant::now())?;
                        gate = TickGate::new(tick_rate, Instant::now());
                        status = CONTROLS_HINT.to_string();
                    }
                    Command::Restart | Command::Ignore => {}
                }
            }
        }

        let now = Instant::now();
        if arena.is_running() && gate.ready(now) {
            let report = arena.tick(now)?;
            // A crash outranks anything else that happened on the same tick
            let headline = report
                .events
                .iter()
                .find(|event| matches!(event, GameEvent::Crashed { .. }))
                .or(report.events.last());
            if let Some(event) = headline {
                status = ui::describe(event);
            }
        }
    }

    Ok(())
}
