use anyhow::Context;
use clap::Parser;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::{FutureExt, StreamExt};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use sweeper_core as game;
use tracing_subscriber::filter::LevelFilter;

mod command;
mod render;

use command::Command;
use render::Hud;

#[derive(Parser, Debug)]
#[command(version, about = "Play minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of rows
    #[arg(long, default_value_t = game::GameConfig::BEGINNER.rows())]
    rows: game::Coord,

    /// Number of columns
    #[arg(long, default_value_t = game::GameConfig::BEGINNER.cols())]
    cols: game::Coord,

    /// Number of mines, must leave at least one free cell
    #[arg(long, default_value_t = game::GameConfig::BEGINNER.mines)]
    mines: game::CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print game events as JSON lines instead of drawing the board
    #[arg(long)]
    json: bool,
}

fn init_logging(level: log::LevelFilter) {
    let level = LevelFilter::from_str(level.as_str()).unwrap_or(LevelFilter::OFF);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn drain(events: &mut UnboundedReceiver<game::GameEvent>) -> Vec<game::GameEvent> {
    let mut drained = Vec::new();
    while let Some(Some(event)) = events.next().now_or_never() {
        drained.push(event);
    }
    drained
}

fn show(
    out: &mut impl Write,
    args: &Args,
    session: &game::GameSession,
    hud: &mut Hud,
    events: &mut UnboundedReceiver<game::GameEvent>,
) -> anyhow::Result<()> {
    for event in drain(events) {
        if args.json {
            writeln!(out, "{}", serde_json::to_string(&event)?)?;
        }
        hud.apply(&event);
    }
    if !args.json {
        write!(out, "{}", render::render_board(session))?;
        writeln!(out, "{}", hud.status_line())?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());
    log::debug!("seed: {:?}", args.seed);

    let config = game::GameConfig::new(args.rows, args.cols, args.mines)
        .context("Could not create board")?;
    let mut session = match args.seed {
        Some(seed) => game::GameSession::with_seed(config, seed),
        None => game::GameSession::with_entropy(config),
    };
    let mut events = session.subscribe();
    let mut hud = Hud::default();

    let mut out = io::stdout().lock();
    show(&mut out, &args, &session, &mut hud, &mut events)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read command")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        if command == Command::Quit {
            break;
        }

        match command.apply(&mut session) {
            Ok(true) => show(&mut out, &args, &session, &mut hud, &mut events)?,
            Ok(false) => writeln!(out, "nothing changed")?,
            Err(err) => writeln!(out, "error: {err}")?,
        }
    }

    log::debug!("bye");
    Ok(())
}
