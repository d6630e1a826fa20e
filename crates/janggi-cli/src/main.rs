// Terminal Janggi for two players at one keyboard

mod session;

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use janggi_core::setup::{layout, BackRank};
use janggi_core::{Janggi, Owner, Snapshot, OPENING_LAYOUT};
use session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Start from a JSON file holding ten rows of nine characters
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["second_back_rank", "first_back_rank", "prompt_setup"]
    )]
    layout: Option<PathBuf>,

    /// Back rank of the second (red) side, e.g. "rehg gehr"
    #[arg(long, value_name = "TEXT")]
    second_back_rank: Option<String>,

    /// Back rank of the first (blue) side, e.g. "rehg gehr"
    #[arg(long, value_name = "TEXT")]
    first_back_rank: Option<String>,

    /// Ask for both back ranks before the game starts
    #[arg(long)]
    prompt_setup: bool,

    /// Print the board without colours
    #[arg(long)]
    plain: bool,
}

fn main() {
    let args = Args::parse();

    use std::io::Write;
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    })
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(&args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let stdout = io::stdout();
    let colored = !args.plain && stdout.is_terminal();
    let mut session =
        Session::new(Janggi::new(), io::stdin().lock(), stdout.lock()).colored(colored);

    let snapshot = if let Some(path) = &args.layout {
        read_layout(path)?
    } else if args.prompt_setup {
        session.prompt_setup()?
    } else {
        back_rank_layout(args.second_back_rank.as_deref(), args.first_back_rank.as_deref())?
    };
    log::debug!("starting position:\n{snapshot}");

    session.load(Janggi::from_snapshot(&snapshot));
    let state = session.run()?;
    log::info!("game finished: {state}");
    Ok(())
}

fn read_layout(path: &Path) -> Result<Snapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read layout {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid layout in {}", path.display()))
}

fn back_rank_layout(second: Option<&str>, first: Option<&str>) -> Result<Snapshot> {
    let rank = |text: Option<&str>, owner: Owner, default: &str| {
        BackRank::parse(text.unwrap_or(default), owner)
            .with_context(|| format!("invalid {owner} back rank"))
    };
    let second = rank(second, Owner::Second, OPENING_LAYOUT[0])?;
    let first = rank(first, Owner::First, OPENING_LAYOUT[9])?;
    Ok(layout(&second, &first))
}
