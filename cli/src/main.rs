use std::io;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minesweeper_core::{
    Console, IoConsole, RandomMineGenerator, Session, SessionOptions, SessionOutcome,
};

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid size to use instead of asking, 2 to 26
    #[arg(long)]
    size: Option<usize>,

    /// Number of mines to use instead of asking
    #[arg(long)]
    mines: Option<usize>,
}

fn setup_logging(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message,
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose.log_level_filter()).context("Error initializing logger")?;
    log::debug!("seed: {:?}", args.seed);

    let mut generator = match args.seed {
        Some(seed) => RandomMineGenerator::from_seed(seed),
        None => RandomMineGenerator::new(),
    };
    let session = Session::new(SessionOptions {
        size: args.size,
        mines: args.mines,
    });

    let mut console = IoConsole::new(io::stdin().lock(), io::stdout());
    console.write_line("Welcome to Minesweeper!")?;

    loop {
        match session.run(&mut console, &mut generator)? {
            SessionOutcome::Abandoned => break,
            outcome => log::debug!("Game ended: {outcome:?}"),
        }
    }

    log::debug!("Input closed, exiting");
    Ok(())
}
