use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

mod session;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn-based territory conquest simulation", long_about = None)]
struct Args {
    /// RNG seed; identical seeds replay identical games. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write the final game state as JSON to this path on exit
    #[arg(long)]
    dump_state: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Starting warsim (seed {})", seed);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let state = session::run(seed, &mut input, &mut output)?;

    log::info!("Session ended on turn {}", state.turn);

    if let Some(path) = args.dump_state {
        let json = serde_json::to_string_pretty(&state)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write state to {}", path.display()))?;
        log::info!("Final state written to {}", path.display());
    }

    Ok(())
}
