use std::path::PathBuf;

use clap::{ArgAction, Parser};

mod keymap;
mod run;

#[derive(Parser)]
#[command(name = "chip8")]
#[command(about = "A Chip-8 virtual machine", long_about = None)]
struct Args {
    /// Path to a Chip-8 rom image
    rom: PathBuf,

    /// Seed the random number generator for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Log more; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Logging defaults to warnings and scales with -v; RUST_LOG still wins.
fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run::run(&args.rom, args.seed)
}
