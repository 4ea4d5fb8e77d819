use clap::Parser;
use jchip8_core::arch::{Chip8, Emulator, HostError};
use jchip8_core::gfx::Headless;
use log::LevelFilter;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the game to load
    #[arg(
        short,
        long,
        required_unless_present = "load_state",
        conflicts_with = "load_state"
    )]
    path: Option<PathBuf>,

    /// Whether or not to turn on debug logging (one line per cycle)
    #[arg(short, long)]
    debug: bool,

    /// Number of cycles to run before quitting
    #[arg(short, long, default_value_t = 1000)]
    cycles: u64,

    /// Cycles executed per 60Hz timer tick
    #[arg(long, default_value_t = 10)]
    cycles_per_frame: u32,

    /// Keys (0-F) to hold down for the whole run, comma separated
    #[arg(short, long, value_delimiter = ',', value_parser = parse_key)]
    keys: Vec<u8>,

    /// Seed for the random number opcode
    #[arg(long)]
    seed: Option<u64>,

    /// Resume from a snapshot instead of loading a game
    #[arg(long)]
    load_state: Option<PathBuf>,

    /// Write a snapshot here when the run ends
    #[arg(long)]
    save_state: Option<PathBuf>,
}

fn parse_key(arg: &str) -> Result<u8, String> {
    match u8::from_str_radix(arg.trim(), 16) {
        Ok(key) if key <= 0xF => Ok(key),
        _ => Err(format!("{arg} is not a key between 0 and F")),
    }
}

fn main() -> Result<(), HostError> {
    let args = Args::parse();

    let level = if args.debug {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_module("jchip8_core", level)
        .filter_module("jchip8", level)
        .init();

    let mut emulator = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    if let Some(snapshot) = &args.load_state {
        emulator.restore_state(&mut File::open(snapshot)?)?;
    } else if let Some(path) = &args.path {
        emulator.load_game(path)?;
    }

    let mut host = Headless::new(args.cycles, args.cycles_per_frame);
    host.hold_keys(&args.keys);
    let result = emulator.run(&mut host);

    print!("{}", emulator.screen());

    if let Some(snapshot) = &args.save_state {
        emulator.save_state(&mut File::create(snapshot)?)?;
    }

    result
}
