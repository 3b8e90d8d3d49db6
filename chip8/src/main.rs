use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use log::{error, info};

use vip8_core::constants::CPU_CYCLES_PER_TIMER_CYCLE;
use vip8_core::{Config, CLOCK_SPEED};

mod keymap;
mod menu;
mod run;

use menu::Choice;

/// Chip-8 interpreter
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// A ROM to run, or a directory of ROMs to pick from
    path: PathBuf,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Microseconds spent on each instruction
    #[arg(long, default_value_t = CLOCK_SPEED.as_micros() as u64)]
    interval_us: u64,

    /// Instructions executed per delay/sound timer decrement
    #[arg(long, default_value_t = CPU_CYCLES_PER_TIMER_CYCLE)]
    ticks_per_timer: u32,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> Config {
        let config = Config::default()
            .with_instruction_interval(Duration::from_micros(self.interval_us))
            .with_cycles_per_timer_tick(self.ticks_per_timer);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.config();
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;

    if !args.path.is_dir() {
        return run::run(&sdl, &args.path, config, args.scale);
    }

    let roms = menu::list_roms(&args.path)?;
    if roms.is_empty() {
        return Err(anyhow!("no roms found in {}", args.path.display()));
    }
    let mut input = io::stdin().lock();
    loop {
        match menu::prompt(&roms, &mut input)? {
            Choice::Quit => break,
            Choice::Invalid => println!("not a rom number"),
            Choice::Rom(n) => {
                if let Err(e) = run::run(&sdl, &roms[n], config, args.scale) {
                    error!("{:#}", e);
                }
            }
        }
    }
    info!("bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_core_config() {
        let args = Args::try_parse_from(["vip8", "roms/PONG"]).unwrap();
        assert_eq!(args.scale, 10);
        assert_eq!(args.config(), Config::default());
    }

    #[test]
    fn test_flags_reach_config() {
        let args = Args::try_parse_from([
            "vip8",
            "roms",
            "--interval-us",
            "500",
            "--ticks-per-timer",
            "33",
            "--seed",
            "7",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!(config.instruction_interval, Duration::from_micros(500));
        assert_eq!(config.cycles_per_timer_tick, 33);
        assert_eq!(config.seed, Some(7));
    }
}
