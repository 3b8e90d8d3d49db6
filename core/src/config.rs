use std::time::Duration;

use crate::constants::{CLOCK_SPEED, CPU_CYCLES_PER_TIMER_CYCLE};

/// Run parameters for a `Chip8`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Real time spent on each instruction; zero runs unthrottled
    pub instruction_interval: Duration,
    /// Executed instructions per delay/sound timer decrement
    pub cycles_per_timer_tick: u32,
    /// Seed for the random source behind `CXKK`; taken from the OS when absent
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_instruction_interval(mut self, interval: Duration) -> Self {
        self.instruction_interval = interval;
        self
    }

    pub fn with_cycles_per_timer_tick(mut self, cycles: u32) -> Self {
        self.cycles_per_timer_tick = cycles.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instruction_interval: CLOCK_SPEED,
            cycles_per_timer_tick: CPU_CYCLES_PER_TIMER_CYCLE,
            seed: None,
        }
    }
}
