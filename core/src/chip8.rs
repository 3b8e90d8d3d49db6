use std::io::Read;
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::constants::{KEY_COUNT, TIMER_INTERVAL};
use crate::error::Result;
use crate::frontend::{Event, Frontend};
use crate::instruction;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the random source used by `CXKK`
///  - the `config` it was built with
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU and its timers
/// - inspecting its frame buffer for rendering by some display
/// - running a program to completion against a `Frontend`
pub struct Chip8 {
    state: State,
    rng: StdRng,
    config: Config,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            state: State::new(),
            rng,
            config,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the machine to its power-on state
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Load a program image into memory at 0x200
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.state.load_program(program)
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.load_program(&program)?;
        info!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Returns the FrameBuffer if the display should be redrawn and clears the draw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Returns how long a tone should sound if one was requested since the last call
    pub fn take_tone(&mut self) -> Option<Duration> {
        self.state
            .tone
            .take()
            .map(|ticks| TIMER_INTERVAL * u32::from(ticks))
    }

    /// Whether execution is halted on `FX0A`
    pub fn awaiting_key(&self) -> bool {
        self.state.register_needing_key.is_some()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        if key as usize >= KEY_COUNT {
            warn!("ignoring press of unknown key {:#X}", key);
            return;
        }
        self.state.pressed_keys[key as usize] = true;
        if let Some(register) = self.state.register_needing_key.take() {
            debug!("key {:X} released the wait on V{:X}", key, register);
            self.state.v[register as usize] = key;
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        if let Some(pressed) = self.state.pressed_keys.get_mut(key as usize) {
            *pressed = false;
        }
    }

    /// Advances the CPU by a single cycle
    /// - breaks if awaiting a keypress
    /// - gets and executes the next opcode
    pub fn advance_cpu(&mut self) -> Result<()> {
        if self.awaiting_key() {
            return Ok(());
        }
        let op = self.state.fetch()?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        instruction::execute(op, &mut self.state, &mut self.rng)?;
        if let Some(register) = self.state.register_needing_key {
            debug!("waiting for a key for V{:X}", register);
        }
        Ok(())
    }

    /// Handles delay counter and timers
    /// - decrements timers when the counter is at 0 and resets the counter
    /// - decrements the delay counter
    pub fn advance_timers(&mut self) {
        if self.state.delay_counter == 0 {
            self.state.delay_counter = self.config.cycles_per_timer_tick.max(1);
            self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
            self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
        }
        self.state.delay_counter -= 1;
    }

    /// Executes one instruction and, if it ran, counts it towards the next timer decrement.
    /// Does nothing while waiting on a key.
    pub fn step(&mut self) -> Result<()> {
        if self.awaiting_key() {
            return Ok(());
        }
        self.advance_cpu()?;
        self.advance_timers();
        Ok(())
    }

    /// Runs an in-memory program image the same way `run_rom` runs a file
    pub fn run(&mut self, program: &[u8], frontend: &mut dyn Frontend) -> Result<()> {
        self.run_rom(&mut &program[..], frontend)
    }

    /// Resets the machine, loads a rom from `reader` and runs it until the frontend quits or an
    /// error stops it. The frontend is torn down either way.
    pub fn run_rom(&mut self, reader: &mut dyn Read, frontend: &mut dyn Frontend) -> Result<()> {
        self.reset();
        let result = self
            .load_rom(reader)
            .and_then(|()| self.run_loaded(frontend));
        frontend.teardown();
        match &result {
            Ok(()) => info!("program stopped at pc {:#05X}", self.state.pc),
            Err(e) => warn!("program failed: {}", e),
        }
        result
    }

    fn run_loaded(&mut self, frontend: &mut dyn Frontend) -> Result<()> {
        'run: loop {
            let cycle_start = Instant::now();

            while let Some(event) = frontend.poll_event() {
                match event {
                    Event::Quit => break 'run,
                    Event::KeyDown(key) => self.key_press(key),
                    Event::KeyUp(key) => self.key_release(key),
                }
            }

            self.step()?;

            if let Some(frame) = self.take_frame() {
                frontend.render(&frame);
            }
            if let Some(duration) = self.take_tone() {
                debug!("tone requested for {:?}", duration);
                frontend.beep(duration);
            }

            let elapsed = cycle_start.elapsed();
            if self.config.instruction_interval > elapsed {
                std::thread::sleep(self.config.instruction_interval - elapsed);
            }
        }
        Ok(())
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
