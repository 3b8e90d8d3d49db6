use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START,
    REGISTER_COUNT, SPRITE_SHEET, STACK_SIZE,
};
use crate::error::{Error, Result};

/// The FrameBuffer is indexed as [y][x]; `true` is a lit pixel
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - VF doubles as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of live frames on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down at 60Hz
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory, the sprite sheet at 0x000 and programs from 0x200
/// - 32x64 frame buffer
///
/// ## Input
/// - pressed status of keys 0..F
/// - execution halts while `register_needing_key` is set
///
/// ## Timing
/// - timers are decremented once every `Config::cycles_per_timer_tick` instructions
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub pressed_keys: [bool; KEY_COUNT],
    /// Set whenever the frame buffer should be redrawn
    pub draw_flag: bool,
    /// Sound timer value a tone was just requested for
    pub tone: Option<u8>,
    pub register_needing_key: Option<u8>,
    /// Instructions left until the timers are next decremented
    pub delay_counter: u32,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[0..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            pressed_keys: [false; KEY_COUNT],
            draw_flag: false,
            tone: None,
            register_needing_key: None,
            delay_counter: 0,
        }
    }

    /// Returns every field to its power-on value and reloads the sprite sheet
    pub fn reset(&mut self) {
        *self = State::new();
    }

    /// Copies a program into memory at 0x200
    ///
    /// # Arguments
    /// * `program` the raw program image, at most `MAX_PROGRAM_SIZE` bytes
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::OutOfSpace {
                size: program.len(),
                available: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<u16> {
        let pc = self.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Error::ProgramCounterOutOfBounds { pc: self.pc });
        }
        let left = u16::from(self.memory[pc]);
        let right = u16::from(self.memory[pc + 1]);
        Ok(left << 8 | right)
    }

    /// Memory starting at `address`, `len` bytes long
    pub fn memory_at(&self, address: u16, len: usize) -> Result<&[u8]> {
        let range = Self::range(address, len)?;
        Ok(&self.memory[range])
    }

    pub fn memory_at_mut(&mut self, address: u16, len: usize) -> Result<&mut [u8]> {
        let range = Self::range(address, len)?;
        Ok(&mut self.memory[range])
    }

    fn range(address: u16, len: usize) -> Result<std::ops::Range<usize>> {
        let start = address as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(Error::MemoryOutOfBounds {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_sprite_sheet_and_empty_program_space() {
        let state = State::new();
        assert_eq!(state.memory[..80], SPRITE_SHEET[..]);
        assert!(state.memory[80..].iter().all(|&byte| byte == 0));
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = State::new();
        state.v[0x3] = 0x42;
        state.i = 0x321;
        state.pc = 0x456;
        state.sp = 0x2;
        state.stack[0] = 0x202;
        state.delay_timer = 0x9;
        state.sound_timer = 0x9;
        state.memory[0x300] = 0xFF;
        state.memory[0x10] = 0x00;
        state.frame_buffer[3][7] = true;
        state.pressed_keys[0xA] = true;
        state.register_needing_key = Some(0x4);
        state.delay_counter = 0x3;

        state.reset();
        let once = state;
        state.reset();

        assert_eq!(state, once);
        assert_eq!(state, State::new());
        assert_eq!(state.memory[..80], SPRITE_SHEET[..]);
        assert_eq!(state.sp, 0);
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.v, [0; 16]);
        assert_eq!((state.delay_timer, state.sound_timer), (0, 0));
    }

    #[test]
    fn test_loads_program_at_0x200() {
        let mut state = State::new();
        state.load_program(&[0x60, 0x05, 0x12, 0x00]).unwrap();
        assert_eq!(state.memory[0x200..0x204], [0x60, 0x05, 0x12, 0x00]);
        assert_eq!(state.memory[0x204], 0);
        assert_eq!(state.memory[..80], SPRITE_SHEET[..]);
    }

    #[test]
    fn test_loads_program_filling_memory() {
        let mut state = State::new();
        state.load_program(&[0xAB; MAX_PROGRAM_SIZE]).unwrap();
        assert_eq!(state.memory[MEMORY_SIZE - 1], 0xAB);
    }

    #[test]
    fn test_refuses_program_larger_than_memory() {
        let mut state = State::new();
        let result = state.load_program(&[0x0; MAX_PROGRAM_SIZE + 1]);
        assert!(matches!(
            result,
            Err(Error::OutOfSpace {
                size: 3585,
                available: 3584
            })
        ));
        assert!(state.memory[0x200..].iter().all(|&byte| byte == 0));
    }

    #[test]
    fn test_fetches_big_endian() {
        let mut state = State::new();
        state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(state.fetch().unwrap(), 0xAABB);
    }

    #[test]
    fn test_fetch_outside_memory_fails() {
        let mut state = State::new();
        state.pc = 0x1000;
        assert!(matches!(
            state.fetch(),
            Err(Error::ProgramCounterOutOfBounds { pc: 0x1000 })
        ));
        state.pc = 0xFFF;
        assert_eq!(
            state.fetch().unwrap_err().to_string(),
            "cannot fetch an opcode at 0xFFF, it would read past the end of memory at 0x1000"
        );
        state.pc = 0xFFE;
        assert!(state.fetch().is_ok());
    }

    #[test]
    fn test_memory_at_checks_bounds() {
        let state = State::new();
        assert_eq!(state.memory_at(0x0, 5).unwrap(), &SPRITE_SHEET[..5]);
        assert!(state.memory_at(0xFFE, 2).is_ok());
        assert!(matches!(
            state.memory_at(0xFFE, 3),
            Err(Error::MemoryOutOfBounds { address: 0x1000 })
        ));
    }
}
