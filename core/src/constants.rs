use std::time::Duration;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Total addressable memory in bytes
pub const MEMORY_SIZE: usize = 4096;

/// Address that programs are loaded at and execution starts from
pub const PROGRAM_START: u16 = 0x200;

/// Largest program that fits between `PROGRAM_START` and the end of memory
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const KEY_COUNT: usize = 16;

/// Register used as the carry, borrow and collision flag
pub const VF: usize = 0xF;

/// Bytes per glyph in `SPRITE_SHEET`
pub const SPRITE_HEIGHT: u16 = 5;

/// Time between two timer decrements (60Hz)
pub const TIMER_INTERVAL: Duration = Duration::from_micros(16_670);

/// Default time spent on a single instruction
pub const CLOCK_SPEED: Duration = Duration::from_micros(1_667);

/// Default number of executed instructions per timer decrement
pub const CPU_CYCLES_PER_TIMER_CYCLE: u32 =
    (TIMER_INTERVAL.as_micros() / CLOCK_SPEED.as_micros()) as u32;

/// Hexadecimal digit glyphs 0..F, 5 rows of 4 pixels each, stored at 0x000
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
