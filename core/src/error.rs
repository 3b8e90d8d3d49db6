use thiserror::Error;

use crate::constants::MEMORY_SIZE;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a program from loading or running.
///
/// None of these are retried; each ends the current run and leaves the machine ready to be
/// reset and handed another program.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid opcode {opcode:#06X} at {pc:#05X}")]
    InvalidOpcode { opcode: u16, pc: u16 },

    #[error("program is {size} bytes but only {available} bytes of memory are available")]
    OutOfSpace { size: usize, available: usize },

    #[error("cannot fetch an opcode at {pc:#05X}, it would read past the end of memory at {:#05X}", MEMORY_SIZE)]
    ProgramCounterOutOfBounds { pc: u16 },

    #[error("memory address {address:#06X} is outside of memory")]
    MemoryOutOfBounds { address: usize },

    #[error("call at {pc:#05X} overflowed the stack")]
    StackOverflow { pc: u16 },

    #[error("return at {pc:#05X} with an empty stack")]
    StackUnderflow { pc: u16 },

    #[error("unable to read program")]
    Io(#[from] std::io::Error),
}
