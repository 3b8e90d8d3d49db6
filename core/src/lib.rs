pub use chip8::Chip8;
pub use config::Config;
pub use constants::CLOCK_SPEED;
pub use error::{Error, Result};
pub use frontend::{Event, Frontend};
pub use state::FrameBuffer;

mod chip8;
mod config;
pub mod constants;
mod error;
mod frontend;
pub mod instruction;
pub mod opcode;
mod operations;
pub mod state;
