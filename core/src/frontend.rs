use std::time::Duration;

use crate::state::FrameBuffer;

/// Input already translated into Chip-8 terms
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A key on the hex keypad (0x0..=0xF) went down
    KeyDown(u8),
    /// A key on the hex keypad (0x0..=0xF) came up
    KeyUp(u8),
    /// The window was closed; the run should stop
    Quit,
}

/// # Frontend
/// Everything a running `Chip8` talks to outside of itself.
///
/// The execution loop:
/// - drains `poll_event` once per cycle
/// - hands `render` a snapshot whenever an instruction changed the FrameBuffer
/// - calls `beep` when the program loads the sound timer
/// - calls `teardown` once the run is over, whether it quit or failed
pub trait Frontend {
    fn poll_event(&mut self) -> Option<Event>;

    fn render(&mut self, frame: &FrameBuffer);

    /// Fire and forget request for a tone lasting `duration`
    fn beep(&mut self, duration: Duration);

    fn teardown(&mut self) {}
}
