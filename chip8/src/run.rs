use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context};
use log::{debug, error, info};
use sdl2::event::Event as SdlEvent;
use sdl2::EventPump;

use vip8_core::{Chip8, Config, Event, FrameBuffer, Frontend};
use vip8_display::Display;

use crate::keymap::keymap;

/// Connects a running Chip-8 to an sdl2 window and keyboard
pub struct SdlFrontend {
    display: Display,
    events: EventPump,
}

impl SdlFrontend {
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> anyhow::Result<Self> {
        let display = Display::new(sdl, scale).map_err(|e| anyhow!(e))?;
        let events = sdl.event_pump().map_err(|e| anyhow!(e))?;
        Ok(SdlFrontend { display, events })
    }
}

impl Frontend for SdlFrontend {
    fn poll_event(&mut self) -> Option<Event> {
        // skip over anything that isn't a window close or a keypad key
        while let Some(event) = self.events.poll_event() {
            let event = match event {
                SdlEvent::Quit { .. } => Some(Event::Quit),
                SdlEvent::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => keymap(key).map(Event::KeyDown),
                SdlEvent::KeyUp {
                    keycode: Some(key), ..
                } => keymap(key).map(Event::KeyUp),
                _ => None,
            };
            if event.is_some() {
                return event;
            }
        }
        None
    }

    fn render(&mut self, frame: &FrameBuffer) {
        if let Err(e) = self.display.render(frame) {
            error!("failed to render frame: {}", e);
        }
    }

    fn beep(&mut self, duration: Duration) {
        // no audio device is opened; the request is only reported
        debug!("beep for {:?}", duration);
    }

    fn teardown(&mut self) {
        self.display.hide();
    }
}

/// Reads a ROM from disk and runs it in a fresh window until the window is closed or the
/// program fails
pub fn run(sdl: &sdl2::Sdl, rom: &Path, config: Config, scale: u32) -> anyhow::Result<()> {
    let file = File::open(rom).with_context(|| format!("unable to open {}", rom.display()))?;
    info!("running {}", rom.display());

    let mut frontend = SdlFrontend::new(sdl, scale)?;
    let mut chip8 = Chip8::new(config);
    chip8
        .run_rom(&mut BufReader::new(file), &mut frontend)
        .with_context(|| format!("running {}", rom.display()))
}
