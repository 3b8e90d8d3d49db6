use log::debug;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use vip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8_core::FrameBuffer;

const TITLE: &str = "vip8";
const BYTES_PER_PIXEL: usize = 3;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The Chip-8 tracks them as a 2d array of booleans indexed [y][x].
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Opens a window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let scale = scale.max(1);
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                TITLE,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        canvas.clear();
        canvas.present();
        debug!("opened {}x scaled window", scale);

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 RGB24 texture is a 1D array of bytes holding concatenated rows of RGB pixels,
    /// so every cell becomes three 0 or 255 intensities.
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flatten()
            .flat_map(|&lit| [u8::from(lit) * 255; BYTES_PER_PIXEL])
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it stretched over
    /// the whole window.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            let row = DISPLAY_WIDTH * BYTES_PER_PIXEL;
            for (y, line) in pixels.chunks(row).enumerate() {
                buffer[y * pitch..y * pitch + row].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn hide(&mut self) {
        self.canvas.window_mut().hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_sdl_texture() {
        let mut frame: FrameBuffer = [[false; 64]; 32];
        frame[0][0..2].copy_from_slice(&[false, true]);
        frame[1][0..2].copy_from_slice(&[true, false]);
        let texture = Display::frame_to_sdl_texture(&frame);

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(texture, expected);
    }

    #[test]
    fn test_bottom_right_pixel_is_last() {
        let mut frame: FrameBuffer = [[false; 64]; 32];
        frame[31][63] = true;
        let texture = Display::frame_to_sdl_texture(&frame);
        assert_eq!(texture[6141..], [255, 255, 255]);
        assert_eq!(texture.iter().filter(|&&b| b == 255).count(), 3);
    }
}
