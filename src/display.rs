// The window that shows the filtered feed, plus the keys the demo listens to.
// Visual: one window sized to the camera, updated once per frame.

use glaucoma_sim::error::Error;
use glaucoma_sim::preset::{ALL, Severity};
use glaucoma_sim::types::Frame;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::hud::Canvas;

pub struct Display {
    window: Window,
    // 0x00RRGGBB per pixel, reused every frame
    canvas: Canvas,
}

impl Display {
    /// Create a window sized to the camera feed.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window, canvas: Canvas::new(width, height) })
    }

    /// Copy the frame into the window buffer; draw on the returned canvas, then `present`.
    pub fn stage(&mut self, frame: &Frame) -> &mut Canvas {
        self.canvas.load(frame);
        &mut self.canvas
    }

    /// Push the staged pixels to the screen.
    pub fn present(&mut self) -> Result<(), Error> {
        self.window
            .update_with_buffer(&self.canvas.pixels, self.canvas.width, self.canvas.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// False once the window is closed or Q / Esc is pressed.
    pub fn keep_running(&self) -> bool {
        self.window.is_open()
            && !self.window.is_key_down(Key::Escape)
            && !self.window.is_key_down(Key::Q)
    }

    /// Keys 1..4 pick MILD..EXTREME.
    pub fn severity_pressed(&self) -> Option<Severity> {
        const KEYS: [Key; 4] = [Key::Key1, Key::Key2, Key::Key3, Key::Key4];
        KEYS.iter()
            .zip(ALL)
            .find(|(key, _)| self.window.is_key_pressed(**key, KeyRepeat::No))
            .map(|(_, level)| level)
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}
