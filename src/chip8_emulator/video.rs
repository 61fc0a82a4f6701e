use crate::chip8_emulator::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Monochrome 64x32 frame, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoBuffer {
    pixels: [bool; SCREEN_WIDTH * SCREEN_HEIGHT],
}

impl Default for VideoBuffer {
    fn default() -> Self {
        Self {
            pixels: [false; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }
}

impl VideoBuffer {
    pub fn reset(&mut self) {
        self.pixels = [false; SCREEN_WIDTH * SCREEN_HEIGHT];
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[Self::location(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[Self::location(x, y)] = on;
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|pixel| **pixel).count()
    }

    /// Yields `(x, y)` for every lit pixel.
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(index, _)| (index % SCREEN_WIDTH, index / SCREEN_WIDTH))
    }

    fn location(x: usize, y: usize) -> usize {
        (x % SCREEN_WIDTH) + (y % SCREEN_HEIGHT) * SCREEN_WIDTH
    }
}
