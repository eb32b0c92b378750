use pixels::Pixels;

use crate::surface::{Surface, SurfaceSize};

/// Windowed surface built on `pixels`.
///
/// The RGBA buffer keeps the game's logical size; `pixels` scales it onto the window surface,
/// so a window resize never changes what game code draws into.
pub struct PixelsRenderer2d {
    pixels: Pixels,
    size: SurfaceSize,
}

impl PixelsRenderer2d {
    pub fn new(mut pixels: Pixels, size: SurfaceSize) -> Result<Self, pixels::Error> {
        pixels.resize_buffer(size.width, size.height)?;
        Ok(Self { pixels, size })
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    /// Tracks a new window inner size. Zero-sized (minimized) windows are ignored.
    pub fn resize_window(&mut self, window: SurfaceSize) -> Result<(), pixels::Error> {
        if window.is_empty() {
            return Ok(());
        }
        self.pixels.resize_surface(window.width, window.height)?;
        Ok(())
    }
}

impl Surface for PixelsRenderer2d {
    type Error = pixels::Error;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn frame_mut(&mut self) -> &mut [u8] {
        self.pixels.frame_mut()
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), Self::Error> {
        self.pixels.resize_buffer(size.width, size.height)?;
        self.size = size;
        Ok(())
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.pixels.render()
    }
}
