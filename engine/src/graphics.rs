use crate::surface::{Surface, SurfaceSize};
use crate::ui::Rect;

pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];

/// 2D drawing interface used by game code.
///
/// Game code draws through this trait only; it never touches the pixel buffer layout.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill. Pixels outside the surface are clipped.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blended fill over existing content (alpha is applied to `color`'s RGB).
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    /// One pixel wide border just inside `rect`.
    fn rect_outline(&mut self, rect: Rect, color: Color) {
        let size = self.size();
        let x1 = rect.right().min(size.width);
        let y1 = rect.bottom().min(size.height);
        if rect.w == 0 || rect.h == 0 || rect.x >= x1 || rect.y >= y1 {
            return;
        }

        let w = x1 - rect.x;
        let h = y1 - rect.y;

        self.fill_rect(Rect::new(rect.x, rect.y, w, 1), color);
        if h > 1 {
            self.fill_rect(Rect::new(rect.x, y1 - 1, w, 1), color);
        }
        self.fill_rect(Rect::new(rect.x, rect.y, 1, h), color);
        if w > 1 {
            self.fill_rect(Rect::new(x1 - 1, rect.y, 1, h), color);
        }
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// Runs `f` against a CPU renderer over the surface's current frame buffer.
///
/// Presenting is left to the caller.
pub fn draw_to_surface<S, F, R>(surface: &mut S, f: F) -> R
where
    S: Surface + ?Sized,
    F: FnOnce(&mut dyn Renderer2d) -> R,
{
    let size = surface.size();
    let mut cpu = CpuRenderer::new(surface.frame_mut(), size);
    cpu.begin_frame(size);
    f(&mut cpu)
}

/// CPU renderer that draws into a borrowed RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    /// Calls `f` with each clipped row of `rect` as RGBA pixel chunks.
    ///
    /// Does nothing if the buffer is smaller than the declared surface size.
    fn for_each_row<F>(&mut self, rect: Rect, mut f: F)
    where
        F: FnMut(&mut [u8]),
    {
        let max_x = rect.right().min(self.size.width);
        let max_y = rect.bottom().min(self.size.height);
        if rect.x >= max_x || rect.y >= max_y {
            return;
        }
        if self.frame.len() < self.size.rgba_len() || self.size.is_empty() {
            return;
        }

        let stride = self.size.width as usize * 4;
        let row_bytes = (max_x - rect.x) as usize * 4;
        let mut row_start = rect.y as usize * stride + rect.x as usize * 4;
        for _ in rect.y..max_y {
            f(&mut self.frame[row_start..row_start + row_bytes]);
            row_start += stride;
        }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.for_each_row(rect, |row| {
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        });
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        if alpha == 255 {
            self.fill_rect(rect, color);
            return;
        }

        let a = alpha as u32;
        let inv = 255u32 - a;
        self.for_each_row(rect, |row| {
            for px in row.chunks_exact_mut(4) {
                for c in 0..3 {
                    px[c] = ((px[c] as u32 * inv + color[c] as u32 * a + 127) / 255) as u8;
                }
                px[3] = 255;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
    }

    #[test]
    fn fill_rect_clips_to_surface() {
        let size = SurfaceSize::new(4, 4);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.fill_rect(Rect::new(2, 2, 10, 10), [9, 8, 7, 255]);

        assert_eq!(pixel(&frame, 4, 3, 3), [9, 8, 7, 255]);
        assert_eq!(pixel(&frame, 4, 2, 2), [9, 8, 7, 255]);
        assert_eq!(pixel(&frame, 4, 1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn rect_outline_leaves_interior_untouched() {
        let size = SurfaceSize::new(5, 5);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.rect_outline(Rect::new(0, 0, 5, 5), [255, 255, 255, 255]);

        assert_eq!(pixel(&frame, 5, 0, 0), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 5, 4, 4), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 5, 4, 2), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 5, 2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn blend_rect_mixes_with_existing_pixels() {
        let size = SurfaceSize::new(1, 1);
        let mut frame = vec![0, 0, 0, 255];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.blend_rect(Rect::from_size(1, 1), [255, 0, 200, 255], 128);

        assert_eq!(pixel(&frame, 1, 0, 0), [128, 0, 100, 255]);
    }

    #[test]
    fn undersized_buffer_is_ignored() {
        let mut frame = vec![0u8; 8];
        let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(4, 4));
        gfx.clear([1, 1, 1, 1]);
        assert!(frame.iter().all(|&b| b == 0));
    }
}
