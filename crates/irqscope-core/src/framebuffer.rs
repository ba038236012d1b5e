//! RAM framebuffer with per-pixel change detection.
//!
//! Screens draw into this buffer instead of the SPI panel. Afterwards only the
//! bounding box of pixels that differ from what the panel last received is
//! pushed to the hardware in one `fill_contiguous` call. A screen may clear a
//! region and paint the same content again; pixels that end up unchanged are
//! not resent.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

const WIDTH: usize = DISPLAY_WIDTH_PX as usize;
const HEIGHT: usize = DISPLAY_HEIGHT_PX as usize;

/// Inclusive bounding box of pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

/// Full-screen `DrawTarget<Color = Rgb565>` backed by a heap buffer
///
/// Two 320x240x2 = 153,600 byte planes (drawn and last flushed); on the
/// ESP32-S3 the global allocator places them in PSRAM.
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
    /// Contents the panel holds after the last flush
    flushed: Vec<Rgb565>,
    /// Bounding box of writes since the last flush; bounds the compare scan
    touched: Option<DirtyRect>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Allocate a black framebuffer with nothing pending
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; WIDTH * HEIGHT],
            flushed: vec![Rgb565::BLACK; WIDTH * HEIGHT],
            touched: None,
        }
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * WIDTH + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.touched {
                Some(rect) => rect.expand(x, y),
                None => self.touched = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Tight bounding box of pixels differing from the flushed contents
    fn changed_region(&self) -> Option<DirtyRect> {
        let touched = self.touched?;
        let mut changed: Option<DirtyRect> = None;
        for y in touched.min_y..=touched.max_y {
            let row = y * WIDTH;
            for x in touched.min_x..=touched.max_x {
                if self.pixels[row + x] != self.flushed[row + x] {
                    match &mut changed {
                        Some(rect) => rect.expand(x, y),
                        None => changed = Some(DirtyRect::from_point(x, y)),
                    }
                }
            }
        }
        changed
    }

    /// Record the touched area as flushed and return what actually changed
    fn sync(&mut self) -> Option<DirtyRect> {
        let changed = self.changed_region();
        if let Some(touched) = self.touched.take() {
            for y in touched.min_y..=touched.max_y {
                let row = y * WIDTH;
                let span = row + touched.min_x..=row + touched.max_x;
                self.flushed[span.clone()].copy_from_slice(&self.pixels[span]);
            }
        }
        changed
    }

    /// Color at `(x, y)`, or `None` off screen
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
            return None;
        }
        Some(self.pixels[y as usize * WIDTH + x as usize])
    }

    /// Row-major pixel data
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Whether any pixel differs from the last flushed frame
    pub fn is_dirty(&self) -> bool {
        self.changed_region().is_some()
    }

    /// Take the changed region without flushing it
    pub fn take_dirty(&mut self) -> Option<Rectangle> {
        self.sync().map(DirtyRect::to_rectangle)
    }

    /// Push the changed region to `display` and reset the dirty state
    ///
    /// No-op when nothing changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.sync() else {
            return Ok(());
        };

        let area = rect.to_rectangle();
        let width = area.size.width as usize;
        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            area.size.width, area.size.height, rect.min_x, rect.min_y
        );

        let pixels = &self.pixels;
        let pixel_iter = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let row_start = y * WIDTH + rect.min_x;
            pixels[row_start..row_start + width].iter().copied()
        });

        display.fill_contiguous(&area, pixel_iter)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0 && coord.y >= 0 && (coord.x as usize) < WIDTH && (coord.y as usize) < HEIGHT
            {
                self.set_pixel(coord.x as usize, coord.y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        let Some(bottom_right) = clipped.bottom_right() else {
            return Ok(());
        };

        for y in clipped.top_left.y..=bottom_right.y {
            for x in clipped.top_left.x..=bottom_right.x {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_new_buffer_is_clean() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.is_dirty());
        assert_eq!(fb.take_dirty(), None);
        assert_eq!(fb.pixel(0, 0), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_dirty_region_tracks_changes() {
        let mut fb = FrameBuffer::new();
        Pixel(Point::new(10, 20), Rgb565::RED).draw(&mut fb).unwrap();
        Pixel(Point::new(15, 22), Rgb565::RED).draw(&mut fb).unwrap();

        assert_eq!(
            fb.take_dirty(),
            Some(Rectangle::new(Point::new(10, 20), Size::new(6, 3)))
        );
        assert!(!fb.is_dirty());
    }

    #[test]
    fn test_repaint_to_flushed_color_is_clean() {
        let mut fb = FrameBuffer::new();
        Pixel(Point::new(40, 40), Rgb565::RED).draw(&mut fb).unwrap();
        fb.take_dirty();

        // Clear then restore the same content, as a full chart redraw does
        fb.clear(Rgb565::BLUE).unwrap();
        assert!(fb.is_dirty());
        fb.clear(Rgb565::BLACK).unwrap();
        Pixel(Point::new(40, 40), Rgb565::RED).draw(&mut fb).unwrap();

        assert!(!fb.is_dirty());
        assert_eq!(fb.take_dirty(), None);
    }

    #[test]
    fn test_dirty_region_is_tight_after_overdraw() {
        let mut fb = FrameBuffer::new();
        Rectangle::new(Point::new(0, 0), Size::new(50, 50))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::GREEN))
            .draw(&mut fb)
            .unwrap();
        Rectangle::new(Point::new(0, 0), Size::new(50, 50))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
            .draw(&mut fb)
            .unwrap();
        Pixel(Point::new(20, 30), Rgb565::RED).draw(&mut fb).unwrap();

        assert_eq!(
            fb.take_dirty(),
            Some(Rectangle::new(Point::new(20, 30), Size::new(1, 1)))
        );
    }

    #[test]
    fn test_same_color_does_not_dirty() {
        let mut fb = FrameBuffer::new();
        Pixel(Point::new(3, 3), Rgb565::BLACK).draw(&mut fb).unwrap();
        assert!(!fb.is_dirty());
    }

    #[test]
    fn test_fill_solid_is_clipped() {
        let mut fb = FrameBuffer::new();
        Rectangle::new(Point::new(-5, 230), Size::new(10, 20))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::GREEN))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(fb.pixel(0, 239), Some(Rgb565::GREEN));
        assert_eq!(fb.pixel(4, 230), Some(Rgb565::GREEN));
        assert_eq!(fb.pixel(5, 230), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(0, 240), None);
    }

    #[test]
    fn test_flush_clears_dirty_state() {
        let mut fb = FrameBuffer::new();
        let mut target = FrameBuffer::new();
        Pixel(Point::new(7, 8), Rgb565::BLUE).draw(&mut fb).unwrap();

        fb.flush(&mut target).unwrap();

        assert!(!fb.is_dirty());
        assert_eq!(target.pixel(7, 8), Some(Rgb565::BLUE));
    }
}
