//! `PixelBuffer`: A grid of pixels backing software surfaces.
//!
//! Pixels are stored contiguously in row-major order. Every write is
//! clipped to the buffer, so callers can hand in regions that hang off
//! the edges (padded clear regions routinely do).

use super::color::Rgba;
use super::Surface;
use crate::geometry::PixelRect;

/// A software RGBA surface.
///
/// Access is in row-major order: `index = y * width + x`. A zero-sized
/// buffer is valid and simply ignores every write.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Contiguous pixel storage (row-major order).
    pixels: Vec<Rgba>,
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
}

impl PixelBuffer {
    /// Create a new transparent buffer with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            pixels: vec![Rgba::TRANSPARENT; size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the buffer has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Bounds of the whole buffer.
    #[inline]
    pub const fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    /// Get a reference to the underlying pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Get a mutable reference to the underlying pixel slice.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        if x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height) {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get the pixel at (x, y).
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<Rgba> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Get a mutable reference to the pixel at (x, y).
    #[inline]
    pub fn get_mut(&mut self, x: i64, y: i64) -> Option<&mut Rgba> {
        self.index_of(x, y).map(|i| &mut self.pixels[i])
    }

    /// Set the pixel at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, color: Rgba) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.pixels[idx] = color;
            true
        } else {
            false
        }
    }

    /// Fill a rectangular region with a color, replacing what is there.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        let Some(clipped) = rect.clip_to(self.width, self.height) else {
            return;
        };

        let stride = self.width as usize;
        let (x0, w) = (clipped.x as usize, clipped.width as usize);
        for row in (clipped.y as usize)..(clipped.bottom() as usize) {
            let start = row * stride + x0;
            self.pixels[start..start + w].fill(color);
        }
    }

    /// Fill the entire buffer with a color.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Clear the entire buffer to transparent.
    pub fn clear(&mut self) {
        self.fill(Rgba::TRANSPARENT);
    }

    /// Clear a rectangular region to transparent.
    pub fn clear_rect(&mut self, rect: PixelRect) {
        self.fill_rect(rect, Rgba::TRANSPARENT);
    }

    /// Resize the buffer. Existing content is discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width as usize) * (height as usize);
        self.pixels.clear();
        self.pixels.resize(size, Rgba::TRANSPARENT);
        self.width = width;
        self.height = height;
    }

    /// Composite `src` of `source` onto `dst` of this buffer (source-over).
    ///
    /// When the two rectangles differ in size the source is sampled
    /// nearest-neighbour. Pixels outside either buffer are skipped.
    pub fn blit_from(&mut self, source: &Self, src: PixelRect, dst: PixelRect) {
        if src.is_empty() || dst.is_empty() {
            return;
        }
        let Some(clipped) = dst.clip_to(self.width, self.height) else {
            return;
        };

        let (src_w, src_h) = (u64::from(src.width), u64::from(src.height));
        let (dst_w, dst_h) = (u64::from(dst.width), u64::from(dst.height));

        for py in i64::from(clipped.y)..clipped.bottom() {
            let v = (py - i64::from(dst.y)) as u64 * src_h / dst_h;
            let sy = i64::from(src.y) + v as i64;

            for px in i64::from(clipped.x)..clipped.right() {
                let u = (px - i64::from(dst.x)) as u64 * src_w / dst_w;
                let sx = i64::from(src.x) + u as i64;

                let Some(color) = source.get(sx, sy) else {
                    continue;
                };
                if let Some(target) = self.get_mut(px, py) {
                    *target = color.over(*target);
                }
            }
        }
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgba]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    /// Get a mutable iterator over rows.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Rgba]> {
        self.pixels.chunks_mut(self.width.max(1) as usize)
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        Self::resize(self, width, height);
    }

    fn clear(&mut self) {
        Self::clear(self);
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);
    const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    #[test]
    fn test_buffer_new() {
        let buffer = PixelBuffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.len(), 80 * 24);
        assert!(buffer.pixels().iter().all(|p| p.is_transparent()));
    }

    #[test]
    fn test_buffer_zero_size() {
        let mut buffer = PixelBuffer::new(0, 10);
        assert!(buffer.is_empty());
        buffer.fill_rect(PixelRect::new(0, 0, 5, 5), RED);
        assert_eq!(buffer.rows().count(), 0);
    }

    #[test]
    fn test_buffer_get_set() {
        let mut buffer = PixelBuffer::new(10, 10);
        assert!(buffer.set(5, 7, RED));
        assert_eq!(buffer.get(5, 7), Some(RED));
        assert!(!buffer.set(10, 0, RED));
        assert!(!buffer.set(-1, 0, RED));
        assert_eq!(buffer.get(0, 10), None);
    }

    #[test]
    fn test_buffer_fill_rect_clips() {
        let mut buffer = PixelBuffer::new(10, 10);
        buffer.fill_rect(PixelRect::new(-2, -2, 4, 4), RED);

        assert_eq!(buffer.get(0, 0), Some(RED));
        assert_eq!(buffer.get(1, 1), Some(RED));
        assert_eq!(buffer.get(2, 2), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_buffer_clear_rect() {
        let mut buffer = PixelBuffer::new(10, 10);
        buffer.fill(RED);
        buffer.clear_rect(PixelRect::new(2, 2, 3, 3));

        assert_eq!(buffer.get(2, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(buffer.get(4, 4), Some(Rgba::TRANSPARENT));
        assert_eq!(buffer.get(5, 5), Some(RED));
        assert_eq!(buffer.get(1, 2), Some(RED));
    }

    #[test]
    fn test_buffer_resize_discards() {
        let mut buffer = PixelBuffer::new(10, 10);
        buffer.fill(RED);
        buffer.resize(20, 5);

        assert_eq!(buffer.width(), 20);
        assert_eq!(buffer.height(), 5);
        assert_eq!(buffer.len(), 100);
        assert_eq!(buffer.get(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_blit_same_size() {
        let mut source = PixelBuffer::new(4, 4);
        source.fill(BLUE);
        let mut target = PixelBuffer::new(10, 10);

        target.blit_from(&source, PixelRect::new(1, 1, 2, 2), PixelRect::new(5, 5, 2, 2));

        assert_eq!(target.get(5, 5), Some(BLUE));
        assert_eq!(target.get(6, 6), Some(BLUE));
        assert_eq!(target.get(7, 7), Some(Rgba::TRANSPARENT));
        assert_eq!(target.get(4, 5), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_blit_source_over() {
        let mut source = PixelBuffer::new(2, 2);
        source.set(0, 0, RED);
        let mut target = PixelBuffer::new(2, 2);
        target.fill(BLUE);

        target.blit_from(&source, source.bounds(), target.bounds());

        assert_eq!(target.get(0, 0), Some(RED));
        // Transparent source pixels leave the destination alone
        assert_eq!(target.get(1, 1), Some(BLUE));
    }

    #[test]
    fn test_blit_clips_destination() {
        let mut source = PixelBuffer::new(4, 4);
        source.fill(RED);
        let mut target = PixelBuffer::new(4, 4);

        target.blit_from(&source, source.bounds(), PixelRect::new(-2, -2, 4, 4));

        assert_eq!(target.get(0, 0), Some(RED));
        assert_eq!(target.get(1, 1), Some(RED));
        assert_eq!(target.get(2, 2), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_blit_skips_outside_source() {
        let mut source = PixelBuffer::new(2, 2);
        source.fill(RED);
        let mut target = PixelBuffer::new(4, 4);

        target.blit_from(&source, PixelRect::new(0, 0, 4, 4), PixelRect::new(0, 0, 4, 4));

        assert_eq!(target.get(1, 1), Some(RED));
        assert_eq!(target.get(3, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_blit_scaled_nearest() {
        let mut source = PixelBuffer::new(2, 1);
        source.set(0, 0, RED);
        source.set(1, 0, BLUE);
        let mut target = PixelBuffer::new(4, 1);

        target.blit_from(&source, source.bounds(), target.bounds());

        assert_eq!(target.get(0, 0), Some(RED));
        assert_eq!(target.get(1, 0), Some(RED));
        assert_eq!(target.get(2, 0), Some(BLUE));
        assert_eq!(target.get(3, 0), Some(BLUE));
    }

    #[test]
    fn test_rows() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.set(1, 1, RED);
        let rows: Vec<&[Rgba]> = buffer.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], RED);
    }
}
