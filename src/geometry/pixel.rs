//! `PixelRect`: Integer rectangles handed to the raster backend.

use super::rect::Rect;

/// A rectangle in whole surface pixels.
///
/// The origin may be negative (a padded region can hang off the surface);
/// backends clip to their own bounds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    /// X coordinate of the top-left pixel.
    pub x: i32,
    /// Y coordinate of the top-left pixel.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Create a new pixel rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Smallest pixel rectangle covering `rect`: floor the origin, ceil the extent.
    ///
    /// Fractional edges always round away from the box, so the result never
    /// leaves a partially covered pixel outside.
    ///
    /// Edges beyond the `i32` range saturate at its bounds, so far
    /// off-surface boxes stay off-surface.
    pub fn round_out(rect: Rect) -> Self {
        let left = saturate(rect.x.floor());
        let top = saturate(rect.y.floor());
        let right = saturate(rect.right().ceil());
        let bottom = saturate(rect.bottom().ceil());

        Self {
            x: left as i32,
            y: top as i32,
            width: (right - left).max(0) as u32,
            height: (bottom - top).max(0) as u32,
        }
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clip to a `width × height` surface anchored at the origin.
    ///
    /// Returns `None` if nothing is left.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Self> {
        let left = i64::from(self.x).max(0);
        let top = i64::from(self.y).max(0);
        let right = self.right().min(i64::from(width));
        let bottom = self.bottom().min(i64::from(height));

        if right <= left || bottom <= top {
            return None;
        }

        Some(Self::new(
            left as i32,
            top as i32,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}

/// Clamp a whole-pixel edge into the `i32` range.
fn saturate(edge: f32) -> i64 {
    (edge as i64).clamp(i64::from(i32::MIN), i64::from(i32::MAX))
}

impl std::fmt::Debug for PixelRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PixelRect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_out_integral() {
        let r = PixelRect::round_out(Rect::new(-1.0, -1.0, 31.0, 31.0));
        assert_eq!(r, PixelRect::new(-1, -1, 31, 31));
    }

    #[test]
    fn test_round_out_fractional() {
        // 0.5..10.7 covers pixels 0..=10
        let r = PixelRect::round_out(Rect::new(0.5, 1.25, 10.2, 3.5));
        assert_eq!(r, PixelRect::new(0, 1, 11, 4));
    }

    #[test]
    fn test_round_out_negative_fraction() {
        let r = PixelRect::round_out(Rect::new(-1.5, -0.5, 1.0, 1.0));
        assert_eq!(r, PixelRect::new(-2, -1, 2, 2));
    }

    #[test]
    fn test_round_out_saturates_far_edges() {
        // 2^32 would wrap to 0 if narrowed without clamping
        let r = PixelRect::round_out(Rect::new(4_294_967_296.0, 0.0, 1024.0, 10.0));
        assert_eq!(r, PixelRect::new(i32::MAX, 0, 0, 10));
        assert_eq!(r.clip_to(100, 100), None);

        let r = PixelRect::round_out(Rect::new(-1.0e12, -4.0, 2.0e12, 8.0));
        assert_eq!(r.x, i32::MIN);
        assert_eq!(r.width, u32::MAX);
        assert_eq!(r.clip_to(100, 100), Some(PixelRect::new(0, 0, 100, 4)));
    }

    #[test]
    fn test_clip_to() {
        let r = PixelRect::new(-5, -5, 20, 20);
        assert_eq!(r.clip_to(10, 10), Some(PixelRect::new(0, 0, 10, 10)));
        assert_eq!(PixelRect::new(20, 20, 5, 5).clip_to(10, 10), None);
        assert_eq!(PixelRect::new(2, 3, 4, 5).clip_to(100, 100), Some(PixelRect::new(2, 3, 4, 5)));
    }

    #[test]
    fn test_area_and_empty() {
        assert_eq!(PixelRect::new(0, 0, 4, 5).area(), 20);
        assert!(PixelRect::new(3, 3, 0, 5).is_empty());
        assert!(!PixelRect::new(3, 3, 1, 1).is_empty());
    }
}
