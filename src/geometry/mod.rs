//! Geometry module: Bounding-box arithmetic for the incremental redraw.
//!
//! Everything here is pure and total over valid boxes. "No result" is a
//! normal outcome, expressed as `None`:
//! - [`union`] of an empty slice
//! - [`intersect`] of boxes that only touch or do not meet

mod pixel;
mod rect;

pub use pixel::PixelRect;
pub use rect::{Point, Rect};

/// Smallest box containing every input.
///
/// Returns `None` for an empty slice. A single box comes back unchanged.
pub fn union(boxes: &[Rect]) -> Option<Rect> {
    let (first, rest) = boxes.split_first()?;
    Some(rest.iter().fold(*first, |acc, rect| acc.union(rect)))
}

/// Expand `rect` by `amount` on all four sides.
#[inline]
pub fn pad(rect: Rect, amount: f32) -> Rect {
    rect.padded(amount)
}

/// Overlap of two boxes; touching edges count as no overlap.
#[inline]
pub fn intersect(a: &Rect, b: &Rect) -> Option<Rect> {
    a.intersection(b)
}

/// Translate the origin of `rect` into the local space of `reference`.
#[inline]
pub fn to_local(reference: &Rect, rect: &Rect) -> Point {
    Point::new(rect.x - reference.x, rect.y - reference.y)
}
