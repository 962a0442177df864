//! Raster module: The surface contract the scene composites through.
//!
//! The scene never touches pixels directly. It talks to a [`RasterBackend`],
//! which owns the shared surface and hands out private cache surfaces:
//! - [`RasterBackend::clear_region`] clears part of the shared surface
//! - [`RasterBackend::blit_region`] copies part of a cache onto it
//!
//! All coordinates are whole pixels; the scene rounds before calling in.
//! [`SoftwareBackend`] is the in-memory implementation built on
//! [`PixelBuffer`], and [`Recorder`] wraps any backend to log its calls.

mod color;
mod pixel_buffer;
mod recorder;
mod software;

pub use color::Rgba;
pub use pixel_buffer::PixelBuffer;
pub use recorder::{RasterOp, Recorder};
pub use software::SoftwareBackend;

use crate::geometry::PixelRect;

/// An offscreen raster target.
pub trait Surface {
    /// Current size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Change the size. Previously stored pixels are discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Reset every pixel to transparent.
    fn clear(&mut self);
}

/// Owner of the shared surface and factory for cache surfaces.
pub trait RasterBackend {
    /// Surface type used for object caches.
    type Surface: Surface;

    /// Allocate a new, cleared cache surface.
    fn create_surface(&mut self, width: u32, height: u32) -> Self::Surface;

    /// Clear `region` of the shared surface.
    fn clear_region(&mut self, region: PixelRect);

    /// Copy `src` of `source` onto `dst` of the shared surface.
    fn blit_region(&mut self, source: &Self::Surface, src: PixelRect, dst: PixelRect);
}
