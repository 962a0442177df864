//! `SoftwareBackend`: In-memory raster backend.

use super::pixel_buffer::PixelBuffer;
use super::RasterBackend;
use crate::geometry::PixelRect;

/// Raster backend that composites into a [`PixelBuffer`].
#[derive(Debug, Clone)]
pub struct SoftwareBackend {
    /// The shared surface.
    surface: PixelBuffer,
}

impl SoftwareBackend {
    /// Create a backend with a transparent shared surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: PixelBuffer::new(width, height),
        }
    }

    /// Get a reference to the shared surface.
    #[inline]
    pub const fn surface(&self) -> &PixelBuffer {
        &self.surface
    }

    /// Get a mutable reference to the shared surface.
    #[inline]
    pub fn surface_mut(&mut self) -> &mut PixelBuffer {
        &mut self.surface
    }

    /// Consume the backend and return the shared surface.
    pub fn into_surface(self) -> PixelBuffer {
        self.surface
    }
}

impl RasterBackend for SoftwareBackend {
    type Surface = PixelBuffer;

    fn create_surface(&mut self, width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::new(width, height)
    }

    fn clear_region(&mut self, region: PixelRect) {
        self.surface.clear_rect(region);
    }

    fn blit_region(&mut self, source: &PixelBuffer, src: PixelRect, dst: PixelRect) {
        self.surface.blit_from(source, src, dst);
    }
}
