//! Recorder: A backend wrapper that logs every raster call.
//!
//! Useful for asserting exactly what a frame asked the backend to do.
//!
//! ```rust,ignore
//! let mut scene = Scene::new(Recorder::new(SoftwareBackend::new(100, 100)));
//! scene.draw();
//! assert_eq!(scene.backend().clears().count(), 1);
//! ```

use super::{RasterBackend, Surface};
use crate::geometry::PixelRect;

/// A single call made against the shared surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterOp {
    /// `clear_region(region)`.
    Clear(PixelRect),
    /// `blit_region(source, src, dst)`.
    Blit {
        /// Size of the source surface.
        source_size: (u32, u32),
        /// Source rectangle in the cache's local space.
        src: PixelRect,
        /// Destination rectangle on the shared surface.
        dst: PixelRect,
    },
}

/// Wraps a backend, forwarding every call and recording it.
#[derive(Debug, Default)]
pub struct Recorder<B> {
    /// The wrapped backend.
    inner: B,
    /// Calls in the order they were made.
    ops: Vec<RasterOp>,
}

impl<B> Recorder<B> {
    /// Wrap a backend.
    pub const fn new(inner: B) -> Self {
        Self {
            inner,
            ops: Vec::new(),
        }
    }

    /// Recorded calls, oldest first.
    #[inline]
    pub fn ops(&self) -> &[RasterOp] {
        &self.ops
    }

    /// Take the recorded calls, leaving the log empty.
    pub fn take_ops(&mut self) -> Vec<RasterOp> {
        std::mem::take(&mut self.ops)
    }

    /// Recorded clear regions, oldest first.
    pub fn clears(&self) -> impl Iterator<Item = PixelRect> + '_ {
        self.ops.iter().filter_map(|op| match op {
            RasterOp::Clear(region) => Some(*region),
            RasterOp::Blit { .. } => None,
        })
    }

    /// Recorded blits as `(src, dst)`, oldest first.
    pub fn blits(&self) -> impl Iterator<Item = (PixelRect, PixelRect)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            RasterOp::Blit { src, dst, .. } => Some((*src, *dst)),
            RasterOp::Clear(_) => None,
        })
    }

    /// Get a reference to the wrapped backend.
    #[inline]
    pub const fn inner(&self) -> &B {
        &self.inner
    }

    /// Get a mutable reference to the wrapped backend.
    #[inline]
    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.inner
    }

    /// Unwrap the backend, dropping the log.
    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: RasterBackend> RasterBackend for Recorder<B> {
    type Surface = B::Surface;

    fn create_surface(&mut self, width: u32, height: u32) -> Self::Surface {
        self.inner.create_surface(width, height)
    }

    fn clear_region(&mut self, region: PixelRect) {
        self.ops.push(RasterOp::Clear(region));
        self.inner.clear_region(region);
    }

    fn blit_region(&mut self, source: &Self::Surface, src: PixelRect, dst: PixelRect) {
        self.ops.push(RasterOp::Blit {
            source_size: source.size(),
            src,
            dst,
        });
        self.inner.blit_region(source, src, dst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::SoftwareBackend;

    #[test]
    fn test_recorder_logs_in_order() {
        let mut recorder = Recorder::new(SoftwareBackend::new(10, 10));
        let cache = recorder.create_surface(3, 3);

        recorder.clear_region(PixelRect::new(0, 0, 5, 5));
        recorder.blit_region(&cache, PixelRect::new(0, 0, 3, 3), PixelRect::new(1, 1, 3, 3));

        assert_eq!(
            recorder.ops(),
            &[
                RasterOp::Clear(PixelRect::new(0, 0, 5, 5)),
                RasterOp::Blit {
                    source_size: (3, 3),
                    src: PixelRect::new(0, 0, 3, 3),
                    dst: PixelRect::new(1, 1, 3, 3),
                },
            ]
        );
        assert_eq!(recorder.clears().count(), 1);
        assert_eq!(recorder.blits().count(), 1);

        let taken = recorder.take_ops();
        assert_eq!(taken.len(), 2);
        assert!(recorder.ops().is_empty());
    }
}
