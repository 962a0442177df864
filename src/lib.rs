//! # SceneBox
//!
//! A retained-mode 2D scene graph with dirty-rectangle incremental redraw.
//!
//! Objects own a rectangular box, a private cache surface and a paint
//! callback. Each [`Scene::draw`] clears and recomposites only the region
//! touched by objects that changed since the previous frame.
//!
//! ## Core Concepts
//!
//! - **Dirty rectangles**: Only the padded union of changed boxes is cleared
//! - **Per-object caches**: Moves reuse cached pixels; only size or attribute
//!   changes repaint
//! - **Display order**: Later objects composite on top of earlier ones
//! - **Pluggable raster**: Any [`RasterBackend`] with clear and blit works
//!
//! ## Example
//!
//! ```rust
//! use scenebox::{Rect, Rgba, Scene, SoftwareBackend, Update};
//!
//! let mut scene = Scene::new(SoftwareBackend::new(100, 100));
//! let a = scene
//!     .add(Rect::new(0.0, 0.0, 20.0, 20.0), Rgba::WHITE, |props, cache| {
//!         cache.fill(*props.attrs);
//!     })
//!     .unwrap();
//!
//! scene.draw();
//! scene.update(a, Update::new().position(30.0, 30.0)).unwrap();
//! let report = scene.draw().unwrap();
//! assert_eq!(report.dirty, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bus;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod raster;
pub mod scene;
pub mod terminal;

// Re-exports for convenience
pub use bus::{Event, EventBus, Subscription};
pub use error::{SceneError, SceneResult};
pub use frame::{FrameTimer, Tick, Ticker};
pub use geometry::{PixelRect, Point, Rect};
pub use raster::{PixelBuffer, RasterBackend, RasterOp, Recorder, Rgba, SoftwareBackend, Surface};
pub use scene::{
    AffectedObject, FrameReport, ObjectEvent, ObjectEventKind, ObjectId, ObjectState, PaintProps,
    Scene, SceneConfig, SceneEvent, SceneEventKind, SceneObject, Update,
};
pub use terminal::{Presenter, TerminalConfig};
