//! Scene module: Retained objects and dirty-rectangle redraw.
//!
//! # Example
//!
//! ```
//! use scenebox::geometry::Rect;
//! use scenebox::raster::{Rgba, SoftwareBackend};
//! use scenebox::scene::{Scene, Update};
//!
//! let mut scene = Scene::new(SoftwareBackend::new(100, 100));
//! let id = scene
//!     .add(Rect::new(0.0, 0.0, 20.0, 20.0), Rgba::WHITE, |props, cache| {
//!         cache.fill(*props.attrs);
//!     })
//!     .unwrap();
//!
//! assert!(scene.draw().is_some());
//! assert!(scene.draw().is_none());
//!
//! scene.update(id, Update::new().x(40.0)).unwrap();
//! let report = scene.draw().unwrap();
//! assert_eq!(report.repainted, 0);
//! ```

mod config;
mod display_list;
mod object;
#[allow(clippy::module_inception)]
mod scene;

pub use config::{SceneConfig, MIN_CLEAR_PADDING};
pub use display_list::DisplayList;
pub use object::{
    ObjectEvent, ObjectEventKind, ObjectId, ObjectState, PaintFn, PaintProps, Props, SceneObject,
    Update, MAX_OBJECT_SIZE,
};
pub use scene::{AffectedObject, FrameReport, Object, Scene, SceneEvent, SceneEventKind};
