//! Scene objects: Bounds, a private cache surface, and a paint callback.
//!
//! Two independent flags drive the incremental redraw:
//! - `DIRTY`: the object changed and must be recomposited this frame
//! - `REQUIRES_REDRAW`: the cache is stale and must be repainted
//!
//! A pure move only sets `DIRTY`; the cached pixels are blitted at the
//! new position without calling the paint callback again.

use crate::bus::{Event, EventBus, Subscription};
use crate::error::{SceneError, SceneResult};
use crate::geometry::{Point, Rect};
use crate::raster::Surface;
use bitflags::bitflags;
use tracing::trace;

/// Identifier assigned to an object when it joins a scene.
///
/// Ids come from a per-scene monotonic counter and are never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "object_{}", self.0)
    }
}

bitflags! {
    /// Redraw state of a scene object.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
    pub struct ObjectState: u8 {
        /// Changed since the last composite.
        const DIRTY = 0b0000_0001;
        /// Cache must be repainted before the next composite.
        const REQUIRES_REDRAW = 0b0000_0010;
    }
}

/// Current visual state of an object.
#[derive(Debug, Clone, PartialEq)]
pub struct Props<A> {
    /// Position and size in surface coordinates.
    pub bounds: Rect,
    /// Client-defined visual attributes.
    pub attrs: A,
}

/// What the paint callback sees.
///
/// `bounds` carries the object's size with its origin replaced by the
/// paint offset, so painting happens in the cache's local space.
#[derive(Debug)]
pub struct PaintProps<'a, A> {
    /// Local bounds to paint within.
    pub bounds: Rect,
    /// Client-defined visual attributes.
    pub attrs: &'a A,
}

/// Paint callback: draws the object into its cache surface.
pub type PaintFn<S, A> = Box<dyn FnMut(&PaintProps<'_, A>, &mut S)>;

/// A set of prop changes.
///
/// Only `x` and `y` are positional; touching anything else forces a
/// repaint of the cache, even if the new value equals the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct Update<A> {
    x: Option<f32>,
    y: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    attrs: Option<A>,
}

impl<A> Update<A> {
    /// An update that touches nothing.
    pub const fn new() -> Self {
        Self {
            x: None,
            y: None,
            width: None,
            height: None,
            attrs: None,
        }
    }

    /// Set the x coordinate.
    #[must_use]
    pub fn x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    /// Set the y coordinate.
    #[must_use]
    pub fn y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    /// Set both coordinates.
    #[must_use]
    pub fn position(self, x: f32, y: f32) -> Self {
        self.x(x).y(y)
    }

    /// Set the width.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the height.
    #[must_use]
    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set both dimensions.
    #[must_use]
    pub fn size(self, width: f32, height: f32) -> Self {
        self.width(width).height(height)
    }

    /// Replace the visual attributes.
    #[must_use]
    pub fn attrs(mut self, attrs: A) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// True if the update touches nothing but `x`/`y`.
    pub const fn is_positional(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.attrs.is_none()
    }

    /// Bounds after applying this update to `bounds`.
    pub fn apply_to(&self, bounds: Rect) -> Rect {
        Rect::new(
            self.x.unwrap_or(bounds.x),
            self.y.unwrap_or(bounds.y),
            self.width.unwrap_or(bounds.width),
            self.height.unwrap_or(bounds.height),
        )
    }
}

impl<A> Default for Update<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle notifications emitted by a single object.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectEvent {
    /// Props changed.
    Updated {
        /// Bounds before the update.
        prev_bounds: Rect,
        /// Bounds after the update.
        bounds: Rect,
        /// Whether the cache now needs repainting.
        requires_redraw: bool,
    },
    /// The cache was repainted.
    Painted {
        /// Size of the repainted cache.
        size: (u32, u32),
    },
}

/// Kinds of [`ObjectEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectEventKind {
    /// [`ObjectEvent::Updated`].
    Updated,
    /// [`ObjectEvent::Painted`].
    Painted,
}

impl Event for ObjectEvent {
    type Kind = ObjectEventKind;

    fn kind(&self) -> ObjectEventKind {
        match self {
            Self::Updated { .. } => ObjectEventKind::Updated,
            Self::Painted { .. } => ObjectEventKind::Painted,
        }
    }
}

/// Largest width or height an object may have, in pixels.
///
/// Bounds the cache surface allocated for each object.
pub const MAX_OBJECT_SIZE: f32 = 16_384.0;

/// Pixel size of the cache needed for `bounds`.
pub(crate) fn cache_size(bounds: Rect) -> (u32, u32) {
    (bounds.width.ceil() as u32, bounds.height.ceil() as u32)
}

/// Reject negative, NaN, infinite or oversized geometry.
pub(crate) fn validate(bounds: Rect) -> SceneResult<()> {
    if bounds.is_valid() && bounds.width <= MAX_OBJECT_SIZE && bounds.height <= MAX_OBJECT_SIZE {
        Ok(())
    } else {
        Err(SceneError::InvalidBounds {
            width: bounds.width,
            height: bounds.height,
        })
    }
}

/// A drawable object with a private cache surface.
pub struct SceneObject<S, A> {
    /// Assigned when the object joins a scene.
    id: Option<ObjectId>,
    /// Current props.
    props: Props<A>,
    /// Bounds immediately before the most recent update.
    prev_bounds: Rect,
    /// Bounds at the last composite (`None` until first composited).
    drawn_bounds: Option<Rect>,
    /// Redraw flags.
    state: ObjectState,
    /// Private offscreen surface sized to the bounds.
    cache: S,
    /// Client paint callback.
    paint: PaintFn<S, A>,
    /// Lifecycle notifications.
    events: EventBus<ObjectEvent>,
}

impl<S: Surface, A> SceneObject<S, A> {
    /// Create an object that will be painted and composited on the next draw.
    ///
    /// `cache` is resized to fit `bounds` if needed.
    pub fn new<F>(bounds: Rect, attrs: A, mut cache: S, paint: F) -> SceneResult<Self>
    where
        F: FnMut(&PaintProps<'_, A>, &mut S) + 'static,
    {
        validate(bounds)?;

        let (width, height) = cache_size(bounds);
        if cache.size() != (width, height) {
            cache.resize(width, height);
        }

        Ok(Self {
            id: None,
            props: Props { bounds, attrs },
            prev_bounds: bounds,
            drawn_bounds: None,
            state: ObjectState::DIRTY | ObjectState::REQUIRES_REDRAW,
            cache,
            paint: Box::new(paint),
            events: EventBus::new(),
        })
    }

    /// Id within the owning scene, once added.
    #[inline]
    pub const fn id(&self) -> Option<ObjectId> {
        self.id
    }

    /// Current props.
    #[inline]
    pub const fn props(&self) -> &Props<A> {
        &self.props
    }

    /// Current bounds.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        self.props.bounds
    }

    /// Bounds immediately before the most recent update.
    #[inline]
    pub const fn prev_bounds(&self) -> Rect {
        self.prev_bounds
    }

    /// Client-defined visual attributes.
    #[inline]
    pub const fn attrs(&self) -> &A {
        &self.props.attrs
    }

    /// Redraw flags.
    #[inline]
    pub const fn state(&self) -> ObjectState {
        self.state
    }

    /// True if the object still needs compositing.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.state.contains(ObjectState::DIRTY)
    }

    /// True if the cache must be repainted.
    #[inline]
    pub const fn requires_redraw(&self) -> bool {
        self.state.contains(ObjectState::REQUIRES_REDRAW)
    }

    /// The private cache surface.
    #[inline]
    pub const fn cache(&self) -> &S {
        &self.cache
    }

    /// Merge `update` into the props.
    ///
    /// Fails with [`SceneError::InvalidBounds`] and leaves the object
    /// untouched if the resulting bounds are invalid.
    pub fn update(&mut self, update: Update<A>) -> SceneResult<()> {
        let bounds = update.apply_to(self.props.bounds);
        validate(bounds)?;

        let requires_redraw = !update.is_positional();

        self.prev_bounds = self.props.bounds;
        self.props.bounds = bounds;
        if let Some(attrs) = update.attrs {
            self.props.attrs = attrs;
        }

        self.state.insert(ObjectState::DIRTY);
        if requires_redraw {
            self.state.insert(ObjectState::REQUIRES_REDRAW);

            let (width, height) = cache_size(bounds);
            if self.cache.size() != (width, height) {
                self.cache.resize(width, height);
            }
        }

        self.events.emit(&ObjectEvent::Updated {
            prev_bounds: self.prev_bounds,
            bounds,
            requires_redraw,
        });
        Ok(())
    }

    /// Force a repaint and recomposite on the next draw.
    ///
    /// For paint callbacks that read state outside the props.
    pub fn invalidate(&mut self) {
        self.state
            .insert(ObjectState::DIRTY | ObjectState::REQUIRES_REDRAW);
    }

    /// Repaint the cache if it is stale.
    ///
    /// Returns `false` (and does nothing) when the cache is still valid.
    /// `DIRTY` is left for the scene to clear once the object is composited.
    pub fn paint(&mut self, origin: Point) -> bool {
        if !self.requires_redraw() {
            return false;
        }

        self.cache.clear();
        let props = PaintProps {
            bounds: self.props.bounds.with_origin(origin.x, origin.y),
            attrs: &self.props.attrs,
        };
        (self.paint)(&props, &mut self.cache);
        self.state.remove(ObjectState::REQUIRES_REDRAW);

        let size = self.cache.size();
        trace!(id = ?self.id, ?size, "repainted cache");
        self.events.emit(&ObjectEvent::Painted { size });
        true
    }

    /// Subscribe to this object's lifecycle events.
    pub fn on<F>(&mut self, kind: ObjectEventKind, handler: F) -> Subscription
    where
        F: FnMut(&ObjectEvent) + 'static,
    {
        self.events.on(kind, handler)
    }

    /// Unsubscribe a handler.
    pub fn off(&mut self, subscription: Subscription) -> bool {
        self.events.off(subscription)
    }

    /// Bounds at the last composite.
    pub(crate) const fn drawn_bounds(&self) -> Option<Rect> {
        self.drawn_bounds
    }

    /// Join a scene under `id`, to be painted and composited on its next draw.
    ///
    /// Whatever was drawn on another surface no longer counts as damage.
    pub(crate) fn attach(&mut self, id: ObjectId) {
        self.id = Some(id);
        self.prev_bounds = self.props.bounds;
        self.drawn_bounds = None;
        self.state.insert(ObjectState::DIRTY);
    }

    /// Clear `DIRTY` after a successful composite.
    pub(crate) fn mark_composited(&mut self) {
        self.state.remove(ObjectState::DIRTY);
        self.drawn_bounds = Some(self.props.bounds);
    }
}

impl<S, A: std::fmt::Debug> std::fmt::Debug for SceneObject<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneObject")
            .field("id", &self.id)
            .field("props", &self.props)
            .field("prev_bounds", &self.prev_bounds)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{PixelBuffer, Rgba};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn solid(bounds: Rect, color: Rgba) -> SceneObject<PixelBuffer, Rgba> {
        SceneObject::new(bounds, color, PixelBuffer::new(0, 0), |props, cache| {
            cache.fill(*props.attrs);
        })
        .unwrap()
    }

    #[test]
    fn test_new_object_is_dirty_and_stale() {
        let object = solid(Rect::new(0.0, 0.0, 20.0, 10.0), Rgba::WHITE);
        assert!(object.is_dirty());
        assert!(object.requires_redraw());
        assert_eq!(object.cache().size(), (20, 10));
        assert_eq!(object.prev_bounds(), object.bounds());
        assert_eq!(object.id(), None);
    }

    #[test]
    fn test_new_rejects_negative_size() {
        let result = SceneObject::new(
            Rect::new(0.0, 0.0, -1.0, 10.0),
            (),
            PixelBuffer::new(0, 0),
            |_, _| {},
        );
        assert!(matches!(result, Err(SceneError::InvalidBounds { .. })));
    }

    #[test]
    fn test_oversized_bounds_rejected() {
        let result = SceneObject::new(
            Rect::new(0.0, 0.0, MAX_OBJECT_SIZE + 1.0, 1.0),
            (),
            PixelBuffer::new(0, 0),
            |_, _| {},
        );
        assert!(matches!(result, Err(SceneError::InvalidBounds { .. })));

        let mut object = solid(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba::WHITE);
        let result = object.update(Update::new().height(1.0e9));
        assert_eq!(
            result,
            Err(SceneError::InvalidBounds { width: 2.0, height: 1.0e9 })
        );
        assert_eq!(object.cache().size(), (2, 2));

        assert!(object.update(Update::new().size(MAX_OBJECT_SIZE, 1.0)).is_ok());
    }

    #[test]
    fn test_attach_resets_composite_state() {
        let mut object = solid(Rect::new(1.0, 1.0, 2.0, 2.0), Rgba::WHITE);
        object.paint(Point::ZERO);
        object.mark_composited();
        object.update(Update::new().x(4.0)).unwrap();
        object.mark_composited();

        object.attach(ObjectId(9));

        assert_eq!(object.id(), Some(ObjectId(9)));
        assert!(object.is_dirty());
        assert!(!object.requires_redraw());
        assert_eq!(object.drawn_bounds(), None);
        assert_eq!(object.prev_bounds(), Rect::new(4.0, 1.0, 2.0, 2.0));
    }

    #[test]
    fn test_fractional_size_rounds_cache_up() {
        let object = solid(Rect::new(0.0, 0.0, 10.2, 3.5), Rgba::WHITE);
        assert_eq!(object.cache().size(), (11, 4));
    }

    #[test]
    fn test_paint_clears_redraw_but_not_dirty() {
        let mut object = solid(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba::WHITE);
        assert!(object.paint(Point::ZERO));
        assert!(!object.requires_redraw());
        assert!(object.is_dirty());
        assert_eq!(object.cache().get(3, 3), Some(Rgba::WHITE));

        // Second paint is a no-op
        assert!(!object.paint(Point::ZERO));
    }

    #[test]
    fn test_position_update_skips_redraw() {
        let mut object = solid(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba::WHITE);
        object.paint(Point::ZERO);
        object.mark_composited();

        object.update(Update::new().x(5.0)).unwrap();

        assert!(object.is_dirty());
        assert!(!object.requires_redraw());
        assert_eq!(object.bounds(), Rect::new(5.0, 0.0, 4.0, 4.0));
        assert_eq!(object.prev_bounds(), Rect::new(0.0, 0.0, 4.0, 4.0));
    }

    #[test]
    fn test_size_update_triggers_redraw_and_resize() {
        let mut object = solid(Rect::new(0.0, 0.0, 20.0, 20.0), Rgba::WHITE);
        object.paint(Point::ZERO);

        object.update(Update::new().width(50.0)).unwrap();

        assert!(object.requires_redraw());
        assert_eq!(object.cache().size(), (50, 20));
    }

    #[test]
    fn test_attr_update_triggers_redraw_without_resize() {
        let mut object = solid(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba::WHITE);
        object.paint(Point::ZERO);

        object.update(Update::new().attrs(Rgba::BLACK)).unwrap();
        assert!(object.requires_redraw());
        assert_eq!(object.cache().size(), (2, 2));

        object.paint(Point::ZERO);
        assert_eq!(object.cache().get(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_same_value_size_update_still_redraws() {
        let mut object = solid(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba::WHITE);
        object.paint(Point::ZERO);

        object.update(Update::new().width(2.0)).unwrap();
        assert!(object.requires_redraw());
    }

    #[test]
    fn test_invalid_update_leaves_object_untouched() {
        let mut object = solid(Rect::new(1.0, 1.0, 2.0, 2.0), Rgba::WHITE);
        object.paint(Point::ZERO);
        object.mark_composited();

        let result = object.update(Update::new().x(9.0).height(-3.0));

        assert_eq!(
            result,
            Err(SceneError::InvalidBounds { width: 2.0, height: -3.0 })
        );
        assert_eq!(object.bounds(), Rect::new(1.0, 1.0, 2.0, 2.0));
        assert!(!object.is_dirty());
        assert!(!object.requires_redraw());
    }

    #[test]
    fn test_paint_receives_local_origin() {
        let seen = Rc::new(RefCell::new(None));
        let log = Rc::clone(&seen);
        let mut object = SceneObject::new(
            Rect::new(30.0, 40.0, 5.0, 6.0),
            7_u32,
            PixelBuffer::new(0, 0),
            move |props, _cache| {
                *log.borrow_mut() = Some((props.bounds, *props.attrs));
            },
        )
        .unwrap();

        object.paint(Point::ZERO);

        assert_eq!(*seen.borrow(), Some((Rect::new(0.0, 0.0, 5.0, 6.0), 7)));
    }

    #[test]
    fn test_object_events() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut object = solid(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba::WHITE);

        let log = Rc::clone(&seen);
        object.on(ObjectEventKind::Updated, move |e| log.borrow_mut().push(e.clone()));
        let log = Rc::clone(&seen);
        object.on(ObjectEventKind::Painted, move |e| log.borrow_mut().push(e.clone()));

        object.update(Update::new().y(3.0)).unwrap();
        object.paint(Point::ZERO);

        assert_eq!(
            *seen.borrow(),
            vec![
                ObjectEvent::Updated {
                    prev_bounds: Rect::new(0.0, 0.0, 2.0, 2.0),
                    bounds: Rect::new(0.0, 3.0, 2.0, 2.0),
                    requires_redraw: false,
                },
                ObjectEvent::Painted { size: (2, 2) },
            ]
        );
    }

    #[test]
    fn test_object_id_display() {
        assert_eq!(ObjectId(3).to_string(), "object_3");
    }
}
