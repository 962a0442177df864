//! Scene: Display list, hit-testing and the incremental draw.
//!
//! A frame never touches more of the shared surface than the objects that
//! changed require:
//! 1. Collect dirty objects (nothing dirty, nothing to do)
//! 2. Clear region = padded union of their old and new boxes
//! 3. Every object overlapping the region is affected
//! 4. Clear the region, repaint stale caches
//! 5. Blit each affected object's slice of the region, back to front

use super::config::SceneConfig;
use super::display_list::DisplayList;
use super::object::{cache_size, validate, ObjectId, PaintProps, SceneObject, Update};
use crate::bus::{Event, EventBus, Subscription};
use crate::error::{SceneError, SceneResult};
use crate::frame::FrameTimer;
use crate::geometry::{self, PixelRect, Point, Rect};
use crate::raster::RasterBackend;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// An object overlapping a queried region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffectedObject {
    /// The overlapping object.
    pub id: ObjectId,
    /// Overlap in surface coordinates.
    pub intersection: Rect,
    /// Origin of the overlap in the object's local space.
    pub local: Point,
}

/// What a single non-empty draw did.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame number, counting only frames that did work.
    pub frame: u64,
    /// Region cleared on the shared surface.
    pub cleared: PixelRect,
    /// Objects that were dirty.
    pub dirty: usize,
    /// Objects recomposited.
    pub affected: usize,
    /// Caches actually repainted.
    pub repainted: usize,
    /// Time spent in this draw.
    pub elapsed: Duration,
    /// Rolling average draw time.
    pub average: Duration,
    /// Rolling average as a percentage of the frame budget.
    pub budget_cost: f64,
}

/// Lifecycle notifications emitted by a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// An object joined the display list.
    ObjectAdded(ObjectId),
    /// An object's props changed.
    ObjectUpdated {
        /// The updated object.
        id: ObjectId,
        /// Whether this update invalidated its cache.
        requires_redraw: bool,
    },
    /// An object left the display list.
    ObjectRemoved(ObjectId),
    /// A draw did work.
    FrameDrawn(FrameReport),
}

/// Kinds of [`SceneEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneEventKind {
    /// [`SceneEvent::ObjectAdded`].
    ObjectAdded,
    /// [`SceneEvent::ObjectUpdated`].
    ObjectUpdated,
    /// [`SceneEvent::ObjectRemoved`].
    ObjectRemoved,
    /// [`SceneEvent::FrameDrawn`].
    FrameDrawn,
}

impl Event for SceneEvent {
    type Kind = SceneEventKind;

    fn kind(&self) -> SceneEventKind {
        match self {
            Self::ObjectAdded(_) => SceneEventKind::ObjectAdded,
            Self::ObjectUpdated { .. } => SceneEventKind::ObjectUpdated,
            Self::ObjectRemoved(_) => SceneEventKind::ObjectRemoved,
            Self::FrameDrawn(_) => SceneEventKind::FrameDrawn,
        }
    }
}

/// Object type stored by a scene over backend `B`.
pub type Object<B, A> = SceneObject<<B as RasterBackend>::Surface, A>;

/// A retained-mode scene drawn incrementally onto a backend's surface.
///
/// `A` is the client-defined attribute type handed to paint callbacks.
pub struct Scene<B: RasterBackend, A = ()> {
    /// Owner of the shared surface.
    backend: B,
    /// Objects back to front.
    display_list: DisplayList<Object<B, A>>,
    /// Next id to assign.
    next_id: u64,
    /// Configuration.
    config: SceneConfig,
    /// Surface areas vacated by removed objects.
    pending_damage: Vec<Rect>,
    /// Draw timing.
    timer: FrameTimer,
    /// Frames that did work.
    frame_count: u64,
    /// Lifecycle notifications.
    events: EventBus<SceneEvent>,
}

impl<B: RasterBackend, A> Scene<B, A> {
    /// Create a scene with default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, SceneConfig::default())
    }

    /// Create a scene with custom configuration.
    pub fn with_config(backend: B, config: SceneConfig) -> Self {
        let timer = FrameTimer::new(config.timing_samples, config.frame_budget);
        Self {
            backend,
            display_list: DisplayList::new(),
            next_id: 0,
            config,
            pending_damage: Vec::new(),
            timer,
            frame_count: 0,
            events: EventBus::new(),
        }
    }

    /// The backend.
    #[inline]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend.
    ///
    /// Drawing onto the shared surface directly bypasses damage tracking.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consume the scene, returning its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// The configuration.
    #[inline]
    pub const fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Draw timing.
    #[inline]
    pub const fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Number of frames that did work.
    #[inline]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Number of objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.display_list.len()
    }

    /// Check if the scene has no objects.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.display_list.is_empty()
    }

    /// Objects back to front.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object<B, A>)> {
        self.display_list.iter()
    }

    /// Create an object with a backend-allocated cache and add it on top.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidBounds`] for negative, non-finite or
    /// oversized bounds.
    pub fn add<F>(&mut self, bounds: Rect, attrs: A, paint: F) -> SceneResult<ObjectId>
    where
        F: FnMut(&PaintProps<'_, A>, &mut B::Surface) + 'static,
    {
        validate(bounds)?;
        let (width, height) = cache_size(bounds);
        let cache = self.backend.create_surface(width, height);
        let object = SceneObject::new(bounds, attrs, cache, paint)?;
        Ok(self.insert(object))
    }

    /// Add a pre-built object on top of the display list.
    ///
    /// Any id the object carried from another scene is replaced, and the
    /// object is composited on the next draw.
    pub fn insert(&mut self, mut object: Object<B, A>) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        object.attach(id);
        let bounds = object.bounds();
        self.display_list.push(id, object);

        debug!(%id, ?bounds, "object added");
        self.events.emit(&SceneEvent::ObjectAdded(id));
        id
    }

    /// Look up an object.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownObject`] if `id` is not in the scene.
    pub fn get(&self, id: ObjectId) -> SceneResult<&Object<B, A>> {
        self.display_list
            .get(id)
            .ok_or(SceneError::UnknownObject(id))
    }

    /// Look up an object mutably.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownObject`] if `id` is not in the scene.
    pub fn get_mut(&mut self, id: ObjectId) -> SceneResult<&mut Object<B, A>> {
        self.display_list
            .get_mut(id)
            .ok_or(SceneError::UnknownObject(id))
    }

    /// Look up several objects; an empty slice returns all, back to front.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownObject`] for the first missing id.
    pub fn get_all(&self, ids: &[ObjectId]) -> SceneResult<Vec<&Object<B, A>>> {
        if ids.is_empty() {
            return Ok(self.display_list.iter().map(|(_, object)| object).collect());
        }
        ids.iter().map(|&id| self.get(id)).collect()
    }

    /// Apply `update` to an object.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownObject`] for a missing id, or
    /// [`SceneError::InvalidBounds`] if the result would be invalid. The
    /// object is left untouched on error.
    pub fn update(&mut self, id: ObjectId, update: Update<A>) -> SceneResult<()> {
        let requires_redraw = !update.is_positional();
        let object = self.get_mut(id)?;
        object.update(update)?;

        debug!(%id, bounds = ?object.bounds(), requires_redraw, "object updated");
        self.events.emit(&SceneEvent::ObjectUpdated {
            id,
            requires_redraw,
        });
        Ok(())
    }

    /// Remove an object from the scene.
    ///
    /// The area it last occupied on the surface is cleared and
    /// recomposited on the next draw. Its id is never handed out again.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownObject`] if `id` is not in the scene.
    pub fn remove(&mut self, id: ObjectId) -> SceneResult<Object<B, A>> {
        let object = self
            .display_list
            .remove(id)
            .ok_or(SceneError::UnknownObject(id))?;

        if let Some(drawn) = object.drawn_bounds() {
            self.pending_damage.push(drawn);
        }

        debug!(%id, "object removed");
        self.events.emit(&SceneEvent::ObjectRemoved(id));
        Ok(object)
    }

    /// Objects containing the point, back to front. Edges count as inside.
    pub fn hit(&self, x: f32, y: f32) -> Vec<&Object<B, A>> {
        self.display_list
            .iter()
            .filter(|(_, object)| object.bounds().contains(x, y))
            .map(|(_, object)| object)
            .collect()
    }

    /// Objects overlapping `region`, back to front, skipping `exclude`.
    ///
    /// Objects that only touch the region's edges are not included.
    pub fn hit_within_bounds(&self, region: &Rect, exclude: &[ObjectId]) -> Vec<AffectedObject> {
        self.display_list
            .iter()
            .filter(|(id, _)| !exclude.contains(id))
            .filter_map(|(id, object)| {
                let bounds = object.bounds();
                let intersection = geometry::intersect(&bounds, region)?;
                Some(AffectedObject {
                    id,
                    intersection,
                    local: geometry::to_local(&bounds, &intersection),
                })
            })
            .collect()
    }

    /// Redraw whatever changed since the last draw.
    ///
    /// Returns `None`, without touching the backend, when nothing did.
    pub fn draw(&mut self) -> Option<FrameReport> {
        let start = Instant::now();

        let dirty: Vec<ObjectId> = self
            .display_list
            .iter()
            .filter(|(_, object)| object.is_dirty())
            .map(|(id, _)| id)
            .collect();
        if dirty.is_empty() && self.pending_damage.is_empty() {
            return None;
        }

        let mut damage = std::mem::take(&mut self.pending_damage);
        for &id in &dirty {
            if let Some(object) = self.display_list.get(id) {
                damage.push(object.prev_bounds());
                damage.push(object.bounds());
                damage.extend(object.drawn_bounds());
            }
        }
        let region = geometry::pad(
            geometry::union(&damage)?,
            self.config.effective_padding(),
        );
        let affected = self.hit_within_bounds(&region, &[]);

        let cleared = PixelRect::round_out(region);
        self.backend.clear_region(cleared);

        let mut repainted = 0;
        for &id in &dirty {
            if let Some(object) = self.display_list.get_mut(id) {
                if object.paint(Point::ZERO) {
                    repainted += 1;
                }
            }
        }

        for hit in &affected {
            let Some(object) = self.display_list.get(hit.id) else {
                continue;
            };
            let src = PixelRect::round_out(Rect::new(
                hit.local.x,
                hit.local.y,
                hit.intersection.width,
                hit.intersection.height,
            ));
            let dst = PixelRect::round_out(hit.intersection);
            self.backend.blit_region(object.cache(), src, dst);
        }

        for &id in &dirty {
            if let Some(object) = self.display_list.get_mut(id) {
                object.mark_composited();
            }
        }

        let elapsed = start.elapsed();
        self.timer.record(elapsed);
        self.frame_count += 1;

        let report = FrameReport {
            frame: self.frame_count,
            cleared,
            dirty: dirty.len(),
            affected: affected.len(),
            repainted,
            elapsed,
            average: self.timer.average(),
            budget_cost: self.timer.budget_cost(),
        };
        trace!(
            frame = report.frame,
            ?cleared,
            dirty = report.dirty,
            affected = report.affected,
            repainted,
            ?elapsed,
            average = ?report.average,
            budget_cost = report.budget_cost,
            "frame drawn"
        );
        self.events.emit(&SceneEvent::FrameDrawn(report.clone()));
        Some(report)
    }

    /// Subscribe to scene events.
    pub fn on<F>(&mut self, kind: SceneEventKind, handler: F) -> Subscription
    where
        F: FnMut(&SceneEvent) + 'static,
    {
        self.events.on(kind, handler)
    }

    /// Unsubscribe a handler.
    pub fn off(&mut self, subscription: Subscription) -> bool {
        self.events.off(subscription)
    }
}

impl<B: RasterBackend + std::fmt::Debug, A> std::fmt::Debug for Scene<B, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("backend", &self.backend)
            .field("objects", &self.display_list.len())
            .field("next_id", &self.next_id)
            .field("pending_damage", &self.pending_damage)
            .field("frame_count", &self.frame_count)
            .finish_non_exhaustive()
    }
}
