//! Error types for scene operations.

use crate::scene::ObjectId;
use thiserror::Error;

/// Errors reported synchronously by scene and object operations.
///
/// Both variants are caller contract violations. The operation that
/// reported them has not been applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Bounds with a negative, non-finite or oversized size, or a non-finite
    /// origin. See [`MAX_OBJECT_SIZE`](crate::scene::MAX_OBJECT_SIZE).
    #[error("invalid bounds: {width}x{height}")]
    InvalidBounds {
        /// Offending width.
        width: f32,
        /// Offending height.
        height: f32,
    },

    /// No object with this id is in the display list.
    #[error("unknown scene object: {0}")]
    UnknownObject(ObjectId),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
