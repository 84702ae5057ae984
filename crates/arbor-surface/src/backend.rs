//! The surface backend boundary.
//!
//! A [`SurfaceBackend`] owns the platform render targets that widget
//! surfaces bind to. The widget engine only ever talks to the backend
//! through this trait: it allocates independent targets for widgets that
//! own their pixels, carves subregion views out of ancestor targets for
//! widgets that do not, and clears/presents regions during paint passes.
//!
//! Allocation failures are non-fatal by contract. The engine leaves the
//! affected widget in a pending state and retries on the next paint pass,
//! so backends are free to fail under memory pressure.

use slotmap::new_key_type;
use thiserror::Error;

use crate::types::{Rect, Size};

new_key_type! {
    /// Handle to a backend render target.
    ///
    /// Generational: a destroyed surface's id never aliases a later
    /// allocation.
    pub struct SurfaceId;
}

/// Errors reported by surface backends.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The backend could not allocate an independent target.
    #[error("surface allocation of {width}x{height} failed: {reason}")]
    AllocationFailed {
        width: i32,
        height: i32,
        reason: String,
    },

    /// The requested subregion is empty or falls outside its parent.
    #[error("subregion {rect:?} is not a valid view into the parent surface")]
    InvalidSubregion { rect: Rect },

    /// The referenced surface does not exist (destroyed or never created).
    #[error("unknown surface id")]
    UnknownSurface,
}

/// A specialized Result type for backend operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// The contract the widget engine consumes from a compositing backend.
///
/// Geometry passed to subregion operations is relative to the parent
/// surface's origin. Backends are expected to tolerate geometry updates and
/// clears on any live surface; only creation can fail.
pub trait SurfaceBackend {
    /// Allocate an independent render target of the given size.
    fn create_surface(&mut self, size: Size) -> SurfaceResult<SurfaceId>;

    /// Create a view into `parent` covering `rect` (parent-relative).
    ///
    /// Drawing through the returned surface writes into the parent's backing
    /// store, offset by the subregion origin.
    fn create_subregion(&mut self, rect: Rect, parent: SurfaceId) -> SurfaceResult<SurfaceId>;

    /// Move/resize a subregion view within its parent.
    ///
    /// No-op on independent surfaces and unknown ids.
    fn set_geometry(&mut self, id: SurfaceId, rect: Rect);

    /// Clear a region of a surface (surface-local coordinates).
    fn clear(&mut self, id: SurfaceId, rect: Rect);

    /// Fill a region of a surface with a solid pixel value.
    ///
    /// The one drawing primitive the engine contract requires; richer
    /// drawing lives behind backend-specific interfaces.
    fn fill(&mut self, id: SurfaceId, rect: Rect, pixel: u32);

    /// Release a surface. Unknown ids are ignored.
    fn destroy(&mut self, id: SurfaceId);

    /// Present a region of a surface to the screen.
    fn flip(&mut self, id: SurfaceId, rect: Rect);
}
