//! Surface backend boundary for the Arbor widget toolkit.
//!
//! This crate provides the two things the widget engine needs from a
//! compositor but does not implement itself:
//!
//! - **Geometry**: [`Point`], [`Size`] and [`Rect`] value types shared
//!   across the workspace.
//! - **Surfaces**: the [`SurfaceBackend`] trait over platform render
//!   targets, addressed through generational [`SurfaceId`] handles, plus
//!   the in-memory [`SoftwareBackend`] used for tests and headless runs.
//!
//! Widgets never own pixels directly. A widget either holds an independent
//! surface allocation or a subregion view into the nearest ancestor that
//! does; both are created and presented through [`SurfaceBackend`].

mod backend;
mod software;
mod types;

pub use backend::{SurfaceBackend, SurfaceError, SurfaceId, SurfaceResult};
pub use software::{BackendStats, SoftwareBackend};
pub use types::{Point, Rect, Size};
