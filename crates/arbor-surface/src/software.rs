//! In-memory software backend.
//!
//! [`SoftwareBackend`] keeps every independent surface as a plain pixel
//! buffer and models subregions as offset views into their parent
//! allocation, the way hardware sub-surfaces behave. It backs the test
//! suite and headless runs; a real deployment substitutes a platform
//! backend behind the same [`SurfaceBackend`] trait.

use slotmap::SlotMap;
use tracing::trace;

use crate::backend::{SurfaceBackend, SurfaceError, SurfaceId, SurfaceResult};
use crate::types::{Point, Rect, Size};

const TARGET: &str = "arbor::surface";

enum Storage {
    /// An independent allocation with its own pixel buffer.
    Allocated { size: Size, pixels: Vec<u32> },
    /// A view into another surface, offset by `rect.origin`.
    Subregion { parent: SurfaceId, rect: Rect },
}

struct SoftSurface {
    storage: Storage,
}

/// Counters for backend activity, useful in tests and debugging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackendStats {
    /// Independent allocations performed.
    pub allocations: u32,
    /// Subregion views created.
    pub subregions: u32,
    /// Clear calls.
    pub clears: u32,
    /// Present (flip) calls.
    pub flips: u32,
}

/// A [`SurfaceBackend`] that renders into main memory.
#[derive(Default)]
pub struct SoftwareBackend {
    surfaces: SlotMap<SurfaceId, SoftSurface>,
    stats: BackendStats,
    deny_allocations: bool,
}

impl SoftwareBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activity counters since creation.
    pub fn stats(&self) -> BackendStats {
        self.stats
    }

    /// Number of live surfaces (allocations and subregions).
    pub fn live_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    /// Make subsequent allocations fail, to exercise the engine's
    /// degraded no-draw path.
    pub fn set_deny_allocations(&mut self, deny: bool) {
        self.deny_allocations = deny;
    }

    /// Check whether a surface id still refers to a live surface.
    pub fn is_live(&self, id: SurfaceId) -> bool {
        self.surfaces.contains_key(id)
    }

    fn fill_region(&mut self, id: SurfaceId, rect: Rect, pixel: u32) {
        let Some((root, offset, bounds)) = self.resolve(id) else {
            return;
        };
        let target = rect.translated(offset.x, offset.y).intersected(&bounds);
        if !target.is_valid() {
            return;
        }
        if let Some(SoftSurface {
            storage: Storage::Allocated { size, pixels },
        }) = self.surfaces.get_mut(root)
        {
            let stride = size.width;
            for y in target.y()..target.bottom() {
                let row = (y * stride) as usize;
                for x in target.x()..target.right() {
                    pixels[row + x as usize] = pixel;
                }
            }
        }
    }

    /// Read a pixel back in surface-local coordinates.
    pub fn pixel(&self, id: SurfaceId, point: Point) -> Option<u32> {
        let (root, offset, bounds) = self.resolve(id)?;
        let mapped = point.translated(offset.x, offset.y);
        if !bounds.contains(mapped) {
            return None;
        }
        match &self.surfaces.get(root)?.storage {
            Storage::Allocated { size, pixels } => {
                pixels.get((mapped.y * size.width + mapped.x) as usize).copied()
            }
            Storage::Subregion { .. } => None,
        }
    }

    /// Resolve a surface to its root allocation: returns the allocation id,
    /// the accumulated offset of the view chain, and the clip bounds of the
    /// view in allocation coordinates.
    fn resolve(&self, id: SurfaceId) -> Option<(SurfaceId, Point, Rect)> {
        let mut current = id;
        let mut offset = Point::ZERO;
        let mut clip: Option<Rect> = None;
        loop {
            match &self.surfaces.get(current)?.storage {
                Storage::Allocated { size, .. } => {
                    let full = Rect::from_parts(Point::ZERO, *size);
                    let bounds = match clip {
                        Some(c) => c.intersected(&full),
                        None => full,
                    };
                    return Some((current, offset, bounds));
                }
                Storage::Subregion { parent, rect } => {
                    // Re-express the accumulated clip in parent coordinates
                    // and constrain it to this view's window.
                    clip = Some(match clip {
                        Some(c) => c.translated(rect.origin.x, rect.origin.y).intersected(rect),
                        None => *rect,
                    });
                    offset = offset + rect.origin;
                    current = *parent;
                }
            }
        }
    }
}

impl SurfaceBackend for SoftwareBackend {
    fn create_surface(&mut self, size: Size) -> SurfaceResult<SurfaceId> {
        if self.deny_allocations {
            return Err(SurfaceError::AllocationFailed {
                width: size.width,
                height: size.height,
                reason: "allocations denied".into(),
            });
        }
        if !size.is_valid() {
            return Err(SurfaceError::AllocationFailed {
                width: size.width,
                height: size.height,
                reason: "empty size".into(),
            });
        }
        let pixels = vec![0; (size.width * size.height) as usize];
        let id = self.surfaces.insert(SoftSurface {
            storage: Storage::Allocated { size, pixels },
        });
        self.stats.allocations += 1;
        trace!(target: TARGET, ?size, "allocated surface");
        Ok(id)
    }

    fn create_subregion(&mut self, rect: Rect, parent: SurfaceId) -> SurfaceResult<SurfaceId> {
        if self.deny_allocations {
            return Err(SurfaceError::AllocationFailed {
                width: rect.width(),
                height: rect.height(),
                reason: "allocations denied".into(),
            });
        }
        if !self.surfaces.contains_key(parent) {
            return Err(SurfaceError::UnknownSurface);
        }
        if !rect.is_valid() {
            return Err(SurfaceError::InvalidSubregion { rect });
        }
        let id = self.surfaces.insert(SoftSurface {
            storage: Storage::Subregion { parent, rect },
        });
        self.stats.subregions += 1;
        trace!(target: TARGET, ?rect, "created subregion");
        Ok(id)
    }

    fn set_geometry(&mut self, id: SurfaceId, rect: Rect) {
        if let Some(SoftSurface {
            storage: Storage::Subregion { rect: current, .. },
        }) = self.surfaces.get_mut(id)
        {
            *current = rect;
        }
    }

    fn clear(&mut self, id: SurfaceId, rect: Rect) {
        self.fill_region(id, rect, 0);
        self.stats.clears += 1;
    }

    fn fill(&mut self, id: SurfaceId, rect: Rect, pixel: u32) {
        self.fill_region(id, rect, pixel);
    }

    fn destroy(&mut self, id: SurfaceId) {
        self.surfaces.remove(id);
    }

    fn flip(&mut self, id: SurfaceId, rect: Rect) {
        self.stats.flips += 1;
        trace!(target: TARGET, ?id, ?rect, "flip");
    }
}
