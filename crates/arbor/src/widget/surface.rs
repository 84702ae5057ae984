//! Lazy surface binding for widgets.
//!
//! A widget has no backend surface until a paint pass reaches it. At that
//! point [`WidgetTree::update_surface`] binds one of three ways:
//!
//! * own surface: an independent allocation sized to the widget,
//! * root surface: a subregion view into the root window's surface,
//! * default: a subregion view into the parent's surface.
//!
//! Allocation failure is not fatal. The widget stays in the pending state,
//! the paint pass skips it, and the next pass retries. Geometry changes do
//! not touch the backend immediately; they only set the `modified` flag,
//! which the next paint pass resolves here.

use arbor_surface::{Rect, SurfaceBackend, SurfaceId};
use tracing::{debug, trace};

use crate::logging::targets;

use super::tree::{WidgetId, WidgetTree};

/// A bound backend surface plus the geometry it was bound with.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Surface {
    pub(crate) id: SurfaceId,
    /// Parent-relative rect for subregion views, `(0,0)+size` for own
    /// allocations. Compared against current geometry to decide whether a
    /// re-bind needs a reallocation.
    pub(crate) geometry: Rect,
}

impl WidgetTree {
    /// Backend surface currently bound to the widget, if any.
    pub fn surface_id(&self, id: WidgetId) -> Option<SurfaceId> {
        self.node(id).and_then(|n| n.surface.as_ref()).map(|s| s.id)
    }

    /// Bring the widget's surface binding up to date. Returns true when a
    /// usable surface is bound afterwards.
    ///
    /// Called by the paint pass parent-before-child, so a widget binding a
    /// subregion can rely on its parent's surface already existing.
    pub fn update_surface(&mut self, id: WidgetId, backend: &mut dyn SurfaceBackend) -> bool {
        let Some(node) = self.node(id) else { return false };
        let desc = node.surface_desc;

        if desc.initialise {
            return self.bind_surface(id, backend);
        }

        if desc.modified {
            let Some(surface) = node.surface else {
                // Nothing bound yet; geometry will be picked up when the
                // surface is first created.
                if let Some(node) = self.node_mut(id) {
                    node.surface_desc.modified = false;
                }
                return false;
            };
            let target = self.bind_rect(id);
            if desc.has_own_surface {
                if surface.geometry.size != target.size {
                    // An independent allocation cannot be resized in place.
                    backend.destroy(surface.id);
                    if let Some(node) = self.node_mut(id) {
                        node.surface = None;
                    }
                    return self.bind_surface(id, backend);
                }
            } else {
                backend.set_geometry(surface.id, target);
            }
            if let Some(node) = self.node_mut(id) {
                if let Some(surface) = node.surface.as_mut() {
                    surface.geometry = target;
                }
                node.surface_desc.modified = false;
            }
        }

        self.node(id).is_some_and(|n| n.surface.is_some())
    }

    /// Destroy the surfaces of a widget and its whole subtree. Each widget
    /// returns to the pending state and re-binds on its next paint.
    pub fn invalidate_surface(&mut self, id: WidgetId, backend: &mut dyn SurfaceBackend) {
        let Some(node) = self.node_mut(id) else { return };
        if let Some(surface) = node.surface.take() {
            backend.destroy(surface.id);
        }
        node.surface_desc.initialise = true;
        node.surface_desc.modified = false;
        let children = node.children.clone();
        for child in children {
            self.invalidate_surface(child, backend);
        }
    }

    /// The rect a fresh binding should cover: parent-relative for
    /// subregions, zero-origin for own allocations.
    fn bind_rect(&self, id: WidgetId) -> Rect {
        let Some(node) = self.node(id) else { return Rect::ZERO };
        if node.surface_desc.has_own_surface {
            Rect::from_parts(arbor_surface::Point::ZERO, node.frame_geometry.size)
        } else {
            Rect::from_parts(node.surface_geometry, node.frame_geometry.size)
        }
    }

    fn bind_surface(&mut self, id: WidgetId, backend: &mut dyn SurfaceBackend) -> bool {
        let Some(node) = self.node(id) else { return false };
        let desc = node.surface_desc;
        let target = self.bind_rect(id);

        // Drop any stale binding from a previous configuration first.
        if let Some(node) = self.node_mut(id) {
            if let Some(surface) = node.surface.take() {
                backend.destroy(surface.id);
            }
        }

        if !target.is_valid() {
            trace!(target: targets::SURFACE, ?id, "skipping bind for empty geometry");
            return false;
        }

        let created = if desc.has_own_surface {
            backend.create_surface(target.size)
        } else {
            let Some(anchor) = self.bind_anchor(id, desc.root_surface) else {
                trace!(target: targets::SURFACE, ?id, "anchor surface not ready, binding deferred");
                return false;
            };
            backend.create_subregion(target, anchor)
        };

        match created {
            Ok(surface_id) => {
                if let Some(node) = self.node_mut(id) {
                    node.surface = Some(Surface {
                        id: surface_id,
                        geometry: target,
                    });
                    node.surface_desc.initialise = false;
                    node.surface_desc.modified = false;
                }
                trace!(target: targets::SURFACE, ?id, ?target, "bound surface");
                true
            }
            Err(error) => {
                debug!(target: targets::SURFACE, ?id, %error, "surface bind failed, will retry");
                false
            }
        }
    }

    /// The surface a subregion binding anchors into: the root window's for
    /// root-surface widgets, the parent's otherwise.
    fn bind_anchor(&self, id: WidgetId, root_surface: bool) -> Option<SurfaceId> {
        let node = self.node(id)?;
        let anchor = if root_surface {
            node.root_window?
        } else {
            node.parent?
        };
        self.surface_id(anchor)
    }
}
