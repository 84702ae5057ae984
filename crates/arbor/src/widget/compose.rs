//! The paint pass.
//!
//! Painting walks a subtree parent-before-child (so subregion bindings can
//! anchor) and back-to-front in z-order, clipping the damage rectangle at
//! every level. Surfaces are bound lazily on the way down; a widget whose
//! surface cannot be bound is skipped and retried next pass, and its
//! subtree is skipped with it.
//!
//! Two entry points differ in one thing only: [`Composer::update`] clears
//! the damaged region before drawing, [`Composer::repaint`] draws over
//! whatever is there. Input hooks never paint directly; they queue
//! requests on a [`RepaintQueue`] that the window drains after dispatch.

use arbor_surface::{Rect, SurfaceBackend};
use tracing::trace;

use crate::logging::targets;
use crate::style::StyleProvider;

use super::traits::ComposeContext;
use super::tree::{WidgetId, WidgetTree};

/// What a queued redraw request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintKind {
    /// Clear the widget's region, then paint.
    Update,
    /// Paint over the current contents.
    Repaint,
}

/// Redraw requests accumulated during event dispatch.
///
/// Hooks run in the middle of a tree walk; painting there would re-enter
/// the tree. Requests are queued instead and the window drains them once
/// dispatch has unwound.
#[derive(Default)]
pub struct RepaintQueue {
    requests: Vec<(WidgetId, RepaintKind)>,
}

impl RepaintQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a clearing redraw.
    pub fn request_update(&mut self, id: WidgetId) {
        self.push(id, RepaintKind::Update);
    }

    /// Queue a non-clearing redraw.
    pub fn request_repaint(&mut self, id: WidgetId) {
        self.push(id, RepaintKind::Repaint);
    }

    fn push(&mut self, id: WidgetId, kind: RepaintKind) {
        if !self.requests.contains(&(id, kind)) {
            self.requests.push((id, kind));
        }
    }

    /// Take all queued requests, oldest first.
    pub fn drain(&mut self) -> Vec<(WidgetId, RepaintKind)> {
        std::mem::take(&mut self.requests)
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Stateless paint-pass driver.
pub struct Composer;

impl Composer {
    /// Paint a subtree, restricted to `rect` in root-window coordinates.
    ///
    /// Does not clear and does not present; see [`Composer::update`] for
    /// the full damage cycle.
    pub fn paint(
        tree: &mut WidgetTree,
        backend: &mut dyn SurfaceBackend,
        style: &dyn StyleProvider,
        id: WidgetId,
        rect: Rect,
    ) {
        if !tree.visible(id) {
            return;
        }
        if !tree.update_surface(id, backend) {
            return;
        }
        let frame = tree.frame_geometry(id);
        let damage = frame.intersected(&rect);
        if !damage.is_valid() {
            return;
        }
        let Some(surface) = tree.surface_id(id) else { return };
        trace!(target: targets::COMPOSE, ?id, ?damage, "compose");

        let mut behavior = tree.take_behavior(id);
        behavior.compose(&mut ComposeContext {
            backend: &mut *backend,
            surface,
            area: Rect::from_parts(arbor_surface::Point::ZERO, frame.size),
            damage: tree.map_rect_to_surface(id, damage),
            style,
        });
        tree.put_behavior(id, behavior);

        let children = tree.children(id).to_vec();
        for child in children {
            Self::paint(tree, backend, style, child, damage);
        }
    }

    /// Redraw a widget's full frame without clearing first.
    pub fn repaint(
        tree: &mut WidgetTree,
        backend: &mut dyn SurfaceBackend,
        style: &dyn StyleProvider,
        id: WidgetId,
    ) {
        let rect = tree.frame_geometry(id);
        Self::repaint_region(tree, backend, style, id, rect);
    }

    /// Redraw part of a widget without clearing first. `rect` is in
    /// root-window coordinates.
    pub fn repaint_region(
        tree: &mut WidgetTree,
        backend: &mut dyn SurfaceBackend,
        style: &dyn StyleProvider,
        id: WidgetId,
        rect: Rect,
    ) {
        if !tree.visible(id) {
            return;
        }
        Self::paint(tree, backend, style, id, rect);
        Self::present(tree, backend, id, rect);
    }

    /// Run the full damage cycle for a widget's whole frame.
    pub fn update(
        tree: &mut WidgetTree,
        backend: &mut dyn SurfaceBackend,
        style: &dyn StyleProvider,
        id: WidgetId,
    ) {
        let rect = tree.frame_geometry(id);
        Self::update_region(tree, backend, style, id, rect);
    }

    /// Run the damage cycle for part of a widget: clear the region,
    /// repaint the affected subtree, present. `rect` is in root-window
    /// coordinates.
    ///
    /// The clear happens on the nearest ancestor that owns an independent
    /// surface, since that is where the widget's pixels actually live.
    pub fn update_region(
        tree: &mut WidgetTree,
        backend: &mut dyn SurfaceBackend,
        style: &dyn StyleProvider,
        id: WidgetId,
        rect: Rect,
    ) {
        // A hidden widget's request is dropped outright; clearing its
        // region on the owner would be a visible effect.
        if !tree.visible(id) {
            return;
        }
        let mut target = id;
        while let Some(parent) = tree.parent(target) {
            if tree.surface_description(target).has_own_surface {
                break;
            }
            target = parent;
        }
        if !tree.update_surface(target, backend) {
            // Nothing bound yet; the next paint pass draws from scratch
            // anyway.
            return;
        }
        if let Some(surface) = tree.surface_id(target) {
            backend.clear(surface, tree.map_rect_to_surface(target, rect));
        }
        Self::paint(tree, backend, style, target, rect);
        Self::present(tree, backend, target, rect);
    }

    /// Flip the damaged region of the owning window surface, if the
    /// subtree hangs under a root window.
    fn present(
        tree: &WidgetTree,
        backend: &mut dyn SurfaceBackend,
        id: WidgetId,
        rect: Rect,
    ) {
        let Some(root) = tree.root_window(id) else { return };
        let Some(surface) = tree.surface_id(root) else { return };
        backend.flip(surface, tree.map_rect_to_surface(root, rect));
    }
}
