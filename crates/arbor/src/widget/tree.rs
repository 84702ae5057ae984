//! The widget tree arena.
//!
//! [`WidgetTree`] owns every widget node in a slotmap and is the only place
//! widget state lives. Widgets refer to each other by [`WidgetId`]; a dead
//! id simply fails the lookup, so stale references degrade to no-ops
//! instead of dangling.
//!
//! Geometry model: each widget stores its position relative to its parent
//! (`x`/`y`) and its size. The absolute rectangle in root-window
//! coordinates (`frame_geometry`) is derived and kept current by a cascade
//! that runs whenever a widget moves or resizes. Surface binding is lazy
//! and lives in the sibling `surface` module; the tree only marks surfaces
//! as pending or modified.

use std::mem;

use arbor_surface::{Point, Rect, Size, SurfaceBackend};
use slotmap::{SlotMap, new_key_type};
use tracing::{trace, warn};

use crate::logging::targets;

use super::node::{Direction, InputMethod, ResizeConstraint, WidgetNode};
use super::node::{SurfaceDescription, WidgetState};
use super::traits::{NullWidget, Widget};

new_key_type! {
    /// Handle to a widget in a [`WidgetTree`].
    ///
    /// Generational: once a widget is destroyed its id never aliases a
    /// later widget.
    pub struct WidgetId;
}

/// Arena of widget nodes plus the tree structure over them.
#[derive(Default)]
pub struct WidgetTree {
    pub(crate) nodes: SlotMap<WidgetId, WidgetNode>,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new widget with the given behavior. The widget starts
    /// parentless, invisible to input, at zero geometry.
    pub fn create_widget(&mut self, behavior: Box<dyn Widget>) -> WidgetId {
        let id = self.nodes.insert(WidgetNode::new(behavior));
        trace!(target: targets::TREE, ?id, "created widget");
        id
    }

    /// Check whether an id refers to a live widget.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the tree holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(id)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Horizontal position relative to the parent.
    pub fn x(&self, id: WidgetId) -> i32 {
        self.node(id).map_or(0, |n| n.surface_geometry.x)
    }

    /// Vertical position relative to the parent.
    pub fn y(&self, id: WidgetId) -> i32 {
        self.node(id).map_or(0, |n| n.surface_geometry.y)
    }

    /// Position relative to the parent.
    pub fn position(&self, id: WidgetId) -> Point {
        self.node(id).map_or(Point::ZERO, |n| n.surface_geometry)
    }

    /// Absolute horizontal position in root-window coordinates.
    pub fn abs_x(&self, id: WidgetId) -> i32 {
        self.node(id).map_or(0, |n| n.frame_geometry.x())
    }

    /// Absolute vertical position in root-window coordinates.
    pub fn abs_y(&self, id: WidgetId) -> i32 {
        self.node(id).map_or(0, |n| n.frame_geometry.y())
    }

    /// Width of the widget.
    pub fn width(&self, id: WidgetId) -> i32 {
        self.node(id).map_or(0, |n| n.frame_geometry.width())
    }

    /// Height of the widget.
    pub fn height(&self, id: WidgetId) -> i32 {
        self.node(id).map_or(0, |n| n.frame_geometry.height())
    }

    /// Size of the widget.
    pub fn size(&self, id: WidgetId) -> Size {
        self.node(id).map_or(Size::ZERO, |n| n.frame_geometry.size)
    }

    /// Absolute rectangle in root-window coordinates.
    pub fn frame_geometry(&self, id: WidgetId) -> Rect {
        self.node(id).map_or(Rect::ZERO, |n| n.frame_geometry)
    }

    /// Parent-relative rectangle (position plus size).
    pub fn surface_geometry(&self, id: WidgetId) -> Rect {
        self.node(id)
            .map_or(Rect::ZERO, |n| Rect::from_parts(n.surface_geometry, n.frame_geometry.size))
    }

    /// Minimum size limit.
    pub fn minimum_size(&self, id: WidgetId) -> Size {
        self.node(id).map_or(Size::ZERO, |n| n.min_size)
    }

    /// Maximum size limit. Zero on an axis means unbounded.
    pub fn maximum_size(&self, id: WidgetId) -> Size {
        self.node(id).map_or(Size::ZERO, |n| n.max_size)
    }

    /// Horizontal resize constraint.
    pub fn x_constraint(&self, id: WidgetId) -> ResizeConstraint {
        self.node(id).map_or(ResizeConstraint::Ignored, |n| n.x_constraint)
    }

    /// Vertical resize constraint.
    pub fn y_constraint(&self, id: WidgetId) -> ResizeConstraint {
        self.node(id).map_or(ResizeConstraint::Ignored, |n| n.y_constraint)
    }

    /// Current state flags.
    pub fn state(&self, id: WidgetId) -> WidgetState {
        self.node(id).map_or(WidgetState::default(), |n| n.state)
    }

    /// Surface binding description.
    pub fn surface_description(&self, id: WidgetId) -> SurfaceDescription {
        self.node(id)
            .map_or(SurfaceDescription::default(), |n| n.surface_desc)
    }

    /// Input classes the widget participates in.
    pub fn input_method(&self, id: WidgetId) -> InputMethod {
        self.node(id).map_or(InputMethod::NONE, |n| n.input)
    }

    /// Parent of the widget, if attached.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children in z-order, back to front.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The root window this widget is attached under, if any.
    pub fn root_window(&self, id: WidgetId) -> Option<WidgetId> {
        self.node(id).and_then(|n| n.root_window)
    }

    /// Borrow the widget's behavior object.
    pub fn behavior(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.node(id).map(|n| n.behavior.as_ref())
    }

    /// Preferred size reported by the widget's behavior.
    pub fn preferred_size(&self, id: WidgetId) -> Size {
        self.node(id).map_or(Size::ZERO, |n| n.behavior.preferred_size())
    }

    /// Height the behavior wants for a given width, if it cares.
    pub fn height_for_width(&self, id: WidgetId, width: i32) -> Option<i32> {
        self.node(id).and_then(|n| n.behavior.height_for_width(width))
    }

    // ------------------------------------------------------------------
    // Computed state
    // ------------------------------------------------------------------

    /// Effective enabled state: the widget and every ancestor must not be
    /// disabled.
    pub fn enabled(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(node) = self.node(c) else { return false };
            if node.state.disabled {
                return false;
            }
            current = node.parent;
        }
        true
    }

    /// Effective visibility: the widget and every ancestor must not be
    /// invisible.
    pub fn visible(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(node) = self.node(c) else { return false };
            if node.state.invisible {
                return false;
            }
            current = node.parent;
        }
        true
    }

    /// Whether pointer dispatch should consider this widget at all.
    pub fn accepts_pointer_input(&self, id: WidgetId) -> bool {
        self.visible(id)
            && self.node(id).is_some_and(|n| n.input.pointer)
            && self.enabled(id)
    }

    /// Whether the widget can take key focus.
    pub fn accepts_key_input(&self, id: WidgetId) -> bool {
        self.visible(id)
            && self.node(id).is_some_and(|n| n.input.key)
            && self.enabled(id)
    }

    // ------------------------------------------------------------------
    // Flag setters
    // ------------------------------------------------------------------

    /// Set the widget's own enabled flag. Returns true if it changed.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> bool {
        let Some(node) = self.node_mut(id) else { return false };
        if node.state.disabled != enabled {
            return false;
        }
        node.state.disabled = !enabled;
        true
    }

    /// Set the widget's own visibility flag. Returns true if it changed.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> bool {
        let Some(node) = self.node_mut(id) else { return false };
        if node.state.invisible != visible {
            return false;
        }
        node.state.invisible = !visible;
        true
    }

    /// Set which input classes the widget participates in.
    pub fn set_input_method(&mut self, id: WidgetId, input: InputMethod) {
        if let Some(node) = self.node_mut(id) {
            node.input = input;
        }
    }

    /// Toggle pointer motion tracking without touching the other input
    /// flags.
    pub fn set_pointer_tracking(&mut self, id: WidgetId, tracking: bool) {
        if let Some(node) = self.node_mut(id) {
            node.input.tracking = tracking;
        }
    }

    /// Give the widget an independent surface allocation instead of a
    /// subregion view. The surface is recreated on the next paint pass.
    pub fn set_has_own_surface(&mut self, id: WidgetId, own: bool) {
        let Some(node) = self.node_mut(id) else { return };
        if node.surface_desc.has_own_surface == own {
            return;
        }
        node.surface_desc.has_own_surface = own;
        node.surface_desc.initialise = true;
    }

    /// Bind the widget's surface directly into the root window's surface
    /// rather than the parent's. Takes effect on the next paint pass.
    pub fn set_root_surface(&mut self, id: WidgetId, root: bool) {
        let Some(node) = self.node_mut(id) else { return };
        if node.surface_desc.root_surface == root {
            return;
        }
        node.surface_desc.root_surface = root;
        node.surface_desc.initialise = true;
        self.update_frame_geometry(id);
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Set the parent-relative horizontal position.
    pub fn set_x(&mut self, id: WidgetId, x: i32) {
        let Some(node) = self.node_mut(id) else { return };
        if node.surface_geometry.x == x {
            return;
        }
        node.surface_geometry.x = x;
        self.update_frame_geometry(id);
    }

    /// Set the parent-relative vertical position.
    pub fn set_y(&mut self, id: WidgetId, y: i32) {
        let Some(node) = self.node_mut(id) else { return };
        if node.surface_geometry.y == y {
            return;
        }
        node.surface_geometry.y = y;
        self.update_frame_geometry(id);
    }

    /// Move to a new parent-relative position.
    pub fn move_to(&mut self, id: WidgetId, x: i32, y: i32) {
        let Some(node) = self.node_mut(id) else { return };
        let target = Point::new(x, y);
        if node.surface_geometry == target {
            return;
        }
        node.surface_geometry = target;
        self.update_frame_geometry(id);
    }

    /// Set the widget's width, clamped to its size limits.
    ///
    /// The no-change check compares the clamped value against the stored
    /// one, so repeating a request the clamp already resolved never
    /// re-triggers the geometry cascade.
    pub fn set_width(&mut self, id: WidgetId, width: i32) {
        let Some(node) = self.node_mut(id) else { return };
        let width = clamp_axis(width, node.min_size.width, node.max_size.width);
        if node.frame_geometry.size.width == width {
            return;
        }
        node.frame_geometry.size.width = width;
        self.update_frame_geometry(id);
    }

    /// Set the widget's height, clamped to its size limits.
    pub fn set_height(&mut self, id: WidgetId, height: i32) {
        let Some(node) = self.node_mut(id) else { return };
        let height = clamp_axis(height, node.min_size.height, node.max_size.height);
        if node.frame_geometry.size.height == height {
            return;
        }
        node.frame_geometry.size.height = height;
        self.update_frame_geometry(id);
    }

    /// Resize the widget.
    pub fn resize(&mut self, id: WidgetId, width: i32, height: i32) {
        self.set_width(id, width);
        self.set_height(id, height);
    }

    /// Move and resize in one call.
    pub fn set_geometry(&mut self, id: WidgetId, x: i32, y: i32, width: i32, height: i32) {
        self.move_to(id, x, y);
        self.resize(id, width, height);
    }

    /// Set the minimum size. Does not retroactively resize the widget.
    pub fn set_minimum_size(&mut self, id: WidgetId, size: Size) {
        if let Some(node) = self.node_mut(id) {
            node.min_size = size;
        }
    }

    /// Set the maximum size. Zero on an axis means unbounded. Does not
    /// retroactively resize the widget.
    pub fn set_maximum_size(&mut self, id: WidgetId, size: Size) {
        if let Some(node) = self.node_mut(id) {
            node.max_size = size;
        }
    }

    /// Set the resize constraints for both axes.
    pub fn set_constraints(&mut self, id: WidgetId, x: ResizeConstraint, y: ResizeConstraint) {
        if let Some(node) = self.node_mut(id) {
            node.x_constraint = x;
            node.y_constraint = y;
        }
    }

    /// Recompute the absolute frame of a widget and its whole subtree, and
    /// flag every touched surface for re-binding on the next paint pass.
    pub(crate) fn update_frame_geometry(&mut self, id: WidgetId) {
        let Some(node) = self.node(id) else { return };
        let base = if node.surface_desc.root_surface {
            node.root_window
                .and_then(|r| self.node(r))
                .map_or(Point::ZERO, |r| r.frame_geometry.origin)
        } else {
            node.parent
                .and_then(|p| self.node(p))
                .map_or(Point::ZERO, |p| p.frame_geometry.origin)
        };
        let Some(node) = self.node_mut(id) else { return };
        node.frame_geometry.origin = base + node.surface_geometry;
        node.surface_desc.modified = true;
        let children = node.children.clone();
        for child in children {
            self.update_frame_geometry(child);
        }
    }

    // ------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------

    /// Check whether `child` is a direct child of `parent`.
    pub fn is_child(&self, parent: WidgetId, child: WidgetId) -> bool {
        self.node(parent).is_some_and(|n| n.children.contains(&child))
    }

    /// Attach a parentless widget as the front-most child of `parent`.
    ///
    /// Returns false if either id is dead, the child is already attached
    /// somewhere, or child and parent are the same widget.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return false;
        }
        let Some(child_node) = self.node(child) else { return false };
        if child_node.parent.is_some() {
            warn!(target: targets::TREE, ?child, "add_child: widget already has a parent");
            return false;
        }
        let (root, neighbours) = {
            let Some(parent_node) = self.node(parent) else { return false };
            (parent_node.root_window, parent_node.neighbours)
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.push(child);
        }
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = Some(parent);
            // A fresh child starts with its parent's neighbour links until
            // someone wires finer-grained navigation.
            child_node.neighbours = neighbours;
        }
        self.propagate_root_window(child, root);
        self.update_frame_geometry(child);
        trace!(target: targets::TREE, ?parent, ?child, "attached child");
        true
    }

    /// Detach and destroy a child and its whole subtree, releasing every
    /// bound surface through the backend.
    pub fn remove_child(
        &mut self,
        parent: WidgetId,
        child: WidgetId,
        backend: &mut dyn SurfaceBackend,
    ) -> bool {
        let Some(pos) = self.child_position(parent, child) else {
            return false;
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.remove(pos);
        }
        self.destroy_subtree(child, backend);
        trace!(target: targets::TREE, ?parent, ?child, "removed child");
        true
    }

    /// Move a widget (and its subtree) under a new parent, keeping it
    /// alive. Surfaces are invalidated when the widget changes root
    /// windows, since subregion views cannot cross window surfaces.
    pub fn set_parent(
        &mut self,
        child: WidgetId,
        new_parent: WidgetId,
        backend: &mut dyn SurfaceBackend,
    ) -> bool {
        if child == new_parent || !self.contains(child) || !self.contains(new_parent) {
            return false;
        }
        let old_parent = self.parent(child);
        if old_parent == Some(new_parent) {
            return true;
        }
        if let Some(old) = old_parent {
            if let Some(pos) = self.child_position(old, child) {
                if let Some(old_node) = self.node_mut(old) {
                    old_node.children.remove(pos);
                }
            }
        }
        let new_root = self.node(new_parent).and_then(|n| n.root_window);
        let old_root = self.node(child).and_then(|n| n.root_window);
        if let Some(new_node) = self.node_mut(new_parent) {
            new_node.children.push(child);
        }
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = Some(new_parent);
        }
        if new_root != old_root {
            self.invalidate_surface(child, backend);
            self.propagate_root_window(child, new_root);
        }
        self.update_frame_geometry(child);
        trace!(target: targets::TREE, ?child, ?new_parent, "reparented widget");
        true
    }

    /// Bring a child to the front of its parent's z-order.
    pub fn raise_child_to_front(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        let Some(pos) = self.child_position(parent, child) else {
            return false;
        };
        let Some(node) = self.node_mut(parent) else { return false };
        if pos + 1 == node.children.len() {
            return false;
        }
        node.children.remove(pos);
        node.children.push(child);
        true
    }

    /// Send a child to the back of its parent's z-order.
    pub fn lower_child_to_bottom(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        let Some(pos) = self.child_position(parent, child) else {
            return false;
        };
        let Some(node) = self.node_mut(parent) else { return false };
        if pos == 0 {
            return false;
        }
        node.children.remove(pos);
        node.children.insert(0, child);
        true
    }

    /// Raise a child one step toward the front.
    pub fn raise_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        let Some(pos) = self.child_position(parent, child) else {
            return false;
        };
        let Some(node) = self.node_mut(parent) else { return false };
        if pos + 1 == node.children.len() {
            return false;
        }
        node.children.swap(pos, pos + 1);
        true
    }

    /// Lower a child one step toward the back.
    pub fn lower_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        let Some(pos) = self.child_position(parent, child) else {
            return false;
        };
        let Some(node) = self.node_mut(parent) else { return false };
        if pos == 0 {
            return false;
        }
        node.children.swap(pos, pos - 1);
        true
    }

    /// Position of `child` in `parent`'s child list, checked before any
    /// mutation so an unrelated widget can never corrupt the list.
    fn child_position(&self, parent: WidgetId, child: WidgetId) -> Option<usize> {
        self.node(parent)?.children.iter().position(|&c| c == child)
    }

    fn propagate_root_window(&mut self, id: WidgetId, root: Option<WidgetId>) {
        let Some(node) = self.node_mut(id) else { return };
        if node.root_window == root {
            return;
        }
        node.root_window = root;
        // Any surface bound under the old root is a view into the wrong
        // window; recreate lazily on the next paint.
        if node.surface.is_some() {
            node.surface_desc.initialise = true;
        }
        let children = node.children.clone();
        for child in children {
            self.propagate_root_window(child, root);
        }
    }

    pub(crate) fn destroy_subtree(&mut self, id: WidgetId, backend: &mut dyn SurfaceBackend) {
        let children = self
            .node(id)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.destroy_subtree(child, backend);
        }
        if let Some(node) = self.nodes.remove(id) {
            if let Some(surface) = node.surface {
                backend.destroy(surface.id);
            }
        }
    }

    // ------------------------------------------------------------------
    // Neighbours
    // ------------------------------------------------------------------

    /// Focus neighbour in a direction.
    pub fn neighbour(&self, id: WidgetId, direction: Direction) -> Option<WidgetId> {
        self.node(id).and_then(|n| n.neighbours[direction.index()])
    }

    /// Set one focus neighbour link.
    pub fn set_neighbour(&mut self, id: WidgetId, direction: Direction, neighbour: Option<WidgetId>) {
        if let Some(node) = self.node_mut(id) {
            node.neighbours[direction.index()] = neighbour;
        }
    }

    /// Set all four focus neighbour links at once.
    pub fn set_neighbours(
        &mut self,
        id: WidgetId,
        up: Option<WidgetId>,
        down: Option<WidgetId>,
        left: Option<WidgetId>,
        right: Option<WidgetId>,
    ) {
        if let Some(node) = self.node_mut(id) {
            node.neighbours = [up, down, left, right];
        }
    }

    // ------------------------------------------------------------------
    // Coordinate mapping
    // ------------------------------------------------------------------

    /// Map a point from root-window coordinates into the widget's
    /// surface-local coordinates.
    pub fn map_to_surface(&self, id: WidgetId, point: Point) -> Point {
        let frame = self.frame_geometry(id);
        point - frame.origin
    }

    /// Map a surface-local point back into root-window coordinates.
    pub fn map_from_surface(&self, id: WidgetId, point: Point) -> Point {
        let frame = self.frame_geometry(id);
        point + frame.origin
    }

    /// Map a rectangle from root-window coordinates into surface-local
    /// coordinates.
    pub fn map_rect_to_surface(&self, id: WidgetId, rect: Rect) -> Rect {
        let frame = self.frame_geometry(id);
        rect.translated(-frame.x(), -frame.y())
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Run layout for the nearest ancestor (or self) whose behavior manages
    /// layout. No-op when nothing on the ancestor chain does.
    pub fn do_layout(&mut self, id: WidgetId) {
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(node) = self.node(c) else { return };
            if node.behavior.handles_layout() {
                let mut behavior = self.take_behavior(c);
                behavior.layout(self, c);
                self.put_behavior(c, behavior);
                return;
            }
            current = node.parent;
        }
    }

    // ------------------------------------------------------------------
    // Behavior slot
    // ------------------------------------------------------------------

    /// Take the behavior object out of a widget, leaving a no-op stand-in.
    ///
    /// Hooks receive `&mut WidgetTree` while they run; taking the behavior
    /// out first keeps re-entrant calls on the same widget harmless.
    pub fn take_behavior(&mut self, id: WidgetId) -> Box<dyn Widget> {
        match self.node_mut(id) {
            Some(node) => mem::replace(&mut node.behavior, Box::new(NullWidget)),
            None => Box::new(NullWidget),
        }
    }

    /// Put a behavior object back after [`take_behavior`]. Dropped silently
    /// if the widget died while the hook ran.
    ///
    /// [`take_behavior`]: WidgetTree::take_behavior
    pub fn put_behavior(&mut self, id: WidgetId, behavior: Box<dyn Widget>) {
        if let Some(node) = self.node_mut(id) {
            node.behavior = behavior;
        }
    }
}

/// Clamp one size axis to `[min, max]`, where a max of zero means
/// unbounded.
fn clamp_axis(value: i32, min: i32, max: i32) -> i32 {
    let value = value.max(min);
    if max > 0 { value.min(max) } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::traits::NullWidget;

    fn widget(tree: &mut WidgetTree) -> WidgetId {
        tree.create_widget(Box::new(NullWidget))
    }

    #[test]
    fn setters_are_idempotent_on_requested_value() {
        let mut tree = WidgetTree::new();
        let w = widget(&mut tree);
        tree.set_minimum_size(w, Size::new(50, 50));
        tree.set_width(w, 10);
        // Clamped up to the minimum.
        assert_eq!(tree.width(w), 50);
        // Same request again must not re-trigger anything, and in
        // particular must not "un-clamp".
        tree.set_width(w, 10);
        assert_eq!(tree.width(w), 50);

        tree.node_mut(w).unwrap().surface_desc.modified = false;
        tree.set_width(w, 10);
        tree.move_to(w, 0, 0);
        assert!(!tree.surface_description(w).modified);
    }

    #[test]
    fn maximum_zero_means_unbounded() {
        let mut tree = WidgetTree::new();
        let w = widget(&mut tree);
        tree.set_width(w, 100_000);
        assert_eq!(tree.width(w), 100_000);
        tree.set_maximum_size(w, Size::new(200, 0));
        tree.set_width(w, 500);
        assert_eq!(tree.width(w), 200);
        tree.set_height(w, 500);
        assert_eq!(tree.height(w), 500);
    }

    #[test]
    fn frame_cascade_follows_parent_moves() {
        let mut tree = WidgetTree::new();
        let parent = widget(&mut tree);
        let child = widget(&mut tree);
        let grandchild = widget(&mut tree);
        assert!(tree.add_child(parent, child));
        assert!(tree.add_child(child, grandchild));
        tree.set_geometry(parent, 10, 10, 100, 100);
        tree.set_geometry(child, 5, 5, 50, 50);
        tree.set_geometry(grandchild, 1, 2, 10, 10);
        assert_eq!(tree.frame_geometry(grandchild), Rect::new(16, 17, 10, 10));
        tree.move_to(parent, 20, 20);
        assert_eq!(tree.frame_geometry(child), Rect::new(25, 25, 50, 50));
        assert_eq!(tree.frame_geometry(grandchild), Rect::new(26, 27, 10, 10));
    }

    #[test]
    fn move_marks_subtree_surfaces_modified() {
        let mut tree = WidgetTree::new();
        let parent = widget(&mut tree);
        let child = widget(&mut tree);
        tree.add_child(parent, child);
        // Clear flags set by attach.
        tree.node_mut(parent).unwrap().surface_desc.modified = false;
        tree.node_mut(child).unwrap().surface_desc.modified = false;
        tree.set_x(parent, 3);
        assert!(tree.surface_description(parent).modified);
        assert!(tree.surface_description(child).modified);
    }

    #[test]
    fn add_child_rejects_duplicates_and_self() {
        let mut tree = WidgetTree::new();
        let a = widget(&mut tree);
        let b = widget(&mut tree);
        assert!(!tree.add_child(a, a));
        assert!(tree.add_child(a, b));
        assert!(!tree.add_child(a, b));
        assert!(tree.is_child(a, b));
    }

    #[test]
    fn z_order_operations_respect_membership() {
        let mut tree = WidgetTree::new();
        let parent = widget(&mut tree);
        let a = widget(&mut tree);
        let b = widget(&mut tree);
        let c = widget(&mut tree);
        let stranger = widget(&mut tree);
        tree.add_child(parent, a);
        tree.add_child(parent, b);
        tree.add_child(parent, c);

        // A widget that is not a child must leave the list untouched.
        assert!(!tree.raise_child_to_front(parent, stranger));
        assert!(!tree.lower_child(parent, stranger));
        assert_eq!(tree.children(parent), &[a, b, c]);

        assert!(tree.raise_child_to_front(parent, a));
        assert_eq!(tree.children(parent), &[b, c, a]);
        assert!(tree.lower_child_to_bottom(parent, c));
        assert_eq!(tree.children(parent), &[c, b, a]);
        assert!(tree.raise_child(parent, b));
        assert_eq!(tree.children(parent), &[c, a, b]);
        assert!(tree.lower_child(parent, a));
        assert_eq!(tree.children(parent), &[a, c, b]);
        // Already at the edge.
        assert!(!tree.lower_child_to_bottom(parent, a));
        assert!(!tree.raise_child(parent, b));
    }

    #[test]
    fn visibility_and_enabled_walk_ancestors() {
        let mut tree = WidgetTree::new();
        let parent = widget(&mut tree);
        let child = widget(&mut tree);
        tree.add_child(parent, child);
        assert!(tree.visible(child));
        assert!(tree.enabled(child));
        tree.set_visible(parent, false);
        tree.set_enabled(parent, false);
        assert!(!tree.visible(child));
        assert!(!tree.enabled(child));
        // The child's own flags are untouched.
        assert!(!tree.state(child).invisible);
        assert!(!tree.state(child).disabled);
    }

    #[test]
    fn remove_child_destroys_subtree() {
        let mut tree = WidgetTree::new();
        let mut backend = arbor_surface::SoftwareBackend::new();
        let parent = widget(&mut tree);
        let child = widget(&mut tree);
        let grandchild = widget(&mut tree);
        tree.add_child(parent, child);
        tree.add_child(child, grandchild);
        assert!(tree.remove_child(parent, child, &mut backend));
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert!(tree.contains(parent));
        assert!(tree.children(parent).is_empty());
    }

    #[test]
    fn mapping_roundtrip() {
        let mut tree = WidgetTree::new();
        let parent = widget(&mut tree);
        let child = widget(&mut tree);
        tree.add_child(parent, child);
        tree.set_geometry(parent, 10, 10, 100, 100);
        tree.set_geometry(child, 5, 5, 50, 50);
        let local = tree.map_to_surface(child, Point::new(20, 25));
        assert_eq!(local, Point::new(5, 10));
        assert_eq!(tree.map_from_surface(child, local), Point::new(20, 25));
    }
}
