//! Focus, pointer grab, and pointer exposure bookkeeping.
//!
//! One [`EventManager`] lives per root window. It holds the three
//! per-window input singletons (focused widget, grabbed widget, exposed
//! widget) and runs the notify-the-old-then-install-the-new handover for
//! each: the outgoing widget's hook fires before the incoming widget is
//! recorded, so a hook always observes a consistent state.
//!
//! Every transition is idempotent, which doubles as the recursion guard:
//! a hook that re-requests the transition currently in progress hits the
//! early return and nothing loops.

use tracing::trace;

use crate::logging::targets;

use super::compose::RepaintQueue;
use super::events::PointerEvent;
use super::node::Direction;
use super::traits::EventContext;
use super::tree::{WidgetId, WidgetTree};

/// Per-window input state: who has focus, who grabbed the pointer, who the
/// pointer is over.
#[derive(Default)]
pub struct EventManager {
    focused: Option<WidgetId>,
    grabbed: Option<(WidgetId, PointerEvent)>,
    exposed: Option<WidgetId>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The widget holding key focus.
    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.focused
    }

    /// The widget holding the pointer grab.
    pub fn grabbed_widget(&self) -> Option<WidgetId> {
        self.grabbed.map(|(id, _)| id)
    }

    /// The widget the pointer was last over.
    pub fn exposed_widget(&self) -> Option<WidgetId> {
        self.exposed
    }

    /// Move key focus to a widget. Returns false when the widget cannot
    /// take focus or already has it.
    ///
    /// A focus change also releases the pointer grab: a grab is a gesture
    /// in progress, and focus moving elsewhere ends the gesture.
    pub fn set_focused_widget(
        &mut self,
        tree: &mut WidgetTree,
        queue: &mut RepaintQueue,
        id: WidgetId,
    ) -> bool {
        if self.focused == Some(id) {
            return false;
        }
        if !tree.accepts_key_input(id) {
            return false;
        }
        self.drop_focus(tree, queue);
        self.release_grabbed_widget(tree, queue);

        self.focused = Some(id);
        if let Some(node) = tree.node_mut(id) {
            node.state.focused = true;
        }
        trace!(target: targets::DISPATCH, ?id, "focus in");
        let mut behavior = tree.take_behavior(id);
        behavior.focus_in(&mut EventContext {
            tree: &mut *tree,
            events: &mut *self,
            queue: &mut *queue,
            widget: id,
        });
        tree.put_behavior(id, behavior);
        true
    }

    /// Drop key focus entirely.
    pub fn clear_focus(&mut self, tree: &mut WidgetTree, queue: &mut RepaintQueue) {
        self.drop_focus(tree, queue);
        self.release_grabbed_widget(tree, queue);
    }

    fn drop_focus(&mut self, tree: &mut WidgetTree, queue: &mut RepaintQueue) {
        let Some(old) = self.focused.take() else { return };
        if let Some(node) = tree.node_mut(old) {
            node.state.focused = false;
        } else {
            return;
        }
        trace!(target: targets::DISPATCH, id = ?old, "focus out");
        let mut behavior = tree.take_behavior(old);
        behavior.focus_out(&mut EventContext {
            tree: &mut *tree,
            events: &mut *self,
            queue: &mut *queue,
            widget: old,
        });
        tree.put_behavior(old, behavior);
    }

    /// Grab the pointer for a widget. Subsequent pointer events are routed
    /// to it regardless of position until the grab is released.
    pub fn set_grabbed_widget(
        &mut self,
        tree: &mut WidgetTree,
        queue: &mut RepaintQueue,
        id: WidgetId,
        event: &PointerEvent,
    ) {
        if self.grabbed_widget() == Some(id) {
            return;
        }
        self.release_grabbed_widget(tree, queue);
        self.grabbed = Some((id, *event));
        trace!(target: targets::DISPATCH, ?id, "pointer grab");
        let mut behavior = tree.take_behavior(id);
        behavior.pointer_grab(
            &mut EventContext {
                tree: &mut *tree,
                events: &mut *self,
                queue: &mut *queue,
                widget: id,
            },
            event,
        );
        tree.put_behavior(id, behavior);
    }

    /// Release the pointer grab, notifying the holder.
    pub fn release_grabbed_widget(&mut self, tree: &mut WidgetTree, queue: &mut RepaintQueue) {
        let Some((old, event)) = self.grabbed.take() else { return };
        if !tree.contains(old) {
            return;
        }
        trace!(target: targets::DISPATCH, id = ?old, "pointer release");
        let mut behavior = tree.take_behavior(old);
        behavior.pointer_release(
            &mut EventContext {
                tree: &mut *tree,
                events: &mut *self,
                queue: &mut *queue,
                widget: old,
            },
            &event,
        );
        tree.put_behavior(old, behavior);
    }

    /// Record which widget the pointer is over, firing leave/enter hooks on
    /// the crossing.
    pub fn set_exposed_widget(
        &mut self,
        tree: &mut WidgetTree,
        queue: &mut RepaintQueue,
        id: Option<WidgetId>,
        event: &PointerEvent,
    ) {
        if self.exposed == id {
            return;
        }
        if let Some(old) = self.exposed.take() {
            if let Some(node) = tree.node_mut(old) {
                node.state.exposed = false;
                let mut behavior = tree.take_behavior(old);
                behavior.leave(
                    &mut EventContext {
                        tree: &mut *tree,
                        events: &mut *self,
                        queue: &mut *queue,
                        widget: old,
                    },
                    event,
                );
                tree.put_behavior(old, behavior);
            }
        }
        self.exposed = id;
        if let Some(new) = id {
            if let Some(node) = tree.node_mut(new) {
                node.state.exposed = true;
                let mut behavior = tree.take_behavior(new);
                behavior.enter(
                    &mut EventContext {
                        tree: &mut *tree,
                        events: &mut *self,
                        queue: &mut *queue,
                        widget: new,
                    },
                    event,
                );
                tree.put_behavior(new, behavior);
            }
        }
    }

    /// Move focus along the focused widget's neighbour links. Skips
    /// widgets that cannot take focus; stops after a full cycle.
    pub fn select_neighbour(
        &mut self,
        tree: &mut WidgetTree,
        queue: &mut RepaintQueue,
        direction: Direction,
    ) -> bool {
        let Some(start) = self.focused else { return false };
        let mut current = tree.neighbour(start, direction);
        let mut hops = 0;
        while let Some(candidate) = current {
            if candidate == start || hops > tree.len() {
                return false;
            }
            if tree.accepts_key_input(candidate) {
                return self.set_focused_widget(tree, queue, candidate);
            }
            current = tree.neighbour(candidate, direction);
            hops += 1;
        }
        false
    }

    /// Drop references to widgets that no longer exist. Called after
    /// subtree removal; dead widgets get no farewell hooks.
    pub fn prune(&mut self, tree: &WidgetTree) {
        if self.focused.is_some_and(|id| !tree.contains(id)) {
            self.focused = None;
        }
        if self.grabbed.is_some_and(|(id, _)| !tree.contains(id)) {
            self.grabbed = None;
        }
        if self.exposed.is_some_and(|id| !tree.contains(id)) {
            self.exposed = None;
        }
    }
}
