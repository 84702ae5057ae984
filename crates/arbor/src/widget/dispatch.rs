//! Recursive input routing over the widget tree.
//!
//! Pointer events walk the tree top-down. A widget is considered when it
//! is visible and either holds the pointer grab or contains the event
//! position; its children get first refusal in front-to-back z-order, and
//! only if none of them claims the event does the widget itself consume
//! it. Key events skip the walk entirely: the per-window focus decides the
//! target and dispatch only checks that the widget still takes key input.

use tracing::trace;

use crate::logging::targets;

use super::compose::RepaintQueue;
use super::event_manager::EventManager;
use super::events::{KeyEvent, KeyEventKind, PointerEvent, PointerEventKind};
use super::traits::EventContext;
use super::tree::{WidgetId, WidgetTree};

/// Stateless router; all state lives in the tree and the [`EventManager`].
pub struct EventRouter;

impl EventRouter {
    /// Offer a pointer event to a widget subtree. Returns true when some
    /// widget consumed it.
    pub fn consume_pointer_event(
        tree: &mut WidgetTree,
        events: &mut EventManager,
        queue: &mut RepaintQueue,
        id: WidgetId,
        event: &PointerEvent,
    ) -> bool {
        if !tree.visible(id) {
            return false;
        }
        let grabbed_here = events.grabbed_widget() == Some(id);
        if !grabbed_here && !tree.frame_geometry(id).contains_edge(event.position) {
            return false;
        }
        if !tree.enabled(id) {
            return false;
        }

        let input = tree.input_method(id);
        let dragging = input.tracking
            && event.kind == PointerEventKind::Motion
            && event.buttons.left;

        if dragging {
            // A tracking widget under a held button starts a drag gesture:
            // it takes the grab and the event never reaches its children.
            if !tree.state(id).pressed {
                if let Some(node) = tree.node_mut(id) {
                    node.state.pressed = true;
                }
                events.set_grabbed_widget(tree, queue, id, event);
            }
        } else if input.tracking && event.kind == PointerEventKind::Wheel {
            trace!(target: targets::DISPATCH, ?id, "wheel (tracking)");
            Self::with_behavior(tree, events, queue, id, |b, ctx| b.pointer_wheel(ctx, event));
            return true;
        } else {
            // Children get first refusal, front-most first.
            let children = tree.children(id).to_vec();
            for child in children.into_iter().rev() {
                if Self::consume_pointer_event(tree, events, queue, child, event) {
                    return true;
                }
            }
        }

        if !input.pointer {
            return false;
        }

        match event.kind {
            PointerEventKind::ButtonDown => {
                trace!(target: targets::DISPATCH, ?id, "button down");
                if let Some(node) = tree.node_mut(id) {
                    node.state.pressed = true;
                }
                events.set_focused_widget(tree, queue, id);
                Self::with_behavior(tree, events, queue, id, |b, ctx| {
                    b.pointer_button_down(ctx, event)
                });
            }
            PointerEventKind::ButtonUp => {
                trace!(target: targets::DISPATCH, ?id, "button up");
                if let Some(node) = tree.node_mut(id) {
                    node.state.pressed = false;
                }
                Self::with_behavior(tree, events, queue, id, |b, ctx| {
                    b.pointer_button_up(ctx, event)
                });
                // The gesture is over once the button comes up on the
                // widget that held it.
                if events.grabbed_widget() == Some(id) {
                    events.release_grabbed_widget(tree, queue);
                }
            }
            PointerEventKind::Wheel => {
                events.set_focused_widget(tree, queue, id);
                Self::with_behavior(tree, events, queue, id, |b, ctx| b.pointer_wheel(ctx, event));
            }
            PointerEventKind::Motion => {
                events.set_exposed_widget(tree, queue, Some(id), event);
                if input.tracking {
                    // A pressed tracking widget owns the gesture: keep the
                    // grab alive so motion outside the frame still arrives.
                    if tree.state(id).pressed {
                        events.set_grabbed_widget(tree, queue, id, event);
                    }
                    Self::with_behavior(tree, events, queue, id, |b, ctx| {
                        b.pointer_motion(ctx, event)
                    });
                }
            }
        }
        true
    }

    /// Deliver a key event to a widget. Returns false when the widget no
    /// longer takes key input, so the caller can drop stale focus.
    pub fn consume_key_event(
        tree: &mut WidgetTree,
        events: &mut EventManager,
        queue: &mut RepaintQueue,
        id: WidgetId,
        event: &KeyEvent,
    ) -> bool {
        if !tree.accepts_key_input(id) {
            return false;
        }
        trace!(target: targets::DISPATCH, ?id, kind = ?event.kind, "key event");
        match event.kind {
            KeyEventKind::Down => {
                Self::with_behavior(tree, events, queue, id, |b, ctx| b.key_down(ctx, event));
            }
            KeyEventKind::Up => {
                Self::with_behavior(tree, events, queue, id, |b, ctx| b.key_up(ctx, event));
            }
        }
        true
    }

    fn with_behavior(
        tree: &mut WidgetTree,
        events: &mut EventManager,
        queue: &mut RepaintQueue,
        id: WidgetId,
        f: impl FnOnce(&mut dyn crate::widget::traits::Widget, &mut EventContext<'_>),
    ) {
        let mut behavior = tree.take_behavior(id);
        f(
            behavior.as_mut(),
            &mut EventContext {
                tree: &mut *tree,
                events: &mut *events,
                queue: &mut *queue,
                widget: id,
            },
        );
        tree.put_behavior(id, behavior);
    }
}
