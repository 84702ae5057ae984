//! The behavior seam: what a widget *does*, separate from what the tree
//! stores about it.
//!
//! Every hook has a no-op default, so a behavior implements only what it
//! reacts to. Hooks take a context instead of the raw tree so a behavior
//! can request repaints, move focus, or grab the pointer without knowing
//! how those are wired.

use arbor_surface::{Rect, Size, SurfaceBackend, SurfaceId};

use crate::style::StyleProvider;

use super::compose::RepaintQueue;
use super::event_manager::EventManager;
use super::events::{KeyEvent, PointerEvent};
use super::tree::{WidgetId, WidgetTree};

/// Drawing context handed to [`Widget::compose`].
pub struct ComposeContext<'a> {
    pub backend: &'a mut dyn SurfaceBackend,
    /// The widget's bound surface.
    pub surface: SurfaceId,
    /// The widget's full rectangle in surface-local coordinates.
    pub area: Rect,
    /// The region that actually needs drawing, surface-local. Always
    /// inside `area`.
    pub damage: Rect,
    pub style: &'a dyn StyleProvider,
}

impl ComposeContext<'_> {
    /// Fill a surface-local rectangle with a solid pixel value.
    pub fn fill(&mut self, rect: Rect, pixel: u32) {
        self.backend.fill(self.surface, rect, pixel);
    }
}

/// Context handed to input and focus hooks.
///
/// Holds the tree without the widget's own behavior in it; the behavior is
/// temporarily taken out while its hook runs, so mutating the tree from a
/// hook is safe, including operations that reach the hooked widget itself.
pub struct EventContext<'a> {
    pub tree: &'a mut WidgetTree,
    pub events: &'a mut EventManager,
    pub queue: &'a mut RepaintQueue,
    /// The widget the hook fires on.
    pub widget: WidgetId,
}

impl EventContext<'_> {
    /// Queue a clearing redraw of this widget for the end of dispatch.
    pub fn request_update(&mut self) {
        self.queue.request_update(self.widget);
    }

    /// Queue a non-clearing redraw of this widget for the end of dispatch.
    pub fn request_repaint(&mut self) {
        self.queue.request_repaint(self.widget);
    }

    /// Take key focus.
    pub fn focus(&mut self) -> bool {
        self.events
            .set_focused_widget(self.tree, self.queue, self.widget)
    }

    /// Grab the pointer so every following pointer event lands here until
    /// released.
    pub fn grab_pointer(&mut self, event: &PointerEvent) {
        self.events
            .set_grabbed_widget(self.tree, self.queue, self.widget, event);
    }

    /// Release the pointer grab if this widget holds it.
    pub fn release_pointer(&mut self) {
        if self.events.grabbed_widget() == Some(self.widget) {
            self.events.release_grabbed_widget(self.tree, self.queue);
        }
    }
}

/// Behavior of a widget. One boxed instance lives in each tree node.
#[allow(unused_variables)]
pub trait Widget {
    /// Short noun for debug output, e.g. `"button"`.
    fn kind(&self) -> &'static str {
        "widget"
    }

    /// Draw into the widget's surface. `ctx.damage` is the only region
    /// that must be drawn.
    fn compose(&mut self, ctx: &mut ComposeContext<'_>) {}

    fn pointer_button_down(&mut self, ctx: &mut EventContext<'_>, event: &PointerEvent) {}

    fn pointer_button_up(&mut self, ctx: &mut EventContext<'_>, event: &PointerEvent) {}

    fn pointer_motion(&mut self, ctx: &mut EventContext<'_>, event: &PointerEvent) {}

    fn pointer_wheel(&mut self, ctx: &mut EventContext<'_>, event: &PointerEvent) {}

    /// The widget acquired the pointer grab.
    fn pointer_grab(&mut self, ctx: &mut EventContext<'_>, event: &PointerEvent) {}

    /// The widget lost the pointer grab.
    fn pointer_release(&mut self, ctx: &mut EventContext<'_>, event: &PointerEvent) {}

    fn key_down(&mut self, ctx: &mut EventContext<'_>, event: &KeyEvent) {}

    fn key_up(&mut self, ctx: &mut EventContext<'_>, event: &KeyEvent) {}

    fn focus_in(&mut self, ctx: &mut EventContext<'_>) {}

    fn focus_out(&mut self, ctx: &mut EventContext<'_>) {}

    /// The pointer entered the widget.
    fn enter(&mut self, ctx: &mut EventContext<'_>, event: &PointerEvent) {}

    /// The pointer left the widget.
    fn leave(&mut self, ctx: &mut EventContext<'_>, event: &PointerEvent) {}

    /// The size the widget would like, for layout containers.
    fn preferred_size(&self) -> Size {
        Size::ZERO
    }

    /// Height the widget wants at a given width, for wrapping content.
    fn height_for_width(&self, width: i32) -> Option<i32> {
        None
    }

    /// Whether this behavior lays out its children itself.
    fn handles_layout(&self) -> bool {
        false
    }

    /// Position and size the children. Only called when
    /// [`handles_layout`](Widget::handles_layout) returns true.
    fn layout(&mut self, tree: &mut WidgetTree, id: WidgetId) {}
}

/// Behavior with every default: draws nothing, reacts to nothing.
///
/// Also the stand-in left in a node while its real behavior is taken out
/// for a hook call.
pub struct NullWidget;

impl Widget for NullWidget {}
