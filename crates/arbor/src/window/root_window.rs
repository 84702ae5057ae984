//! The root window: the surface everything composites into and the entry
//! point for platform input.

use arbor_surface::{Rect, Size, SurfaceBackend};
use tracing::{debug, info};

use crate::logging::targets;
use crate::style::{DefaultStyle, StyleProvider};
use crate::widget::{
    Composer, ComposeContext, Direction, EventManager, EventRouter, InputMethod, Key, KeyEvent,
    KeyEventKind, PointerEvent, PointerEventKind, RepaintKind, RepaintQueue, Widget, WidgetId,
    WidgetTree,
};

/// Behavior of the root widget itself: paint the window background so
/// children always draw onto a defined canvas.
struct WindowBackground;

impl Widget for WindowBackground {
    fn kind(&self) -> &'static str {
        "root-window"
    }

    fn compose(&mut self, ctx: &mut ComposeContext<'_>) {
        let background = ctx.style.background();
        ctx.fill(ctx.damage, background);
    }
}

/// A top-level window: one widget tree, one backend surface tree, one set
/// of input singletons.
///
/// The root widget owns an independent surface sized to the window; every
/// descendant without its own surface ultimately composites into it.
pub struct RootWindow<B: SurfaceBackend> {
    tree: WidgetTree,
    events: EventManager,
    queue: RepaintQueue,
    backend: B,
    style: Box<dyn StyleProvider>,
    root: WidgetId,
}

impl<B: SurfaceBackend> RootWindow<B> {
    /// Create a window of the given size over a backend.
    ///
    /// Nothing is allocated until the first paint.
    pub fn new(backend: B, size: Size) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.create_widget(Box::new(WindowBackground));
        tree.set_has_own_surface(root, true);
        tree.set_input_method(root, InputMethod::NONE);
        tree.resize(root, size.width, size.height);
        if let Some(node) = tree.node_mut(root) {
            node.root_window = Some(root);
        }
        info!(target: targets::WINDOW, ?size, "created root window");
        Self {
            tree,
            events: EventManager::new(),
            queue: RepaintQueue::new(),
            backend,
            style: Box::new(DefaultStyle),
            root,
        }
    }

    /// Swap the style every compose hook sees.
    pub fn set_style(&mut self, style: Box<dyn StyleProvider>) {
        self.style = style;
    }

    /// The root widget id.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The widget holding key focus.
    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.events.focused_widget()
    }

    /// The widget holding the pointer grab.
    pub fn grabbed_widget(&self) -> Option<WidgetId> {
        self.events.grabbed_widget()
    }

    /// The widget the pointer was last over.
    pub fn exposed_widget(&self) -> Option<WidgetId> {
        self.events.exposed_widget()
    }

    /// Attach a widget directly under the root.
    pub fn add_child(&mut self, child: WidgetId) -> bool {
        self.tree.add_child(self.root, child)
    }

    /// Attach a widget under an arbitrary parent in this window.
    pub fn add_child_to(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        self.tree.add_child(parent, child)
    }

    /// Detach and destroy a direct child of the root with its subtree.
    pub fn remove_child(&mut self, child: WidgetId) -> bool {
        self.remove_child_from(self.root, child)
    }

    /// Detach and destroy a subtree anywhere in this window.
    pub fn remove_child_from(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        let removed = self.tree.remove_child(parent, child, &mut self.backend);
        if removed {
            self.events.prune(&self.tree);
        }
        removed
    }

    /// Enable or disable a widget, redrawing it so its look reflects the
    /// change. A disabled widget loses focus and grab.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        if !self.tree.set_enabled(id, enabled) {
            return;
        }
        if !enabled {
            if self.events.focused_widget() == Some(id) {
                self.events.clear_focus(&mut self.tree, &mut self.queue);
            }
            if self.events.grabbed_widget() == Some(id) {
                self.events
                    .release_grabbed_widget(&mut self.tree, &mut self.queue);
            }
        }
        Composer::update(&mut self.tree, &mut self.backend, self.style.as_ref(), id);
        self.process_repaints();
    }

    /// Show or hide a widget. Layout reruns for the affected container and
    /// the vacated or newly covered region is redrawn.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if !self.tree.set_visible(id, visible) {
            return;
        }
        self.tree.do_layout(id);
        // Redraw the parent region: a hidden widget cannot paint its own
        // absence.
        let target = self.tree.parent(id).unwrap_or(id);
        Composer::update(&mut self.tree, &mut self.backend, self.style.as_ref(), target);
        self.process_repaints();
    }

    /// Give a widget key focus.
    pub fn set_focus(&mut self, id: WidgetId) -> bool {
        let changed = self
            .events
            .set_focused_widget(&mut self.tree, &mut self.queue, id);
        self.process_repaints();
        changed
    }

    /// Drop key focus.
    pub fn clear_focus(&mut self) {
        self.events.clear_focus(&mut self.tree, &mut self.queue);
        self.process_repaints();
    }

    /// Move focus along neighbour links.
    pub fn select_neighbour(&mut self, direction: Direction) -> bool {
        let moved = self
            .events
            .select_neighbour(&mut self.tree, &mut self.queue, direction);
        self.process_repaints();
        moved
    }

    /// Paint the whole window from scratch and present it.
    pub fn paint(&mut self) {
        debug!(target: targets::WINDOW, "full paint");
        Composer::update(
            &mut self.tree,
            &mut self.backend,
            self.style.as_ref(),
            self.root,
        );
    }

    /// Run the damage cycle for one widget.
    pub fn update(&mut self, id: WidgetId) {
        Composer::update(&mut self.tree, &mut self.backend, self.style.as_ref(), id);
    }

    /// Redraw one widget without clearing.
    pub fn repaint(&mut self, id: WidgetId) {
        Composer::repaint(&mut self.tree, &mut self.backend, self.style.as_ref(), id);
    }

    /// Route a pointer event into the tree. Returns true when a widget
    /// consumed it.
    ///
    /// A live pointer grab short-circuits the walk: the grabbed widget
    /// sees the event first wherever the pointer is.
    pub fn consume_pointer_event(&mut self, event: PointerEvent) -> bool {
        let consumed = if let Some(grabbed) = self.events.grabbed_widget() {
            EventRouter::consume_pointer_event(
                &mut self.tree,
                &mut self.events,
                &mut self.queue,
                grabbed,
                &event,
            )
        } else {
            EventRouter::consume_pointer_event(
                &mut self.tree,
                &mut self.events,
                &mut self.queue,
                self.root,
                &event,
            )
        };
        if !consumed && event.kind == PointerEventKind::Motion {
            // The pointer moved off every widget.
            self.events
                .set_exposed_widget(&mut self.tree, &mut self.queue, None, &event);
        }
        self.process_repaints();
        consumed
    }

    /// Route a key event to the focused widget. Arrow keys that the
    /// focused widget does not exist to consume fall back to neighbour
    /// navigation.
    pub fn consume_key_event(&mut self, event: KeyEvent) -> bool {
        let consumed = match self.events.focused_widget() {
            Some(focused) => EventRouter::consume_key_event(
                &mut self.tree,
                &mut self.events,
                &mut self.queue,
                focused,
                &event,
            ),
            None => false,
        };
        let consumed = if !consumed && event.kind == KeyEventKind::Down {
            let direction = match event.key {
                Key::Up => Some(Direction::Up),
                Key::Down => Some(Direction::Down),
                Key::Left => Some(Direction::Left),
                Key::Right => Some(Direction::Right),
                _ => None,
            };
            match direction {
                Some(direction) => {
                    self.events
                        .select_neighbour(&mut self.tree, &mut self.queue, direction)
                }
                None => false,
            }
        } else {
            consumed
        };
        self.process_repaints();
        consumed
    }

    /// Drain redraw requests queued by hooks during dispatch.
    fn process_repaints(&mut self) {
        loop {
            let requests = self.queue.drain();
            if requests.is_empty() {
                return;
            }
            for (id, kind) in requests {
                if !self.tree.contains(id) {
                    continue;
                }
                match kind {
                    RepaintKind::Update => Composer::update(
                        &mut self.tree,
                        &mut self.backend,
                        self.style.as_ref(),
                        id,
                    ),
                    RepaintKind::Repaint => Composer::repaint(
                        &mut self.tree,
                        &mut self.backend,
                        self.style.as_ref(),
                        id,
                    ),
                }
            }
        }
    }

    /// Window geometry helper: the root widget's rectangle.
    pub fn bounds(&self) -> Rect {
        self.tree.frame_geometry(self.root)
    }

    /// Resize the window. Children relayout on the next paint of whoever
    /// manages them; the whole window is repainted.
    pub fn resize(&mut self, size: Size) {
        self.tree.resize(self.root, size.width, size.height);
        self.tree.do_layout(self.root);
        self.paint();
    }
}
