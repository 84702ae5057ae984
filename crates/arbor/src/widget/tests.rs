//! Scenario tests for the widget system: lazy surfaces, damage cycles,
//! dispatch, focus and grab, all driven through a [`RootWindow`] over the
//! software backend.

use std::cell::RefCell;
use std::rc::Rc;

use arbor_surface::{Rect, Size, SoftwareBackend};

use crate::prelude::*;

/// Hook counters shared between a test and the widget it planted.
#[derive(Default)]
struct Counts {
    composed: u32,
    down: u32,
    up: u32,
    motion: u32,
    wheel: u32,
    key_down: u32,
    focus_in: u32,
    focus_out: u32,
    enter: u32,
    leave: u32,
    grab: u32,
    release: u32,
}

/// A widget that counts every hook it receives and fills its damage.
struct Probe {
    counts: Rc<RefCell<Counts>>,
}

impl Widget for Probe {
    fn kind(&self) -> &'static str {
        "probe"
    }

    fn compose(&mut self, ctx: &mut ComposeContext<'_>) {
        self.counts.borrow_mut().composed += 1;
        let color = ctx.style.foreground();
        ctx.fill(ctx.damage, color);
    }

    fn pointer_button_down(&mut self, _ctx: &mut EventContext<'_>, _event: &PointerEvent) {
        self.counts.borrow_mut().down += 1;
    }

    fn pointer_button_up(&mut self, _ctx: &mut EventContext<'_>, _event: &PointerEvent) {
        self.counts.borrow_mut().up += 1;
    }

    fn pointer_motion(&mut self, _ctx: &mut EventContext<'_>, _event: &PointerEvent) {
        self.counts.borrow_mut().motion += 1;
    }

    fn pointer_wheel(&mut self, _ctx: &mut EventContext<'_>, _event: &PointerEvent) {
        self.counts.borrow_mut().wheel += 1;
    }

    fn pointer_grab(&mut self, _ctx: &mut EventContext<'_>, _event: &PointerEvent) {
        self.counts.borrow_mut().grab += 1;
    }

    fn pointer_release(&mut self, _ctx: &mut EventContext<'_>, _event: &PointerEvent) {
        self.counts.borrow_mut().release += 1;
    }

    fn key_down(&mut self, _ctx: &mut EventContext<'_>, _event: &KeyEvent) {
        self.counts.borrow_mut().key_down += 1;
    }

    fn focus_in(&mut self, _ctx: &mut EventContext<'_>) {
        self.counts.borrow_mut().focus_in += 1;
    }

    fn focus_out(&mut self, _ctx: &mut EventContext<'_>) {
        self.counts.borrow_mut().focus_out += 1;
    }

    fn enter(&mut self, _ctx: &mut EventContext<'_>, _event: &PointerEvent) {
        self.counts.borrow_mut().enter += 1;
    }

    fn leave(&mut self, _ctx: &mut EventContext<'_>, _event: &PointerEvent) {
        self.counts.borrow_mut().leave += 1;
    }
}

fn window() -> RootWindow<SoftwareBackend> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    RootWindow::new(SoftwareBackend::new(), Size::new(200, 200))
}

fn probe(
    window: &mut RootWindow<SoftwareBackend>,
    rect: Rect,
    input: InputMethod,
) -> (WidgetId, Rc<RefCell<Counts>>) {
    let counts: Rc<RefCell<Counts>> = Rc::default();
    let id = window
        .tree_mut()
        .create_widget(Box::new(Probe {
            counts: Rc::clone(&counts),
        }));
    window
        .tree_mut()
        .set_geometry(id, rect.x(), rect.y(), rect.width(), rect.height());
    window.tree_mut().set_input_method(id, input);
    window.add_child(id);
    (id, counts)
}

// ---------------------------------------------------------------------
// Surfaces and painting
// ---------------------------------------------------------------------

#[test]
fn surfaces_allocate_lazily_on_first_paint() {
    let mut window = window();
    let (a, _) = probe(&mut window, Rect::new(10, 10, 50, 50), InputMethod::NONE);
    let (_b, _) = probe(&mut window, Rect::new(80, 10, 50, 50), InputMethod::NONE);

    assert_eq!(window.backend().live_surfaces(), 0);
    assert!(window.tree().surface_id(a).is_none());

    window.paint();

    // Root allocation plus two subregion views.
    assert_eq!(window.backend().live_surfaces(), 3);
    assert_eq!(window.backend().stats().allocations, 1);
    assert_eq!(window.backend().stats().subregions, 2);
    assert!(window.tree().surface_id(a).is_some());
}

#[test]
fn own_surface_widget_gets_independent_allocation() {
    let mut window = window();
    let (a, _) = probe(&mut window, Rect::new(10, 10, 50, 50), InputMethod::NONE);
    window.tree_mut().set_has_own_surface(a, true);

    window.paint();
    assert_eq!(window.backend().stats().allocations, 2);
}

#[test]
fn invisible_widget_neither_binds_nor_composes() {
    let mut window = window();
    let (a, counts) = probe(&mut window, Rect::new(10, 10, 50, 50), InputMethod::NONE);
    window.tree_mut().set_visible(a, false);

    window.paint();
    assert!(window.tree().surface_id(a).is_none());
    assert_eq!(counts.borrow().composed, 0);
}

#[test]
fn update_redraws_damaged_widgets_only() {
    let mut window = window();
    let (a, a_counts) = probe(&mut window, Rect::new(10, 10, 50, 50), InputMethod::NONE);
    let (_b, b_counts) = probe(&mut window, Rect::new(100, 100, 50, 50), InputMethod::NONE);
    window.paint();
    assert_eq!(a_counts.borrow().composed, 1);
    assert_eq!(b_counts.borrow().composed, 1);
    let clears = window.backend().stats().clears;

    window.update(a);

    // The damage cycle cleared a's region and recomposed it; the disjoint
    // sibling was untouched.
    assert_eq!(a_counts.borrow().composed, 2);
    assert_eq!(b_counts.borrow().composed, 1);
    assert_eq!(window.backend().stats().clears, clears + 1);
}

#[test]
fn update_presents_the_damaged_region() {
    let mut window = window();
    let (a, _) = probe(&mut window, Rect::new(10, 10, 50, 50), InputMethod::NONE);
    window.paint();
    let flips = window.backend().stats().flips;
    window.update(a);
    assert_eq!(window.backend().stats().flips, flips + 1);
}

#[test]
fn update_on_a_hidden_widget_is_dropped() {
    let mut window = window();
    let (a, counts) = probe(&mut window, Rect::new(10, 10, 50, 50), InputMethod::NONE);
    window.paint();
    // Flip only the flag; the vacated region stays as painted.
    window.tree_mut().set_visible(a, false);
    let clears = window.backend().stats().clears;
    let flips = window.backend().stats().flips;

    window.update(a);

    // No clear, no present: a hidden widget's damage cycle must leave the
    // owning surface untouched.
    assert_eq!(window.backend().stats().clears, clears);
    assert_eq!(window.backend().stats().flips, flips);
    assert_eq!(counts.borrow().composed, 1);
}

#[test]
fn geometry_change_is_pending_until_next_paint() {
    let mut window = window();
    let (a, _) = probe(&mut window, Rect::new(10, 10, 50, 50), InputMethod::NONE);
    window.paint();
    assert!(!window.tree().surface_description(a).modified);

    window.tree_mut().move_to(a, 30, 30);
    assert!(window.tree().surface_description(a).modified);

    window.paint();
    assert!(!window.tree().surface_description(a).modified);
    // The existing subregion was re-bound, not reallocated.
    assert_eq!(window.backend().stats().subregions, 1);
}

#[test]
fn failed_allocation_degrades_to_skipped_paint() {
    let mut window = window();
    let (a, counts) = probe(&mut window, Rect::new(10, 10, 50, 50), InputMethod::NONE);
    window.backend_mut().set_deny_allocations(true);

    window.paint();
    assert_eq!(counts.borrow().composed, 0);
    assert!(window.tree().surface_id(a).is_none());

    window.backend_mut().set_deny_allocations(false);
    window.paint();
    assert_eq!(counts.borrow().composed, 1);
}

// ---------------------------------------------------------------------
// Pointer dispatch
// ---------------------------------------------------------------------

#[test]
fn front_most_overlapping_sibling_wins() {
    let mut window = window();
    let (a, a_counts) = probe(&mut window, Rect::new(10, 10, 40, 40), InputMethod::POINTER);
    let (_b, b_counts) = probe(&mut window, Rect::new(30, 30, 40, 40), InputMethod::POINTER);

    assert!(window.consume_pointer_event(PointerEvent::button_down(35, 35, PointerButton::Left)));
    assert_eq!(a_counts.borrow().down, 0);
    assert_eq!(b_counts.borrow().down, 1);

    let root = window.root();
    window.tree_mut().raise_child_to_front(root, a);
    window.consume_pointer_event(PointerEvent::button_up(35, 35, PointerButton::Left));
    assert!(window.consume_pointer_event(PointerEvent::button_down(35, 35, PointerButton::Left)));
    assert_eq!(a_counts.borrow().down, 1);
    assert_eq!(b_counts.borrow().down, 1);
}

#[test]
fn right_and_bottom_edges_hit() {
    let mut window = window();
    let (_a, counts) = probe(&mut window, Rect::new(10, 10, 20, 20), InputMethod::POINTER);
    assert!(window.consume_pointer_event(PointerEvent::button_down(30, 30, PointerButton::Left)));
    assert_eq!(counts.borrow().down, 1);
    assert!(!window.consume_pointer_event(PointerEvent::button_down(31, 30, PointerButton::Left)));
}

#[test]
fn click_outside_every_widget_is_unconsumed() {
    let mut window = window();
    let (_a, counts) = probe(&mut window, Rect::new(10, 10, 20, 20), InputMethod::POINTER);
    assert!(!window.consume_pointer_event(PointerEvent::button_down(150, 150, PointerButton::Left)));
    assert_eq!(counts.borrow().down, 0);
}

#[test]
fn disabled_widget_receives_no_pointer_input() {
    let mut window = window();
    let (a, counts) = probe(&mut window, Rect::new(10, 10, 20, 20), InputMethod::POINTER);
    window.set_enabled(a, false);
    assert!(!window.consume_pointer_event(PointerEvent::button_down(15, 15, PointerButton::Left)));
    assert_eq!(counts.borrow().down, 0);
}

#[test]
fn button_down_sets_pressed_and_focus_but_not_exposure() {
    let mut window = window();
    let (a, counts) = probe(
        &mut window,
        Rect::new(10, 10, 20, 20),
        InputMethod::POINTER_AND_KEY,
    );
    window.consume_pointer_event(PointerEvent::button_down(15, 15, PointerButton::Left));
    assert!(window.tree().state(a).pressed);
    assert_eq!(window.focused_widget(), Some(a));
    assert_eq!(counts.borrow().focus_in, 1);
    // Only motion marks exposure; a click alone never fires enter.
    assert!(!window.tree().state(a).exposed);
    assert_eq!(counts.borrow().enter, 0);

    window.consume_pointer_event(PointerEvent::button_up(15, 15, PointerButton::Left));
    assert!(!window.tree().state(a).pressed);
    assert_eq!(counts.borrow().up, 1);

    window.consume_pointer_event(PointerEvent::motion(15, 15, ButtonMask::NONE));
    assert!(window.tree().state(a).exposed);
    assert_eq!(counts.borrow().enter, 1);
}

#[test]
fn focus_handover_notifies_old_before_new() {
    let mut window = window();
    let (a, a_counts) = probe(
        &mut window,
        Rect::new(10, 10, 20, 20),
        InputMethod::POINTER_AND_KEY,
    );
    let (b, b_counts) = probe(
        &mut window,
        Rect::new(50, 10, 20, 20),
        InputMethod::POINTER_AND_KEY,
    );

    window.set_focus(a);
    assert_eq!(a_counts.borrow().focus_in, 1);
    window.set_focus(b);
    assert_eq!(a_counts.borrow().focus_out, 1);
    assert_eq!(b_counts.borrow().focus_in, 1);
    assert!(!window.tree().state(a).focused);
    assert!(window.tree().state(b).focused);

    // Re-requesting the current focus is a no-op.
    assert!(!window.set_focus(b));
    assert_eq!(b_counts.borrow().focus_in, 1);
}

#[test]
fn enter_and_leave_fire_on_crossing() {
    let mut window = window();
    let (_a, a_counts) = probe(&mut window, Rect::new(10, 10, 20, 20), InputMethod::POINTER);
    let (_b, b_counts) = probe(&mut window, Rect::new(50, 10, 20, 20), InputMethod::POINTER);

    window.consume_pointer_event(PointerEvent::motion(15, 15, ButtonMask::NONE));
    assert_eq!(a_counts.borrow().enter, 1);

    window.consume_pointer_event(PointerEvent::motion(55, 15, ButtonMask::NONE));
    assert_eq!(a_counts.borrow().leave, 1);
    assert_eq!(b_counts.borrow().enter, 1);

    // Off every widget: exposure clears.
    window.consume_pointer_event(PointerEvent::motion(150, 150, ButtonMask::NONE));
    assert_eq!(b_counts.borrow().leave, 1);
    assert_eq!(window.exposed_widget(), None);
}

// ---------------------------------------------------------------------
// Grab gestures
// ---------------------------------------------------------------------

#[test]
fn drag_grabs_and_routes_outside_motion_to_the_grabber() {
    let mut window = window();
    let (slider, s_counts) = probe(
        &mut window,
        Rect::new(10, 10, 40, 20),
        InputMethod::POINTER_TRACKING,
    );
    let (_other, o_counts) = probe(&mut window, Rect::new(100, 100, 40, 40), InputMethod::POINTER);

    // Drag starts inside the slider.
    window.consume_pointer_event(PointerEvent::motion(20, 15, ButtonMask::LEFT));
    assert_eq!(window.grabbed_widget(), Some(slider));
    assert_eq!(s_counts.borrow().grab, 1);
    assert_eq!(s_counts.borrow().motion, 1);
    assert!(window.tree().state(slider).pressed);

    // Motion far outside, even over another widget, still lands on the
    // grabber.
    window.consume_pointer_event(PointerEvent::motion(120, 120, ButtonMask::LEFT));
    assert_eq!(s_counts.borrow().motion, 2);
    assert_eq!(o_counts.borrow().motion, 0);

    // Releasing the button over the other widget ends the gesture on the
    // slider; the other widget never hears about it.
    window.consume_pointer_event(PointerEvent::button_up(120, 120, PointerButton::Left));
    assert_eq!(s_counts.borrow().up, 1);
    assert_eq!(s_counts.borrow().release, 1);
    assert_eq!(o_counts.borrow().up, 0);
    assert_eq!(window.grabbed_widget(), None);
    assert!(!window.tree().state(slider).pressed);
}

#[test]
fn press_then_drag_installs_the_grab() {
    let mut window = window();
    let (slider, s_counts) = probe(
        &mut window,
        Rect::new(10, 10, 40, 20),
        InputMethod::POINTER_TRACKING,
    );
    let (_other, o_counts) = probe(&mut window, Rect::new(100, 100, 40, 40), InputMethod::POINTER);

    // A click marks the slider pressed but does not grab yet.
    window.consume_pointer_event(PointerEvent::button_down(20, 15, PointerButton::Left));
    assert!(window.tree().state(slider).pressed);
    assert_eq!(window.grabbed_widget(), None);

    // The first drag motion inside the frame takes the grab.
    window.consume_pointer_event(PointerEvent::motion(25, 15, ButtonMask::LEFT));
    assert_eq!(window.grabbed_widget(), Some(slider));
    assert_eq!(s_counts.borrow().grab, 1);
    assert_eq!(s_counts.borrow().motion, 1);

    // From here the gesture follows the pointer anywhere.
    window.consume_pointer_event(PointerEvent::motion(120, 120, ButtonMask::LEFT));
    assert_eq!(s_counts.borrow().motion, 2);
    assert_eq!(o_counts.borrow().motion, 0);

    window.consume_pointer_event(PointerEvent::button_up(120, 120, PointerButton::Left));
    assert_eq!(window.grabbed_widget(), None);
    assert!(!window.tree().state(slider).pressed);
}

#[test]
fn focus_change_releases_the_grab() {
    let mut window = window();
    let (slider, s_counts) = probe(
        &mut window,
        Rect::new(10, 10, 40, 20),
        InputMethod::POINTER_TRACKING,
    );
    let (editor, _) = probe(
        &mut window,
        Rect::new(100, 100, 40, 40),
        InputMethod::POINTER_AND_KEY,
    );

    window.consume_pointer_event(PointerEvent::motion(20, 15, ButtonMask::LEFT));
    assert_eq!(window.grabbed_widget(), Some(slider));

    window.set_focus(editor);
    assert_eq!(window.grabbed_widget(), None);
    assert_eq!(s_counts.borrow().release, 1);
}

#[test]
fn tracking_widget_consumes_wheel_before_children() {
    let mut window = window();
    let (scroller, counts) = probe(
        &mut window,
        Rect::new(10, 10, 100, 100),
        InputMethod::POINTER_TRACKING,
    );
    let inner_counts: Rc<RefCell<Counts>> = Rc::default();
    let inner = window
        .tree_mut()
        .create_widget(Box::new(Probe {
            counts: Rc::clone(&inner_counts),
        }));
    window.tree_mut().set_geometry(inner, 10, 10, 80, 80);
    window.tree_mut().set_input_method(inner, InputMethod::POINTER);
    window.add_child_to(scroller, inner);

    window.consume_pointer_event(PointerEvent::wheel(40, 40, -1));
    assert_eq!(counts.borrow().wheel, 1);
    assert_eq!(inner_counts.borrow().wheel, 0);
}

// ---------------------------------------------------------------------
// Key dispatch and navigation
// ---------------------------------------------------------------------

#[test]
fn key_events_reach_the_focused_widget() {
    let mut window = window();
    let (editor, counts) = probe(
        &mut window,
        Rect::new(10, 10, 40, 20),
        InputMethod::POINTER_AND_KEY,
    );
    assert!(!window.consume_key_event(KeyEvent::down(Key::Char('a'))));
    window.set_focus(editor);
    assert!(window.consume_key_event(KeyEvent::down(Key::Char('a'))));
    assert_eq!(counts.borrow().key_down, 1);
}

#[test]
fn neighbour_navigation_moves_focus() {
    let mut window = window();
    let (a, _) = probe(&mut window, Rect::new(10, 10, 20, 20), InputMethod::KEY);
    let (b, b_counts) = probe(&mut window, Rect::new(50, 10, 20, 20), InputMethod::KEY);
    window.tree_mut().set_neighbour(a, Direction::Right, Some(b));

    window.set_focus(a);
    assert!(window.select_neighbour(Direction::Right));
    assert_eq!(window.focused_widget(), Some(b));
    assert_eq!(b_counts.borrow().focus_in, 1);
    // No link back the other way.
    assert!(!window.select_neighbour(Direction::Right));
}

#[test]
fn navigation_skips_unfocusable_neighbours() {
    let mut window = window();
    let (a, _) = probe(&mut window, Rect::new(10, 10, 20, 20), InputMethod::KEY);
    let (b, _) = probe(&mut window, Rect::new(50, 10, 20, 20), InputMethod::KEY);
    let (c, _) = probe(&mut window, Rect::new(90, 10, 20, 20), InputMethod::KEY);
    window.tree_mut().set_neighbour(a, Direction::Right, Some(b));
    window.tree_mut().set_neighbour(b, Direction::Right, Some(c));
    window.tree_mut().set_visible(b, false);

    window.set_focus(a);
    assert!(window.select_neighbour(Direction::Right));
    assert_eq!(window.focused_widget(), Some(c));
}

#[test]
fn arrow_keys_fall_back_to_navigation_without_focus_target() {
    let mut window = window();
    let (a, _) = probe(&mut window, Rect::new(10, 10, 20, 20), InputMethod::KEY);
    let (b, _) = probe(&mut window, Rect::new(50, 10, 20, 20), InputMethod::KEY);
    window.tree_mut().set_neighbour(a, Direction::Right, Some(b));
    window.set_focus(a);

    // The focused widget stops taking key input, so the key walks the
    // neighbour links instead.
    window.tree_mut().set_enabled(a, false);
    assert!(window.consume_key_event(KeyEvent::down(Key::Right)));
    assert_eq!(window.focused_widget(), Some(b));
}

// ---------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------

#[test]
fn removal_destroys_surfaces_and_prunes_input_state() {
    let mut window = window();
    let (a, _) = probe(
        &mut window,
        Rect::new(10, 10, 40, 40),
        InputMethod::POINTER_AND_KEY,
    );
    window.paint();
    window.set_focus(a);
    assert_eq!(window.backend().live_surfaces(), 2);

    assert!(window.remove_child(a));
    assert!(!window.tree().contains(a));
    assert_eq!(window.backend().live_surfaces(), 1);
    assert_eq!(window.focused_widget(), None);
}

#[test]
fn removal_takes_the_whole_subtree() {
    let mut window = window();
    let (panel, _) = probe(&mut window, Rect::new(10, 10, 100, 100), InputMethod::NONE);
    let child = window
        .tree_mut()
        .create_widget(Box::new(NullWidget));
    window.tree_mut().set_geometry(child, 5, 5, 20, 20);
    window.add_child_to(panel, child);
    window.paint();
    assert_eq!(window.backend().live_surfaces(), 3);

    window.remove_child(panel);
    assert!(!window.tree().contains(panel));
    assert!(!window.tree().contains(child));
    assert_eq!(window.backend().live_surfaces(), 1);
}

#[test]
fn removing_a_non_member_leaves_the_child_list_alone() {
    let mut window = window();
    let (panel, _) = probe(&mut window, Rect::new(10, 10, 100, 100), InputMethod::NONE);
    let (stranger, _) = probe(&mut window, Rect::new(120, 10, 40, 40), InputMethod::NONE);

    assert!(!window.remove_child_from(panel, stranger));
    assert!(window.tree().contains(stranger));
    assert_eq!(window.tree().children(window.root()).len(), 2);
}

#[test]
fn cross_root_reparent_rearms_surface_initialisation() {
    let mut tree = WidgetTree::new();
    let mut backend = SoftwareBackend::new();
    let style = DefaultStyle;

    let make_root = |tree: &mut WidgetTree| {
        let root = tree.create_widget(Box::new(NullWidget));
        tree.set_has_own_surface(root, true);
        tree.resize(root, 100, 100);
        if let Some(node) = tree.node_mut(root) {
            node.root_window = Some(root);
        }
        root
    };
    let root_a = make_root(&mut tree);
    let root_b = make_root(&mut tree);
    let panel = tree.create_widget(Box::new(NullWidget));
    let child = tree.create_widget(Box::new(NullWidget));
    tree.add_child(root_a, panel);
    tree.add_child(panel, child);
    tree.set_geometry(panel, 10, 10, 50, 50);
    tree.set_geometry(child, 5, 5, 20, 20);

    crate::widget::Composer::update(&mut tree, &mut backend, &style, root_a);
    assert!(!tree.surface_description(panel).initialise);
    assert!(!tree.surface_description(child).initialise);
    let live = backend.live_surfaces();

    assert!(tree.set_parent(panel, root_b, &mut backend));
    assert_eq!(tree.root_window(panel), Some(root_b));
    assert_eq!(tree.root_window(child), Some(root_b));
    assert!(tree.surface_description(panel).initialise);
    assert!(tree.surface_description(child).initialise);
    // The stale views into root A's backing store are gone.
    assert_eq!(backend.live_surfaces(), live - 2);
}

#[test]
fn container_frame_survives_child_moves() {
    let mut window = RootWindow::new(SoftwareBackend::new(), Size::new(800, 480));
    let container = window.tree_mut().create_widget(Box::new(NullWidget));
    window.tree_mut().set_geometry(container, 0, 0, 800, 480);
    window.add_child(container);
    let button = window.tree_mut().create_widget(Box::new(NullWidget));
    window.tree_mut().set_geometry(button, 10, 10, 100, 30);
    window.add_child_to(container, button);
    window.paint();

    window.tree_mut().move_to(button, 20, 10);
    assert_eq!(
        window.tree().frame_geometry(button),
        Rect::new(20, 10, 100, 30)
    );
    assert_eq!(
        window.tree().frame_geometry(container),
        Rect::new(0, 0, 800, 480)
    );
    assert!(window.tree().surface_description(button).modified);
    window.paint();
    assert!(!window.tree().surface_description(button).modified);
}

#[test]
fn hiding_a_widget_redraws_the_vacated_region() {
    let mut window = window();
    let (a, counts) = probe(&mut window, Rect::new(10, 10, 40, 40), InputMethod::NONE);
    window.paint();
    assert_eq!(counts.borrow().composed, 1);

    window.set_visible(a, false);
    // A later full paint must not compose the hidden widget again.
    window.paint();
    assert_eq!(counts.borrow().composed, 1);
}
