//! Per-widget data: state flags, surface description, input method.
//!
//! The flag sets are structs of named booleans rather than raw bit masks so
//! each flag reads as what it is at every use site. They are plain values;
//! the tree hands out copies.

use arbor_surface::{Point, Rect, Size};

use super::surface::Surface;
use super::traits::Widget;
use super::tree::WidgetId;

/// Lifecycle and interaction state of a widget.
///
/// `disabled` and `invisible` are the widget's *own* flags; the effective
/// enabled/visible answers come from [`WidgetTree::enabled`] and
/// [`WidgetTree::visible`](super::tree::WidgetTree::visible), which AND in
/// every ancestor.
///
/// [`WidgetTree::enabled`]: super::tree::WidgetTree::enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetState {
    /// The widget does not accept input.
    pub disabled: bool,
    /// The widget is not drawn and receives no input.
    pub invisible: bool,
    /// The widget holds key focus.
    pub focused: bool,
    /// The pointer is currently over the widget.
    pub exposed: bool,
    /// A pointer button went down on the widget and has not been released.
    pub pressed: bool,
}

/// How a widget's backing surface is (or will be) bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceDescription {
    /// The widget owns an independent allocation instead of a subregion
    /// view into an ancestor's surface.
    pub has_own_surface: bool,
    /// Bind directly into the root window's surface rather than the
    /// parent's.
    pub root_surface: bool,
    /// Allocation is pending; the next paint pass will (re)create the
    /// surface.
    pub initialise: bool,
    /// Geometry changed since the surface handle was last synced; the next
    /// paint pass re-binds the handle and clears this.
    pub modified: bool,
}

impl Default for SurfaceDescription {
    fn default() -> Self {
        Self {
            has_own_surface: false,
            root_surface: false,
            initialise: true,
            modified: false,
        }
    }
}

/// Which input classes a widget participates in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputMethod {
    /// Receives pointer button/wheel events.
    pub pointer: bool,
    /// Receives key events when focused.
    pub key: bool,
    /// Receives pointer motion and takes part in grab gestures.
    pub tracking: bool,
}

impl InputMethod {
    /// No input at all (the default).
    pub const NONE: Self = Self {
        pointer: false,
        key: false,
        tracking: false,
    };

    /// Pointer buttons only.
    pub const POINTER: Self = Self {
        pointer: true,
        key: false,
        tracking: false,
    };

    /// Key input only.
    pub const KEY: Self = Self {
        pointer: false,
        key: true,
        tracking: false,
    };

    /// Pointer and key input.
    pub const POINTER_AND_KEY: Self = Self {
        pointer: true,
        key: true,
        tracking: false,
    };

    /// Pointer input with motion tracking (sliders, drag handles).
    pub const POINTER_TRACKING: Self = Self {
        pointer: true,
        key: false,
        tracking: true,
    };

    /// Everything.
    pub const ALL: Self = Self {
        pointer: true,
        key: true,
        tracking: true,
    };
}

/// Layout hint describing how a widget may be resized on one axis.
///
/// Advisory only; the tree clamps against min/max sizes but never enforces
/// constraints itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ResizeConstraint {
    /// Cannot grow or shrink.
    Fixed = 0,
    /// The preferred size is the minimum; the widget can grow.
    Minimum = 1,
    /// The preferred size is the maximum; the widget can shrink.
    Maximum = 2,
    /// Can grow and shrink around the preferred size.
    #[default]
    Preferred = 3,
    /// Actively wants as much space as possible.
    Expanding = 4,
    /// The preferred size is ignored entirely.
    Ignored = 5,
}

impl ResizeConstraint {
    /// Returns true if the constraint allows the widget to grow.
    #[inline]
    pub fn can_grow(self) -> bool {
        !matches!(self, Self::Fixed | Self::Maximum)
    }

    /// Returns true if the constraint allows the widget to shrink.
    #[inline]
    pub fn can_shrink(self) -> bool {
        !matches!(self, Self::Fixed | Self::Minimum)
    }
}

/// Directional neighbour slots for focus navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// A node in the widget tree.
///
/// The tree arena owns every node; nodes refer to each other only by
/// [`WidgetId`], so a node never participates in another node's
/// destruction order.
pub(crate) struct WidgetNode {
    pub(crate) state: WidgetState,
    pub(crate) surface_desc: SurfaceDescription,
    pub(crate) input: InputMethod,

    /// Position relative to the parent's origin.
    pub(crate) surface_geometry: Point,
    /// Absolute rectangle; origin derived from ancestors, size authoritative.
    pub(crate) frame_geometry: Rect,
    pub(crate) min_size: Size,
    /// Zero on an axis means unbounded.
    pub(crate) max_size: Size,
    pub(crate) x_constraint: ResizeConstraint,
    pub(crate) y_constraint: ResizeConstraint,

    /// Up/Down/Left/Right focus neighbours. Back-references, not ownership.
    pub(crate) neighbours: [Option<WidgetId>; 4],
    pub(crate) parent: Option<WidgetId>,
    /// Z-order, back to front. The node owns each child exclusively.
    pub(crate) children: Vec<WidgetId>,
    pub(crate) root_window: Option<WidgetId>,

    pub(crate) surface: Option<Surface>,
    /// Taken out while a hook runs on this widget; a no-op stand-in fills
    /// the slot so re-entrant dispatch stays safe.
    pub(crate) behavior: Box<dyn Widget>,
}

impl WidgetNode {
    pub(crate) fn new(behavior: Box<dyn Widget>) -> Self {
        Self {
            state: WidgetState::default(),
            surface_desc: SurfaceDescription::default(),
            input: InputMethod::NONE,
            surface_geometry: Point::ZERO,
            frame_geometry: Rect::ZERO,
            min_size: Size::ZERO,
            max_size: Size::ZERO,
            x_constraint: ResizeConstraint::default(),
            y_constraint: ResizeConstraint::default(),
            neighbours: [None; 4],
            parent: None,
            children: Vec::new(),
            root_window: None,
            surface: None,
            behavior,
        }
    }
}
