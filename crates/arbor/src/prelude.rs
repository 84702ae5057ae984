//! Prelude module for Arbor.
//!
//! Re-exports the types most widget code touches:
//!
//! ```
//! use arbor::prelude::*;
//! ```

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::{
    ComposeContext, EventContext, NullWidget, Widget, WidgetId, WidgetTree,
};

pub use crate::widget::{Direction, InputMethod, ResizeConstraint, SurfaceDescription, WidgetState};

// ============================================================================
// Events
// ============================================================================

pub use crate::widget::{
    ButtonMask, Key, KeyEvent, KeyEventKind, PointerButton, PointerEvent, PointerEventKind,
};

// ============================================================================
// Windows and Styling
// ============================================================================

pub use crate::style::{DefaultStyle, StyleProvider};
pub use crate::window::RootWindow;

// ============================================================================
// Geometry
// ============================================================================

pub use arbor_surface::{Point, Rect, Size};
