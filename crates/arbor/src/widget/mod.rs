//! The widget system: tree, surfaces, input dispatch, paint.
//!
//! The pieces fit together like this:
//!
//! - [`WidgetTree`] is the arena every widget lives in. Structure,
//!   geometry, flags and the behavior object are all per-node data here.
//! - [`Widget`] is the behavior seam. A widget type implements only the
//!   hooks it cares about; the tree stores it boxed.
//! - The `surface` module binds widgets to backend surfaces lazily on the
//!   first paint pass that reaches them.
//! - [`EventRouter`] walks pointer events down the tree;
//!   [`EventManager`] tracks focus, pointer grab and exposure.
//! - [`Composer`] runs paint passes; hooks queue redraws on a
//!   [`RepaintQueue`] instead of painting mid-dispatch.
//!
//! A top-level window tying all of this to one backend lives in
//! [`crate::window`].

mod compose;
mod dispatch;
mod event_manager;
mod events;
mod node;
mod surface;
mod traits;
mod tree;

#[cfg(test)]
mod tests;

pub use compose::{Composer, RepaintKind, RepaintQueue};
pub use dispatch::EventRouter;
pub use event_manager::EventManager;
pub use events::{
    ButtonMask, Key, KeyEvent, KeyEventKind, PointerButton, PointerEvent, PointerEventKind,
};
pub use node::{Direction, InputMethod, ResizeConstraint, SurfaceDescription, WidgetState};
pub use traits::{ComposeContext, EventContext, NullWidget, Widget};
pub use tree::{WidgetId, WidgetTree};
