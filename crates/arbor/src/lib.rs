//! Arbor - a compositing widget toolkit core.
//!
//! This crate provides the engine under a widget toolkit: the widget tree
//! with its geometry model, lazy surface allocation over a pluggable
//! backend, damage-driven paint passes, and pointer/key dispatch with
//! focus and grab semantics. It deliberately stops below the widget
//! gallery; buttons, labels and layouts are behaviors built on the
//! [`Widget`](widget::Widget) trait.
//!
//! # Example
//!
//! ```
//! use arbor::prelude::*;
//! use arbor_surface::{Size, SoftwareBackend};
//!
//! struct Panel;
//!
//! impl Widget for Panel {
//!     fn kind(&self) -> &'static str {
//!         "panel"
//!     }
//!
//!     fn compose(&mut self, ctx: &mut ComposeContext<'_>) {
//!         let color = ctx.style.accent();
//!         ctx.fill(ctx.damage, color);
//!     }
//! }
//!
//! let mut window = RootWindow::new(SoftwareBackend::new(), Size::new(320, 240));
//! let panel = window.tree_mut().create_widget(Box::new(Panel));
//! window.tree_mut().set_geometry(panel, 10, 10, 100, 80);
//! window.tree_mut().set_input_method(panel, InputMethod::POINTER);
//! window.add_child(panel);
//! window.paint();
//!
//! let hit = window.consume_pointer_event(PointerEvent::button_down(50, 50, PointerButton::Left));
//! assert!(hit);
//! ```

pub mod logging;
pub mod prelude;
pub mod style;
pub mod widget;
pub mod window;

pub use style::{DefaultStyle, StyleProvider};
pub use widget::{Widget, WidgetId, WidgetTree};
pub use window::RootWindow;
