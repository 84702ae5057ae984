//! Top-level windows.

mod root_window;

pub use root_window::RootWindow;
