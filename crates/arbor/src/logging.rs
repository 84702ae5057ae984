//! Tracing targets and debug formatting.
//!
//! Every subsystem logs under its own target so a consumer can turn, say,
//! dispatch tracing on without drowning in per-frame compose output:
//!
//! ```text
//! RUST_LOG=arbor::dispatch=trace,arbor=info
//! ```

use std::fmt::Write as _;

use crate::widget::{WidgetId, WidgetTree};

/// Log target names, one per subsystem.
pub mod targets {
    /// Tree structure changes: attach, detach, reparent.
    pub const TREE: &str = "arbor::tree";
    /// Input routing, focus and grab transitions.
    pub const DISPATCH: &str = "arbor::dispatch";
    /// Paint passes.
    pub const COMPOSE: &str = "arbor::compose";
    /// Surface binding and invalidation.
    pub const SURFACE: &str = "arbor::surface";
    /// Root-window lifecycle.
    pub const WINDOW: &str = "arbor::window";
}

/// Render a subtree as an indented outline, one widget per line with its
/// kind, frame and notable state. Meant for logs and test failure output.
pub fn format_tree(tree: &WidgetTree, root: WidgetId) -> String {
    let mut out = String::new();
    format_node(tree, root, "", true, true, &mut out);
    out
}

fn format_node(
    tree: &WidgetTree,
    id: WidgetId,
    prefix: &str,
    is_root: bool,
    is_last: bool,
    out: &mut String,
) {
    let Some(behavior) = tree.behavior(id) else {
        let _ = writeln!(out, "{prefix}<dead widget>");
        return;
    };
    let frame = tree.frame_geometry(id);
    let state = tree.state(id);
    let mut flags = String::new();
    if state.invisible {
        flags.push_str(" invisible");
    }
    if state.disabled {
        flags.push_str(" disabled");
    }
    if state.focused {
        flags.push_str(" focused");
    }
    if tree.surface_id(id).is_some() {
        flags.push_str(" bound");
    }
    let connector = if is_root {
        ""
    } else if is_last {
        "└─ "
    } else {
        "├─ "
    };
    let _ = writeln!(
        out,
        "{prefix}{connector}{} [{},{} {}x{}]{flags}",
        behavior.kind(),
        frame.x(),
        frame.y(),
        frame.width(),
        frame.height(),
    );
    let children = tree.children(id);
    let child_prefix = if is_root {
        String::new()
    } else if is_last {
        format!("{prefix}   ")
    } else {
        format!("{prefix}│  ")
    };
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        format_node(tree, *child, &child_prefix, false, last, out);
    }
}
