//! Input event types consumed by the widget tree.
//!
//! The platform layer translates its native input into [`PointerEvent`] and
//! [`KeyEvent`] values in root-window coordinates and feeds them to
//! [`RootWindow::consume_pointer_event`] /
//! [`RootWindow::consume_key_event`].
//!
//! [`RootWindow::consume_pointer_event`]: crate::window::RootWindow::consume_pointer_event
//! [`RootWindow::consume_key_event`]: crate::window::RootWindow::consume_key_event

use arbor_surface::Point;

/// What a pointer event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// A button went down.
    ButtonDown,
    /// A button came up.
    ButtonUp,
    /// The pointer moved.
    Motion,
    /// The wheel turned.
    Wheel,
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Which buttons are held while an event is delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ButtonMask {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonMask {
    /// No buttons held.
    pub const NONE: Self = Self {
        left: false,
        middle: false,
        right: false,
    };

    /// Left button held.
    pub const LEFT: Self = Self {
        left: true,
        middle: false,
        right: false,
    };

    /// Middle button held.
    pub const MIDDLE: Self = Self {
        left: false,
        middle: true,
        right: false,
    };

    /// Right button held.
    pub const RIGHT: Self = Self {
        left: false,
        middle: false,
        right: true,
    };

    /// Check if any button is held.
    pub fn any(&self) -> bool {
        self.left || self.middle || self.right
    }
}

/// A pointer event in root-window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Position in root-window coordinates.
    pub position: Point,
    /// The button that changed, for button events.
    pub button: Option<PointerButton>,
    /// Buttons held at the time of the event.
    pub buttons: ButtonMask,
    /// Signed wheel step, for wheel events.
    pub wheel_step: i32,
}

impl PointerEvent {
    /// A button-down event.
    pub fn button_down(x: i32, y: i32, button: PointerButton) -> Self {
        let mut buttons = ButtonMask::NONE;
        match button {
            PointerButton::Left => buttons.left = true,
            PointerButton::Middle => buttons.middle = true,
            PointerButton::Right => buttons.right = true,
        }
        Self {
            kind: PointerEventKind::ButtonDown,
            position: Point::new(x, y),
            button: Some(button),
            buttons,
            wheel_step: 0,
        }
    }

    /// A button-up event.
    pub fn button_up(x: i32, y: i32, button: PointerButton) -> Self {
        Self {
            kind: PointerEventKind::ButtonUp,
            position: Point::new(x, y),
            button: Some(button),
            buttons: ButtonMask::NONE,
            wheel_step: 0,
        }
    }

    /// A motion event with the given held-button mask.
    pub fn motion(x: i32, y: i32, buttons: ButtonMask) -> Self {
        Self {
            kind: PointerEventKind::Motion,
            position: Point::new(x, y),
            button: None,
            buttons,
            wheel_step: 0,
        }
    }

    /// A wheel event with a signed step.
    pub fn wheel(x: i32, y: i32, step: i32) -> Self {
        Self {
            kind: PointerEventKind::Wheel,
            position: Point::new(x, y),
            button: None,
            buttons: ButtonMask::NONE,
            wheel_step: step,
        }
    }
}

/// What a key event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Down,
    Up,
}

/// Key symbols the engine itself cares about, plus printable characters.
///
/// Deliberately small: the engine only inspects keys for focus navigation;
/// everything else passes straight through to widget handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Backspace,
    Tab,
    Enter,
    Escape,
    Space,
    Left,
    Up,
    Right,
    Down,
    /// A printable character.
    Char(char),
}

/// A key event delivered to the focused widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key: Key,
}

impl KeyEvent {
    /// A key-down event.
    pub fn down(key: Key) -> Self {
        Self {
            kind: KeyEventKind::Down,
            key,
        }
    }

    /// A key-up event.
    pub fn up(key: Key) -> Self {
        Self {
            kind: KeyEventKind::Up,
            key,
        }
    }
}
