//! Styling seam for compose hooks.
//!
//! Widgets draw with values pulled from a [`StyleProvider`] rather than
//! hard-coded constants, so a whole window restyles by swapping one
//! object. The defaults are a plain dark palette.

/// Pixel values are packed `0xAARRGGBB`.
pub trait StyleProvider {
    /// Window and widget background.
    fn background(&self) -> u32 {
        0xFF1D1F21
    }

    /// Default content color.
    fn foreground(&self) -> u32 {
        0xFFC5C8C6
    }

    /// Highlight for the focused widget.
    fn accent(&self) -> u32 {
        0xFF5F819D
    }

    /// Default gap between a widget's edge and its content.
    fn default_margin(&self) -> i32 {
        4
    }

    /// Default gap between siblings in a layout.
    fn default_spacing(&self) -> i32 {
        4
    }
}

/// The built-in palette.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStyle;

impl StyleProvider for DefaultStyle {}
