//! Display layer abstraction
//!
//! The host owns a window with a root layer. Glyphs are shown by attaching a
//! bitmap layer at a fixed frame and removed by detaching it again.

use embedded_graphics::primitives::Rectangle;

use crate::image_store::ImageHandle;

/// Opaque handle to a bitmap layer attached to the window.
///
/// Like [`ImageHandle`] it is move-only; [`LayerHost::detach`] consumes it.
#[derive(Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use = "an attached layer must be detached"]
pub struct LayerHandle(u32);

impl LayerHandle {
    /// Wrap a host-assigned layer handle.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The host-assigned handle value.
    pub const fn raw(&self) -> u32 {
        self.0
    }
}

/// Layer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayerError {
    /// Layer allocation failed
    OutOfMemory,
    /// The window is not on screen
    NoWindow,
}

#[cfg(feature = "std")]
impl std::error::Error for LayerError {}

impl core::fmt::Display for LayerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "out of memory creating layer"),
            Self::NoWindow => write!(f, "no window to attach layer to"),
        }
    }
}

/// Window layer tree operations used by the watchface.
pub trait LayerHost {
    /// Create a bitmap layer showing `image` at `frame` and add it to the
    /// root layer.
    ///
    /// The layer borrows the image's pixels: detach the layer before the
    /// image is released.
    fn attach_bitmap(
        &mut self,
        frame: Rectangle,
        image: &ImageHandle,
    ) -> Result<LayerHandle, LayerError>;

    /// Remove `layer` from its parent and destroy it.
    fn detach(&mut self, layer: LayerHandle);

    /// Show `text` in the date field at `frame`, replacing what it showed.
    fn set_date_text(&mut self, frame: Rectangle, text: &str);
}
