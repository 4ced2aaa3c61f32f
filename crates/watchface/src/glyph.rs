//! Owned glyph bindings — one resident image shown by one attached layer.
//!
//! A [`GlyphBinding`] is created by acquiring an image and attaching a layer
//! for it, and destroyed by detaching the layer and releasing the image. The
//! handles inside are move-only, so [`GlyphBinding::release`] consuming
//! `self` is the only way to give them back: a binding is released at most
//! once, and only through the pair-wise path.

use embedded_graphics::geometry::Point;
use embedded_graphics::primitives::Rectangle;
use platform::{ImageError, ImageHandle, ImageStore, LayerError, LayerHandle, LayerHost, ResourceId};

/// The part of the host that glyph bindings need.
pub trait Graphics: ImageStore + LayerHost {}

impl<T: ImageStore + LayerHost + ?Sized> Graphics for T {}

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Why a glyph could not be put on screen.
///
/// Never fatal: the caller leaves the position blank and retries on the next
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlyphError {
    /// The image could not be loaded
    Image(ImageError),
    /// The image loaded but no layer could be attached for it
    Layer(LayerError),
}

impl core::fmt::Display for GlyphError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Image(e) => write!(f, "glyph image: {e}"),
            Self::Layer(e) => write!(f, "glyph layer: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GlyphError {}

// ─────────────────────────────────────────────────────────────────────────────
// Digit
// ─────────────────────────────────────────────────────────────────────────────

/// A decimal digit, `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Digit(u8);

impl Digit {
    /// The digit zero.
    pub const ZERO: Digit = Digit(0);

    /// Returns `None` for values above 9.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The digit's value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Glyph resource showing this digit.
    #[must_use]
    pub fn resource(self) -> ResourceId {
        crate::layout::DIGIT_RESOURCES
            .get(usize::from(self.0))
            .copied()
            .unwrap_or(crate::layout::DIGIT_RESOURCES[0])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GlyphBinding
// ─────────────────────────────────────────────────────────────────────────────

/// A resident image together with the layer that displays it.
#[derive(Debug)]
#[must_use = "a glyph binding must be released"]
pub struct GlyphBinding {
    image: ImageHandle,
    layer: LayerHandle,
}

impl GlyphBinding {
    /// Load `resource` and show it with its top-left corner at `origin`.
    ///
    /// The layer frame takes the image's own size. If the layer cannot be
    /// attached the image is released again before returning, so a failed
    /// bind leaves nothing resident.
    pub fn bind<G: Graphics + ?Sized>(
        gfx: &mut G,
        resource: ResourceId,
        origin: Point,
    ) -> Result<Self, GlyphError> {
        let image = gfx.acquire(resource).map_err(GlyphError::Image)?;
        let frame = Rectangle::new(origin, gfx.image_size(&image));
        match gfx.attach_bitmap(frame, &image) {
            Ok(layer) => Ok(Self { image, layer }),
            Err(err) => {
                gfx.release(image);
                Err(GlyphError::Layer(err))
            }
        }
    }

    /// Detach the layer, then free the image it was showing.
    pub fn release<G: Graphics + ?Sized>(self, gfx: &mut G) {
        gfx.detach(self.layer);
        gfx.release(self.image);
    }
}
