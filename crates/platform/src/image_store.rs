//! Glyph resource store abstraction
//!
//! Rasterized digit and indicator images live in the application's resource
//! pack. Only a handful fit in RAM at once, so every image is acquired right
//! before it is shown and released as soon as it leaves the screen.
//!
//! # Handle ownership
//!
//! [`ImageHandle`] is neither `Copy` nor `Clone`. [`ImageStore::release`]
//! consumes it, so a released image cannot be released again.

use embedded_graphics::geometry::Size;

/// Numeric identifier of a resource in the host's resource pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResourceId(pub u32);

/// Opaque handle to a resident image.
///
/// Owning the handle means owning the backing memory: drop it only by
/// passing it to [`ImageStore::release`].
#[derive(Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use = "an acquired image must be released"]
pub struct ImageHandle(u32);

impl ImageHandle {
    /// Wrap a host-assigned image handle.
    ///
    /// Only host implementations should call this.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The host-assigned handle value.
    pub const fn raw(&self) -> u32 {
        self.0
    }
}

/// Errors returned when an image cannot be made resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// No resource with this identifier exists in the pack
    NotFound(ResourceId),
    /// The heap cannot hold another decoded image
    OutOfMemory,
}

#[cfg(feature = "std")]
impl std::error::Error for ImageError {}

impl core::fmt::Display for ImageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "image resource {} not found", id.0),
            Self::OutOfMemory => write!(f, "out of memory loading image"),
        }
    }
}

/// Acquire / release access to rasterized image resources.
pub trait ImageStore {
    /// Decode resource `id` into memory and return its handle.
    fn acquire(&mut self, id: ResourceId) -> Result<ImageHandle, ImageError>;

    /// Pixel dimensions of a resident image.
    fn image_size(&self, image: &ImageHandle) -> Size;

    /// Free the backing memory of `image`.
    fn release(&mut self, image: ImageHandle);
}
