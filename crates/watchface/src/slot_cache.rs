//! Digit slot table — one cached glyph per screen position.
//!
//! There is only enough RAM for about six of the ten digit images, so each
//! of the four on-screen positions ("slots") loads its own copy of the digit
//! it shows and swaps it only when the digit changes:
//!
//! ```text
//!     0 1     hour   (tens, ones)
//!     2 3     minute (tens, ones)
//! ```
//!
//! A layer can only have one parent, so two slots showing the same digit
//! each hold their own image.
//!
//! Invariants:
//! - a slot is either empty or holds exactly one [`GlyphBinding`] and the
//!   digit it shows; the two can't disagree because they are stored together
//! - the old binding is always released before the new one is acquired, so
//!   at most [`TOTAL_SLOTS`] digit images are ever resident

use embedded_graphics::geometry::Point;

use crate::glyph::{Digit, GlyphBinding, GlyphError, Graphics};
use crate::layout::{GLYPH_HEIGHT, GLYPH_WIDTH, TOTAL_SLOTS};

/// Index of one of the four digit slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct SlotId(u8);

impl SlotId {
    /// Returns `None` for ids at or above [`TOTAL_SLOTS`].
    #[must_use]
    pub fn new(id: usize) -> Option<Self> {
        if id < TOTAL_SLOTS {
            u8::try_from(id).ok().map(Self)
        } else {
            None
        }
    }

    /// Slot index, `0..TOTAL_SLOTS`.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Grid row (0 = hour, 1 = minute).
    #[must_use]
    pub fn row(self) -> u8 {
        self.0 / 2
    }

    /// Grid column (0 = tens, 1 = ones).
    #[must_use]
    pub fn column(self) -> u8 {
        self.0 % 2
    }

    /// Top-left corner of the slot on screen.
    #[must_use]
    // Bounded: column, row ≤ 1 and glyph dimensions are small constants.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn origin(self) -> Point {
        Point::new(
            i32::from(self.column()) * GLYPH_WIDTH,
            i32::from(self.row()) * GLYPH_HEIGHT,
        )
    }
}

/// `true` when `digit` must be left blank in `slot`.
///
/// Only the hour's leading zero is blanked (" 9" rather than "09"), and only
/// while `zero_prefix` is off. Every other slot always shows its digit.
#[must_use]
pub fn is_blanked(slot: SlotId, digit: Digit, zero_prefix: bool) -> bool {
    slot.index() == 0 && digit == Digit::ZERO && !zero_prefix
}

/// What [`SlotCache::reconcile`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotChange {
    /// Slot already showed the digit; no resource traffic
    Unchanged,
    /// A glyph for the digit was loaded (after unloading any previous one)
    Loaded(Digit),
    /// Slot was emptied because the digit is blanked
    Blanked,
    /// Slot id or digit out of range; nothing touched
    Rejected,
}

struct Occupied {
    digit: Digit,
    binding: GlyphBinding,
}

/// The four digit slots and the glyphs bound to them.
pub struct SlotCache {
    slots: [Option<Occupied>; TOTAL_SLOTS],
}

impl SlotCache {
    /// An empty cache with nothing resident.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [None, None, None, None],
        }
    }

    /// Digit currently shown in `slot`, or `None` when empty or out of range.
    #[must_use]
    pub fn occupant(&self, slot: usize) -> Option<Digit> {
        self.slots.get(slot)?.as_ref().map(|o| o.digit)
    }

    /// Number of slots holding a glyph.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Make `slot` show `digit`.
    ///
    /// Unless `force` is set, a slot that already shows `digit` is left alone.
    /// Otherwise the current glyph (if any) is released first, then the new
    /// one is bound unless the blanking rule leaves the slot empty.
    ///
    /// Out-of-range `slot` or `digit` is rejected without touching anything.
    /// On a host failure the slot is left empty and the error returned; the
    /// next call for that slot retries.
    pub fn reconcile<G: Graphics + ?Sized>(
        &mut self,
        gfx: &mut G,
        slot: usize,
        digit: u8,
        force: bool,
        zero_prefix: bool,
    ) -> Result<SlotChange, GlyphError> {
        let (Some(id), Some(digit)) = (SlotId::new(slot), Digit::new(digit)) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("slot reconcile rejected: slot={=usize} digit={=u8}", slot, digit);
            return Ok(SlotChange::Rejected);
        };
        let Some(entry) = self.slots.get_mut(id.index()) else {
            return Ok(SlotChange::Rejected);
        };

        if !force && entry.as_ref().map(|o| o.digit) == Some(digit) {
            return Ok(SlotChange::Unchanged);
        }

        // Unload before load: never two images resident for one slot.
        if let Some(old) = entry.take() {
            old.binding.release(gfx);
        }

        if is_blanked(id, digit, zero_prefix) {
            #[cfg(feature = "defmt")]
            defmt::trace!("slot {} blanked", id);
            return Ok(SlotChange::Blanked);
        }

        let binding = GlyphBinding::bind(gfx, digit.resource(), id.origin())?;
        *entry = Some(Occupied { digit, binding });
        #[cfg(feature = "defmt")]
        defmt::trace!("slot {} loaded digit {}", id, digit);
        Ok(SlotChange::Loaded(digit))
    }

    /// Release every occupied slot. Safe to call on an empty cache.
    ///
    /// Returns the number of glyphs released.
    pub fn clear_all<G: Graphics + ?Sized>(&mut self, gfx: &mut G) -> usize {
        let mut released = 0usize;
        for entry in &mut self.slots {
            if let Some(old) = entry.take() {
                old.binding.release(gfx);
                released = released.saturating_add(1);
            }
        }
        released
    }
}

impl Default for SlotCache {
    fn default() -> Self {
        Self::new()
    }
}
