//! Two-digit row rendering.

use crate::glyph::{GlyphError, Graphics};
use crate::slot_cache::{SlotCache, SlotChange};

/// Hour as shown on the face.
///
/// 24-hour style passes `hour` through; 12-hour style maps it onto `1..=12`
/// with midnight and noon shown as 12.
#[must_use]
pub fn display_hour(hour: u8, twenty_four_hour: bool) -> u8 {
    if twenty_four_hour {
        hour
    } else {
        match hour % 12 {
            0 => 12,
            h => h,
        }
    }
}

/// Show `value` (taken modulo 100) on `row`: tens in slot `row*2`, ones in
/// slot `row*2 + 1`.
///
/// `force` reloads both slots even when their digits are unchanged; use it
/// when a rendering policy such as `zero_prefix` changed, which a digit
/// comparison alone would miss.
///
/// Both slots are always attempted. On failure the first error is returned
/// after the other slot has been processed.
// Bounded: row ≤ 255 so row*2+1 fits in usize; value % 100 / 10 < 10.
#[allow(clippy::arithmetic_side_effects)]
pub fn render_row<G: Graphics + ?Sized>(
    cache: &mut SlotCache,
    gfx: &mut G,
    value: u16,
    row: u8,
    force: bool,
    zero_prefix: bool,
) -> Result<[SlotChange; 2], GlyphError> {
    let value = value % 100;
    let tens = u8::try_from(value / 10).unwrap_or(u8::MAX);
    let ones = u8::try_from(value % 10).unwrap_or(u8::MAX);
    let first = usize::from(row) * 2;

    let tens_change = cache.reconcile(gfx, first, tens, force, zero_prefix);
    let ones_change = cache.reconcile(gfx, first + 1, ones, force, zero_prefix);
    Ok([tens_change?, ones_change?])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::glyph::Digit;
    use platform::mocks::MockHost;

    #[test]
    fn test_display_hour_twelve_hour() {
        assert_eq!(display_hour(0, false), 12);
        assert_eq!(display_hour(12, false), 12);
        assert_eq!(display_hour(13, false), 1);
        assert_eq!(display_hour(23, false), 11);
    }

    #[test]
    fn test_display_hour_twenty_four_hour_passes_through() {
        for hour in 0..24 {
            assert_eq!(display_hour(hour, true), hour);
        }
    }

    #[test]
    fn test_render_row_splits_digits() {
        let mut host = MockHost::new();
        let mut cache = SlotCache::new();

        render_row(&mut cache, &mut host, 47, 1, false, false).unwrap();
        assert_eq!(cache.occupant(2), Digit::new(4));
        assert_eq!(cache.occupant(3), Digit::new(7));
    }

    #[test]
    fn test_render_row_takes_value_modulo_100() {
        let mut host = MockHost::new();
        let mut cache = SlotCache::new();

        render_row(&mut cache, &mut host, 123, 1, false, false).unwrap();
        assert_eq!(cache.occupant(2), Digit::new(2));
        assert_eq!(cache.occupant(3), Digit::new(3));
    }

    #[test]
    fn test_render_row_out_of_grid_is_rejected() {
        let mut host = MockHost::new();
        let mut cache = SlotCache::new();

        let changes = render_row(&mut cache, &mut host, 12, 2, false, false).unwrap();
        assert_eq!(changes, [SlotChange::Rejected, SlotChange::Rejected]);
        assert_eq!(host.acquire_count(), 0);
    }

    #[test]
    fn test_render_row_nine_blanks_hour_tens() {
        let mut host = MockHost::new();
        let mut cache = SlotCache::new();

        let changes = render_row(&mut cache, &mut host, 9, 0, false, false).unwrap();
        assert_eq!(changes, [SlotChange::Blanked, SlotChange::Loaded(Digit::new(9).unwrap())]);
        assert_eq!(host.resident_count(), 1);
    }
}
