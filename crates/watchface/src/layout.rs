//! Screen layout and resource tables.
//!
//! ```text
//! (0,0)      (72,0)
//!   ┌─────────┬─────────┐
//!   │ slot 0  │ slot 1  │  hour
//!   ├─────────┼─────────┤ (y=76)
//!   │ slot 2  │ slot 3  │  minute
//!   ├─────────┴─────────┤ (y=152)
//!   │ ▮ batt  date   ⌁  │  status strip
//!   └───────────────────┘ (144,168)
//! ```

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use platform::ResourceId;

/// Number of digit slots on screen.
pub const TOTAL_SLOTS: usize = 4;

/// Width of one digit glyph in pixels.
pub const GLYPH_WIDTH: i32 = 72;

/// Height of one digit glyph in pixels.
pub const GLYPH_HEIGHT: i32 = 76;

/// Glyph images for digits 0–9, indexed by digit.
pub const DIGIT_RESOURCES: [ResourceId; 10] = [
    ResourceId(1),
    ResourceId(2),
    ResourceId(3),
    ResourceId(4),
    ResourceId(5),
    ResourceId(6),
    ResourceId(7),
    ResourceId(8),
    ResourceId(9),
    ResourceId(10),
];

/// Battery glyphs for buckets 0–4 (discharging) and 5 (charging).
pub const POWER_RESOURCES: [ResourceId; 6] = [
    ResourceId(11),
    ResourceId(12),
    ResourceId(13),
    ResourceId(14),
    ResourceId(15),
    ResourceId(16),
];

/// Connectivity glyph.
pub const BLUETOOTH_RESOURCE: ResourceId = ResourceId(17);

/// Battery indicator origin, left-aligned under the hour column.
pub const POWER_ORIGIN: Point = Point::new(2, 154);

/// Connectivity indicator origin, right-aligned under the minute column.
pub const BLUETOOTH_ORIGIN: Point = Point::new(130, 154);

/// Date text field.
pub const DATE_FRAME: Rectangle = Rectangle::new(Point::new(28, 152), Size::new(88, 16));

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::ContainsPoint;
    use platform::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

    fn on_screen(frame: Rectangle) -> bool {
        let screen = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        frame
            .bottom_right()
            .map_or(false, |corner| screen.contains(frame.top_left) && screen.contains(corner))
    }

    #[test]
    fn test_grid_fills_screen_width() {
        assert_eq!(TOTAL_SLOTS, 4);
        assert_eq!(GLYPH_WIDTH * 2, SCREEN_WIDTH as i32);
    }

    #[test]
    fn test_status_strip_below_grid() {
        let grid_bottom = GLYPH_HEIGHT * 2;
        assert!(DATE_FRAME.top_left.y >= grid_bottom);
        assert!(POWER_ORIGIN.y >= grid_bottom);
        assert!(BLUETOOTH_ORIGIN.y >= grid_bottom);
        assert!(on_screen(DATE_FRAME));
    }

    #[test]
    fn test_resource_ids_are_distinct() {
        let mut all: heapless::Vec<u32, 17> = heapless::Vec::new();
        for id in DIGIT_RESOURCES.iter().chain(&POWER_RESOURCES).chain([&BLUETOOTH_RESOURCE]) {
            assert!(!all.contains(&id.0));
            all.push(id.0).ok();
        }
        assert_eq!(all.len(), 17);
    }
}
