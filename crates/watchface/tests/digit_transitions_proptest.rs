//! Property-based tests for the digit slot cache.
//! Resource traffic must follow digit changes exactly, for every value pair.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use platform::mocks::MockHost;
use watchface::{render_row, Digit, SlotCache};

/// Digit positions (tens, ones) that differ between two two-digit values.
fn differing_digits(a: u16, b: u16) -> usize {
    usize::from(a / 10 != b / 10) + usize::from(a % 10 != b % 10)
}

proptest::proptest! {
    /// Re-rendering the same value is a pure cache hit.
    #[test]
    fn same_value_costs_nothing(v in 0u16..100, row in 0u8..2, zero_prefix: bool) {
        let mut host = MockHost::new();
        let mut cache = SlotCache::new();
        render_row(&mut cache, &mut host, v, row, false, zero_prefix).unwrap();
        let acquires = host.acquire_count();
        let releases = host.release_count();

        render_row(&mut cache, &mut host, v, row, false, zero_prefix).unwrap();
        assert_eq!(host.acquire_count(), acquires);
        assert_eq!(host.release_count(), releases);
    }

    /// A transition swaps exactly the digits that changed (minute row, no blanking).
    #[test]
    fn transition_swaps_only_changed_digits(a in 0u16..100, b in 0u16..100) {
        let mut host = MockHost::new();
        let mut cache = SlotCache::new();
        render_row(&mut cache, &mut host, a, 1, false, false).unwrap();
        let acquires = host.acquire_count();
        let releases = host.release_count();

        render_row(&mut cache, &mut host, b, 1, false, false).unwrap();
        let expected = differing_digits(a, b);
        assert_eq!(host.acquire_count() - acquires, expected);
        assert_eq!(host.release_count() - releases, expected);
        assert_eq!(host.resident_count(), 2);
    }

    /// Forcing reloads both digits even when nothing changed.
    #[test]
    fn force_reloads_both_digits(v in 0u16..100) {
        let mut host = MockHost::new();
        let mut cache = SlotCache::new();
        render_row(&mut cache, &mut host, v, 1, false, false).unwrap();
        let acquires = host.acquire_count();

        render_row(&mut cache, &mut host, v, 1, true, false).unwrap();
        assert_eq!(host.acquire_count() - acquires, 2);
        assert_eq!(host.resident_count(), 2);
    }

    /// Any sequence of hour/minute renders keeps at most four digits resident
    /// and never releases an image a layer is still showing.
    #[test]
    fn sequences_stay_within_slot_budget(
        steps in proptest::collection::vec(
            (0u16..100, 0u8..2, proptest::bool::ANY, proptest::bool::ANY),
            1..40,
        )
    ) {
        let mut host = MockHost::new();
        let mut cache = SlotCache::new();
        for (value, row, force, zero_prefix) in steps {
            render_row(&mut cache, &mut host, value, row, force, zero_prefix).unwrap();
            assert!(host.resident_count() <= 4);
            assert_eq!(host.resident_count(), cache.occupied_count());
        }
        assert!(host.peak_resident() <= 4);
        assert_eq!(host.released_while_shown(), 0);
        assert_eq!(host.stray_releases(), 0);

        cache.clear_all(&mut host);
        assert_eq!(host.resident_count(), 0);
    }
}

#[test]
fn blanked_hour_tens_costs_one_load_when_it_appears() {
    let mut host = MockHost::new();
    let mut cache = SlotCache::new();
    render_row(&mut cache, &mut host, 5, 0, false, false).unwrap();
    assert_eq!(cache.occupant(0), None);
    let acquires = host.acquire_count();
    let releases = host.release_count();

    // 05 -> 15: only the tens position changes, from blank to 1.
    render_row(&mut cache, &mut host, 15, 0, false, false).unwrap();
    assert_eq!(host.acquire_count() - acquires, 1);
    assert_eq!(host.release_count() - releases, 0);
    assert_eq!(cache.occupant(0), Digit::new(1));

    // 15 -> 05: the tens glyph goes away again without a load.
    render_row(&mut cache, &mut host, 5, 0, false, false).unwrap();
    assert_eq!(host.acquire_count() - acquires, 1);
    assert_eq!(host.release_count() - releases, 1);
    assert_eq!(cache.occupant(0), None);
}

#[test]
fn hour_nine_blanks_tens_without_zero_prefix() {
    let mut host = MockHost::new();
    let mut cache = SlotCache::new();

    render_row(&mut cache, &mut host, 9, 0, false, false).unwrap();
    assert_eq!(cache.occupant(0), None);
    assert_eq!(cache.occupant(1), Digit::new(9));
    assert_eq!(host.resident_count(), 1);
}

#[test]
fn hour_nine_shows_zero_with_zero_prefix() {
    let mut host = MockHost::new();
    let mut cache = SlotCache::new();

    render_row(&mut cache, &mut host, 9, 0, false, true).unwrap();
    assert_eq!(cache.occupant(0), Some(Digit::ZERO));
    assert_eq!(cache.occupant(1), Digit::new(9));
}

#[test]
fn minute_tens_zero_is_never_blanked() {
    let mut host = MockHost::new();
    let mut cache = SlotCache::new();

    render_row(&mut cache, &mut host, 5, 1, false, false).unwrap();
    assert_eq!(cache.occupant(2), Some(Digit::ZERO));
    assert_eq!(cache.occupant(3), Digit::new(5));
}
