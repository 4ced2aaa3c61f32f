//! Type system enforcement tests for host-interface newtypes.
//! Handles are plain ids on the wire but must not be duplicable in code.

// ── Handles ──────────────────────────────────────────────────────────────────

#[test]
fn image_handle_round_trips_raw_id() {
    use platform::ImageHandle;
    assert_eq!(ImageHandle::from_raw(42).raw(), 42);
}

#[test]
fn handles_are_one_word() {
    use platform::{ImageHandle, LayerHandle};
    assert_eq!(core::mem::size_of::<ImageHandle>(), 4);
    assert_eq!(core::mem::size_of::<LayerHandle>(), 4);
}

#[test]
fn resource_id_is_copy() {
    use platform::ResourceId;
    let a = ResourceId(7);
    let b = a;
    assert_eq!(a, b);
}

// ── Clock ────────────────────────────────────────────────────────────────────

#[test]
fn weekday_all_is_sunday_first() {
    use platform::Weekday;
    assert_eq!(Weekday::ALL[0], Weekday::Sunday);
    assert_eq!(Weekday::ALL[6], Weekday::Saturday);
    assert_eq!(Weekday::Saturday.index(), 6);
}

#[test]
fn local_time_date_ignores_time_of_day() {
    use platform::{LocalTime, Weekday};
    let morning = LocalTime {
        year: 2024,
        month: 2,
        day: 29,
        weekday: Weekday::Thursday,
        hour: 6,
        minute: 0,
    };
    let night = LocalTime {
        hour: 23,
        minute: 59,
        ..morning
    };
    assert_eq!(morning.date(), night.date());
}

// ── Power ──────────────────────────────────────────────────────────

#[test]
fn charge_state_constructors() {
    use platform::ChargeState;
    assert!(ChargeState::charging(10).charging);
    assert!(!ChargeState::discharging(10).charging);
    assert_eq!(ChargeState::discharging(64).percent, 64);
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[test]
fn errors_display_their_cause() {
    use platform::{ImageError, LayerError, ResourceId, StorageError};
    assert_eq!(
        ImageError::NotFound(ResourceId(3)).to_string(),
        "image resource 3 not found"
    );
    assert!(!LayerError::NoWindow.to_string().is_empty());
    assert!(!StorageError::BufferTooSmall.to_string().is_empty());
}
