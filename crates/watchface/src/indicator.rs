//! Battery and connectivity indicators.
//!
//! Each indicator is either absent or bound to exactly one glyph, independent
//! of the digit grid. Like the digit slots, an indicator only reloads when
//! what it shows changes.

use embedded_graphics::geometry::Point;
use platform::{ChargeState, Haptics, ResourceId};

use crate::glyph::{GlyphBinding, GlyphError, Graphics};
use crate::layout::{BLUETOOTH_ORIGIN, BLUETOOTH_RESOURCE, POWER_ORIGIN, POWER_RESOURCES};
use crate::vibes;

// ─────────────────────────────────────────────────────────────────────────────
// PowerLevel
// ─────────────────────────────────────────────────────────────────────────────

/// Battery glyph bucket: `0..=4` discharging (≈20% each), `5` charging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct PowerLevel(u8);

impl PowerLevel {
    /// Charging glyph.
    pub const CHARGING: PowerLevel = PowerLevel(5);

    /// Bucket for a battery sample.
    ///
    /// Charging always maps to [`PowerLevel::CHARGING`]. Otherwise 1–20% → 0,
    /// 21–40% → 1, … 81–100% → 4; 0% joins bucket 0 and anything above 100
    /// joins bucket 4.
    #[must_use]
    pub fn from_charge(charge: ChargeState) -> Self {
        if charge.charging {
            return Self::CHARGING;
        }
        Self((charge.percent.saturating_sub(1) / 20).min(4))
    }

    /// Bucket number.
    #[must_use]
    pub const fn bucket(self) -> u8 {
        self.0
    }

    /// Glyph resource for this bucket.
    #[must_use]
    pub fn resource(self) -> ResourceId {
        POWER_RESOURCES
            .get(usize::from(self.0))
            .copied()
            .unwrap_or(POWER_RESOURCES[0])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Indicator
// ─────────────────────────────────────────────────────────────────────────────

/// What an indicator update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorChange {
    /// Already showing the right thing; no resource traffic
    Unchanged,
    /// A glyph was (re)loaded
    Shown,
    /// The glyph was released and the indicator is now absent
    Hidden,
}

/// One single-glyph indicator, remembering the state it shows.
struct Indicator<S> {
    shown: Option<(S, GlyphBinding)>,
}

impl<S: Copy + PartialEq> Indicator<S> {
    const fn new() -> Self {
        Self { shown: None }
    }

    fn state(&self) -> Option<S> {
        self.shown.as_ref().map(|(state, _)| *state)
    }

    /// Show `state` using `resource`; a no-op if already showing `state`.
    fn show<G: Graphics + ?Sized>(
        &mut self,
        gfx: &mut G,
        state: S,
        resource: ResourceId,
        origin: Point,
    ) -> Result<IndicatorChange, GlyphError> {
        if self.state() == Some(state) {
            return Ok(IndicatorChange::Unchanged);
        }
        self.hide(gfx);
        let binding = GlyphBinding::bind(gfx, resource, origin)?;
        self.shown = Some((state, binding));
        Ok(IndicatorChange::Shown)
    }

    /// Release the glyph and forget the state, so the next `show` reloads.
    fn hide<G: Graphics + ?Sized>(&mut self, gfx: &mut G) -> IndicatorChange {
        match self.shown.take() {
            Some((_, binding)) => {
                binding.release(gfx);
                IndicatorChange::Hidden
            }
            None => IndicatorChange::Unchanged,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IndicatorManager
// ─────────────────────────────────────────────────────────────────────────────

/// Owns the battery and connectivity indicators.
pub struct IndicatorManager {
    power: Indicator<PowerLevel>,
    bluetooth: Indicator<()>,
    last_charge: Option<ChargeState>,
    connected: bool,
}

impl IndicatorManager {
    /// Both indicators absent, phone assumed disconnected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            power: Indicator::new(),
            bluetooth: Indicator::new(),
            last_charge: None,
            connected: false,
        }
    }

    /// Bucket currently on screen, `None` when the battery glyph is absent.
    #[must_use]
    pub fn power_level(&self) -> Option<PowerLevel> {
        self.power.state()
    }

    /// `true` while the connectivity glyph is on screen.
    #[must_use]
    pub fn bluetooth_shown(&self) -> bool {
        self.bluetooth.state().is_some()
    }

    /// Last connectivity sample. Kept while the glyph is hidden so the next
    /// sample is still compared against the real link state.
    #[must_use]
    pub fn connected(&self) -> bool {
        self.connected
    }

    /// Last battery sample, if any arrived.
    #[must_use]
    pub fn last_charge(&self) -> Option<ChargeState> {
        self.last_charge
    }

    /// Apply a battery sample.
    ///
    /// Redraws only when the bucket changes. With `show_power` off the glyph
    /// is released and the remembered bucket cleared, so re-enabling always
    /// redraws even for an identical sample.
    pub fn on_power_sample<G: Graphics + ?Sized>(
        &mut self,
        gfx: &mut G,
        charge: ChargeState,
        show_power: bool,
    ) -> Result<IndicatorChange, GlyphError> {
        self.last_charge = Some(charge);
        if !show_power {
            return Ok(self.power.hide(gfx));
        }
        let level = PowerLevel::from_charge(charge);
        #[cfg(feature = "defmt")]
        defmt::debug!("power sample {} -> bucket {=u8}", charge, level.bucket());
        self.power.show(gfx, level, level.resource(), POWER_ORIGIN)
    }

    /// Apply a connectivity sample.
    ///
    /// A change from the previous sample plays the connect / disconnect
    /// pattern when `vibe_on_change` is set, whether or not the glyph is
    /// shown. The glyph itself is shown while connected and `show_bluetooth`
    /// is on, and released otherwise.
    pub fn on_connectivity_sample<H: Graphics + Haptics + ?Sized>(
        &mut self,
        host: &mut H,
        connected: bool,
        show_bluetooth: bool,
        vibe_on_change: bool,
    ) -> Result<IndicatorChange, GlyphError> {
        if connected != self.connected && vibe_on_change {
            let pattern = if connected {
                vibes::CONNECTED
            } else {
                vibes::DISCONNECTED
            };
            host.play(&pattern);
        }
        self.sync_connectivity(host, connected, show_bluetooth)
    }

    /// Record a connectivity state and update the glyph without haptics.
    ///
    /// Used at startup and when `show_bluetooth` changes: neither is a
    /// connection transition.
    pub fn sync_connectivity<G: Graphics + ?Sized>(
        &mut self,
        gfx: &mut G,
        connected: bool,
        show_bluetooth: bool,
    ) -> Result<IndicatorChange, GlyphError> {
        self.connected = connected;
        if connected && show_bluetooth {
            self.bluetooth.show(gfx, (), BLUETOOTH_RESOURCE, BLUETOOTH_ORIGIN)
        } else {
            Ok(self.bluetooth.hide(gfx))
        }
    }

    /// Release both indicators. Safe to call repeatedly.
    pub fn clear<G: Graphics + ?Sized>(&mut self, gfx: &mut G) {
        self.power.hide(gfx);
        self.bluetooth.hide(gfx);
    }
}

impl Default for IndicatorManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use platform::mocks::MockHost;
    use platform::ImageError;

    #[test]
    fn test_power_bucket_boundaries() {
        let bucket = |p| PowerLevel::from_charge(ChargeState::discharging(p)).bucket();
        assert_eq!(bucket(0), 0);
        assert_eq!(bucket(1), 0);
        assert_eq!(bucket(20), 0);
        assert_eq!(bucket(21), 1);
        assert_eq!(bucket(40), 1);
        assert_eq!(bucket(41), 2);
        assert_eq!(bucket(61), 3);
        assert_eq!(bucket(80), 3);
        assert_eq!(bucket(81), 4);
        assert_eq!(bucket(100), 4);
        assert_eq!(bucket(255), 4);
    }

    #[test]
    fn test_charging_overrides_percentage() {
        for percent in [0, 15, 50, 100] {
            let level = PowerLevel::from_charge(ChargeState::charging(percent));
            assert_eq!(level, PowerLevel::CHARGING);
            assert_eq!(level.resource(), POWER_RESOURCES[5]);
        }
    }

    #[test]
    fn test_power_redraws_only_on_bucket_change() {
        let mut host = MockHost::new();
        let mut mgr = IndicatorManager::new();

        let first = mgr
            .on_power_sample(&mut host, ChargeState::discharging(90), true)
            .unwrap();
        let same_bucket = mgr
            .on_power_sample(&mut host, ChargeState::discharging(85), true)
            .unwrap();
        assert_eq!(first, IndicatorChange::Shown);
        assert_eq!(same_bucket, IndicatorChange::Unchanged);
        assert_eq!(host.acquire_count(), 1);

        mgr.on_power_sample(&mut host, ChargeState::discharging(70), true).unwrap();
        assert_eq!(host.acquire_count(), 2);
        assert_eq!(host.resident_count(), 1);
        assert_eq!(host.resource_at(POWER_ORIGIN), Some(POWER_RESOURCES[3]));
    }

    #[test]
    fn test_disabling_power_resets_remembered_bucket() {
        let mut host = MockHost::new();
        let mut mgr = IndicatorManager::new();
        let sample = ChargeState::discharging(55);
        mgr.on_power_sample(&mut host, sample, true).unwrap();

        let hidden = mgr.on_power_sample(&mut host, sample, false).unwrap();
        assert_eq!(hidden, IndicatorChange::Hidden);
        assert_eq!(mgr.power_level(), None);
        assert_eq!(host.resident_count(), 0);

        // Identical sample after re-enabling still redraws.
        let shown = mgr.on_power_sample(&mut host, sample, true).unwrap();
        assert_eq!(shown, IndicatorChange::Shown);
        assert_eq!(host.acquire_count(), 2);
    }

    #[test]
    fn test_power_failure_retries_next_sample() {
        let mut host = MockHost::new();
        let mut mgr = IndicatorManager::new();
        host.fail_next_acquire(ImageError::OutOfMemory);

        assert!(mgr.on_power_sample(&mut host, ChargeState::discharging(50), true).is_err());
        assert_eq!(mgr.power_level(), None);

        let change = mgr.on_power_sample(&mut host, ChargeState::discharging(50), true).unwrap();
        assert_eq!(change, IndicatorChange::Shown);
    }

    #[test]
    fn test_connect_vibes_and_shows_glyph_once() {
        let mut host = MockHost::new();
        let mut mgr = IndicatorManager::new();

        mgr.on_connectivity_sample(&mut host, true, true, true).unwrap();
        mgr.on_connectivity_sample(&mut host, true, true, true).unwrap();

        assert_eq!(host.vibes(), &[vibes::CONNECTED]);
        assert_eq!(host.acquire_count(), 1);
        assert_eq!(host.resource_at(BLUETOOTH_ORIGIN), Some(BLUETOOTH_RESOURCE));
    }

    #[test]
    fn test_disconnect_vibes_descending_and_hides() {
        let mut host = MockHost::new();
        let mut mgr = IndicatorManager::new();
        mgr.sync_connectivity(&mut host, true, true).unwrap();

        let change = mgr.on_connectivity_sample(&mut host, false, true, true).unwrap();
        assert_eq!(change, IndicatorChange::Hidden);
        assert_eq!(host.vibes(), &[vibes::DISCONNECTED]);
        assert_eq!(host.resident_count(), 0);
    }

    #[test]
    fn test_haptics_run_with_indicator_hidden() {
        let mut host = MockHost::new();
        let mut mgr = IndicatorManager::new();

        mgr.on_connectivity_sample(&mut host, true, false, true).unwrap();
        assert_eq!(host.vibes(), &[vibes::CONNECTED]);
        assert!(!mgr.bluetooth_shown());
        assert_eq!(host.resident_count(), 0);
    }

    #[test]
    fn test_no_haptics_when_vibe_disabled() {
        let mut host = MockHost::new();
        let mut mgr = IndicatorManager::new();

        mgr.on_connectivity_sample(&mut host, true, true, false).unwrap();
        assert!(host.vibes().is_empty());
        assert!(mgr.bluetooth_shown());
    }

    #[test]
    fn test_clear_releases_both_and_is_idempotent() {
        let mut host = MockHost::new();
        let mut mgr = IndicatorManager::new();
        mgr.on_power_sample(&mut host, ChargeState::charging(30), true).unwrap();
        mgr.sync_connectivity(&mut host, true, true).unwrap();
        assert_eq!(host.resident_count(), 2);

        mgr.clear(&mut host);
        mgr.clear(&mut host);
        assert_eq!(host.resident_count(), 0);
        assert_eq!(host.attached_layer_count(), 0);
        assert_eq!(host.stray_releases(), 0);
    }
}
