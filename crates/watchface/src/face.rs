//! Event router.
//!
//! [`WatchFace`] owns the host, the settings and every glyph on screen. The
//! host drives it through [`FaceEvents`], one event at a time; each handler
//! runs to completion and does the least redraw work the event allows.
//!
//! ```text
//! on_tick                ──► hour/minute rows (cache hits skip), date, chime
//! on_settings_changed    ──► decode ─► persist ─► redraw the affected area
//! on_power_sample        ──► battery indicator
//! on_connectivity_sample ──► connectivity indicator + haptics
//! ```

use platform::{ChargeState, LocalTime, WatchHost};

use crate::date::format_date;
use crate::indicator::IndicatorManager;
use crate::layout::DATE_FRAME;
use crate::settings::sync::{RawValue, SettingUpdate, SyncError};
use crate::settings::SettingsState;
use crate::slot_cache::SlotCache;
use crate::value::{display_hour, render_row};
use crate::vibes;

/// Row showing the hour.
const HOUR_ROW: u8 = 0;
/// Row showing the minute.
const MINUTE_ROW: u8 = 1;

/// Host-facing event interface.
pub trait FaceEvents {
    /// Minute tick with the current local time.
    fn on_tick(&mut self, now: &LocalTime);

    /// One settings key changed on the phone.
    fn on_settings_changed(&mut self, key: u32, value: RawValue<'_>);

    /// Fresh battery reading.
    fn on_power_sample(&mut self, charge: ChargeState);

    /// Fresh connectivity reading.
    fn on_connectivity_sample(&mut self, connected: bool);

    /// The settings transport failed or delivered an unusable message.
    fn on_sync_error(&mut self, _err: SyncError) {}
}

/// The watchface: slot cache, indicators, settings and remembered time.
pub struct WatchFace<H: WatchHost> {
    host: H,
    settings: SettingsState,
    slots: SlotCache,
    indicators: IndicatorManager,
    last_hour: Option<u8>,
    last_date: Option<(u16, u8, u8)>,
}

impl<H: WatchHost> WatchFace<H> {
    /// Idle face with default settings and nothing on screen.
    pub fn new(host: H) -> Self {
        Self {
            host,
            settings: SettingsState::default(),
            slots: SlotCache::new(),
            indicators: IndicatorManager::new(),
            last_hour: None,
            last_date: None,
        }
    }

    /// Load settings and draw the first frame.
    ///
    /// The current hour and date are remembered so the first tick neither
    /// chimes nor redraws the date. With `vibe_on_hour` off the remembered
    /// hour stays put, so re-enabling it chimes on the next tick. The initial
    /// connectivity state is shown without haptics.
    pub fn start(&mut self) {
        self.settings = SettingsState::load(&self.host);
        let now = self.host.now();
        #[cfg(feature = "defmt")]
        defmt::info!("watchface start at {}", now);

        self.render_time(&now, true);
        self.draw_date(&now);
        self.last_hour = Some(now.hour);

        let charge = self.host.charge_state();
        self.on_power_sample(charge);
        let connected = self.host.is_connected();
        self.sync_connectivity(connected);
    }

    /// Release every glyph. Safe to call more than once.
    pub fn shutdown(&mut self) {
        let _released = self.slots.clear_all(&mut self.host);
        self.indicators.clear(&mut self.host);
        #[cfg(feature = "defmt")]
        defmt::info!("watchface shutdown, released {} digit glyphs", _released);
    }

    /// Shut down and hand the host back.
    pub fn into_host(mut self) -> H {
        self.shutdown();
        self.host
    }

    /// Apply an already-decoded settings update.
    ///
    /// The new value is persisted and only the area it affects is redrawn.
    /// A persist failure is logged; the in-memory setting still changes.
    pub fn apply_setting(&mut self, update: SettingUpdate) {
        self.settings.apply(&update);
        if let Err(_e) = SettingsState::persist(&mut self.host, &update) {
            #[cfg(feature = "defmt")]
            defmt::warn!("persist key {} failed: {}", update.key(), _e);
        }

        match update {
            SettingUpdate::ZeroPrefix(_) => {
                let now = self.host.now();
                self.render_time(&now, true);
            }
            SettingUpdate::ShowPower(_) => {
                let charge = self
                    .indicators
                    .last_charge()
                    .unwrap_or_else(|| self.host.charge_state());
                self.on_power_sample(charge);
            }
            SettingUpdate::ShowBluetooth(_) => {
                let connected = self.indicators.connected();
                self.sync_connectivity(connected);
            }
            SettingUpdate::MonthFirst(_) | SettingUpdate::DayLabel(..) => {
                let now = self.host.now();
                self.draw_date(&now);
            }
            SettingUpdate::VibeOnHour(_) | SettingUpdate::VibeOnConnectivityChange(_) => {}
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &SettingsState {
        &self.settings
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably. Used by tests and the simulator to script samples.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Digit slot table.
    pub fn slots(&self) -> &SlotCache {
        &self.slots
    }

    /// Battery and connectivity indicators.
    pub fn indicators(&self) -> &IndicatorManager {
        &self.indicators
    }

    /// Hour seeded at start and moved forward by each hour chime.
    pub fn last_hour(&self) -> Option<u8> {
        self.last_hour
    }

    fn render_time(&mut self, now: &LocalTime, force: bool) {
        let hour = display_hour(now.hour, self.host.is_24h_style());
        let zero_prefix = self.settings.zero_prefix;
        let rows = [
            (HOUR_ROW, u16::from(hour)),
            (MINUTE_ROW, u16::from(now.minute)),
        ];
        for (row, value) in rows {
            let slots = &mut self.slots;
            if let Err(_e) = render_row(slots, &mut self.host, value, row, force, zero_prefix) {
                #[cfg(feature = "defmt")]
                defmt::warn!("row {} left partly blank: {}", row, _e);
            }
        }
    }

    fn draw_date(&mut self, now: &LocalTime) {
        let text = format_date(now, &self.settings);
        self.host.set_date_text(DATE_FRAME, &text);
        self.last_date = Some(now.date());
    }

    fn sync_connectivity(&mut self, connected: bool) {
        let show = self.settings.show_bluetooth;
        if let Err(_e) = self.indicators.sync_connectivity(&mut self.host, connected, show) {
            #[cfg(feature = "defmt")]
            defmt::warn!("connectivity glyph failed: {}", _e);
        }
    }
}

impl<H: WatchHost> FaceEvents for WatchFace<H> {
    fn on_tick(&mut self, now: &LocalTime) {
        #[cfg(feature = "defmt")]
        defmt::trace!("tick {}:{}", now.hour, now.minute);

        self.render_time(now, false);

        if self.last_date != Some(now.date()) {
            self.draw_date(now);
        }

        let hour_changed = self.last_hour.is_some_and(|hour| hour != now.hour);
        if hour_changed && self.settings.vibe_on_hour {
            self.host.play(&vibes::HOUR_CHIME);
            self.last_hour = Some(now.hour);
        }
    }

    fn on_settings_changed(&mut self, key: u32, value: RawValue<'_>) {
        match SettingUpdate::decode(key, value) {
            Ok(update) => self.apply_setting(update),
            Err(err) => self.on_sync_error(err),
        }
    }

    fn on_power_sample(&mut self, charge: ChargeState) {
        let show = self.settings.show_power;
        if let Err(_e) = self.indicators.on_power_sample(&mut self.host, charge, show) {
            #[cfg(feature = "defmt")]
            defmt::warn!("power glyph failed: {}", _e);
        }
    }

    fn on_connectivity_sample(&mut self, connected: bool) {
        let show = self.settings.show_bluetooth;
        let vibe = self.settings.vibe_on_connectivity_change;
        if let Err(_e) = self
            .indicators
            .on_connectivity_sample(&mut self.host, connected, show, vibe)
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("connectivity glyph failed: {}", _e);
        }
    }

    fn on_sync_error(&mut self, _err: SyncError) {
        #[cfg(feature = "defmt")]
        defmt::warn!("settings sync: {}", _err);
    }
}
