//! User settings: in-memory state and persistence.
//!
//! [`SettingsState`] is read by rendering and mutated only through
//! [`SettingsState::apply`] with an already-decoded [`SettingUpdate`].
//! Each key is persisted on its own, postcard-encoded, under its wire number.

pub mod sync;

use platform::{SettingsStore, StorageError, Weekday};
use serde::{Deserialize, Serialize};

use sync::{SettingKey, SettingUpdate};

/// Maximum day label length in bytes.
pub const DAY_LABEL_CAPACITY: usize = 8;

/// Short weekday label shown in the date field.
pub type DayLabel = heapless::String<DAY_LABEL_CAPACITY>;

/// Scratch size for one encoded [`StoredSetting`].
const STORED_SETTING_MAX: usize = 32;

const DEFAULT_DAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Label from text, truncated to [`DAY_LABEL_CAPACITY`] bytes on a char
/// boundary.
#[must_use]
pub fn label_from(text: &str) -> DayLabel {
    let mut label = DayLabel::new();
    for ch in text.chars() {
        if label.push(ch).is_err() {
            break;
        }
    }
    label
}

// ─────────────────────────────────────────────────────────────────────────────
// Persisted form
// ─────────────────────────────────────────────────────────────────────────────

/// On-flash value of one settings key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoredSetting {
    /// Boolean keys
    Flag(bool),
    /// Day-label keys
    Label(DayLabel),
}

/// Why a setting could not be written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// postcard could not encode the value
    Encode,
    /// The store rejected the write
    Storage(StorageError),
}

impl core::fmt::Display for PersistError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Encode => write!(f, "setting encode failed"),
            Self::Storage(e) => write!(f, "setting store failed: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PersistError {}

// ─────────────────────────────────────────────────────────────────────────────
// SettingsState
// ─────────────────────────────────────────────────────────────────────────────

/// Current user configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsState {
    /// Render the hour tens digit even when it is 0
    pub zero_prefix: bool,
    /// Show the battery indicator
    pub show_power: bool,
    /// Show the connectivity indicator
    pub show_bluetooth: bool,
    /// Date as month/day instead of day/month
    pub month_first: bool,
    /// Chime on the hour
    pub vibe_on_hour: bool,
    /// Vibrate on connect / disconnect
    pub vibe_on_connectivity_change: bool,
    /// Date-field labels, Sunday first
    pub day_labels: [DayLabel; 7],
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            zero_prefix: false,
            show_power: true,
            show_bluetooth: true,
            month_first: true,
            vibe_on_hour: true,
            vibe_on_connectivity_change: false,
            day_labels: DEFAULT_DAY_LABELS.map(label_from),
        }
    }
}

impl SettingsState {
    /// Load every key from `store`, falling back to the default for keys
    /// that are missing, unreadable or of the wrong type.
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Self {
        let mut state = Self::default();
        let mut buf = [0u8; STORED_SETTING_MAX];
        for key in SettingKey::ALL {
            let len = match store.read(key.raw(), &mut buf) {
                Ok(Some(len)) => len,
                Ok(None) => continue,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("settings: read key {} failed: {}", key.raw(), _e);
                    continue;
                }
            };
            let stored = buf
                .get(..len)
                .and_then(|bytes| postcard::from_bytes::<StoredSetting>(bytes).ok());
            match stored.and_then(|s| SettingUpdate::from_stored(key, s)) {
                Some(update) => state.apply(&update),
                None => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("settings: key {} undecodable, using default", key.raw());
                }
            }
        }
        state
    }

    /// Write one update to `store` under its key.
    pub fn persist<S: SettingsStore + ?Sized>(
        store: &mut S,
        update: &SettingUpdate,
    ) -> Result<(), PersistError> {
        let mut buf = [0u8; STORED_SETTING_MAX];
        let encoded =
            postcard::to_slice(&update.to_stored(), &mut buf).map_err(|_| PersistError::Encode)?;
        store
            .write(update.key().raw(), encoded)
            .map_err(PersistError::Storage)
    }

    /// Apply one decoded update.
    pub fn apply(&mut self, update: &SettingUpdate) {
        match update {
            SettingUpdate::ZeroPrefix(v) => self.zero_prefix = *v,
            SettingUpdate::ShowPower(v) => self.show_power = *v,
            SettingUpdate::ShowBluetooth(v) => self.show_bluetooth = *v,
            SettingUpdate::MonthFirst(v) => self.month_first = *v,
            SettingUpdate::VibeOnHour(v) => self.vibe_on_hour = *v,
            SettingUpdate::VibeOnConnectivityChange(v) => self.vibe_on_connectivity_change = *v,
            SettingUpdate::DayLabel(day, label) => {
                if let Some(slot) = self.day_labels.get_mut(day.index()) {
                    slot.clone_from(label);
                }
            }
        }
    }

    /// Label for `day`.
    #[must_use]
    pub fn day_label(&self, day: Weekday) -> &str {
        self.day_labels.get(day.index()).map_or("", |label| label.as_str())
    }
}
