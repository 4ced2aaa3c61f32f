//! Settings sync message decoding.
//!
//! The phone sends one `(key, value)` pair per change. Values arrive loosely
//! typed ([`RawValue`]); [`SettingUpdate::decode`] turns each pair into a
//! typed update once, at the boundary, so nothing past this module branches
//! on raw keys.
//!
//! | Key  | Setting                       | Type   |
//! |------|-------------------------------|--------|
//! | 0    | `zero_prefix`                 | bool   |
//! | 1    | `show_power`                  | bool   |
//! | 2    | `show_bluetooth`              | bool   |
//! | 3    | `month_first`                 | bool   |
//! | 4–10 | day labels, Sunday..Saturday  | string |
//! | 11   | `vibe_on_hour`                | bool   |
//! | 12   | `vibe_on_connectivity_change` | bool   |

use platform::Weekday;

use super::{label_from, DayLabel, StoredSetting};

/// Byte length of a C-string value that reads as `true`: `"true"` plus NUL.
const TRUE_CSTRING_LEN: usize = 5;

/// First day-label key (Sunday).
const FIRST_LABEL_KEY: u32 = 4;

// ─────────────────────────────────────────────────────────────────────────────
// SettingKey
// ─────────────────────────────────────────────────────────────────────────────

/// A known settings key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    /// Key 0
    ZeroPrefix,
    /// Key 1
    ShowPower,
    /// Key 2
    ShowBluetooth,
    /// Key 3
    MonthFirst,
    /// Keys 4–10
    DayLabel(Weekday),
    /// Key 11
    VibeOnHour,
    /// Key 12
    VibeOnConnectivityChange,
}

impl SettingKey {
    /// Every key in wire order.
    pub const ALL: [SettingKey; 13] = [
        SettingKey::ZeroPrefix,
        SettingKey::ShowPower,
        SettingKey::ShowBluetooth,
        SettingKey::MonthFirst,
        SettingKey::DayLabel(Weekday::Sunday),
        SettingKey::DayLabel(Weekday::Monday),
        SettingKey::DayLabel(Weekday::Tuesday),
        SettingKey::DayLabel(Weekday::Wednesday),
        SettingKey::DayLabel(Weekday::Thursday),
        SettingKey::DayLabel(Weekday::Friday),
        SettingKey::DayLabel(Weekday::Saturday),
        SettingKey::VibeOnHour,
        SettingKey::VibeOnConnectivityChange,
    ];

    /// Key for a wire number, `None` if unknown.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        usize::try_from(raw)
            .ok()
            .and_then(|index| Self::ALL.get(index))
            .copied()
    }

    /// Wire number, also used as the persistent store key.
    // Bounded: weekday index < 7.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn raw(self) -> u32 {
        match self {
            Self::ZeroPrefix => 0,
            Self::ShowPower => 1,
            Self::ShowBluetooth => 2,
            Self::MonthFirst => 3,
            Self::DayLabel(day) => FIRST_LABEL_KEY + day.index() as u32,
            Self::VibeOnHour => 11,
            Self::VibeOnConnectivityChange => 12,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RawValue / SyncError
// ─────────────────────────────────────────────────────────────────────────────

/// A value as delivered by the sync transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    /// C string, trailing NUL included
    CString(&'a [u8]),
    /// Signed integer
    Int(i32),
    /// Unsigned integer
    Uint(u32),
    /// Opaque byte array
    Bytes(&'a [u8]),
}

/// A settings message that could not be applied.
///
/// Logged and dropped; the current settings stay in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// Key number outside the table
    UnknownKey(u32),
    /// Value type cannot be coerced to the key's type
    WrongType(SettingKey),
    /// Label bytes are not UTF-8
    InvalidText(SettingKey),
    /// The transport reported a failure (host-specific code)
    Transport(u32),
}

impl core::fmt::Display for SyncError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownKey(key) => write!(f, "unknown settings key {key}"),
            Self::WrongType(key) => write!(f, "wrong value type for key {}", key.raw()),
            Self::InvalidText(key) => write!(f, "invalid UTF-8 label for key {}", key.raw()),
            Self::Transport(code) => write!(f, "settings transport error {code}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SyncError {}

// ─────────────────────────────────────────────────────────────────────────────
// SettingUpdate
// ─────────────────────────────────────────────────────────────────────────────

/// One decoded setting change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingUpdate {
    /// Show a leading zero in the hour tens slot
    ZeroPrefix(bool),
    /// Show the battery indicator
    ShowPower(bool),
    /// Show the connectivity indicator
    ShowBluetooth(bool),
    /// Date as month/day instead of day/month
    MonthFirst(bool),
    /// Label shown in the date field for one weekday
    DayLabel(Weekday, DayLabel),
    /// Chime on the hour
    VibeOnHour(bool),
    /// Vibrate on connect / disconnect
    VibeOnConnectivityChange(bool),
}

impl SettingUpdate {
    /// Decode a raw `(key, value)` pair.
    pub fn decode(key: u32, value: RawValue<'_>) -> Result<Self, SyncError> {
        let key = SettingKey::from_raw(key).ok_or(SyncError::UnknownKey(key))?;
        match key {
            SettingKey::DayLabel(day) => {
                let label = decode_label(key, value)?;
                Ok(Self::DayLabel(day, label))
            }
            _ => {
                coerce_bool(value)
                    .and_then(|flag| Self::flag(key, flag))
                    .ok_or(SyncError::WrongType(key))
            }
        }
    }

    /// Key this update is for.
    #[must_use]
    pub fn key(&self) -> SettingKey {
        match self {
            Self::ZeroPrefix(_) => SettingKey::ZeroPrefix,
            Self::ShowPower(_) => SettingKey::ShowPower,
            Self::ShowBluetooth(_) => SettingKey::ShowBluetooth,
            Self::MonthFirst(_) => SettingKey::MonthFirst,
            Self::DayLabel(day, _) => SettingKey::DayLabel(*day),
            Self::VibeOnHour(_) => SettingKey::VibeOnHour,
            Self::VibeOnConnectivityChange(_) => SettingKey::VibeOnConnectivityChange,
        }
    }

    /// Persisted form of this update.
    #[must_use]
    pub fn to_stored(&self) -> StoredSetting {
        match self {
            Self::ZeroPrefix(v)
            | Self::ShowPower(v)
            | Self::ShowBluetooth(v)
            | Self::MonthFirst(v)
            | Self::VibeOnHour(v)
            | Self::VibeOnConnectivityChange(v) => StoredSetting::Flag(*v),
            Self::DayLabel(_, label) => StoredSetting::Label(label.clone()),
        }
    }

    /// Rebuild an update from its persisted form.
    ///
    /// Returns `None` when the stored variant does not match the key's type.
    #[must_use]
    pub fn from_stored(key: SettingKey, stored: StoredSetting) -> Option<Self> {
        match (key, stored) {
            (SettingKey::DayLabel(day), StoredSetting::Label(label)) => {
                Some(Self::DayLabel(day, label))
            }
            (_, StoredSetting::Flag(flag)) => Self::flag(key, flag),
            (_, StoredSetting::Label(_)) => None,
        }
    }

    /// Flag update for `key`, `None` for label keys.
    fn flag(key: SettingKey, value: bool) -> Option<Self> {
        match key {
            SettingKey::ZeroPrefix => Some(Self::ZeroPrefix(value)),
            SettingKey::ShowPower => Some(Self::ShowPower(value)),
            SettingKey::ShowBluetooth => Some(Self::ShowBluetooth(value)),
            SettingKey::MonthFirst => Some(Self::MonthFirst(value)),
            SettingKey::VibeOnHour => Some(Self::VibeOnHour(value)),
            SettingKey::VibeOnConnectivityChange => Some(Self::VibeOnConnectivityChange(value)),
            SettingKey::DayLabel(_) => None,
        }
    }
}

/// Boolean coercion used by the sync protocol.
///
/// A C string is `true` only when it is exactly `"true\0"` long; any other
/// length, including `"false\0"`, is `false`. Integers are `true` when
/// non-zero. Byte arrays have no boolean reading.
#[must_use]
pub fn coerce_bool(value: RawValue<'_>) -> Option<bool> {
    match value {
        RawValue::CString(bytes) => Some(bytes.len() == TRUE_CSTRING_LEN),
        RawValue::Int(v) => Some(v != 0),
        RawValue::Uint(v) => Some(v != 0),
        RawValue::Bytes(_) => None,
    }
}

fn decode_label(key: SettingKey, value: RawValue<'_>) -> Result<DayLabel, SyncError> {
    let bytes = match value {
        RawValue::CString(bytes) | RawValue::Bytes(bytes) => bytes,
        RawValue::Int(_) | RawValue::Uint(_) => return Err(SyncError::WrongType(key)),
    };
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last.saturating_add(1));
    let text = bytes
        .get(..end)
        .and_then(|trimmed| core::str::from_utf8(trimmed).ok())
        .ok_or(SyncError::InvalidText(key))?;
    Ok(label_from(text))
}
