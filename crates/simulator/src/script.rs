//! Scripted host events for the simulator run.

use tracing::info;

use platform::ChargeState;
use watchface::{FaceEvents, RawValue, WatchFace};

use crate::host::SimHost;

/// A settings value as the phone would send it.
#[derive(Debug, Clone, Copy)]
pub enum SyncValue {
    Text(&'static [u8]),
    Int(i32),
}

impl SyncValue {
    fn raw(self) -> RawValue<'static> {
        match self {
            Self::Text(bytes) => RawValue::CString(bytes),
            Self::Int(v) => RawValue::Int(v),
        }
    }
}

/// One scripted event.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    Power(ChargeState),
    Connectivity(bool),
    Setting(u32, SyncValue),
}

impl Event {
    /// Update the host's sampled state and notify the face.
    pub fn deliver(self, face: &mut WatchFace<SimHost>) {
        info!(event = ?self, "event");
        match self {
            Self::Power(charge) => {
                face.host_mut().set_charge(charge);
                face.on_power_sample(charge);
            }
            Self::Connectivity(connected) => {
                face.host_mut().set_connected(connected);
                face.on_connectivity_sample(connected);
            }
            Self::Setting(key, value) => face.on_settings_changed(key, value.raw()),
        }
    }
}

/// Settings changes at fixed minutes, exercising every redraw path.
const SETTINGS: &[(u32, u32, SyncValue)] = &[
    (5, 12, SyncValue::Text(b"true\0")),
    (10, 0, SyncValue::Text(b"true\0")),
    (20, 3, SyncValue::Int(0)),
    (30, 5, SyncValue::Text(b"Lun\0")),
    (40, 1, SyncValue::Int(0)),
    (45, 1, SyncValue::Int(1)),
    (50, 2, SyncValue::Text(b"false\0")),
    (55, 2, SyncValue::Text(b"true\0")),
    (60, 99, SyncValue::Int(1)),
    (70, 0, SyncValue::Text(b"false\0")),
];

/// Battery drains 1% every 3 minutes until minute 90, then charges.
const CHARGER_MINUTE: u32 = 90;

/// The phone drops out every 17 minutes and is back 4 minutes later.
const DROPOUT_PERIOD: u32 = 17;
const DROPOUT_LENGTH: u32 = 4;

pub struct Script {
    percent: u8,
}

impl Script {
    pub fn new() -> Self {
        Self { percent: 100 }
    }

    /// Events to deliver before the tick for `minute`.
    pub fn events_at(&mut self, minute: u32) -> Vec<Event> {
        let mut events = Vec::new();

        if minute == CHARGER_MINUTE {
            events.push(Event::Power(ChargeState::charging(self.percent)));
        } else if minute < CHARGER_MINUTE && minute % 3 == 0 {
            self.percent = self.percent.saturating_sub(1);
            events.push(Event::Power(ChargeState::discharging(self.percent)));
        }

        match minute % DROPOUT_PERIOD {
            0 => events.push(Event::Connectivity(false)),
            DROPOUT_LENGTH => events.push(Event::Connectivity(true)),
            _ => {}
        }

        events.extend(
            SETTINGS
                .iter()
                .filter(|(at, _, _)| *at == minute)
                .map(|(_, key, value)| Event::Setting(*key, *value)),
        );
        events
    }
}
