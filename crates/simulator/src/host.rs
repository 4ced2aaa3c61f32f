//! In-memory watch host with tracing output.

use std::collections::{BTreeMap, HashMap};

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use tracing::{debug, info, warn};

use platform::{
    ChargeState, Clock, ConnectionMonitor, Haptics, ImageError, ImageHandle, ImageStore,
    LayerError, LayerHandle, LayerHost, LocalTime, PowerMonitor, ResourceId, SettingsStore,
    StorageError, VibePattern,
};
use watchface::layout::{BLUETOOTH_RESOURCE, DIGIT_RESOURCES, POWER_RESOURCES};
use watchface::slot_cache::SlotId;

/// Images the simulated heap can hold at once: four digits and two indicators.
pub const RESIDENT_LIMIT: usize = 6;

const DIGIT_SIZE: Size = Size::new(72, 76);
const POWER_SIZE: Size = Size::new(20, 12);
const BLUETOOTH_SIZE: Size = Size::new(12, 12);

/// Simulated watch.
pub struct SimHost {
    next_handle: u32,
    resident: BTreeMap<u32, ResourceId>,
    layers: BTreeMap<u32, (Rectangle, ResourceId)>,
    peak_resident: usize,
    store: HashMap<u32, Vec<u8>>,
    date_text: String,
    now: LocalTime,
    twenty_four_hour: bool,
    charge: ChargeState,
    connected: bool,
}

impl SimHost {
    pub fn new(now: LocalTime) -> Self {
        Self {
            next_handle: 1,
            resident: BTreeMap::new(),
            layers: BTreeMap::new(),
            peak_resident: 0,
            store: HashMap::new(),
            date_text: String::new(),
            now,
            twenty_four_hour: true,
            charge: ChargeState::discharging(100),
            connected: true,
        }
    }

    pub fn current_time(&self) -> LocalTime {
        self.now
    }

    pub fn set_time(&mut self, now: LocalTime) {
        self.now = now;
    }

    pub fn set_24h_style(&mut self, twenty_four_hour: bool) {
        self.twenty_four_hour = twenty_four_hour;
    }

    pub fn set_charge(&mut self, charge: ChargeState) {
        self.charge = charge;
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn resident_count(&self) -> usize {
        self.resident.len()
    }

    pub fn peak_resident(&self) -> usize {
        self.peak_resident
    }

    fn shown_at(&self, top_left: Point) -> Option<ResourceId> {
        self.layers
            .values()
            .find(|(frame, _)| frame.top_left == top_left)
            .map(|(_, resource)| *resource)
    }

    /// One-line rendering of what is on screen, e.g. `[ 9:05] ▮▮▮▯▯ ᛒ Mo 02/26`.
    pub fn screen(&self) -> String {
        let digit = |slot: usize| {
            SlotId::new(slot)
                .and_then(|id| self.shown_at(id.origin()))
                .and_then(|res| DIGIT_RESOURCES.iter().position(|d| *d == res))
                .map_or(' ', |d| char::from(b'0' + d as u8))
        };
        let power = self
            .layers
            .values()
            .find_map(|(_, res)| POWER_RESOURCES.iter().position(|p| p == res))
            .map_or_else(
                || " ".repeat(5),
                |bucket| match bucket {
                    5 => "chg  ".to_string(),
                    n => format!("{}{}", "▮".repeat(n + 1), "▯".repeat(4 - n)),
                },
            );
        let bluetooth = if self.layers.values().any(|(_, res)| *res == BLUETOOTH_RESOURCE) {
            'ᛒ'
        } else {
            ' '
        };
        format!(
            "[{}{}:{}{}] {power} {bluetooth} {}",
            digit(0),
            digit(1),
            digit(2),
            digit(3),
            self.date_text
        )
    }

    fn size_of(resource: ResourceId) -> Option<Size> {
        if DIGIT_RESOURCES.contains(&resource) {
            Some(DIGIT_SIZE)
        } else if POWER_RESOURCES.contains(&resource) {
            Some(POWER_SIZE)
        } else if resource == BLUETOOTH_RESOURCE {
            Some(BLUETOOTH_SIZE)
        } else {
            None
        }
    }
}

impl ImageStore for SimHost {
    fn acquire(&mut self, resource: ResourceId) -> Result<ImageHandle, ImageError> {
        if Self::size_of(resource).is_none() {
            warn!(resource = resource.0, "unknown image resource");
            return Err(ImageError::NotFound(resource));
        }
        if self.resident.len() >= RESIDENT_LIMIT {
            warn!(resource = resource.0, resident = self.resident.len(), "image heap full");
            return Err(ImageError::OutOfMemory);
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        self.resident.insert(handle, resource);
        self.peak_resident = self.peak_resident.max(self.resident.len());
        debug!(resource = resource.0, handle, "image acquired");
        Ok(ImageHandle::from_raw(handle))
    }

    fn image_size(&self, image: &ImageHandle) -> Size {
        self.resident
            .get(&image.raw())
            .and_then(|res| Self::size_of(*res))
            .unwrap_or(Size::zero())
    }

    fn release(&mut self, image: ImageHandle) {
        match self.resident.remove(&image.raw()) {
            Some(resource) => debug!(resource = resource.0, handle = image.raw(), "image released"),
            None => warn!(handle = image.raw(), "release of unknown image"),
        }
    }
}

impl LayerHost for SimHost {
    fn attach_bitmap(
        &mut self,
        frame: Rectangle,
        image: &ImageHandle,
    ) -> Result<LayerHandle, LayerError> {
        let resource = *self.resident.get(&image.raw()).ok_or(LayerError::NoWindow)?;
        let handle = self.next_handle;
        self.next_handle += 1;
        self.layers.insert(handle, (frame, resource));
        Ok(LayerHandle::from_raw(handle))
    }

    fn detach(&mut self, layer: LayerHandle) {
        if self.layers.remove(&layer.raw()).is_none() {
            warn!(handle = layer.raw(), "detach of unknown layer");
        }
    }

    fn set_date_text(&mut self, frame: Rectangle, text: &str) {
        debug!(text, x = frame.top_left.x, y = frame.top_left.y, "date");
        self.date_text = text.to_string();
    }
}

impl Haptics for SimHost {
    fn play(&mut self, pattern: &VibePattern) {
        info!(segments = ?pattern.segments, total_ms = pattern.duration_ms(), "vibe");
    }
}

impl SettingsStore for SimHost {
    fn read(&self, key: u32, buf: &mut [u8]) -> Result<Option<usize>, StorageError> {
        let Some(value) = self.store.get(&key) else {
            return Ok(None);
        };
        buf.get_mut(..value.len())
            .ok_or(StorageError::BufferTooSmall)?
            .copy_from_slice(value);
        Ok(Some(value.len()))
    }

    fn write(&mut self, key: u32, data: &[u8]) -> Result<(), StorageError> {
        debug!(key, bytes = data.len(), "persist");
        self.store.insert(key, data.to_vec());
        Ok(())
    }
}

impl Clock for SimHost {
    fn now(&self) -> LocalTime {
        self.now
    }

    fn is_24h_style(&self) -> bool {
        self.twenty_four_hour
    }
}

impl PowerMonitor for SimHost {
    fn charge_state(&self) -> ChargeState {
        self.charge
    }
}

impl ConnectionMonitor for SimHost {
    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::start_time;
    use watchface::{FaceEvents, WatchFace};

    #[test]
    fn test_screen_after_start() {
        let mut face = WatchFace::new(SimHost::new(start_time(9)));
        face.start();
        assert_eq!(face.host().screen(), "[ 9:00] ▮▮▮▮▮ ᛒ Mo 02/26");
    }

    #[test]
    fn test_heap_limit_is_never_hit() {
        let mut face = WatchFace::new(SimHost::new(start_time(12)));
        face.start();
        face.on_connectivity_sample(true);
        face.on_power_sample(ChargeState::charging(50));
        assert!(face.host().peak_resident() <= RESIDENT_LIMIT);

        let host = face.into_host();
        assert_eq!(host.resident_count(), 0);
    }
}
