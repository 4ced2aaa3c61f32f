//! Mock implementations for testing
//!
//! [`MockHost`] implements every platform trait in memory and records what
//! the watchface did with it, so tests can assert on resource traffic,
//! haptics and persisted settings without a watch.

// Test double: usize counters cannot overflow within a test run.
#![allow(clippy::arithmetic_side_effects)]

use std::collections::BTreeMap;

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::*;

/// Default glyph image size handed out by the mock store
pub const MOCK_IMAGE_SIZE: Size = Size::new(72, 76);

/// Mock watch host
pub struct MockHost {
    next_handle: u32,
    // image handle → resource it was loaded from
    resident: BTreeMap<u32, ResourceId>,
    // layer handle → (frame, image handle it shows)
    layers: BTreeMap<u32, (Rectangle, u32)>,
    acquires: usize,
    releases: usize,
    peak_resident: usize,
    stray_releases: usize,
    released_while_shown: usize,
    fail_next_acquire: Option<ImageError>,
    fail_next_attach: Option<LayerError>,
    image_size: Size,
    vibes: Vec<VibePattern>,
    date_texts: Vec<String>,
    date_frame: Option<Rectangle>,
    store: BTreeMap<u32, Vec<u8>>,
    store_writes: usize,
    storage_failure: Option<StorageError>,
    now: LocalTime,
    twenty_four_hour: bool,
    charge: ChargeState,
    connected: bool,
}

impl MockHost {
    /// Create a mock host at 2024-01-01 10:00 (Monday), 24-hour style,
    /// 100% battery, disconnected, empty store.
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            resident: BTreeMap::new(),
            layers: BTreeMap::new(),
            acquires: 0,
            releases: 0,
            peak_resident: 0,
            stray_releases: 0,
            released_while_shown: 0,
            fail_next_acquire: None,
            fail_next_attach: None,
            image_size: MOCK_IMAGE_SIZE,
            vibes: Vec::new(),
            date_texts: Vec::new(),
            date_frame: None,
            store: BTreeMap::new(),
            store_writes: 0,
            storage_failure: None,
            now: LocalTime {
                year: 2024,
                month: 1,
                day: 1,
                weekday: Weekday::Monday,
                hour: 10,
                minute: 0,
            },
            twenty_four_hour: true,
            charge: ChargeState::discharging(100),
            connected: false,
        }
    }

    fn alloc_handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1);
        handle
    }

    // ── Scripting ───────────────────────────────────────────────────────────

    /// Set the time returned by [`Clock::now`].
    pub fn set_time(&mut self, now: LocalTime) {
        self.now = now;
    }

    /// Select the 12- or 24-hour convention.
    pub fn set_24h_style(&mut self, twenty_four_hour: bool) {
        self.twenty_four_hour = twenty_four_hour;
    }

    /// Set the battery sample returned by [`PowerMonitor::charge_state`].
    pub fn set_charge(&mut self, charge: ChargeState) {
        self.charge = charge;
    }

    /// Set the value returned by [`ConnectionMonitor::is_connected`].
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Make the next [`ImageStore::acquire`] fail with `err`.
    pub fn fail_next_acquire(&mut self, err: ImageError) {
        self.fail_next_acquire = Some(err);
    }

    /// Make the next [`LayerHost::attach_bitmap`] fail with `err`.
    pub fn fail_next_attach(&mut self, err: LayerError) {
        self.fail_next_attach = Some(err);
    }

    /// Make every store read and write fail with `err` (`None` restores).
    pub fn set_storage_failure(&mut self, err: Option<StorageError>) {
        self.storage_failure = err;
    }

    /// Pre-load raw bytes under `key`, as if persisted by a previous run.
    pub fn preload(&mut self, key: u32, data: &[u8]) {
        self.store.insert(key, data.to_vec());
    }

    // ── Inspection ──────────────────────────────────────────────────────────

    /// Number of images currently resident.
    pub fn resident_count(&self) -> usize {
        self.resident.len()
    }

    /// Resources of all resident images, sorted.
    pub fn resident_resources(&self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = self.resident.values().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Highest number of simultaneously resident images seen so far.
    pub fn peak_resident(&self) -> usize {
        self.peak_resident
    }

    /// Total successful acquires.
    pub fn acquire_count(&self) -> usize {
        self.acquires
    }

    /// Total releases of resident images.
    pub fn release_count(&self) -> usize {
        self.releases
    }

    /// Releases of handles that were not resident (forged or repeated).
    pub fn stray_releases(&self) -> usize {
        self.stray_releases
    }

    /// Images released while a layer was still showing them.
    pub fn released_while_shown(&self) -> usize {
        self.released_while_shown
    }

    /// Number of layers currently attached.
    pub fn attached_layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Frames of every attached layer, sorted by position.
    pub fn layer_frames(&self) -> Vec<Rectangle> {
        let mut frames: Vec<Rectangle> = self.layers.values().map(|(frame, _)| *frame).collect();
        frames.sort_by_key(|f| (f.top_left.y, f.top_left.x));
        frames
    }

    /// Resource shown by the layer whose frame starts at `top_left`.
    pub fn resource_at(&self, top_left: Point) -> Option<ResourceId> {
        self.layers
            .values()
            .find(|(frame, _)| frame.top_left == top_left)
            .and_then(|(_, image)| self.resident.get(image).copied())
    }

    /// Every vibration pattern played, oldest first.
    pub fn vibes(&self) -> &[VibePattern] {
        &self.vibes
    }

    /// Every date text written, oldest first.
    pub fn date_texts(&self) -> &[String] {
        &self.date_texts
    }

    /// Most recent date text.
    pub fn date_text(&self) -> Option<&str> {
        self.date_texts.last().map(String::as_str)
    }

    /// Frame of the date field, once any date text was written.
    pub fn date_frame(&self) -> Option<Rectangle> {
        self.date_frame
    }

    /// Raw bytes persisted under `key`.
    pub fn stored(&self, key: u32) -> Option<&[u8]> {
        self.store.get(&key).map(Vec::as_slice)
    }

    /// Total successful store writes.
    pub fn store_writes(&self) -> usize {
        self.store_writes
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStore for MockHost {
    fn acquire(&mut self, id: ResourceId) -> Result<ImageHandle, ImageError> {
        if let Some(err) = self.fail_next_acquire.take() {
            return Err(err);
        }
        let handle = self.alloc_handle();
        self.resident.insert(handle, id);
        self.acquires += 1;
        self.peak_resident = self.peak_resident.max(self.resident.len());
        Ok(ImageHandle::from_raw(handle))
    }

    fn image_size(&self, _image: &ImageHandle) -> Size {
        self.image_size
    }

    fn release(&mut self, image: ImageHandle) {
        let raw = image.raw();
        if self.resident.remove(&raw).is_some() {
            self.releases += 1;
            if self.layers.values().any(|(_, shown)| *shown == raw) {
                self.released_while_shown += 1;
            }
        } else {
            self.stray_releases += 1;
        }
    }
}

impl LayerHost for MockHost {
    fn attach_bitmap(
        &mut self,
        frame: Rectangle,
        image: &ImageHandle,
    ) -> Result<LayerHandle, LayerError> {
        if let Some(err) = self.fail_next_attach.take() {
            return Err(err);
        }
        let handle = self.alloc_handle();
        self.layers.insert(handle, (frame, image.raw()));
        Ok(LayerHandle::from_raw(handle))
    }

    fn detach(&mut self, layer: LayerHandle) {
        self.layers.remove(&layer.raw());
    }

    fn set_date_text(&mut self, frame: Rectangle, text: &str) {
        self.date_frame = Some(frame);
        self.date_texts.push(String::from(text));
    }
}

impl Haptics for MockHost {
    fn play(&mut self, pattern: &VibePattern) {
        self.vibes.push(*pattern);
    }
}

impl SettingsStore for MockHost {
    fn read(&self, key: u32, buf: &mut [u8]) -> Result<Option<usize>, StorageError> {
        if let Some(err) = self.storage_failure {
            return Err(err);
        }
        let Some(value) = self.store.get(&key) else {
            return Ok(None);
        };
        let dst = buf
            .get_mut(..value.len())
            .ok_or(StorageError::BufferTooSmall)?;
        dst.copy_from_slice(value);
        Ok(Some(value.len()))
    }

    fn write(&mut self, key: u32, data: &[u8]) -> Result<(), StorageError> {
        if let Some(err) = self.storage_failure {
            return Err(err);
        }
        self.store.insert(key, data.to_vec());
        self.store_writes += 1;
        Ok(())
    }
}

impl Clock for MockHost {
    fn now(&self) -> LocalTime {
        self.now
    }

    fn is_24h_style(&self) -> bool {
        self.twenty_four_hour
    }
}

impl PowerMonitor for MockHost {
    fn charge_state(&self) -> ChargeState {
        self.charge
    }
}

impl ConnectionMonitor for MockHost {
    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_tracks_resident_images() {
        let mut host = MockHost::new();

        let a = host.acquire(ResourceId(1)).unwrap();
        let b = host.acquire(ResourceId(2)).unwrap();
        assert_eq!(host.resident_count(), 2);

        host.release(a);
        assert_eq!(host.resident_count(), 1);
        assert_eq!(host.resident_resources(), vec![ResourceId(2)]);

        host.release(b);
        assert_eq!(host.resident_count(), 0);
        assert_eq!(host.peak_resident(), 2);
        assert_eq!(host.acquire_count(), 2);
        assert_eq!(host.release_count(), 2);
    }

    #[test]
    fn test_mock_counts_stray_release() {
        let mut host = MockHost::new();
        host.release(ImageHandle::from_raw(99));
        assert_eq!(host.stray_releases(), 1);
        assert_eq!(host.release_count(), 0);
    }

    #[test]
    fn test_mock_injected_acquire_failure_is_one_shot() {
        let mut host = MockHost::new();
        host.fail_next_acquire(ImageError::OutOfMemory);

        assert_eq!(host.acquire(ResourceId(1)), Err(ImageError::OutOfMemory));
        let image = host.acquire(ResourceId(1)).unwrap();
        host.release(image);
    }

    #[test]
    fn test_mock_flags_release_under_attached_layer() {
        let mut host = MockHost::new();
        let image = host.acquire(ResourceId(5)).unwrap();
        let frame = Rectangle::new(Point::new(0, 0), MOCK_IMAGE_SIZE);
        let layer = host.attach_bitmap(frame, &image).unwrap();

        assert_eq!(host.resource_at(Point::new(0, 0)), Some(ResourceId(5)));
        host.release(image);
        host.detach(layer);
        assert_eq!(host.released_while_shown(), 1);
    }

    #[test]
    fn test_mock_store_round_trip() {
        let mut host = MockHost::new();
        host.write(3, &[1, 2, 3]).unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(host.read(3, &mut buf).unwrap(), Some(3));
        assert_eq!(&buf[..3], &[1, 2, 3]);
        assert_eq!(host.read(4, &mut buf).unwrap(), None);
    }

    #[test]
    fn test_mock_store_small_buffer() {
        let mut host = MockHost::new();
        host.preload(1, &[0u8; 16]);
        let mut buf = [0u8; 4];
        assert_eq!(host.read(1, &mut buf), Err(StorageError::BufferTooSmall));
    }

    proptest::proptest! {
        /// Resident count always equals acquires minus matched releases.
        #[test]
        fn resident_count_tracks_any_interleaving(
            ops in proptest::collection::vec(proptest::bool::ANY, 1..64)
        ) {
            let mut host = MockHost::new();
            let mut held = Vec::new();
            for acquire in ops {
                if acquire || held.is_empty() {
                    held.push(host.acquire(ResourceId(1)).unwrap());
                } else {
                    host.release(held.pop().unwrap());
                }
                assert_eq!(host.resident_count(), held.len());
                assert!(host.peak_resident() >= held.len());
            }
            assert_eq!(host.acquire_count() - host.release_count(), held.len());
            assert_eq!(host.stray_releases(), 0);
        }
    }
}
