//! Host interface layer for the CST watchface
//!
//! This crate provides trait-based abstractions for every collaborator the
//! watchface core talks to, enabling development and testing without a watch.
//!
//! # Architecture Layers
//!
//! ```text
//! Host event loop (tick / settings / battery / connection services)
//!         ↓
//! Watchface core (watchface crate - change aggregation, slot cache)
//!         ↓
//! Platform (this crate - trait abstractions + handles)
//!         ↓
//! Host SDK (resource loader, layer tree, vibration motor, persist store)
//! ```
//!
//! # Interfaces
//!
//! - [`ImageStore`] - Load / unload rasterized glyph resources
//! - [`LayerHost`] - Attach bitmap layers to the window, write the date text
//! - [`Haptics`] - Play vibration patterns
//! - [`SettingsStore`] - Persistent key/value storage
//! - [`Clock`] - Wall-clock time and the 12/24-hour convention
//! - [`PowerMonitor`] - Battery charge state
//! - [`ConnectionMonitor`] - Phone connectivity
//!
//! [`WatchHost`] bundles all of them; any type implementing each trait is a
//! `WatchHost` automatically.
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls and the [`mocks`] module
//! - `defmt`: Enable defmt derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{ImageStore, ResourceId};
//!
//! fn preload<S: ImageStore>(store: &mut S) {
//!     if let Ok(image) = store.acquire(ResourceId(3)) {
//!         store.release(image);
//!     }
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)] // host accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod bluetooth;
pub mod clock;
pub mod config;
pub mod display;
pub mod haptics;
pub mod image_store;
pub mod power;
pub mod storage;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main traits
pub use bluetooth::ConnectionMonitor;
pub use clock::{Clock, LocalTime, Weekday};
pub use display::{LayerError, LayerHandle, LayerHost};
pub use haptics::{Haptics, VibePattern};
pub use image_store::{ImageError, ImageHandle, ImageStore, ResourceId};
pub use power::{ChargeState, PowerMonitor};
pub use storage::{SettingsStore, StorageError};

/// Everything the watchface needs from its host.
///
/// Blanket-implemented for any type that implements each collaborator
/// trait, so hosts never implement this directly.
pub trait WatchHost:
    ImageStore + LayerHost + Haptics + SettingsStore + Clock + PowerMonitor + ConnectionMonitor
{
}

impl<T> WatchHost for T where
    T: ImageStore + LayerHost + Haptics + SettingsStore + Clock + PowerMonitor + ConnectionMonitor
{
}
