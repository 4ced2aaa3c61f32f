//! CST Big Time watchface core — glyph slot cache and change-driven refresh.
//!
//! The screen shows four 72×76 digit glyphs in a 2×2 grid plus a battery and
//! a connectivity indicator. Only a few decoded glyphs fit in RAM, so every
//! screen position owns at most one image and swaps it only when its digit
//! changes.
//!
//! # Modules
//!
//! - [`glyph`] — `GlyphBinding` (one image + one layer, released together)
//! - [`slot_cache`] — the 2×2 digit slot table and its reconcile rule
//! - [`value`] — two-digit row rendering and the 12/24-hour mapping
//! - [`indicator`] — battery and connectivity indicators
//! - [`settings`] — `SettingsState`, persistence, sync-message decoding
//! - [`date`] — date field text
//! - [`face`] — `WatchFace`, the event router the host drives
//!
//! [`layout`] holds the fixed screen geometry and resource ids, [`vibes`] the
//! haptic patterns.
//!
//! # Data flow
//!
//! ```text
//! host events → WatchFace → value / indicator → SlotCache → ImageStore
//! ```
//!
//! This crate is `no_std`; it only uses `core`, `heapless` and `postcard`.
//! The `std` feature adds `std::error::Error` impls for its error types.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

pub mod date;
pub mod face;
pub mod glyph;
pub mod indicator;
pub mod layout;
pub mod settings;
pub mod slot_cache;
pub mod value;
pub mod vibes;

// Top-level re-exports for convenience
pub use face::{FaceEvents, WatchFace};
pub use glyph::{Digit, GlyphBinding, GlyphError, Graphics};
pub use indicator::{IndicatorChange, IndicatorManager, PowerLevel};
pub use settings::sync::{RawValue, SettingKey, SettingUpdate, SyncError};
pub use settings::{DayLabel, SettingsState};
pub use slot_cache::{SlotCache, SlotChange, SlotId};
pub use value::{display_hour, render_row};
