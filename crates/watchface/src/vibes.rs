//! Fixed haptic patterns.

use platform::VibePattern;

/// Two short pulses on the hour.
pub const HOUR_CHIME: VibePattern = VibePattern::new(&[150, 150, 150]);

/// Ascending pattern when the phone connects.
pub const CONNECTED: VibePattern = VibePattern::new(&[200, 100, 400]);

/// Descending pattern when the phone disconnects.
pub const DISCONNECTED: VibePattern = VibePattern::new(&[400, 100, 200]);
