//! Vibration motor abstraction

/// A custom vibration pattern.
///
/// `segments` alternates on and off durations in milliseconds, starting with
/// an "on" segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VibePattern {
    /// On/off durations in milliseconds
    pub segments: &'static [u32],
}

impl VibePattern {
    /// Build a pattern from alternating on/off durations.
    pub const fn new(segments: &'static [u32]) -> Self {
        Self { segments }
    }

    /// Total running time of the pattern in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        self.segments.iter().fold(0u32, |acc, ms| acc.saturating_add(*ms))
    }
}

/// Haptic feedback output
pub trait Haptics {
    /// Start playing `pattern`, cancelling any pattern already running.
    fn play(&mut self, pattern: &VibePattern);
}
