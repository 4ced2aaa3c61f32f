//! Battery state abstraction

/// One battery sample from the host's battery service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargeState {
    /// Battery percentage (0-100)
    pub percent: u8,
    /// Charger connected and charging
    pub charging: bool,
}

impl ChargeState {
    /// A discharging battery at `percent`.
    pub const fn discharging(percent: u8) -> Self {
        Self {
            percent,
            charging: false,
        }
    }

    /// A charging battery at `percent`.
    pub const fn charging(percent: u8) -> Self {
        Self {
            percent,
            charging: true,
        }
    }
}

/// Power state monitor
pub trait PowerMonitor {
    /// Latest battery sample.
    fn charge_state(&self) -> ChargeState;
}
