//! Phone connectivity abstraction

/// Bluetooth connection service
pub trait ConnectionMonitor {
    /// Check if the paired phone is connected
    fn is_connected(&self) -> bool;
}
