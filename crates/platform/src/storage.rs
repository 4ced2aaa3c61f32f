//! Persistent key/value storage abstraction
//!
//! The host keeps a small store that survives app restarts. Keys are small
//! integers; values are opaque byte strings owned by the caller's encoding.

/// Storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// The stored value does not fit in the caller's buffer
    BufferTooSmall,
    /// The value exceeds the host's per-key size limit
    ValueTooLarge,
    /// The underlying flash operation failed
    Io,
}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "stored value larger than read buffer"),
            Self::ValueTooLarge => write!(f, "value exceeds per-key size limit"),
            Self::Io => write!(f, "persistent storage I/O error"),
        }
    }
}

/// Persistent key/value store
pub trait SettingsStore {
    /// Copy the value stored under `key` into `buf`.
    ///
    /// Returns `Ok(None)` when nothing is stored under `key`, otherwise the
    /// number of bytes written to `buf`.
    fn read(&self, key: u32, buf: &mut [u8]) -> Result<Option<usize>, StorageError>;

    /// Store `data` under `key`, replacing any previous value.
    fn write(&mut self, key: u32, data: &[u8]) -> Result<(), StorageError>;
}
