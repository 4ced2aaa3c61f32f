//! Application configuration and constants
//!
//! Naming and screen geometry shared by every crate in the workspace.
//! Reference these constants rather than hardcoding values.

/// The application name
pub const APP_NAME: &str = "CST Big Time";

/// The application type/category
pub const APP_TYPE: &str = "Watchface";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Screen width in pixels
pub const SCREEN_WIDTH: u32 = 144;

/// Screen height in pixels
pub const SCREEN_HEIGHT: u32 = 168;

/// Simulator banner
pub const fn dev_banner() -> &'static str {
    "CST Big Time - Simulator"
}
