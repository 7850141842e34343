//! Version information for Banter

/// The version of Banter, set at build time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the application
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Get the full version string for display
pub fn full_version() -> String {
    format!("{} v{}", APP_NAME, VERSION)
}
