// Build-time version from Cargo.toml

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Title bar text of the main panel.
pub fn title() -> String {
    format!("{} {} ('q' to quit panel)", NAME, VERSION)
}
