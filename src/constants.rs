//! Application-wide constants.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "KeyForge";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "keyforge";

/// Environment variable holding the log filter (`debug`, `keyforge=trace`, ...).
pub const LOG_ENV: &str = "KEYFORGE_LOG";
