//! Core data types for levels and platforms.

pub mod level;
pub mod platform;

pub use level::{Difficulty, KeymapProfile, Level, PlatformKeys};
pub use platform::Platform;
