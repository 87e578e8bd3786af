//! KeyForge Library
//!
//! Core of an editor shortcut trainer: key input normalization and
//! comparison, level catalogs, answer verification with interactive chord
//! capture, progress and statistics persistence, and the `keyforge` CLI.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod keys;
pub mod models;
pub mod storage;
pub mod ui;
