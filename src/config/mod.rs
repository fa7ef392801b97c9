//! Configuration management for webmap.
//!
//! Provides XDG-compliant storage for application settings that supply
//! defaults to the command line.

mod settings;

pub use settings::{AppSettings, Paths};
