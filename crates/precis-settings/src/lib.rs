//! # precis-settings
//!
//! Configuration management with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`PrecisSettings::default()`]
//! 2. **User file**: `~/.precis/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `PRECIS_*` overrides (highest priority)
//!
//! Library crates never read files or the environment themselves; they
//! convert the sections they need into their own runtime configs.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path, validate};
pub use types::*;
