//! Seatmap Settings Crate
//!
//! Handles editor configuration: grid, interaction thresholds, object
//! defaults, history depth, bulk spacing and render colours.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, is_hex_color, BulkSettings, Config, GridSettings, HistorySettings,
    InteractionSettings, ObjectDefaults, RenderSettings, SpacingMode, StyleSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
