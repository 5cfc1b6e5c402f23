//! # Seatmap
//!
//! A seat-layout editing engine for venue administrators. Rectangles, circles,
//! text labels, polygons and groups are placed on a 2D canvas and moved,
//! resized, rotated, copied and bulk-generated through a pointer-driven state
//! machine with linear undo/redo.
//!
//! ## Architecture
//!
//! The workspace is split into three crates:
//!
//! 1. **seatmap-core** - Error types and the publish/subscribe event bus
//! 2. **seatmap-settings** - Editor configuration with JSON/TOML persistence
//! 3. **seatmap-designer** - Geometry, document, history, interaction,
//!    pattern generation, render adapters and layout files
//!
//! This crate adds logging initialisation and the headless `seatmap` CLI.

pub mod cli;

pub use seatmap_core::{Error, EventBus, EventFilter, LayoutError, Result};
pub use seatmap_designer as designer;
pub use seatmap_designer::{
    BulkRequest, Command, EditOutcome, LayoutDocument, LayoutEditor, LayoutEvent, LayoutFile,
    PlacedObject, Point, PointerInput, ShapeKind,
};
pub use seatmap_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr
/// - RUST_LOG environment variable support, INFO by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    // stdout is left to command output
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
