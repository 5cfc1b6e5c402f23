//! # Seatmap Designer
//!
//! The seat-layout editing engine: positioned objects on a 2D canvas, moved,
//! resized, rotated, copied and bulk-generated through a pointer-driven
//! state machine with linear undo/redo.
//!
//! ## Architecture
//!
//! ```text
//! PointerInput / Command
//!   └── LayoutEditor (interaction state machine)
//!         ├── geometry (hit-testing, snapping, corner zones)
//!         ├── LayoutDocument (ordered object list)
//!         ├── HistoryStack (full snapshots + cursor)
//!         ├── PatternGenerator (grid / radial / linear)
//!         └── EventBus<LayoutEvent> (persistence observer)
//!
//! RenderScene
//!   └── RenderTarget (SvgRenderer, RasterRenderer)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use seatmap_designer::{LayoutEditor, PointerInput};
//! use seatmap_settings::Config;
//!
//! let mut editor = LayoutEditor::new(Config::default());
//! editor.pointer_down(PointerInput::at(103.0, 107.0));
//! assert_eq!(editor.objects().len(), 1);
//! assert_eq!(editor.objects()[0].position.x, 105.0);
//! ```

pub mod document;
pub mod editor;
pub mod events;
pub mod generator;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod model;
pub mod render;
pub mod serialization;

pub use document::{IdAllocator, LayoutDocument};
pub use editor::{BulkRequest, BulkSpacing, Command, LayoutEditor};
pub use events::{LayoutDiff, LayoutEvent, LayoutEventCategory};
pub use generator::{
    auto_space, footprint, GridParams, LinearParams, PatternGenerator, PlacementConfig,
    RadialParams, SpacingRules,
};
pub use geometry::{
    corner_zone, hit_test, snap_to_angle, snap_to_grid, to_local, to_world, Bounds, Corner,
};
pub use history::{HistoryDirection, HistoryStack};
pub use interaction::{EditOutcome, GestureKind, Interaction, PointerInput};
pub use model::{
    CircleShape, GroupShape, ObjectId, ObjectPatch, PlacedObject, Point, PolygonShape,
    RectangleShape, Shape, ShapeGeometry, ShapeKind, Size, Style, TextShape,
};
pub use render::{
    encode_png, render_scene, ObjectVisualState, RasterRenderer, RenderScene, RenderTarget,
    SvgRenderer,
};
pub use serialization::{LayoutFile, LayoutMetadata};
