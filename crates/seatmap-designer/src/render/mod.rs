//! Render adapter contract.
//!
//! The engine never draws by itself. [`render_scene`] walks the document in
//! z-order and hands each object, the copy ghost and the polygon preview to a
//! [`RenderTarget`]. Two adapters are provided:
//! - [`SvgRenderer`]: an SVG document string
//! - [`RasterRenderer`]: a `tiny_skia::Pixmap`, exportable as PNG

mod raster;
mod svg;

use seatmap_core::Result;

use crate::document::LayoutDocument;
use crate::geometry::{self, Bounds};
use crate::interaction::Interaction;
use crate::model::{ObjectId, PlacedObject, Point};

pub use raster::{encode_png, parse_hex_color, RasterRenderer};
pub use svg::SvgRenderer;

/// Padding around the content when the viewport is fitted to it
pub const VIEWPORT_MARGIN: f64 = 10.0;

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct RenderScene<'a> {
    pub document: &'a LayoutDocument,
    pub interaction: &'a Interaction,
    pub hovered: Option<&'a ObjectId>,
    pub selection: &'a [ObjectId],
}

impl<'a> RenderScene<'a> {
    /// A scene with no transient state, as drawn for export
    pub fn document_only(document: &'a LayoutDocument) -> Self {
        static IDLE: Interaction = Interaction::Idle;
        Self {
            document,
            interaction: &IDLE,
            hovered: None,
            selection: &[],
        }
    }

    pub fn visual_state(&self, object: &PlacedObject) -> ObjectVisualState {
        ObjectVisualState {
            hovered: self.hovered == Some(&object.id),
            selected: self.selection.contains(&object.id),
            locked: object.locked,
            ghost: false,
        }
    }

    /// World bounds of everything the scene draws, or `None` when empty
    pub fn content_bounds(&self) -> Option<Bounds> {
        let objects = self
            .document
            .objects()
            .iter()
            .chain(self.interaction.ghost())
            .map(geometry::world_bounds);
        let preview = self
            .interaction
            .polygon_preview()
            .and_then(|(vertices, cursor)| {
                let points: Vec<Point> = vertices.iter().copied().chain(cursor).collect();
                Bounds::from_points(&points)
            });
        objects.chain(preview).reduce(|a, b| a.union(&b))
    }

    /// Content bounds grown by `margin`, falling back to a unit square
    pub fn viewport(&self, margin: f64) -> Bounds {
        match self.content_bounds() {
            Some(b) => Bounds::new(
                b.min_x - margin,
                b.min_y - margin,
                b.max_x + margin,
                b.max_y + margin,
            ),
            None => Bounds::new(0.0, 0.0, 1.0, 1.0),
        }
    }
}

/// How an object should be decorated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectVisualState {
    pub hovered: bool,
    pub selected: bool,
    pub locked: bool,
    /// Semi-transparent copy-drag preview
    pub ghost: bool,
}

/// A drawing backend
pub trait RenderTarget {
    type Output;

    /// Start a frame covering `viewport` in world coordinates.
    fn begin(&mut self, viewport: Bounds) -> Result<()>;

    /// Draw one top-level object; groups draw their own children.
    fn draw_object(&mut self, object: &PlacedObject, state: ObjectVisualState);

    /// Draw the open polygon being drawn and the segment to the cursor.
    fn draw_polygon_preview(&mut self, vertices: &[Point], cursor: Option<Point>);

    fn finish(&mut self) -> Result<Self::Output>;
}

/// Draw `scene` on `target`: objects bottom to top, then the copy ghost, then
/// the polygon preview.
pub fn render_scene<T: RenderTarget>(scene: &RenderScene<'_>, target: &mut T) -> Result<T::Output> {
    target.begin(scene.viewport(VIEWPORT_MARGIN))?;

    for object in scene.document.objects() {
        target.draw_object(object, scene.visual_state(object));
    }

    if let Some(ghost) = scene.interaction.ghost() {
        let state = ObjectVisualState {
            ghost: true,
            ..Default::default()
        };
        target.draw_object(ghost, state);
    }

    if let Some((vertices, cursor)) = scene.interaction.polygon_preview() {
        target.draw_polygon_preview(vertices, cursor);
    }

    target.finish()
}
