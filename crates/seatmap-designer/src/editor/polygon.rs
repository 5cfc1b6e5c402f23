//! Polygon drawing tool.
//!
//! Entered by an explicit command and kept across clicks. Each click adds a
//! vertex. A click near the first vertex closes the polygon once it has at
//! least three vertices; cancel discards the vertices without touching
//! history.

use super::LayoutEditor;
use crate::geometry;
use crate::interaction::{EditOutcome, Interaction, PointerInput};
use crate::model::{PlacedObject, Point, PolygonShape, Shape, ShapeKind, Style};

impl LayoutEditor {
    pub fn start_polygon(&mut self) -> EditOutcome {
        if !self.interaction.is_idle() {
            return EditOutcome::Ignored;
        }
        self.interaction = Interaction::DrawingPolygon {
            vertices: Vec::new(),
            cursor: None,
        };
        tracing::debug!("Polygon drawing started");
        EditOutcome::PolygonStarted
    }

    pub fn cancel_polygon(&mut self) -> EditOutcome {
        if !self.interaction.is_drawing_polygon() {
            return EditOutcome::Ignored;
        }
        self.interaction = Interaction::Idle;
        tracing::debug!("Polygon drawing cancelled");
        EditOutcome::Cancelled
    }

    pub(super) fn polygon_click(&mut self, input: PointerInput) -> EditOutcome {
        let close_distance = self.config.interaction.polygon_close_distance;
        let vertex = self.polygon_vertex(input);

        let Interaction::DrawingPolygon { vertices, cursor } = &mut self.interaction else {
            return EditOutcome::Ignored;
        };

        if let Some(first) = vertices.first() {
            if input.position.distance_to(first) <= close_distance {
                if vertices.len() < PolygonShape::MIN_VERTICES {
                    tracing::trace!("Polygon close ignored with {} vertices", vertices.len());
                    return EditOutcome::Ignored;
                }
                let vertices = std::mem::take(vertices);
                return self.close_polygon(vertices);
            }
        }

        if vertices.last() == Some(&vertex) {
            return EditOutcome::Ignored;
        }
        vertices.push(vertex);
        *cursor = None;
        EditOutcome::VertexAdded(vertices.len())
    }

    pub(super) fn polygon_preview(&mut self, input: PointerInput) -> EditOutcome {
        let vertex = self.polygon_vertex(input);
        match &mut self.interaction {
            Interaction::DrawingPolygon { cursor, .. } => {
                *cursor = Some(vertex);
                EditOutcome::Updated
            }
            _ => EditOutcome::Ignored,
        }
    }

    /// Where a click at `input` would place the next vertex
    fn polygon_vertex(&self, input: PointerInput) -> Point {
        let previous = match &self.interaction {
            Interaction::DrawingPolygon { vertices, .. } => vertices.last().copied(),
            _ => None,
        };
        match previous {
            Some(prev) if input.constrain_modifier => geometry::snap_to_angle_step(
                prev,
                input.position,
                self.config.interaction.snap_step_degrees,
            ),
            _ => geometry::snap_optional(input.position, self.grid_cell()),
        }
    }

    fn close_polygon(&mut self, vertices: Vec<Point>) -> EditOutcome {
        self.interaction = Interaction::Idle;

        let (shape, position) = match PolygonShape::from_world(&vertices) {
            Ok(built) => built,
            Err(e) => {
                tracing::warn!("Polygon not committed: {}", e);
                return EditOutcome::Ignored;
            }
        };

        let id = self.allocate_id(ShapeKind::Polygon);
        let style = Style::from(&self.config.defaults.style);
        let object = PlacedObject::new(id.clone(), Shape::Polygon(shape), position).with_style(style);
        if let Err(e) = self.document.push(object) {
            tracing::warn!("Polygon not committed: {}", e);
            return EditOutcome::Ignored;
        }

        tracing::debug!("Polygon '{}' closed with {} vertices", id, vertices.len());
        self.selection = vec![id.clone()];
        self.commit_operation("draw polygon");
        EditOutcome::PolygonClosed(id)
    }
}
