//! Pointer handling.
//!
//! Every event has a defined transition in every state; events that do not
//! apply are absorbed as [`EditOutcome::Ignored`].

use super::LayoutEditor;
use crate::geometry::{self, Corner};
use crate::interaction::{EditOutcome, GestureKind, Interaction, PointerInput};
use crate::model::{ObjectPatch, PlacedObject, Point, ShapeGeometry, Size};

impl LayoutEditor {
    pub fn pointer_down(&mut self, input: PointerInput) -> EditOutcome {
        if self.interaction.is_drawing_polygon() {
            return self.polygon_click(input);
        }
        if !self.interaction.is_idle() {
            tracing::trace!("pointer-down ignored during {:?}", self.interaction.gesture_kind());
            return EditOutcome::Ignored;
        }

        let p = input.position;
        let Some(hit) = self.document.topmost_hit(p).cloned() else {
            if input.copy_modifier {
                return EditOutcome::Ignored;
            }
            self.clear_selection();
            return match self.create_object(self.active_kind, p) {
                Ok(id) => EditOutcome::Created(id),
                Err(e) => {
                    tracing::warn!("Failed to create object: {}", e);
                    EditOutcome::Ignored
                }
            };
        };

        let id = hit.id.clone();
        self.selection = vec![id.clone()];

        if input.copy_modifier {
            let grab_offset = p - hit.position;
            self.interaction = Interaction::CopyDragging {
                source_id: id,
                ghost: hit,
                grab_offset,
            };
            return EditOutcome::GestureStarted(GestureKind::CopyDrag);
        }

        let local = geometry::to_local(p, &hit);
        match geometry::corner_zone(local, &hit, self.config.interaction.corner_zone_size) {
            Some(Corner::TopLeft) => {
                let start_angle = pointer_angle(p, hit.center());
                self.interaction = Interaction::Rotating {
                    object_id: id,
                    original: hit,
                    start_angle,
                };
                EditOutcome::GestureStarted(GestureKind::Rotate)
            }
            Some(Corner::BottomRight) => {
                self.interaction = Interaction::Resizing {
                    object_id: id,
                    original: hit,
                };
                EditOutcome::GestureStarted(GestureKind::Resize)
            }
            Some(Corner::TopRight) => EditOutcome::DeleteRequested(vec![id]),
            Some(Corner::BottomLeft) => EditOutcome::RenameRequested(id),
            None => {
                self.interaction = Interaction::Dragging {
                    object_id: id,
                    grab_offset: p - hit.position,
                    original: hit,
                };
                EditOutcome::GestureStarted(GestureKind::Drag)
            }
        }
    }

    pub fn pointer_move(&mut self, input: PointerInput) -> EditOutcome {
        let p = input.position;
        if self.interaction.is_idle() {
            return self.update_hover(p);
        }
        if self.interaction.is_drawing_polygon() {
            return self.polygon_preview(input);
        }

        let cell = self.grid_cell();
        let step = self.config.interaction.snap_step_degrees;
        let min_size = self.config.interaction.min_object_size;

        let (id, patch) = match &mut self.interaction {
            Interaction::Idle | Interaction::DrawingPolygon { .. } => return EditOutcome::Ignored,
            Interaction::CopyDragging {
                ghost, grab_offset, ..
            } => {
                ghost.position = geometry::snap_optional(p - *grab_offset, cell);
                return EditOutcome::Updated;
            }
            Interaction::Dragging {
                object_id,
                grab_offset,
                ..
            } => (
                object_id.clone(),
                ObjectPatch::position(geometry::snap_optional(p - *grab_offset, cell)),
            ),
            Interaction::Resizing {
                object_id,
                original,
            } => (
                object_id.clone(),
                resize_patch(original, p, input.constrain_modifier, min_size),
            ),
            Interaction::Rotating {
                object_id,
                original,
                start_angle,
            } => {
                let delta = pointer_angle(p, original.center()) - *start_angle;
                let mut rotation = geometry::normalize_degrees(original.rotation + delta);
                if input.constrain_modifier {
                    rotation = geometry::snap_angle_degrees(rotation, step);
                }
                (object_id.clone(), ObjectPatch::rotation(rotation))
            }
        };

        match self.apply_patch(&id, &patch) {
            Ok(true) => EditOutcome::Updated,
            Ok(false) => EditOutcome::Ignored,
            Err(e) => {
                tracing::warn!("Gesture target vanished: {}", e);
                self.interaction = Interaction::Idle;
                self.restore_from_history();
                EditOutcome::Cancelled
            }
        }
    }

    pub fn pointer_up(&mut self, _input: PointerInput) -> EditOutcome {
        match std::mem::take(&mut self.interaction) {
            Interaction::Dragging { .. } => self.finish_gesture(GestureKind::Drag),
            Interaction::Resizing { .. } => self.finish_gesture(GestureKind::Resize),
            Interaction::Rotating { .. } => self.finish_gesture(GestureKind::Rotate),
            Interaction::CopyDragging {
                source_id, ghost, ..
            } => match self.duplicate_object(&source_id, ghost.position) {
                Ok(id) => EditOutcome::Created(id),
                Err(e) => {
                    tracing::warn!("Copy of '{}' failed: {}", source_id, e);
                    EditOutcome::Cancelled
                }
            },
            drawing @ Interaction::DrawingPolygon { .. } => {
                self.interaction = drawing;
                EditOutcome::Ignored
            }
            Interaction::Idle => EditOutcome::Ignored,
        }
    }

    /// Pointer left the canvas without a pointer-up.
    ///
    /// Drag, resize and rotate revert to the pre-gesture object; a copy ghost
    /// is discarded. Polygon drawing continues.
    pub fn pointer_leave(&mut self) -> EditOutcome {
        self.hovered = None;
        match std::mem::take(&mut self.interaction) {
            Interaction::Dragging { original, .. }
            | Interaction::Resizing { original, .. }
            | Interaction::Rotating { original, .. } => {
                tracing::debug!("Gesture on '{}' cancelled by pointer leave", original.id);
                if !self.document.replace(original) {
                    self.restore_from_history();
                }
                EditOutcome::Cancelled
            }
            Interaction::CopyDragging { .. } => EditOutcome::Cancelled,
            drawing @ Interaction::DrawingPolygon { .. } => {
                self.interaction = drawing;
                EditOutcome::Ignored
            }
            Interaction::Idle => EditOutcome::Ignored,
        }
    }

    fn finish_gesture(&mut self, kind: GestureKind) -> EditOutcome {
        if self.commit_operation(kind.operation()) {
            EditOutcome::Committed(kind)
        } else {
            EditOutcome::Ignored
        }
    }

    fn update_hover(&mut self, p: Point) -> EditOutcome {
        let hovered = self.document.topmost_hit(p).map(|o| o.id.clone());
        if hovered == self.hovered {
            return EditOutcome::Ignored;
        }
        self.hovered = hovered;
        EditOutcome::Updated
    }
}

/// Angle of `p` about `center` in degrees
fn pointer_angle(p: Point, center: Point) -> f64 {
    let v = p - center;
    v.y.atan2(v.x).to_degrees()
}

/// Resize from the bottom-right corner, keeping the world position of the
/// unrotated top-left corner fixed. `square` takes the larger local extent
/// for both sides.
fn resize_patch(
    original: &PlacedObject,
    pointer: Point,
    square: bool,
    min_size: f64,
) -> ObjectPatch {
    let anchor = geometry::to_world(Point::new(0.0, 0.0), original);
    let local = geometry::to_local(pointer, original);
    let size = if square {
        let side = local.x.max(local.y).max(min_size);
        Size::new(side, side)
    } else {
        Size::new(local.x.max(min_size), local.y.max(min_size))
    };

    let mut resized = original.clone();
    resized.shape.resize_to(size);
    let half = resized.local_size().half();
    resized.set_center(anchor + geometry::rotate_vector(half, original.rotation_radians()));

    ObjectPatch::position(resized.position).with_size(size)
}
