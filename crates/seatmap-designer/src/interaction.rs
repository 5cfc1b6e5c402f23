//! Interaction state machine types.
//!
//! At most one gesture is active at a time; each variant carries only the
//! transient data its gesture needs.

use crate::model::{ObjectId, PlacedObject, Point};

/// Pointer event as delivered by the input source, already in canvas space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    pub position: Point,
    /// Copy modifier held (copy-drag)
    pub copy_modifier: bool,
    /// Angle/square constrain modifier held
    pub constrain_modifier: bool,
}

impl PointerInput {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            ..Default::default()
        }
    }

    pub fn with_copy(mut self) -> Self {
        self.copy_modifier = true;
        self
    }

    pub fn with_constrain(mut self) -> Self {
        self.constrain_modifier = true;
        self
    }
}

/// Gesture families, used in outcomes and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize,
    Rotate,
    CopyDrag,
}

impl GestureKind {
    /// Operation name recorded when the gesture commits
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Drag => "move",
            Self::Resize => "resize",
            Self::Rotate => "rotate",
            Self::CopyDrag => "copy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging {
        object_id: ObjectId,
        /// Pointer position minus object position at pointer-down
        grab_offset: Point,
        original: PlacedObject,
    },
    Resizing {
        object_id: ObjectId,
        original: PlacedObject,
    },
    Rotating {
        object_id: ObjectId,
        original: PlacedObject,
        /// Pointer angle about the object centre at pointer-down, degrees
        start_angle: f64,
    },
    CopyDragging {
        source_id: ObjectId,
        /// Transient duplicate; never part of the document until committed
        ghost: PlacedObject,
        grab_offset: Point,
    },
    DrawingPolygon {
        vertices: Vec<Point>,
        /// Preview position of the next vertex
        cursor: Option<Point>,
    },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// True while a drag, resize, rotate or copy gesture is in progress
    pub fn is_gesture(&self) -> bool {
        self.gesture_kind().is_some()
    }

    pub fn gesture_kind(&self) -> Option<GestureKind> {
        match self {
            Interaction::Dragging { .. } => Some(GestureKind::Drag),
            Interaction::Resizing { .. } => Some(GestureKind::Resize),
            Interaction::Rotating { .. } => Some(GestureKind::Rotate),
            Interaction::CopyDragging { .. } => Some(GestureKind::CopyDrag),
            Interaction::Idle | Interaction::DrawingPolygon { .. } => None,
        }
    }

    /// Lower-case state name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "idle",
            Interaction::Dragging { .. } => "dragging",
            Interaction::Resizing { .. } => "resizing",
            Interaction::Rotating { .. } => "rotating",
            Interaction::CopyDragging { .. } => "copy-dragging",
            Interaction::DrawingPolygon { .. } => "polygon",
        }
    }

    pub fn is_drawing_polygon(&self) -> bool {
        matches!(self, Interaction::DrawingPolygon { .. })
    }

    /// Object the active gesture operates on
    pub fn target(&self) -> Option<&ObjectId> {
        match self {
            Interaction::Dragging { object_id, .. }
            | Interaction::Resizing { object_id, .. }
            | Interaction::Rotating { object_id, .. } => Some(object_id),
            Interaction::CopyDragging { source_id, .. } => Some(source_id),
            Interaction::Idle | Interaction::DrawingPolygon { .. } => None,
        }
    }

    pub fn ghost(&self) -> Option<&PlacedObject> {
        match self {
            Interaction::CopyDragging { ghost, .. } => Some(ghost),
            _ => None,
        }
    }

    /// In-progress polygon vertices and preview cursor
    pub fn polygon_preview(&self) -> Option<(&[Point], Option<Point>)> {
        match self {
            Interaction::DrawingPolygon { vertices, cursor } => Some((vertices, *cursor)),
            _ => None,
        }
    }
}

/// Result of feeding an input into the editor
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Nothing changed
    Ignored,
    Selected(ObjectId),
    Created(ObjectId),
    Generated(Vec<ObjectId>),
    GestureStarted(GestureKind),
    /// Transient gesture state moved
    Updated,
    /// The gesture ended and produced one history entry
    Committed(GestureKind),
    /// The gesture or polygon was abandoned
    Cancelled,
    /// The caller must confirm before calling `delete_objects`
    DeleteRequested(Vec<ObjectId>),
    /// The caller should prompt for a new id and call `rename_object`
    RenameRequested(ObjectId),
    PolygonStarted,
    VertexAdded(usize),
    PolygonClosed(ObjectId),
    HistoryMoved,
}
