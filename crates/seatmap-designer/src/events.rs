//! Editor events for persistence observers.
//!
//! The editor publishes one event per committed operation. Observers get the
//! full object list and a diff keyed by id, and may forward either to a
//! backend.

use std::collections::HashMap;

use seatmap_core::BusEvent;

use crate::document::LayoutDocument;
use crate::history::HistoryDirection;
use crate::model::{ObjectId, PlacedObject};

/// Event categories for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEventCategory {
    Document,
    Edit,
    History,
}

/// Top-level changes between two snapshots
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutDiff {
    pub added: Vec<PlacedObject>,
    pub updated: Vec<PlacedObject>,
    pub removed: Vec<ObjectId>,
}

impl LayoutDiff {
    /// Diff `before` against `after` by top-level id
    pub fn between(before: &LayoutDocument, after: &LayoutDocument) -> Self {
        let old: HashMap<&ObjectId, &PlacedObject> =
            before.objects().iter().map(|o| (&o.id, o)).collect();
        let new: HashMap<&ObjectId, &PlacedObject> =
            after.objects().iter().map(|o| (&o.id, o)).collect();

        let mut diff = LayoutDiff::default();
        for object in after.objects() {
            match old.get(&object.id) {
                None => diff.added.push(object.clone()),
                Some(previous) if *previous != object => diff.updated.push(object.clone()),
                Some(_) => {}
            }
        }
        diff.removed = before
            .objects()
            .iter()
            .filter(|o| !new.contains_key(&o.id))
            .map(|o| o.id.clone())
            .collect();
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    /// A new object list became history index 0
    DocumentLoaded { objects: Vec<PlacedObject> },
    /// A user operation was recorded as one history entry
    Committed {
        operation: String,
        diff: LayoutDiff,
        objects: Vec<PlacedObject>,
    },
    /// Undo or redo replaced the live document
    HistoryMoved {
        direction: HistoryDirection,
        diff: LayoutDiff,
        objects: Vec<PlacedObject>,
    },
}

impl LayoutEvent {
    /// Full object list after the event
    pub fn objects(&self) -> &[PlacedObject] {
        match self {
            LayoutEvent::DocumentLoaded { objects }
            | LayoutEvent::Committed { objects, .. }
            | LayoutEvent::HistoryMoved { objects, .. } => objects,
        }
    }
}

impl BusEvent for LayoutEvent {
    type Category = LayoutEventCategory;

    fn category(&self) -> LayoutEventCategory {
        match self {
            LayoutEvent::DocumentLoaded { .. } => LayoutEventCategory::Document,
            LayoutEvent::Committed { .. } => LayoutEventCategory::Edit,
            LayoutEvent::HistoryMoved { .. } => LayoutEventCategory::History,
        }
    }

    fn description(&self) -> String {
        match self {
            LayoutEvent::DocumentLoaded { objects } => {
                format!("document loaded ({} objects)", objects.len())
            }
            LayoutEvent::Committed { operation, diff, .. } => format!(
                "{} (+{} ~{} -{})",
                operation,
                diff.added.len(),
                diff.updated.len(),
                diff.removed.len()
            ),
            LayoutEvent::HistoryMoved { direction, .. } => format!("history {:?}", direction),
        }
    }
}
