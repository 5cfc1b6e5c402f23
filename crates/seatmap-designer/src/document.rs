//! Layout document and id allocation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use seatmap_core::LayoutError;

use crate::geometry;
use crate::model::{ObjectId, PlacedObject, Point, ShapeKind};

/// Ordered top-level objects; later entries draw on top
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutDocument {
    objects: Vec<PlacedObject>,
}

impl LayoutDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document, checking id uniqueness and exclusive ownership
    pub fn from_objects(objects: Vec<PlacedObject>) -> Result<Self, LayoutError> {
        let doc = Self { objects };
        doc.validate()?;
        Ok(doc)
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn into_objects(self) -> Vec<PlacedObject> {
        self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Top-level object by id
    pub fn get(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut PlacedObject> {
        self.objects.iter_mut().find(|o| o.id == *id)
    }

    pub fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == *id)
    }

    /// True if any object in the tree, nested or not, carries `id`
    pub fn contains_id(&self, id: &ObjectId) -> bool {
        self.objects.iter().any(|o| o.contains_id(id))
    }

    /// Append an object on top, rejecting ids already in use
    pub fn push(&mut self, object: PlacedObject) -> Result<(), LayoutError> {
        self.check_new(&object)?;
        self.objects.push(object);
        Ok(())
    }

    /// Insert an object at `index` (clamped to the end)
    pub fn insert_at(&mut self, index: usize, object: PlacedObject) -> Result<(), LayoutError> {
        self.check_new(&object)?;
        let index = index.min(self.objects.len());
        self.objects.insert(index, object);
        Ok(())
    }

    pub fn remove(&mut self, id: &ObjectId) -> Option<PlacedObject> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index))
    }

    /// Replace the top-level object carrying the same id
    pub fn replace(&mut self, object: PlacedObject) -> bool {
        match self.get_mut(&object.id) {
            Some(slot) => {
                *slot = object;
                true
            }
            None => false,
        }
    }

    /// Move an object to a new z-index (clamped)
    pub fn reorder(&mut self, id: &ObjectId, index: usize) -> bool {
        match self.index_of(id) {
            Some(from) => {
                let object = self.objects.remove(from);
                let index = index.min(self.objects.len());
                self.objects.insert(index, object);
                true
            }
            None => false,
        }
    }

    /// Topmost object under `point`, honouring rotation
    pub fn topmost_hit(&self, point: Point) -> Option<&PlacedObject> {
        self.objects
            .iter()
            .rev()
            .find(|o| geometry::hit_test(point, o))
    }

    /// Ids across the whole tree, depth first
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let mut ids = Vec::new();
        for object in &self.objects {
            ids.push(object.id.clone());
            ids.extend(object.descendant_ids());
        }
        ids
    }

    pub fn count_by_kind(&self, kind: ShapeKind) -> usize {
        self.objects.iter().filter(|o| o.kind() == kind).count()
    }

    /// Check that every id in the tree is unique.
    ///
    /// A repeated id means two entries claim the same object, so a child
    /// that also appears at the top level is an ownership violation.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::new();
        for object in &self.objects {
            if !seen.insert(object.id.clone()) {
                return Err(LayoutError::duplicate(object.id.as_str()));
            }
        }
        for object in &self.objects {
            for id in object.descendant_ids() {
                if !seen.insert(id.clone()) {
                    return Err(LayoutError::OwnershipViolation {
                        id: id.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_new(&self, object: &PlacedObject) -> Result<(), LayoutError> {
        let mut incoming = vec![object.id.clone()];
        incoming.extend(object.descendant_ids());
        let mut seen = HashSet::new();
        for id in incoming {
            if self.contains_id(&id) || !seen.insert(id.clone()) {
                return Err(LayoutError::duplicate(id.as_str()));
            }
        }
        Ok(())
    }
}

/// Allocates `"{prefix}-{n}"` ids with a counter that only moves forward.
///
/// Ids already present in the document are skipped, so an allocated id is
/// never handed out twice in one session.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter past every numeric suffix used in `doc`
    pub fn reserve_from(&mut self, doc: &LayoutDocument) {
        let highest = doc
            .all_ids()
            .iter()
            .filter_map(|id| parse_suffix(id.as_str()))
            .max()
            .unwrap_or(0);
        self.next = self.next.max(highest);
    }

    pub fn allocate(&mut self, kind: ShapeKind, doc: &LayoutDocument) -> ObjectId {
        loop {
            self.next += 1;
            let candidate = ObjectId::new(format!("{}-{}", kind.id_prefix(), self.next));
            if !doc.contains_id(&candidate) {
                return candidate;
            }
        }
    }
}

fn parse_suffix(id: &str) -> Option<u64> {
    let (prefix, n) = id.rsplit_once('-')?;
    ShapeKind::ALL
        .iter()
        .any(|k| k.id_prefix() == prefix)
        .then(|| n.parse().ok())
        .flatten()
}
