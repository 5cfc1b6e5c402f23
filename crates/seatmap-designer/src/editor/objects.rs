//! Object operations: creation, patches, deletion, grouping, z-order and
//! selection.

use seatmap_core::{Error, LayoutError, Result};

use super::LayoutEditor;
use crate::geometry;
use crate::model::{
    release_children, CircleShape, GroupShape, ObjectId, ObjectPatch, PlacedObject, Point,
    RectangleShape, Shape, ShapeKind, Style, TextShape,
};

impl LayoutEditor {
    /// Create an object of `kind` at the grid-snapped point `at`.
    ///
    /// Polygons and groups have no single-point form and are rejected.
    pub fn create_object(&mut self, kind: ShapeKind, at: Point) -> Result<ObjectId> {
        self.ensure_no_gesture("create")?;
        let defaults = &self.config.defaults;
        let shape = match kind {
            ShapeKind::Rectangle => {
                Shape::Rectangle(RectangleShape::new(defaults.rect_width, defaults.rect_height))
            }
            ShapeKind::Circle => Shape::Circle(CircleShape::new(defaults.circle_radius)),
            ShapeKind::Text => Shape::Text(TextShape::new(
                defaults.text_content.clone(),
                defaults.font_size,
            )),
            ShapeKind::Polygon | ShapeKind::Group => {
                return Err(LayoutError::UnsupportedKind {
                    kind: kind.to_string(),
                }
                .into());
            }
        };
        let style = Style::from(&defaults.style);

        let position = geometry::snap_optional(at, self.grid_cell());
        let id = self.allocate_id(kind);
        let object = PlacedObject::new(id.clone(), shape, position).with_style(style);
        self.document.push(object)?;

        tracing::debug!("Created {} '{}' at ({}, {})", kind, id, position.x, position.y);
        self.selection = vec![id.clone()];
        self.commit_operation("create");
        Ok(id)
    }

    /// Add a fully formed object on top; its ids must be unused.
    pub fn insert_object(&mut self, object: PlacedObject) -> Result<()> {
        self.ensure_no_gesture("insert")?;
        let id = object.id.clone();
        if let Err(e) = self.document.push(object) {
            tracing::warn!("Rejected insert of '{}': {}", id, e);
            return Err(e.into());
        }
        self.commit_operation("insert");
        Ok(())
    }

    /// Apply a partial update without recording history.
    ///
    /// Returns `Ok(false)` when the object is locked and the patch touches
    /// geometry, or when the patch changes nothing. Call [`commit`] to record
    /// the result. Rejected while a gesture is in progress.
    ///
    /// [`commit`]: LayoutEditor::commit
    pub fn update_object(&mut self, id: &ObjectId, patch: &ObjectPatch) -> Result<bool> {
        self.ensure_no_gesture("update")?;
        self.apply_patch(id, patch)
    }

    /// Patch an object in place; the gesture handlers' path to the document.
    pub(super) fn apply_patch(&mut self, id: &ObjectId, patch: &ObjectPatch) -> Result<bool> {
        let object = self
            .document
            .get_mut(id)
            .ok_or_else(|| LayoutError::unknown(id.as_str()))?;

        if object.locked && patch.touches_geometry() {
            tracing::debug!("Ignored geometry change on locked object '{}'", id);
            return Ok(false);
        }

        let before = object.clone();
        object.apply_patch(patch);
        Ok(*object != before)
    }

    /// Record pending updates as one history entry.
    ///
    /// Returns false while a gesture is active or when nothing changed.
    pub fn commit(&mut self) -> bool {
        self.commit_operation("update")
    }

    pub fn delete_object(&mut self, id: &ObjectId) -> Result<bool> {
        if self.document.get(id).is_none() {
            return Err(LayoutError::unknown(id.as_str()).into());
        }
        Ok(self.delete_objects(std::slice::from_ref(id)) > 0)
    }

    /// Remove every top-level object in `ids`; confirmation is the caller's
    /// job. Unknown ids are skipped. Returns the number removed.
    pub fn delete_objects(&mut self, ids: &[ObjectId]) -> usize {
        if self.interaction.is_gesture() {
            tracing::debug!("Delete ignored during an active gesture");
            return 0;
        }

        let removed = ids
            .iter()
            .filter(|id| self.document.remove(id).is_some())
            .count();
        if removed > 0 {
            self.prune_selection();
            self.commit_operation("delete");
        }
        removed
    }

    /// Give an object a new id; fails if `new_id` is already in use.
    pub fn rename_object(&mut self, id: &ObjectId, new_id: impl Into<ObjectId>) -> Result<()> {
        self.ensure_no_gesture("rename")?;
        let new_id = new_id.into();
        if new_id.as_str().trim().is_empty() {
            return Err(Error::other("object id must not be empty"));
        }
        if self.document.get(id).is_none() {
            return Err(LayoutError::unknown(id.as_str()).into());
        }
        if *id == new_id {
            return Ok(());
        }
        if self.document.contains_id(&new_id) {
            tracing::warn!("Rename of '{}' rejected: '{}' already exists", id, new_id);
            return Err(LayoutError::duplicate(new_id.as_str()).into());
        }

        if let Some(object) = self.document.get_mut(id) {
            object.id = new_id.clone();
        }
        for selected in self.selection.iter_mut().filter(|s| *s == id) {
            *selected = new_id.clone();
        }
        if self.hovered.as_ref() == Some(id) {
            self.hovered = Some(new_id.clone());
        }
        self.commit_operation("rename");
        Ok(())
    }

    /// Deep-copy an object (and any children) to `at` with fresh ids.
    pub fn duplicate_object(&mut self, id: &ObjectId, at: Point) -> Result<ObjectId> {
        self.ensure_no_gesture("duplicate")?;
        let source = self
            .document
            .get(id)
            .cloned()
            .ok_or_else(|| LayoutError::unknown(id.as_str()))?;

        let ids = &mut self.ids;
        let document = &self.document;
        let mut copy = source.deep_copy(&mut |kind| ids.allocate(kind, document));
        copy.position = at;

        let new_id = copy.id.clone();
        self.document.push(copy)?;
        self.selection = vec![new_id.clone()];
        self.commit_operation("duplicate");
        Ok(new_id)
    }

    pub fn set_locked(&mut self, id: &ObjectId, locked: bool) -> Result<()> {
        self.ensure_no_gesture("lock")?;
        let object = self
            .document
            .get_mut(id)
            .ok_or_else(|| LayoutError::unknown(id.as_str()))?;
        object.locked = locked;
        self.commit_operation(if locked { "lock" } else { "unlock" });
        Ok(())
    }

    /// Restyle an object; allowed on locked objects.
    pub fn set_style(&mut self, id: &ObjectId, style: Style) -> Result<()> {
        self.update_object(id, &ObjectPatch::style(style))?;
        self.commit_operation("style");
        Ok(())
    }

    pub fn set_label(&mut self, id: &ObjectId, label: Option<String>) -> Result<()> {
        self.update_object(id, &ObjectPatch::default().with_label(label))?;
        self.commit_operation("label");
        Ok(())
    }

    /// Move top-level objects into a new group placed where the topmost of
    /// them was in z-order.
    pub fn group_objects(&mut self, ids: &[ObjectId]) -> Result<ObjectId> {
        self.ensure_no_gesture("group")?;
        if ids.len() < 2 {
            return Err(Error::other("a group needs at least two objects"));
        }
        let mut indices = Vec::with_capacity(ids.len());
        for id in ids {
            let index = self
                .document
                .index_of(id)
                .ok_or_else(|| LayoutError::unknown(id.as_str()))?;
            if indices.contains(&index) {
                return Err(LayoutError::duplicate(id.as_str()).into());
            }
            indices.push(index);
        }
        indices.sort_unstable();

        // Keep document order inside the group.
        let members: Vec<ObjectId> = indices
            .iter()
            .map(|&i| self.document.objects()[i].id.clone())
            .collect();
        let insert_at = indices[indices.len() - 1] + 1 - indices.len();

        let children: Vec<PlacedObject> = members
            .iter()
            .filter_map(|id| self.document.remove(id))
            .collect();
        let (group, position) = GroupShape::from_world(children);
        let group_id = self.allocate_id(ShapeKind::Group);
        let object = PlacedObject::new(group_id.clone(), Shape::Group(group), position);
        self.document.insert_at(insert_at, object)?;

        tracing::debug!("Grouped {} objects into '{}'", members.len(), group_id);
        self.selection = vec![group_id.clone()];
        self.commit_operation("group");
        Ok(group_id)
    }

    /// Replace a group with its children in world coordinates.
    pub fn ungroup_object(&mut self, id: &ObjectId) -> Result<Vec<ObjectId>> {
        self.ensure_no_gesture("ungroup")?;
        let index = self
            .document
            .index_of(id)
            .ok_or_else(|| LayoutError::unknown(id.as_str()))?;
        let group = self.document.objects()[index].clone();
        if group.kind() != ShapeKind::Group {
            return Err(Error::other(format!("'{}' is not a group", id)));
        }

        let children = release_children(&group);
        let child_ids: Vec<ObjectId> = children.iter().map(|c| c.id.clone()).collect();
        self.document.remove(id);
        for (offset, child) in children.into_iter().enumerate() {
            self.document.insert_at(index + offset, child)?;
        }

        self.selection = child_ids.clone();
        self.prune_selection();
        self.commit_operation("ungroup");
        Ok(child_ids)
    }

    pub fn bring_to_front(&mut self, id: &ObjectId) -> Result<()> {
        self.reorder(id, usize::MAX)
    }

    pub fn send_to_back(&mut self, id: &ObjectId) -> Result<()> {
        self.reorder(id, 0)
    }

    fn reorder(&mut self, id: &ObjectId, index: usize) -> Result<()> {
        self.ensure_no_gesture("reorder")?;
        if !self.document.reorder(id, index) {
            return Err(LayoutError::unknown(id.as_str()).into());
        }
        self.commit_operation("reorder");
        Ok(())
    }

    /// Set the kind created by clicking empty canvas.
    pub fn set_active_kind(&mut self, kind: ShapeKind) -> Result<()> {
        match kind {
            ShapeKind::Rectangle | ShapeKind::Circle | ShapeKind::Text => {
                self.active_kind = kind;
                Ok(())
            }
            ShapeKind::Polygon | ShapeKind::Group => Err(LayoutError::UnsupportedKind {
                kind: kind.to_string(),
            }
            .into()),
        }
    }

    /// Select a single top-level object
    pub fn select(&mut self, id: &ObjectId) -> bool {
        if self.document.get(id).is_none() {
            return false;
        }
        self.selection = vec![id.clone()];
        true
    }

    /// Add or remove an object from the selection
    pub fn toggle_selection(&mut self, id: &ObjectId) -> bool {
        if let Some(pos) = self.selection.iter().position(|s| s == id) {
            self.selection.remove(pos);
            return true;
        }
        if self.document.get(id).is_none() {
            return false;
        }
        self.selection.push(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}
