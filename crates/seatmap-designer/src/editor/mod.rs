//! Layout editor: document, history and interaction state for one session.
//!
//! This module is split into submodules:
//! - `objects`: Object creation, updates, deletion, grouping and selection
//! - `pointer`: Pointer-down/move/up/leave handling
//! - `polygon`: The polygon drawing tool
//! - `commands`: Discrete button commands and bulk generation

mod commands;
mod objects;
mod pointer;
mod polygon;

use std::sync::Arc;

use seatmap_core::{EventBus, EventBusError, LayoutError, Result};
use seatmap_settings::Config;

use crate::document::{IdAllocator, LayoutDocument};
use crate::events::{LayoutDiff, LayoutEvent};
use crate::history::HistoryStack;
use crate::interaction::Interaction;
use crate::model::{ObjectId, PlacedObject, ShapeKind};
use crate::render::RenderScene;

pub use commands::{BulkRequest, BulkSpacing, Command};

/// Editing session over one layout document
#[derive(Debug)]
pub struct LayoutEditor {
    config: Config,
    document: LayoutDocument,
    history: HistoryStack,
    interaction: Interaction,
    selection: Vec<ObjectId>,
    hovered: Option<ObjectId>,
    ids: IdAllocator,
    active_kind: ShapeKind,
    events: Option<Arc<EventBus<LayoutEvent>>>,
}

impl LayoutEditor {
    /// Creates an editor over an empty document.
    pub fn new(config: Config) -> Self {
        let history = HistoryStack::new(LayoutDocument::new(), config.history.max_depth);
        Self {
            config,
            document: LayoutDocument::new(),
            history,
            interaction: Interaction::Idle,
            selection: Vec::new(),
            hovered: None,
            ids: IdAllocator::new(),
            active_kind: ShapeKind::Rectangle,
            events: None,
        }
    }

    /// Attach an event bus that observes committed operations.
    pub fn with_events(mut self, bus: Arc<EventBus<LayoutEvent>>) -> Self {
        self.events = Some(bus);
        self
    }

    /// Replace the document with an externally supplied object list.
    ///
    /// The list becomes history index 0; any gesture in progress is dropped.
    pub fn load(&mut self, objects: Vec<PlacedObject>) -> Result<()> {
        let document = LayoutDocument::from_objects(objects)?;

        self.interaction = Interaction::Idle;
        self.selection.clear();
        self.hovered = None;
        self.ids.reserve_from(&document);
        self.history.reset(document.clone());
        self.document = document;

        tracing::info!("Loaded layout with {} objects", self.document.len());
        self.publish(LayoutEvent::DocumentLoaded {
            objects: self.document.objects().to_vec(),
        });
        Ok(())
    }

    pub fn document(&self) -> &LayoutDocument {
        &self.document
    }

    /// Full object list, as handed to persistence
    pub fn objects(&self) -> &[PlacedObject] {
        self.document.objects()
    }

    pub fn object(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.document.get(id)
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn hovered(&self) -> Option<&ObjectId> {
        self.hovered.as_ref()
    }

    pub fn selection(&self) -> &[ObjectId] {
        &self.selection
    }

    pub fn active_kind(&self) -> ShapeKind {
        self.active_kind
    }

    /// Everything a render adapter needs for one frame
    pub fn scene(&self) -> RenderScene<'_> {
        RenderScene {
            document: &self.document,
            interaction: &self.interaction,
            hovered: self.hovered.as_ref(),
            selection: &self.selection,
        }
    }

    fn grid_cell(&self) -> Option<f64> {
        self.config.grid.effective_cell()
    }

    fn allocate_id(&mut self, kind: ShapeKind) -> ObjectId {
        self.ids.allocate(kind, &self.document)
    }

    /// Reject document mutations while a drag, resize, rotate or copy owns
    /// the document.
    fn ensure_no_gesture(&self, operation: &str) -> Result<()> {
        if self.interaction.is_gesture() {
            tracing::debug!("'{}' rejected during {}", operation, self.interaction.name());
            return Err(LayoutError::busy(operation, self.interaction.name()).into());
        }
        Ok(())
    }

    /// Put the live document back to the history cursor after a gesture lost
    /// its target.
    fn restore_from_history(&mut self) {
        self.document = self.history.current().clone();
        self.prune_selection();
    }

    /// Record the live document as one history entry.
    ///
    /// Skipped while a gesture is in progress or when nothing changed.
    fn commit_operation(&mut self, operation: &str) -> bool {
        if self.interaction.is_gesture() {
            tracing::trace!("Commit of '{}' deferred until gesture ends", operation);
            return false;
        }

        let previous = self.history.current().clone();
        if !self.history.push(self.document.clone()) {
            tracing::trace!("'{}' left the document unchanged", operation);
            return false;
        }

        tracing::debug!(
            "Committed '{}' ({} objects, history {}/{})",
            operation,
            self.document.len(),
            self.history.cursor() + 1,
            self.history.len()
        );
        self.publish(LayoutEvent::Committed {
            operation: operation.to_string(),
            diff: LayoutDiff::between(&previous, &self.document),
            objects: self.document.objects().to_vec(),
        });
        true
    }

    /// Drop selection and hover entries that no longer exist
    fn prune_selection(&mut self) {
        let document = &self.document;
        self.selection.retain(|id| document.get(id).is_some());
        if self
            .hovered
            .as_ref()
            .is_some_and(|id| document.get(id).is_none())
        {
            self.hovered = None;
        }
    }

    fn publish(&self, event: LayoutEvent) {
        let Some(bus) = &self.events else {
            return;
        };
        match bus.publish(event) {
            Ok(_) | Err(EventBusError::NoSubscribers) => {}
            Err(e) => tracing::warn!("Failed to publish layout event: {}", e),
        }
    }
}

impl Default for LayoutEditor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
