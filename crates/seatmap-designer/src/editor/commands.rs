//! Button-triggered commands: history navigation, delete requests, the
//! polygon tool and bulk generation.

use seatmap_core::{LayoutError, Result};
use seatmap_settings::SpacingMode;

use super::LayoutEditor;
use crate::events::{LayoutDiff, LayoutEvent};
use crate::generator::{auto_space, PatternGenerator, PlacementConfig, SpacingRules};
use crate::history::HistoryDirection;
use crate::interaction::EditOutcome;
use crate::model::{ObjectId, PlacedObject};

/// A discrete command from the toolbar or keyboard
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Undo,
    Redo,
    DeleteSelected,
    StartPolygon,
    CancelPolygon,
    GenerateBulk(BulkRequest),
}

/// Where the spacing of a bulk request comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkSpacing {
    /// Keep the spacing in the placement as given
    #[default]
    Given,
    /// Recompute from the template footprint with this mode
    Auto(SpacingMode),
    /// Recompute with the editor's `bulk.spacing_mode`
    Configured,
}

/// One bulk generation: a template copied to every position of a pattern
#[derive(Debug, Clone, PartialEq)]
pub struct BulkRequest {
    pub template: PlacedObject,
    pub config: PlacementConfig,
    pub spacing: BulkSpacing,
}

impl BulkRequest {
    pub fn new(template: PlacedObject, config: PlacementConfig) -> Self {
        Self {
            template,
            config,
            spacing: BulkSpacing::Given,
        }
    }

    pub fn with_auto_spacing(mut self, mode: SpacingMode) -> Self {
        self.spacing = BulkSpacing::Auto(mode);
        self
    }

    /// Auto-space with whatever mode the editor config names
    pub fn with_configured_spacing(mut self) -> Self {
        self.spacing = BulkSpacing::Configured;
        self
    }
}

impl LayoutEditor {
    pub fn execute(&mut self, command: Command) -> Result<EditOutcome> {
        let outcome = match command {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::DeleteSelected => {
                if self.selection.is_empty() || self.interaction.is_gesture() {
                    EditOutcome::Ignored
                } else {
                    EditOutcome::DeleteRequested(self.selection.clone())
                }
            }
            Command::StartPolygon => self.start_polygon(),
            Command::CancelPolygon => self.cancel_polygon(),
            Command::GenerateBulk(request) => {
                if !self.interaction.is_idle() {
                    tracing::trace!("Bulk generation ignored while {}", self.interaction.name());
                    EditOutcome::Ignored
                } else {
                    EditOutcome::Generated(self.generate_bulk(&request)?)
                }
            }
        };
        Ok(outcome)
    }

    /// Step back one history entry; a no-op at the start of history.
    pub fn undo(&mut self) -> EditOutcome {
        self.move_history(HistoryDirection::Undo)
    }

    /// Step forward one history entry; a no-op at the end of history.
    pub fn redo(&mut self) -> EditOutcome {
        self.move_history(HistoryDirection::Redo)
    }

    fn move_history(&mut self, direction: HistoryDirection) -> EditOutcome {
        if self.interaction.is_gesture() {
            tracing::trace!("{:?} ignored during an active gesture", direction);
            return EditOutcome::Ignored;
        }

        let target = match direction {
            HistoryDirection::Undo => self.history.undo(),
            HistoryDirection::Redo => self.history.redo(),
        };
        let Some(target) = target.cloned() else {
            tracing::trace!("{:?} at history boundary", direction);
            return EditOutcome::Ignored;
        };

        let previous = std::mem::replace(&mut self.document, target);
        self.prune_selection();
        tracing::debug!(
            "{:?} to history {}/{}",
            direction,
            self.history.cursor() + 1,
            self.history.len()
        );
        self.publish(LayoutEvent::HistoryMoved {
            direction,
            diff: LayoutDiff::between(&previous, &self.document),
            objects: self.document.objects().to_vec(),
        });
        EditOutcome::HistoryMoved
    }

    /// Generate a batch from `request` and append it as one history entry.
    ///
    /// The placement is validated first; an invalid one leaves the document
    /// untouched. Outside the idle state this fails with
    /// [`LayoutError::GestureInProgress`]; [`Command::GenerateBulk`] ignores
    /// the request instead.
    pub fn generate_bulk(&mut self, request: &BulkRequest) -> Result<Vec<ObjectId>> {
        if !self.interaction.is_idle() {
            return Err(LayoutError::busy("generate", self.interaction.name()).into());
        }

        let mode = match request.spacing {
            BulkSpacing::Given => None,
            BulkSpacing::Auto(mode) => Some(mode),
            BulkSpacing::Configured => Some(self.config.bulk.spacing_mode),
        };
        let config = match mode {
            Some(mode) => {
                let rules = SpacingRules::from(&self.config.bulk);
                auto_space(&request.config, &request.template, mode, &rules)
            }
            None => request.config.clone(),
        };
        config.validate(self.config.bulk.max_objects)?;

        let ids = &mut self.ids;
        let document = &self.document;
        let objects =
            PatternGenerator::generate(&request.template, &config, &mut |kind| {
                ids.allocate(kind, document)
            });

        let mut next = self.document.clone();
        let mut created = Vec::with_capacity(objects.len());
        for object in objects {
            created.push(object.id.clone());
            next.push(object)?;
        }
        self.document = next;

        tracing::info!(
            "Bulk generated {} {} objects",
            created.len(),
            request.template.kind()
        );
        self.selection = created.clone();
        self.commit_operation("generate");
        Ok(created)
    }
}
