//! Layout files.
//!
//! A layout is stored as pretty-printed JSON holding a format version, some
//! metadata and the full object list.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::document::LayoutDocument;
use crate::model::PlacedObject;

/// Layout file format version
pub const FILE_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutFile {
    pub version: String,
    pub metadata: LayoutMetadata,
    pub objects: Vec<PlacedObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

impl LayoutFile {
    /// Create an empty layout file
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: LayoutMetadata {
                name: name.into(),
                created: now,
                modified: now,
                description: String::new(),
            },
            objects: Vec::new(),
        }
    }

    pub fn with_objects(mut self, objects: Vec<PlacedObject>) -> Self {
        self.objects = objects;
        self
    }

    /// Mark the layout as modified now
    pub fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }

    /// Validated document for the stored objects
    pub fn to_document(&self) -> Result<LayoutDocument> {
        LayoutDocument::from_objects(self.objects.clone())
            .with_context(|| format!("Layout '{}' has invalid objects", self.metadata.name))
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize layout")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write layout file {}", path.display()))?;
        tracing::debug!("Saved {} objects to {}", self.objects.len(), path.display());
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?;
        let file: LayoutFile =
            serde_json::from_str(&content).context("Failed to parse layout file")?;

        if file.version != FILE_FORMAT_VERSION {
            bail!(
                "Unsupported layout file version '{}' (expected {})",
                file.version,
                FILE_FORMAT_VERSION
            );
        }
        tracing::debug!("Loaded {} objects from {}", file.objects.len(), path.display());
        Ok(file)
    }
}
