//! Error handling for the seatmap engine
//!
//! Provides the error types shared by all layers of the editor:
//! - Layout errors (programmer-error conditions in the object model)
//! - I/O and JSON errors raised at the file boundary
//!
//! Expected user behaviour (clicking empty space, dragging a locked seat,
//! undoing past the first snapshot) never produces an error. These types are
//! reserved for conditions the calling layer must handle, such as a rename
//! that collides with an existing id.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Layout error type
///
/// Represents rejected operations on a layout document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// An object with this id already exists in the document
    #[error("Object id '{id}' already exists")]
    DuplicateId {
        /// The colliding id.
        id: String,
    },

    /// No top-level object carries this id
    #[error("Unknown object '{id}'")]
    UnknownObject {
        /// The id that was looked up.
        id: String,
    },

    /// A polygon reached commit with too few vertices
    #[error("Polygon needs at least 3 vertices, got {vertices}")]
    InvalidPolygon {
        /// Number of vertices collected.
        vertices: usize,
    },

    /// Bulk placement parameters were rejected before generation
    #[error("Invalid placement: {reason}")]
    InvalidPlacement {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// The requested kind cannot be created this way
    #[error("Cannot create a {kind} object from a single point")]
    UnsupportedKind {
        /// The kind name.
        kind: String,
    },

    /// An object would be owned twice (top-level and inside a group)
    #[error("Object '{id}' is owned by more than one parent")]
    OwnershipViolation {
        /// The doubly-owned id.
        id: String,
    },

    /// A document mutation was attempted while a gesture owns the document
    #[error("Cannot {operation} while a {state} gesture is in progress")]
    GestureInProgress {
        /// The rejected operation.
        operation: String,
        /// The active interaction state.
        state: String,
    },
}

impl LayoutError {
    /// Create a duplicate-id error
    pub fn duplicate(id: impl Into<String>) -> Self {
        LayoutError::DuplicateId { id: id.into() }
    }

    /// Create an unknown-object error
    pub fn unknown(id: impl Into<String>) -> Self {
        LayoutError::UnknownObject { id: id.into() }
    }

    /// Create an error for a mutation rejected during a gesture
    pub fn busy(operation: impl Into<String>, state: impl Into<String>) -> Self {
        LayoutError::GestureInProgress {
            operation: operation.into(),
            state: state.into(),
        }
    }

    /// Create an invalid-placement error
    pub fn placement(reason: impl Into<String>) -> Self {
        LayoutError::InvalidPlacement {
            reason: reason.into(),
        }
    }
}

/// Main error type for the seatmap engine
#[derive(Error, Debug)]
pub enum Error {
    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a duplicate-id rejection the caller should re-prompt for
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, Error::Layout(LayoutError::DuplicateId { .. }))
    }

    /// Returns the inner layout error, if any
    pub fn as_layout(&self) -> Option<&LayoutError> {
        match self {
            Error::Layout(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for seatmap operations
pub type Result<T> = std::result::Result<T, Error>;
