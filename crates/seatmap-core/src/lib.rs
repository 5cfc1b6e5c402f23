//! # seatmap-core
//!
//! Core types shared by the seatmap crates:
//! - Error types ([`Error`], [`LayoutError`])
//! - A generic, per-session event bus

pub mod error;
pub mod event_bus;

pub use error::{Error, LayoutError, Result};
pub use event_bus::{BusEvent, EventBus, EventBusConfig, EventBusError, EventFilter, SubscriptionId};
