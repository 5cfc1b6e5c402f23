//! Event Bus System
//!
//! A typed publish/subscribe hub used to tell external collaborators
//! (persistence backends, UIs) what changed in a layout document.
//!
//! The bus is generic over the event type so that each layer defines its own
//! events without the core crate knowing about them.
//!
//! # Example
//!
//! ```rust,ignore
//! use seatmap_core::event_bus::{EventBus, EventFilter};
//!
//! let bus = EventBus::<MyEvent>::new();
//! let sub = bus.subscribe(EventFilter::All, |event| {
//!     println!("{:?}", event);
//! });
//! bus.publish(MyEvent::Saved)?;
//! bus.unsubscribe(sub);
//! ```

mod bus;

pub use bus::{BusEvent, EventBus, EventBusConfig, EventBusError, EventFilter, SubscriptionId};
