//! Prelude module - commonly used types for convenient import.
//!
//! Use `use herald_core::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use herald_core::prelude::*;
//!
//! let tick = TickEvent::new(3);
//! assert_eq!(tick.kind(), &TICK);
//! assert!(TICK.descends_from(&EVENT));
//! ```

// Kinds
pub use crate::EventKind;
pub use crate::declare_kind;

// Events
pub use crate::{BasicEvent, Event, EventMetadata, KindedEvent};

// Errors
pub use crate::{HandlerError, HandlerResult};

// Standard family
pub use crate::{EVENT, QUIT, QuitEvent, TICK, TRIGGER, TickEvent};
