//! Prelude module - commonly used types for convenient import.
//!
//! Use `use herald_events::prelude::*;` to import the manager together with
//! the core event types it works with.

// Manager
pub use crate::{EventManager, FaultPolicy, ManagerConfig};

// Handlers
pub use crate::{HandlerRef, LiveHandler};

// Errors
pub use crate::{DispatchError, DispatchResult};

// Core types
pub use herald_core::{Event, EventKind, HandlerError, HandlerResult, KindedEvent};
