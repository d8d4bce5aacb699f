//! Herald Events - the event manager.
//!
//! This crate provides:
//! - [`EventManager`]: queued subscribe/unsubscribe/send with a
//!   reentrancy-safe, non-blocking single-flight drain
//! - [`HandlerRef`]: strong, weak and bound-method handler references
//! - [`SubscriberSet`]: the insertion-ordered per-kind handler set
//! - [`DispatchError`] and [`FaultPolicy`] for handler faults
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use herald_core::{TICK, TickEvent};
//! use herald_events::{EventManager, HandlerRef};
//!
//! let manager = EventManager::default();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! manager.subscribe(&TICK, HandlerRef::observer("printer", move |event| {
//!     sink.lock().unwrap().push(event.label().to_owned());
//! }));
//! manager.send(TickEvent::new(0))?;
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["Tick Event"]);
//! # Ok::<(), herald_events::DispatchError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod config;
mod error;
mod gate;
mod handler;
mod manager;
mod queue;
mod registry;

pub use config::{DEFAULT_MANAGER_NAME, FaultPolicy, ManagerConfig, ParseFaultPolicyError};
pub use error::{DispatchError, DispatchResult};
pub use handler::{BoundMethod, HandlerFn, HandlerKey, HandlerRef, LiveHandler};
pub use manager::EventManager;
pub use queue::{PendingAction, PendingCounts};
pub use registry::SubscriberSet;
