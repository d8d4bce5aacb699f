//! Herald Core - Event kinds and events for the Herald dispatcher.
//!
//! This crate provides:
//! - [`EventKind`]: static, single-rooted event kind hierarchy with cached lineage
//! - [`Event`]: the trait every dispatched event implements
//! - [`BasicEvent`] and [`EventMetadata`] for payload-free events
//! - [`HandlerError`] / [`HandlerResult`]: what handlers return
//! - The [`standard`] kinds (`Generic Event`, `Trigger`, `Tick`, `Quit`)
//!
//! The dispatcher itself lives in `herald-events`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;
pub mod standard;

mod error;
mod event;
mod kind;

pub use error::{HandlerError, HandlerResult};
pub use event::{BasicEvent, Event, EventMetadata, GENERIC_LABEL, KindedEvent};
pub use kind::EventKind;
pub use standard::{EVENT, QUIT, QuitEvent, TICK, TRIGGER, TickEvent};
