//! Herald Test - Shared test utilities for Herald crates.
//!
//! This crate provides a small event kind hierarchy, recording and failing
//! handlers, and a tracing setup helper for use as a dev-dependency.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! herald-test.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust
//! use herald_events::EventManager;
//! use herald_test::{BASE, Recorder, TICK};
//!
//! let manager = EventManager::default();
//! let recorder = Recorder::new();
//!
//! manager.subscribe(&TICK, recorder.handler("h"));
//! manager.emit(&BASE).unwrap();
//!
//! assert_eq!(recorder.entries(), vec!["h:Base"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
