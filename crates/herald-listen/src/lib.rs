//! Herald Listen - registration sugar for event handlers.
//!
//! A [`Listener`] declares a static table of `(kind, method)` pairs with the
//! [`bindings!`] macro. [`attach`] subscribes each pair against an
//! [`EventManager`](herald_events::EventManager) through its public
//! `subscribe` call, and [`Listening`] does the same when it is constructed.
//! Every handler is a weak bound reference, so wiring never extends the
//! receiver's lifetime.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod attach;
mod binding;

pub use attach::{Listening, attach, detach};
pub use binding::{Binding, Listener};
