//! Prelude module - commonly used types for convenient import.
//!
//! Use `use herald_listen::prelude::*;` to declare and wire listeners.

pub use crate::bindings;
pub use crate::{Binding, Listener, Listening, attach, detach};
