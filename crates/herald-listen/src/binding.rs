//! Static (kind, method) binding tables.

use std::fmt;
use std::sync::Arc;

use herald_core::{Event, EventKind, HandlerResult};
use herald_events::HandlerRef;

type MakeHandler<R> = dyn Fn(&'static str, &Arc<R>) -> HandlerRef + Send + Sync;

/// One method of `R` bound to one event kind.
///
/// The method keeps its fn item type, so two methods with identical bodies
/// still produce distinct handlers.
pub struct Binding<R> {
    kind: &'static EventKind,
    name: &'static str,
    make: Arc<MakeHandler<R>>,
}

impl<R> Binding<R>
where
    R: Send + Sync + 'static,
{
    /// Bind `method` to `kind`. `name` appears in logs and dispatch errors.
    #[must_use]
    pub fn new<F>(kind: &'static EventKind, name: &'static str, method: F) -> Self
    where
        F: Fn(&R, &dyn Event) -> HandlerResult + Copy + Send + Sync + 'static,
    {
        Self {
            kind,
            name,
            make: Arc::new(move |name: &'static str, receiver: &Arc<R>| {
                HandlerRef::bound(name, receiver, method)
            }),
        }
    }

    /// Target kind.
    #[must_use]
    pub fn kind(&self) -> &'static EventKind {
        self.kind
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build the weak handler reference for `receiver`.
    ///
    /// Calling this twice for the same receiver yields equal references.
    #[must_use]
    pub fn handler(&self, receiver: &Arc<R>) -> HandlerRef {
        (self.make)(self.name, receiver)
    }
}

impl<R> Clone for Binding<R> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            name: self.name,
            make: Arc::clone(&self.make),
        }
    }
}

impl<R> fmt::Debug for Binding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("kind", &self.kind.name())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A type whose methods handle events.
///
/// Implementors list their handlers once; [`attach`](crate::attach) and
/// [`Listening`](crate::Listening) turn that list into subscriptions.
///
/// ```rust
/// use herald_core::{Event, HandlerResult, QUIT, TICK};
/// use herald_listen::{Binding, Listener, bindings};
///
/// struct Clock;
///
/// impl Clock {
///     fn on_tick(&self, _event: &dyn Event) -> HandlerResult {
///         Ok(())
///     }
///
///     fn on_quit(&self, _event: &dyn Event) -> HandlerResult {
///         Ok(())
///     }
/// }
///
/// impl Listener for Clock {
///     fn bindings() -> Vec<Binding<Self>> {
///         bindings![
///             TICK => Self::on_tick,
///             QUIT => Self::on_quit,
///         ]
///     }
/// }
///
/// assert_eq!(Clock::bindings().len(), 2);
/// ```
pub trait Listener: Send + Sync + Sized + 'static {
    /// Handler table, in subscription order.
    fn bindings() -> Vec<Binding<Self>>;
}

/// Build a `Vec<Binding<Self>>` from `KIND => Self::method` pairs.
#[macro_export]
macro_rules! bindings {
    ($($kind:expr => $method:path),* $(,)?) => {
        vec![$($crate::Binding::new(&$kind, stringify!($method), $method)),*]
    };
}
