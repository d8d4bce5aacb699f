//! Handler references.
//!
//! A [`HandlerRef`] is what the registry stores. It never owns a bound
//! receiver: bound handlers hold a [`Weak`] to it and resolve to "expired"
//! once the receiver is dropped.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use herald_core::{Event, HandlerResult};

/// Signature of a plain handler closure.
pub type HandlerFn = dyn Fn(&dyn Event) -> HandlerResult + Send + Sync;

/// Signature of a method bound to a receiver of type `R`.
pub type BoundMethod<R> = fn(&R, &dyn Event) -> HandlerResult;

/// What a [`HandlerKey`] uses to tell callables apart.
///
/// Function addresses are not unique: the optimizer may merge two methods
/// with identical bodies. Fn items are therefore told apart by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Callable {
    /// Address of a shared closure allocation.
    Shared(usize),
    /// A fn item or closure type.
    Item(TypeId),
    /// A fn pointer, which erased the item type.
    Pointer(usize),
}

impl Callable {
    fn of<R, F>(method: &F) -> Self
    where
        R: 'static,
        F: Any,
    {
        match (method as &dyn Any).downcast_ref::<BoundMethod<R>>() {
            Some(pointer) => Self::Pointer(*pointer as usize),
            None => Self::Item(TypeId::of::<F>()),
        }
    }
}

/// Identity of a handler: (callable, receiver).
///
/// Two references with equal keys are the same subscription, which is what
/// makes repeated subscribes idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerKey {
    callable: Callable,
    receiver: usize,
}

impl HandlerKey {
    fn plain(address: usize) -> Self {
        Self {
            callable: Callable::Shared(address),
            receiver: 0,
        }
    }

    /// Whether this key identifies a bound method.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.receiver != 0
    }
}

/// A handler that has been resolved and can be invoked.
///
/// Holding a `LiveHandler` keeps a bound receiver alive for as long as the
/// invocation needs it.
#[derive(Clone)]
pub struct LiveHandler {
    call: Arc<HandlerFn>,
}

impl LiveHandler {
    /// Invoke the handler with `event`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the handler returns.
    pub fn invoke(&self, event: &dyn Event) -> HandlerResult {
        (self.call)(event)
    }
}

impl fmt::Debug for LiveHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveHandler").finish_non_exhaustive()
    }
}

trait BoundTarget: Send + Sync {
    fn resolve(&self) -> Option<LiveHandler>;
    fn is_expired(&self) -> bool;
}

struct Bound<R, F> {
    receiver: Weak<R>,
    method: F,
}

impl<R, F> BoundTarget for Bound<R, F>
where
    R: Send + Sync + 'static,
    F: Fn(&R, &dyn Event) -> HandlerResult + Copy + Send + Sync + 'static,
{
    fn resolve(&self) -> Option<LiveHandler> {
        let receiver = self.receiver.upgrade()?;
        let method = self.method;
        Some(LiveHandler {
            call: Arc::new(move |event: &dyn Event| method(&receiver, event)),
        })
    }

    fn is_expired(&self) -> bool {
        self.receiver.strong_count() == 0
    }
}

#[derive(Clone)]
enum Target {
    Strong(Arc<HandlerFn>),
    Weak(Weak<HandlerFn>),
    Bound(Arc<dyn BoundTarget>),
}

/// Non-owning (or, for plain closures, optionally owning) reference to a
/// subscribed handler.
///
/// Equality and hashing use the [`HandlerKey`], never the name.
#[derive(Clone)]
pub struct HandlerRef {
    target: Target,
    key: HandlerKey,
    name: Arc<str>,
}

impl HandlerRef {
    /// Wrap a closure, held strongly by the registry.
    ///
    /// Clone the returned reference to unsubscribe it later; a second call to
    /// `new` with an identical closure is a different handler.
    pub fn new<F>(name: impl Into<Arc<str>>, handler: F) -> Self
    where
        F: Fn(&dyn Event) -> HandlerResult + Send + Sync + 'static,
    {
        Self::strong(name, Arc::new(handler))
    }

    /// Wrap a closure that cannot fail.
    pub fn observer<F>(name: impl Into<Arc<str>>, handler: F) -> Self
    where
        F: Fn(&dyn Event) + Send + Sync + 'static,
    {
        Self::new(name, move |event: &dyn Event| {
            handler(event);
            Ok(())
        })
    }

    /// Reference an already shared closure strongly.
    pub fn strong(name: impl Into<Arc<str>>, handler: Arc<HandlerFn>) -> Self {
        let key = HandlerKey::plain(Arc::as_ptr(&handler).cast::<()>().addr());
        Self {
            target: Target::Strong(handler),
            key,
            name: name.into(),
        }
    }

    /// Reference a shared closure weakly.
    ///
    /// The reference expires when the last [`Arc`] to the closure is dropped.
    /// Shares its key with [`HandlerRef::strong`] on the same `Arc`.
    pub fn weak(name: impl Into<Arc<str>>, handler: &Arc<HandlerFn>) -> Self {
        let key = HandlerKey::plain(Arc::as_ptr(handler).cast::<()>().addr());
        Self {
            target: Target::Weak(Arc::downgrade(handler)),
            key,
            name: name.into(),
        }
    }

    /// Bind `method` to `receiver` without keeping the receiver alive.
    ///
    /// The same method bound to the same receiver always yields an equal
    /// reference, and distinct methods never do. Pass methods by path
    /// (`Receiver::on_event`); a [`BoundMethod`] pointer is keyed by address
    /// and is not equal to the same method passed by path.
    pub fn bound<R, F>(name: impl Into<Arc<str>>, receiver: &Arc<R>, method: F) -> Self
    where
        R: Send + Sync + 'static,
        F: Fn(&R, &dyn Event) -> HandlerResult + Copy + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(receiver);
        let key = HandlerKey {
            callable: Callable::of::<R, F>(&method),
            receiver: Weak::as_ptr(&weak).cast::<()>().addr(),
        };
        Self {
            target: Target::Bound(Arc::new(Bound {
                receiver: weak,
                method,
            })),
            key,
            name: name.into(),
        }
    }

    /// Resolve to a callable handler, or `None` if the target is gone.
    #[must_use]
    pub fn resolve(&self) -> Option<LiveHandler> {
        match &self.target {
            Target::Strong(call) => Some(LiveHandler {
                call: Arc::clone(call),
            }),
            Target::Weak(call) => call.upgrade().map(|call| LiveHandler { call }),
            Target::Bound(bound) => bound.resolve(),
        }
    }

    /// Whether the target has been dropped.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        match &self.target {
            Target::Strong(_) => false,
            Target::Weak(call) => call.strong_count() == 0,
            Target::Bound(bound) => bound.is_expired(),
        }
    }

    /// Identity key.
    #[must_use]
    pub fn key(&self) -> HandlerKey {
        self.key
    }

    /// Name used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for HandlerRef {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for HandlerRef {}

impl Hash for HandlerRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flavor = match self.target {
            Target::Strong(_) => "strong",
            Target::Weak(_) => "weak",
            Target::Bound(_) => "bound",
        };
        f.debug_struct("HandlerRef")
            .field("name", &self.name)
            .field("flavor", &flavor)
            .field("expired", &self.is_expired())
            .finish()
    }
}
