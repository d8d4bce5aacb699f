//! Event kinds and their ancestor lineage.
//!
//! Every event kind is a `static` [`EventKind`] that names its parent. The
//! parent chain forms a single-rooted tree that is closed once the program is
//! compiled: kinds are declared, never registered or mutated at runtime.
//!
//! Identity is the address of the static, not the name. Two kinds that share
//! a display name are still distinct kinds.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Declare one or more event kinds as statics.
///
/// A kind without a parent is a root kind. A kind with `: PARENT` descends
/// from `PARENT`.
///
/// ```rust
/// use herald_core::{EventKind, declare_kind};
///
/// declare_kind! {
///     /// Root of the example family.
///     pub static BASE = "Base";
///     /// Periodic tick.
///     pub static TICK = "Tick" : BASE;
/// }
///
/// assert_eq!(TICK.lineage().len(), 2);
/// assert!(TICK.descends_from(&BASE));
/// ```
#[macro_export]
macro_rules! declare_kind {
    (@new $name:literal) => {
        $crate::EventKind::root($name)
    };
    (@new $name:literal, $parent:path) => {
        $crate::EventKind::child($name, &$parent)
    };
    ($( $(#[$meta:meta])* $vis:vis static $ident:ident = $name:literal $(: $parent:path)? ; )+) => {
        $(
            $(#[$meta])*
            $vis static $ident: $crate::EventKind = $crate::declare_kind!(@new $name $(, $parent)?);
        )+
    };
}

/// Type identity of an event, with a fixed ancestor chain.
///
/// Must be declared as a `static` (see [`declare_kind!`]); a `const` kind
/// would be duplicated at every use site and lose its identity.
pub struct EventKind {
    name: &'static str,
    parent: Option<&'static EventKind>,
    lineage: OnceLock<Box<[&'static EventKind]>>,
}

impl EventKind {
    /// Create a root kind (no ancestors).
    #[must_use]
    pub const fn root(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            lineage: OnceLock::new(),
        }
    }

    /// Create a kind that descends from `parent`.
    #[must_use]
    pub const fn child(name: &'static str, parent: &'static EventKind) -> Self {
        Self {
            name,
            parent: Some(parent),
            lineage: OnceLock::new(),
        }
    }

    /// Human-readable name of the kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Direct parent, or `None` for a root kind.
    #[must_use]
    pub const fn parent(&self) -> Option<&'static EventKind> {
        self.parent
    }

    /// Whether this kind has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Ordered ancestor chain from this kind up to and including its root.
    ///
    /// Computed on first use and cached for the lifetime of the program.
    ///
    /// # Panics
    ///
    /// Panics if the parent chain loops back on itself. Such a hierarchy can
    /// only come from mutually-referencing statics and is a declaration bug.
    #[must_use]
    pub fn lineage(&'static self) -> &'static [&'static EventKind] {
        self.lineage.get_or_init(|| walk_ancestors(self).into_boxed_slice())
    }

    /// The root kind this kind ultimately descends from.
    #[must_use]
    pub fn root_kind(&'static self) -> &'static EventKind {
        self.lineage().last().copied().unwrap_or(self)
    }

    /// Number of ancestors above this kind (zero for a root).
    #[must_use]
    pub fn depth(&'static self) -> usize {
        self.lineage().len().saturating_sub(1)
    }

    /// Whether `ancestor` appears in this kind's lineage (a kind descends
    /// from itself).
    #[must_use]
    pub fn descends_from(&'static self, ancestor: &EventKind) -> bool {
        self.lineage().iter().any(|kind| *kind == ancestor)
    }
}

fn walk_ancestors(start: &'static EventKind) -> Vec<&'static EventKind> {
    let mut chain: Vec<&'static EventKind> = vec![start];
    let mut current = start;
    while let Some(parent) = current.parent {
        assert!(
            !chain.iter().any(|seen| std::ptr::eq(*seen, parent)),
            "event kind hierarchy loops through `{}`",
            parent.name
        );
        chain.push(parent);
        current = parent;
    }
    chain
}

impl PartialEq for EventKind {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for EventKind {}

impl Hash for EventKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::from_ref(self).addr().hash(state);
    }
}

impl fmt::Debug for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventKind")
            .field("name", &self.name)
            .field("parent", &self.parent.map(EventKind::name))
            .finish()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    declare_kind! {
        static ROOT = "Root";
        static MIDDLE = "Middle" : ROOT;
        static LEAF = "Leaf" : MIDDLE;
        static OTHER = "Other" : ROOT;
        static ROOT_TWIN = "Root";
    }

    #[test]
    fn test_root_lineage_is_itself() {
        assert!(ROOT.is_root());
        assert_eq!(ROOT.lineage(), &[&ROOT]);
        assert_eq!(ROOT.depth(), 0);
    }

    #[test]
    fn test_lineage_runs_from_kind_to_root() {
        let names: Vec<_> = LEAF.lineage().iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["Leaf", "Middle", "Root"]);
        assert_eq!(LEAF.depth(), 2);
        assert_eq!(LEAF.root_kind(), &ROOT);
    }

    #[test]
    fn test_lineage_is_cached() {
        let first = LEAF.lineage();
        let second = LEAF.lineage();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_descends_from() {
        assert!(LEAF.descends_from(&LEAF));
        assert!(LEAF.descends_from(&MIDDLE));
        assert!(LEAF.descends_from(&ROOT));
        assert!(!LEAF.descends_from(&OTHER));
        assert!(!ROOT.descends_from(&LEAF));
    }

    #[test]
    fn test_identity_is_by_address_not_name() {
        assert_ne!(ROOT, ROOT_TWIN);
        assert_eq!(ROOT.name(), ROOT_TWIN.name());

        let mut set = HashSet::new();
        set.insert(&ROOT);
        set.insert(&ROOT_TWIN);
        set.insert(&ROOT);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parent_accessor() {
        assert_eq!(MIDDLE.parent(), Some(&ROOT));
        assert_eq!(ROOT.parent(), None);
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(LEAF.to_string(), "Leaf");
        let debug = format!("{LEAF:?}");
        assert!(debug.contains("Middle"));
    }
}
