//! Parts: the addressable UI units placed into zone stacks.

use std::fmt;
use std::rc::Rc;

/// An addressable UI unit.
///
/// The identifier is what gets persisted; two parts with the same identifier
/// are the same part as far as layout is concerned.
pub trait Part {
    /// Stable identifier used for persistence.
    fn id(&self) -> &str;

    /// Perspectives this part may be placed in. Empty means unrestricted.
    fn rules(&self) -> &[String] {
        &[]
    }

    /// Persist internal state before the owning perspective is switched away.
    fn store_state(&self) {}

    /// Reinstate internal state after the owning perspective comes back.
    fn restore_state(&self) {}
}

/// Shared handle to a [`Part`].
///
/// Cloning is cheap and never copies the part. Equality compares identifiers.
#[derive(Clone)]
pub struct PartHandle(Rc<dyn Part>);

impl PartHandle {
    /// Wrap a part in a new handle.
    #[must_use]
    pub fn new(part: impl Part + 'static) -> Self {
        Self(Rc::new(part))
    }

    /// Wrap an already shared part.
    #[must_use]
    pub fn from_rc(part: Rc<dyn Part>) -> Self {
        Self(part)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.0.id()
    }

    #[must_use]
    pub fn rules(&self) -> &[String] {
        self.0.rules()
    }

    /// Whether this part may be placed in the perspective `perspective_id`.
    #[must_use]
    pub fn allowed_in(&self, perspective_id: &str) -> bool {
        let rules = self.rules();
        rules.is_empty() || rules.iter().any(|rule| rule == perspective_id)
    }

    pub fn store_state(&self) {
        self.0.store_state();
    }

    pub fn restore_state(&self) {
        self.0.restore_state();
    }

    /// Whether both handles point at the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for PartHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for PartHandle {}

impl fmt::Debug for PartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PartHandle").field(&self.id()).finish()
    }
}

/// Relative-ordering hint used when adding a part to a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Insert before every existing member.
    First,
    /// Append after every existing member.
    Last,
    /// Insert directly before the member with this identifier.
    Before(String),
    /// Insert directly after the member with this identifier.
    After(String),
}

impl Constraint {
    /// Insertion index into `members` honoring this hint.
    ///
    /// An anchor that is not a member falls back to appending.
    pub(crate) fn insertion_index(&self, members: &[PartHandle]) -> usize {
        let anchor = |id: &str| members.iter().position(|part| part.id() == id);
        match self {
            Self::First => 0,
            Self::Last => members.len(),
            Self::Before(id) => anchor(id).unwrap_or(members.len()),
            Self::After(id) => anchor(id).map_or(members.len(), |index| index + 1),
        }
    }
}
