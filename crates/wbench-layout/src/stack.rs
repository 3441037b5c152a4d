//! Per-zone ordered part collections.

use crate::part::{Constraint, PartHandle};

/// Ordered parts of one zone plus its active member.
///
/// # Invariants
///
/// 1. No two members share an identifier.
/// 2. `active` and `previous_active`, when set, are members.
/// 3. Insertion order is preserved; it drives persisted order.
#[derive(Debug, Clone, Default)]
pub struct PartStack {
    parts: Vec<PartHandle>,
    active: Option<PartHandle>,
    previous_active: Option<PartHandle>,
}

impl PartStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Members in stack order.
    #[must_use]
    pub fn parts(&self) -> &[PartHandle] {
        &self.parts
    }

    #[must_use]
    pub fn active_part(&self) -> Option<&PartHandle> {
        self.active.as_ref()
    }

    /// Part that was active before the last hide or switch.
    #[must_use]
    pub fn previous_active_part(&self) -> Option<&PartHandle> {
        self.previous_active.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    #[must_use]
    pub fn contains(&self, part: &PartHandle) -> bool {
        self.contains_id(part.id())
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.parts.iter().any(|member| member.id() == id)
    }

    /// Add `part`, honoring `constraint` as an ordering hint.
    ///
    /// Returns `false` if an equal part is already a member.
    pub(crate) fn add_part(&mut self, part: PartHandle, constraint: Option<&Constraint>) -> bool {
        if self.contains(&part) {
            return false;
        }
        let index = constraint.map_or(self.parts.len(), |c| c.insertion_index(&self.parts));
        self.parts.insert(index, part);
        true
    }

    /// Drop `part` from the stack. Returns `false` if it was not a member.
    pub(crate) fn remove_part(&mut self, part: &PartHandle) -> bool {
        let Some(index) = self.parts.iter().position(|member| member == part) else {
            return false;
        };
        self.parts.remove(index);
        if self.active.as_ref() == Some(part) {
            self.active = None;
        }
        if self.previous_active.as_ref() == Some(part) {
            self.previous_active = None;
        }
        true
    }

    /// Collapse `part` without removing it.
    ///
    /// If it was active it becomes the previous-active part so that
    /// [`open_previous_active_part`](Self::open_previous_active_part) can bring it back.
    pub(crate) fn hide_part(&mut self, part: &PartHandle) -> bool {
        if !self.contains(part) {
            return false;
        }
        if self.active.as_ref() == Some(part) {
            self.previous_active = self.active.take();
        }
        true
    }

    /// Make `part` the active member. Non-members are ignored.
    pub(crate) fn set_active_part(&mut self, part: &PartHandle) -> bool {
        let Some(member) = self.parts.iter().find(|member| *member == part) else {
            return false;
        };
        if self.active.as_ref() == Some(member) {
            return true;
        }
        let member = member.clone();
        if let Some(current) = self.active.replace(member) {
            self.previous_active = Some(current);
        }
        true
    }

    /// Reactivate the previous-active part, falling back to the first member.
    pub(crate) fn open_previous_active_part(&mut self) -> Option<PartHandle> {
        let target = self
            .previous_active
            .clone()
            .or_else(|| self.parts.first().cloned())?;
        self.set_active_part(&target);
        Some(target)
    }
}
