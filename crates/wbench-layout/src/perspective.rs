//! Perspective controller: part placement, maximize/restore and focus
//! bookkeeping for one workbench perspective.
//!
//! All mutation of stacks and zone controllers goes through this type.
//! Placement operations are defensive: unknown zones, filtered parts and
//! parts that are not in any stack are silently ignored.

use crate::config::PerspectiveConfig;
use crate::focus::{ActivePartTracker, FocusFeed};
use crate::layout::{LayoutMachine, LayoutState, SavedSizes};
use crate::part::{Constraint, PartHandle};
use crate::registry::PartRegistry;
use crate::stack::PartStack;
use crate::zone::{Zone, ZoneController, ZoneControllers};

/// One workbench perspective.
#[derive(Debug)]
pub struct Perspective {
    id: String,
    pub(crate) registry: PartRegistry,
    pub(crate) zones: ZoneControllers,
    pub(crate) layout: LayoutMachine,
    tracker: ActivePartTracker,
    feed: FocusFeed,
}

impl Perspective {
    /// Build a perspective with in-memory zone controllers seeded from `config`.
    #[must_use]
    pub fn new(config: &PerspectiveConfig, feed: &FocusFeed) -> Self {
        Self::with_controllers(config.id.clone(), ZoneControllers::from_config(config), feed)
    }

    /// Build a perspective over caller-supplied zone controllers.
    ///
    /// Subscribes to `feed` once; the subscription lives until
    /// [`dispose`](Self::dispose) or drop.
    #[must_use]
    pub fn with_controllers(
        id: impl Into<String>,
        zones: ZoneControllers,
        feed: &FocusFeed,
    ) -> Self {
        Self {
            id: id.into(),
            registry: PartRegistry::new(),
            zones,
            layout: LayoutMachine::new(),
            tracker: ActivePartTracker::attach(feed),
            feed: feed.clone(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    // ---------------------------------------------------------------------
    // Placement
    // ---------------------------------------------------------------------

    /// Add `part` to `zone`'s stack.
    ///
    /// Parts with placement rules are only added when this perspective's
    /// identifier is among them. [`Zone::Central`] has no stack and is a
    /// no-op. Returns whether the part was placed.
    pub fn add_part(
        &mut self,
        part: PartHandle,
        zone: Zone,
        constraint: Option<Constraint>,
    ) -> bool {
        if !zone.has_stack() {
            return false;
        }
        if !part.allowed_in(&self.id) {
            tracing::debug!(
                part = part.id(),
                perspective = self.id.as_str(),
                "Part placement rules exclude this perspective"
            );
            return false;
        }
        self.registry.place(part, zone, constraint.as_ref())
    }

    /// Remove `part` from whichever stack holds it.
    pub fn remove_part(&mut self, part: &PartHandle) {
        if let Some(stack) = self.registry.owning_stack_mut(part) {
            stack.remove_part(part);
        }
    }

    /// Collapse `part` in whichever stack holds it.
    pub fn hide_part(&mut self, part: &PartHandle) {
        if let Some(stack) = self.registry.owning_stack_mut(part) {
            stack.hide_part(part);
        }
    }

    /// Activate `part` in the stack that holds it and announce the focus change.
    pub fn set_active_part(&mut self, part: &PartHandle) {
        let Some(zone) = self.registry.zone_of(part) else {
            return;
        };
        self.activate_in(part, zone);
    }

    /// Activate `part` within `zone`'s stack. Ignored unless it is a member.
    pub fn set_active_part_in(&mut self, part: &PartHandle, zone: Zone) {
        self.activate_in(part, zone);
    }

    /// Reopen the previously active part of `zone`, falling back to its first member.
    pub fn open_active_part(&mut self, zone: Zone) {
        let reopened = self
            .registry
            .stack_mut(zone)
            .and_then(PartStack::open_previous_active_part);
        if let Some(part) = reopened {
            self.announce(part);
        }
    }

    /// Read-only view of `zone`'s stack. `None` for [`Zone::Central`].
    #[must_use]
    pub fn part_stack(&self, zone: Zone) -> Option<&PartStack> {
        self.registry.stack(zone)
    }

    /// Zone whose stack holds `part`.
    #[must_use]
    pub fn zone_of(&self, part: &PartHandle) -> Option<Zone> {
        self.registry.zone_of(part)
    }

    // ---------------------------------------------------------------------
    // Layout
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn controller(&self, zone: Zone) -> Option<&dyn ZoneController> {
        self.zones.get(zone)
    }

    /// Whether `zone` is collapsed. An empty stack always reports hidden.
    #[must_use]
    pub fn is_zone_hidden(&self, zone: Zone) -> bool {
        let empty = self.registry.stack(zone).is_none_or(PartStack::is_empty);
        empty || self.zones.get(zone).is_none_or(|c| c.is_hidden())
    }

    #[must_use]
    pub fn layout_state(&self) -> LayoutState {
        self.layout.state()
    }

    #[must_use]
    pub fn saved_sizes(&self) -> &SavedSizes {
        self.layout.saved_sizes()
    }

    /// Fill the workbench with `zone`. See [`LayoutMachine::maximize`].
    pub fn maximize(&mut self, zone: Zone) {
        self.layout.maximize(zone, &mut self.zones);
    }

    pub fn maximize_central_part(&mut self) {
        self.maximize(Zone::Central);
    }

    pub fn maximize_bottom_part(&mut self) {
        self.maximize(Zone::Information);
    }

    pub fn maximize_left_part(&mut self) {
        self.maximize(Zone::Navigation);
    }

    pub fn maximize_right_part(&mut self) {
        self.maximize(Zone::Tooling);
    }

    /// Leave any maximized mode, reinstating the captured geometry.
    pub fn restore_parts(&mut self) {
        self.layout.restore(&mut self.zones);
    }

    // ---------------------------------------------------------------------
    // Focus
    // ---------------------------------------------------------------------

    /// The part that currently has focus in this perspective.
    #[must_use]
    pub fn active_part(&self) -> Option<PartHandle> {
        self.tracker.active_part()
    }

    /// The part recorded by the last [`store_state`](Self::store_state).
    #[must_use]
    pub fn active_part_before_switch(&self) -> Option<&PartHandle> {
        self.tracker.before_switch()
    }

    /// Record focus before switching to another perspective.
    pub fn store_state(&mut self) {
        if let Some(part) = self.tracker.store() {
            part.store_state();
        }
    }

    /// Reinstate the focus recorded by [`store_state`](Self::store_state).
    pub fn restore_state(&mut self) {
        let Some(part) = self.tracker.before_switch().cloned() else {
            return;
        };
        self.set_active_part(&part);
        part.restore_state();
    }

    /// Make `part` the perspective-level active part even if no stack holds it.
    pub(crate) fn focus(&mut self, part: PartHandle) {
        match self.registry.zone_of(&part) {
            Some(zone) => self.activate_in(&part, zone),
            None => self.announce(part),
        }
    }

    /// Release the focus-change subscription.
    pub fn dispose(&mut self) {
        self.tracker.detach();
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        !self.tracker.is_attached()
    }

    fn activate_in(&mut self, part: &PartHandle, zone: Zone) {
        let Some(stack) = self.registry.stack_mut(zone) else {
            return;
        };
        if !stack.set_active_part(part) {
            return;
        }
        if let Some(member) = stack.active_part().cloned() {
            self.announce(member);
        }
    }

    fn announce(&mut self, part: PartHandle) {
        self.tracker.set_active_part(part.clone());
        self.feed.publish(part);
    }
}
