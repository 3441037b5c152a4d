//! Maximize/restore state machine.
//!
//! # Transitions
//!
//! ```text
//!             maximize(z)                  restore()
//!   NORMAL ───────────────▶ MAXIMIZED_* ───────────────▶ NORMAL
//!                               │  ▲
//!                               └──┘ maximize(other z)
//! ```
//!
//! Geometry is captured only when leaving `NORMAL` and written back only by
//! the return to `NORMAL`. Moving directly between two maximized modes keeps
//! the geometry captured on the way out of `NORMAL`, so repeated cycles do
//! not drift. Repeating the current transition is a no-op.

use std::fmt;

use crate::zone::{Zone, ZoneControllers};

/// Which maximize mode, if any, is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutState {
    #[default]
    Normal,
    MaximizedLeft,
    MaximizedRight,
    MaximizedBottom,
    MaximizedCentral,
}

impl LayoutState {
    /// The maximized state that fills the workbench with `zone`.
    #[must_use]
    pub const fn maximized(zone: Zone) -> Self {
        match zone {
            Zone::Navigation => Self::MaximizedLeft,
            Zone::Tooling => Self::MaximizedRight,
            Zone::Information => Self::MaximizedBottom,
            Zone::Central => Self::MaximizedCentral,
        }
    }

    /// The zone filling the workbench, or `None` when `Normal`.
    #[must_use]
    pub const fn maximized_zone(self) -> Option<Zone> {
        match self {
            Self::Normal => None,
            Self::MaximizedLeft => Some(Zone::Navigation),
            Self::MaximizedRight => Some(Zone::Tooling),
            Self::MaximizedBottom => Some(Zone::Information),
            Self::MaximizedCentral => Some(Zone::Central),
        }
    }

    #[must_use]
    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }
}

impl fmt::Display for LayoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "NORMAL",
            Self::MaximizedLeft => "MAXIMIZED_LEFT",
            Self::MaximizedRight => "MAXIMIZED_RIGHT",
            Self::MaximizedBottom => "MAXIMIZED_BOTTOM",
            Self::MaximizedCentral => "MAXIMIZED_CENTRAL",
        };
        f.write_str(name)
    }
}

/// Geometry of one zone captured before a maximize.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SavedZone {
    pub size: f64,
    pub hidden: bool,
}

/// Geometry of the three sizeable zones, read back by the return to `NORMAL`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SavedSizes {
    zones: [SavedZone; 3],
}

impl SavedSizes {
    /// Saved geometry for `zone`, or `None` for the central zone.
    #[must_use]
    pub fn get(&self, zone: Zone) -> Option<SavedZone> {
        Self::index(zone).map(|index| self.zones[index])
    }

    /// Saved size for `zone`; `0.0` for the central zone.
    #[must_use]
    pub fn size(&self, zone: Zone) -> f64 {
        self.get(zone).map_or(0.0, |saved| saved.size)
    }

    fn set(&mut self, zone: Zone, saved: SavedZone) {
        if let Some(index) = Self::index(zone) {
            self.zones[index] = saved;
        }
    }

    fn capture(zones: &ZoneControllers) -> Self {
        let mut saved = Self::default();
        for zone in Zone::STACKED {
            if let Some(controller) = zones.get(zone) {
                saved.set(
                    zone,
                    SavedZone {
                        size: controller.size(),
                        hidden: controller.is_hidden(),
                    },
                );
            }
        }
        saved
    }

    fn index(zone: Zone) -> Option<usize> {
        Zone::STACKED.iter().position(|stacked| *stacked == zone)
    }
}

/// Tracks the active maximize mode and the geometry it displaced.
#[derive(Debug, Clone, Default)]
pub struct LayoutMachine {
    state: LayoutState,
    saved: SavedSizes,
}

impl LayoutMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> LayoutState {
        self.state
    }

    /// Last captured geometry. Only meaningful while not `Normal`, or after a
    /// snapshot restore seeded it.
    #[must_use]
    pub fn saved_sizes(&self) -> &SavedSizes {
        &self.saved
    }

    /// Fill the workbench with `zone`.
    ///
    /// For [`Zone::Central`] every sizeable zone is hidden. Otherwise the two
    /// other zones are hidden and `zone`'s controller is maximized.
    /// Returns `false` if that mode was already active.
    pub fn maximize(&mut self, zone: Zone, zones: &mut ZoneControllers) -> bool {
        let target = LayoutState::maximized(zone);
        if self.state == target {
            return false;
        }
        if self.state.is_normal() {
            self.saved = SavedSizes::capture(zones);
        }
        for stacked in Zone::STACKED {
            let Some(controller) = zones.get_mut(stacked) else {
                continue;
            };
            if stacked == zone {
                controller.maximize();
            } else {
                controller.set_hidden(true);
            }
        }
        tracing::debug!(from = %self.state, to = %target, "Layout transition");
        self.state = target;
        true
    }

    /// Return to `Normal`, reinstating the captured geometry.
    ///
    /// Returns `false` if already `Normal`.
    pub fn restore(&mut self, zones: &mut ZoneControllers) -> bool {
        if self.state.is_normal() {
            return false;
        }
        for zone in Zone::STACKED {
            if let (Some(controller), Some(saved)) = (zones.get_mut(zone), self.saved.get(zone)) {
                controller.restore(saved.size, saved.hidden);
            }
        }
        tracing::debug!(from = %self.state, to = %LayoutState::Normal, "Layout transition");
        self.state = LayoutState::Normal;
        true
    }

    /// Overwrite the saved geometry for one zone.
    pub(crate) fn seed(&mut self, zone: Zone, size: f64, hidden: bool) {
        self.saved.set(zone, SavedZone { size, hidden });
    }
}
