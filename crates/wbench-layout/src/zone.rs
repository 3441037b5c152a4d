//! Workbench zones and the controllers that size and hide them.
//!
//! The workbench is divided into four fixed regions. Three of them
//! ([`Zone::Navigation`], [`Zone::Information`], [`Zone::Tooling`]) own a
//! part stack and a [`ZoneController`]; [`Zone::Central`] has neither and is
//! only "revealed" when every other zone is hidden.

use std::fmt;

use crate::config::{PerspectiveConfig, ZoneConfig};

/// One of the four fixed workbench regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    /// Left-hand navigation zone.
    Navigation,
    /// Bottom information zone.
    Information,
    /// Right-hand tooling zone.
    Tooling,
    /// Central editor area. Has no stack and no controller.
    Central,
}

impl Zone {
    /// Zones that own a part stack, in lookup and serialization order.
    pub const STACKED: [Zone; 3] = [Zone::Navigation, Zone::Information, Zone::Tooling];

    /// Persisted key for this zone.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Navigation => "NAVIGATION",
            Self::Information => "INFORMATION",
            Self::Tooling => "TOOLING",
            Self::Central => "CENTRAL",
        }
    }

    /// Parse a persisted key into a stacked zone.
    ///
    /// Keys are case-sensitive. `"CENTRAL"` is not accepted since the central
    /// zone has nothing to persist.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::STACKED.into_iter().find(|zone| zone.key() == key)
    }

    /// Whether this zone owns a part stack and a controller.
    #[must_use]
    pub const fn has_stack(self) -> bool {
        !matches!(self, Self::Central)
    }

    const fn slot(self) -> Option<usize> {
        match self {
            Self::Navigation => Some(0),
            Self::Information => Some(1),
            Self::Tooling => Some(2),
            Self::Central => None,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Sizing and visibility handle for one sizeable zone.
///
/// Sizes are zone-local units (pixels or a fraction) and never negative.
pub trait ZoneController {
    /// Current size of the zone.
    fn size(&self) -> f64;

    /// Resize the zone.
    fn set_size(&mut self, size: f64);

    /// Whether the zone is collapsed.
    fn is_hidden(&self) -> bool;

    /// Collapse or expand the zone.
    fn set_hidden(&mut self, hidden: bool);

    /// Fill the workbench with this zone. Unlike `set_hidden`, the zone stays
    /// visible.
    fn maximize(&mut self);

    /// Reinstate a size and visibility in one step, clearing any maximized
    /// state the zone was carrying.
    fn restore(&mut self, size: f64, hidden: bool) {
        self.set_size(size);
        self.set_hidden(hidden);
    }
}

/// In-memory controller backing a splitter-managed zone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplitZone {
    size: f64,
    hidden: bool,
    maximized: bool,
}

impl SplitZone {
    /// A visible zone of the given size.
    #[must_use]
    pub fn new(size: f64) -> Self {
        Self {
            size: sanitize_size(size),
            hidden: false,
            maximized: false,
        }
    }

    /// A zone seeded from configuration.
    #[must_use]
    pub fn from_config(config: &ZoneConfig) -> Self {
        Self {
            size: sanitize_size(config.size),
            hidden: config.hidden,
            maximized: false,
        }
    }

    /// Whether [`ZoneController::maximize`] is in effect.
    #[must_use]
    pub fn is_maximized(&self) -> bool {
        self.maximized
    }
}

impl ZoneController for SplitZone {
    fn size(&self) -> f64 {
        self.size
    }

    fn set_size(&mut self, size: f64) {
        self.size = sanitize_size(size);
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        if hidden {
            self.maximized = false;
        }
    }

    fn maximize(&mut self) {
        self.hidden = false;
        self.maximized = true;
    }

    fn restore(&mut self, size: f64, hidden: bool) {
        self.size = sanitize_size(size);
        self.hidden = hidden;
        self.maximized = false;
    }
}

fn sanitize_size(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}

/// The three zone controllers of a perspective, addressed by [`Zone`].
pub struct ZoneControllers {
    controllers: [Box<dyn ZoneController>; 3],
}

impl ZoneControllers {
    /// Bundle controllers for the navigation, information and tooling zones.
    #[must_use]
    pub fn new(
        navigation: Box<dyn ZoneController>,
        information: Box<dyn ZoneController>,
        tooling: Box<dyn ZoneController>,
    ) -> Self {
        Self {
            controllers: [navigation, information, tooling],
        }
    }

    /// [`SplitZone`] controllers seeded from configuration.
    #[must_use]
    pub fn from_config(config: &PerspectiveConfig) -> Self {
        Self::new(
            Box::new(SplitZone::from_config(&config.navigation)),
            Box::new(SplitZone::from_config(&config.information)),
            Box::new(SplitZone::from_config(&config.tooling)),
        )
    }

    /// Controller for `zone`, or `None` for the central zone.
    #[must_use]
    pub fn get(&self, zone: Zone) -> Option<&dyn ZoneController> {
        zone.slot().map(|slot| self.controllers[slot].as_ref())
    }

    /// Mutable controller for `zone`, or `None` for the central zone.
    pub fn get_mut(&mut self, zone: Zone) -> Option<&mut dyn ZoneController> {
        let slot = zone.slot()?;
        let controller: &mut dyn ZoneController = self.controllers[slot].as_mut();
        Some(controller)
    }
}

impl Default for ZoneControllers {
    fn default() -> Self {
        Self::from_config(&PerspectiveConfig::default())
    }
}

impl fmt::Debug for ZoneControllers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for zone in Zone::STACKED {
            if let Some(controller) = self.get(zone) {
                map.entry(&zone.key(), &(controller.size(), controller.is_hidden()));
            }
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_for_stacked_zones() {
        for zone in Zone::STACKED {
            assert_eq!(Zone::from_key(zone.key()), Some(zone));
        }
    }

    #[test]
    fn central_and_unknown_keys_are_rejected() {
        assert_eq!(Zone::from_key("CENTRAL"), None);
        assert_eq!(Zone::from_key("navigation"), None);
        assert_eq!(Zone::from_key("EDITOR"), None);
    }

    #[test]
    fn central_has_no_controller() {
        let mut zones = ZoneControllers::default();
        assert!(zones.get(Zone::Central).is_none());
        assert!(zones.get_mut(Zone::Central).is_none());
        assert!(!Zone::Central.has_stack());
    }

    #[test]
    fn split_zone_clamps_invalid_sizes() {
        let mut zone = SplitZone::new(-4.0);
        assert_eq!(zone.size(), 0.0);
        zone.set_size(f64::NAN);
        assert_eq!(zone.size(), 0.0);
        zone.set_size(120.0);
        assert_eq!(zone.size(), 120.0);
    }

    #[test]
    fn maximize_keeps_zone_visible() {
        let mut zone = SplitZone::new(100.0);
        zone.set_hidden(true);
        zone.maximize();
        assert!(!zone.is_hidden());
        assert!(zone.is_maximized());
    }

    #[test]
    fn restore_clears_maximized_state() {
        let mut zone = SplitZone::new(100.0);
        zone.maximize();
        zone.restore(80.0, false);
        assert!(!zone.is_maximized());
        assert!(!zone.is_hidden());
        assert_eq!(zone.size(), 80.0);
    }

    #[test]
    fn zone_displays_as_persisted_key() {
        for zone in Zone::STACKED {
            assert_eq!(zone.to_string(), zone.key());
        }
        assert_eq!(Zone::Central.to_string(), "CENTRAL");
    }
}
