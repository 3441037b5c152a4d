#![forbid(unsafe_code)]

//! Perspective layout for multi-zone workbench UIs.
//!
//! A [`Perspective`] divides the workbench into navigation, information,
//! tooling and central zones. It places [`Part`]s into per-zone
//! [`PartStack`]s, switches between maximize modes, tracks the focused part
//! and can be captured into a [`PerspectiveSnapshot`] and rebuilt from one
//! through a [`SnapshotCodec`].
//!
//! # Usage
//!
//! ```
//! use wbench_layout::{
//!     FactoryResolver, FocusFeed, Part, PartHandle, Perspective, PerspectiveConfig,
//!     SnapshotCodec, Zone,
//! };
//!
//! struct Explorer;
//!
//! impl Part for Explorer {
//!     fn id(&self) -> &str {
//!         "explorer"
//!     }
//! }
//!
//! let feed = FocusFeed::new();
//! let mut perspective = Perspective::new(&PerspectiveConfig::default(), &feed);
//! let explorer = PartHandle::new(Explorer);
//! perspective.add_part(explorer.clone(), Zone::Navigation, None);
//! perspective.set_active_part(&explorer);
//!
//! let codec = SnapshotCodec::new(
//!     FactoryResolver::new().with("explorer", || PartHandle::new(Explorer)),
//! );
//! let json = codec.save_json(&perspective).unwrap();
//!
//! let mut restored = Perspective::new(&PerspectiveConfig::default(), &feed);
//! let report = codec.load_json(&mut restored, &json).unwrap();
//! assert!(report.is_complete());
//! assert_eq!(restored.active_part().unwrap().id(), "explorer");
//! ```

pub mod config;
pub mod error;
pub mod focus;
pub mod layout;
pub mod part;
pub mod perspective;
pub mod registry;
pub mod resolver;
pub mod snapshot;
pub mod stack;
pub mod zone;

pub use config::{PerspectiveConfig, ZoneConfig};
pub use error::{ConfigError, SnapshotError};
pub use focus::{ActivePartTracker, FocusFeed, FocusSubscription};
pub use layout::{LayoutMachine, LayoutState, SavedSizes, SavedZone};
pub use part::{Constraint, Part, PartHandle};
pub use perspective::Perspective;
pub use registry::PartRegistry;
pub use resolver::{FactoryResolver, PartFactory, PartResolver};
pub use snapshot::{PartEntry, PerspectiveSnapshot, RestoreReport, SnapshotCodec, ZoneRecord};
pub use stack::PartStack;
pub use zone::{SplitZone, Zone, ZoneController, ZoneControllers};
