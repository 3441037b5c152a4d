//! Perspective snapshots: capture live layout into a portable document and
//! rebuild it later.
//!
//! # Document shape
//!
//! ```json
//! {
//!   "activePartId": "outline",
//!   "partStacks": {
//!     "NAVIGATION": { "size": 250.0, "hidden": false, "activePartId": "outline",
//!                     "parts": [ { "id": "explorer" }, { "id": "outline" } ] },
//!     "INFORMATION": { "size": 0.0, "hidden": true }
//!   }
//! }
//! ```
//!
//! An empty zone is written as `{size, hidden: true}` only; the absence of
//! `parts` and `activePartId` is meaningful.
//!
//! # Restore
//!
//! Restore never fails. Unknown zone keys are skipped, unresolvable part
//! identifiers are dropped, and a zone left without members is forced
//! hidden. Per-zone activations run only after every zone has been
//! populated, and the root `activePartId` is applied last so it overrides
//! them. Everything skipped is listed in the returned [`RestoreReport`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::part::PartHandle;
use crate::perspective::Perspective;
use crate::resolver::PartResolver;
use crate::stack::PartStack;
use crate::zone::Zone;

/// Persisted layout of one perspective.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerspectiveSnapshot {
    /// Identifier of the perspective-level focused part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_part_id: Option<String>,
    /// Per-zone records keyed by zone key. Keys are kept verbatim so that
    /// unknown zones can be skipped on restore.
    #[serde(default)]
    pub part_stacks: BTreeMap<String, ZoneRecord>,
}

impl PerspectiveSnapshot {
    /// Parse a snapshot document.
    pub fn from_json(s: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Compact JSON encoding.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Record for `zone`, if present.
    #[must_use]
    pub fn zone(&self, zone: Zone) -> Option<&ZoneRecord> {
        self.part_stacks.get(zone.key())
    }
}

/// Persisted state of one zone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_part_id: Option<String>,
    /// Members in stack order. Absent for an empty zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<PartEntry>>,
}

impl ZoneRecord {
    /// Member identifiers in order; empty when `parts` is absent.
    #[must_use]
    pub fn part_ids(&self) -> Vec<&str> {
        self.parts
            .iter()
            .flatten()
            .map(|entry| entry.id.as_str())
            .collect()
    }
}

/// One persisted stack member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartEntry {
    pub id: String,
}

impl PartEntry {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// What a restore applied and what it had to skip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RestoreReport {
    /// Zones whose record was applied, in processing order.
    pub restored_zones: Vec<Zone>,
    /// Zone keys that matched no stacked zone.
    pub skipped_zones: Vec<String>,
    /// Identifiers the resolver could not produce.
    pub unresolved_parts: Vec<String>,
    /// Parts newly added to a stack.
    pub parts_added: usize,
    /// Whether the root `activePartId` resolved and was applied.
    pub root_active_applied: bool,
}

impl RestoreReport {
    /// Whether nothing was skipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped_zones.is_empty() && self.unresolved_parts.is_empty()
    }
}

/// Capture `perspective` into a snapshot.
///
/// Zones are visited in [`Zone::STACKED`] order; the resulting map orders
/// them by key. Fails with
/// [`SnapshotError::NoActivePart`] if the perspective has no focused part.
pub fn capture(perspective: &Perspective) -> Result<PerspectiveSnapshot, SnapshotError> {
    let active = perspective
        .active_part()
        .ok_or_else(|| SnapshotError::NoActivePart {
            perspective: perspective.id().to_owned(),
        })?;

    let mut part_stacks = BTreeMap::new();
    for (zone, stack) in perspective.registry.iter() {
        let Some(controller) = perspective.zones.get(zone) else {
            continue;
        };
        let size = Some(controller.size());
        let record = if stack.is_empty() {
            ZoneRecord {
                size,
                hidden: Some(true),
                ..ZoneRecord::default()
            }
        } else {
            ZoneRecord {
                size,
                hidden: Some(controller.is_hidden()),
                active_part_id: stack.active_part().map(|part| part.id().to_owned()),
                parts: Some(
                    stack
                        .parts()
                        .iter()
                        .map(|part| PartEntry::new(part.id()))
                        .collect(),
                ),
            }
        };
        part_stacks.insert(zone.key().to_owned(), record);
    }

    Ok(PerspectiveSnapshot {
        active_part_id: Some(active.id().to_owned()),
        part_stacks,
    })
}

/// Captures and restores perspectives, rebuilding parts through an injected
/// [`PartResolver`].
#[derive(Debug)]
pub struct SnapshotCodec<R> {
    resolver: R,
}

impl<R: PartResolver> SnapshotCodec<R> {
    #[must_use]
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// See [`capture`].
    pub fn capture(&self, perspective: &Perspective) -> Result<PerspectiveSnapshot, SnapshotError> {
        capture(perspective)
    }

    /// Capture `perspective` as a JSON document.
    pub fn save_json(&self, perspective: &Perspective) -> Result<String, SnapshotError> {
        capture(perspective)?.to_json()
    }

    /// Parse `json` and restore it into `perspective`.
    ///
    /// Only malformed JSON is an error; partial data is applied as far as it goes.
    pub fn load_json(
        &self,
        perspective: &mut Perspective,
        json: &str,
    ) -> Result<RestoreReport, SnapshotError> {
        let snapshot = PerspectiveSnapshot::from_json(json)?;
        Ok(self.restore(perspective, &snapshot))
    }

    /// Apply `snapshot` to `perspective`.
    ///
    /// Placement rules are not consulted. Each zone's size also becomes its
    /// saved size, so a later [`Perspective::restore_parts`] returns to the
    /// restored geometry.
    pub fn restore(
        &self,
        perspective: &mut Perspective,
        snapshot: &PerspectiveSnapshot,
    ) -> RestoreReport {
        let _span = tracing::debug_span!(
            "snapshot.restore",
            perspective = perspective.id(),
            zones = snapshot.part_stacks.len()
        )
        .entered();

        let mut report = RestoreReport::default();
        let mut deferred = Vec::new();

        for (key, record) in &snapshot.part_stacks {
            let Some(zone) = Zone::from_key(key) else {
                tracing::debug!(key = key.as_str(), "Skipping unknown zone in snapshot");
                report.skipped_zones.push(key.clone());
                continue;
            };
            if let Some(part) = self.restore_zone(perspective, zone, record, &mut report) {
                deferred.push(part);
            }
            report.restored_zones.push(zone);
        }

        for part in &deferred {
            perspective.set_active_part(part);
        }

        if let Some(id) = &snapshot.active_part_id {
            match self.resolver.resolve(id) {
                Some(part) => {
                    perspective.focus(part);
                    report.root_active_applied = true;
                }
                None => {
                    tracing::warn!(part = id.as_str(), "Unresolvable root active part in snapshot");
                    report.unresolved_parts.push(id.clone());
                }
            }
        }

        tracing::debug!(
            parts_added = report.parts_added,
            unresolved = report.unresolved_parts.len(),
            skipped_zones = report.skipped_zones.len(),
            "Snapshot restored"
        );
        report
    }

    /// Apply one zone record. Returns the part queued for deferred activation.
    fn restore_zone(
        &self,
        perspective: &mut Perspective,
        zone: Zone,
        record: &ZoneRecord,
        report: &mut RestoreReport,
    ) -> Option<PartHandle> {
        if let Some(controller) = perspective.zones.get_mut(zone) {
            if let Some(size) = record.size {
                controller.set_size(size);
            }
            if let Some(hidden) = record.hidden {
                controller.set_hidden(hidden);
            }
        }

        for entry in record.parts.iter().flatten() {
            match self.resolver.resolve(&entry.id) {
                Some(part) => {
                    if perspective.registry.place(part, zone, None) {
                        report.parts_added += 1;
                    }
                }
                None => {
                    tracing::warn!(
                        part = entry.id.as_str(),
                        zone = %zone,
                        "Unresolvable part in snapshot"
                    );
                    report.unresolved_parts.push(entry.id.clone());
                }
            }
        }

        let empty = perspective
            .registry
            .stack(zone)
            .is_none_or(PartStack::is_empty);
        if let Some(controller) = perspective.zones.get_mut(zone) {
            if empty {
                controller.set_hidden(true);
            }
            let (size, hidden) = (controller.size(), controller.is_hidden());
            perspective.layout.seed(zone, size, hidden);
        }

        let id = record.active_part_id.as_deref()?;
        let part = self.resolver.resolve(id);
        if part.is_none() {
            tracing::warn!(part = id, zone = %zone, "Unresolvable active part in snapshot");
            report.unresolved_parts.push(id.to_owned());
        }
        part
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PerspectiveConfig;
    use crate::focus::FocusFeed;
    use crate::part::Part;
    use crate::resolver::FactoryResolver;

    struct Stub(String);

    impl Part for Stub {
        fn id(&self) -> &str {
            &self.0
        }
    }

    fn part(id: &str) -> PartHandle {
        PartHandle::new(Stub(id.to_owned()))
    }

    fn resolver(ids: &[&'static str]) -> FactoryResolver {
        let mut resolver = FactoryResolver::new();
        for &id in ids {
            resolver.register(id, move || part(id));
        }
        resolver
    }

    fn fresh() -> (Perspective, FocusFeed) {
        let feed = FocusFeed::new();
        (Perspective::new(&PerspectiveConfig::default(), &feed), feed)
    }

    #[test]
    fn capture_requires_active_part() {
        let (perspective, _feed) = fresh();
        let err = capture(&perspective).unwrap_err();
        assert!(matches!(err, SnapshotError::NoActivePart { .. }));
    }

    #[test]
    fn empty_zone_has_no_parts_or_active_keys() {
        let (mut perspective, _feed) = fresh();
        perspective.add_part(part("a"), Zone::Navigation, None);
        perspective.set_active_part(&part("a"));
        let snapshot = capture(&perspective).unwrap();
        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        let info = &json["partStacks"]["INFORMATION"];
        assert_eq!(info["hidden"], serde_json::Value::Bool(true));
        assert!(info.get("parts").is_none());
        assert!(info.get("activePartId").is_none());
        assert_eq!(info["size"].as_f64(), Some(200.0));
    }

    #[test]
    fn emptied_zone_serializes_hidden_even_if_visible() {
        let (mut perspective, _feed) = fresh();
        perspective.add_part(part("a"), Zone::Tooling, None);
        perspective.add_part(part("b"), Zone::Navigation, None);
        perspective.set_active_part(&part("b"));
        perspective.remove_part(&part("a"));
        assert!(!perspective.controller(Zone::Tooling).unwrap().is_hidden());
        let snapshot = capture(&perspective).unwrap();
        let tooling = snapshot.zone(Zone::Tooling).unwrap();
        assert_eq!(tooling.hidden, Some(true));
        assert!(tooling.parts.is_none());
    }

    #[test]
    fn unknown_zone_keys_are_skipped() {
        let (mut perspective, _feed) = fresh();
        let codec = SnapshotCodec::new(resolver(&["a"]));
        let report = codec
            .load_json(
                &mut perspective,
                r#"{"partStacks":{"EDITOR":{"size":1.0},"CENTRAL":{},"navigation":{},
                    "NAVIGATION":{"parts":[{"id":"a"}]}}}"#,
            )
            .unwrap();
        assert_eq!(report.restored_zones, [Zone::Navigation]);
        assert_eq!(report.skipped_zones.len(), 3);
        assert_eq!(report.parts_added, 1);
    }

    #[test]
    fn missing_fields_leave_controller_untouched() {
        let (mut perspective, _feed) = fresh();
        let codec = SnapshotCodec::new(resolver(&["a"]));
        codec
            .load_json(&mut perspective, r#"{"partStacks":{"NAVIGATION":{"parts":[{"id":"a"}]}}}"#)
            .unwrap();
        let nav = perspective.controller(Zone::Navigation).unwrap();
        assert_eq!(nav.size(), 250.0);
        assert!(!nav.is_hidden());
    }

    #[test]
    fn unresolvable_members_are_dropped_in_order() {
        let (mut perspective, _feed) = fresh();
        let codec = SnapshotCodec::new(resolver(&["a", "c"]));
        let report = codec
            .load_json(
                &mut perspective,
                r#"{"partStacks":{"TOOLING":{"size":90,"hidden":false,
                    "parts":[{"id":"a"},{"id":"b"},{"id":"c"}]}}}"#,
            )
            .unwrap();
        let stack = perspective.part_stack(Zone::Tooling).unwrap();
        let ids: Vec<&str> = stack.parts().iter().map(PartHandle::id).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(report.unresolved_parts, ["b"]);
        assert!(!report.is_complete());
        assert!(!perspective.controller(Zone::Tooling).unwrap().is_hidden());
    }

    #[test]
    fn zone_with_no_resolvable_members_is_forced_hidden() {
        let (mut perspective, _feed) = fresh();
        let codec = SnapshotCodec::new(resolver(&[]));
        codec
            .load_json(
                &mut perspective,
                r#"{"partStacks":{"TOOLING":{"size":90,"hidden":false,
                    "parts":[{"id":"a"},{"id":"b"},{"id":"c"}]}}}"#,
            )
            .unwrap();
        let tooling = perspective.controller(Zone::Tooling).unwrap();
        assert!(tooling.is_hidden());
        assert_eq!(tooling.size(), 90.0);
        assert!(perspective.part_stack(Zone::Tooling).unwrap().is_empty());
    }

    #[test]
    fn restore_bypasses_placement_rules() {
        struct Restricted(Vec<String>);
        impl Part for Restricted {
            fn id(&self) -> &str {
                "debugger"
            }
            fn rules(&self) -> &[String] {
                &self.0
            }
        }
        let (mut perspective, _feed) = fresh();
        let codec = SnapshotCodec::new(|id: &str| {
            (id == "debugger").then(|| PartHandle::new(Restricted(vec!["debug".into()])))
        });
        codec
            .load_json(
                &mut perspective,
                r#"{"partStacks":{"TOOLING":{"parts":[{"id":"debugger"}]}}}"#,
            )
            .unwrap();
        assert!(perspective.part_stack(Zone::Tooling).unwrap().contains_id("debugger"));
    }

    #[test]
    fn existing_member_is_not_duplicated() {
        let (mut perspective, _feed) = fresh();
        perspective.add_part(part("a"), Zone::Navigation, None);
        let codec = SnapshotCodec::new(resolver(&["a", "b"]));
        let report = codec
            .load_json(
                &mut perspective,
                r#"{"partStacks":{"NAVIGATION":{"parts":[{"id":"a"},{"id":"b"}]}}}"#,
            )
            .unwrap();
        assert_eq!(report.parts_added, 1);
        assert_eq!(perspective.part_stack(Zone::Navigation).unwrap().len(), 2);
    }

    #[test]
    fn root_active_part_overrides_zone_activation() {
        let (mut perspective, _feed) = fresh();
        let codec = SnapshotCodec::new(resolver(&["a", "b", "c"]));
        codec
            .load_json(
                &mut perspective,
                r#"{"activePartId":"a",
                    "partStacks":{
                      "NAVIGATION":{"activePartId":"a","parts":[{"id":"a"}]},
                      "TOOLING":{"activePartId":"c","parts":[{"id":"b"},{"id":"c"}]}}}"#,
            )
            .unwrap();
        assert_eq!(perspective.active_part().as_ref().map(PartHandle::id), Some("a"));
        let tooling = perspective.part_stack(Zone::Tooling).unwrap();
        assert_eq!(tooling.active_part().map(PartHandle::id), Some("c"));
    }

    #[test]
    fn zone_activation_waits_for_later_zones() {
        let (mut perspective, _feed) = fresh();
        let codec = SnapshotCodec::new(resolver(&["x", "y"]));
        codec
            .load_json(
                &mut perspective,
                r#"{"partStacks":{
                      "INFORMATION":{"activePartId":"x","parts":[{"id":"y"}]},
                      "TOOLING":{"parts":[{"id":"x"}]}}}"#,
            )
            .unwrap();
        let tooling = perspective.part_stack(Zone::Tooling).unwrap();
        assert_eq!(tooling.active_part().map(PartHandle::id), Some("x"));
        assert_eq!(perspective.zone_of(&part("x")), Some(Zone::Tooling));
        assert_eq!(perspective.active_part().as_ref().map(PartHandle::id), Some("x"));
    }

    #[test]
    fn unresolvable_root_leaves_zone_activation_in_place() {
        let (mut perspective, _feed) = fresh();
        let codec = SnapshotCodec::new(resolver(&["a"]));
        let report = codec
            .load_json(
                &mut perspective,
                r#"{"activePartId":"gone",
                    "partStacks":{"NAVIGATION":{"activePartId":"a","parts":[{"id":"a"}]}}}"#,
            )
            .unwrap();
        assert!(!report.root_active_applied);
        assert_eq!(report.unresolved_parts, ["gone"]);
        assert_eq!(perspective.active_part().as_ref().map(PartHandle::id), Some("a"));
    }

    #[test]
    fn unresolvable_root_on_fresh_perspective_leaves_focus_unset() {
        let (mut perspective, _feed) = fresh();
        let codec = SnapshotCodec::new(resolver(&[]));
        codec
            .load_json(&mut perspective, r#"{"activePartId":"gone","partStacks":{}}"#)
            .unwrap();
        assert!(perspective.active_part().is_none());
    }

    #[test]
    fn restored_sizes_become_saved_sizes() {
        let (mut perspective, _feed) = fresh();
        let codec = SnapshotCodec::new(resolver(&["a"]));
        codec
            .load_json(
                &mut perspective,
                r#"{"partStacks":{"NAVIGATION":{"size":320,"hidden":false,"parts":[{"id":"a"}]}}}"#,
            )
            .unwrap();
        assert_eq!(perspective.saved_sizes().size(Zone::Navigation), 320.0);
        perspective.maximize_central_part();
        perspective.restore_parts();
        assert_eq!(perspective.controller(Zone::Navigation).unwrap().size(), 320.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let (mut perspective, _feed) = fresh();
        let codec = SnapshotCodec::new(resolver(&[]));
        let err = codec.load_json(&mut perspective, "{\"partStacks\":").unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }
}
