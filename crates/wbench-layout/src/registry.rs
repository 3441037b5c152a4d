//! Fixed mapping from zone to part stack.

use crate::part::{Constraint, PartHandle};
use crate::stack::PartStack;
use crate::zone::Zone;

/// The three part stacks of a perspective.
///
/// Built once at construction; the set of stacks never changes.
#[derive(Debug, Clone, Default)]
pub struct PartRegistry {
    stacks: [PartStack; 3],
}

impl PartRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack for `zone`, or `None` for the central zone.
    #[must_use]
    pub fn stack(&self, zone: Zone) -> Option<&PartStack> {
        Self::index(zone).map(|index| &self.stacks[index])
    }

    pub(crate) fn stack_mut(&mut self, zone: Zone) -> Option<&mut PartStack> {
        let index = Self::index(zone)?;
        Some(&mut self.stacks[index])
    }

    /// Stacks paired with their zone, in [`Zone::STACKED`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &PartStack)> {
        Zone::STACKED.into_iter().zip(self.stacks.iter())
    }

    /// Zone whose stack holds `part`. First match in [`Zone::STACKED`] order wins.
    #[must_use]
    pub fn zone_of(&self, part: &PartHandle) -> Option<Zone> {
        self.iter()
            .find(|(_, stack)| stack.contains(part))
            .map(|(zone, _)| zone)
    }

    pub(crate) fn owning_stack_mut(&mut self, part: &PartHandle) -> Option<&mut PartStack> {
        let zone = self.zone_of(part)?;
        self.stack_mut(zone)
    }

    /// Put `part` into `zone`'s stack, detaching it from any other stack.
    ///
    /// Returns `false` when `zone` has no stack or already holds the part.
    pub(crate) fn place(
        &mut self,
        part: PartHandle,
        zone: Zone,
        constraint: Option<&Constraint>,
    ) -> bool {
        let Some(target) = Self::index(zone) else {
            return false;
        };
        if self.stacks[target].contains(&part) {
            return false;
        }
        for (index, stack) in self.stacks.iter_mut().enumerate() {
            if index != target && stack.remove_part(&part) {
                tracing::debug!(
                    part = part.id(),
                    from = %Zone::STACKED[index],
                    to = %zone,
                    "Moving part between stacks"
                );
            }
        }
        self.stacks[target].add_part(part, constraint)
    }

    fn index(zone: Zone) -> Option<usize> {
        Zone::STACKED.iter().position(|stacked| *stacked == zone)
    }
}
