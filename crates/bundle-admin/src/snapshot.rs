//! Immutable saved-state baseline for dirty tracking.

use bundle_commerce::OfferGroup;

/// A frozen copy of a group as it was last known to be persisted.
///
/// Comparison ignores store-assigned timestamps, so a group that has been
/// round-tripped through the store still matches its snapshot.
#[derive(Debug, Clone)]
pub struct GroupSnapshot {
    group: OfferGroup,
}

impl GroupSnapshot {
    pub fn capture(group: &OfferGroup) -> Self {
        Self {
            group: group.clone(),
        }
    }

    pub fn group(&self) -> &OfferGroup {
        &self.group
    }

    /// Whether `group` has the same content as the snapshot.
    pub fn matches(&self, group: &OfferGroup) -> bool {
        self.group.content() == group.content()
    }
}

impl PartialEq for GroupSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.group)
    }
}
