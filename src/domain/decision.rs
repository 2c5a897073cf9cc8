use crate::domain::branch::BranchInventory;
use crate::domain::tag::ParsedTag;

/// What to do with a classified tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The feature branch is gone; the tag is orphaned
    Delete,
    /// The feature branch still exists
    Keep,
}

/// Decide a tag's fate against the branch snapshot.
///
/// `Delete` iff `feature/<featureId>` is absent from the inventory. The
/// sequence number plays no part: every tag of a vanished branch goes.
pub fn resolve(tag: &ParsedTag, inventory: &BranchInventory) -> Decision {
    if inventory.has_feature_branch(&tag.feature_id) {
        Decision::Keep
    } else {
        Decision::Delete
    }
}
