use std::collections::HashSet;

/// Prefix every feature branch name starts with
pub const FEATURE_BRANCH_PREFIX: &str = "feature/";

/// Name of the feature branch a pre-release identifier belongs to
pub fn feature_branch_name(feature_id: &str) -> String {
    format!("{}{}", FEATURE_BRANCH_PREFIX, feature_id)
}

/// Snapshot of the branches that exist in a repository.
///
/// Taken once per run and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchInventory {
    names: HashSet<String>,
}

impl BranchInventory {
    /// Build an inventory from branch names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BranchInventory {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact membership test, no prefix or fuzzy matching
    pub fn contains(&self, branch: &str) -> bool {
        self.names.contains(branch)
    }

    /// Whether the feature branch for `feature_id` exists
    pub fn has_feature_branch(&self, feature_id: &str) -> bool {
        self.contains(&feature_branch_name(feature_id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Branch names in sorted order, for display
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
