use std::fmt;

/// Conditions at the edges of a cleanup run that are worth telling the user
/// about but do not stop it.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No token was supplied; API calls go out unauthenticated
    MissingToken,
    /// The branch listing came back empty, so every matching tag is orphaned
    EmptyBranchInventory { repository: String },
    /// No ref matched the version tag prefix
    NoVersionTags { prefix: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::MissingToken => {
                write!(
                    f,
                    "No token provided; API calls are unauthenticated and deletions will likely be refused"
                )
            }
            BoundaryWarning::EmptyBranchInventory { repository } => {
                write!(
                    f,
                    "Repository '{}' reported no branches; every feature tag will be treated as orphaned",
                    repository
                )
            }
            BoundaryWarning::NoVersionTags { prefix } => {
                write!(f, "No refs found matching '{}'", prefix)
            }
        }
    }
}
