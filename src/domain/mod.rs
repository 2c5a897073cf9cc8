//! Domain logic - pure cleanup rules independent of the hosting API

pub mod branch;
pub mod decision;
pub mod tag;

pub use branch::{feature_branch_name, BranchInventory};
pub use decision::{resolve, Decision};
pub use tag::{classify, tag_name_from_ref, ParsedTag};
