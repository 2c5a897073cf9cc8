//! Tag classification
//!
//! Turns raw tag refs into [ParsedTag]s when they follow the feature
//! pre-release convention `v<major>.<minor>.<patch>-<featureId>.<sequence>`.
//! Anything else is not ours to touch and classifies to `None`.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Prefix carried by fully-qualified tag refs
pub const TAG_REF_PREFIX: &str = "refs/tags/";

/// Anchored at both ends. Numeric segments use `*`, so empty components are
/// structurally valid; the feature id is greedy up to the last `.<digits>`.
const FEATURE_TAG_PATTERN: &str = r"^v([0-9]*)\.([0-9]*)\.([0-9]*)-(.*)\.([0-9]*)$";

fn feature_tag_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(FEATURE_TAG_PATTERN).expect("feature tag pattern compiles"))
}

/// Strip the `refs/tags/` prefix from a ref, yielding the tag name.
///
/// Refs that do not carry the prefix are returned unchanged.
pub fn tag_name_from_ref(tag_ref: &str) -> &str {
    tag_ref.strip_prefix(TAG_REF_PREFIX).unwrap_or(tag_ref)
}

/// A tag that names the feature branch it was cut from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag {
    /// Tag name without the `refs/tags/` prefix
    pub name: String,
    pub major: String,
    pub minor: String,
    pub patch: String,
    /// Pre-release identifier, i.e. the feature branch suffix
    pub feature_id: String,
    /// Pre-release sequence number as written (may be empty)
    pub sequence: String,
}

impl ParsedTag {
    /// Parse a tag name (no `refs/tags/` prefix) against the feature pattern
    pub fn parse(tag_name: &str) -> Option<Self> {
        let captures = feature_tag_regex().captures(tag_name)?;
        let group = |i: usize| {
            captures
                .get(i)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        Some(ParsedTag {
            name: tag_name.to_string(),
            major: group(1),
            minor: group(2),
            patch: group(3),
            feature_id: group(4),
            sequence: group(5),
        })
    }

    /// Sequence as a number, if it is non-empty and fits in a u64
    pub fn sequence_number(&self) -> Option<u64> {
        self.sequence.parse().ok()
    }

    /// Ref argument for deleting this tag through the hosting API
    pub fn delete_ref(&self) -> String {
        format!("tags/{}", self.name)
    }
}

impl fmt::Display for ParsedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Classify a tag ref (`refs/tags/<name>` or a bare name).
///
/// Returns `None` for tags outside the feature pre-release convention, such
/// as plain releases like `v1.0.0`. That is not an error.
pub fn classify(tag_ref: &str) -> Option<ParsedTag> {
    ParsedTag::parse(tag_name_from_ref(tag_ref))
}
