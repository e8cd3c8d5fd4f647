//! Version resolution over a repository's tags.
//!
//! Tags are filtered by prefix, parsed leniently as semantic versions and
//! ordered by tag creation time, most recent first. Tags that do not carry a
//! version are skipped, since repositories routinely hold unrelated tags.

use crate::domain::{bump, parse_tolerant, TagScheme, VersionBump};
use crate::error::Result;
use crate::git::TagRecord;
use semver::Version;

/// A repository tag paired with the version parsed from its name
#[derive(Debug, Clone, PartialEq)]
pub struct VersionTag {
    pub tag: TagRecord,
    pub version: Version,
}

/// Keep the tags that match the scheme and carry a version, in input order
pub fn matching_tags(
    tags: impl IntoIterator<Item = TagRecord>,
    scheme: &TagScheme,
) -> Vec<VersionTag> {
    tags.into_iter()
        .filter_map(|tag| {
            let version_part = scheme.version_part(&tag.name)?;
            match parse_tolerant(version_part) {
                Some(version) => Some(VersionTag { tag, version }),
                None => {
                    tracing::debug!(tag = %tag.name, "skipping tag without a semantic version");
                    None
                }
            }
        })
        .collect()
}

/// Order tags by creation time, most recent first
pub fn sort_by_recency(tags: &mut [VersionTag]) {
    tags.sort_by(|a, b| b.tag.tagged_at.cmp(&a.tag.tagged_at));
}

/// Matching version tags, most recent first
pub fn sorted_matching_tags(
    tags: impl IntoIterator<Item = TagRecord>,
    scheme: &TagScheme,
) -> Vec<VersionTag> {
    let mut matching = matching_tags(tags, scheme);
    sort_by_recency(&mut matching);
    matching
}

/// The version of the most recent tag, or 0.0.0 when there is none
pub fn current_version(sorted: &[VersionTag]) -> Version {
    sorted
        .first()
        .map(|t| t.version.clone())
        .unwrap_or_else(|| Version::new(0, 0, 0))
}

/// The version the next tag should carry
pub fn next_version(
    sorted: &[VersionTag],
    bump_type: VersionBump,
    reset_lower: bool,
) -> Result<Version> {
    bump(&current_version(sorted), bump_type, reset_lower)
}
