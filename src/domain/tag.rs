use crate::domain::branch::BranchContext;
use semver::Version;

/// Naming scheme for version tags (e.g. "v1.2.3", "rel-v1.2.3", "rel-featurev1.2.3")
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagScheme {
    prefix: String,
}

impl TagScheme {
    /// Create a scheme for the given prefix; an empty prefix matches every tag
    pub fn new(prefix: impl Into<String>) -> Self {
        TagScheme {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Extract the version part of a tag name.
    ///
    /// Returns `None` when the name does not start with the prefix. The prefix
    /// and one following `-` are stripped.
    /// Example: prefix="rel", tag="rel-v1.2.3" -> "v1.2.3"
    pub fn version_part<'a>(&self, tag_name: &'a str) -> Option<&'a str> {
        let rest = tag_name.strip_prefix(self.prefix.as_str())?;
        Some(rest.strip_prefix('-').unwrap_or(rest))
    }

    /// Build the name of a new tag: `[<prefix>-][<branch>]v<version>`.
    ///
    /// The branch segment is only present off the primary branch and is joined
    /// without a separator.
    pub fn format(&self, branch: &BranchContext, version: &Version) -> String {
        let mut name = String::new();
        if !self.prefix.is_empty() {
            name.push_str(&self.prefix);
            name.push('-');
        }
        if !branch.is_primary() {
            name.push_str(&branch.name);
        }
        format!("{}v{}", name, version)
    }
}
