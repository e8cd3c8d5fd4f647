use std::fmt;

/// Non-fatal issues met while tagging that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No existing tag matched the prefix; numbering starts from 0.0.0
    NoMatchingTags { prefix: String },
    /// Identity could not be read from git config
    IdentityUnavailable { reason: String },
    /// The tag was created locally but could not be pushed
    PushFailed {
        tag: String,
        remote: String,
        reason: String,
    },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoMatchingTags { prefix } if prefix.is_empty() => {
                write!(f, "No version tags found, starting from 0.0.0")
            }
            BoundaryWarning::NoMatchingTags { prefix } => {
                write!(
                    f,
                    "No version tags with prefix '{}' found, starting from 0.0.0",
                    prefix
                )
            }
            BoundaryWarning::IdentityUnavailable { reason } => {
                write!(f, "Cannot read author information from config: {}", reason)
            }
            BoundaryWarning::PushFailed {
                tag,
                remote,
                reason,
            } => {
                write!(
                    f,
                    "Tag '{}' was created but pushing to '{}' failed: {}",
                    tag, remote, reason
                )
            }
        }
    }
}
