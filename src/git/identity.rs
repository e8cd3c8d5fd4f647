//! Author identity lookup from git configuration.

use crate::domain::AuthorInfo;
use crate::error::{Result, SemvertagError};
use crate::git::repository::identity_from_config_file;
use crate::git::Repository;
use std::path::{Path, PathBuf};

/// Location of the user's global git config (`~/.gitconfig`)
pub fn default_global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".gitconfig"))
}

/// Read the identity new tags are stamped with.
///
/// The repository's local config wins; when it sets neither `user.name` nor
/// `user.email` the global config file is consulted. The returned identity may
/// be partial (one field empty); callers decide whether to fill the gap.
///
/// # Returns
/// * `Ok(AuthorInfo)` - At least one of username/email was found
/// * `Err` - Neither config provides an identity, or the global file is unreadable
pub fn read_author_info<R: Repository>(
    repo: &R,
    global_config: Option<&Path>,
) -> Result<AuthorInfo> {
    if let Some(author) = repo.local_identity()? {
        return Ok(author);
    }

    let path = global_config
        .ok_or_else(|| SemvertagError::identity("Cannot locate the user's home directory"))?;
    if !path.exists() {
        return Err(SemvertagError::identity(format!(
            "No identity in repository config and {} does not exist",
            path.display()
        )));
    }

    identity_from_config_file(path)?
        .ok_or_else(|| SemvertagError::identity("Invalid/incomplete author info"))
}
