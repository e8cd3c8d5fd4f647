//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the repository access
//! semvertag needs, so the tagging workflow can run against a real repository
//! or an in-memory one in tests.
//!
//! - [repository::Git2Repository]: implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for testing
//!
//! Most code should depend on the [Repository] trait rather than a concrete
//! implementation.

pub mod identity;
pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::AuthorInfo;
use crate::error::{Result, SemvertagError};
use chrono::{DateTime, FixedOffset};
use git2::{ObjectType, Oid};

/// An annotated tag as read from the repository
#[derive(Debug, Clone, PartialEq)]
pub struct TagRecord {
    /// Tag name without `refs/tags/`
    pub name: String,
    /// Id of the tag object itself
    pub id: Oid,
    /// Id of the object the tag points at
    pub target: Oid,
    pub tagger_name: String,
    pub tagger_email: String,
    pub tagged_at: DateTime<FixedOffset>,
    pub message: String,
}

impl TagRecord {
    /// Abbreviated tag object id for display
    pub fn short_id(&self) -> String {
        let id = self.id.to_string();
        id[..6.min(id.len())].to_string()
    }
}

/// Kind of a named reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Branch,
    Tag,
    /// HEAD not pointing at a branch
    Detached,
}

/// A named reference and the object it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRef {
    /// Short name, e.g. "master" or "v1.0.0"
    pub name: String,
    pub kind: RefKind,
    pub target: Oid,
}

impl GitRef {
    pub fn branch(name: impl Into<String>, target: Oid) -> Self {
        GitRef {
            name: name.into(),
            kind: RefKind::Branch,
            target,
        }
    }

    pub fn tag(name: impl Into<String>, target: Oid) -> Self {
        GitRef {
            name: name.into(),
            kind: RefKind::Tag,
            target,
        }
    }
}

/// What an object id refers to, as far as commit resolution cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectInfo {
    Commit,
    /// An annotated tag object and the kind of object it points at
    Tag { target: Oid, target_kind: ObjectType },
    /// Trees, blobs and anything else
    Other(ObjectType),
}

/// Repository operations used by the tagging workflow
///
/// All methods return [crate::error::Result<T>]; implementations map
/// underlying errors (like `git2::Error`) onto
/// [crate::error::SemvertagError] variants.
pub trait Repository {
    /// List annotated tags with their tagger information.
    ///
    /// Lightweight tags carry no tagger timestamp and are not returned.
    fn list_tags(&self) -> Result<Vec<TagRecord>>;

    /// List local branches
    fn list_branches(&self) -> Result<Vec<GitRef>>;

    /// The reference HEAD currently points at
    fn head(&self) -> Result<GitRef>;

    /// Look up a local branch, then a tag, by short name
    fn find_reference(&self, name: &str) -> Result<GitRef>;

    /// Inspect the object behind an id
    fn find_object(&self, oid: Oid) -> Result<ObjectInfo>;

    /// Identity from the repository's own config (`user.name`, `user.email`).
    ///
    /// Returns `Ok(None)` when neither is set.
    fn local_identity(&self) -> Result<Option<AuthorInfo>>;

    /// Create an annotated tag on `target`, stamped with `tagger` and the current time
    ///
    /// # Returns
    /// * `Ok(Oid)` - Id of the new tag object
    /// * `Err` - If the tag already exists or the target is missing
    fn create_annotated_tag(
        &self,
        name: &str,
        target: Oid,
        tagger: &AuthorInfo,
        message: &str,
    ) -> Result<Oid>;

    /// Resolve the commit a reference designates.
    ///
    /// Branches and detached HEADs resolve to their tip. Tags are followed one
    /// level: an annotated tag must point at a commit, anything else is
    /// reported as an unsupported target naming the object kind.
    fn resolve_commit(&self, reference: &GitRef) -> Result<Oid> {
        if reference.kind != RefKind::Tag {
            return Ok(reference.target);
        }

        match self.find_object(reference.target)? {
            ObjectInfo::Commit => Ok(reference.target),
            ObjectInfo::Tag {
                target,
                target_kind: ObjectType::Commit,
            } => Ok(target),
            ObjectInfo::Tag { target_kind, .. } => {
                Err(SemvertagError::unsupported_target(target_kind.str()))
            }
            ObjectInfo::Other(kind) => Err(SemvertagError::unsupported_target(kind.str())),
        }
    }
}
