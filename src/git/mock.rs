use crate::domain::AuthorInfo;
use crate::error::{Result, SemvertagError};
use crate::git::{GitRef, ObjectInfo, RefKind, Repository, TagRecord};
use chrono::{DateTime, FixedOffset};
use git2::{ObjectType, Oid};
use std::cell::RefCell;
use std::collections::HashMap;

/// A tag created through [Repository::create_annotated_tag] on the mock
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedTag {
    pub name: String,
    pub target: Oid,
    pub tagger: AuthorInfo,
    pub message: String,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: Vec<TagRecord>,
    branches: Vec<GitRef>,
    head: Option<GitRef>,
    objects: HashMap<Oid, ObjectInfo>,
    identity: Option<AuthorInfo>,
    created: RefCell<Vec<CreatedTag>>,
    next_id: RefCell<u8>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            branches: Vec::new(),
            head: None,
            objects: HashMap::new(),
            identity: None,
            created: RefCell::new(Vec::new()),
            next_id: RefCell::new(0xa0),
        }
    }

    fn allocate_id(&self) -> Oid {
        let mut next = self.next_id.borrow_mut();
        let byte = *next;
        *next = next.wrapping_add(1);
        Oid::from_bytes(&[byte; 20]).unwrap_or_else(|_| Oid::zero())
    }

    /// Add an annotated tag on a commit
    pub fn add_tag(
        &mut self,
        name: impl Into<String>,
        commit: Oid,
        tagger: &AuthorInfo,
        tagged_at: DateTime<FixedOffset>,
    ) -> Oid {
        let id = self.allocate_id();
        self.objects.insert(commit, ObjectInfo::Commit);
        self.objects.insert(
            id,
            ObjectInfo::Tag {
                target: commit,
                target_kind: ObjectType::Commit,
            },
        );
        self.tags.push(TagRecord {
            name: name.into(),
            id,
            target: commit,
            tagger_name: tagger.username.clone(),
            tagger_email: tagger.email.clone(),
            tagged_at,
            message: String::new(),
        });
        id
    }

    /// Add a local branch; the first one added also becomes HEAD
    pub fn add_branch(&mut self, name: impl Into<String>, tip: Oid) {
        let branch = GitRef::branch(name, tip);
        self.objects.insert(tip, ObjectInfo::Commit);
        if self.head.is_none() {
            self.head = Some(branch.clone());
        }
        self.branches.push(branch);
    }

    /// Point HEAD at an arbitrary reference
    pub fn set_head(&mut self, head: GitRef) {
        self.head = Some(head);
    }

    /// Register an object so commit resolution can inspect it
    pub fn add_object(&mut self, oid: Oid, info: ObjectInfo) {
        self.objects.insert(oid, info);
    }

    /// Set the identity found in the repository's config
    pub fn set_identity(&mut self, identity: AuthorInfo) {
        self.identity = Some(identity);
    }

    /// Tags created so far
    pub fn created_tags(&self) -> Vec<CreatedTag> {
        self.created.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<TagRecord>> {
        Ok(self.tags.clone())
    }

    fn list_branches(&self) -> Result<Vec<GitRef>> {
        Ok(self.branches.clone())
    }

    fn head(&self) -> Result<GitRef> {
        self.head
            .clone()
            .ok_or_else(|| SemvertagError::repository("HEAD does not point at anything"))
    }

    fn find_reference(&self, name: &str) -> Result<GitRef> {
        if let Some(branch) = self.branches.iter().find(|b| b.name == name) {
            return Ok(branch.clone());
        }
        self.tags
            .iter()
            .find(|t| t.name == name)
            .map(|t| GitRef {
                name: t.name.clone(),
                kind: RefKind::Tag,
                target: t.id,
            })
            .ok_or_else(|| SemvertagError::repository(format!("Reference not found: {}", name)))
    }

    fn find_object(&self, oid: Oid) -> Result<ObjectInfo> {
        self.objects
            .get(&oid)
            .copied()
            .ok_or_else(|| SemvertagError::repository(format!("Object not found: {}", oid)))
    }

    fn local_identity(&self) -> Result<Option<AuthorInfo>> {
        Ok(self.identity.clone())
    }

    fn create_annotated_tag(
        &self,
        name: &str,
        target: Oid,
        tagger: &AuthorInfo,
        message: &str,
    ) -> Result<Oid> {
        let exists = self.tags.iter().any(|t| t.name == name)
            || self.created.borrow().iter().any(|t| t.name == name);
        if exists {
            return Err(SemvertagError::repository(format!(
                "Tag '{}' already exists",
                name
            )));
        }

        self.created.borrow_mut().push(CreatedTag {
            name: name.to_string(),
            target,
            tagger: tagger.clone(),
            message: message.to_string(),
        });
        Ok(self.allocate_id())
    }
}
