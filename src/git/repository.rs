use crate::domain::AuthorInfo;
use crate::error::{Result, SemvertagError};
use crate::git::{GitRef, ObjectInfo, RefKind, TagRecord};
use chrono::{DateTime, FixedOffset};
use git2::{BranchType, ConfigLevel, ObjectType, Oid, Repository as Git2Repo, Signature};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            SemvertagError::repository(format!(
                "Cannot open {} as a repository: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Working directory, or the git directory for bare repositories
    pub fn workdir(&self) -> &Path {
        self.repo.workdir().unwrap_or_else(|| self.repo.path())
    }
}

/// Convert a git timestamp into a zoned date-time
fn to_datetime(time: git2::Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    let utc = DateTime::from_timestamp(time.seconds(), 0)?;
    Some(utc.with_timezone(&offset))
}

fn config_identity(config: &git2::Config) -> Option<AuthorInfo> {
    let author = AuthorInfo::new(
        config.get_string("user.name").unwrap_or_default(),
        config.get_string("user.email").unwrap_or_default(),
    );
    author.is_partial().then_some(author)
}

pub(crate) fn identity_from_config_file(path: &Path) -> Result<Option<AuthorInfo>> {
    let config = git2::Config::open(path).map_err(|e| {
        SemvertagError::identity(format!("Cannot read {}: {}", path.display(), e))
    })?;
    Ok(config_identity(&config))
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<TagRecord>> {
        let names = self.repo.tag_names(None)?;
        let mut records = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            let Some(oid) = reference.target() else {
                continue;
            };
            // lightweight tags point straight at a commit and have no tagger
            let Ok(tag) = self.repo.find_tag(oid) else {
                continue;
            };
            let Some(tagger) = tag.tagger() else {
                continue;
            };
            let Some(tagged_at) = to_datetime(tagger.when()) else {
                continue;
            };

            records.push(TagRecord {
                name: name.to_string(),
                id: tag.id(),
                target: tag.target_id(),
                tagger_name: tagger.name().unwrap_or("unknown").to_string(),
                tagger_email: tagger.email().unwrap_or_default().to_string(),
                tagged_at,
                message: tag.message().unwrap_or_default().to_string(),
            });
        }

        Ok(records)
    }

    fn list_branches(&self) -> Result<Vec<GitRef>> {
        let mut branches = Vec::new();

        for entry in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            let Some(name) = branch.name()? else {
                continue;
            };
            let Some(target) = branch.get().target() else {
                continue;
            };
            branches.push(GitRef::branch(name, target));
        }

        Ok(branches)
    }

    fn head(&self) -> Result<GitRef> {
        let head = self.repo.head().map_err(|e| {
            SemvertagError::repository(format!("Cannot read HEAD: {}", e))
        })?;
        let target = head
            .target()
            .ok_or_else(|| SemvertagError::repository("HEAD has no target"))?;

        if head.is_branch() {
            let name = head
                .shorthand()
                .ok_or_else(|| SemvertagError::repository("HEAD branch name is not valid UTF-8"))?;
            Ok(GitRef::branch(name, target))
        } else {
            Ok(GitRef {
                name: "HEAD".to_string(),
                kind: RefKind::Detached,
                target,
            })
        }
    }

    fn find_reference(&self, name: &str) -> Result<GitRef> {
        if let Ok(branch) = self.repo.find_branch(name, BranchType::Local) {
            let target = branch.get().target().ok_or_else(|| {
                SemvertagError::repository(format!("Branch '{}' has no target", name))
            })?;
            return Ok(GitRef::branch(name, target));
        }

        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(reference) => {
                let target = reference.target().ok_or_else(|| {
                    SemvertagError::repository(format!("Tag '{}' has no target", name))
                })?;
                Ok(GitRef::tag(name, target))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Err(SemvertagError::repository(
                format!("No branch or tag named '{}'", name),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn find_object(&self, oid: Oid) -> Result<ObjectInfo> {
        let object = self.repo.find_object(oid, None)?;

        let info = match object.kind() {
            Some(ObjectType::Commit) => ObjectInfo::Commit,
            Some(ObjectType::Tag) => {
                let tag = object
                    .as_tag()
                    .ok_or_else(|| SemvertagError::repository("Tag object is not readable"))?;
                ObjectInfo::Tag {
                    target: tag.target_id(),
                    target_kind: tag.target_type().unwrap_or(ObjectType::Any),
                }
            }
            Some(kind) => ObjectInfo::Other(kind),
            None => ObjectInfo::Other(ObjectType::Any),
        };

        Ok(info)
    }

    fn local_identity(&self) -> Result<Option<AuthorInfo>> {
        let config = self.repo.config()?;
        match config.open_level(ConfigLevel::Local) {
            Ok(local) => Ok(config_identity(&local)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn create_annotated_tag(
        &self,
        name: &str,
        target: Oid,
        tagger: &AuthorInfo,
        message: &str,
    ) -> Result<Oid> {
        let object = self.repo.find_object(target, None)?;
        let signature = Signature::now(&tagger.username, &tagger.email)?;

        self.repo
            .tag(name, &object, &signature, message, false)
            .map_err(|e| SemvertagError::repository(format!("Cannot create tag '{}': {}", name, e)))
    }
}
