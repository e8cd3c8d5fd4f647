//! Main workflow orchestration logic
//!
//! This module contains the tagging workflow, kept apart from argument parsing
//! in `main.rs`. Repository access, prompts and child processes all come in
//! through traits so the workflow runs unchanged against mocks.

use std::path::PathBuf;

use git2::Oid;
use semver::Version;

use crate::boundary::BoundaryWarning;
use crate::cli::args::Cli;
use crate::command::CommandRunner;
use crate::config::Config;
use crate::domain::{AuthorInfo, BranchContext, TagScheme, VersionBump};
use crate::error::{Result, SemvertagError};
use crate::git::{identity, GitRef, Repository};
use crate::resolver;
use crate::ui::{self, Prompter};

/// How the reference to tag is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchSelection {
    /// Prompt only when HEAD is not the primary branch (and not quiet)
    Auto,
    /// Always tag HEAD
    Never,
    /// Always prompt
    Always,
    /// Tag the named branch or tag
    Explicit(String),
}

/// Arguments for the tagging workflow
///
/// Mirrors the CLI flags merged with the config file, in a form that does not
/// depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWorkflowArgs {
    /// Repository working directory; fetch and push run here
    pub dir: PathBuf,
    pub prefix: String,
    pub bump: VersionBump,
    pub reset_lower: bool,
    pub primary_branch: String,
    pub remote: String,
    pub fetch: bool,
    pub push: bool,
    /// Never prompt
    pub quiet: bool,
    pub branch_selection: BranchSelection,
    pub username: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub print_last: usize,
    /// Stop before creating the tag
    pub dry_run: bool,
    /// Global git config consulted when the repository has no identity
    pub global_config: Option<PathBuf>,
}

impl TagWorkflowArgs {
    /// Defaults matching an empty config file, for a given bump
    pub fn new(dir: impl Into<PathBuf>, bump: VersionBump) -> Self {
        Self::from_config(dir, bump, &Config::default())
    }

    /// Workflow arguments taken from a config file alone
    pub fn from_config(dir: impl Into<PathBuf>, bump: VersionBump, config: &Config) -> Self {
        TagWorkflowArgs {
            dir: dir.into(),
            prefix: config.tags.prefix.clone(),
            bump,
            reset_lower: config.tags.reset_lower,
            primary_branch: config.tags.primary_branch.clone(),
            remote: config.remote.name.clone(),
            fetch: config.remote.fetch,
            push: config.remote.push,
            quiet: false,
            branch_selection: BranchSelection::Auto,
            username: None,
            email: None,
            message: None,
            print_last: config.output.print_last,
            dry_run: false,
            global_config: identity::default_global_config_path(),
        }
    }

    /// Merge validated command-line flags over the config file
    pub fn from_cli(
        cli: &Cli,
        bump: VersionBump,
        config: &Config,
        dir: impl Into<PathBuf>,
    ) -> Self {
        let mut args = Self::from_config(dir, bump, config);

        if let Some(prefix) = &cli.prefix {
            args.prefix = prefix.clone();
        }
        if let Some(primary) = &cli.primary_branch {
            args.primary_branch = primary.clone();
        }
        if let Some(remote) = &cli.remote {
            args.remote = remote.clone();
        }
        if let Some(count) = cli.print_last {
            args.print_last = count;
        }
        args.reset_lower |= cli.reset_lower;
        args.fetch &= !cli.no_fetch;
        args.push &= !cli.no_push;
        args.quiet = cli.quiet;
        args.dry_run = cli.dry_run;
        args.branch_selection = cli.branch_selection();
        args.username = cli.username.clone();
        args.email = cli.email.clone();
        args.message = cli.message.clone();
        args
    }
}

/// What happened to the tag at the end of the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagState {
    /// Created and pushed
    Pushed,
    /// Created, push disabled
    CreatedLocally,
    /// Created, but the push failed
    PushFailed,
    /// The user declined the confirmation
    Aborted,
    /// Planned only
    DryRun,
}

impl TagState {
    pub fn is_created(self) -> bool {
        matches!(
            self,
            TagState::Pushed | TagState::CreatedLocally | TagState::PushFailed
        )
    }
}

/// Result of a tagging run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub tag: String,
    /// Short name of the reference that was tagged
    pub branch: String,
    pub version: Version,
    pub commit: Oid,
    pub state: TagState,
}

/// Main tagging workflow
///
/// 1. Fetch remote tags (fatal on failure)
/// 2. Resolve matching tags and compute the next version
/// 3. Select the reference to tag and resolve its commit
/// 4. Gather author and message; stop here on a dry run, otherwise confirm
/// 5. Create the annotated tag and optionally push it (push failure is only a warning)
pub fn run_tag_workflow<R, P, C>(
    args: &TagWorkflowArgs,
    repo: &R,
    prompter: &P,
    runner: &C,
) -> Result<WorkflowResult>
where
    R: Repository,
    P: Prompter,
    C: CommandRunner,
{
    if args.fetch {
        ui::display_status(&format!("Fetching tags from '{}'...", args.remote));
        runner.run(&args.dir, "git", &["fetch", "--tags", args.remote.as_str()])?;
    }

    let scheme = TagScheme::new(args.prefix.as_str());
    let tags = resolver::sorted_matching_tags(repo.list_tags()?, &scheme);
    ui::display_recent_tags(&tags, args.print_last);
    if tags.is_empty() {
        ui::display_boundary_warning(&BoundaryWarning::NoMatchingTags {
            prefix: args.prefix.clone(),
        });
    }

    let version = resolver::next_version(&tags, args.bump, args.reset_lower)?;

    let reference = select_reference(args, repo, prompter)?;
    let commit = repo.resolve_commit(&reference)?;
    let branch = BranchContext::new(reference.name.as_str(), &args.primary_branch);
    let tag_name = scheme.format(&branch, &version);
    ui::display_proposed_tag(tags.first().map(|t| t.tag.name.as_str()), &tag_name);

    let author = resolve_author(args, repo, prompter)?;
    let message = resolve_message(args, prompter)?;

    let outcome = |state| WorkflowResult {
        tag: tag_name.clone(),
        branch: branch.name.clone(),
        version: version.clone(),
        commit,
        state,
    };

    if args.dry_run {
        ui::display_status(&format!(
            "Dry run: would create tag {} on {} ({}), {}({}) with message '{}'",
            tag_name, branch.name, commit, author.username, author.email, message
        ));
        return Ok(outcome(TagState::DryRun));
    }

    if !args.quiet {
        let question = format!(
            "Will create tag {} on {}, {}({}) with message '{}'",
            tag_name, branch.name, author.username, author.email, message
        );
        if !prompter.confirm(&question)? {
            ui::display_status("Aborted.");
            return Ok(outcome(TagState::Aborted));
        }
    }

    repo.create_annotated_tag(&tag_name, commit, &author, &message)?;
    tracing::info!(tag = %tag_name, commit = %commit, "created tag");
    ui::display_success(&format!("Created tag {}", tag_name));

    let state = if args.push {
        push_tag(args, runner, &tag_name)
    } else {
        ui::display_manual_push_instruction(&tag_name, &args.remote);
        TagState::CreatedLocally
    };

    ui::display_success("done.");
    Ok(outcome(state))
}

fn push_tag<C: CommandRunner>(args: &TagWorkflowArgs, runner: &C, tag_name: &str) -> TagState {
    match runner.run(&args.dir, "git", &["push", args.remote.as_str(), tag_name]) {
        Ok(_) => {
            ui::display_success(&format!("Pushed tag {} to {}", tag_name, args.remote));
            TagState::Pushed
        }
        Err(e) => {
            tracing::warn!(tag = %tag_name, error = %e, "push failed");
            ui::display_boundary_warning(&BoundaryWarning::PushFailed {
                tag: tag_name.to_string(),
                remote: args.remote.clone(),
                reason: e.to_string(),
            });
            ui::display_manual_push_instruction(tag_name, &args.remote);
            TagState::PushFailed
        }
    }
}

/// Pick the reference to tag according to the selection policy
pub fn select_reference<R: Repository, P: Prompter>(
    args: &TagWorkflowArgs,
    repo: &R,
    prompter: &P,
) -> Result<GitRef> {
    match &args.branch_selection {
        BranchSelection::Explicit(name) => repo.find_reference(name),
        BranchSelection::Never => repo.head(),
        BranchSelection::Always => prompt_for_branch(repo, prompter),
        BranchSelection::Auto => {
            let head = repo.head()?;
            if head.name != args.primary_branch && !args.quiet {
                prompt_for_branch(repo, prompter)
            } else {
                Ok(head)
            }
        }
    }
}

/// Let the user choose among local branches
pub fn prompt_for_branch<R: Repository, P: Prompter>(repo: &R, prompter: &P) -> Result<GitRef> {
    let branches = repo.list_branches()?;
    if branches.is_empty() {
        return Err(SemvertagError::repository("No local branches to choose from"));
    }

    let names: Vec<String> = branches.iter().map(|b| b.name.clone()).collect();
    let index = prompter.select("Select Branch", &names)?;
    branches
        .into_iter()
        .nth(index)
        .ok_or_else(|| SemvertagError::prompt("Invalid branch selection"))
}

/// Identity for the new tag: flags over config, prompting for whatever is missing
pub fn resolve_author<R: Repository, P: Prompter>(
    args: &TagWorkflowArgs,
    repo: &R,
    prompter: &P,
) -> Result<AuthorInfo> {
    let (configured, lookup_error) =
        match identity::read_author_info(repo, args.global_config.as_deref()) {
            Ok(author) => (author, None),
            Err(e) => (AuthorInfo::default(), Some(e)),
        };

    let mut author = configured.overridden_by(args.username.as_deref(), args.email.as_deref());
    if author.is_complete() {
        return Ok(author);
    }

    if let Some(e) = lookup_error {
        ui::display_boundary_warning(&BoundaryWarning::IdentityUnavailable {
            reason: e.to_string(),
        });
    }

    if args.quiet {
        return Err(SemvertagError::identity(
            "Cannot read username/email from config and --quiet is set; pass --username and --email",
        ));
    }

    if author.username.is_empty() {
        author.username = prompter.input("author name")?;
    }
    if author.email.is_empty() {
        author.email = prompter.input("author email")?;
    }

    if !author.is_complete() {
        return Err(SemvertagError::identity("Invalid/incomplete author info"));
    }
    Ok(author)
}

fn resolve_message<P: Prompter>(args: &TagWorkflowArgs, prompter: &P) -> Result<String> {
    match &args.message {
        Some(message) if !message.is_empty() => Ok(message.clone()),
        _ if args.quiet => Ok(String::new()),
        _ => prompter.input("Enter tag message"),
    }
}
