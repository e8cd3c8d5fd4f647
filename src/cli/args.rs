use std::path::PathBuf;

use clap::Parser;

use crate::cli::orchestration::BranchSelection;
use crate::domain::VersionBump;
use crate::error::{Result, SemvertagError};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "semvertag",
    version,
    about = "Create annotated semantic-version tags in a git repository"
)]
pub struct Cli {
    #[arg(long, help = "Directory of the repository (defaults to the current directory)")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Tag prefix")]
    pub prefix: Option<String>,

    #[arg(long, help = "Upgrade patch version")]
    pub patch: bool,

    #[arg(long, help = "Upgrade minor version")]
    pub minor: bool,

    #[arg(long, help = "Upgrade major version")]
    pub major: bool,

    #[arg(long, help = "Reset lower version components when bumping major or minor")]
    pub reset_lower: bool,

    #[arg(long, help = "Do not fetch tags before computing the new version")]
    pub no_fetch: bool,

    #[arg(long, help = "Do not push the new tag")]
    pub no_push: bool,

    #[arg(short, long, help = "Do not ask before creating (and pushing) the new tag")]
    pub quiet: bool,

    #[arg(long, help = "Do not ask for a branch when HEAD is not the primary branch")]
    pub no_select_branch: bool,

    #[arg(long, help = "Always select the branch to tag")]
    pub always_select_branch: bool,

    #[arg(short, long, help = "Branch or tag to tag, without prompting")]
    pub branch: Option<String>,

    #[arg(long, help = "Branch whose tags carry no branch name (default: master)")]
    pub primary_branch: Option<String>,

    #[arg(long, help = "Username to create the tag with; read from git config or prompted if absent")]
    pub username: Option<String>,

    #[arg(long, help = "Email to create the tag with; read from git config or prompted if absent")]
    pub email: Option<String>,

    #[arg(short, long, help = "Tag message; prompted for unless --quiet")]
    pub message: Option<String>,

    #[arg(long, help = "Print the last n matching tags (default: 5)")]
    pub print_last: Option<usize>,

    #[arg(long, help = "Remote to fetch from and push to (default: origin)")]
    pub remote: Option<String>,

    #[arg(
        short,
        long,
        help = "Custom configuration file path (default: semvertag.toml in the repository root, then the user config directory)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Preview the tag without creating it")]
    pub dry_run: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
}

impl Cli {
    /// Reject flag combinations that make no sense; runs before the repository is opened
    pub fn validate(&self) -> Result<VersionBump> {
        let bump = VersionBump::from_flags(self.major, self.minor, self.patch)?;

        if self.no_select_branch && self.always_select_branch {
            return Err(SemvertagError::usage(
                "Can set at most one of --no-select-branch and --always-select-branch",
            ));
        }
        if self.always_select_branch && self.quiet {
            return Err(SemvertagError::usage(
                "Cannot combine --quiet and --always-select-branch",
            ));
        }
        if self.branch.is_some() && (self.no_select_branch || self.always_select_branch) {
            return Err(SemvertagError::usage(
                "--branch cannot be combined with --no-select-branch or --always-select-branch",
            ));
        }

        Ok(bump)
    }

    pub fn branch_selection(&self) -> BranchSelection {
        if let Some(name) = &self.branch {
            BranchSelection::Explicit(name.clone())
        } else if self.always_select_branch {
            BranchSelection::Always
        } else if self.no_select_branch {
            BranchSelection::Never
        } else {
            BranchSelection::Auto
        }
    }
}
