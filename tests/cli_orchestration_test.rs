use chrono::{DateTime, FixedOffset};
use git2::{ObjectType, Oid};
use semver::Version;

use semvertag::cli::{run_tag_workflow, BranchSelection, TagState, TagWorkflowArgs};
use semvertag::command::RecordingRunner;
use semvertag::domain::{AuthorInfo, VersionBump};
use semvertag::git::{GitRef, MockRepository, ObjectInfo};
use semvertag::ui::ScriptedPrompter;
use semvertag::SemvertagError;

fn oid(byte: u8) -> Oid {
    Oid::from_bytes(&[byte; 20]).unwrap()
}

fn when(secs: i64) -> DateTime<FixedOffset> {
    DateTime::from_timestamp(secs, 0).unwrap().fixed_offset()
}

fn jane() -> AuthorInfo {
    AuthorInfo::new("Jane Doe", "jane@example.com")
}

/// master at commit 1 (HEAD), develop at commit 2, identity configured
fn repo_with_tags(tags: &[(&str, i64)]) -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_branch("master", oid(1));
    repo.add_branch("develop", oid(2));
    repo.set_identity(jane());
    for (name, secs) in tags {
        repo.add_tag(*name, oid(1), &jane(), when(*secs));
    }
    repo
}

fn quiet_args(bump: VersionBump) -> TagWorkflowArgs {
    let mut args = TagWorkflowArgs::new("/tmp/repo", bump);
    args.quiet = true;
    args.print_last = 0;
    args.global_config = None;
    args
}

#[test]
fn test_quiet_patch_release_on_primary_branch() {
    let repo = repo_with_tags(&[("v1.0.0", 100), ("v1.2.3", 200)]);
    let prompter = ScriptedPrompter::new();
    let runner = RecordingRunner::new();

    let result = run_tag_workflow(&quiet_args(VersionBump::Patch), &repo, &prompter, &runner)
        .expect("workflow should succeed");

    assert_eq!(result.tag, "v1.2.4");
    assert_eq!(result.branch, "master");
    assert_eq!(result.version, Version::new(1, 2, 4));
    assert_eq!(result.commit, oid(1));
    assert_eq!(result.state, TagState::Pushed);

    assert_eq!(
        runner.calls(),
        vec!["git fetch --tags origin", "git push origin v1.2.4"]
    );
    assert!(prompter.asked().is_empty());

    let created = repo.created_tags();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].name, "v1.2.4");
    assert_eq!(created[0].target, oid(1));
    assert_eq!(created[0].tagger, jane());
    assert_eq!(created[0].message, "");
}

#[test]
fn test_most_recent_tag_wins_over_highest_version() {
    let repo = repo_with_tags(&[("v2.0.0", 100), ("v1.5.0", 200)]);

    let result = run_tag_workflow(
        &quiet_args(VersionBump::Patch),
        &repo,
        &ScriptedPrompter::new(),
        &RecordingRunner::new(),
    )
    .unwrap();

    assert_eq!(result.tag, "v1.5.1");
}

#[test]
fn test_minor_bump_preserves_patch_by_default() {
    let repo = repo_with_tags(&[("v1.2.3", 100)]);

    let result = run_tag_workflow(
        &quiet_args(VersionBump::Minor),
        &repo,
        &ScriptedPrompter::new(),
        &RecordingRunner::new(),
    )
    .unwrap();

    assert_eq!(result.tag, "v1.3.3");
}

#[test]
fn test_prefixed_major_bump_with_reset() {
    let repo = repo_with_tags(&[("rel-v1.2.3", 100), ("v9.0.0", 200), ("rel-notes", 300)]);
    let mut args = quiet_args(VersionBump::Major);
    args.prefix = "rel".to_string();
    args.reset_lower = true;

    let result =
        run_tag_workflow(&args, &repo, &ScriptedPrompter::new(), &RecordingRunner::new()).unwrap();

    assert_eq!(result.tag, "rel-v2.0.0");
}

#[test]
fn test_first_tag_starts_from_zero() {
    let repo = repo_with_tags(&[]);

    let result = run_tag_workflow(
        &quiet_args(VersionBump::Patch),
        &repo,
        &ScriptedPrompter::new(),
        &RecordingRunner::new(),
    )
    .unwrap();

    assert_eq!(result.tag, "v0.0.1");
}

#[test]
fn test_feature_branch_head_prompts_for_branch() {
    let mut repo = repo_with_tags(&[("v0.4.0", 100)]);
    repo.set_head(GitRef::branch("develop", oid(2)));
    let prompter = ScriptedPrompter::new()
        .select_with(1)
        .input_with("Preview build")
        .confirm_with(true);
    let mut args = quiet_args(VersionBump::Minor);
    args.quiet = false;

    let result = run_tag_workflow(&args, &repo, &prompter, &RecordingRunner::new()).unwrap();

    assert_eq!(result.tag, "developv0.5.0");
    assert_eq!(result.commit, oid(2));
    let asked = prompter.asked();
    assert_eq!(asked[0], "Select Branch");
    assert_eq!(asked[1], "Enter tag message");
    assert!(asked[2].starts_with("Will create tag developv0.5.0 on develop"));
    assert_eq!(repo.created_tags()[0].message, "Preview build");
}

#[test]
fn test_selected_primary_branch_has_no_branch_segment() {
    let mut repo = repo_with_tags(&[("v0.4.0", 100)]);
    repo.set_head(GitRef::branch("develop", oid(2)));
    let prompter = ScriptedPrompter::new().select_with(0).confirm_with(true);
    let mut args = quiet_args(VersionBump::Patch);
    args.quiet = false;
    args.message = Some("hotfix".to_string());

    let result = run_tag_workflow(&args, &repo, &prompter, &RecordingRunner::new()).unwrap();

    assert_eq!(result.tag, "v0.4.1");
    assert_eq!(result.commit, oid(1));
}

#[test]
fn test_quiet_on_feature_branch_tags_head() {
    let mut repo = repo_with_tags(&[]);
    repo.set_head(GitRef::branch("feature-x", oid(3)));
    repo.add_object(oid(3), ObjectInfo::Commit);

    let result = run_tag_workflow(
        &quiet_args(VersionBump::Major),
        &repo,
        &ScriptedPrompter::new(),
        &RecordingRunner::new(),
    )
    .unwrap();

    assert_eq!(result.tag, "feature-xv1.0.0");
    assert_eq!(result.commit, oid(3));
}

#[test]
fn test_no_select_branch_never_prompts() {
    let mut repo = repo_with_tags(&[]);
    repo.set_head(GitRef::branch("develop", oid(2)));
    let prompter = ScriptedPrompter::new().confirm_with(true);
    let mut args = quiet_args(VersionBump::Patch);
    args.quiet = false;
    args.message = Some("m".to_string());
    args.branch_selection = BranchSelection::Never;

    let result = run_tag_workflow(&args, &repo, &prompter, &RecordingRunner::new()).unwrap();

    assert_eq!(result.branch, "develop");
    assert!(!prompter.asked().iter().any(|q| q == "Select Branch"));
}

#[test]
fn test_always_select_branch_prompts_on_primary() {
    let repo = repo_with_tags(&[]);
    let prompter = ScriptedPrompter::new().select_with(1).confirm_with(true);
    let mut args = quiet_args(VersionBump::Patch);
    args.quiet = false;
    args.message = Some("m".to_string());
    args.branch_selection = BranchSelection::Always;

    let result = run_tag_workflow(&args, &repo, &prompter, &RecordingRunner::new()).unwrap();

    assert_eq!(result.branch, "develop");
}

#[test]
fn test_explicit_tag_reference_resolves_to_commit() {
    let mut repo = repo_with_tags(&[]);
    repo.add_tag("snapshot", oid(2), &jane(), when(50));
    let mut args = quiet_args(VersionBump::Patch);
    args.branch_selection = BranchSelection::Explicit("snapshot".to_string());

    let result =
        run_tag_workflow(&args, &repo, &ScriptedPrompter::new(), &RecordingRunner::new()).unwrap();

    assert_eq!(result.commit, oid(2));
    assert_eq!(result.tag, "snapshotv0.0.1");
}

#[test]
fn test_tag_pointing_at_tree_is_rejected() {
    let mut repo = repo_with_tags(&[]);
    repo.add_object(
        oid(9),
        ObjectInfo::Tag {
            target: oid(8),
            target_kind: ObjectType::Tree,
        },
    );
    repo.set_head(GitRef::tag("tree-tag", oid(9)));
    let mut args = quiet_args(VersionBump::Patch);
    args.branch_selection = BranchSelection::Never;

    let err = run_tag_workflow(&args, &repo, &ScriptedPrompter::new(), &RecordingRunner::new())
        .unwrap_err();

    assert!(matches!(
        err,
        SemvertagError::UnsupportedTarget { ref kind } if kind == "tree"
    ));
    assert!(repo.created_tags().is_empty());
}

#[test]
fn test_fetch_failure_is_fatal() {
    let repo = repo_with_tags(&[("v1.0.0", 100)]);
    let runner = RecordingRunner::new().failing("fetch");

    let err = run_tag_workflow(
        &quiet_args(VersionBump::Patch),
        &repo,
        &ScriptedPrompter::new(),
        &runner,
    )
    .unwrap_err();

    assert!(matches!(err, SemvertagError::Command { .. }));
    assert!(repo.created_tags().is_empty());
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn test_no_fetch_skips_fetch() {
    let repo = repo_with_tags(&[]);
    let runner = RecordingRunner::new();
    let mut args = quiet_args(VersionBump::Patch);
    args.fetch = false;

    run_tag_workflow(&args, &repo, &ScriptedPrompter::new(), &runner).unwrap();

    assert_eq!(runner.calls(), vec!["git push origin v0.0.1"]);
}

#[test]
fn test_push_failure_keeps_tag() {
    let repo = repo_with_tags(&[("v1.0.0", 100)]);
    let runner = RecordingRunner::new().failing("push");

    let result = run_tag_workflow(
        &quiet_args(VersionBump::Patch),
        &repo,
        &ScriptedPrompter::new(),
        &runner,
    )
    .expect("push failure must not fail the run");

    assert_eq!(result.state, TagState::PushFailed);
    assert!(result.state.is_created());
    assert_eq!(repo.created_tags().len(), 1);
}

#[test]
fn test_no_push_creates_locally() {
    let repo = repo_with_tags(&[]);
    let runner = RecordingRunner::new();
    let mut args = quiet_args(VersionBump::Patch);
    args.push = false;
    args.remote = "upstream".to_string();

    let result = run_tag_workflow(&args, &repo, &ScriptedPrompter::new(), &runner).unwrap();

    assert_eq!(result.state, TagState::CreatedLocally);
    assert_eq!(runner.calls(), vec!["git fetch --tags upstream"]);
}

#[test]
fn test_declined_confirmation_aborts() {
    let repo = repo_with_tags(&[]);
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::new().confirm_with(false);
    let mut args = quiet_args(VersionBump::Patch);
    args.quiet = false;
    args.message = Some("release".to_string());

    let result = run_tag_workflow(&args, &repo, &prompter, &runner).unwrap();

    assert_eq!(result.state, TagState::Aborted);
    assert!(!result.state.is_created());
    assert!(repo.created_tags().is_empty());
    assert_eq!(runner.calls(), vec!["git fetch --tags origin"]);
}

#[test]
fn test_dry_run_creates_nothing() {
    let repo = repo_with_tags(&[("v0.1.0", 100)]);
    let runner = RecordingRunner::new();
    let mut args = quiet_args(VersionBump::Minor);
    args.dry_run = true;

    let result = run_tag_workflow(&args, &repo, &ScriptedPrompter::new(), &runner).unwrap();

    assert_eq!(result.state, TagState::DryRun);
    assert_eq!(result.tag, "v0.2.0");
    assert!(repo.created_tags().is_empty());
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn test_interactive_dry_run_does_not_ask_for_confirmation() {
    let repo = repo_with_tags(&[("v0.1.0", 100)]);
    let prompter = ScriptedPrompter::new();
    let mut args = quiet_args(VersionBump::Patch);
    args.quiet = false;
    args.dry_run = true;
    args.message = Some("preview".to_string());

    let result = run_tag_workflow(&args, &repo, &prompter, &RecordingRunner::new()).unwrap();

    assert_eq!(result.state, TagState::DryRun);
    assert!(
        prompter.asked().is_empty(),
        "No prompt expected on a dry run, got: {:?}",
        prompter.asked()
    );
    assert!(repo.created_tags().is_empty());
}

#[test]
fn test_prerelease_is_carried_over_by_default() {
    let repo = repo_with_tags(&[("v1.0.0", 100), ("v1.2.3-rc.1", 200)]);

    let result = run_tag_workflow(
        &quiet_args(VersionBump::Patch),
        &repo,
        &ScriptedPrompter::new(),
        &RecordingRunner::new(),
    )
    .unwrap();

    assert_eq!(result.tag, "v1.2.4-rc.1");
}

#[test]
fn test_prerelease_is_dropped_with_reset() {
    let repo = repo_with_tags(&[("v1.2.3-rc.1", 200)]);
    let mut args = quiet_args(VersionBump::Minor);
    args.reset_lower = true;

    let result =
        run_tag_workflow(&args, &repo, &ScriptedPrompter::new(), &RecordingRunner::new()).unwrap();

    assert_eq!(result.tag, "v1.3.0");
}

#[test]
fn test_version_overflow_fails_without_creating_tag() {
    let repo = repo_with_tags(&[("v18446744073709551615.0.0", 100)]);

    let err = run_tag_workflow(
        &quiet_args(VersionBump::Major),
        &repo,
        &ScriptedPrompter::new(),
        &RecordingRunner::new(),
    )
    .unwrap_err();

    assert!(matches!(err, SemvertagError::Version(_)));
    assert!(repo.created_tags().is_empty());
}

#[test]
fn test_quiet_without_identity_fails() {
    let mut repo = MockRepository::new();
    repo.add_branch("master", oid(1));

    let err = run_tag_workflow(
        &quiet_args(VersionBump::Patch),
        &repo,
        &ScriptedPrompter::new(),
        &RecordingRunner::new(),
    )
    .unwrap_err();

    assert!(matches!(err, SemvertagError::Identity(_)));
    assert!(repo.created_tags().is_empty());
}

#[test]
fn test_identity_flags_in_quiet_mode() {
    let mut repo = MockRepository::new();
    repo.add_branch("master", oid(1));
    let mut args = quiet_args(VersionBump::Patch);
    args.username = Some("CI Bot".to_string());
    args.email = Some("ci@example.com".to_string());

    run_tag_workflow(&args, &repo, &ScriptedPrompter::new(), &RecordingRunner::new()).unwrap();

    assert_eq!(
        repo.created_tags()[0].tagger,
        AuthorInfo::new("CI Bot", "ci@example.com")
    );
}

#[test]
fn test_missing_identity_is_prompted() {
    let mut repo = MockRepository::new();
    repo.add_branch("master", oid(1));
    let prompter = ScriptedPrompter::new()
        .input_with("Jane Doe")
        .input_with("jane@example.com")
        .input_with("First release")
        .confirm_with(true);
    let mut args = quiet_args(VersionBump::Minor);
    args.quiet = false;

    run_tag_workflow(&args, &repo, &prompter, &RecordingRunner::new()).unwrap();

    assert_eq!(
        &prompter.asked()[..3],
        &["author name", "author email", "Enter tag message"]
    );
    let created = repo.created_tags();
    assert_eq!(created[0].tagger, jane());
    assert_eq!(created[0].message, "First release");
}

#[test]
fn test_partial_identity_only_prompts_missing_field() {
    let mut repo = MockRepository::new();
    repo.add_branch("master", oid(1));
    repo.set_identity(AuthorInfo::new("Jane Doe", ""));
    let prompter = ScriptedPrompter::new()
        .input_with("jane@example.com")
        .confirm_with(true);
    let mut args = quiet_args(VersionBump::Patch);
    args.quiet = false;
    args.message = Some("m".to_string());

    run_tag_workflow(&args, &repo, &prompter, &RecordingRunner::new()).unwrap();

    assert_eq!(prompter.asked()[0], "author email");
    assert_eq!(repo.created_tags()[0].tagger, jane());
}

#[test]
fn test_existing_tag_name_fails() {
    let mut repo = repo_with_tags(&[("v1.0.0", 100)]);
    repo.add_tag("v1.0.1", oid(1), &jane(), when(50));

    let err = run_tag_workflow(
        &quiet_args(VersionBump::Patch),
        &repo,
        &ScriptedPrompter::new(),
        &RecordingRunner::new(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("already exists"));
}
