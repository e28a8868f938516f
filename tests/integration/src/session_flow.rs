//! End-to-end integration test for a sandboxed session
//!
//! Exercises the library flow the CLI drives: config -> target -> workspace
//! -> snapshot -> policy -> agent -> reconcile -> retention.

use pretty_assertions::assert_eq;
use safer_agent::{AgentLauncher, SandboxPolicy};
use safer_core::{
    Classification, ReconcileOptions, SessionConfig, SyncTarget, Workspace, reconcile, snapshot,
};
use safer_test_utils::tree::TestTree;

/// Load a config written to a scratch tree.
fn load_config(scratch: &TestTree, toml: &str) -> SessionConfig {
    let path = scratch.write("config.toml", toml);
    SessionConfig::load(Some(path.as_path())).unwrap()
}

#[test]
fn test_full_session_without_conflicts() {
    let original = TestTree::with_files(&[
        ("README.md", "# Project"),
        ("src/lib.txt", "fn main"),
        (".git/HEAD", "ref: refs/heads/main"),
        ("notes.lock", "lock"),
    ]);
    let scratch = TestTree::new();
    let config = load_config(&scratch, "[filter]\nskip_names = [\"notes.lock\"]\n");
    let filter = config.path_filter();

    let target = SyncTarget::resolve(original.root()).unwrap();
    assert!(target.is_dir());
    let workspace = Workspace::create_in(scratch.root(), &config.workspace.prefix).unwrap();

    let manifest = snapshot(target.path(), workspace.root(), &filter).unwrap();
    assert_eq!(
        manifest.keys().collect::<Vec<_>>(),
        vec!["README.md", "src/lib.txt"]
    );

    let settings = SandboxPolicy::with_overrides(config.policy.allow.clone(), config.policy.deny.clone())
        .write(workspace.root())
        .unwrap();
    assert!(settings.starts_with(workspace.root()));

    // What the agent does.
    std::fs::write(workspace.root().join("README.md"), "# Project\n\nMore docs").unwrap();
    std::fs::write(workspace.root().join("CHANGELOG.md"), "## 0.1.0").unwrap();
    std::fs::remove_file(workspace.root().join("src/lib.txt")).unwrap();

    let report = reconcile(
        workspace.root(),
        target.original_base(),
        &manifest,
        &filter,
        ReconcileOptions::default(),
    );

    assert_eq!(report.classification_of("README.md"), Some(Classification::Synced));
    assert_eq!(report.classification_of("CHANGELOG.md"), Some(Classification::New));
    assert_eq!(
        report.classification_of("src/lib.txt"),
        Some(Classification::DeletedInSession)
    );
    assert!(!report.must_retain(config.workspace.retain_on_write_error));

    original.assert_file_contains("README.md", "# Project\n\nMore docs");
    original.assert_file_contains("CHANGELOG.md", "## 0.1.0");
    original.assert_file_contains("src/lib.txt", "fn main");
    original.assert_file_contains(".git/HEAD", "ref: refs/heads/main");
    original.assert_file_not_exists(".claude");

    let root = workspace.root().to_path_buf();
    workspace.discard().unwrap();
    assert!(!root.exists());
}

#[test]
fn test_conflicted_session_is_retained() {
    let original = TestTree::with_files(&[("plan.md", "v1")]);
    let scratch = TestTree::new();
    let config = load_config(&scratch, "");
    let filter = config.path_filter();

    let target = SyncTarget::resolve(original.path("plan.md")).unwrap();
    assert!(!target.is_dir());
    let workspace = Workspace::create_in(scratch.root(), &config.workspace.prefix).unwrap();
    let manifest = snapshot(target.path(), workspace.root(), &filter).unwrap();

    std::fs::write(workspace.root().join("plan.md"), "v2 from agent").unwrap();
    original.write("plan.md", "v2 from user");

    let report = reconcile(
        workspace.root(),
        target.original_base(),
        &manifest,
        &filter,
        ReconcileOptions::default(),
    );

    assert_eq!(
        report.classification_of("plan.md"),
        Some(Classification::ConflictModified)
    );
    assert!(report.must_retain(config.workspace.retain_on_write_error));
    original.assert_file_contains("plan.md", "v2 from user");

    let kept = workspace.retain();
    assert_eq!(
        std::fs::read_to_string(kept.join("plan.md")).unwrap(),
        "v2 from agent"
    );
}

#[test]
fn test_policy_overrides_from_config() {
    let scratch = TestTree::new();
    let config = load_config(
        &scratch,
        "[policy]\nallow = [\"Bash(ls *)\"]\ndeny = [\"Read(/etc/**)\"]\n",
    );
    let workspace = Workspace::create_in(scratch.root(), "safer-claude-").unwrap();

    let path = SandboxPolicy::with_overrides(config.policy.allow.clone(), config.policy.deny.clone())
        .write(workspace.root())
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "permissions": {
                "allow": ["Bash(ls *)"],
                "deny": ["Read(/etc/**)"]
            }
        })
    );
}

#[cfg(unix)]
#[test]
fn test_launched_agent_edits_are_synced() {
    let original = TestTree::with_files(&[("todo.txt", "- [ ] write tests")]);
    let scratch = TestTree::new();
    let config = load_config(&scratch, "");
    let filter = config.path_filter();

    let target = SyncTarget::resolve(original.root()).unwrap();
    let workspace = Workspace::create_in(scratch.root(), &config.workspace.prefix).unwrap();
    let manifest = snapshot(target.path(), workspace.root(), &filter).unwrap();
    SandboxPolicy::default().write(workspace.root()).unwrap();

    let exit = AgentLauncher::new("/bin/sh")
        .args(["-c", "echo '- [x] write tests' > todo.txt && test -f .claude/settings.json"])
        .launch(workspace.root())
        .unwrap();
    assert!(exit.success());

    let report = reconcile(
        workspace.root(),
        target.original_base(),
        &manifest,
        &filter,
        ReconcileOptions::default(),
    );

    assert_eq!(report.classification_of("todo.txt"), Some(Classification::Synced));
    assert_eq!(report.outcomes.len(), 1);
    original.assert_file_contains("todo.txt", "- [x] write tests\n");
    workspace.discard().unwrap();
}
