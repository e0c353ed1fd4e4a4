//! CLI tests for the `desk` binary.
//!
//! Spawns the real binary and verifies the stable exit codes: OK, INVALID,
//! REJECTED and DIVERGED.

use std::path::Path;
use std::process::{Command, Output};

use desk::exit_codes;

fn desk(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_desk"))
        .current_dir(root)
        .args(args)
        .output()
        .unwrap_or_else(|err| panic!("run desk {args:?}: {err}"))
}

#[test]
fn init_then_validate_succeeds() {
    let temp = tempfile::tempdir().expect("tempdir");

    let init = desk(temp.path(), &["init"]);
    assert_eq!(init.status.code(), Some(exit_codes::OK));

    let validate = desk(temp.path(), &["validate"]);
    assert_eq!(validate.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&validate.stdout);
    for kind in ["chat", "projects", "inbox", "wbs"] {
        assert!(stdout.contains(kind), "missing {kind} in: {stdout}");
    }
}

#[test]
fn init_twice_without_force_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    desk(temp.path(), &["init"]);

    let again = desk(temp.path(), &["init"]);
    assert_eq!(again.status.code(), Some(exit_codes::INVALID));

    let forced = desk(temp.path(), &["init", "--force"]);
    assert_eq!(forced.status.code(), Some(exit_codes::OK));
}

/// A reducer precondition failure exits REJECTED and leaves the file alone.
#[test]
fn duplicate_stakeholder_exits_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    desk(temp.path(), &["init"]);

    let action = r#"{"type": "ADD_STAKEHOLDER", "input": {"id": "s-1", "name": "Ada", "ethAddress": "0xaaa"}}"#;
    let first = desk(temp.path(), &["apply", "inbox", "--json", action]);
    assert_eq!(first.status.code(), Some(exit_codes::OK));

    let inbox_path = temp.path().join(".desk/documents/inbox.json");
    let before = std::fs::read(&inbox_path).expect("read inbox");

    let second = desk(temp.path(), &["apply", "inbox", "--json", action]);
    assert_eq!(second.status.code(), Some(exit_codes::REJECTED));
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("already exists"), "stderr: {stderr}");

    let after = std::fs::read(&inbox_path).expect("read inbox");
    assert_eq!(before, after);
}

/// Schema-invalid action JSON exits INVALID before touching the document.
#[test]
fn malformed_action_exits_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    desk(temp.path(), &["init"]);

    let action = r#"{"type": "ADD_STAKEHOLDER", "input": {"id": "s-1"}}"#;
    let output = desk(temp.path(), &["apply", "inbox", "--json", action]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
}

/// Dry-run reconcile exits DIVERGED while transitions are pending, OK once
/// the state is converged.
#[test]
fn reconcile_dry_run_reports_divergence() {
    let temp = tempfile::tempdir().expect("tempdir");
    desk(temp.path(), &["init"]);

    let in_sync = desk(temp.path(), &["reconcile", "--dry-run"]);
    assert_eq!(in_sync.status.code(), Some(exit_codes::OK));

    let create = r#"{"type": "CREATE_PROJECT", "input": {"id": "p-1", "name": "Demo", "path": "/tmp/demo"}}"#;
    assert_eq!(
        desk(temp.path(), &["apply", "projects", "--json", create])
            .status
            .code(),
        Some(exit_codes::OK)
    );
    let run = r#"{"type": "RUN_PROJECT", "input": {"id": "p-1"}}"#;
    assert_eq!(
        desk(temp.path(), &["apply", "projects", "--json", run])
            .status
            .code(),
        Some(exit_codes::OK)
    );

    let diverged = desk(temp.path(), &["reconcile", "--dry-run"]);
    assert_eq!(diverged.status.code(), Some(exit_codes::DIVERGED));
    let stdout = String::from_utf8_lossy(&diverged.stdout);
    assert!(stdout.contains("p-1: start"), "stdout: {stdout}");
}

#[test]
fn say_appends_a_chat_message() {
    let temp = tempfile::tempdir().expect("tempdir");
    desk(temp.path(), &["init"]);

    let say = desk(temp.path(), &["say", "hello agent"]);
    assert_eq!(say.status.code(), Some(exit_codes::OK));

    let show = desk(temp.path(), &["show", "chat"]);
    assert_eq!(show.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&show.stdout);
    assert!(stdout.contains("hello agent"), "stdout: {stdout}");
}

#[test]
fn show_rejects_unknown_document() {
    let temp = tempfile::tempdir().expect("tempdir");
    desk(temp.path(), &["init"]);

    let output = desk(temp.path(), &["show", "mailbox"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown document"), "stderr: {stderr}");
}
