//! Lifecycle tests driving `reconcile` through multiple passes.
//!
//! Every pass runs against the persisted documents with a scripted launcher,
//! so these cover observation, planning and execution end to end without
//! spawning real processes.

use desk::apply::apply_action;
use desk::io::pidfile::read_pidfile;
use desk::io::process::SpawnOutcome;
use desk::reconcile::{ReconcileOptions, reconcile};
use desk::test_support::{ScriptedLauncher, TestDesk};

use documents::projects::actions::ProjectsAction;
use documents::projects::reconcile::Transition;
use documents::projects::state::{CurrentStatus, TargetedStatus};
use documents::schema::DocumentKind;

fn apply(desk: &TestDesk, action: &ProjectsAction) {
    let raw = serde_json::to_value(action).expect("serialize action");
    let outcome = apply_action(desk.root(), DocumentKind::Projects, &raw).expect("apply");
    assert!(
        matches!(outcome, desk::apply::ApplyOutcome::Applied { .. }),
        "action unexpectedly rejected: {outcome:?}"
    );
}

/// Full lifecycle: create → run → switch runner → delete, one pass at a time.
///
/// Sequence:
/// 1. CREATE_PROJECT p-1: targeted STOPPED, pass plans nothing.
/// 2. RUN_PROJECT p-1: pass starts it (pid 500).
/// 3. RUN_PROJECT p-2: single-runner flips p-1's target; one pass stops
///    p-1 and starts p-2 (pid 600).
/// 4. DELETE_PROJECT p-2 while running: first pass only stops it, the next
///    pass marks it DELETED.
#[test]
fn lifecycle_converges_across_passes() {
    let desk = TestDesk::init();
    let launcher = ScriptedLauncher::new()
        .with_start(SpawnOutcome::Started { pid: 500 })
        .with_start(SpawnOutcome::Started { pid: 600 });

    // Pass 1: nothing targeted RUNNING yet.
    apply(&desk, &ProjectsAction::create_project("p-1", "First", "/tmp/p-1"));
    let report = reconcile(desk.root(), &launcher, &ReconcileOptions::default()).expect("pass 1");
    assert!(report.planned.is_empty());
    assert!(launcher.started().is_empty());

    // Pass 2: p-1 targeted RUNNING → started.
    apply(&desk, &ProjectsAction::run_project("p-1"));
    let report = reconcile(desk.root(), &launcher, &ReconcileOptions::default()).expect("pass 2");
    assert_eq!(report.planned.len(), 1);
    assert_eq!(report.planned[0].transition, Transition::Start);
    assert_eq!(launcher.started(), vec!["p-1".to_string()]);

    let doc = desk.projects();
    let p1 = doc.state.find_project("p-1").expect("p-1");
    assert_eq!(p1.current_status, CurrentStatus::Running);
    assert_eq!(p1.runtime.as_ref().map(|r| r.pid), Some(500));
    assert_eq!(
        read_pidfile(&desk.paths.pidfile_path("p-1")).expect("pidfile"),
        Some(500)
    );

    // Pass 3: running p-2 flips p-1's target; one pass handles both.
    apply(&desk, &ProjectsAction::create_project("p-2", "Second", "/tmp/p-2"));
    apply(&desk, &ProjectsAction::run_project("p-2"));
    let report = reconcile(desk.root(), &launcher, &ReconcileOptions::default()).expect("pass 3");
    let transitions: Vec<(&str, Transition)> = report
        .planned
        .iter()
        .map(|item| (item.project_id.as_str(), item.transition))
        .collect();
    assert_eq!(
        transitions,
        vec![("p-1", Transition::Stop), ("p-2", Transition::Start)]
    );
    assert_eq!(launcher.stopped(), vec![500]);

    let doc = desk.projects();
    let p1 = doc.state.find_project("p-1").expect("p-1");
    let p2 = doc.state.find_project("p-2").expect("p-2");
    assert_eq!(p1.current_status, CurrentStatus::Stopped);
    assert!(p1.runtime.is_none());
    assert_eq!(p2.current_status, CurrentStatus::Running);
    assert_eq!(p2.runtime.as_ref().map(|r| r.pid), Some(600));

    // Pass 4: deletion of a live project stops it first.
    apply(&desk, &ProjectsAction::delete_project("p-2"));
    let report = reconcile(desk.root(), &launcher, &ReconcileOptions::default()).expect("pass 4");
    assert_eq!(report.planned[0].transition, Transition::Stop);
    assert_eq!(launcher.stopped(), vec![500, 600]);

    let doc = desk.projects();
    let p2 = doc.state.find_project("p-2").expect("p-2");
    assert_eq!(p2.current_status, CurrentStatus::Stopped);
    assert_eq!(p2.targeted_status, TargetedStatus::Deleted);

    // Pass 5: the stopped project is marked deleted.
    let report = reconcile(desk.root(), &launcher, &ReconcileOptions::default()).expect("pass 5");
    assert_eq!(report.planned[0].transition, Transition::MarkDeleted);

    let doc = desk.projects();
    let p2 = doc.state.find_project("p-2").expect("p-2");
    assert_eq!(p2.current_status, CurrentStatus::Deleted);

    // Pass 6: converged.
    let report = reconcile(desk.root(), &launcher, &ReconcileOptions::default()).expect("pass 6");
    assert!(!report.diverged());
}

/// A crashed agent is demoted by the probe and restarted in the same pass,
/// and the pass appends log entries telling the story.
#[test]
fn crash_recovery_leaves_a_log_trail() {
    let desk = TestDesk::init();
    let launcher = ScriptedLauncher::new()
        .with_start(SpawnOutcome::Started { pid: 700 })
        .with_start(SpawnOutcome::Started { pid: 701 });

    apply(&desk, &ProjectsAction::create_project("p-1", "First", "/tmp/p-1"));
    apply(&desk, &ProjectsAction::run_project("p-1"));
    reconcile(desk.root(), &launcher, &ReconcileOptions::default()).expect("start pass");

    // Simulate the crash: forget pid 700 without telling the document.
    let crashed = ScriptedLauncher::new().with_start(SpawnOutcome::Started { pid: 701 });
    let report =
        reconcile(desk.root(), &crashed, &ReconcileOptions::default()).expect("recovery pass");
    assert_eq!(report.marked_missing, vec!["p-1".to_string()]);
    assert_eq!(crashed.started(), vec!["p-1".to_string()]);

    let doc = desk.projects();
    let p1 = doc.state.find_project("p-1").expect("p-1");
    assert_eq!(p1.current_status, CurrentStatus::Running);
    assert_eq!(p1.runtime.as_ref().map(|r| r.pid), Some(701));
    assert!(
        p1.logs
            .iter()
            .any(|entry| entry.message.contains("process 700 is gone"))
    );
    assert!(
        p1.logs
            .iter()
            .any(|entry| entry.message.contains("agent running (pid 701)"))
    );
}

/// Dry run reports divergence without executing or writing anything.
#[test]
fn dry_run_only_observes() {
    let desk = TestDesk::init();
    apply(&desk, &ProjectsAction::create_project("p-1", "First", "/tmp/p-1"));
    apply(&desk, &ProjectsAction::run_project("p-1"));
    let revision_before = desk.projects().header.revision;

    let launcher = ScriptedLauncher::new();
    let report = reconcile(desk.root(), &launcher, &ReconcileOptions { dry_run: true })
        .expect("dry run");

    assert!(report.diverged());
    assert!(launcher.started().is_empty());
    assert_eq!(desk.projects().header.revision, revision_before);
}
