//! Test-only helpers: a tempdir desk harness and a scripted launcher.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use documents::document::Document;
use documents::projects::state::ProjectsState;
use documents::schema::DocumentKind;

use crate::io::init::{DeskPaths, InitOptions, init_desk};
use crate::io::process::SpawnOutcome;
use crate::io::store::{load_document, write_document};
use crate::io::supervisor::{LaunchRequest, ProjectLauncher};

/// A freshly initialized `.desk/` inside a temp directory.
pub struct TestDesk {
    temp: tempfile::TempDir,
    pub paths: DeskPaths,
}

impl TestDesk {
    pub fn init() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_desk(temp.path(), &InitOptions { force: false }).expect("init desk");
        Self { temp, paths }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Overwrite the projects document with a fresh envelope around `state`.
    pub fn seed_projects(&self, state: ProjectsState) {
        let mut doc = Document::<ProjectsState>::new(DocumentKind::Projects.as_str());
        doc.state = state;
        write_document(&self.paths.projects_path, &doc).expect("seed projects");
    }

    pub fn projects(&self) -> Document<ProjectsState> {
        load_document(&self.paths.projects_path).expect("load projects")
    }
}

/// Launcher double that replays scripted outcomes and records calls.
///
/// A `Started` outcome implicitly marks its pid alive, so a start followed
/// by a probe behaves like a real process.
#[derive(Default)]
pub struct ScriptedLauncher {
    inner: RefCell<ScriptedState>,
}

#[derive(Default)]
struct ScriptedState {
    alive: HashSet<u32>,
    start_outcomes: VecDeque<SpawnOutcome>,
    started: Vec<String>,
    stopped: Vec<u32>,
}

impl ScriptedLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome for the next `start` call.
    pub fn with_start(self, outcome: SpawnOutcome) -> Self {
        self.inner.borrow_mut().start_outcomes.push_back(outcome);
        self
    }

    /// Mark a pid as alive before the pass runs.
    pub fn with_alive(self, pid: u32) -> Self {
        self.inner.borrow_mut().alive.insert(pid);
        self
    }

    /// Project ids passed to `start`, in call order.
    pub fn started(&self) -> Vec<String> {
        self.inner.borrow().started.clone()
    }

    /// Pids passed to `stop`, in call order.
    pub fn stopped(&self) -> Vec<u32> {
        self.inner.borrow().stopped.clone()
    }
}

impl ProjectLauncher for ScriptedLauncher {
    fn start(&self, request: &LaunchRequest) -> Result<SpawnOutcome> {
        let mut inner = self.inner.borrow_mut();
        inner.started.push(request.project_id.clone());
        let outcome = inner
            .start_outcomes
            .pop_front()
            .expect("scripted launcher ran out of start outcomes");
        if let SpawnOutcome::Started { pid } = outcome {
            inner.alive.insert(pid);
        }
        Ok(outcome)
    }

    fn stop(&self, pid: u32, _grace: Duration) -> Result<bool> {
        let mut inner = self.inner.borrow_mut();
        inner.stopped.push(pid);
        inner.alive.remove(&pid);
        Ok(true)
    }

    fn is_alive(&self, pid: u32) -> bool {
        self.inner.borrow().alive.contains(&pid)
    }
}
