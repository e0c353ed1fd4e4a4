//! Text renderings for `desk show` and `desk status`.

use std::path::Path;

use anyhow::Result;

use documents::chat::state::ChatState;
use documents::document::Document;
use documents::inbox::state::InboxState;
use documents::projects::reconcile::plan;
use documents::projects::state::ProjectsState;
use documents::schema::DocumentKind;
use documents::wbs::state::WbsState;

use crate::io::init::DeskPaths;
use crate::io::store::load_document;

/// How many trailing chat messages `desk show chat` prints.
const CHAT_TAIL: usize = 10;

/// Render one document under `root`.
pub fn render_document(root: &Path, kind: DocumentKind) -> Result<String> {
    let paths = DeskPaths::new(root);
    let text = match kind {
        DocumentKind::Chat => {
            let doc: Document<ChatState> = load_document(paths.document_path(kind))?;
            render_chat(&doc.state, doc.header.revision)
        }
        DocumentKind::Projects => {
            let doc: Document<ProjectsState> = load_document(paths.document_path(kind))?;
            render_projects(&doc.state)
        }
        DocumentKind::Inbox => {
            let doc: Document<InboxState> = load_document(paths.document_path(kind))?;
            render_inbox(&doc.state)
        }
        DocumentKind::Wbs => {
            let doc: Document<WbsState> = load_document(paths.document_path(kind))?;
            render_wbs(&doc.state)
        }
    };
    Ok(text)
}

/// Render the project table plus any pending reconcile transitions.
pub fn render_status(root: &Path) -> Result<String> {
    let paths = DeskPaths::new(root);
    let doc: Document<ProjectsState> = load_document(&paths.projects_path)?;

    let mut lines = vec![render_projects(&doc.state)];
    let planned = plan(&doc.state);
    if planned.is_empty() {
        lines.push("in sync: no pending transitions".to_string());
    } else {
        lines.push(format!("pending transitions ({}):", planned.len()));
        for item in &planned {
            lines.push(format!(
                "  - {}: {}",
                item.project_id,
                item.transition.as_str()
            ));
        }
    }
    Ok(lines.join("\n"))
}

/// Title line plus the last few messages.
pub fn render_chat(state: &ChatState, revision: u64) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} ({} messages, revision {})",
        state.title,
        state.messages.len(),
        revision
    ));
    let skip = state.messages.len().saturating_sub(CHAT_TAIL);
    if skip > 0 {
        lines.push(format!("  ... {skip} earlier messages"));
    }
    for message in state.messages.iter().skip(skip) {
        lines.push(format!(
            "  [{}] {}: {}",
            message.timestamp.format("%Y-%m-%d %H:%M"),
            message.sender.as_str(),
            message.content
        ));
    }
    lines.join("\n")
}

/// One line per project: statuses, pid, ports.
pub fn render_projects(state: &ProjectsState) -> String {
    if state.projects.is_empty() {
        return "no projects".to_string();
    }
    let mut lines = Vec::new();
    for project in &state.projects {
        let runtime = match &project.runtime {
            Some(runtime) => format!(" pid={} ports={:?}", runtime.pid, runtime.ports),
            None => String::new(),
        };
        lines.push(format!(
            "- {} ({}) {} -> {}{} [{}]",
            project.id,
            project.name,
            project.current_status.as_str(),
            project.targeted_status.as_str(),
            runtime,
            project.path
        ));
    }
    lines.join("\n")
}

/// Stakeholders then threads, removed stakeholders marked.
pub fn render_inbox(state: &InboxState) -> String {
    let mut lines = Vec::new();
    lines.push(format!("stakeholders ({}):", state.stakeholders.len()));
    for stakeholder in &state.stakeholders {
        let marker = if stakeholder.removed { " (removed)" } else { "" };
        lines.push(format!(
            "  - {} ({}){}",
            stakeholder.name, stakeholder.id, marker
        ));
    }
    lines.push(format!("threads ({}):", state.threads.len()));
    for thread in &state.threads {
        lines.push(format!(
            "  - {} [{}] {} ({} messages, stakeholder {})",
            thread.id,
            thread.status.as_str(),
            thread.topic,
            thread.messages.len(),
            thread.stakeholder
        ));
    }
    lines.join("\n")
}

/// Indented goal tree. Removed goals and their subtrees are omitted.
pub fn render_wbs(state: &WbsState) -> String {
    let mut lines = Vec::new();
    render_goals(state, None, 0, &mut lines);
    if lines.is_empty() {
        return "no goals".to_string();
    }
    lines.join("\n")
}

fn render_goals(state: &WbsState, parent_id: Option<&str>, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for goal in state.children_of(parent_id) {
        if goal.removed {
            continue;
        }
        let assignee = match &goal.assignee {
            Some(assignee) => format!(" @{assignee}"),
            None => String::new(),
        };
        let deps = if goal.dependencies.is_empty() {
            String::new()
        } else {
            format!(" deps={}", goal.dependencies.join(","))
        };
        lines.push(format!(
            "{}- {} [{}] {}{}{}",
            indent,
            goal.id,
            goal.status.as_str(),
            goal.description,
            assignee,
            deps
        ));
        render_goals(state, Some(&goal.id), depth + 1, lines);
    }
}
