//! Agent-management desk console.
//!
//! Persists four documents (chat, projects, inbox, wbs) under `.desk/` and
//! exposes commands to validate them, apply actions, and reconcile project
//! processes toward their targeted statuses.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;
use uuid::Uuid;

use documents::chat::actions::ChatAction;
use documents::chat::state::ChatSender;
use documents::schema::DocumentKind;

use desk::apply::{ApplyOutcome, apply_action};
use desk::exit_codes;
use desk::io::init::{InitOptions, init_desk};
use desk::io::supervisor::LocalLauncher;
use desk::reconcile::{ReconcileOptions, reconcile};
use desk::show::{render_document, render_status};
use desk::validate::validate_desk;

#[derive(Parser)]
#[command(name = "desk", version, about = "Agent-management desk console")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.desk/` with config and empty documents.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Check layout, config, and all documents (schema + invariants).
    Validate,
    /// Apply a JSON action to a document.
    Apply {
        /// Target document: chat, projects, inbox, or wbs.
        document: String,
        /// Read the action from a JSON file.
        #[arg(long, conflicts_with = "json")]
        file: Option<PathBuf>,
        /// Inline action JSON.
        #[arg(long)]
        json: Option<String>,
    },
    /// Post a user message to the chat (id generated).
    Say {
        /// Message content.
        content: String,
    },
    /// Print a text rendering of one document.
    Show {
        /// Target document: chat, projects, inbox, or wbs.
        document: String,
    },
    /// Print the project table and pending transitions.
    Status,
    /// Converge projects toward their targeted statuses.
    Reconcile {
        /// Plan only; exit 3 if transitions are pending.
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    desk::logging::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let root = std::env::current_dir().context("resolve working directory")?;
    match cli.command {
        Command::Init { force } => cmd_init(&root, force),
        Command::Validate => cmd_validate(&root),
        Command::Apply {
            document,
            file,
            json,
        } => cmd_apply(&root, &document, file.as_deref(), json.as_deref()),
        Command::Say { content } => cmd_say(&root, &content),
        Command::Show { document } => cmd_show(&root, &document),
        Command::Status => cmd_status(&root),
        Command::Reconcile { dry_run } => cmd_reconcile(&root, dry_run),
    }
}

fn cmd_init(root: &Path, force: bool) -> Result<i32> {
    let paths = init_desk(root, &InitOptions { force })?;
    println!("initialized {}", paths.desk_dir.display());
    Ok(exit_codes::OK)
}

fn cmd_validate(root: &Path) -> Result<i32> {
    let outcome = validate_desk(root)?;
    for doc in &outcome.documents {
        println!(
            "{}: ok (id {}, revision {})",
            doc.kind.as_str(),
            doc.id,
            doc.revision
        );
    }
    Ok(exit_codes::OK)
}

fn cmd_apply(root: &Path, document: &str, file: Option<&Path>, json: Option<&str>) -> Result<i32> {
    let kind = parse_kind(document)?;
    let raw_text = match (file, json) {
        (Some(path), None) => {
            fs::read_to_string(path).with_context(|| format!("read action {}", path.display()))?
        }
        (None, Some(inline)) => inline.to_string(),
        _ => bail!("provide exactly one of --file or --json"),
    };
    let raw: Value = serde_json::from_str(&raw_text).context("parse action JSON")?;
    report_apply(apply_action(root, kind, &raw)?)
}

fn cmd_say(root: &Path, content: &str) -> Result<i32> {
    let action = ChatAction::add_message(Uuid::new_v4().to_string(), ChatSender::User, content);
    let raw = serde_json::to_value(&action).context("serialize action")?;
    report_apply(apply_action(root, DocumentKind::Chat, &raw)?)
}

fn report_apply(outcome: ApplyOutcome) -> Result<i32> {
    match outcome {
        ApplyOutcome::Applied {
            action_type,
            revision,
            ..
        } => {
            println!("applied {action_type} (revision {revision})");
            Ok(exit_codes::OK)
        }
        ApplyOutcome::Rejected { message, .. } => {
            eprintln!("rejected: {message}");
            Ok(exit_codes::REJECTED)
        }
    }
}

fn cmd_show(root: &Path, document: &str) -> Result<i32> {
    let kind = parse_kind(document)?;
    println!("{}", render_document(root, kind)?);
    Ok(exit_codes::OK)
}

fn cmd_status(root: &Path) -> Result<i32> {
    println!("{}", render_status(root)?);
    Ok(exit_codes::OK)
}

fn cmd_reconcile(root: &Path, dry_run: bool) -> Result<i32> {
    let launcher = LocalLauncher;
    let report = reconcile(root, &launcher, &ReconcileOptions { dry_run })?;
    println!("{}", report.render());
    if dry_run && report.diverged() {
        return Ok(exit_codes::DIVERGED);
    }
    Ok(exit_codes::OK)
}

fn parse_kind(document: &str) -> Result<DocumentKind> {
    DocumentKind::parse(document).ok_or_else(|| {
        anyhow!("unknown document '{document}' (expected chat, projects, inbox, or wbs)")
    })
}
