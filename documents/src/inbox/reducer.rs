//! Reducer for the inbox document.

use crate::inbox::actions::{
    AddStakeholderInput, AddThreadMessageInput, ConfirmThreadResolvedInput, CreateThreadInput,
    InboxAction, MoveStakeholderInput, ProposeThreadResolvedInput, RemoveStakeholderInput,
    ThreadIdInput, UpdateStakeholderInput,
};
use crate::inbox::error::InboxError;
use crate::inbox::state::{
    InboxState, Stakeholder, Thread, ThreadMessage, ThreadParty, ThreadStatus,
};

pub fn reduce(state: &mut InboxState, action: &InboxAction) -> Result<(), InboxError> {
    match action {
        InboxAction::AddStakeholder(input) => add_stakeholder(state, input),
        InboxAction::UpdateStakeholder(input) => update_stakeholder(state, input),
        InboxAction::RemoveStakeholder(input) => remove_stakeholder(state, input),
        InboxAction::MoveStakeholder(input) => move_stakeholder(state, input),
        InboxAction::CreateThread(input) => create_thread(state, input),
        InboxAction::AddThreadMessage(input) => add_thread_message(state, input),
        InboxAction::ProposeThreadResolved(input) => propose_thread_resolved(state, input),
        InboxAction::ConfirmThreadResolved(input) => confirm_thread_resolved(state, input),
        InboxAction::ArchiveThread(input) => archive_thread(state, input),
        InboxAction::ReopenThread(input) => reopen_thread(state, input),
    }
}

fn find_thread_mut<'a>(state: &'a mut InboxState, id: &str) -> Result<&'a mut Thread, InboxError> {
    state
        .find_thread_mut(id)
        .ok_or_else(|| InboxError::ThreadNotFound { id: id.to_string() })
}

fn add_stakeholder(state: &mut InboxState, input: &AddStakeholderInput) -> Result<(), InboxError> {
    if state.find_stakeholder(&input.id).is_some() {
        return Err(InboxError::DuplicateStakeholder {
            id: input.id.clone(),
        });
    }

    state.stakeholders.push(Stakeholder {
        id: input.id.clone(),
        name: input.name.clone(),
        eth_address: input.eth_address.clone(),
        avatar: input.avatar.clone(),
        removed: false,
    });
    Ok(())
}

fn update_stakeholder(
    state: &mut InboxState,
    input: &UpdateStakeholderInput,
) -> Result<(), InboxError> {
    let stakeholder =
        state
            .find_stakeholder_mut(&input.id)
            .ok_or_else(|| InboxError::StakeholderNotFound {
                id: input.id.clone(),
            })?;
    if let Some(name) = &input.name {
        stakeholder.name = name.clone();
    }
    if let Some(eth_address) = &input.eth_address {
        stakeholder.eth_address = eth_address.clone();
    }
    if let Some(avatar) = &input.avatar {
        stakeholder.avatar = Some(avatar.clone());
    }
    Ok(())
}

/// Soft-delete a stakeholder and archive their threads.
///
/// The record stays in the list so existing threads keep resolving the
/// reference; the side effect keeps no orphaned conversation active.
fn remove_stakeholder(
    state: &mut InboxState,
    input: &RemoveStakeholderInput,
) -> Result<(), InboxError> {
    let stakeholder =
        state
            .find_stakeholder_mut(&input.id)
            .ok_or_else(|| InboxError::StakeholderNotFound {
                id: input.id.clone(),
            })?;
    stakeholder.removed = true;

    for thread in &mut state.threads {
        if thread.stakeholder == input.id {
            thread.status = ThreadStatus::Archived;
        }
    }
    Ok(())
}

/// Splice the stakeholder out and reinsert it before `insertBefore`.
///
/// An absent or unresolvable `insertBefore` (including the moved id itself)
/// appends at the end instead of raising.
fn move_stakeholder(state: &mut InboxState, input: &MoveStakeholderInput) -> Result<(), InboxError> {
    let position = state
        .stakeholders
        .iter()
        .position(|s| s.id == input.id)
        .ok_or_else(|| InboxError::StakeholderNotFound {
            id: input.id.clone(),
        })?;
    let stakeholder = state.stakeholders.remove(position);

    let destination = input
        .insert_before
        .as_deref()
        .and_then(|before| state.stakeholders.iter().position(|s| s.id == before));
    match destination {
        Some(index) => state.stakeholders.insert(index, stakeholder),
        None => state.stakeholders.push(stakeholder),
    }
    Ok(())
}

fn create_thread(state: &mut InboxState, input: &CreateThreadInput) -> Result<(), InboxError> {
    if state.find_thread(&input.id).is_some() {
        return Err(InboxError::DuplicateThread {
            id: input.id.clone(),
        });
    }
    if state.find_stakeholder(&input.stakeholder).is_none() {
        return Err(InboxError::StakeholderNotFound {
            id: input.stakeholder.clone(),
        });
    }

    state.threads.push(Thread {
        id: input.id.clone(),
        stakeholder: input.stakeholder.clone(),
        topic: input.topic.clone(),
        status: ThreadStatus::Open,
        messages: Vec::new(),
    });
    Ok(())
}

fn add_thread_message(
    state: &mut InboxState,
    input: &AddThreadMessageInput,
) -> Result<(), InboxError> {
    let thread = find_thread_mut(state, &input.thread_id)?;
    if thread.messages.iter().any(|m| m.id == input.message_id) {
        return Err(InboxError::DuplicateMessage {
            thread_id: input.thread_id.clone(),
            id: input.message_id.clone(),
        });
    }

    thread.messages.push(ThreadMessage {
        id: input.message_id.clone(),
        author: input.author,
        content: input.content.clone(),
        timestamp: input.timestamp,
    });
    Ok(())
}

fn propose_thread_resolved(
    state: &mut InboxState,
    input: &ProposeThreadResolvedInput,
) -> Result<(), InboxError> {
    let thread = find_thread_mut(state, &input.thread_id)?;
    thread.status = match input.proposed_by {
        ThreadParty::Agent => ThreadStatus::ProposedResolvedByAgent,
        ThreadParty::Stakeholder => ThreadStatus::ProposedResolvedByStakeholder,
    };
    Ok(())
}

/// Confirm a proposed resolution.
///
/// Accepts the confirmation from either party, including the one that
/// proposed; only the current status gates the transition.
fn confirm_thread_resolved(
    state: &mut InboxState,
    input: &ConfirmThreadResolvedInput,
) -> Result<(), InboxError> {
    let thread = find_thread_mut(state, &input.thread_id)?;
    if !thread.status.is_proposed() {
        return Err(InboxError::InvalidStatus {
            id: input.thread_id.clone(),
            status: thread.status,
        });
    }
    thread.status = ThreadStatus::ConfirmedResolved;
    Ok(())
}

fn archive_thread(state: &mut InboxState, input: &ThreadIdInput) -> Result<(), InboxError> {
    let thread = find_thread_mut(state, &input.thread_id)?;
    thread.status = ThreadStatus::Archived;
    Ok(())
}

fn reopen_thread(state: &mut InboxState, input: &ThreadIdInput) -> Result<(), InboxError> {
    let thread = find_thread_mut(state, &input.thread_id)?;
    thread.status = ThreadStatus::Open;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_thread() -> InboxState {
        let mut state = InboxState::default();
        reduce(
            &mut state,
            &InboxAction::add_stakeholder("s1", "Ada", "0xabc"),
        )
        .expect("add s1");
        reduce(
            &mut state,
            &InboxAction::create_thread("t1", "s1", "Budget review"),
        )
        .expect("create t1");
        state
    }

    #[test]
    fn add_stakeholder_rejects_duplicate_without_changes() {
        let mut state = InboxState::default();
        reduce(
            &mut state,
            &InboxAction::add_stakeholder("s1", "Ada", "0xabc"),
        )
        .expect("add s1");

        let err = reduce(
            &mut state,
            &InboxAction::add_stakeholder("s1", "Eve", "0xdef"),
        )
        .expect_err("duplicate");
        assert_eq!(
            err,
            InboxError::DuplicateStakeholder {
                id: "s1".to_string()
            }
        );
        assert_eq!(state.stakeholders.len(), 1);
        assert_eq!(state.stakeholders[0].name, "Ada");
    }

    /// Removal is a soft delete and archives only that stakeholder's threads.
    #[test]
    fn remove_stakeholder_flags_record_and_archives_their_threads() {
        let mut state = state_with_thread();
        reduce(
            &mut state,
            &InboxAction::add_stakeholder("s2", "Grace", "0xbeef"),
        )
        .expect("add s2");
        reduce(
            &mut state,
            &InboxAction::create_thread("t2", "s2", "Unrelated"),
        )
        .expect("create t2");

        reduce(&mut state, &InboxAction::remove_stakeholder("s1")).expect("remove s1");

        let removed = state.find_stakeholder("s1").expect("still present");
        assert!(removed.removed);
        assert_eq!(
            state.find_thread("t1").expect("t1").status,
            ThreadStatus::Archived
        );
        assert_eq!(
            state.find_thread("t2").expect("t2").status,
            ThreadStatus::Open
        );
    }

    #[test]
    fn move_stakeholder_reorders_before_target() {
        let mut state = InboxState::default();
        for id in ["s1", "s2", "s3"] {
            reduce(
                &mut state,
                &InboxAction::add_stakeholder(id, format!("{id} name"), format!("0x{id}")),
            )
            .expect("add");
        }

        reduce(&mut state, &InboxAction::move_stakeholder("s3", Some("s1")))
            .expect("move");

        let order: Vec<&str> = state.stakeholders.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["s3", "s1", "s2"]);
    }

    /// Absent, unknown or self-referencing `insertBefore` appends at the end.
    #[test]
    fn move_stakeholder_appends_when_target_unresolvable() {
        for insert_before in [None, Some("ghost"), Some("s1")] {
            let mut state = InboxState::default();
            for id in ["s1", "s2"] {
                reduce(
                    &mut state,
                    &InboxAction::add_stakeholder(id, format!("{id} name"), format!("0x{id}")),
                )
                .expect("add");
            }

            reduce(
                &mut state,
                &InboxAction::move_stakeholder("s1", insert_before),
            )
            .expect("move");

            let order: Vec<&str> = state.stakeholders.iter().map(|s| s.id.as_str()).collect();
            assert_eq!(order, vec!["s2", "s1"], "insertBefore {insert_before:?}");
        }
    }

    #[test]
    fn create_thread_requires_known_stakeholder() {
        let mut state = InboxState::default();
        let err = reduce(
            &mut state,
            &InboxAction::create_thread("t1", "ghost", "Topic"),
        )
        .expect_err("unknown stakeholder");
        assert_eq!(
            err,
            InboxError::StakeholderNotFound {
                id: "ghost".to_string()
            }
        );
        assert!(state.threads.is_empty());
    }

    #[test]
    fn create_thread_starts_open_and_rejects_duplicate_id() {
        let mut state = state_with_thread();
        assert_eq!(
            state.find_thread("t1").expect("t1").status,
            ThreadStatus::Open
        );

        let err = reduce(
            &mut state,
            &InboxAction::create_thread("t1", "s1", "Again"),
        )
        .expect_err("duplicate");
        assert_eq!(
            err,
            InboxError::DuplicateThread {
                id: "t1".to_string()
            }
        );
    }

    #[test]
    fn add_thread_message_rejects_duplicate_id_within_thread() {
        let mut state = state_with_thread();
        reduce(
            &mut state,
            &InboxAction::add_thread_message("t1", "m1", ThreadParty::Stakeholder, "hello"),
        )
        .expect("add m1");

        let err = reduce(
            &mut state,
            &InboxAction::add_thread_message("t1", "m1", ThreadParty::Agent, "again"),
        )
        .expect_err("duplicate");
        assert_eq!(
            err,
            InboxError::DuplicateMessage {
                thread_id: "t1".to_string(),
                id: "m1".to_string()
            }
        );
        assert_eq!(state.find_thread("t1").expect("t1").messages.len(), 1);
    }

    #[test]
    fn propose_records_which_party_proposed() {
        let mut state = state_with_thread();
        reduce(
            &mut state,
            &InboxAction::propose_thread_resolved("t1", ThreadParty::Agent),
        )
        .expect("propose");
        assert_eq!(
            state.find_thread("t1").expect("t1").status,
            ThreadStatus::ProposedResolvedByAgent
        );

        reduce(
            &mut state,
            &InboxAction::propose_thread_resolved("t1", ThreadParty::Stakeholder),
        )
        .expect("repropose");
        assert_eq!(
            state.find_thread("t1").expect("t1").status,
            ThreadStatus::ProposedResolvedByStakeholder
        );
    }

    /// Confirmation succeeds from either proposed state, whoever confirms.
    #[test]
    fn confirm_accepts_any_confirming_party() {
        for confirmed_by in [ThreadParty::Agent, ThreadParty::Stakeholder] {
            let mut state = state_with_thread();
            reduce(
                &mut state,
                &InboxAction::propose_thread_resolved("t1", ThreadParty::Agent),
            )
            .expect("propose");

            reduce(
                &mut state,
                &InboxAction::confirm_thread_resolved("t1", confirmed_by),
            )
            .expect("confirm");
            assert_eq!(
                state.find_thread("t1").expect("t1").status,
                ThreadStatus::ConfirmedResolved
            );
        }
    }

    /// Confirming an unproposed thread reports the offending status.
    #[test]
    fn confirm_rejects_thread_that_was_not_proposed() {
        let mut state = state_with_thread();
        let err = reduce(
            &mut state,
            &InboxAction::confirm_thread_resolved("t1", ThreadParty::Agent),
        )
        .expect_err("not proposed");
        assert_eq!(
            err,
            InboxError::InvalidStatus {
                id: "t1".to_string(),
                status: ThreadStatus::Open
            }
        );
        assert_eq!(
            state.find_thread("t1").expect("t1").status,
            ThreadStatus::Open
        );
    }

    #[test]
    fn archive_and_reopen_set_status_directly() {
        let mut state = state_with_thread();
        reduce(&mut state, &InboxAction::archive_thread("t1")).expect("archive");
        assert_eq!(
            state.find_thread("t1").expect("t1").status,
            ThreadStatus::Archived
        );

        reduce(&mut state, &InboxAction::reopen_thread("t1")).expect("reopen");
        assert_eq!(
            state.find_thread("t1").expect("t1").status,
            ThreadStatus::Open
        );
    }

    #[test]
    fn thread_operations_reject_unknown_thread() {
        let mut state = InboxState::default();
        let err = reduce(&mut state, &InboxAction::archive_thread("ghost"))
            .expect_err("unknown thread");
        assert_eq!(
            err,
            InboxError::ThreadNotFound {
                id: "ghost".to_string()
            }
        );
    }
}
