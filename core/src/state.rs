//! Pure state transitions for the optimistic todo workflow.
//!
//! # Design
//! `TodoState` is a value. [`reduce`] consumes a state and an [`Action`] and
//! returns the next state, never touching the network; callers own a single
//! mutable binding and serialize dispatches through it. The choreography for
//! each intent is:
//!
//! - fetch: `BeginFetch`, then `LoadTodos` or `SetError`, then `EndRequest`
//! - add: `BeginSave`, then `CommitCreate` or `SetError`, then `EndRequest`
//! - complete/edit: `BeginUpdate`, then [`TodoState::apply_complete`] or
//!   [`TodoState::apply_edit`], then `ClearError` on success or `Revert` on
//!   failure, then `EndRequest`
//!
//! The apply methods return the pre-mutation snapshot alongside the new
//! state. The caller threads that snapshot into `Revert` when the paired
//! network call fails, and must skip the call entirely when the snapshot is
//! `None` (unknown id, state unchanged).
//!
//! # Known hazards
//! The three in-flight flags are global, not per-operation: overlapping
//! requests share them, and whichever settles first clears flags the other
//! still needs. A slow list response landing after a newer optimistic edit
//! overwrites that edit (last fetch wins). Callers that need stronger
//! guarantees must serialize whole intents, not just dispatches.

use crate::error::SyncError;
use crate::types::Todo;

/// The whole client-side sync state: the list plus request-lifecycle flags.
///
/// `todo_list` order is whatever the last `LoadTodos` delivered (server
/// order), with `CommitCreate` appending at the end regardless of the active
/// sort; a re-fetch reconciles. `error_message` holds the `Display` rendering
/// of the last failure until cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    pub todo_list: Vec<Todo>,
    pub is_loading: bool,
    pub is_saving: bool,
    pub is_updating: bool,
    pub error_message: Option<String>,
}

/// State transitions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A list request is starting.
    BeginFetch,
    /// A list request succeeded; replaces the whole list (no merge).
    LoadTodos(Vec<Todo>),
    /// Any request failed; records the message and settles all flags.
    SetError(SyncError),
    /// A create request is starting.
    BeginSave,
    /// A create request succeeded; appends the server-assigned todo.
    CommitCreate(Todo),
    /// A complete/edit request is starting.
    BeginUpdate,
    /// Flips `is_completed` on the matching todo before the network confirms.
    ApplyComplete(String),
    /// Replaces the matching todo before the network confirms.
    ApplyEdit(Todo),
    /// The paired optimistic request failed; restores the snapshot and
    /// records the message.
    Revert { original: Todo, error: SyncError },
    /// User dismissal of the error message.
    ClearError,
    /// Generic settle: clears every in-flight flag.
    EndRequest,
}

/// Applies one action to the state and returns the next state.
pub fn reduce(mut state: TodoState, action: Action) -> TodoState {
    match action {
        Action::BeginFetch => {
            state.is_loading = true;
        }
        Action::LoadTodos(todos) => {
            state.todo_list = todos;
            state.is_loading = false;
        }
        Action::SetError(error) => {
            state.error_message = Some(error.to_string());
            state.is_loading = false;
            state.is_saving = false;
            state.is_updating = false;
        }
        Action::BeginSave => {
            state.is_saving = true;
        }
        Action::CommitCreate(todo) => {
            state.todo_list.push(todo);
            state.is_saving = false;
        }
        Action::BeginUpdate => {
            state.is_updating = true;
        }
        Action::ApplyComplete(id) => {
            for todo in &mut state.todo_list {
                if todo.id == id {
                    todo.is_completed = !todo.is_completed;
                }
            }
        }
        Action::ApplyEdit(edited) => {
            for todo in &mut state.todo_list {
                if todo.id == edited.id {
                    *todo = edited.clone();
                }
            }
        }
        Action::Revert { original, error } => {
            for todo in &mut state.todo_list {
                if todo.id == original.id {
                    *todo = original.clone();
                }
            }
            state.error_message = Some(error.to_string());
        }
        Action::ClearError => {
            state.error_message = None;
        }
        Action::EndRequest => {
            state.is_loading = false;
            state.is_saving = false;
            state.is_updating = false;
        }
    }
    state
}

impl TodoState {
    /// Looks up a todo by id.
    pub fn find_todo(&self, id: &str) -> Option<&Todo> {
        self.todo_list.iter().find(|todo| todo.id == id)
    }

    /// Optimistically flips completion for `id`, returning the new state and
    /// the pre-mutation snapshot to thread into `Revert` on failure.
    ///
    /// `None` means the id is unknown: the state comes back unchanged and the
    /// caller must not issue the paired update request.
    pub fn apply_complete(self, id: &str) -> (TodoState, Option<Todo>) {
        let original = match self.find_todo(id) {
            Some(todo) => todo.clone(),
            None => return (self, None),
        };
        let next = reduce(self, Action::ApplyComplete(id.to_string()));
        (next, Some(original))
    }

    /// Optimistically replaces the todo matching `edited.id`, returning the
    /// new state and the pre-mutation snapshot. Same `None` contract as
    /// [`TodoState::apply_complete`].
    pub fn apply_edit(self, edited: Todo) -> (TodoState, Option<Todo>) {
        let original = match self.find_todo(&edited.id) {
            Some(todo) => todo.clone(),
            None => return (self, None),
        };
        let next = reduce(self, Action::ApplyEdit(edited));
        (next, Some(original))
    }
}
