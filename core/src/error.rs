//! Error types for the todo sync core.
//!
//! # Design
//! One enum covers every way a sync operation can fail: the server said no
//! (`Remote`), the request never got an answer (`Network`), the input was
//! rejected before a request existed (`EmptyTitle`), or a JSON body could not
//! be encoded/decoded. The state machine only ever stores the `Display`
//! rendering of these, so `Remote` always includes the status code in its
//! message; callers who need to branch must do so before dispatching.

use std::fmt;

/// Errors surfaced by `RemoteTodoStore` and accepted by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The server returned a non-2xx status. `message` carries the server's
    /// reported message when the body parses as the API's error envelope,
    /// otherwise the raw body or a stock phrase.
    Remote { status: u16, message: String },

    /// The request never produced a response (DNS, connect, timeout).
    /// Constructed by the host executor, not by the store.
    Network(String),

    /// A create was attempted with an empty title. Nothing was built or sent.
    EmptyTitle,

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// The response body could not be deserialized into the expected shape.
    Deserialization(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Remote { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            SyncError::Network(msg) => write!(f, "network error: {msg}"),
            SyncError::EmptyTitle => write!(f, "todo title must not be empty"),
            SyncError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            SyncError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for SyncError {}
