//! Optimistic remote-sync core for a todo list backed by a hosted record API.
//!
//! # Overview
//! Two components compose the core. `RemoteTodoStore` translates list,
//! create, and update intents into `HttpRequest` values and normalizes
//! `HttpResponse` values back into the domain shape, without touching the
//! network (host-does-IO pattern). `reduce` over `TodoState` tracks the
//! request-lifecycle flags and applies completion/edit mutations
//! optimistically, rolling back to a captured snapshot when the paired
//! remote call fails.
//!
//! # Design
//! - `RemoteTodoStore` is stateless — it holds only the collection URL and
//!   the bearer token.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `TodoState` moves by value through the pure `reduce` function; the
//!   optimistic apply methods return the pre-mutation snapshot the caller
//!   threads into `Revert` on failure.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod error;
pub mod http;
pub mod query;
pub mod state;
pub mod store;
pub mod types;

pub use error::SyncError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{SortDirection, SortField, TodoQuery};
pub use state::{reduce, Action, TodoState};
pub use store::RemoteTodoStore;
pub use types::Todo;
