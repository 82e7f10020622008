//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the caller (host) is responsible for executing
//! the actual I/O. This keeps the store deterministic: every failure mode can
//! be exercised in tests by fabricating a response, including the 5xx paths
//! that drive the optimistic revert flow.
//!
//! All fields use owned types (`String`, `Vec`) so requests can be queued or
//! moved across tasks without lifetime concerns.

/// HTTP method for a request.
///
/// The record API family uses exactly these three: GET for listing, POST for
/// creating, PATCH for updating in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

/// An HTTP request described as plain data.
///
/// Built by `RemoteTodoStore::build_*` methods. The caller is responsible for
/// executing this request against the network and returning the corresponding
/// `HttpResponse`. Every header must be forwarded as-is: the bearer credential
/// travels in `headers`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `RemoteTodoStore::parse_*` methods for status classification and
/// deserialization. Transport-level failures never become a response; the
/// caller reports those as [`SyncError::Network`](crate::SyncError::Network).
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
