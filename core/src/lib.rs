//! Sans-IO client core for the todo list store.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the client-side
//! view state in a reducer (`TodoSession`) that turns user actions and
//! request completions into new state plus a list of effects for the host
//! to run.
//!
//! # Design
//! - `TodoApi` is stateless: it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoSession::dispatch` is the single mutation entry point. Timers and
//!   requests are effects, so the host owns the clock and the sockets.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod state;
pub mod types;

pub use client::TodoApi;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use session::{Action, Confirmation, Effect, RequestId, SessionConfig, TodoSession};
pub use state::{Activity, Banner, BannerId, BannerKind, ClientState, EditState, ListStatus};
pub use types::{TodoId, TodoItem, TodoPayload};
