//! Terminal client for the todo list store.
//!
//! # Overview
//! Drives a `todolist_core::TodoSession` on tokio: `Controller` executes the
//! session's effects (HTTP requests through a `Transport`, banner timers via
//! `tokio::time`) and feeds completions back. `repl` wires the controller
//! to a line-oriented terminal UI rendered by `view`.

pub mod command;
pub mod controller;
pub mod error;
pub mod repl;
pub mod transport;
pub mod view;

pub use controller::Controller;
pub use error::CliError;
pub use transport::{HttpTransport, Transport};
