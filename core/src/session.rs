//! Reducer that keeps `ClientState` in sync with the remote store.
//!
//! # Design
//! `TodoSession::dispatch` takes one `Action` (a user intent, a request
//! completion, or an expired banner timer), mutates the state, and returns
//! the `Effect`s the host must run: HTTP requests to execute and timers to
//! arm. The session never performs I/O and never reads a clock.
//!
//! Every request gets a fresh `RequestId`. Only the newest list request may
//! apply its result, so a slow list response can never overwrite a newer
//! one. Mutation completions always apply.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::client::TodoApi;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, TransportError};
use crate::state::{Banner, BannerId, BannerKind, ClientState, EditState, ListStatus};
use crate::types::TodoId;

const EMPTY_CREATE: &str = "Please enter a todo";
const EMPTY_UPDATE: &str = "Todo cannot be empty";
const CREATED: &str = "Todo has been Posted";
const UPDATED: &str = "Todo has been updated";
const DELETED: &str = "Todo has been deleted";
const FETCH_FAILED: &str = "Failed to fetch todos.";
const CREATE_FAILED: &str = "Failed to add todo. Server may be down.";
const UPDATE_FAILED: &str = "Failed to update todo.";
const DELETE_FAILED: &str = "Failed to delete todo.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Answer to the "Are you sure you want to delete this todo?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Initial load when the view appears.
    Mount,
    /// Manual re-fetch (the Retry / Try Again affordance).
    Refresh,
    SetDraft(String),
    Create,
    BeginEdit { id: TodoId, text: String },
    SetEditText(String),
    CancelEdit,
    Update,
    Delete { id: TodoId, confirmation: Confirmation },
    RequestCompleted {
        request: RequestId,
        outcome: Result<HttpResponse, TransportError>,
    },
    BannerExpired(BannerId),
}

/// Work the host must perform on behalf of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Execute `http` and report back with `Action::RequestCompleted`.
    Send { request: RequestId, http: HttpRequest },
    /// Dispatch `Action::BannerExpired(banner)` after `delay`.
    ClearBannerAfter { banner: BannerId, delay: Duration },
}

/// Store address and banner timings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub base_url: String,
    pub success_banner: Duration,
    pub validation_banner: Duration,
    pub error_banner: Duration,
}

impl SessionConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            success_banner: Duration::from_secs(3),
            validation_banner: Duration::from_secs(3),
            error_banner: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
enum Pending {
    List,
    Create,
    Update(TodoId),
    Delete(TodoId),
}

#[derive(Debug)]
pub struct TodoSession {
    api: TodoApi,
    config: SessionConfig,
    state: ClientState,
    pending: HashMap<RequestId, Pending>,
    latest_list: Option<RequestId>,
    next_request: u64,
    next_banner: u64,
}

impl TodoSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            api: TodoApi::new(&config.base_url),
            config,
            state: ClientState::default(),
            pending: HashMap::new(),
            latest_list: None,
            next_request: 0,
            next_banner: 0,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Number of requests issued whose completion has not been dispatched.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Forget every outstanding request. Later completions for them are
    /// ignored as unknown.
    pub fn abandon_requests(&mut self) {
        if !self.pending.is_empty() {
            debug!(count = self.pending.len(), "outstanding requests abandoned");
        }
        self.pending.clear();
        self.latest_list = None;
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Mount | Action::Refresh => self.list(),
            Action::SetDraft(text) => {
                self.state.draft = text;
                Vec::new()
            }
            Action::Create => self.create(),
            Action::BeginEdit { id, text } => {
                if let Some(previous) = self.state.editing.target() {
                    debug!(%previous, %id, "switching edit target, unsaved text dropped");
                }
                self.state.editing = EditState::Editing { id, text };
                Vec::new()
            }
            Action::SetEditText(new_text) => {
                match &mut self.state.editing {
                    EditState::Editing { text, .. } => *text = new_text,
                    EditState::Viewing => debug!("edit text ignored: no row in edit mode"),
                }
                Vec::new()
            }
            Action::CancelEdit => {
                self.state.editing = EditState::Viewing;
                Vec::new()
            }
            Action::Update => self.update(),
            Action::Delete { id, confirmation } => match confirmation {
                Confirmation::Confirmed => self.delete(id),
                Confirmation::Declined => {
                    debug!(%id, "delete declined");
                    Vec::new()
                }
            },
            Action::RequestCompleted { request, outcome } => self.complete(request, outcome),
            Action::BannerExpired(id) => {
                if self.state.banner.as_ref().is_some_and(|b| b.id == id) {
                    self.state.banner = None;
                }
                Vec::new()
            }
        }
    }

    fn list(&mut self) -> Vec<Effect> {
        self.state.clear_error_banner();
        self.state.activity.fetching = true;
        self.state.list_status = ListStatus::Loading;
        let http = self.api.build_list_todos();
        let (request, effect) = self.issue(Pending::List, http);
        if let Some(superseded) = self.latest_list.replace(request) {
            debug!(superseded = superseded.0, request = request.0, "list request superseded");
        }
        vec![effect]
    }

    fn create(&mut self) -> Vec<Effect> {
        if self.state.activity.creating {
            debug!("create ignored: already in flight");
            return Vec::new();
        }
        let text = self.state.draft.trim().to_string();
        if text.is_empty() {
            return self.show(BannerKind::Error, EMPTY_CREATE.to_string(), Some(self.config.validation_banner));
        }
        let http = match self.api.build_create_todo(&text) {
            Ok(http) => http,
            Err(err) => return self.fail(&err, CREATE_FAILED),
        };
        self.state.clear_error_banner();
        self.state.activity.creating = true;
        let (_, effect) = self.issue(Pending::Create, http);
        vec![effect]
    }

    fn update(&mut self) -> Vec<Effect> {
        if self.state.activity.updating {
            debug!("update ignored: already in flight");
            return Vec::new();
        }
        let (id, text) = match &self.state.editing {
            EditState::Viewing => {
                debug!("update ignored: no row in edit mode");
                return Vec::new();
            }
            EditState::Editing { id, text } => (id.clone(), text.trim().to_string()),
        };
        if text.is_empty() {
            return self.show(BannerKind::Error, EMPTY_UPDATE.to_string(), Some(self.config.validation_banner));
        }
        let http = match self.api.build_update_todo(&id, &text) {
            Ok(http) => http,
            Err(err) => return self.fail(&err, UPDATE_FAILED),
        };
        self.state.clear_error_banner();
        self.state.activity.updating = true;
        let (_, effect) = self.issue(Pending::Update(id), http);
        vec![effect]
    }

    /// Confirmed deletes always go out; the deleting marker follows the
    /// newest one.
    fn delete(&mut self, id: TodoId) -> Vec<Effect> {
        if let Some(previous) = &self.state.activity.deleting {
            debug!(%previous, %id, "delete issued while another is in flight");
        }
        let http = self.api.build_delete_todo(&id);
        self.state.clear_error_banner();
        self.state.activity.deleting = Some(id.clone());
        let (_, effect) = self.issue(Pending::Delete(id), http);
        vec![effect]
    }

    fn complete(&mut self, request: RequestId, outcome: Result<HttpResponse, TransportError>) -> Vec<Effect> {
        let Some(pending) = self.pending.remove(&request) else {
            warn!(request = request.0, "completion for unknown request ignored");
            return Vec::new();
        };
        let response = outcome.map_err(ApiError::from);

        match pending {
            Pending::List => {
                if self.latest_list != Some(request) {
                    debug!(request = request.0, "stale list response discarded");
                    return Vec::new();
                }
                self.latest_list = None;
                self.state.activity.fetching = false;
                match response.and_then(|r| self.api.parse_list_todos(r)) {
                    Ok(items) => {
                        debug!(count = items.len(), "list applied");
                        self.state.items = items;
                        self.state.list_status = ListStatus::Loaded;
                        Vec::new()
                    }
                    Err(err) => {
                        warn!(error = %err, "list request failed");
                        self.state.items.clear();
                        self.state.list_status = ListStatus::Failed;
                        let message = self.list_failure_message(&err);
                        self.show(BannerKind::Error, message, None)
                    }
                }
            }
            Pending::Create => {
                self.state.activity.creating = false;
                match response.and_then(|r| self.api.parse_create_todo(r)) {
                    Ok(()) => {
                        self.state.draft.clear();
                        self.succeed(CREATED)
                    }
                    Err(err) => self.fail(&err, CREATE_FAILED),
                }
            }
            Pending::Update(id) => {
                self.state.activity.updating = false;
                match response.and_then(|r| self.api.parse_update_todo(r)) {
                    Ok(()) => {
                        if self.state.editing.target() == Some(&id) {
                            self.state.editing = EditState::Viewing;
                        }
                        self.succeed(UPDATED)
                    }
                    Err(err) => self.fail(&err, UPDATE_FAILED),
                }
            }
            Pending::Delete(id) => {
                if self.state.activity.deleting.as_ref() == Some(&id) {
                    self.state.activity.deleting = None;
                }
                match response.and_then(|r| self.api.parse_delete_todo(r)) {
                    Ok(()) => self.succeed(DELETED),
                    Err(err) => self.fail(&err, DELETE_FAILED),
                }
            }
        }
    }

    fn issue(&mut self, pending: Pending, http: HttpRequest) -> (RequestId, Effect) {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        debug!(request = request.0, method = http.method.as_str(), url = %http.url, "request issued");
        self.pending.insert(request, pending);
        (request, Effect::Send { request, http })
    }

    /// Success banner followed by exactly one resynchronizing list request.
    fn succeed(&mut self, message: &str) -> Vec<Effect> {
        let mut effects = self.show(BannerKind::Success, message.to_string(), Some(self.config.success_banner));
        effects.extend(self.list());
        effects
    }

    fn fail(&mut self, err: &ApiError, fallback: &str) -> Vec<Effect> {
        warn!(error = %err, "request failed");
        let message = err.server_message().unwrap_or(fallback).to_string();
        self.show(BannerKind::Error, message, Some(self.config.error_banner))
    }

    fn list_failure_message(&self, err: &ApiError) -> String {
        if err.is_transport() {
            return format!(
                "Server is not running. Start your backend server at {}.",
                self.api.base_url()
            );
        }
        err.server_message().unwrap_or(FETCH_FAILED).to_string()
    }

    /// Replace the banner. `None` keeps it until the next request starts.
    fn show(&mut self, kind: BannerKind, message: String, clear_after: Option<Duration>) -> Vec<Effect> {
        self.next_banner += 1;
        let id = BannerId(self.next_banner);
        self.state.banner = Some(Banner { id, kind, message });
        clear_after
            .map(|delay| Effect::ClearBannerAfter { banner: id, delay })
            .into_iter()
            .collect()
    }
}
