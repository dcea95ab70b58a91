//! Client-side view state.
//!
//! `ClientState` is only mutated by `TodoSession::dispatch`; everything here
//! is read-only from the outside.

use crate::types::{TodoId, TodoItem};

/// Where the displayed list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    /// A list request is in flight and nothing newer has been applied.
    Loading,
    Loaded,
    /// The last list request failed; `items` is empty.
    Failed,
}

/// Edit-in-place target. At most one row is editable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing { id: TodoId, text: String },
}

impl EditState {
    pub fn target(&self) -> Option<&TodoId> {
        match self {
            EditState::Viewing => None,
            EditState::Editing { id, .. } => Some(id),
        }
    }
}

/// In-flight markers, one per action type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Activity {
    pub fetching: bool,
    pub creating: bool,
    pub updating: bool,
    pub deleting: Option<TodoId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BannerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient notification. A newer banner always replaces an older one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: BannerId,
    pub kind: BannerKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ClientState {
    pub(crate) items: Vec<TodoItem>,
    pub(crate) list_status: ListStatus,
    pub(crate) draft: String,
    pub(crate) editing: EditState,
    pub(crate) activity: Activity,
    pub(crate) banner: Option<Banner>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            list_status: ListStatus::Loading,
            draft: String::new(),
            editing: EditState::Viewing,
            activity: Activity::default(),
            banner: None,
        }
    }
}

impl ClientState {
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn list_status(&self) -> ListStatus {
        self.list_status
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn editing(&self) -> &EditState {
        &self.editing
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub(crate) fn clear_error_banner(&mut self) {
        if matches!(&self.banner, Some(b) if b.kind == BannerKind::Error) {
            self.banner = None;
        }
    }
}
