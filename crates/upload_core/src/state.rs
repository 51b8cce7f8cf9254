use std::collections::BTreeSet;

use crate::view_model::{AppViewModel, TaskRowView, ToggleControl};
use crate::{progress, ListQuery, ListSnapshot, LivenessLookup, TaskId};

/// Number allocated per connect request; tags channel lifecycle events.
pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Server-side `exception`; the channel stays up.
    Operational,
    /// The channel failed to open or dropped.
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    connectivity: ConnectivityStatus,
    session: SessionId,
    query: ListQuery,
    snapshot: ListSnapshot,
    selection: BTreeSet<TaskId>,
    notices: Vec<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a configured query instead of the default first page.
    pub fn with_query(query: ListQuery) -> Self {
        Self {
            query: sanitize_query(query),
            ..Self::default()
        }
    }

    pub fn connectivity(&self) -> ConnectivityStatus {
        self.connectivity
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn snapshot(&self) -> &ListSnapshot {
        &self.snapshot
    }

    pub fn selection(&self) -> &BTreeSet<TaskId> {
        &self.selection
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hands queued notices to the front end; each is shown once.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Joins the cached snapshot with live registry state.
    ///
    /// Liveness is looked up on every call so engine-side changes show up
    /// without waiting for the next snapshot.
    pub fn view<L: LivenessLookup + ?Sized>(&self, liveness: &L) -> AppViewModel {
        let rows = self
            .snapshot
            .list
            .iter()
            .map(|task| {
                let local = liveness.liveness(task.id);
                let progress = progress(task, local);
                TaskRowView {
                    task: task.clone(),
                    percent: progress.percent,
                    display_status: progress.status,
                    selected: self.selection.contains(&task.id),
                    toggle: local.map(|l| {
                        if l.is_running() {
                            ToggleControl::Pause
                        } else {
                            ToggleControl::Resume
                        }
                    }),
                }
            })
            .collect();

        let size = u64::from(self.query.size.max(1));
        AppViewModel {
            connectivity: self.connectivity,
            query: self.query.clone(),
            rows,
            total: self.snapshot.total,
            page_count: self.snapshot.total.div_ceil(size),
            selection: self.selection.iter().copied().collect(),
            can_connect: self.connectivity == ConnectivityStatus::Disconnected,
            can_disconnect: self.connectivity == ConnectivityStatus::Connected,
            can_delete_selected: !self.selection.is_empty(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.connectivity == ConnectivityStatus::Connected
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_session(&mut self) -> SessionId {
        self.session += 1;
        self.connectivity = ConnectivityStatus::Connecting;
        self.dirty = true;
        self.session
    }

    pub(crate) fn set_connectivity(&mut self, status: ConnectivityStatus) {
        if self.connectivity != status {
            self.connectivity = status;
            self.dirty = true;
        }
    }

    pub(crate) fn replace_snapshot(&mut self, snapshot: ListSnapshot) {
        self.snapshot = snapshot;
        self.dirty = true;
    }

    pub(crate) fn push_notice(&mut self, kind: NoticeKind, message: String) {
        self.notices.push(Notice { kind, message });
        self.dirty = true;
    }

    /// Returns true when the query actually changed.
    pub(crate) fn edit_query(&mut self, edit: impl FnOnce(&mut ListQuery)) -> bool {
        let mut next = self.query.clone();
        edit(&mut next);
        let next = sanitize_query(next);
        if next == self.query {
            return false;
        }
        self.query = next;
        self.dirty = true;
        true
    }

    pub(crate) fn replace_selection(&mut self, ids: impl IntoIterator<Item = TaskId>) {
        self.selection = ids.into_iter().collect();
        self.dirty = true;
    }

    pub(crate) fn flip_selected(&mut self, id: TaskId) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
        self.dirty = true;
    }

    /// Drops the whole selection when a delete touches any selected id.
    pub(crate) fn clear_selection_for_delete(&mut self, ids: &[TaskId]) {
        if ids.iter().any(|id| self.selection.contains(id)) {
            self.selection.clear();
            self.dirty = true;
        }
    }
}

fn sanitize_query(mut query: ListQuery) -> ListQuery {
    query.page = query.page.max(1);
    query.size = query.size.max(1);
    query
}
