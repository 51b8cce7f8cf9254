use crate::{ConnectivityStatus, DisplayStatus, ListQuery, TaskId, UploadTask};

/// Which pause/resume control a row offers, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleControl {
    Pause,
    Resume,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub connectivity: ConnectivityStatus,
    pub query: ListQuery,
    pub rows: Vec<TaskRowView>,
    pub total: u64,
    pub page_count: u64,
    pub selection: Vec<TaskId>,
    pub can_connect: bool,
    pub can_disconnect: bool,
    pub can_delete_selected: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowView {
    pub task: UploadTask,
    pub percent: u8,
    pub display_status: DisplayStatus,
    pub selected: bool,
    /// `None` when the local engine does not hold the task.
    pub toggle: Option<ToggleControl>,
}
