use crate::{ListQuery, SessionId, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenChannel { session: SessionId },
    CloseChannel { session: SessionId },
    SendQuery { session: SessionId, query: ListQuery },
    SendDelete { session: SessionId, ids: Vec<TaskId> },
    RequestToggle { id: TaskId },
}
