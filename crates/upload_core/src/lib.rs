//! Upload monitor core: pure synchronization state machine and view-model helpers.
//!
//! Server snapshots and local transfer liveness are kept as two separate
//! tables and only joined when [`AppState::view`] renders rows.
mod effect;
mod model;
mod msg;
mod progress;
mod registry;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{ListQuery, ListSnapshot, SortField, SortOrder, TaskId, TaskStatus, UploadTask};
pub use msg::Msg;
pub use progress::{display_status, percent, progress, DisplayStatus, Progress};
pub use registry::{Liveness, LivenessLookup, TaskRegistry, TransferControl};
pub use state::{AppState, ConnectivityStatus, Notice, NoticeKind, SessionId};
pub use update::update;
pub use view_model::{AppViewModel, TaskRowView, ToggleControl};
