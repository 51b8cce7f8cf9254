use sync_logging::{sync_debug, sync_info};

use crate::{AppState, ConnectivityStatus, Effect, Msg, NoticeKind, TaskId};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ConnectRequested => {
            if state.connectivity() != ConnectivityStatus::Disconnected {
                return (state, Vec::new());
            }
            let session = state.begin_session();
            sync_info!("connect requested, session {}", session);
            vec![Effect::OpenChannel { session }]
        }
        Msg::DisconnectRequested => {
            if state.connectivity() == ConnectivityStatus::Disconnected {
                return (state, Vec::new());
            }
            state.set_connectivity(ConnectivityStatus::Disconnected);
            sync_info!("disconnect requested, session {}", state.session());
            vec![Effect::CloseChannel {
                session: state.session(),
            }]
        }
        Msg::ChannelOpened { session } => {
            // Only the session we are currently waiting on may come online.
            if session != state.session() || state.connectivity() != ConnectivityStatus::Connecting
            {
                sync_debug!("ignoring open for stale session {}", session);
                return (state, Vec::new());
            }
            state.set_connectivity(ConnectivityStatus::Connected);
            sync_info!("session {} connected, replaying query", session);
            vec![Effect::SendQuery {
                session,
                query: state.query().clone(),
            }]
        }
        Msg::ChannelClosed { session, reason } => {
            if session != state.session()
                || state.connectivity() == ConnectivityStatus::Disconnected
            {
                return (state, Vec::new());
            }
            state.set_connectivity(ConnectivityStatus::Disconnected);
            if let Some(reason) = reason {
                state.push_notice(NoticeKind::Transport, reason);
            }
            Vec::new()
        }
        Msg::SnapshotReceived(snapshot) => {
            state.replace_snapshot(snapshot);
            Vec::new()
        }
        Msg::ServerError { message } => {
            sync_info!("server error: {}", message);
            state.push_notice(NoticeKind::Operational, message);
            Vec::new()
        }
        Msg::RefreshRequested => query_effect(&state),
        Msg::PageChanged(page) => {
            if state.edit_query(|query| query.page = page) {
                query_effect(&state)
            } else {
                Vec::new()
            }
        }
        Msg::PageSizeChanged(size) => {
            if state.edit_query(|query| {
                query.size = size;
                query.page = 1;
            }) {
                query_effect(&state)
            } else {
                Vec::new()
            }
        }
        Msg::SortChanged { by, order } => {
            if state.edit_query(|query| {
                query.sort_by = by;
                query.sort_order = order;
            }) {
                query_effect(&state)
            } else {
                Vec::new()
            }
        }
        Msg::SelectionChanged(ids) => {
            state.replace_selection(ids);
            Vec::new()
        }
        Msg::RowToggled(id) => {
            state.flip_selected(id);
            Vec::new()
        }
        Msg::DeleteSelectedRequested => {
            let ids: Vec<TaskId> = state.selection().iter().copied().collect();
            if ids.is_empty() {
                return (state, Vec::new());
            }
            delete_effect(&mut state, ids)
        }
        Msg::DeleteRequested(id) => delete_effect(&mut state, vec![id]),
        Msg::ToggleTaskRequested(id) => vec![Effect::RequestToggle { id }],
        Msg::LivenessChanged => {
            state.mark_dirty();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn query_effect(state: &AppState) -> Vec<Effect> {
    if !state.is_connected() {
        sync_debug!("list query suppressed while {:?}", state.connectivity());
        return Vec::new();
    }
    vec![Effect::SendQuery {
        session: state.session(),
        query: state.query().clone(),
    }]
}

// Rows stay cached until the next snapshot; a rejected delete must not vanish.
fn delete_effect(state: &mut AppState, ids: Vec<TaskId>) -> Vec<Effect> {
    state.clear_selection_for_delete(&ids);
    if !state.is_connected() {
        sync_debug!("delete of {:?} suppressed while {:?}", ids, state.connectivity());
        return Vec::new();
    }
    vec![Effect::SendDelete {
        session: state.session(),
        ids,
    }]
}
