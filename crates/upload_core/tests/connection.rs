use std::sync::Once;

use pretty_assertions::assert_eq;
use upload_core::{
    update, AppState, ConnectivityStatus, Effect, ListQuery, Msg, NoticeKind, SortField,
    SortOrder,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sync_logging::initialize_for_tests);
}

fn connected() -> AppState {
    let (state, _) = update(AppState::new(), Msg::ConnectRequested);
    let session = state.session();
    let (state, _) = update(state, Msg::ChannelOpened { session });
    state
}

#[test]
fn connect_moves_through_connecting_to_connected() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::ConnectRequested);

    assert_eq!(state.connectivity(), ConnectivityStatus::Connecting);
    assert_eq!(effects, vec![Effect::OpenChannel { session: 1 }]);
    assert!(state.consume_dirty());

    let (state, effects) = update(state, Msg::ChannelOpened { session: 1 });
    assert_eq!(state.connectivity(), ConnectivityStatus::Connected);
    assert_eq!(
        effects,
        vec![Effect::SendQuery {
            session: 1,
            query: ListQuery::default(),
        }]
    );
}

#[test]
fn connect_while_connecting_or_connected_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ConnectRequested);
    let (state, effects) = update(state, Msg::ConnectRequested);
    assert!(effects.is_empty());
    assert_eq!(state.session(), 1);

    let (state, _) = update(state, Msg::ChannelOpened { session: 1 });
    let (state, effects) = update(state, Msg::ConnectRequested);
    assert!(effects.is_empty());
    assert_eq!(state.connectivity(), ConnectivityStatus::Connected);
}

#[test]
fn reconnect_replays_last_query_exactly_once() {
    init_logging();
    let state = connected();
    let (state, _) = update(
        state,
        Msg::SortChanged {
            by: SortField::Name,
            order: SortOrder::Asc,
        },
    );
    let (state, _) = update(state, Msg::PageChanged(3));
    let expected = state.query().clone();

    let (state, _) = update(
        state,
        Msg::ChannelClosed {
            session: 1,
            reason: Some("connection reset".to_string()),
        },
    );
    assert_eq!(state.connectivity(), ConnectivityStatus::Disconnected);

    let (state, effects) = update(state, Msg::ConnectRequested);
    assert_eq!(effects, vec![Effect::OpenChannel { session: 2 }]);

    let (state, effects) = update(state, Msg::ChannelOpened { session: 2 });
    assert_eq!(
        effects,
        vec![Effect::SendQuery {
            session: 2,
            query: expected,
        }]
    );

    // A duplicate open notification must not replay again.
    let (_state, effects) = update(state, Msg::ChannelOpened { session: 2 });
    assert!(effects.is_empty());
}

#[test]
fn disconnect_from_any_state_goes_offline() {
    init_logging();
    let (connecting, _) = update(AppState::new(), Msg::ConnectRequested);
    let (state, effects) = update(connecting, Msg::DisconnectRequested);
    assert_eq!(state.connectivity(), ConnectivityStatus::Disconnected);
    assert_eq!(effects, vec![Effect::CloseChannel { session: 1 }]);

    let (state, effects) = update(connected(), Msg::DisconnectRequested);
    assert_eq!(state.connectivity(), ConnectivityStatus::Disconnected);
    assert_eq!(effects, vec![Effect::CloseChannel { session: 1 }]);

    let (state, effects) = update(state, Msg::DisconnectRequested);
    assert_eq!(state.connectivity(), ConnectivityStatus::Disconnected);
    assert!(effects.is_empty());
}

#[test]
fn transport_drop_goes_offline_and_reports() {
    init_logging();
    let (mut state, effects) = update(
        connected(),
        Msg::ChannelClosed {
            session: 1,
            reason: Some("connection reset".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.connectivity(), ConnectivityStatus::Disconnected);
    let notices = state.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Transport);
    assert_eq!(notices[0].message, "connection reset");
    assert!(state.drain_notices().is_empty());
}

#[test]
fn close_after_user_disconnect_is_silent() {
    init_logging();
    let (state, _) = update(connected(), Msg::DisconnectRequested);
    let (state, effects) = update(
        state,
        Msg::ChannelClosed {
            session: 1,
            reason: None,
        },
    );

    assert!(effects.is_empty());
    assert!(state.notices().is_empty());
}

#[test]
fn stale_session_events_are_ignored() {
    init_logging();
    let (state, _) = update(connected(), Msg::DisconnectRequested);
    let (state, _) = update(state, Msg::ConnectRequested);
    assert_eq!(state.session(), 2);

    // The old connection finishes closing after the new one was requested.
    let (state, effects) = update(
        state,
        Msg::ChannelClosed {
            session: 1,
            reason: Some("late".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.connectivity(), ConnectivityStatus::Connecting);

    let (state, effects) = update(state, Msg::ChannelOpened { session: 1 });
    assert!(effects.is_empty());
    assert_eq!(state.connectivity(), ConnectivityStatus::Connecting);

    let (state, _) = update(state, Msg::ChannelOpened { session: 2 });
    assert_eq!(state.connectivity(), ConnectivityStatus::Connected);
}

#[test]
fn open_after_user_cancelled_connect_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ConnectRequested);
    let (state, _) = update(state, Msg::DisconnectRequested);
    let (state, effects) = update(state, Msg::ChannelOpened { session: 1 });

    assert!(effects.is_empty());
    assert_eq!(state.connectivity(), ConnectivityStatus::Disconnected);
}

#[test]
fn sends_are_suppressed_while_offline() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::RefreshRequested);
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::DeleteRequested(3));
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::ConnectRequested);
    let (state, effects) = update(state, Msg::RefreshRequested);
    assert!(effects.is_empty(), "still connecting");

    let (_state, effects) = update(state, Msg::PageChanged(2));
    assert!(effects.is_empty());
}

#[test]
fn server_error_keeps_connection_and_snapshot() {
    init_logging();
    let state = connected();
    let before_snapshot = state.snapshot().clone();

    let (mut state, effects) = update(
        state,
        Msg::ServerError {
            message: "task not found".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.connectivity(), ConnectivityStatus::Connected);
    assert_eq!(state.snapshot(), &before_snapshot);
    let notices = state.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Operational);
    assert_eq!(notices[0].message, "task not found");
}

#[test]
fn configured_query_is_sanitized() {
    let state = AppState::with_query(ListQuery {
        page: 0,
        size: 0,
        ..ListQuery::default()
    });
    assert_eq!(state.query().page, 1);
    assert_eq!(state.query().size, 1);
}
