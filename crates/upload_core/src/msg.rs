#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked to (re)connect.
    ConnectRequested,
    /// User asked to drop the connection.
    DisconnectRequested,
    /// Transport finished the handshake for a session.
    ChannelOpened { session: crate::SessionId },
    /// Transport lost or closed a session. `reason` is set for failures.
    ChannelClosed {
        session: crate::SessionId,
        reason: Option<String>,
    },
    /// Server pushed a full list snapshot.
    SnapshotReceived(crate::ListSnapshot),
    /// Server reported a non-fatal operational error.
    ServerError { message: String },
    /// User clicked Refresh.
    RefreshRequested,
    /// User moved to another page.
    PageChanged(u32),
    /// User picked another page size.
    PageSizeChanged(u32),
    /// User changed the sort column or direction.
    SortChanged {
        by: crate::SortField,
        order: crate::SortOrder,
    },
    /// Table check boxes changed; replaces the whole selection.
    SelectionChanged(Vec<crate::TaskId>),
    /// One check box flipped.
    RowToggled(crate::TaskId),
    /// User clicked the batch delete button.
    DeleteSelectedRequested,
    /// User clicked the delete button on one row.
    DeleteRequested(crate::TaskId),
    /// User clicked pause/resume on one row.
    ToggleTaskRequested(crate::TaskId),
    /// The local task registry changed; rows need re-rendering.
    LivenessChanged,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
