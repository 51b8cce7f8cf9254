use thiserror::Error;
use upload_core::SessionId;

use crate::ServerFrame;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Opened {
        session: SessionId,
    },
    /// `reason` is `None` only when the client asked for the close.
    Closed {
        session: SessionId,
        reason: Option<String>,
    },
    Received {
        session: SessionId,
        frame: ServerFrame,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("connect failed: {0}")]
    Connect(String),
    #[error("connect timed out after {0:?}")]
    ConnectTimeout(std::time::Duration),
    #[error("websocket error: {0}")]
    WebSocket(String),
    #[error("server closed the connection")]
    ClosedByServer,
}
