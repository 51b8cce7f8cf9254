use serde::{Deserialize, Serialize};
use thiserror::Error;
use upload_core::{ListQuery, ListSnapshot, TaskId};

/// Messages the client sends, one JSON text frame each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientFrame {
    #[serde(rename = "upload/list")]
    ListQuery(ListQuery),
    #[serde(rename = "upload/delete")]
    Delete { ids: Vec<TaskId> },
}

/// Messages the server pushes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerFrame {
    #[serde(rename = "list")]
    Snapshot(ListSnapshot),
    #[serde(rename = "exception")]
    Error { message: String },
}

const SERVER_EVENTS: [&str; 2] = ["list", "exception"];

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame has no event name")]
    MissingEvent,
    #[error("unknown event {0:?}")]
    UnknownEvent(String),
}

pub fn encode_frame(frame: &ClientFrame) -> Result<String, FrameError> {
    Ok(serde_json::to_string(frame)?)
}

pub fn decode_frame(text: &str) -> Result<ServerFrame, FrameError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let event = value
        .get("event")
        .and_then(serde_json::Value::as_str)
        .ok_or(FrameError::MissingEvent)?;
    if !SERVER_EVENTS.contains(&event) {
        return Err(FrameError::UnknownEvent(event.to_string()));
    }
    Ok(serde_json::from_value(value)?)
}
