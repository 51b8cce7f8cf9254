use serde::{Deserialize, Deserializer, Serialize};

pub type TaskId = u64;

/// Lifecycle status persisted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Success,
    Error,
    Processing,
}

/// Server-authoritative upload record, as cached from the latest snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTask {
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub hash: String,
    /// Correlation token assigned by the client that started the upload.
    #[serde(default)]
    pub uuid: String,
    pub size: u64,
    #[serde(rename = "receive", deserialize_with = "byte_count")]
    pub received: u64,
    pub status: TaskStatus,
    /// Epoch milliseconds.
    pub updated_at: i64,
    /// Epoch milliseconds.
    pub created_at: i64,
}

// Older servers report the received byte count as a decimal string.
fn byte_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Size,
    UpdatedAt,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Paging and sort parameters. Owned by the client and replayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub sort_order: SortOrder,
    pub sort_by: SortField,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            sort_order: SortOrder::Desc,
            sort_by: SortField::UpdatedAt,
        }
    }
}

/// One full page of tasks. Replaces the previous view entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListSnapshot {
    pub list: Vec<UploadTask>,
    pub total: u64,
}
