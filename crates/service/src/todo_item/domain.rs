use serde::{Deserialize, Serialize};

use crate::patch::present;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: i64,
    pub title: Option<String>,
    pub is_complete: bool,
    pub workspace_id: Option<i64>,
    pub version: i32,
    pub author_ids: Vec<i64>,
}

impl TodoItem {
    pub(crate) fn from_model(m: models::todo_item::Model, author_ids: Vec<i64>) -> Self {
        Self {
            id: m.id,
            title: m.title,
            is_complete: m.is_complete,
            workspace_id: m.workspace_id,
            version: m.version,
            author_ids,
        }
    }
}

/// Create input. A `workspaceId` that does not resolve is stored as no workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_complete: Option<bool>,
    #[serde(default)]
    pub workspace_id: Option<i64>,
    #[serde(default)]
    pub author_ids: Option<Vec<i64>>,
}

/// Update input. An absent key leaves the field alone; `null` clears `title` and
/// detaches the item from its workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoItem {
    pub version: i32,
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default)]
    pub is_complete: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub workspace_id: Option<Option<i64>>,
    #[serde(default)]
    pub author_ids: Option<Vec<i64>>,
}
