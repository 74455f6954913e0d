use serde::{Deserialize, Serialize};

use crate::patch::present;

/// Workspace as returned to callers, with the ids of its todo items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: i64,
    pub name: Option<String>,
    pub version: i32,
    pub todo_item_ids: Vec<i64>,
}

impl Workspace {
    pub(crate) fn from_model(m: models::workspace::Model, todo_item_ids: Vec<i64>) -> Self {
        Self { id: m.id, name: m.name, version: m.version, todo_item_ids }
    }
}

/// Create input; `id` is honored when given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspace {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub todo_item_ids: Option<Vec<i64>>,
}

/// Update input. Absent fields are left unchanged, `name: null` clears the name and
/// `todoItemIds` replaces the whole collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkspace {
    pub version: i32,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default)]
    pub todo_item_ids: Option<Vec<i64>>,
}
