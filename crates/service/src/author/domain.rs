use serde::{Deserialize, Serialize};

use crate::patch::present;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    pub name: Option<String>,
    pub version: i32,
    pub todo_item_ids: Vec<i64>,
}

impl Author {
    pub(crate) fn from_model(m: models::author::Model, todo_item_ids: Vec<i64>) -> Self {
        Self { id: m.id, name: m.name, version: m.version, todo_item_ids }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub todo_item_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthor {
    pub version: i32,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default)]
    pub todo_item_ids: Option<Vec<i64>>,
}
