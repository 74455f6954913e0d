use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, todo_item};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workspaces")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Option<String>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { TodoItem }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::TodoItem => Entity::has_many(todo_item::Entity).into(),
        }
    }
}

impl Related<todo_item::Entity> for Entity {
    fn to() -> RelationDef { Relation::TodoItem.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    errors::validate_label("name", name)
}
