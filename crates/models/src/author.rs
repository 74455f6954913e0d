use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{author_todo_item, errors, todo_item};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "authors")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Option<String>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { AuthorTodoItem }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::AuthorTodoItem => Entity::has_many(author_todo_item::Entity).into(),
        }
    }
}

impl Related<author_todo_item::Entity> for Entity {
    fn to() -> RelationDef { Relation::AuthorTodoItem.def() }
}

impl Related<todo_item::Entity> for Entity {
    fn to() -> RelationDef { author_todo_item::Relation::TodoItem.def() }
    fn via() -> Option<RelationDef> { Some(author_todo_item::Relation::Author.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    errors::validate_label("name", name)
}
