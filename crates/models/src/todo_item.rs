use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{author, author_todo_item, errors, workspace};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo_items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: Option<String>,
    pub is_complete: bool,
    pub workspace_id: Option<i64>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Workspace, AuthorTodoItem }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Workspace => Entity::belongs_to(workspace::Entity)
                .from(Column::WorkspaceId)
                .to(workspace::Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
            Relation::AuthorTodoItem => Entity::has_many(author_todo_item::Entity).into(),
        }
    }
}

impl Related<workspace::Entity> for Entity {
    fn to() -> RelationDef { Relation::Workspace.def() }
}

impl Related<author_todo_item::Entity> for Entity {
    fn to() -> RelationDef { Relation::AuthorTodoItem.def() }
}

impl Related<author::Entity> for Entity {
    fn to() -> RelationDef { author_todo_item::Relation::Author.def() }
    fn via() -> Option<RelationDef> { Some(author_todo_item::Relation::TodoItem.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    errors::validate_label("title", title)
}
