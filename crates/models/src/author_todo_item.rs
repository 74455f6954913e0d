use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{author, todo_item};

/// Join row of the Author <-> TodoItem many-to-many relation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "author_todoitem")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub author_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub todo_item_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Author, TodoItem }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Author => Entity::belongs_to(author::Entity)
                .from(Column::AuthorId)
                .to(author::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::TodoItem => Entity::belongs_to(todo_item::Entity)
                .from(Column::TodoItemId)
                .to(todo_item::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<author::Entity> for Entity {
    fn to() -> RelationDef { Relation::Author.def() }
}

impl Related<todo_item::Entity> for Entity {
    fn to() -> RelationDef { Relation::TodoItem.def() }
}

impl ActiveModelBehavior for ActiveModel {}
