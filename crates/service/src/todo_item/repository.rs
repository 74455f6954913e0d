use sea_orm::sea_query::{Expr, SelectStatement};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, QueryFilter, QuerySelect,
    QueryTrait, Statement, TransactionTrait,
};
use tracing::info;

use models::{author, author_todo_item, todo_item, workspace};

use super::domain::{CreateTodoItem, TodoItem, UpdateTodoItem};
use crate::author::domain::Author;
use crate::author::repository::insert_edges;
use crate::errors::ServiceError;
use crate::query::{Field, FieldKind, FindMany, Filterable, Where};
use crate::relation::{self, Relation};
use crate::repository::{self, Record};

impl Filterable for todo_item::Entity {
    fn key() -> todo_item::Column { todo_item::Column::Id }

    fn field(name: &str) -> Option<Field<todo_item::Column>> {
        match name {
            "id" => Some(Field::new(todo_item::Column::Id, FieldKind::Integer)),
            "title" => Some(Field::new(todo_item::Column::Title, FieldKind::Text)),
            "isComplete" => Some(Field::new(todo_item::Column::IsComplete, FieldKind::Boolean)),
            "workspaceId" => Some(Field::new(todo_item::Column::WorkspaceId, FieldKind::Integer)),
            _ => None,
        }
    }

    fn relation_scope(relation: &str, filter: Option<&Where>) -> Result<Option<SelectStatement>, ServiceError> {
        match relation {
            "authors" => relation::scope::<TodoItemAuthors>(filter).map(Some),
            _ => Ok(None),
        }
    }
}

impl Record for todo_item::Entity {
    const NAME: &'static str = "todoItem";

    fn version() -> todo_item::Column { todo_item::Column::Version }
}

/// TodoItem -> Author through `author_todoitem`.
pub struct TodoItemAuthors;

impl Relation for TodoItemAuthors {
    type Owner = todo_item::Entity;
    type Related = author::Entity;

    const NAME: &'static str = "todoItem.authors";

    fn members(owner: i64) -> SelectStatement {
        author_todo_item::Entity::find()
            .select_only()
            .column(author_todo_item::Column::AuthorId)
            .filter(author_todo_item::Column::TodoItemId.eq(owner))
            .into_query()
    }

    fn edges(owners: Vec<i64>) -> SelectStatement {
        author_todo_item::Entity::find()
            .select_only()
            .column(author_todo_item::Column::TodoItemId)
            .column(author_todo_item::Column::AuthorId)
            .filter(author_todo_item::Column::TodoItemId.is_in(owners))
            .into_query()
    }

    fn owners_of(related: SelectStatement) -> SelectStatement {
        author_todo_item::Entity::find()
            .select_only()
            .column(author_todo_item::Column::TodoItemId)
            .filter(author_todo_item::Column::AuthorId.in_subquery(related))
            .into_query()
    }

    fn link(backend: DbBackend, owner: i64, related: &[i64]) -> Statement {
        insert_edges(backend, related.iter().map(|&author_id| (author_id, owner)))
    }

    fn unlink(backend: DbBackend, owner: i64, related: &[i64]) -> Statement {
        author_todo_item::Entity::delete_many()
            .filter(author_todo_item::Column::TodoItemId.eq(owner))
            .filter(author_todo_item::Column::AuthorId.is_in(related.iter().copied()))
            .build(backend)
    }
}

pub(crate) async fn hydrate<C: ConnectionTrait>(conn: &C, rows: Vec<todo_item::Model>) -> Result<Vec<TodoItem>, ServiceError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut members = relation::load::<TodoItemAuthors, C>(conn, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|m| {
            let author_ids = members.remove(&m.id).unwrap_or_default();
            TodoItem::from_model(m, author_ids)
        })
        .collect())
}

/// `Some(id)` only when the workspace exists.
async fn resolve_workspace<C: ConnectionTrait>(conn: &C, id: Option<i64>) -> Result<Option<i64>, ServiceError> {
    match id {
        Some(id) => Ok(repository::resolve_ids::<workspace::Entity, C>(conn, &[id]).await?.into_iter().next()),
        None => Ok(None),
    }
}

pub async fn list(db: &DatabaseConnection, spec: &FindMany) -> Result<Vec<TodoItem>, ServiceError> {
    let txn = db.begin().await?;
    let rows = repository::list::<todo_item::Entity, _>(&txn, spec).await?;
    let views = hydrate(&txn, rows).await?;
    txn.commit().await?;
    Ok(views)
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: i64) -> Result<TodoItem, ServiceError> {
    let row = repository::get::<todo_item::Entity, C>(conn, id).await?;
    hydrate(conn, vec![row])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found(todo_item::Entity::NAME, id))
}

pub async fn create(db: &DatabaseConnection, input: CreateTodoItem) -> Result<TodoItem, ServiceError> {
    if let Some(title) = &input.title {
        todo_item::validate_title(title)?;
    }
    let txn = db.begin().await?;
    if let Some(id) = input.id {
        if repository::exists::<todo_item::Entity, _>(&txn, id).await? {
            return Err(ServiceError::Conflict(format!("todoItem {id} already exists")));
        }
    }
    let workspace_id = resolve_workspace(&txn, input.workspace_id).await?;
    let am = todo_item::ActiveModel {
        id: match input.id {
            Some(id) => ActiveValue::Set(id),
            None => ActiveValue::NotSet,
        },
        title: ActiveValue::Set(input.title),
        is_complete: ActiveValue::Set(input.is_complete.unwrap_or(false)),
        workspace_id: ActiveValue::Set(workspace_id),
        version: ActiveValue::Set(1),
    };
    let id = todo_item::Entity::insert(am).exec(&txn).await?.last_insert_id;
    repository::touch::<workspace::Entity, _>(&txn, &workspace_id.into_iter().collect::<Vec<_>>()).await?;
    if let Some(author_ids) = &input.author_ids {
        relation::attach::<TodoItemAuthors, _>(&txn, id, author_ids).await?;
    }
    txn.commit().await?;
    info!(id, workspace_id = ?workspace_id, "todo item created");
    get(db, id).await
}

pub async fn update(db: &DatabaseConnection, id: i64, input: UpdateTodoItem) -> Result<TodoItem, ServiceError> {
    if let Some(Some(title)) = &input.title {
        todo_item::validate_title(title)?;
    }
    let txn = db.begin().await?;
    let before = repository::find::<todo_item::Entity, _>(&txn, id).await?;
    let mut stmt = todo_item::Entity::update_many();
    if let Some(title) = input.title {
        stmt = stmt.col_expr(todo_item::Column::Title, Expr::value(title));
    }
    if let Some(is_complete) = input.is_complete {
        stmt = stmt.col_expr(todo_item::Column::IsComplete, Expr::value(is_complete));
    }
    let mut moved = None;
    if let Some(target) = input.workspace_id {
        let target = resolve_workspace(&txn, target).await?;
        stmt = stmt.col_expr(todo_item::Column::WorkspaceId, Expr::value(target));
        moved = Some(target);
    }
    repository::apply_versioned::<todo_item::Entity, _>(&txn, id, input.version, stmt).await?;
    if let (Some(before), Some(target)) = (before, moved) {
        if before.workspace_id != target {
            let affected: Vec<i64> = before.workspace_id.into_iter().chain(target).collect();
            repository::touch::<workspace::Entity, _>(&txn, &affected).await?;
        }
    }
    if let Some(author_ids) = &input.author_ids {
        relation::replace::<TodoItemAuthors, _>(&txn, id, author_ids).await?;
    }
    let updated = get(&txn, id).await?;
    txn.commit().await?;
    info!(id, version = updated.version, "todo item updated");
    Ok(updated)
}

/// Deletes the item and its author edges; authors and the workspace survive.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    let row = repository::get::<todo_item::Entity, _>(&txn, id).await?;
    relation::detach_all::<TodoItemAuthors, _>(&txn, id).await?;
    repository::remove::<todo_item::Entity, _>(&txn, id).await?;
    repository::touch::<workspace::Entity, _>(&txn, &row.workspace_id.into_iter().collect::<Vec<_>>()).await?;
    txn.commit().await?;
    info!(id, "todo item deleted");
    Ok(())
}

pub async fn authors(db: &DatabaseConnection, id: i64, spec: &FindMany) -> Result<Vec<Author>, ServiceError> {
    let txn = db.begin().await?;
    let rows = relation::list_related::<TodoItemAuthors, _>(&txn, id, spec).await?;
    let views = crate::author::repository::hydrate(&txn, rows).await?;
    txn.commit().await?;
    Ok(views)
}

pub async fn connect_authors(db: &DatabaseConnection, id: i64, author_ids: &[i64]) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    relation::connect::<TodoItemAuthors, _>(&txn, id, author_ids).await?;
    txn.commit().await?;
    Ok(())
}

pub async fn disconnect_authors(db: &DatabaseConnection, id: i64, author_ids: &[i64]) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    relation::disconnect::<TodoItemAuthors, _>(&txn, id, author_ids).await?;
    txn.commit().await?;
    Ok(())
}
