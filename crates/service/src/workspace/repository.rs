use sea_orm::sea_query::{Expr, SelectStatement};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, QueryFilter, QuerySelect,
    QueryTrait, Statement, TransactionTrait,
};
use tracing::info;

use models::{todo_item, workspace};

use super::domain::{CreateWorkspace, UpdateWorkspace, Workspace};
use crate::errors::ServiceError;
use crate::query::{Field, FieldKind, FindMany, Filterable, Where};
use crate::relation::{self, Relation};
use crate::repository::{self, Record};
use crate::todo_item::domain::TodoItem;

impl Filterable for workspace::Entity {
    fn key() -> workspace::Column { workspace::Column::Id }

    fn field(name: &str) -> Option<Field<workspace::Column>> {
        match name {
            "id" => Some(Field::new(workspace::Column::Id, FieldKind::Integer)),
            "name" => Some(Field::new(workspace::Column::Name, FieldKind::Text)),
            _ => None,
        }
    }

    fn relation_scope(relation: &str, filter: Option<&Where>) -> Result<Option<SelectStatement>, ServiceError> {
        match relation {
            "todoItems" => relation::scope::<WorkspaceTodoItems>(filter).map(Some),
            _ => Ok(None),
        }
    }
}

impl Record for workspace::Entity {
    const NAME: &'static str = "workspace";

    fn version() -> workspace::Column { workspace::Column::Version }
}

/// Workspace -> TodoItem, stored in `todo_items.workspace_id`.
pub struct WorkspaceTodoItems;

impl Relation for WorkspaceTodoItems {
    type Owner = workspace::Entity;
    type Related = todo_item::Entity;

    const NAME: &'static str = "workspace.todoItems";
    const EXCLUSIVE: bool = true;

    fn members(owner: i64) -> SelectStatement {
        todo_item::Entity::find()
            .select_only()
            .column(todo_item::Column::Id)
            .filter(todo_item::Column::WorkspaceId.eq(owner))
            .into_query()
    }

    fn edges(owners: Vec<i64>) -> SelectStatement {
        todo_item::Entity::find()
            .select_only()
            .column(todo_item::Column::WorkspaceId)
            .column(todo_item::Column::Id)
            .filter(todo_item::Column::WorkspaceId.is_in(owners))
            .into_query()
    }

    fn owners_of(related: SelectStatement) -> SelectStatement {
        todo_item::Entity::find()
            .select_only()
            .column(todo_item::Column::WorkspaceId)
            .filter(todo_item::Column::Id.in_subquery(related))
            .filter(todo_item::Column::WorkspaceId.is_not_null())
            .into_query()
    }

    fn link(backend: DbBackend, owner: i64, related: &[i64]) -> Statement {
        todo_item::Entity::update_many()
            .col_expr(todo_item::Column::WorkspaceId, Expr::value(owner))
            .filter(todo_item::Column::Id.is_in(related.iter().copied()))
            .build(backend)
    }

    fn unlink(backend: DbBackend, owner: i64, related: &[i64]) -> Statement {
        todo_item::Entity::update_many()
            .col_expr(todo_item::Column::WorkspaceId, Expr::value(Option::<i64>::None))
            .filter(todo_item::Column::Id.is_in(related.iter().copied()))
            .filter(todo_item::Column::WorkspaceId.eq(owner))
            .build(backend)
    }
}

pub(crate) async fn hydrate<C: ConnectionTrait>(conn: &C, rows: Vec<workspace::Model>) -> Result<Vec<Workspace>, ServiceError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut members = relation::load::<WorkspaceTodoItems, C>(conn, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|m| {
            let todo_item_ids = members.remove(&m.id).unwrap_or_default();
            Workspace::from_model(m, todo_item_ids)
        })
        .collect())
}

pub async fn list(db: &DatabaseConnection, spec: &FindMany) -> Result<Vec<Workspace>, ServiceError> {
    let txn = db.begin().await?;
    let rows = repository::list::<workspace::Entity, _>(&txn, spec).await?;
    let views = hydrate(&txn, rows).await?;
    txn.commit().await?;
    Ok(views)
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Workspace, ServiceError> {
    let row = repository::get::<workspace::Entity, C>(conn, id).await?;
    hydrate(conn, vec![row])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found(workspace::Entity::NAME, id))
}

pub async fn create(db: &DatabaseConnection, input: CreateWorkspace) -> Result<Workspace, ServiceError> {
    if let Some(name) = &input.name {
        workspace::validate_name(name)?;
    }
    let txn = db.begin().await?;
    if let Some(id) = input.id {
        if repository::exists::<workspace::Entity, _>(&txn, id).await? {
            return Err(ServiceError::Conflict(format!("workspace {id} already exists")));
        }
    }
    let am = workspace::ActiveModel {
        id: match input.id {
            Some(id) => ActiveValue::Set(id),
            None => ActiveValue::NotSet,
        },
        name: ActiveValue::Set(input.name),
        version: ActiveValue::Set(1),
    };
    let id = workspace::Entity::insert(am).exec(&txn).await?.last_insert_id;
    if let Some(todo_item_ids) = &input.todo_item_ids {
        relation::attach::<WorkspaceTodoItems, _>(&txn, id, todo_item_ids).await?;
    }
    txn.commit().await?;
    info!(id, "workspace created");
    get(db, id).await
}

pub async fn update(db: &DatabaseConnection, id: i64, input: UpdateWorkspace) -> Result<Workspace, ServiceError> {
    if let Some(Some(name)) = &input.name {
        workspace::validate_name(name)?;
    }
    let txn = db.begin().await?;
    let mut stmt = workspace::Entity::update_many();
    if let Some(name) = input.name {
        stmt = stmt.col_expr(workspace::Column::Name, Expr::value(name));
    }
    repository::apply_versioned::<workspace::Entity, _>(&txn, id, input.version, stmt).await?;
    if let Some(todo_item_ids) = &input.todo_item_ids {
        relation::replace::<WorkspaceTodoItems, _>(&txn, id, todo_item_ids).await?;
    }
    let updated = get(&txn, id).await?;
    txn.commit().await?;
    info!(id, version = updated.version, "workspace updated");
    Ok(updated)
}

/// Deletes the workspace; its todo items survive without an owner.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    repository::get::<workspace::Entity, _>(&txn, id).await?;
    relation::detach_all::<WorkspaceTodoItems, _>(&txn, id).await?;
    repository::remove::<workspace::Entity, _>(&txn, id).await?;
    txn.commit().await?;
    info!(id, "workspace deleted");
    Ok(())
}

pub async fn todo_items(db: &DatabaseConnection, id: i64, spec: &FindMany) -> Result<Vec<TodoItem>, ServiceError> {
    let txn = db.begin().await?;
    let rows = relation::list_related::<WorkspaceTodoItems, _>(&txn, id, spec).await?;
    let views = crate::todo_item::repository::hydrate(&txn, rows).await?;
    txn.commit().await?;
    Ok(views)
}

pub async fn connect_todo_items(db: &DatabaseConnection, id: i64, todo_item_ids: &[i64]) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    relation::connect::<WorkspaceTodoItems, _>(&txn, id, todo_item_ids).await?;
    txn.commit().await?;
    Ok(())
}

pub async fn disconnect_todo_items(db: &DatabaseConnection, id: i64, todo_item_ids: &[i64]) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    relation::disconnect::<WorkspaceTodoItems, _>(&txn, id, todo_item_ids).await?;
    txn.commit().await?;
    Ok(())
}
