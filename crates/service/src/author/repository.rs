use sea_orm::sea_query::{Expr, OnConflict, SelectStatement};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, QueryFilter, QuerySelect,
    QueryTrait, Statement, TransactionTrait,
};
use tracing::info;

use models::{author, author_todo_item, todo_item};

use super::domain::{Author, CreateAuthor, UpdateAuthor};
use crate::errors::ServiceError;
use crate::query::{Field, FieldKind, FindMany, Filterable, Where};
use crate::relation::{self, Relation};
use crate::repository::{self, Record};
use crate::todo_item::domain::TodoItem;

/// Insert `(author, todo item)` join rows. Pairs that already exist are skipped, so two
/// connects racing on the same edge both succeed.
pub(crate) fn insert_edges(backend: DbBackend, edges: impl IntoIterator<Item = (i64, i64)>) -> Statement {
    let rows = edges.into_iter().map(|(author_id, todo_item_id)| author_todo_item::ActiveModel {
        author_id: ActiveValue::Set(author_id),
        todo_item_id: ActiveValue::Set(todo_item_id),
    });
    author_todo_item::Entity::insert_many(rows)
        .on_conflict(
            OnConflict::columns([author_todo_item::Column::AuthorId, author_todo_item::Column::TodoItemId])
                .do_nothing()
                .to_owned(),
        )
        .build(backend)
}

impl Filterable for author::Entity {
    fn key() -> author::Column { author::Column::Id }

    fn field(name: &str) -> Option<Field<author::Column>> {
        match name {
            "id" => Some(Field::new(author::Column::Id, FieldKind::Integer)),
            "name" => Some(Field::new(author::Column::Name, FieldKind::Text)),
            _ => None,
        }
    }

    fn relation_scope(relation: &str, filter: Option<&Where>) -> Result<Option<SelectStatement>, ServiceError> {
        match relation {
            "todoItems" => relation::scope::<AuthorTodoItems>(filter).map(Some),
            _ => Ok(None),
        }
    }
}

impl Record for author::Entity {
    const NAME: &'static str = "author";

    fn version() -> author::Column { author::Column::Version }
}

/// Author -> TodoItem through `author_todoitem`.
pub struct AuthorTodoItems;

impl Relation for AuthorTodoItems {
    type Owner = author::Entity;
    type Related = todo_item::Entity;

    const NAME: &'static str = "author.todoItems";

    fn members(owner: i64) -> SelectStatement {
        author_todo_item::Entity::find()
            .select_only()
            .column(author_todo_item::Column::TodoItemId)
            .filter(author_todo_item::Column::AuthorId.eq(owner))
            .into_query()
    }

    fn edges(owners: Vec<i64>) -> SelectStatement {
        author_todo_item::Entity::find()
            .select_only()
            .column(author_todo_item::Column::AuthorId)
            .column(author_todo_item::Column::TodoItemId)
            .filter(author_todo_item::Column::AuthorId.is_in(owners))
            .into_query()
    }

    fn owners_of(related: SelectStatement) -> SelectStatement {
        author_todo_item::Entity::find()
            .select_only()
            .column(author_todo_item::Column::AuthorId)
            .filter(author_todo_item::Column::TodoItemId.in_subquery(related))
            .into_query()
    }

    fn link(backend: DbBackend, owner: i64, related: &[i64]) -> Statement {
        insert_edges(backend, related.iter().map(|&todo_item_id| (owner, todo_item_id)))
    }

    fn unlink(backend: DbBackend, owner: i64, related: &[i64]) -> Statement {
        author_todo_item::Entity::delete_many()
            .filter(author_todo_item::Column::AuthorId.eq(owner))
            .filter(author_todo_item::Column::TodoItemId.is_in(related.iter().copied()))
            .build(backend)
    }
}

pub(crate) async fn hydrate<C: ConnectionTrait>(conn: &C, rows: Vec<author::Model>) -> Result<Vec<Author>, ServiceError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut members = relation::load::<AuthorTodoItems, C>(conn, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|m| {
            let todo_item_ids = members.remove(&m.id).unwrap_or_default();
            Author::from_model(m, todo_item_ids)
        })
        .collect())
}

pub async fn list(db: &DatabaseConnection, spec: &FindMany) -> Result<Vec<Author>, ServiceError> {
    let txn = db.begin().await?;
    let rows = repository::list::<author::Entity, _>(&txn, spec).await?;
    let views = hydrate(&txn, rows).await?;
    txn.commit().await?;
    Ok(views)
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Author, ServiceError> {
    let row = repository::get::<author::Entity, C>(conn, id).await?;
    hydrate(conn, vec![row])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found(author::Entity::NAME, id))
}

pub async fn create(db: &DatabaseConnection, input: CreateAuthor) -> Result<Author, ServiceError> {
    if let Some(name) = &input.name {
        author::validate_name(name)?;
    }
    let txn = db.begin().await?;
    if let Some(id) = input.id {
        if repository::exists::<author::Entity, _>(&txn, id).await? {
            return Err(ServiceError::Conflict(format!("author {id} already exists")));
        }
    }
    let am = author::ActiveModel {
        id: match input.id {
            Some(id) => ActiveValue::Set(id),
            None => ActiveValue::NotSet,
        },
        name: ActiveValue::Set(input.name),
        version: ActiveValue::Set(1),
    };
    let id = author::Entity::insert(am).exec(&txn).await?.last_insert_id;
    if let Some(todo_item_ids) = &input.todo_item_ids {
        relation::attach::<AuthorTodoItems, _>(&txn, id, todo_item_ids).await?;
    }
    txn.commit().await?;
    info!(id, "author created");
    get(db, id).await
}

pub async fn update(db: &DatabaseConnection, id: i64, input: UpdateAuthor) -> Result<Author, ServiceError> {
    if let Some(Some(name)) = &input.name {
        author::validate_name(name)?;
    }
    let txn = db.begin().await?;
    let mut stmt = author::Entity::update_many();
    if let Some(name) = input.name {
        stmt = stmt.col_expr(author::Column::Name, Expr::value(name));
    }
    repository::apply_versioned::<author::Entity, _>(&txn, id, input.version, stmt).await?;
    if let Some(todo_item_ids) = &input.todo_item_ids {
        relation::replace::<AuthorTodoItems, _>(&txn, id, todo_item_ids).await?;
    }
    let updated = get(&txn, id).await?;
    txn.commit().await?;
    info!(id, version = updated.version, "author updated");
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    repository::get::<author::Entity, _>(&txn, id).await?;
    relation::detach_all::<AuthorTodoItems, _>(&txn, id).await?;
    repository::remove::<author::Entity, _>(&txn, id).await?;
    txn.commit().await?;
    info!(id, "author deleted");
    Ok(())
}

pub async fn todo_items(db: &DatabaseConnection, id: i64, spec: &FindMany) -> Result<Vec<TodoItem>, ServiceError> {
    let txn = db.begin().await?;
    let rows = relation::list_related::<AuthorTodoItems, _>(&txn, id, spec).await?;
    let views = crate::todo_item::repository::hydrate(&txn, rows).await?;
    txn.commit().await?;
    Ok(views)
}

pub async fn connect_todo_items(db: &DatabaseConnection, id: i64, todo_item_ids: &[i64]) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    relation::connect::<AuthorTodoItems, _>(&txn, id, todo_item_ids).await?;
    txn.commit().await?;
    Ok(())
}

pub async fn disconnect_todo_items(db: &DatabaseConnection, id: i64, todo_item_ids: &[i64]) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    relation::disconnect::<AuthorTodoItems, _>(&txn, id, todo_item_ids).await?;
    txn.commit().await?;
    Ok(())
}
