//! Relation manager: membership reads and edge edits for one-to-many and many-to-many links.
//!
//! A [`Relation`] is seen from its owner side. The join table backs both directions of
//! Author <-> TodoItem; Workspace -> TodoItem is stored in `todo_items.workspace_id`.
//! Every edge change bumps the version of the rows whose membership changed.

use std::collections::HashMap;

use sea_orm::sea_query::SelectStatement;
use sea_orm::{ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, QueryFilter, QuerySelect, QueryTrait, Statement};
use tracing::debug;

use crate::errors::ServiceError;
use crate::query::{condition, translate, FindMany, Filterable, Where};
use crate::repository::{self, Record};

pub trait Relation {
    type Owner: Record;
    type Related: Record;

    const NAME: &'static str;
    /// A related row belongs to at most one owner; linking moves it.
    const EXCLUSIVE: bool = false;

    /// Keys of the related rows attached to `owner`.
    fn members(owner: i64) -> SelectStatement;

    /// `(owner, related)` key pairs for a batch of owners.
    fn edges(owners: Vec<i64>) -> SelectStatement;

    /// Owner keys of the edges whose related key is produced by `related`. Never NULL.
    fn owners_of(related: SelectStatement) -> SelectStatement;

    fn link(backend: DbBackend, owner: i64, related: &[i64]) -> Statement;

    fn unlink(backend: DbBackend, owner: i64, related: &[i64]) -> Statement;
}

/// Subquery of owner keys having at least one related row matching `filter`.
pub fn scope<R: Relation>(filter: Option<&Where>) -> Result<SelectStatement, ServiceError> {
    let mut related = R::Related::find().select_only().column(R::Related::key());
    if let Some(filter) = filter {
        related = related.filter(condition::<R::Related>(filter)?);
    }
    Ok(R::owners_of(related.into_query()))
}

async fn keys<C: ConnectionTrait>(conn: &C, stmt: &SelectStatement) -> Result<Vec<i64>, ServiceError> {
    let rows = conn.query_all(conn.get_database_backend().build(stmt)).await?;
    let mut ids = rows.iter().map(|row| row.try_get_by_index::<i64>(0)).collect::<Result<Vec<_>, _>>()?;
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

pub async fn member_ids<R: Relation, C: ConnectionTrait>(conn: &C, owner: i64) -> Result<Vec<i64>, ServiceError> {
    keys(conn, &R::members(owner)).await
}

/// Related keys per owner, each list ascending. Owners without edges are absent.
pub async fn load<R: Relation, C: ConnectionTrait>(conn: &C, owners: &[i64]) -> Result<HashMap<i64, Vec<i64>>, ServiceError> {
    let mut members: HashMap<i64, Vec<i64>> = HashMap::new();
    if owners.is_empty() {
        return Ok(members);
    }
    let stmt = conn.get_database_backend().build(&R::edges(owners.to_vec()));
    for row in conn.query_all(stmt).await? {
        let owner = row.try_get_by_index::<i64>(0)?;
        let related = row.try_get_by_index::<i64>(1)?;
        members.entry(owner).or_default().push(related);
    }
    for ids in members.values_mut() {
        ids.sort_unstable();
    }
    Ok(members)
}

async fn link<R: Relation, C: ConnectionTrait>(conn: &C, owner: i64, related: &[i64]) -> Result<(), ServiceError> {
    if related.is_empty() {
        return Ok(());
    }
    if R::EXCLUSIVE {
        let current = R::Related::find()
            .select_only()
            .column(R::Related::key())
            .filter(R::Related::key().is_in(related.iter().copied()))
            .into_query();
        let previous: Vec<i64> = keys(conn, &R::owners_of(current)).await?.into_iter().filter(|o| *o != owner).collect();
        repository::touch::<R::Owner, C>(conn, &previous).await?;
    }
    conn.execute(R::link(conn.get_database_backend(), owner, related)).await?;
    repository::touch::<R::Related, C>(conn, related).await
}

async fn unlink<R: Relation, C: ConnectionTrait>(conn: &C, owner: i64, related: &[i64]) -> Result<(), ServiceError> {
    if related.is_empty() {
        return Ok(());
    }
    conn.execute(R::unlink(conn.get_database_backend(), owner, related)).await?;
    repository::touch::<R::Related, C>(conn, related).await
}

fn missing_from(wanted: &[i64], present: &[i64]) -> Vec<i64> {
    wanted.iter().copied().filter(|id| present.binary_search(id).is_err()).collect()
}

/// Add edges from `owner` to every resolvable id; existing edges are left alone.
///
/// Fails with `NotFound` when the owner is missing or none of the ids resolve.
pub async fn connect<R: Relation, C: ConnectionTrait>(conn: &C, owner: i64, ids: &[i64]) -> Result<(), ServiceError> {
    repository::get::<R::Owner, C>(conn, owner).await?;
    let resolved = repository::resolve_ids::<R::Related, C>(conn, ids).await?;
    if resolved.is_empty() {
        return Err(ServiceError::NotFound(format!("no {} matched ids {:?}", R::Related::NAME, ids)));
    }
    let current = member_ids::<R, C>(conn, owner).await?;
    let added = missing_from(&resolved, &current);
    if !added.is_empty() {
        link::<R, C>(conn, owner, &added).await?;
        repository::touch::<R::Owner, C>(conn, &[owner]).await?;
    }
    debug!(relation = R::NAME, owner, added = ?added, "connected");
    Ok(())
}

/// Remove the edges from `owner` to `ids` that exist; anything else is a no-op.
pub async fn disconnect<R: Relation, C: ConnectionTrait>(conn: &C, owner: i64, ids: &[i64]) -> Result<(), ServiceError> {
    repository::get::<R::Owner, C>(conn, owner).await?;
    let current = member_ids::<R, C>(conn, owner).await?;
    let mut removed: Vec<i64> = ids.iter().copied().filter(|id| current.binary_search(id).is_ok()).collect();
    removed.sort_unstable();
    removed.dedup();
    if !removed.is_empty() {
        unlink::<R, C>(conn, owner, &removed).await?;
        repository::touch::<R::Owner, C>(conn, &[owner]).await?;
    }
    debug!(relation = R::NAME, owner, removed = ?removed, "disconnected");
    Ok(())
}

/// The owner's related rows, filtered, sorted and paged by `spec`.
pub async fn list_related<R: Relation, C: ConnectionTrait>(
    conn: &C,
    owner: i64,
    spec: &FindMany,
) -> Result<Vec<<R::Related as EntityTrait>::Model>, ServiceError> {
    let select = translate::<R::Related>(spec)?;
    repository::get::<R::Owner, C>(conn, owner).await?;
    let rows = select.filter(R::Related::key().in_subquery(R::members(owner))).all(conn).await?;
    Ok(rows)
}

/// Attach the resolvable subset of `ids` to a freshly created owner. Unknown ids are skipped.
pub async fn attach<R: Relation, C: ConnectionTrait>(conn: &C, owner: i64, ids: &[i64]) -> Result<Vec<i64>, ServiceError> {
    let resolved = repository::resolve_ids::<R::Related, C>(conn, ids).await?;
    link::<R, C>(conn, owner, &resolved).await?;
    Ok(resolved)
}

/// Make the owner's membership exactly the resolvable subset of `ids`.
pub async fn replace<R: Relation, C: ConnectionTrait>(conn: &C, owner: i64, ids: &[i64]) -> Result<(), ServiceError> {
    let resolved = repository::resolve_ids::<R::Related, C>(conn, ids).await?;
    let current = member_ids::<R, C>(conn, owner).await?;
    let removed = missing_from(&current, &resolved);
    let added = missing_from(&resolved, &current);
    unlink::<R, C>(conn, owner, &removed).await?;
    link::<R, C>(conn, owner, &added).await?;
    debug!(relation = R::NAME, owner, added = ?added, removed = ?removed, "replaced members");
    Ok(())
}

/// Drop every edge of `owner`; the related rows themselves survive.
pub async fn detach_all<R: Relation, C: ConnectionTrait>(conn: &C, owner: i64) -> Result<(), ServiceError> {
    let current = member_ids::<R, C>(conn, owner).await?;
    unlink::<R, C>(conn, owner, &current).await
}
