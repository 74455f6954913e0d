//! Entity-agnostic data access shared by the author, todo item and workspace repositories.
//!
//! Every function takes the store handle explicitly so callers decide whether it runs
//! on the pool or inside a transaction.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, QueryFilter, QueryOrder, QuerySelect, UpdateMany};
use tracing::debug;

use crate::errors::ServiceError;
use crate::query::{translate, FindMany, Filterable};

/// A versioned table addressed by an `i64` identity.
pub trait Record: Filterable {
    /// Human readable entity name used in error messages and logs.
    const NAME: &'static str;

    fn version() -> Self::Column;
}

pub async fn list<E: Record, C: ConnectionTrait>(conn: &C, spec: &FindMany) -> Result<Vec<E::Model>, ServiceError> {
    let rows = translate::<E>(spec)?.all(conn).await?;
    Ok(rows)
}

pub async fn find<E: Record, C: ConnectionTrait>(conn: &C, id: i64) -> Result<Option<E::Model>, ServiceError> {
    let row = E::find().filter(E::key().eq(id)).one(conn).await?;
    Ok(row)
}

pub async fn get<E: Record, C: ConnectionTrait>(conn: &C, id: i64) -> Result<E::Model, ServiceError> {
    find::<E, C>(conn, id).await?.ok_or_else(|| ServiceError::not_found(E::NAME, id))
}

pub async fn exists<E: Record, C: ConnectionTrait>(conn: &C, id: i64) -> Result<bool, ServiceError> {
    let found = E::find()
        .select_only()
        .column(E::key())
        .filter(E::key().eq(id))
        .into_tuple::<i64>()
        .one(conn)
        .await?;
    Ok(found.is_some())
}

/// The subset of `ids` that exists, ascending and without duplicates.
pub async fn resolve_ids<E: Record, C: ConnectionTrait>(conn: &C, ids: &[i64]) -> Result<Vec<i64>, ServiceError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let found = E::find()
        .select_only()
        .column(E::key())
        .filter(E::key().is_in(ids.iter().copied()))
        .order_by_asc(E::key())
        .into_tuple::<i64>()
        .all(conn)
        .await?;
    Ok(found)
}

/// Compare-and-swap write: applies `update` only when the row still carries `version`,
/// and bumps the version in the same statement.
///
/// Zero affected rows means either the row is gone (`NotFound`) or someone else wrote
/// it first (`Conflict`).
pub async fn apply_versioned<E: Record, C: ConnectionTrait>(
    conn: &C,
    id: i64,
    version: i32,
    update: UpdateMany<E>,
) -> Result<(), ServiceError> {
    let res = update
        .col_expr(E::version(), Expr::col(E::version()).add(1))
        .filter(E::key().eq(id))
        .filter(E::version().eq(version))
        .exec(conn)
        .await?;
    if res.rows_affected == 0 {
        if exists::<E, C>(conn, id).await? {
            debug!(entity = E::NAME, id, version, "stale version token");
            return Err(ServiceError::conflict(E::NAME, id));
        }
        return Err(ServiceError::not_found(E::NAME, id));
    }
    Ok(())
}

/// Bump the version of every row in `ids`, invalidating tokens held by other writers.
pub async fn touch<E: Record, C: ConnectionTrait>(conn: &C, ids: &[i64]) -> Result<(), ServiceError> {
    if ids.is_empty() {
        return Ok(());
    }
    E::update_many()
        .col_expr(E::version(), Expr::col(E::version()).add(1))
        .filter(E::key().is_in(ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn remove<E: Record, C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), ServiceError> {
    let res = E::delete_many().filter(E::key().eq(id)).exec(conn).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found(E::NAME, id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::workspace;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    async fn seed(db: &sea_orm::DatabaseConnection, id: i64, name: &str) -> Result<(), anyhow::Error> {
        workspace::ActiveModel { id: Set(id), name: Set(Some(name.into())), version: Set(1) }
            .insert(db)
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn resolve_ids_keeps_existing_subset_sorted() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db, 3, "c").await?;
        seed(&db, 1, "a").await?;

        let found = resolve_ids::<workspace::Entity, _>(&db, &[3, 42, 1, 3]).await?;
        assert_eq!(found, vec![1, 3]);
        assert!(resolve_ids::<workspace::Entity, _>(&db, &[]).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn versioned_update_distinguishes_conflict_from_missing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db, 1, "a").await?;

        let rename = |name: &str| {
            workspace::Entity::update_many().col_expr(workspace::Column::Name, Expr::value(name.to_string()))
        };
        apply_versioned::<workspace::Entity, _>(&db, 1, 1, rename("b")).await?;
        let row = get::<workspace::Entity, _>(&db, 1).await?;
        assert_eq!(row.name.as_deref(), Some("b"));
        assert_eq!(row.version, 2);

        let stale = apply_versioned::<workspace::Entity, _>(&db, 1, 1, rename("c")).await;
        assert!(matches!(stale, Err(ServiceError::Conflict(_))));

        let missing = apply_versioned::<workspace::Entity, _>(&db, 7, 1, rename("c")).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn touch_and_remove() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db, 1, "a").await?;
        seed(&db, 2, "b").await?;

        touch::<workspace::Entity, _>(&db, &[2]).await?;
        assert_eq!(get::<workspace::Entity, _>(&db, 1).await?.version, 1);
        assert_eq!(get::<workspace::Entity, _>(&db, 2).await?.version, 2);

        remove::<workspace::Entity, _>(&db, 1).await?;
        assert!(!exists::<workspace::Entity, _>(&db, 1).await?);
        assert!(matches!(remove::<workspace::Entity, _>(&db, 1).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
