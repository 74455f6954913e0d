use sea_orm::DatabaseConnection;
use tracing::instrument;

use super::domain::{Author, CreateAuthor, UpdateAuthor};
use super::repository;
use crate::errors::ServiceError;
use crate::query::FindMany;
use crate::todo_item::domain::TodoItem;

#[derive(Clone)]
pub struct AuthorService {
    db: DatabaseConnection,
}

impl AuthorService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    #[instrument(skip(self))]
    pub async fn authors(&self, filter: &FindMany) -> Result<Vec<Author>, ServiceError> {
        repository::list(&self.db, filter).await
    }

    #[instrument(skip(self))]
    pub async fn author(&self, id: i64) -> Result<Author, ServiceError> {
        repository::get(&self.db, id).await
    }

    #[instrument(skip(self, input), fields(id = ?input.id))]
    pub async fn create_author(&self, input: CreateAuthor) -> Result<Author, ServiceError> {
        repository::create(&self.db, input).await
    }

    #[instrument(skip(self, input), fields(version = input.version))]
    pub async fn update_author(&self, id: i64, input: UpdateAuthor) -> Result<Author, ServiceError> {
        repository::update(&self.db, id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_author(&self, id: i64) -> Result<(), ServiceError> {
        repository::delete(&self.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn todo_items(&self, id: i64, filter: &FindMany) -> Result<Vec<TodoItem>, ServiceError> {
        repository::todo_items(&self.db, id, filter).await
    }

    #[instrument(skip(self))]
    pub async fn connect_todo_items(&self, id: i64, todo_item_ids: &[i64]) -> Result<(), ServiceError> {
        repository::connect_todo_items(&self.db, id, todo_item_ids).await
    }

    #[instrument(skip(self))]
    pub async fn disconnect_todo_items(&self, id: i64, todo_item_ids: &[i64]) -> Result<(), ServiceError> {
        repository::disconnect_todo_items(&self.db, id, todo_item_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Comparison, Where};
    use crate::test_support::get_db;
    use crate::todo_item::domain::CreateTodoItem;
    use crate::todo_item::TodoItemService;

    async fn seed_todos(todos: &TodoItemService, ids: &[i64]) -> Result<(), ServiceError> {
        for &id in ids {
            todos.create_todo_item(CreateTodoItem { id: Some(id), ..Default::default() }).await?;
        }
        Ok(())
    }

    #[tokio::test]
    async fn get_on_empty_store_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let authors = AuthorService::new(db);
        assert!(matches!(authors.author(999).await, Err(ServiceError::NotFound(_))));
        assert!(authors.authors(&FindMany::new()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn generated_ids_are_distinct() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let authors = AuthorService::new(db);
        let a = authors.create_author(CreateAuthor { name: Some("Ada".into()), ..Default::default() }).await?;
        let b = authors.create_author(CreateAuthor { name: Some("Bob".into()), ..Default::default() }).await?;
        assert_ne!(a.id, b.id);
        assert_eq!(a.version, 1);
        Ok(())
    }

    #[tokio::test]
    async fn connect_twice_equals_once() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let authors = AuthorService::new(db.clone());
        let todos = TodoItemService::new(db);
        authors.create_author(CreateAuthor { id: Some(1), ..Default::default() }).await?;
        seed_todos(&todos, &[10, 11]).await?;

        authors.connect_todo_items(1, &[10, 11, 10]).await?;
        let once = authors.author(1).await?;
        authors.connect_todo_items(1, &[11, 10]).await?;
        let twice = authors.author(1).await?;
        assert_eq!(once, twice);
        assert_eq!(twice.todo_item_ids, vec![10, 11]);
        Ok(())
    }

    #[tokio::test]
    async fn disconnect_requires_owner_only() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let authors = AuthorService::new(db);
        assert!(matches!(authors.disconnect_todo_items(1, &[10]).await, Err(ServiceError::NotFound(_))));

        authors.create_author(CreateAuthor { id: Some(1), ..Default::default() }).await?;
        authors.disconnect_todo_items(1, &[10, 11]).await?;
        assert_eq!(authors.author(1).await?.version, 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_todo_items_and_keeps_name_when_absent() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let authors = AuthorService::new(db.clone());
        let todos = TodoItemService::new(db);
        seed_todos(&todos, &[10, 11, 12]).await?;
        authors
            .create_author(CreateAuthor { id: Some(1), name: Some("Ada".into()), todo_item_ids: Some(vec![10, 11]) })
            .await?;

        let updated = authors
            .update_author(1, UpdateAuthor { version: 1, name: None, todo_item_ids: Some(vec![12]) })
            .await?;
        assert_eq!(updated.name.as_deref(), Some("Ada"));
        assert_eq!(updated.todo_item_ids, vec![12]);
        assert_eq!(updated.version, 2);
        assert!(todos.todo_item(10).await?.author_ids.is_empty());
        assert_eq!(todos.todo_item(12).await?.author_ids, vec![1]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_edges_only() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let authors = AuthorService::new(db.clone());
        let todos = TodoItemService::new(db);
        seed_todos(&todos, &[10]).await?;
        authors.create_author(CreateAuthor { id: Some(1), todo_item_ids: Some(vec![10]), ..Default::default() }).await?;
        authors.create_author(CreateAuthor { id: Some(2), todo_item_ids: Some(vec![10]), ..Default::default() }).await?;

        authors.delete_author(1).await?;
        assert!(matches!(authors.author(1).await, Err(ServiceError::NotFound(_))));
        assert_eq!(todos.todo_item(10).await?.author_ids, vec![2]);
        Ok(())
    }

    #[tokio::test]
    async fn deleted_author_cannot_be_updated() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let authors = AuthorService::new(db);
        authors.create_author(CreateAuthor { id: Some(1), ..Default::default() }).await?;
        authors.delete_author(1).await?;
        let err = authors.update_author(1, UpdateAuthor { version: 1, name: Some(Some("x".into())), todo_item_ids: None }).await;
        assert!(matches!(err, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn text_filters_match_substrings() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let authors = AuthorService::new(db);
        for (id, name) in [(1, "Ada Lovelace"), (2, "Grace Hopper"), (3, "Alan Kay")] {
            authors.create_author(CreateAuthor { id: Some(id), name: Some(name.into()), ..Default::default() }).await?;
        }
        let ids = |v: Vec<Author>| v.into_iter().map(|a| a.id).collect::<Vec<_>>();

        let with_a = FindMany::new().filter(Where::compare("name", Comparison::StartsWith("A".into())));
        assert_eq!(ids(authors.authors(&with_a).await?), vec![1, 3]);

        let hopper = FindMany::new().filter(Where::compare("name", Comparison::EndsWith("Hopper".into())));
        assert_eq!(ids(authors.authors(&hopper).await?), vec![2]);

        let either = FindMany::new().filter(Where::Or(vec![
            Where::compare("id", Comparison::In(vec![2i64.into()])),
            Where::compare("name", Comparison::Contains("Kay".into())),
        ]));
        assert_eq!(ids(authors.authors(&either).await?), vec![2, 3]);

        let above = FindMany::new().filter(Where::compare("id", Comparison::Gt(1i64.into())));
        assert_eq!(ids(authors.authors(&above).await?), vec![2, 3]);
        Ok(())
    }
}
