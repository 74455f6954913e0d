use sea_orm::DatabaseConnection;
use tracing::instrument;

use super::domain::{CreateTodoItem, TodoItem, UpdateTodoItem};
use super::repository;
use crate::author::domain::Author;
use crate::errors::ServiceError;
use crate::query::FindMany;

#[derive(Clone)]
pub struct TodoItemService {
    db: DatabaseConnection,
}

impl TodoItemService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    #[instrument(skip(self))]
    pub async fn todo_items(&self, filter: &FindMany) -> Result<Vec<TodoItem>, ServiceError> {
        repository::list(&self.db, filter).await
    }

    #[instrument(skip(self))]
    pub async fn todo_item(&self, id: i64) -> Result<TodoItem, ServiceError> {
        repository::get(&self.db, id).await
    }

    #[instrument(skip(self, input), fields(id = ?input.id, workspace_id = ?input.workspace_id))]
    pub async fn create_todo_item(&self, input: CreateTodoItem) -> Result<TodoItem, ServiceError> {
        repository::create(&self.db, input).await
    }

    #[instrument(skip(self, input), fields(version = input.version))]
    pub async fn update_todo_item(&self, id: i64, input: UpdateTodoItem) -> Result<TodoItem, ServiceError> {
        repository::update(&self.db, id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_todo_item(&self, id: i64) -> Result<(), ServiceError> {
        repository::delete(&self.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn authors(&self, id: i64, filter: &FindMany) -> Result<Vec<Author>, ServiceError> {
        repository::authors(&self.db, id, filter).await
    }

    #[instrument(skip(self))]
    pub async fn connect_authors(&self, id: i64, author_ids: &[i64]) -> Result<(), ServiceError> {
        repository::connect_authors(&self.db, id, author_ids).await
    }

    #[instrument(skip(self))]
    pub async fn disconnect_authors(&self, id: i64, author_ids: &[i64]) -> Result<(), ServiceError> {
        repository::disconnect_authors(&self.db, id, author_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::domain::CreateAuthor;
    use crate::author::AuthorService;
    use crate::query::{Comparison, SortDirection, Where};
    use crate::test_support::get_db;
    use crate::workspace::domain::CreateWorkspace;
    use crate::workspace::WorkspaceService;

    fn author(id: i64, name: &str) -> CreateAuthor {
        CreateAuthor { id: Some(id), name: Some(name.into()), todo_item_ids: None }
    }

    #[tokio::test]
    async fn create_round_trips_scalars_and_resolvable_relations() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let todos = TodoItemService::new(db.clone());
        let authors = AuthorService::new(db.clone());
        let workspaces = WorkspaceService::new(db);
        authors.create_author(author(1, "Ada")).await?;
        authors.create_author(author(2, "Grace")).await?;
        workspaces
            .create_workspace(CreateWorkspace { id: Some(3), name: Some("W".into()), todo_item_ids: None })
            .await?;

        let created = todos
            .create_todo_item(CreateTodoItem {
                id: None,
                title: Some("write docs".into()),
                is_complete: Some(true),
                workspace_id: Some(3),
                author_ids: Some(vec![2, 1, 40]),
            })
            .await?;
        assert_eq!(created.title.as_deref(), Some("write docs"));
        assert!(created.is_complete);
        assert_eq!(created.workspace_id, Some(3));
        assert_eq!(created.author_ids, vec![1, 2]);
        assert_eq!(created.version, 1);
        assert_eq!(todos.todo_item(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn unresolved_workspace_is_stored_as_none() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let todos = TodoItemService::new(db);
        let created = todos
            .create_todo_item(CreateTodoItem { id: Some(10), workspace_id: Some(404), ..Default::default() })
            .await?;
        assert_eq!(created.workspace_id, None);
        assert!(!created.is_complete);
        assert_eq!(created.title, None);
        Ok(())
    }

    #[tokio::test]
    async fn membership_is_symmetric() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let todos = TodoItemService::new(db.clone());
        let authors = AuthorService::new(db);
        authors.create_author(author(1, "Ada")).await?;
        todos.create_todo_item(CreateTodoItem { id: Some(10), ..Default::default() }).await?;

        todos.connect_authors(10, &[1]).await?;
        let from_todo = todos.authors(10, &FindMany::new()).await?;
        let from_author = authors.todo_items(1, &FindMany::new()).await?;
        assert_eq!(from_todo.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(from_author.iter().map(|t| t.id).collect::<Vec<_>>(), vec![10]);
        assert_eq!(from_author[0].author_ids, vec![1]);

        todos.disconnect_authors(10, &[1]).await?;
        assert!(authors.author(1).await?.todo_item_ids.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn connect_bumps_versions_on_both_sides() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let todos = TodoItemService::new(db.clone());
        let authors = AuthorService::new(db);
        authors.create_author(author(1, "Ada")).await?;
        todos.create_todo_item(CreateTodoItem { id: Some(10), ..Default::default() }).await?;

        todos.connect_authors(10, &[1]).await?;
        assert_eq!(todos.todo_item(10).await?.version, 2);
        assert_eq!(authors.author(1).await?.version, 2);

        // a writer still holding version 1 must lose
        let stale = todos.update_todo_item(10, UpdateTodoItem { version: 1, is_complete: Some(true), ..Default::default() }).await;
        assert!(matches!(stale, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_moves_and_clears_workspace() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let todos = TodoItemService::new(db.clone());
        let workspaces = WorkspaceService::new(db);
        for id in [1, 2] {
            workspaces.create_workspace(CreateWorkspace { id: Some(id), ..Default::default() }).await?;
        }
        todos.create_todo_item(CreateTodoItem { id: Some(10), workspace_id: Some(1), ..Default::default() }).await?;

        let moved = todos
            .update_todo_item(10, UpdateTodoItem { version: 1, workspace_id: Some(Some(2)), ..Default::default() })
            .await?;
        assert_eq!(moved.workspace_id, Some(2));
        assert!(workspaces.workspace(1).await?.todo_item_ids.is_empty());
        assert_eq!(workspaces.workspace(2).await?.todo_item_ids, vec![10]);

        let cleared = todos
            .update_todo_item(10, UpdateTodoItem { version: moved.version, workspace_id: Some(None), ..Default::default() })
            .await?;
        assert_eq!(cleared.workspace_id, None);

        let untouched = todos
            .update_todo_item(10, UpdateTodoItem { version: cleared.version, title: Some(Some("t".into())), ..Default::default() })
            .await?;
        assert_eq!(untouched.workspace_id, None);
        assert_eq!(untouched.title.as_deref(), Some("t"));
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_edges_but_not_authors() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let todos = TodoItemService::new(db.clone());
        let authors = AuthorService::new(db);
        authors.create_author(author(1, "Ada")).await?;
        todos
            .create_todo_item(CreateTodoItem { id: Some(10), author_ids: Some(vec![1]), ..Default::default() })
            .await?;

        todos.delete_todo_item(10).await?;
        assert!(matches!(todos.todo_item(10).await, Err(ServiceError::NotFound(_))));
        let ada = authors.author(1).await?;
        assert!(ada.todo_item_ids.is_empty());
        assert!(matches!(todos.delete_todo_item(10).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn filters_on_booleans_nulls_and_author_relation() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let todos = TodoItemService::new(db.clone());
        let authors = AuthorService::new(db);
        authors.create_author(author(1, "Ada")).await?;
        authors.create_author(author(2, "Bob")).await?;
        todos.create_todo_item(CreateTodoItem { id: Some(10), title: Some("b".into()), is_complete: Some(true), author_ids: Some(vec![1]), ..Default::default() }).await?;
        todos.create_todo_item(CreateTodoItem { id: Some(11), title: Some("a".into()), author_ids: Some(vec![2]), ..Default::default() }).await?;
        todos.create_todo_item(CreateTodoItem { id: Some(12), ..Default::default() }).await?;

        let ids = |items: Vec<TodoItem>| items.into_iter().map(|t| t.id).collect::<Vec<_>>();

        let open = FindMany::new().filter(Where::compare("isComplete", Comparison::Equals(false.into())));
        assert_eq!(ids(todos.todo_items(&open).await?), vec![11, 12]);

        let untitled = FindMany::new().filter(Where::compare("title", Comparison::Equals(crate::query::FilterValue::Null)));
        assert_eq!(ids(todos.todo_items(&untitled).await?), vec![12]);

        let by_ada = FindMany::new().filter(Where::exists(
            "authors",
            Some(Where::compare("name", Comparison::StartsWith("Ad".into()))),
        ));
        assert_eq!(ids(todos.todo_items(&by_ada).await?), vec![10]);

        let orphans = FindMany::new().filter(Where::not_exists("authors", None));
        assert_eq!(ids(todos.todo_items(&orphans).await?), vec![12]);

        let titled = FindMany::new()
            .filter(Where::compare("title", Comparison::Not(crate::query::FilterValue::Null)))
            .sort("title", SortDirection::Asc);
        assert_eq!(ids(todos.todo_items(&titled).await?), vec![11, 10]);
        Ok(())
    }

    #[tokio::test]
    async fn related_listing_is_filtered_and_paged() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let todos = TodoItemService::new(db.clone());
        let authors = AuthorService::new(db);
        for (id, name) in [(1, "c"), (2, "a"), (3, "b"), (4, "z")] {
            authors.create_author(author(id, name)).await?;
        }
        todos.create_todo_item(CreateTodoItem { id: Some(10), author_ids: Some(vec![1, 2, 3]), ..Default::default() }).await?;

        let page = FindMany::new().sort("name", SortDirection::Desc).skip(1).take(1);
        let listed = todos.authors(10, &page).await?;
        assert_eq!(listed.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3]);
        Ok(())
    }
}
