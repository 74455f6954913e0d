use sea_orm::DatabaseConnection;
use tracing::instrument;

use super::domain::{CreateWorkspace, UpdateWorkspace, Workspace};
use super::repository;
use crate::errors::ServiceError;
use crate::query::FindMany;
use crate::todo_item::domain::TodoItem;

/// Workspace operations over an explicit store handle.
#[derive(Clone)]
pub struct WorkspaceService {
    db: DatabaseConnection,
}

impl WorkspaceService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    #[instrument(skip(self))]
    pub async fn workspaces(&self, filter: &FindMany) -> Result<Vec<Workspace>, ServiceError> {
        repository::list(&self.db, filter).await
    }

    #[instrument(skip(self))]
    pub async fn workspace(&self, id: i64) -> Result<Workspace, ServiceError> {
        repository::get(&self.db, id).await
    }

    #[instrument(skip(self, input), fields(id = ?input.id))]
    pub async fn create_workspace(&self, input: CreateWorkspace) -> Result<Workspace, ServiceError> {
        repository::create(&self.db, input).await
    }

    #[instrument(skip(self, input), fields(version = input.version))]
    pub async fn update_workspace(&self, id: i64, input: UpdateWorkspace) -> Result<Workspace, ServiceError> {
        repository::update(&self.db, id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_workspace(&self, id: i64) -> Result<(), ServiceError> {
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
