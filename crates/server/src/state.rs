use sea_orm::DatabaseConnection;
use service::{AuthorService, TodoItemService, WorkspaceService};

/// Shared handler state; each service holds its own clone of the pooled connection.
#[derive(Clone)]
pub struct AppState {
    pub authors: AuthorService,
    pub todo_items: TodoItemService,
    pub workspaces: WorkspaceService,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            authors: AuthorService::new(db.clone()),
            todo_items: TodoItemService::new(db.clone()),
            workspaces: WorkspaceService::new(db),
        }
    }
}
