use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::dto::IdDto;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AuthorDoc { pub id: i64, pub name: Option<String>, pub version: i32, pub todo_item_ids: Vec<i64> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateAuthorDoc { pub id: Option<i64>, pub name: Option<String>, pub todo_item_ids: Option<Vec<i64>> }

/// `name: null` clears the name; omit the key to leave it unchanged.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateAuthorDoc { pub version: i32, pub name: Option<String>, pub todo_item_ids: Option<Vec<i64>> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TodoItemDoc {
    pub id: i64,
    pub title: Option<String>,
    pub is_complete: bool,
    pub workspace_id: Option<i64>,
    pub version: i32,
    pub author_ids: Vec<i64>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateTodoItemDoc {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub is_complete: Option<bool>,
    pub workspace_id: Option<i64>,
    pub author_ids: Option<Vec<i64>>,
}

/// `title: null` clears the title and `workspaceId: null` detaches the item; omit a key to leave it unchanged.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateTodoItemDoc {
    pub version: i32,
    pub title: Option<String>,
    pub is_complete: Option<bool>,
    pub workspace_id: Option<i64>,
    pub author_ids: Option<Vec<i64>>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct WorkspaceDoc { pub id: i64, pub name: Option<String>, pub version: i32, pub todo_item_ids: Vec<i64> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateWorkspaceDoc { pub id: Option<i64>, pub name: Option<String>, pub todo_item_ids: Option<Vec<i64>> }

/// `name: null` clears the name; omit the key to leave it unchanged.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateWorkspaceDoc { pub version: i32, pub name: Option<String>, pub todo_item_ids: Option<Vec<i64>> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::authors::authors,
        crate::routes::authors::author,
        crate::routes::authors::create_author,
        crate::routes::authors::update_author,
        crate::routes::authors::delete_author,
        crate::routes::authors::todo_items,
        crate::routes::authors::connect_todo_items,
        crate::routes::authors::disconnect_todo_items,
        crate::routes::todo_items::todo_items,
        crate::routes::todo_items::todo_item,
        crate::routes::todo_items::create_todo_item,
        crate::routes::todo_items::update_todo_item,
        crate::routes::todo_items::delete_todo_item,
        crate::routes::todo_items::authors,
        crate::routes::todo_items::connect_authors,
        crate::routes::todo_items::disconnect_authors,
        crate::routes::workspaces::workspaces,
        crate::routes::workspaces::workspace,
        crate::routes::workspaces::create_workspace,
        crate::routes::workspaces::update_workspace,
        crate::routes::workspaces::delete_workspace,
        crate::routes::workspaces::todo_items,
        crate::routes::workspaces::connect_todo_items,
        crate::routes::workspaces::disconnect_todo_items,
    ),
    components(
        schemas(
            HealthResponse,
            IdDto,
            AuthorDoc,
            CreateAuthorDoc,
            UpdateAuthorDoc,
            TodoItemDoc,
            CreateTodoItemDoc,
            UpdateTodoItemDoc,
            WorkspaceDoc,
            CreateWorkspaceDoc,
            UpdateWorkspaceDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "authors"),
        (name = "todoItems"),
        (name = "workspaces")
    )
)]
pub struct ApiDoc;
