use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use service::todo_item::domain::TodoItem;
use service::workspace::domain::{CreateWorkspace, UpdateWorkspace, Workspace};
use tracing::info;

use super::dto::{ids, FindManyQuery, IdDto};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/workspaces", tag = "workspaces",
    params(FindManyQuery),
    responses(
        (status = 200, description = "Matching workspaces", body = [crate::openapi::WorkspaceDoc]),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn workspaces(State(state): State<AppState>, ApiQuery(q): ApiQuery<FindManyQuery>) -> Result<Json<Vec<Workspace>>, JsonApiError> {
    let filter = q.into_find_many()?;
    let workspaces = state.workspaces.workspaces(&filter).await?;
    info!(count = workspaces.len(), "list workspaces");
    Ok(Json(workspaces))
}

#[utoipa::path(
    get, path = "/api/workspaces/{id}", tag = "workspaces",
    params(("id" = i64, Path, description = "Workspace id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::WorkspaceDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn workspace(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<Json<Workspace>, JsonApiError> {
    Ok(Json(state.workspaces.workspace(id).await?))
}

#[utoipa::path(
    post, path = "/api/workspaces", tag = "workspaces",
    request_body = crate::openapi::CreateWorkspaceDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::WorkspaceDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Id already taken")
    )
)]
pub async fn create_workspace(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateWorkspace>,
) -> Result<impl IntoResponse, JsonApiError> {
    let created = state.workspaces.create_workspace(input).await?;
    info!(id = created.id, "created workspace");
    let location = format!("/api/workspaces/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    patch, path = "/api/workspaces/{id}", tag = "workspaces",
    params(("id" = i64, Path, description = "Workspace id")),
    request_body = crate::openapi::UpdateWorkspaceDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Stale version")
    )
)]
pub async fn update_workspace(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<UpdateWorkspace>,
) -> Result<StatusCode, JsonApiError> {
    state.workspaces.update_workspace(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/workspaces/{id}", tag = "workspaces",
    params(("id" = i64, Path, description = "Workspace id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_workspace(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, JsonApiError> {
    state.workspaces.delete_workspace(id).await?;
    info!(id, "deleted workspace");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/workspaces/{id}/todoItems", tag = "workspaces", operation_id = "workspace_todo_items",
    params(("id" = i64, Path, description = "Workspace id"), FindManyQuery),
    responses(
        (status = 200, description = "Todo items of the workspace", body = [crate::openapi::TodoItemDoc]),
        (status = 404, description = "Not Found")
    )
)]
pub async fn todo_items(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(q): ApiQuery<FindManyQuery>,
) -> Result<Json<Vec<TodoItem>>, JsonApiError> {
    let filter = q.into_find_many()?;
    Ok(Json(state.workspaces.todo_items(id, &filter).await?))
}

#[utoipa::path(
    post, path = "/api/workspaces/{id}/todoItems", tag = "workspaces", operation_id = "connect_workspace_todo_items",
    params(("id" = i64, Path, description = "Workspace id")),
    request_body = [IdDto],
    responses(
        (status = 204, description = "Connected"),
        (status = 404, description = "Workspace missing or no todo item resolved")
    )
)]
pub async fn connect_todo_items(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<Vec<IdDto>>,
) -> Result<StatusCode, JsonApiError> {
    state.workspaces.connect_todo_items(id, &ids(&body)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/workspaces/{id}/todoItems", tag = "workspaces", operation_id = "disconnect_workspace_todo_items",
    params(("id" = i64, Path, description = "Workspace id")),
    request_body = [IdDto],
    responses(
        (status = 204, description = "Disconnected"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn disconnect_todo_items(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<Vec<IdDto>>,
) -> Result<StatusCode, JsonApiError> {
    state.workspaces.disconnect_todo_items(id, &ids(&body)).await?;
    Ok(StatusCode::NO_CONTENT)
}
