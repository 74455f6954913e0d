use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use service::author::domain::Author;
use service::todo_item::domain::{CreateTodoItem, TodoItem, UpdateTodoItem};
use tracing::info;

use super::dto::{ids, FindManyQuery, IdDto};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/todoItems", tag = "todoItems",
    params(FindManyQuery),
    responses(
        (status = 200, description = "Matching todo items", body = [crate::openapi::TodoItemDoc]),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn todo_items(State(state): State<AppState>, ApiQuery(q): ApiQuery<FindManyQuery>) -> Result<Json<Vec<TodoItem>>, JsonApiError> {
    let filter = q.into_find_many()?;
    let items = state.todo_items.todo_items(&filter).await?;
    info!(count = items.len(), "list todo items");
    Ok(Json(items))
}

#[utoipa::path(
    get, path = "/api/todoItems/{id}", tag = "todoItems",
    params(("id" = i64, Path, description = "Todo item id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::TodoItemDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn todo_item(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<Json<TodoItem>, JsonApiError> {
    Ok(Json(state.todo_items.todo_item(id).await?))
}

#[utoipa::path(
    post, path = "/api/todoItems", tag = "todoItems",
    request_body = crate::openapi::CreateTodoItemDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::TodoItemDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Id already taken")
    )
)]
pub async fn create_todo_item(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateTodoItem>,
) -> Result<impl IntoResponse, JsonApiError> {
    let created = state.todo_items.create_todo_item(input).await?;
    info!(id = created.id, "created todo item");
    let location = format!("/api/todoItems/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    patch, path = "/api/todoItems/{id}", tag = "todoItems",
    params(("id" = i64, Path, description = "Todo item id")),
    request_body = crate::openapi::UpdateTodoItemDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Stale version")
    )
)]
pub async fn update_todo_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<UpdateTodoItem>,
) -> Result<StatusCode, JsonApiError> {
    state.todo_items.update_todo_item(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/todoItems/{id}", tag = "todoItems",
    params(("id" = i64, Path, description = "Todo item id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_todo_item(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, JsonApiError> {
    state.todo_items.delete_todo_item(id).await?;
    info!(id, "deleted todo item");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/todoItems/{id}/authors", tag = "todoItems", operation_id = "todo_item_authors",
    params(("id" = i64, Path, description = "Todo item id"), FindManyQuery),
    responses(
        (status = 200, description = "Authors of the todo item", body = [crate::openapi::AuthorDoc]),
        (status = 404, description = "Not Found")
    )
)]
pub async fn authors(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(q): ApiQuery<FindManyQuery>,
) -> Result<Json<Vec<Author>>, JsonApiError> {
    let filter = q.into_find_many()?;
    Ok(Json(state.todo_items.authors(id, &filter).await?))
}

#[utoipa::path(
    post, path = "/api/todoItems/{id}/authors", tag = "todoItems", operation_id = "connect_todo_item_authors",
    params(("id" = i64, Path, description = "Todo item id")),
    request_body = [IdDto],
    responses(
        (status = 204, description = "Connected"),
        (status = 404, description = "Todo item missing or no author resolved")
    )
)]
pub async fn connect_authors(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<Vec<IdDto>>,
) -> Result<StatusCode, JsonApiError> {
    state.todo_items.connect_authors(id, &ids(&body)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/todoItems/{id}/authors", tag = "todoItems", operation_id = "disconnect_todo_item_authors",
    params(("id" = i64, Path, description = "Todo item id")),
    request_body = [IdDto],
    responses(
        (status = 204, description = "Disconnected"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn disconnect_authors(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<Vec<IdDto>>,
) -> Result<StatusCode, JsonApiError> {
    state.todo_items.disconnect_authors(id, &ids(&body)).await?;
    Ok(StatusCode::NO_CONTENT)
}
