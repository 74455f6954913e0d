use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use service::author::domain::{Author, CreateAuthor, UpdateAuthor};
use service::todo_item::domain::TodoItem;
use tracing::info;

use super::dto::{ids, FindManyQuery, IdDto};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/authors", tag = "authors",
    params(FindManyQuery),
    responses(
        (status = 200, description = "Matching authors", body = [crate::openapi::AuthorDoc]),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn authors(State(state): State<AppState>, ApiQuery(q): ApiQuery<FindManyQuery>) -> Result<Json<Vec<Author>>, JsonApiError> {
    let filter = q.into_find_many()?;
    let authors = state.authors.authors(&filter).await?;
    info!(count = authors.len(), "list authors");
    Ok(Json(authors))
}

#[utoipa::path(
    get, path = "/api/authors/{id}", tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AuthorDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn author(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<Json<Author>, JsonApiError> {
    Ok(Json(state.authors.author(id).await?))
}

#[utoipa::path(
    post, path = "/api/authors", tag = "authors",
    request_body = crate::openapi::CreateAuthorDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AuthorDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Id already taken")
    )
)]
pub async fn create_author(State(state): State<AppState>, ApiJson(input): ApiJson<CreateAuthor>) -> Result<impl IntoResponse, JsonApiError> {
    let created = state.authors.create_author(input).await?;
    info!(id = created.id, "created author");
    let location = format!("/api/authors/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    patch, path = "/api/authors/{id}", tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    request_body = crate::openapi::UpdateAuthorDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Stale version")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<UpdateAuthor>,
) -> Result<StatusCode, JsonApiError> {
    state.authors.update_author(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/authors/{id}", tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_author(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, JsonApiError> {
    state.authors.delete_author(id).await?;
    info!(id, "deleted author");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/authors/{id}/todoItems", tag = "authors", operation_id = "author_todo_items",
    params(("id" = i64, Path, description = "Author id"), FindManyQuery),
    responses(
        (status = 200, description = "Todo items of the author", body = [crate::openapi::TodoItemDoc]),
        (status = 404, description = "Not Found")
    )
)]
pub async fn todo_items(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(q): ApiQuery<FindManyQuery>,
) -> Result<Json<Vec<TodoItem>>, JsonApiError> {
    let filter = q.into_find_many()?;
    Ok(Json(state.authors.todo_items(id, &filter).await?))
}

#[utoipa::path(
    post, path = "/api/authors/{id}/todoItems", tag = "authors", operation_id = "connect_author_todo_items",
    params(("id" = i64, Path, description = "Author id")),
    request_body = [IdDto],
    responses(
        (status = 204, description = "Connected"),
        (status = 404, description = "Author missing or no todo item resolved")
    )
)]
pub async fn connect_todo_items(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<Vec<IdDto>>,
) -> Result<StatusCode, JsonApiError> {
    state.authors.connect_todo_items(id, &ids(&body)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/authors/{id}/todoItems", tag = "authors", operation_id = "disconnect_author_todo_items",
    params(("id" = i64, Path, description = "Author id")),
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
    state.authors.disconnect_todo_items(id, &ids(&body)).await?;
    Ok(StatusCode::NO_CONTENT)
}
