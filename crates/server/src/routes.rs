pub mod authors;
pub mod dto;
pub mod extract;
pub mod todo_items;
pub mod workspaces;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router: health, the three entity collections and the OpenAPI document.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let api = Router::new()
        .route("/api/authors", get(authors::authors).post(authors::create_author))
        .route(
            "/api/authors/:id",
            get(authors::author).patch(authors::update_author).delete(authors::delete_author),
        )
        .route(
            "/api/authors/:id/todoItems",
            get(authors::todo_items).post(authors::connect_todo_items).delete(authors::disconnect_todo_items),
        )
        .route("/api/todoItems", get(todo_items::todo_items).post(todo_items::create_todo_item))
        .route(
            "/api/todoItems/:id",
            get(todo_items::todo_item).patch(todo_items::update_todo_item).delete(todo_items::delete_todo_item),
        )
        .route(
            "/api/todoItems/:id/authors",
            get(todo_items::authors).post(todo_items::connect_authors).delete(todo_items::disconnect_authors),
        )
        .route("/api/workspaces", get(workspaces::workspaces).post(workspaces::create_workspace))
        .route(
            "/api/workspaces/:id",
            get(workspaces::workspace).patch(workspaces::update_workspace).delete(workspaces::delete_workspace),
        )
        .route(
            "/api/workspaces/:id/todoItems",
            get(workspaces::todo_items)
                .post(workspaces::connect_todo_items)
                .delete(workspaces::disconnect_todo_items),
        );

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request carrying method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
