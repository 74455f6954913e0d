use std::net::SocketAddr;

use axum::Router;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::AppState;

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }
}

/// Router on an ephemeral port backed by a private in-memory database.
async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::Migrator::up(&db, None).await?;

    let app: Router = routes::build_router(AppState::new(db), CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().build().expect("reqwest client")
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_workspace_todo_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(app.url("/api/workspaces")).json(&json!({"id": 1, "name": "W1"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.headers()["location"], "/api/workspaces/1");

    let res = c.post(app.url("/api/todoItems")).json(&json!({"id": 10, "title": "first"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.post(app.url("/api/workspaces/1/todoItems")).json(&json!([{"id": 10}])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let listed: Vec<Value> = c.get(app.url("/api/workspaces/1/todoItems")).send().await?.json().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], 10);
    assert_eq!(listed[0]["workspaceId"], 1);

    let res = c.delete(app.url("/api/workspaces/1/todoItems")).json(&json!([{"id": 10}])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let listed: Vec<Value> = c.get(app.url("/api/workspaces/1/todoItems")).send().await?.json().await?;
    assert!(listed.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_status_mapping() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.url("/api/authors/999")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Not Found");

    let res = c.post(app.url("/api/authors")).json(&json!({"id": 1, "name": "Ada"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let res = c.post(app.url("/api/authors")).json(&json!({"id": 1, "name": "Ada"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    let res = c.post(app.url("/api/authors")).json(&json!({"name": "  "})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.patch(app.url("/api/authors/1")).json(&json!({"version": 1, "name": "Ada L."})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.patch(app.url("/api/authors/1")).json(&json!({"version": 1, "name": "Ada K."})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    let res = c.post(app.url("/api/authors/1/todoItems")).json(&json!([{"id": 404}])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(app.url("/api/authors/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.delete(app.url("/api/authors/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_find_many_query_string() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    for (id, title, done) in [(1, "b", false), (2, "a", true), (3, "c", false)] {
        let res = c
            .post(app.url("/api/todoItems"))
            .json(&json!({"id": id, "title": title, "isComplete": done}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let filter = json!({"compare": {"field": "isComplete", "op": {"equals": false}}}).to_string();
    let res = c
        .get(app.url("/api/todoItems"))
        .query(&[("where", filter.as_str()), ("sortBy", "title:desc"), ("take", "1")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let items: Vec<Value> = res.json().await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 3);

    let res = c.get(app.url("/api/todoItems")).query(&[("sortBy", "colour")]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.get(app.url("/api/todoItems")).query(&[("where", "{not json")]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_input_is_a_json_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let res = c.post(app.url("/api/workspaces")).json(&json!({"id": 1, "name": "W1"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.patch(app.url("/api/workspaces/1")).json(&json!({"name": "x"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Validation Error");
    assert!(body["detail"].as_str().unwrap_or_default().contains("version"), "{body}");

    let res = c.post(app.url("/api/workspaces")).json(&json!({"id": "abc"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Validation Error");

    let res = c.get(app.url("/api/workspaces/one")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.get(app.url("/api/workspaces")).query(&[("take", "-1")]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.post(app.url("/api/workspaces/1/todoItems")).json(&json!({"id": 10})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_skip_only_and_null_name() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    for id in 1..=4 {
        let res = c.post(app.url("/api/workspaces")).json(&json!({"id": id, "name": "w"})).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let res = c.get(app.url("/api/workspaces")).query(&[("skip", "2")]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let listed: Vec<Value> = res.json().await?;
    assert_eq!(listed.iter().map(|w| w["id"].as_i64()).collect::<Vec<_>>(), vec![Some(3), Some(4)]);

    let res = c.patch(app.url("/api/workspaces/1")).json(&json!({"version": 1, "name": null})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let ws: Value = c.get(app.url("/api/workspaces/1")).send().await?.json().await?;
    assert!(ws["name"].is_null());
    assert_eq!(ws["version"], 2);
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc: Value = res.json().await?;
    assert!(doc["paths"]["/api/todoItems/{id}/authors"].is_object());
    Ok(())
}
