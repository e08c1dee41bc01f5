use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};
use stockroom_api::{build_router, AppState, RouterOptions};
use stockroom_db::{Database, DbConfig};

struct TestServer {
    base_url: String,
    db: Database,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(options: RouterOptions) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let db = Database::new(DbConfig::in_memory())
            .await
            .expect("failed to open in-memory database");
        let app = build_router(Arc::new(AppState::new(db.clone())), &options);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            db,
            handle,
        }
    }

    async fn graphql(&self, client: &reqwest::Client, body: Value) -> Value {
        let res = client
            .post(format!("{}/graphql", self.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        res.json().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn playground_on() -> RouterOptions {
    RouterOptions {
        cors_allowed_origin: None,
        graphql_playground: true,
    }
}

#[tokio::test]
async fn health_reports_database_up() {
    let server = TestServer::spawn(playground_on()).await;

    let res = reqwest::get(format!("{}/health", server.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
    assert!(body["checked_at"].is_string());
}

#[tokio::test]
async fn health_is_unavailable_after_pool_closes() {
    let server = TestServer::spawn(playground_on()).await;
    server.db.close().await;

    let res = reqwest::get(format!("{}/health", server.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn mutation_round_trips_over_http() {
    let server = TestServer::spawn(playground_on()).await;
    let client = reqwest::Client::new();

    let created = server
        .graphql(
            &client,
            json!({
                "query": "mutation($name: String, $m: String, $a: Int) { createItem(name: $name, manufacturer: $m, amount: $a) { id name manufacturer amount } }",
                "variables": { "name": "Bolt", "m": "Acme", "a": 10 }
            }),
        )
        .await;
    assert_eq!(
        created["data"]["createItem"],
        json!({ "id": 1, "name": "Bolt", "manufacturer": "Acme", "amount": 10 })
    );

    let listed = server
        .graphql(&client, json!({ "query": "{ items { id amount } }" }))
        .await;
    assert_eq!(listed["data"]["items"], json!([{ "id": 1, "amount": 10 }]));

    let deleted = server
        .graphql(&client, json!({ "query": "mutation { deleteItems(ids: [1]) { count } }" }))
        .await;
    assert_eq!(deleted["data"]["deleteItems"]["count"], 1);
}

#[tokio::test]
async fn batched_requests_return_array() {
    let server = TestServer::spawn(playground_on()).await;
    let client = reqwest::Client::new();

    let body = server
        .graphql(
            &client,
            json!([
                { "query": "mutation { createItem(name: \"Nut\", manufacturer: \"Acme\", amount: 3) { id } }" },
                { "query": "{ items { name } }" }
            ]),
        )
        .await;

    let responses = body.as_array().expect("batched response is an array");
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["data"]["createItem"]["id"], 1);
    assert_eq!(responses[1]["data"]["items"], json!([{ "name": "Nut" }]));
}

#[tokio::test]
async fn validation_error_has_code_over_http() {
    let server = TestServer::spawn(playground_on()).await;
    let client = reqwest::Client::new();

    let body = server
        .graphql(
            &client,
            json!({ "query": "mutation { createItem(name: \"Bolt\", manufacturer: \"  \", amount: 1) { id } }" }),
        )
        .await;

    assert_eq!(body["errors"][0]["extensions"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn search_matches_accented_text_over_http() {
    let server = TestServer::spawn(playground_on()).await;
    let client = reqwest::Client::new();

    server
        .graphql(
            &client,
            json!({
                "query": "mutation($n: String, $m: String) { createItem(name: $n, manufacturer: $m) { id } }",
                "variables": { "n": "Écrou", "m": "Société Générale" }
            }),
        )
        .await;

    let body = server
        .graphql(
            &client,
            json!({
                "query": "query($s: String) { items(search: $s) { name } }",
                "variables": { "s": "SOCIÉTÉ" }
            }),
        )
        .await;
    assert_eq!(body["data"]["items"], json!([{ "name": "Écrou" }]));
}

#[tokio::test]
async fn schema_sdl_is_served() {
    let server = TestServer::spawn(playground_on()).await;

    let res = reqwest::get(format!("{}/schema.graphql", server.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let sdl = res.text().await.unwrap();
    assert!(sdl.contains("deleteItems(ids: [Int!]!): BatchPayload!"));
}

#[tokio::test]
async fn playground_can_be_disabled() {
    let server = TestServer::spawn(playground_on()).await;
    let res = reqwest::get(format!("{}/graphql", server.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("graphiql"));

    let server = TestServer::spawn(RouterOptions {
        cors_allowed_origin: None,
        graphql_playground: false,
    })
    .await;
    let res = reqwest::get(format!("{}/graphql", server.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn cors_allows_only_configured_origin() {
    let server = TestServer::spawn(RouterOptions {
        cors_allowed_origin: Some("http://localhost:9000".to_string()),
        graphql_playground: true,
    })
    .await;
    let client = reqwest::Client::new();

    let preflight = |origin: &'static str| {
        client
            .request(reqwest::Method::OPTIONS, format!("{}/graphql", server.base_url))
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .send()
    };

    let allowed = preflight("http://localhost:9000").await.unwrap();
    assert_eq!(
        allowed
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string()),
        Some("http://localhost:9000".to_string())
    );

    let denied = preflight("http://evil.example").await.unwrap();
    assert!(denied.headers().get("access-control-allow-origin").is_none());
}
