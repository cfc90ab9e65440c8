use axum::http::StatusCode;
use axum_test::TestServer;
use magazine_gateway::config::GatewayConfig;
use magazine_gateway::http::{build_router, AppState};
use magazine_gateway::lifecycle::MagazineSystem;
use serde_json::{json, Value};

fn test_config() -> GatewayConfig {
    GatewayConfig {
        environment: "Test".to_string(),
        ..GatewayConfig::default()
    }
}

fn start(config: &GatewayConfig) -> (MagazineSystem, TestServer) {
    let system = MagazineSystem::start(&config.actor_system).expect("Failed to start system");
    let router = build_router(AppState::new(&system, config), config);
    let server = TestServer::new(router).expect("Failed to start test server");
    (system, server)
}

#[tokio::test]
async fn test_default_route() {
    let (_system, server) = start(&test_config());

    let home = server.get("/").await;
    home.assert_status_ok();
    let body: Value = home.json();
    assert_eq!(body["controller"], "Home");
    assert_eq!(body["action"], "Index");
    assert_eq!(body["environment"], "Test");
    assert_eq!(body["swagger"], "/swagger/v1/swagger.json");
    assert!(body.get("id").is_none());

    let with_id: Value = server.get("/home/index/5").await.json();
    assert_eq!(with_id["id"], "5");

    server.get("/Home").await.assert_status_ok();
    server.get("/articles/list").await.assert_status(StatusCode::NOT_FOUND);
    let too_deep = server.get("/home/index/5/more").await;
    too_deep.assert_status(StatusCode::NOT_FOUND);
    assert!(too_deep.json::<Value>()["message"].is_string());
}

#[tokio::test]
async fn test_swagger_document() {
    let (_system, server) = start(&test_config());

    let response = server.get("/swagger/v1/swagger.json").await;
    response.assert_status_ok();
    let doc: Value = response.json();
    assert_eq!(doc["info"]["title"], "Magazine Website API");
    assert_eq!(doc["info"]["version"], "v1");
    assert!(doc["paths"]["/api/categories/{id}"].is_object());
}

#[tokio::test]
async fn test_status_goes_down_when_stopping() {
    let (system, server) = start(&test_config());

    let up = server.get("/status").await;
    up.assert_status_ok();
    let body: Value = up.json();
    assert_eq!(body["status"], "Up");
    assert_eq!(body["state"], "Running");
    assert_eq!(body["service"], "Magazine Website API");

    system.lifecycle().begin_stopping();

    let down = server.get("/status").await;
    down.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = down.json();
    assert_eq!(body["status"], "Down");
    assert_eq!(body["state"], "Stopping");
}

#[tokio::test]
async fn test_category_crud() {
    let (_system, server) = start(&test_config());

    let created = server
        .post("/api/categories")
        .json(&json!({ "name": " Culture ", "description": "Arts and books" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    assert_eq!(created.header("location"), "/api/categories/1");
    let culture: Value = created.json();
    assert_eq!(culture["name"], "Culture");
    assert_eq!(culture["enabled"], true);
    assert!(culture["createdAt"].is_string());
    // Absent optionals are left out of the body.
    assert!(culture.get("parentId").is_none());
    assert!(culture.get("updatedAt").is_none());

    let books: Value = server
        .post("/api/categories")
        .json(&json!({ "name": "Books", "parentId": 1 }))
        .await
        .json();
    assert_eq!(books["parentId"], 1);

    let children: Value = server.get("/api/categories/1/children").await.json();
    assert_eq!(children.as_array().map(Vec::len), Some(1));

    let listed: Value = server
        .get("/api/categories")
        .add_query_param("parentId", 1)
        .await
        .json();
    assert_eq!(listed[0]["name"], "Books");

    let renamed = server
        .put("/api/categories/2")
        .json(&json!({ "name": "Literature", "parentId": null }))
        .await;
    renamed.assert_status_ok();
    let renamed: Value = renamed.json();
    assert_eq!(renamed["name"], "Literature");
    assert!(renamed.get("parentId").is_none());
    assert!(renamed["updatedAt"].is_string());

    let disabled: Value = server.post("/api/categories/2/disable").await.json();
    assert_eq!(disabled, json!({ "id": 2, "enabled": false, "changed": true }));

    server
        .delete("/api/categories/2")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get("/api/categories/2")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_errors() {
    let (_system, server) = start(&test_config());

    let blank = server
        .post("/api/categories")
        .json(&json!({ "name": "  " }))
        .await;
    blank.assert_status(StatusCode::BAD_REQUEST);
    assert!(blank.json::<Value>()["message"].is_string());

    server
        .post("/api/categories")
        .json(&json!({ "name": "Orphan", "parentId": 42 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/categories")
        .text("not json")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .get("/api/categories/abc")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let missing = server.get("/api/categories/7").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        missing.json::<Value>(),
        json!({ "message": "Category not found: category_7" })
    );

    server
        .post("/api/categories")
        .json(&json!({ "name": "Parent" }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/categories")
        .json(&json!({ "name": "Child", "parentId": 1 }))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .delete("/api/categories/1")
        .await
        .assert_status(StatusCode::CONFLICT);
    server
        .put("/api/categories/1")
        .json(&json!({ "parentId": 2 }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_graphql_query() {
    let (system, server) = start(&test_config());
    let news = system
        .commander()
        .create(magazine_gateway::model::CategoryCreate::new("News"))
        .await
        .unwrap();
    system
        .commander()
        .create(magazine_gateway::model::CategoryCreate::new("World").under(news.id))
        .await
        .unwrap();

    let response = server
        .post("/graphql")
        .json(&json!({ "query": "{ categories { id name parentId children { name } } }" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body.get("errors").is_none(), "{body}");
    let categories = &body["data"]["categories"];
    assert_eq!(categories[0]["name"], "News");
    assert_eq!(categories[0]["children"][0]["name"], "World");
    assert_eq!(categories[1]["parentId"], 1);

    let single: Value = server
        .post("/graphql")
        .json(&json!({ "query": "{ category(id: 99) { name } }" }))
        .await
        .json();
    assert_eq!(single["data"]["category"], Value::Null);

    let playground = server.get("/graphql").await;
    playground.assert_status_ok();
    assert!(playground.text().contains("graphiql"));
}

#[tokio::test]
async fn test_json_indentation_follows_config() {
    let (_system, server) = start(&test_config());
    let indented = server.get("/status").await.text();
    assert!(indented.contains("\n  \"status\": \"Up\""), "{indented}");

    let mut compact_config = test_config();
    compact_config.json.indented = false;
    let (_compact_system, compact_server) = start(&compact_config);
    let compact = compact_server.get("/status").await.text();
    assert!(!compact.contains('\n'), "{compact}");
    assert!(compact.starts_with("{\"status\":\"Up\""));
}
