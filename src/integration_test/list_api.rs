use super::test_util::{TestDatabase, body_bytes, body_json, send};
use axum::http::{Method, StatusCode, header};
use serde_json::json;

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn work_list_lifecycle() {
    let test_db = TestDatabase::create().await;
    let router = test_db.router();

    let created_list = send(
        &router,
        Method::POST,
        "/lists/create",
        Some(json!({ "name": "Work" })),
    )
    .await;
    assert_eq!(StatusCode::OK, created_list.status());
    assert_eq!(json!({ "id": 1, "name": "Work" }), body_json(created_list).await);

    let created_todo = send(
        &router,
        Method::POST,
        "/todos/create",
        Some(json!({ "description": "Write spec", "list_id": 1 })),
    )
    .await;
    assert_eq!(StatusCode::OK, created_todo.status());
    assert_eq!(
        json!({ "id": 1, "complete": false, "description": "Write spec" }),
        body_json(created_todo).await
    );

    let completed = send(
        &router,
        Method::POST,
        "/todos/1/set-completed",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(StatusCode::OK, completed.status());
    assert!(body_bytes(completed).await.is_empty());

    let page = body_json(send(&router, Method::GET, "/lists/1", None).await).await;
    assert_eq!(
        json!({
            "lists": [{ "id": 1, "name": "Work" }],
            "active_list": { "id": 1, "name": "Work" },
            "todos": [{ "id": 1, "complete": true, "description": "Write spec" }],
        }),
        page
    );

    let deleted = send(&router, Method::DELETE, "/lists/1/delete", None).await;
    assert_eq!(StatusCode::OK, deleted.status());
    assert_eq!(json!({ "success": true }), body_json(deleted).await);

    let page_after_delete = body_json(send(&router, Method::GET, "/lists/1", None).await).await;
    assert_eq!(json!([]), page_after_delete["todos"]);
    assert!(page_after_delete["active_list"].is_null());

    test_db.teardown().await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn page_shows_created_list() {
    let test_db = TestDatabase::create().await;
    let router = test_db.router();

    send(
        &router,
        Method::POST,
        "/lists/create",
        Some(json!({ "name": "Work" })),
    )
    .await;
    let groceries = body_json(
        send(
            &router,
            Method::POST,
            "/lists/create",
            Some(json!({ "name": "Groceries" })),
        )
        .await,
    )
    .await;
    let groceries_id = groceries["id"].as_i64().expect("list ID was not a number");

    let request = axum::http::Request::builder()
        .uri(format!("/lists/{groceries_id}"))
        .body(axum::body::Body::empty())
        .expect("Could not build test request");
    let response = tower::ServiceExt::oneshot(router.clone(), request)
        .await
        .expect("Router failed to produce a response");
    assert_eq!(StatusCode::OK, response.status());
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .is_ok_and(|content_type| content_type.starts_with("text/html"))
    );

    let html = String::from_utf8(body_bytes(response).await).expect("Page was not UTF-8");
    assert!(html.contains("<title>Todo App: Groceries</title>"));
    assert!(html.contains("Work"));

    let page = body_json(send(&router, Method::GET, &format!("/lists/{groceries_id}"), None).await).await;
    assert_eq!(json!({ "id": groceries_id, "name": "Groceries" }), page["active_list"]);
    assert_eq!(2, page["lists"].as_array().map(Vec::len).unwrap_or_default());

    test_db.teardown().await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn completing_a_list_leaves_other_lists_alone() {
    let test_db = TestDatabase::create().await;
    let router = test_db.router();

    for name in ["Work", "Home"] {
        send(&router, Method::POST, "/lists/create", Some(json!({ "name": name }))).await;
    }
    for (description, list_id) in [("Write spec", 1), ("Do laundry", 2), ("Review code", 1)] {
        send(
            &router,
            Method::POST,
            "/todos/create",
            Some(json!({ "description": description, "list_id": list_id })),
        )
        .await;
    }

    let completed = send(&router, Method::POST, "/lists/1/set-completed", None).await;
    assert_eq!(StatusCode::OK, completed.status());
    assert!(body_bytes(completed).await.is_empty());

    let work_page = body_json(send(&router, Method::GET, "/lists/1", None).await).await;
    assert_eq!(
        json!([
            { "id": 1, "complete": true, "description": "Write spec" },
            { "id": 3, "complete": true, "description": "Review code" },
        ]),
        work_page["todos"]
    );

    let home_page = body_json(send(&router, Method::GET, "/lists/2", None).await).await;
    assert_eq!(
        json!([{ "id": 2, "complete": false, "description": "Do laundry" }]),
        home_page["todos"]
    );

    test_db.teardown().await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn missing_lists_are_404s() {
    let test_db = TestDatabase::create().await;
    let router = test_db.router();

    let deleted = send(&router, Method::DELETE, "/lists/42/delete", None).await;
    assert_eq!(StatusCode::NOT_FOUND, deleted.status());
    assert_eq!("not_found", body_json(deleted).await["error_code"]);

    let completed = send(&router, Method::POST, "/lists/42/set-completed", None).await;
    assert_eq!(StatusCode::NOT_FOUND, completed.status());

    test_db.teardown().await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn index_redirects_to_first_list() {
    let test_db = TestDatabase::create().await;
    let router = test_db.router();

    let response = send(&router, Method::GET, "/", None).await;
    assert_eq!(StatusCode::FOUND, response.status());
    assert_eq!("/lists/1", response.headers()[header::LOCATION]);

    test_db.teardown().await;
}
