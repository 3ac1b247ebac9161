//! Todo lists and tasks.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_lists_embed_their_tasks() {
    let app = TestApp::new();

    let list = app
        .request("POST", "/api/todo-lists", Some(json!({ "name": "Groceries" })), None)
        .await;
    assert_eq!(list.status, StatusCode::CREATED);
    assert_eq!(list.body["tasks"], json!([]));
    let list_id = list.body["id"].as_i64().unwrap();

    let task = app
        .request(
            "POST",
            "/api/tasks",
            Some(json!({ "todo_list_id": list_id, "title": "Milk", "due_date": "2030-01-15" })),
            None,
        )
        .await;
    assert_eq!(task.status, StatusCode::CREATED);
    assert_eq!(task.body["completed"], false);
    assert_eq!(task.body["description"], "");
    assert_eq!(task.body["due_date"], "2030-01-15");

    let fetched = app
        .request("GET", &format!("/api/todo-lists/{list_id}"), None, None)
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["name"], "Groceries");
    assert_eq!(fetched.body["tasks"][0]["title"], "Milk");

    let all = app.request("GET", "/api/todo-lists", None, None).await;
    assert_eq!(all.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_task_filter_update_and_cascade() {
    let app = TestApp::new();
    let home = app
        .request("POST", "/api/todo-lists", Some(json!({ "name": "Home" })), None)
        .await;
    let work = app
        .request("POST", "/api/todo-lists", Some(json!({ "name": "Work" })), None)
        .await;
    let home_id = home.body["id"].as_i64().unwrap();
    let work_id = work.body["id"].as_i64().unwrap();

    let task = app
        .request(
            "POST",
            "/api/tasks",
            Some(json!({ "todo_list_id": home_id, "title": "Paint", "due_date": "2030-05-01" })),
            None,
        )
        .await;
    app.request(
        "POST",
        "/api/tasks",
        Some(json!({ "todo_list_id": work_id, "title": "Report" })),
        None,
    )
    .await;
    let task_uri = format!("/api/tasks/{}", task.body["id"]);

    let filtered = app
        .request("GET", &format!("/api/tasks?todo_list_id={home_id}"), None, None)
        .await;
    assert_eq!(filtered.body.as_array().unwrap().len(), 1);
    let everything = app.request("GET", "/api/tasks", None, None).await;
    assert_eq!(everything.body.as_array().unwrap().len(), 2);

    let updated = app
        .request(
            "PATCH",
            &task_uri,
            Some(json!({ "completed": true, "due_date": null })),
            None,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["completed"], true);
    assert!(updated.body["due_date"].is_null());
    assert_eq!(updated.body["title"], "Paint");

    let renamed = app
        .request(
            "PATCH",
            &format!("/api/todo-lists/{home_id}"),
            Some(json!({ "name": "House" })),
            None,
        )
        .await;
    assert_eq!(renamed.body["name"], "House");

    let deleted = app
        .request("DELETE", &format!("/api/todo-lists/{home_id}"), None, None)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let orphan = app.request("GET", &task_uri, None, None).await;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_todo_validation() {
    let app = TestApp::new();

    let blank = app
        .request("POST", "/api/todo-lists", Some(json!({ "name": "" })), None)
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let no_list = app
        .request(
            "POST",
            "/api/tasks",
            Some(json!({ "todo_list_id": 77, "title": "Lost" })),
            None,
        )
        .await;
    assert_eq!(no_list.status, StatusCode::NOT_FOUND);

    let bad_filter = app
        .request("GET", "/api/tasks?todo_list_id=abc", None, None)
        .await;
    assert_eq!(bad_filter.status, StatusCode::BAD_REQUEST);

    let missing = app.request("DELETE", "/api/tasks/5", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
