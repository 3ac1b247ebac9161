//! Claims and requests.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_defaults_to_pending_for_caller() {
    let app = TestApp::new();
    let (id, token) = app.user("Carla", "carla@example.com").await;

    let res = app
        .request(
            "POST",
            "/api/claim",
            Some(json!({ "subject": "Broken meter", "description": "Reads zero" })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["user_id"], id);
    assert_eq!(res.body["status"], "pending");
    assert_eq!(res.body["subject"], "Broken meter");
}

#[tokio::test]
async fn test_create_requires_auth_and_subject() {
    let app = TestApp::new();
    let (_, token) = app.user("Dario", "dario@example.com").await;

    let anonymous = app
        .request("POST", "/api/request", Some(json!({ "subject": "x" })), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let blank = app
        .request("POST", "/api/request", Some(json!({ "subject": "" })), Some(&token))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let too_long = app
        .request(
            "POST",
            "/api/request",
            Some(json!({ "subject": "s".repeat(501) })),
            Some(&token),
        )
        .await;
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_admins_choose_status_or_owner() {
    let app = TestApp::new();
    let (user_id, token) = app.user("Ema", "ema@example.com").await;
    let (_, admin_token) = app.admin("admin@example.com").await;

    let status = app
        .request(
            "POST",
            "/api/claim",
            Some(json!({ "subject": "Leak", "status": "completed" })),
            Some(&token),
        )
        .await;
    assert_eq!(status.status, StatusCode::FORBIDDEN);

    let on_behalf = app
        .request(
            "POST",
            "/api/claim",
            Some(json!({ "subject": "Leak", "status": "En proceso", "user": user_id })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(on_behalf.status, StatusCode::CREATED);
    assert_eq!(on_behalf.body["user_id"], user_id);
    assert_eq!(on_behalf.body["status"], "in_progress");

    let bad_owner = app
        .request(
            "POST",
            "/api/claim",
            Some(json!({ "subject": "Leak", "user": "abc" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(bad_owner.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_visibility_and_listing() {
    let app = TestApp::new();
    let (ana, ana_token) = app.user("Ana", "ana@example.com").await;
    let (_, ben_token) = app.user("Ben", "ben@example.com").await;
    let (_, admin_token) = app.admin("admin@example.com").await;

    let created = app
        .request("POST", "/api/claim", Some(json!({ "subject": "Ana's" })), Some(&ana_token))
        .await;
    let claim_id = created.body["id"].as_i64().unwrap();
    app.request("POST", "/api/claim", Some(json!({ "subject": "Ben's" })), Some(&ben_token))
        .await;

    let hidden = app
        .request("GET", &format!("/api/claim/{claim_id}"), None, Some(&ben_token))
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let as_admin = app
        .request("GET", &format!("/api/claim/{claim_id}"), None, Some(&admin_token))
        .await;
    assert_eq!(as_admin.status, StatusCode::OK);

    let other_table = app
        .request("GET", &format!("/api/request/{claim_id}"), None, Some(&ana_token))
        .await;
    assert_eq!(other_table.status, StatusCode::NOT_FOUND);

    let own = app.request("GET", "/api/claim", None, Some(&ana_token)).await;
    assert_eq!(own.body.as_array().unwrap().len(), 1);

    let all = app.request("GET", "/api/claim", None, Some(&admin_token)).await;
    assert_eq!(all.body.as_array().unwrap().len(), 2);

    let filtered = app
        .request("GET", "/api/claim?status=Pendiente", None, Some(&admin_token))
        .await;
    assert_eq!(filtered.body.as_array().unwrap().len(), 2);

    let none = app
        .request("GET", "/api/claim?status=completed", None, Some(&admin_token))
        .await;
    assert!(none.body.as_array().unwrap().is_empty());

    let bad_filter = app
        .request("GET", "/api/claim?status=lost", None, Some(&admin_token))
        .await;
    assert_eq!(bad_filter.status, StatusCode::BAD_REQUEST);

    let by_user = app
        .request("GET", &format!("/api/claim/user/{ana}"), None, Some(&ana_token))
        .await;
    assert_eq!(by_user.status, StatusCode::OK);

    let snooping = app
        .request("GET", &format!("/api/claim/user/{ana}"), None, Some(&ben_token))
        .await;
    assert_eq!(snooping.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_rules() {
    let app = TestApp::new();
    let (_, token) = app.user("Fede", "fede@example.com").await;
    let (_, admin_token) = app.admin("admin@example.com").await;

    let created = app
        .request("POST", "/api/request", Some(json!({ "subject": "Need a form" })), Some(&token))
        .await;
    let id = created.body["id"].as_i64().unwrap();
    let uri = format!("/api/request/{id}");

    let edited = app
        .request("PATCH", &uri, Some(json!({ "description": "Form B-12" })), Some(&token))
        .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["description"], "Form B-12");
    assert_eq!(edited.body["subject"], "Need a form");

    let self_promoted = app
        .request("PATCH", &uri, Some(json!({ "status": "completed" })), Some(&token))
        .await;
    assert_eq!(self_promoted.status, StatusCode::FORBIDDEN);

    let resolved = app
        .request("PATCH", &uri, Some(json!({ "status": "completed" })), Some(&admin_token))
        .await;
    assert_eq!(resolved.status, StatusCode::OK);
    assert_eq!(resolved.body["status"], "completed");
}

#[tokio::test]
async fn test_delete() {
    let app = TestApp::new();
    let (_, token) = app.user("Gina", "gina@example.com").await;
    let (_, other_token) = app.user("Hugo", "hugo@example.com").await;

    let created = app
        .request("POST", "/api/claim", Some(json!({ "subject": "Noise" })), Some(&token))
        .await;
    let uri = format!("/api/claim/{}", created.body["id"]);

    let foreign = app.request("DELETE", &uri, None, Some(&other_token)).await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    let deleted = app.request("DELETE", &uri, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.request("GET", &uri, None, Some(&token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
