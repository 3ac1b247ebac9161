//! Profiles.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_upsert_defaults_from_user_then_updates() {
    let app = TestApp::new();
    let (id, token) = app.user("Marta", "marta@example.com").await;

    let missing = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let created = app
        .request("PUT", "/api/profile", Some(json!({ "photo": "me.png" })), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["user_id"], id);
    assert_eq!(created.body["first_name"], "Marta");
    assert_eq!(created.body["email"], "marta@example.com");
    assert_eq!(created.body["photo"], "me.png");

    let replaced = app
        .request("PUT", "/api/profile", Some(json!({ "last_name": "Vidal" })), Some(&token))
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(replaced.body["id"], created.body["id"]);
    assert_eq!(replaced.body["last_name"], "Vidal");
    assert_eq!(replaced.body["photo"], "me.png");

    let mine = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body["last_name"], "Vidal");
}

#[tokio::test]
async fn test_profile_access_rules() {
    let app = TestApp::new();
    let (owner, owner_token) = app.user("Nico", "nico@example.com").await;
    let (_, other_token) = app.user("Olga", "olga@example.com").await;
    let (_, admin_token) = app.admin("admin@example.com").await;

    let created = app
        .request("PUT", "/api/profile", Some(json!({})), Some(&owner_token))
        .await;
    let profile_uri = format!("/api/profile/{}", created.body["id"]);
    let by_user_uri = format!("/api/profile/user/{owner}");

    let snooping = app.request("GET", &by_user_uri, None, Some(&other_token)).await;
    assert_eq!(snooping.status, StatusCode::FORBIDDEN);

    let as_admin = app.request("GET", &by_user_uri, None, Some(&admin_token)).await;
    assert_eq!(as_admin.status, StatusCode::OK);

    let foreign_edit = app
        .request("PATCH", &profile_uri, Some(json!({ "photo": "x.png" })), Some(&other_token))
        .await;
    assert_eq!(foreign_edit.status, StatusCode::NOT_FOUND);

    let own_edit = app
        .request(
            "PATCH",
            &profile_uri,
            Some(json!({ "phone": "12345", "photo": "new.png" })),
            Some(&owner_token),
        )
        .await;
    assert_eq!(own_edit.status, StatusCode::OK);
    assert_eq!(own_edit.body["phone"], "12345");

    let cleared = app
        .request("PATCH", &profile_uri, Some(json!({ "phone": null })), Some(&admin_token))
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body["phone"].is_null());

    let too_long = app
        .request(
            "PATCH",
            &profile_uri,
            Some(json!({ "phone": "1234567890123456" })),
            Some(&owner_token),
        )
        .await;
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);
}
