//! Registration, login and account management.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_creates_unverified_user_and_mails_code() {
    let app = TestApp::new();

    let res = app
        .request(
            "POST",
            "/api/user",
            Some(json!({
                "first_name": "Lucia",
                "last_name": "Reyes",
                "email": "Lucia@Example.com",
                "password": PASSWORD,
                "phone": "5551234",
            })),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["user"]["email"], "lucia@example.com");
    assert_eq!(res.body["user"]["verified"], false);
    assert_eq!(res.body["user"]["is_admin"], false);
    assert_eq!(res.body["token_expires_in"], 600);
    assert_eq!(res.body["code_sent"], true);
    assert!(res.body["user"].get("password").is_none());
    assert!(res.body["user"].get("password_hash").is_none());

    let code = app.mailer.last_code_for("lucia@example.com").unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_register_duplicates_map_to_distinct_conflicts() {
    let app = TestApp::new();
    let body = |email: &str, phone: &str| {
        json!({
            "first_name": "Dup",
            "last_name": "Licate",
            "email": email,
            "password": PASSWORD,
            "phone": phone,
        })
    };

    let first = app
        .request("POST", "/api/user", Some(body("dup@example.com", "111")), None)
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let same_email = app
        .request("POST", "/api/user", Some(body("DUP@example.com", "222")), None)
        .await;
    assert_eq!(same_email.status, StatusCode::CONFLICT);
    assert!(same_email.body["message"].as_str().unwrap().contains("email"));

    let same_phone = app
        .request("POST", "/api/user", Some(body("other@example.com", "111")), None)
        .await;
    assert_eq!(same_phone.status, StatusCode::CONFLICT);
    assert!(same_phone.body["message"].as_str().unwrap().contains("phone"));
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = TestApp::new();

    let bad_email = app
        .request(
            "POST",
            "/api/user",
            Some(json!({
                "first_name": "A",
                "last_name": "B",
                "email": "nope",
                "password": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.body["error"], "VALIDATION_ERROR");
    assert!(bad_email.body["details"].get("email").is_some());

    let weak = app
        .request(
            "POST",
            "/api/user",
            Some(json!({
                "first_name": "A",
                "last_name": "B",
                "email": "weak@example.com",
                "password": "password",
            })),
            None,
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_survives_mail_outage() {
    let app = TestApp::with_failing_mailer();

    let res = app
        .request(
            "POST",
            "/api/user",
            Some(json!({
                "first_name": "Offline",
                "last_name": "Mail",
                "email": "offline@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["code_sent"], false);
}

#[tokio::test]
async fn test_login_requires_verification_then_succeeds() {
    let app = TestApp::new();
    app.register("Mario", "mario@example.com").await;

    let credentials = json!({ "email": "mario@example.com", "password": PASSWORD });
    let early = app
        .request("POST", "/api/login", Some(credentials.clone()), None)
        .await;
    assert_eq!(early.status, StatusCode::FORBIDDEN);

    app.verify("mario@example.com").await;

    let res = app.request("POST", "/api/login", Some(credentials), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["token_type"], "Bearer");
    assert_eq!(res.body["user"]["verified"], true);
    assert!(res.body["token"].as_str().unwrap().split('.').count() == 3);
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = TestApp::new();
    app.user("Ines", "ines@example.com").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "email": "ines@example.com", "password": "not-the-password" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "email": "ghost@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], unknown.body["message"]);
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = TestApp::new();
    let (id, token) = app.user("Sofia", "sofia@example.com").await;

    let missing = app.request("GET", "/api/user/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/api/user/me", None, Some("not.a.jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let me = app.request("GET", "/api/user/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["id"], id);
}

#[tokio::test]
async fn test_user_listing_is_admin_only() {
    let app = TestApp::new();
    let (_, user_token) = app.user("Pablo", "pablo@example.com").await;
    let (_, admin_token) = app.admin("root@example.com").await;

    let denied = app.request("GET", "/api/user", None, Some(&user_token)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let listed = app.request("GET", "/api/user", None, Some(&admin_token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_changes_existing_record() {
    let app = TestApp::new();
    let (id, token) = app.user("Elena", "elena@example.com").await;
    let (other, _) = app.user("Omar", "omar@example.com").await;

    let res = app
        .request(
            "PATCH",
            &format!("/api/user/{id}"),
            Some(json!({ "first_name": "Helena", "phone": "999" })),
            Some(&token),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["id"], id);
    assert_eq!(res.body["first_name"], "Helena");
    assert_eq!(res.body["phone"], "999");

    let cleared = app
        .request(
            "PUT",
            &format!("/api/user/{id}"),
            Some(json!({ "phone": null })),
            Some(&token),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body["phone"].is_null());

    let foreign = app
        .request(
            "PATCH",
            &format!("/api/user/{other}"),
            Some(json!({ "first_name": "Hacked" })),
            Some(&token),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);

    let empty = app
        .request("PATCH", &format!("/api/user/{id}"), Some(json!({})), Some(&token))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_deletes_users_but_not_itself() {
    let app = TestApp::new();
    let (victim, victim_token) = app.user("Tomas", "tomas@example.com").await;
    let (admin_id, admin_token) = app.admin("boss@example.com").await;

    let own = app
        .request("DELETE", &format!("/api/user/{admin_id}"), None, Some(&admin_token))
        .await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);

    let res = app
        .request("DELETE", &format!("/api/user/{victim}"), None, Some(&admin_token))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let stale = app
        .request("GET", "/api/user/me", None, Some(&victim_token))
        .await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);

    let invalid = app
        .request("GET", "/api/user/abc", None, Some(&admin_token))
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let ready = app.request("GET", "/api/health/ready", None, None).await;
    assert_eq!(ready.status, StatusCode::OK);
}
