//! Verification code records, verification and resend.

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;

use resolution_database::VerificationRepository;
use resolution_entity::verification::CreateVerificationCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_issue_validates_user_reference() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin("admin@example.com").await;

    let non_numeric = app
        .request("POST", "/api/auth", Some(json!({ "user": "abc" })), Some(&admin_token))
        .await;
    assert_eq!(non_numeric.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request("POST", "/api/auth", Some(json!({ "user": 404 })), Some(&admin_token))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_issue_requires_owner_or_admin() {
    let app = TestApp::new();
    let target = app.register("Olga", "olga@example.com").await;
    let (_, token) = app.user("Pilar", "pilar@example.com").await;
    let mails = app.mailer.sent().len();

    let anonymous = app
        .request("POST", "/api/auth", Some(json!({ "user": target })), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let stranger = app
        .request("PUT", "/api/auth", Some(json!({ "user": target })), Some(&token))
        .await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);

    let record = VerificationRepository::find_by_user(&app.store, target)
        .await
        .unwrap()
        .unwrap();
    let hidden = app
        .request("PUT", &format!("/api/auth/{}", record.id), None, Some(&token))
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    assert_eq!(app.mailer.sent().len(), mails);
}

#[tokio::test]
async fn test_issue_replaces_previous_code() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin("admin@example.com").await;
    let id = app.register("Nora", "nora@example.com").await;
    let first = app.mailer.last_code_for("nora@example.com").unwrap();
    let mails = app.mailer.sent().len();

    let res = app
        .request(
            "POST",
            "/api/auth",
            Some(json!([{ "user": id.to_string() }])),
            Some(&admin_token),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["data"]["user_id"], id);
    assert!(res.body["data"].get("code").is_none());

    let stored = VerificationRepository::find_by_user(&app.store, id)
        .await
        .unwrap()
        .unwrap();
    let second = app.mailer.last_code_for("nora@example.com").unwrap();
    assert_eq!(stored.code, second);
    assert_eq!(app.mailer.sent().len(), mails + 1);

    if first != second {
        let stale = app
            .request(
                "POST",
                "/api/auth/verify",
                Some(json!({ "email": "nora@example.com", "code": first })),
                None,
            )
            .await;
        assert_eq!(stale.status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_reissue_reports_replace_or_create() {
    let app = TestApp::new();
    let id = app.register("Raul", "raul@example.com").await;
    let (_, admin_token) = app.admin("admin@example.com").await;

    let replaced = app
        .request("PUT", "/api/auth", Some(json!({ "user": id })), Some(&admin_token))
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    let record_id = replaced.body["data"]["id"].as_i64().unwrap();

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/auth/{record_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let created = app
        .request("PUT", "/api/auth", Some(json!({ "user": id })), Some(&admin_token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_regenerate_by_record_id() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin("admin@example.com").await;
    let id = app.register("Ivan", "ivan@example.com").await;
    let record = VerificationRepository::find_by_user(&app.store, id)
        .await
        .unwrap()
        .unwrap();
    let mails = app.mailer.sent().len();

    let res = app
        .request("PUT", &format!("/api/auth/{}", record.id), None, Some(&admin_token))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["id"], record.id);
    assert_eq!(app.mailer.sent().len(), mails + 1);

    let missing = app
        .request("PUT", "/api/auth/9999", None, Some(&admin_token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_record_listing_and_deletion_are_admin_only() {
    let app = TestApp::new();
    let (_, user_token) = app.user("Paz", "paz@example.com").await;
    app.register("Leo", "leo@example.com").await;
    let (_, admin_token) = app.admin("admin@example.com").await;

    let denied = app.request("GET", "/api/auth", None, Some(&user_token)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let listed = app.request("GET", "/api/auth", None, Some(&admin_token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let records = listed.body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].get("code").is_none());

    let record_id = records[0]["id"].as_i64().unwrap();
    let forbidden = app
        .request("DELETE", &format!("/api/auth/{record_id}"), None, Some(&user_token))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let gone = app
        .request("DELETE", "/api/auth/9999", None, Some(&admin_token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_verify_failure_modes() {
    let app = TestApp::new();
    let id = app.register("Eva", "eva@example.com").await;

    let unknown = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "email": "nobody@example.com", "code": "123456" })),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let code = app.mailer.last_code_for("eva@example.com").unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };
    let mismatch = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "email": "eva@example.com", "code": wrong })),
            None,
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);

    VerificationRepository::replace_for_user(
        &app.store,
        &CreateVerificationCode {
            user_id: id,
            code: "424242".into(),
            expires_at: Utc::now() - Duration::seconds(1),
        },
    )
    .await
    .unwrap();

    let expired = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "email": "eva@example.com", "code": "424242" })),
            None,
        )
        .await;
    assert_eq!(expired.status, StatusCode::BAD_REQUEST);
    assert!(
        VerificationRepository::find_by_user(&app.store, id)
            .await
            .unwrap()
            .is_none()
    );

    let no_code = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "email": "eva@example.com", "code": "424242" })),
            None,
        )
        .await;
    assert_eq!(no_code.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_success_consumes_code() {
    let app = TestApp::new();
    let id = app.register("Gael", "gael@example.com").await;
    app.verify("gael@example.com").await;

    assert!(
        VerificationRepository::find_by_user(&app.store, id)
            .await
            .unwrap()
            .is_none()
    );

    let again = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "email": "gael@example.com", "code": "123456" })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_resend() {
    let app = TestApp::new();
    app.register("Alba", "alba@example.com").await;
    app.user("Bruno", "bruno@example.com").await;

    let sent = app
        .request(
            "POST",
            "/api/auth/resend",
            Some(json!({ "email": "alba@example.com" })),
            None,
        )
        .await;
    assert_eq!(sent.status, StatusCode::OK);
    app.verify("alba@example.com").await;

    let verified = app
        .request(
            "POST",
            "/api/auth/resend",
            Some(json!({ "email": "bruno@example.com" })),
            None,
        )
        .await;
    assert_eq!(verified.status, StatusCode::CONFLICT);

    let unknown = app
        .request(
            "POST",
            "/api/auth/resend",
            Some(json!({ "email": "nobody@example.com" })),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}
