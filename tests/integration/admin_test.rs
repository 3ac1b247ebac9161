//! Admin panel and reports.

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_admin_routes_reject_regular_users() {
    let app = TestApp::new();
    let (_, token) = app.user("Iker", "iker@example.com").await;

    for (method, uri) in [("GET", "/api/admin"), ("GET", "/api/reports")] {
        let res = app.request(method, uri, None, Some(&token)).await;
        assert_eq!(res.status, StatusCode::FORBIDDEN, "{uri}");
    }

    let patch = app
        .request(
            "PATCH",
            "/api/admin",
            Some(json!({ "type": "claim", "id": 1, "status": "completed" })),
            Some(&token),
        )
        .await;
    assert_eq!(patch.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_overview_totals_and_lists() {
    let app = TestApp::new();
    let (_, token) = app.user("Julia", "julia@example.com").await;
    let (_, admin_token) = app.admin("admin@example.com").await;

    for subject in ["one", "two"] {
        app.request("POST", "/api/claim", Some(json!({ "subject": subject })), Some(&token))
            .await;
    }
    app.request("POST", "/api/request", Some(json!({ "subject": "three" })), Some(&token))
        .await;

    let res = app.request("GET", "/api/admin", None, Some(&admin_token)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["totals"]["users"], 2);
    assert_eq!(res.body["totals"]["claims"], 2);
    assert_eq!(res.body["totals"]["requests"], 1);

    let claims = res.body["claims"].as_array().unwrap();
    assert_eq!(claims.len(), 2);
    assert_eq!(claims[0]["subject"], "two");
}

#[tokio::test]
async fn test_status_change() {
    let app = TestApp::new();
    let (_, token) = app.user("Kai", "kai@example.com").await;
    let (_, admin_token) = app.admin("admin@example.com").await;

    let created = app
        .request("POST", "/api/request", Some(json!({ "subject": "Permit" })), Some(&token))
        .await;
    let id = created.body["id"].as_i64().unwrap();

    let res = app
        .request(
            "PATCH",
            "/api/admin",
            Some(json!({ "type": "request", "id": id, "status": "Completado" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "completed");

    let wrong_table = app
        .request(
            "PATCH",
            "/api/admin",
            Some(json!({ "type": "claim", "id": id, "status": "completed" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(wrong_table.status, StatusCode::NOT_FOUND);

    let bad_type = app
        .request(
            "PATCH",
            "/api/admin",
            Some(json!({ "type": "complaint", "id": id, "status": "completed" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(bad_type.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_shape() {
    let app = TestApp::new();
    let (_, token) = app.user("Luz", "luz@example.com").await;
    let (_, admin_token) = app.admin("admin@example.com").await;

    app.request("POST", "/api/claim", Some(json!({ "subject": "a" })), Some(&token))
        .await;
    let second = app
        .request("POST", "/api/claim", Some(json!({ "subject": "b" })), Some(&token))
        .await;
    app.request(
        "PATCH",
        "/api/admin",
        Some(json!({ "type": "claim", "id": second.body["id"], "status": "in_progress" })),
        Some(&admin_token),
    )
    .await;

    let res = app.request("GET", "/api/reports", None, Some(&admin_token)).await;
    assert_eq!(res.status, StatusCode::OK);

    let claims = &res.body["claims"];
    assert_eq!(claims["stats"]["total"], 2);
    assert_eq!(claims["stats"]["pending"], 1);
    assert_eq!(claims["stats"]["in_progress"], 1);
    assert_eq!(claims["stats"]["completed"], 0);
    assert_eq!(res.body["requests"]["stats"]["total"], 0);

    let chart = claims["chart"].as_array().unwrap();
    assert_eq!(chart.len(), 30);

    let today = Utc::now().date_naive();
    let last = chart.last().unwrap();
    assert_eq!(last["date"], today.format("%Y-%m-%d").to_string());
    assert_eq!(last["total"], 2);
    assert_eq!(
        chart[0]["date"],
        (today - Duration::days(29)).format("%Y-%m-%d").to_string()
    );
    assert_eq!(res.body["date_range"]["end_date"], today.format("%Y-%m-%d").to_string());
}
