//! Router behaviour that does not need a database.
//!
//! Every request here is answered before a connection is checked out; the
//! pool points at a closed port.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{body_json, empty_request, json_request, offline_router};

fn signup_body() -> serde_json::Value {
    json!({
        "username": "user1",
        "firstName": "John",
        "lastName": "Doe",
        "email": "john.doe@example.com",
        "password": "password",
        "phone": "1234567890",
        "userStatus": 1
    })
}

#[tokio::test]
async fn signup_with_malformed_email_is_rejected() {
    let mut body = signup_body();
    body["email"] = json!("not-an-email");

    let response = offline_router()
        .oneshot(json_request("POST", "/user", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let errors = body["details"]["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["field"] == "email"));
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn signup_with_empty_username_and_password_lists_both_fields() {
    let mut body = signup_body();
    body["username"] = json!("");
    body["password"] = json!("");

    let response = offline_router()
        .oneshot(json_request("POST", "/user", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let fields: Vec<&str> = body["details"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["password", "username"]);
}

#[tokio::test]
async fn signup_missing_required_fields_is_bad_request() {
    let body = json!({ "username": "user1" });

    let response = offline_router()
        .oneshot(json_request("POST", "/user", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn login_without_password_is_bad_request() {
    let response = offline_router()
        .oneshot(empty_request("GET", "/user/login?username=user1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_always_succeeds() {
    let response = offline_router()
        .oneshot(empty_request("GET", "/user/logout"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Logged out successfully" })
    );
}

#[tokio::test]
async fn video_lookup_with_non_uuid_id_is_bad_request() {
    for method in ["GET", "DELETE"] {
        let response = offline_router()
            .oneshot(empty_request(method, "/videos/not-a-uuid"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method}");
        assert_eq!(
            body_json(response).await["message"],
            "Bad request, possibly due to an invalid ID."
        );
    }
}

#[tokio::test]
async fn video_list_requires_user_id() {
    let response = offline_router()
        .oneshot(empty_request("GET", "/videos"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = offline_router()
        .oneshot(empty_request("GET", "/videos?userId=123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_video_with_non_uuid_owner_is_bad_request() {
    let body = json!({
        "userId": "abc",
        "title": "Lecture 1",
        "description": "Intro",
        "subject": "Math",
        "notes": [{ "timestamp": "00:01", "note": "start" }]
    });

    let response = offline_router()
        .oneshot(json_request("POST", "/videos", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["details"]["errors"][0]["field"], "user_id");
}

fn error_fields(body: &serde_json::Value) -> Vec<String> {
    body["details"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str().map(String::from))
        .collect()
}

#[tokio::test]
async fn create_video_with_overlong_title_is_rejected_before_insert() {
    let body = json!({
        "userId": uuid::Uuid::new_v4(),
        "title": "x".repeat(300),
        "description": "Intro",
        "subject": "Math",
        "notes": []
    });

    let response = offline_router()
        .oneshot(json_request("POST", "/videos", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(error_fields(&body), vec!["title"]);
}

#[tokio::test]
async fn create_video_reports_bad_note_by_index() {
    let body = json!({
        "userId": uuid::Uuid::new_v4(),
        "title": "Lecture 1",
        "description": "Intro",
        "subject": "Math",
        "notes": [
            { "timestamp": "00:01", "note": "fine" },
            { "timestamp": "9".repeat(65), "note": "too long a stamp" }
        ]
    });

    let response = offline_router()
        .oneshot(json_request("POST", "/videos", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(error_fields(&body), vec!["notes[1].timestamp"]);
}

#[tokio::test]
async fn signup_with_overlong_fields_is_rejected() {
    let mut body = signup_body();
    body["username"] = json!("u".repeat(256));
    body["phone"] = json!("1".repeat(65));

    let response = offline_router()
        .oneshot(json_request("POST", "/user", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(error_fields(&body), vec!["phone", "username"]);
}

#[tokio::test]
async fn patch_with_overlong_last_name_is_rejected() {
    let body = json!({ "lastName": "d".repeat(256) });

    let response = offline_router()
        .oneshot(json_request("PATCH", "/user/user1", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body_json(response).await), vec!["last_name"]);
}

#[tokio::test]
async fn unknown_route_gets_json_not_found_with_request_id() {
    let request = axum::http::Request::builder()
        .uri("/nothing-here")
        .header("x-request-id", "trace-me-123")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = offline_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["x-request-id"], "trace-me-123");
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["request_id"], "trace-me-123");
}

#[tokio::test]
async fn wrong_method_is_method_not_allowed() {
    let response = offline_router()
        .oneshot(empty_request("PUT", "/user/logout"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn liveness_does_not_touch_the_database() {
    let response = offline_router()
        .oneshot(empty_request("GET", "/health/live"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn readiness_reports_unavailable_database() {
    let response = offline_router()
        .oneshot(empty_request("GET", "/health/ready"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn openapi_document_lists_every_route() {
    let response = offline_router()
        .oneshot(empty_request("GET", "/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/user",
        "/user/login",
        "/user/logout",
        "/user/{username}",
        "/videos",
        "/videos/{videoId}",
        "/health",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}
