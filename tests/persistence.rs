//! Service and repository behaviour against a real PostgreSQL database.
//!
//! Skipped unless `VIDNOTE_TEST_DATABASE_URL` points at a disposable database.

mod common;

use axum::http::StatusCode;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use vidnote_rs::AppState;
use vidnote_rs::api::routes::create_router;
use vidnote_rs::error::AppError;
use vidnote_rs::models::{NewNote, NewVideo};
use vidnote_rs::repositories::Repositories;
use vidnote_rs::services::{CreateUser, CreateVideo, NoteDraft, UserPatch};

use common::{body_json, database_state, empty_request, json_request, jwt_config, unique};

macro_rules! require_database {
    () => {
        match database_state().await {
            Some(state) => state,
            None => {
                eprintln!("VIDNOTE_TEST_DATABASE_URL not set, skipping");
                return;
            }
        }
    };
}

fn signup(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: format!("{}@example.com", username),
        password: "password".to_string(),
        phone: "1234567890".to_string(),
        user_status: 1,
    }
}

fn lecture(user_id: Uuid, notes: &[(&str, &str)]) -> CreateVideo {
    CreateVideo {
        user_id,
        title: "Lecture 1".to_string(),
        description: "Intro".to_string(),
        subject: "Math".to_string(),
        notes: notes
            .iter()
            .map(|(timestamp, note)| NoteDraft {
                timestamp: timestamp.to_string(),
                note: note.to_string(),
            })
            .collect(),
    }
}

/// Counts note rows pointing at `video`, whether or not it still exists.
async fn stored_note_count(state: &AppState, video: Uuid) -> i64 {
    use vidnote_rs::schema::notes::dsl::*;
    let mut conn = state.db_pool.get().await.unwrap();

    notes
        .filter(video_id.eq(video))
        .count()
        .get_result(&mut conn)
        .await
        .unwrap()
}

async fn create_owner(state: &AppState) -> Uuid {
    state
        .services
        .users
        .create_user(signup(&unique("owner")))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn signup_rejects_taken_username_and_email() {
    let state = require_database!();
    let users = &state.services.users;
    let name = unique("dup");

    users.create_user(signup(&name)).await.unwrap();

    let err = users.create_user(signup(&name)).await.unwrap_err();
    assert!(
        matches!(&err, AppError::Duplicate { field, .. } if field == "username"),
        "{err:?}"
    );

    let mut same_email = signup(&unique("other"));
    same_email.email = format!("{}@example.com", name);
    let err = users.create_user(same_email).await.unwrap_err();
    assert!(
        matches!(&err, AppError::Duplicate { field, .. } if field == "email"),
        "{err:?}"
    );
}

#[tokio::test]
async fn stored_password_is_hashed() {
    let state = require_database!();
    let name = unique("hash");

    let user = state.services.users.create_user(signup(&name)).await.unwrap();

    assert_ne!(user.password, "password");
    assert!(user.password.starts_with("$argon2"));
}

#[tokio::test]
async fn login_checks_password() {
    let state = require_database!();
    let users = &state.services.users;
    let name = unique("login");
    users.create_user(signup(&name)).await.unwrap();

    let err = users
        .verify_credentials(&name, "wrong", &jwt_config())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized { .. }));

    let err = users
        .verify_credentials(&unique("ghost"), "password", &jwt_config())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized { .. }));

    let (user, token) = users
        .verify_credentials(&name, "password", &jwt_config())
        .await
        .unwrap();
    assert_eq!(user.username, name);
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn patch_updates_only_given_fields_and_rehashes_password() {
    let state = require_database!();
    let users = &state.services.users;
    let name = unique("patch");
    let created = users.create_user(signup(&name)).await.unwrap();

    let updated = users
        .update_user(
            &name,
            UserPatch {
                first_name: Some("Jane".to_string()),
                password: Some("new-password".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Jane");
    assert_eq!(updated.last_name, created.last_name);
    assert_ne!(updated.password, "new-password");
    assert!(
        users
            .verify_credentials(&name, "new-password", &jwt_config())
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn unknown_username_is_not_found() {
    let state = require_database!();
    let users = &state.services.users;
    let ghost = unique("ghost");

    assert!(matches!(
        users.get_by_username(&ghost).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        users.update_user(&ghost, UserPatch::default()).await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn deleting_a_user_twice_fails_the_second_time() {
    let state = require_database!();
    let users = &state.services.users;
    let name = unique("gone");
    users.create_user(signup(&name)).await.unwrap();

    let deleted = users.delete_user(&name).await.unwrap();
    assert_eq!(deleted.username, name);

    assert!(matches!(
        users.delete_user(&name).await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn video_for_missing_owner_is_not_found() {
    let state = require_database!();

    let err = state
        .services
        .videos
        .create_video(lecture(Uuid::new_v4(), &[("00:01", "start")]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn video_round_trip_keeps_note_order() {
    let state = require_database!();
    let videos = &state.services.videos;
    let owner = create_owner(&state).await;

    let created = videos
        .create_video(lecture(
            owner,
            &[("00:10", "first"), ("00:05", "second"), ("01:00", "third")],
        ))
        .await
        .unwrap();
    assert_eq!(created.notes.len(), 3);

    let found = videos
        .find_one(created.video.video_id)
        .await
        .unwrap()
        .unwrap();
    let texts: Vec<&str> = found.notes.iter().map(|n| n.note.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
    assert_eq!(found.video.title, "Lecture 1");

    let listed = videos.find_all_by_user(owner).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].video.video_id, created.video.video_id);
}

#[tokio::test]
async fn listing_by_owner_excludes_other_owners_videos() {
    let state = require_database!();
    let videos = &state.services.videos;
    let alice = create_owner(&state).await;
    let bob = create_owner(&state).await;

    let mut alice_ids = Vec::new();
    for stamp in ["00:01", "00:02"] {
        let created = videos
            .create_video(lecture(alice, &[(stamp, "mine")]))
            .await
            .unwrap();
        alice_ids.push(created.video.video_id);
    }
    let bob_video = videos
        .create_video(lecture(bob, &[("00:03", "theirs")]))
        .await
        .unwrap()
        .video
        .video_id;

    let mut listed: Vec<Uuid> = videos
        .find_all_by_user(alice)
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.video.video_id)
        .collect();
    listed.sort();
    alice_ids.sort();
    assert_eq!(listed, alice_ids);

    let router = create_router(state, std::time::Duration::from_secs(10));
    let response = router
        .oneshot(empty_request("GET", &format!("/videos?userId={}", alice)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let mut over_http: Vec<Uuid> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["videoId"].as_str().unwrap().parse().unwrap())
        .collect();
    over_http.sort();
    assert_eq!(over_http, alice_ids);
    assert!(!over_http.contains(&bob_video));
    assert!(
        body.as_array()
            .unwrap()
            .iter()
            .all(|v| v["notes"][0]["note"] == "mine")
    );
}

#[tokio::test]
async fn failed_note_insert_leaves_no_video_behind() {
    let state = require_database!();
    let owner = create_owner(&state).await;
    let repos = Repositories::new(state.db_pool.clone());

    let video_id = Uuid::new_v4();
    let note_id = Uuid::new_v4();
    let note = |position: i32| NewNote {
        id: note_id,
        video_id,
        position,
        timestamp: "00:01".to_string(),
        note: "clash".to_string(),
    };
    let video = NewVideo {
        video_id,
        user_id: owner,
        title: "Doomed".to_string(),
        description: String::new(),
        subject: String::new(),
    };

    let result = repos
        .videos
        .create_with_notes(video, vec![note(0), note(1)])
        .await;
    assert!(result.is_err());

    assert!(repos.videos.find_by_id(video_id).await.unwrap().is_none());
    assert_eq!(stored_note_count(&state, video_id).await, 0);
}

#[tokio::test]
async fn deleting_a_video_removes_its_notes() {
    let state = require_database!();
    let owner = create_owner(&state).await;

    let created = state
        .services
        .videos
        .create_video(lecture(owner, &[("00:01", "a"), ("00:02", "b")]))
        .await
        .unwrap();
    let id = created.video.video_id;
    assert_eq!(stored_note_count(&state, id).await, 2);

    state.services.videos.delete_video(id).await.unwrap();

    assert_eq!(stored_note_count(&state, id).await, 0);
    assert!(matches!(
        state.services.videos.delete_video(id).await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn http_signup_then_duplicate_is_conflict() {
    let state = require_database!();
    let router = create_router(state, std::time::Duration::from_secs(10));
    let name = unique("http");
    let body = json!({
        "username": name,
        "firstName": "John",
        "lastName": "Doe",
        "email": format!("{}@example.com", name),
        "password": "password",
        "phone": "1234567890",
        "userStatus": 1
    });

    let response = router
        .clone()
        .oneshot(json_request("POST", "/user", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["username"], name.as_str());
    assert!(created.get("password").is_none());

    let response = router
        .clone()
        .oneshot(json_request("POST", "/user", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_ENTRY");

    let response = router
        .oneshot(empty_request("GET", &format!("/user/{}", name)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn http_video_lifecycle() {
    let state = require_database!();
    let owner = create_owner(&state).await;
    let router = create_router(state, std::time::Duration::from_secs(10));

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/videos",
            &json!({
                "userId": owner,
                "title": "Lecture 1",
                "description": "Intro",
                "subject": "Math",
                "notes": [{ "timestamp": "00:01", "note": "start" }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let video_id = created["videoId"].as_str().unwrap().to_string();
    assert_eq!(created["notes"][0]["note"], "start");

    let response = router
        .clone()
        .oneshot(empty_request("GET", &format!("/videos?userId={}", owner)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &format!("/videos/{}", video_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(empty_request("GET", &format!("/videos/{}", video_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
