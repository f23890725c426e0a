//! Board API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::*;

#[tokio::test]
async fn test_create_board_adds_owner_as_member() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;

    let response = post(
        &app,
        "/api/v1/boards",
        Some(&user.token),
        json!({ "title": "Launch", "description": "Q3 launch plan" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let board = response.data();
    assert_eq!(board["title"], "Launch");
    assert_eq!(board["createdBy"], json!(user.id));
    assert_eq!(board["members"].as_array().unwrap().len(), 1);
    assert_eq!(board["members"][0]["user"]["id"], json!(user.id));
}

#[tokio::test]
async fn test_create_board_validation() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;

    let missing = post(&app, "/api/v1/boards", Some(&user.token), json!({ "title": "Launch" })).await;
    assert_api_error!(missing, StatusCode::BAD_REQUEST, "Please provide all fields");

    db.board(user.id, "Launch").await;
    let duplicate = post(
        &app,
        "/api/v1/boards",
        Some(&user.token),
        json!({ "title": "Launch", "description": "again" }),
    )
    .await;
    assert_api_error!(duplicate, StatusCode::CONFLICT, "Board already exists");
}

#[tokio::test]
async fn test_get_boards_lists_only_membership() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let ada = create_unique_test_user(&db).await;
    let bob = create_unique_test_user(&db).await;
    db.board(ada.id, "Ada's").await;
    db.board(bob.id, "Bob's").await;

    let response = get(&app, "/api/v1/boards", &ada.token).await;

    assert_eq!(response.status, StatusCode::OK);
    let titles: Vec<&str> = response
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Ada's"]);
}

#[tokio::test]
async fn test_get_board_returns_ordered_lists_and_tasks() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;
    let board = db.board(user.id, "Launch").await;
    let todo = db.list(&board, "Todo").await;
    let doing = db.list(&board, "Doing").await;
    let first = db.task(&todo, "first").await;
    let second = db.task(&todo, "second").await;

    let response = get(&app, &format!("/api/v1/boards/{}", board.id), &user.token).await;

    assert_eq!(response.status, StatusCode::OK);
    let lists = response.data()["lists"].as_array().unwrap();
    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0]["id"], json!(todo.id));
    assert_eq!(lists[1]["id"], json!(doing.id));

    let tasks = lists[0]["tasks"].as_array().unwrap();
    assert_eq!(tasks[0]["id"], json!(first.id));
    assert_eq!(tasks[0]["position"], 0);
    assert_eq!(tasks[1]["id"], json!(second.id));
    assert_eq!(tasks[1]["position"], 1);
    assert!(lists[1]["tasks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_board_errors() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;

    let unknown = get(&app, &format!("/api/v1/boards/{}", Uuid::new_v4()), &user.token).await;
    assert_api_error!(unknown, StatusCode::NOT_FOUND, "Board not found");

    let malformed = get(&app, "/api/v1/boards/not-a-uuid", &user.token).await;
    assert_api_error!(malformed, StatusCode::BAD_REQUEST, "Invalid ID: not-a-uuid");
}

#[tokio::test]
async fn test_update_board_is_partial() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;
    let board = db.board(user.id, "Launch").await;

    let response = put(
        &app,
        &format!("/api/v1/boards/{}", board.id),
        &user.token,
        json!({ "title": "Relaunch" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["title"], "Relaunch");
    assert_eq!(response.data()["description"], "test board");
}

#[tokio::test]
async fn test_delete_board_cascades() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;
    let board = db.board(user.id, "Launch").await;
    let list = db.list(&board, "Todo").await;
    db.task(&list, "orphan-to-be").await;

    let response = delete(&app, &format!("/api/v1/boards/{}", board.id), &user.token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Board deleted successfully");

    assert!(db.positions(list.id).await.is_empty());
    let again = delete(&app, &format!("/api/v1/boards/{}", board.id), &user.token).await;
    assert_api_error!(again, StatusCode::NOT_FOUND, "Board not found");
}

#[tokio::test]
async fn test_add_member() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let ada = create_unique_test_user(&db).await;
    let bob = create_unique_test_user(&db).await;
    let board = db.board(ada.id, "Launch").await;
    let uri = format!("/api/v1/boards/{}/members", board.id);

    let added = post(&app, &uri, Some(&ada.token), json!({ "email": bob.email })).await;
    assert_eq!(added.status, StatusCode::OK);
    assert_eq!(added.message(), "Member added to board successfully");

    let again = post(&app, &uri, Some(&ada.token), json!({ "email": bob.email })).await;
    assert_api_error!(again, StatusCode::BAD_REQUEST, "User is already a member of the board");

    let unknown = post(&app, &uri, Some(&ada.token), json!({ "email": "ghost@example.com" })).await;
    assert_api_error!(unknown, StatusCode::NOT_FOUND, "User not found");

    // Bob now sees the board
    let boards = get(&app, "/api/v1/boards", &bob.token).await;
    assert_eq!(boards.data().as_array().unwrap().len(), 1);

    let members = get(&app, &format!("/api/v1/boardmembers/{}", board.id), &bob.token).await;
    let emails: Vec<&str> = members
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["user"]["email"].as_str().unwrap())
        .collect();
    assert!(emails.contains(&bob.email.as_str()));
    assert!(emails.contains(&ada.email.as_str()));
}
