//! List API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::*;

#[tokio::test]
async fn test_create_list_appends_position() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;
    let board = db.board(user.id, "Launch").await;

    let mut positions = Vec::new();
    for title in ["Todo", "Doing", "Done"] {
        let response = post(
            &app,
            "/api/v1/lists",
            Some(&user.token),
            json!({ "title": title, "boardId": board.id }),
        )
        .await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.data()["board"], json!(board.id));
        positions.push(response.data()["position"].as_i64().unwrap());
    }

    assert_eq!(positions, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_create_list_validation() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;

    let missing = post(&app, "/api/v1/lists", Some(&user.token), json!({ "title": "Todo" })).await;
    assert_api_error!(missing, StatusCode::BAD_REQUEST, "Please provide all fields");

    let unknown = post(
        &app,
        "/api/v1/lists",
        Some(&user.token),
        json!({ "title": "Todo", "boardId": Uuid::new_v4() }),
    )
    .await;
    assert_api_error!(unknown, StatusCode::NOT_FOUND, "Board not found");
}

#[tokio::test]
async fn test_get_board_lists() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;
    let board = db.board(user.id, "Launch").await;
    let other = db.board(user.id, "Other").await;
    let todo = db.list(&board, "Todo").await;
    let done = db.list(&board, "Done").await;
    db.list(&other, "Elsewhere").await;

    let response = get(&app, &format!("/api/v1/lists/{}", board.id), &user.token).await;
    let ids: Vec<&serde_json::Value> = response.data().as_array().unwrap().iter().map(|l| &l["id"]).collect();
    assert_eq!(ids, vec![&json!(todo.id), &json!(done.id)]);

    let all = get(&app, "/api/v1/lists", &user.token).await;
    assert_eq!(all.data().as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_rename_and_delete_list() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;
    let board = db.board(user.id, "Launch").await;
    let list = db.list(&board, "Todo").await;
    db.task(&list, "goes with the list").await;
    let uri = format!("/api/v1/lists/{}", list.id);

    let renamed = put(&app, &uri, &user.token, json!({ "title": "Backlog" })).await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.data()["title"], "Backlog");
    assert_eq!(renamed.data()["position"], 0);

    let deleted = delete(&app, &uri, &user.token).await;
    assert_eq!(deleted.message(), "List deleted successfully");
    assert!(db.positions(list.id).await.is_empty());

    let missing = put(&app, &uri, &user.token, json!({ "title": "Gone" })).await;
    assert_api_error!(missing, StatusCode::NOT_FOUND, "List not found");
}
