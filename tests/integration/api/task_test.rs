//! Task API integration tests (creation and details)

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::*;

#[tokio::test]
async fn test_create_task_appends_with_assignees() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;
    let helper = create_unique_test_user(&db).await;
    let board = db.board(user.id, "Launch").await;
    let list = db.list(&board, "Todo").await;
    db.task(&list, "already there").await;

    let response = post(
        &app,
        "/api/v1/tasks",
        Some(&user.token),
        json!({
            "title": "Write docs",
            "list": list.id,
            "status": "todo",
            "description": "user guide",
            "members": [helper.id]
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let task = response.data();
    assert_eq!(task["position"], 1);
    assert_eq!(task["list"], json!(list.id));
    assert_eq!(task["board"], json!(board.id));
    assert_eq!(task["createdBy"], json!(user.id));
    assert_eq!(task["assignedTo"][0]["id"], json!(helper.id));
}

#[tokio::test]
async fn test_create_task_validation() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;
    let board = db.board(user.id, "Launch").await;
    let list = db.list(&board, "Todo").await;

    let missing = post(
        &app,
        "/api/v1/tasks",
        Some(&user.token),
        json!({ "title": "No status", "list": list.id }),
    )
    .await;
    assert_api_error!(missing, StatusCode::BAD_REQUEST, "Please provide all fields");

    let no_list = post(
        &app,
        "/api/v1/tasks",
        Some(&user.token),
        json!({ "title": "Lost", "list": Uuid::new_v4(), "status": "todo" }),
    )
    .await;
    assert_api_error!(no_list, StatusCode::NOT_FOUND, "List not found");

    let ghost = post(
        &app,
        "/api/v1/tasks",
        Some(&user.token),
        json!({ "title": "Ghost", "list": list.id, "status": "todo", "members": [Uuid::new_v4()] }),
    )
    .await;
    assert_api_error!(ghost, StatusCode::NOT_FOUND, "User not found");
    assert!(db.positions(list.id).await.is_empty());
}

#[tokio::test]
async fn test_update_task_details_is_partial() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;
    let board = db.board(user.id, "Launch").await;
    let list = db.list(&board, "Todo").await;
    let task = db.task(&list, "Draft").await;

    let response = post(
        &app,
        "/api/v1/update-task-details",
        Some(&user.token),
        json!({
            "taskId": task.id,
            "status": "in-progress",
            "dueDate": "2030-01-01T00:00:00Z",
            "members": [user.id]
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Task details updated successfully");
    let updated = response.data();
    assert_eq!(updated["title"], "Draft");
    assert_eq!(updated["status"], "doing");
    assert_eq!(updated["dueDate"], "2030-01-01T00:00:00Z");
    assert_eq!(updated["assignedTo"][0]["id"], json!(user.id));
    assert_eq!(updated["position"], 0);

    let missing = post(
        &app,
        "/api/v1/update-task-details",
        Some(&user.token),
        json!({ "taskId": Uuid::new_v4(), "title": "x" }),
    )
    .await;
    assert_api_error!(missing, StatusCode::NOT_FOUND, "Task not found");
}

#[tokio::test]
async fn test_comments_and_attachments() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;
    let board = db.board(user.id, "Launch").await;
    let list = db.list(&board, "Todo").await;
    let task = db.task(&list, "Review").await;

    let commented = post(
        &app,
        &format!("/api/v1/tasks/{}/comments", task.id),
        Some(&user.token),
        json!({ "content": "Looks good" }),
    )
    .await;
    assert_eq!(commented.status, StatusCode::CREATED);
    assert_eq!(commented.data()["comments"][0]["content"], "Looks good");
    assert_eq!(commented.data()["comments"][0]["user"], json!(user.id));

    let attached = post(
        &app,
        &format!("/api/v1/tasks/{}/attachments", task.id),
        Some(&user.token),
        json!({ "filename": "spec.pdf", "url": "https://files.example.com/spec.pdf" }),
    )
    .await;
    assert_eq!(attached.status, StatusCode::CREATED);
    assert_eq!(attached.data()["attachments"][0]["filename"], "spec.pdf");
    assert_eq!(attached.data()["comments"].as_array().unwrap().len(), 1);

    let empty = post(
        &app,
        &format!("/api/v1/tasks/{}/comments", task.id),
        Some(&user.token),
        json!({ "content": "" }),
    )
    .await;
    assert_api_error!(empty, StatusCode::BAD_REQUEST, "Please provide all fields");
}

#[tokio::test]
async fn test_delete_task() {
    let db = TestDatabase::new().await;
    let app = db.app();
    let user = create_unique_test_user(&db).await;
    let board = db.board(user.id, "Launch").await;
    let list = db.list(&board, "Todo").await;
    let task = db.task(&list, "Temporary").await;
    let uri = format!("/api/v1/tasks/{}", task.id);

    let deleted = delete(&app, &uri, &user.token).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.message(), "Task deleted successfully");

    let again = delete(&app, &uri, &user.token).await;
    assert_api_error!(again, StatusCode::NOT_FOUND, "Task not found");
}
