//! Batch move integration tests
//!
//! `PUT /api/v1/tasks/move` validation, persistence and both apply modes.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use taskboard::shared::board::{Task, TaskList};
use taskboard::shared::ordering::{compute_reorder, DragDrop, TaskMove};

use crate::common::*;

const MOVE_URI: &str = "/api/v1/tasks/move";

/// One board with two lists: `l1 = [a, b, c]`, `l2 = [d]`
struct Fixture {
    db: TestDatabase,
    user: TestUser,
    l1: TaskList,
    l2: TaskList,
    a: Task,
    b: Task,
    c: Task,
    d: Task,
}

impl Fixture {
    async fn new(atomic: bool) -> Self {
        let db = TestDatabase::with_atomic_moves(atomic).await;
        let user = create_unique_test_user(&db).await;
        let board = db.board(user.id, "Launch").await;
        let l1 = db.list(&board, "Todo").await;
        let l2 = db.list(&board, "Done").await;
        let a = db.task(&l1, "a").await;
        let b = db.task(&l1, "b").await;
        let c = db.task(&l1, "c").await;
        let d = db.task(&l2, "d").await;
        Self { db, user, l1, l2, a, b, c, d }
    }

    async fn submit(&self, updates: Value) -> TestResponse {
        put(&self.db.app(), MOVE_URI, &self.user.token, json!({ "updates": updates })).await
    }

    async fn snapshot(&self) -> Vec<(Uuid, i64)> {
        let mut all = self.db.positions(self.l1.id).await;
        all.extend(self.db.positions(self.l2.id).await);
        all
    }

    fn tasks(&self) -> Vec<Task> {
        vec![self.a.clone(), self.b.clone(), self.c.clone(), self.d.clone()]
    }
}

fn entry(id: Uuid, list: Uuid, position: i64) -> Value {
    json!({ "id": id, "list": list, "position": position })
}

fn batch_json(batch: &[TaskMove]) -> Value {
    serde_json::to_value(batch).unwrap()
}

#[tokio::test]
async fn test_same_list_move_to_end() {
    let f = Fixture::new(true).await;
    let reorder = compute_reorder(&f.tasks(), &DragDrop::new(f.b.id, f.l1.id)).unwrap();

    let response = f.submit(batch_json(&reorder.batch)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Tasks updated successfully");
    assert_eq!(response.data().as_array().unwrap().len(), 3);
    assert_eq!(
        f.db.positions(f.l1.id).await,
        vec![(f.a.id, 0), (f.c.id, 1), (f.b.id, 2)]
    );
}

#[tokio::test]
async fn test_cross_list_move_onto_task() {
    let f = Fixture::new(true).await;
    let drop = DragDrop::new(f.a.id, f.l2.id).onto(f.d.id);
    let reorder = compute_reorder(&f.tasks(), &drop).unwrap();

    let response = f.submit(batch_json(&reorder.batch)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(f.db.positions(f.l1.id).await, vec![(f.b.id, 0), (f.c.id, 1)]);
    assert_eq!(f.db.positions(f.l2.id).await, vec![(f.a.id, 0), (f.d.id, 1)]);

    let moved = response
        .data()
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == json!(f.a.id))
        .cloned()
        .unwrap();
    assert_eq!(moved["list"], json!(f.l2.id));
    assert_eq!(moved["position"], 0);
    assert_eq!(moved["board"], json!(f.l2.board));
}

#[tokio::test]
async fn test_resubmitting_applied_batch_is_stable() {
    let f = Fixture::new(true).await;
    let drop = DragDrop::new(f.c.id, f.l2.id);
    let batch = batch_json(&compute_reorder(&f.tasks(), &drop).unwrap().batch);

    let first = f.submit(batch.clone()).await;
    assert_eq!(first.status, StatusCode::OK);
    let after_first = f.snapshot().await;

    let second = f.submit(batch).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(f.snapshot().await, after_first);
}

#[tokio::test]
async fn test_duplicate_positions_rejected() {
    for atomic in [true, false] {
        let f = Fixture::new(atomic).await;
        let before = f.snapshot().await;

        let response = f
            .submit(json!([entry(f.a.id, f.l1.id, 0), entry(f.b.id, f.l1.id, 0)]))
            .await;

        assert_api_error!(
            response,
            StatusCode::BAD_REQUEST,
            "Duplicate positions detected in the same list"
        );
        assert_eq!(f.snapshot().await, before);
    }
}

#[tokio::test]
async fn test_equal_positions_in_different_lists_allowed() {
    let f = Fixture::new(true).await;

    let response = f
        .submit(json!([
            entry(f.b.id, f.l1.id, 0),
            entry(f.c.id, f.l1.id, 1),
            entry(f.a.id, f.l2.id, 0),
            entry(f.d.id, f.l2.id, 1),
        ]))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let l1 = f.db.positions(f.l1.id).await;
    let l2 = f.db.positions(f.l2.id).await;
    assert_contiguous!(l1);
    assert_contiguous!(l2);
}

#[tokio::test]
async fn test_sibling_collision_rejected() {
    let f = Fixture::new(true).await;
    let before = f.snapshot().await;

    // c holds position 2 in l1 and is not part of the batch
    let response = f.submit(json!([entry(f.d.id, f.l1.id, 2)])).await;

    assert_api_error!(
        response,
        StatusCode::BAD_REQUEST,
        format!("Position 2 is already taken in list {}", f.l1.id).as_str()
    );
    assert_eq!(f.snapshot().await, before);
}

#[tokio::test]
async fn test_position_of_batch_member_can_be_reused() {
    let f = Fixture::new(true).await;

    // c leaves position 2 in the same batch that hands it to d
    let response = f
        .submit(json!([entry(f.d.id, f.l1.id, 2), entry(f.c.id, f.l2.id, 0)]))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(f.db.placement(f.d.id).await, (f.l1.id, 2));
    assert_eq!(f.db.placement(f.c.id).await, (f.l2.id, 0));
}

#[tokio::test]
async fn test_malformed_batches_rejected() {
    let f = Fixture::new(true).await;
    let before = f.snapshot().await;

    let cases = vec![
        (json!([]), "Updates must be a non-empty array"),
        (json!({ "id": f.a.id }), "Updates must be a non-empty array"),
        (json!([entry(f.a.id, f.l1.id, 0), { "id": "nope", "list": f.l1.id, "position": 1 }]), "Invalid task ID in updates"),
        (json!([{ "id": f.a.id, "list": "nope", "position": 0 }]), "Invalid list ID in updates"),
        (json!([{ "id": f.a.id, "list": f.l1.id }]), "Invalid position in updates"),
        (json!([entry(f.a.id, f.l1.id, -1)]), "Invalid position in updates"),
        (json!([{ "id": f.a.id, "list": f.l1.id, "position": 1.5 }]), "Invalid position in updates"),
        (json!([{ "id": f.a.id, "list": f.l1.id, "position": "1" }]), "Invalid position in updates"),
    ];

    for (updates, message) in cases {
        let response = f.submit(updates).await;
        assert_api_error!(response, StatusCode::BAD_REQUEST, message);
    }

    let no_updates = put(&f.db.app(), MOVE_URI, &f.user.token, json!({})).await;
    assert_api_error!(no_updates, StatusCode::BAD_REQUEST, "Updates must be a non-empty array");

    assert_eq!(f.snapshot().await, before);
}

#[tokio::test]
async fn test_unknown_list_rejected_before_writes() {
    let f = Fixture::new(false).await;
    let before = f.snapshot().await;
    let ghost_list = Uuid::new_v4();

    let response = f
        .submit(json!([entry(f.a.id, f.l1.id, 5), entry(f.b.id, ghost_list, 0)]))
        .await;

    assert_api_error!(
        response,
        StatusCode::NOT_FOUND,
        format!("List with ID {} not found", ghost_list).as_str()
    );
    assert_eq!(f.snapshot().await, before);
}

#[tokio::test]
async fn test_missing_task_keeps_earlier_entries_in_sequential_mode() {
    let f = Fixture::new(false).await;
    let ghost = Uuid::new_v4();

    let response = f
        .submit(json!([entry(f.a.id, f.l1.id, 3), entry(ghost, f.l1.id, 0)]))
        .await;

    assert_api_error!(
        response,
        StatusCode::NOT_FOUND,
        format!("Task with ID {} not found", ghost).as_str()
    );
    assert_eq!(f.db.placement(f.a.id).await, (f.l1.id, 3));
}

#[tokio::test]
async fn test_missing_task_rolls_back_in_atomic_mode() {
    let f = Fixture::new(true).await;
    let before = f.snapshot().await;
    let ghost = Uuid::new_v4();

    let response = f
        .submit(json!([entry(f.a.id, f.l1.id, 3), entry(ghost, f.l1.id, 0)]))
        .await;

    assert_api_error!(
        response,
        StatusCode::NOT_FOUND,
        format!("Task with ID {} not found", ghost).as_str()
    );
    assert_eq!(f.snapshot().await, before);
}

#[tokio::test]
async fn test_move_requires_session() {
    let f = Fixture::new(true).await;

    let response = send(
        &f.db.app(),
        axum::http::Method::PUT,
        MOVE_URI,
        None,
        Some(json!({ "updates": [entry(f.a.id, f.l1.id, 0)] })),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_json_body_uses_envelope() {
    let f = Fixture::new(true).await;
    let request = axum::http::Request::builder()
        .method(axum::http::Method::PUT)
        .uri(MOVE_URI)
        .header(axum::http::header::AUTHORIZATION, auth_header(&f.user.token))
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{ not json"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(f.db.app(), request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], json!(false));
}
