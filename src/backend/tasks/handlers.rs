/**
 * Task Handlers
 *
 * # Routes
 *
 * - `POST   /api/v1/tasks` - append a task to a list
 * - `PUT    /api/v1/tasks/move` - batch move after a drag and drop
 * - `DELETE /api/v1/tasks/{id}` - delete a task
 * - `POST   /api/v1/update-task-details` - partial update of task details
 * - `POST   /api/v1/tasks/{id}/comments` - comment on a task
 * - `POST   /api/v1/tasks/{id}/attachments` - attach a file reference
 *
 * Every handler returning tasks returns them with assignees, comments and
 * attachments populated.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::auth::users::count_existing_users;
use crate::backend::error::BackendError;
use crate::backend::lists::db::find_list;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::routes::params::IdParam;
use crate::backend::server::state::AppState;
use crate::backend::tasks::batch::{apply_batch, MoveBatch};
use crate::backend::tasks::db::{self, NewTask, TaskDetails};
use crate::shared::api::{
    AddAttachmentRequest, AddCommentRequest, CreateTaskRequest, MoveTasksRequest, UpdateTaskDetailsRequest,
};
use crate::shared::board::{Task, COMMENT_MAX, TASK_DESCRIPTION_MAX, TASK_TITLE_MAX};
use crate::shared::error::{check_length, non_blank};
use crate::shared::ApiResponse;

const MISSING_FIELDS: &str = "Please provide all fields";
const TASK_NOT_FOUND: &str = "Task not found";

async fn ensure_users_exist(pool: &SqlitePool, users: &[Uuid]) -> Result<(), BackendError> {
    if count_existing_users(pool, users).await? != users.len() {
        return Err(BackendError::not_found("User not found"));
    }
    Ok(())
}

async fn load_task(conn: &mut SqliteConnection, id: Uuid) -> Result<Task, BackendError> {
    db::find_task(conn, id)
        .await?
        .ok_or_else(|| BackendError::not_found(TASK_NOT_FOUND))
}

pub async fn create_task(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), BackendError> {
    let Json(request) = payload?;

    let (Some(title), Some(list_id), Some(status)) =
        (non_blank(request.title.as_deref()), request.list, request.status)
    else {
        return Err(BackendError::bad_request(MISSING_FIELDS));
    };
    check_length("title", title, TASK_TITLE_MAX)?;
    let description = non_blank(request.description.as_deref());
    if let Some(description) = description {
        check_length("description", description, TASK_DESCRIPTION_MAX)?;
    }

    let list = find_list(&pool, list_id)
        .await?
        .ok_or_else(|| BackendError::not_found("List not found"))?;

    let members = request.members.unwrap_or_default();
    ensure_users_exist(&pool, &members).await?;

    let mut tx = pool.begin().await?;
    let created = db::create_task(
        &mut tx,
        NewTask {
            list_id: list.id,
            board_id: list.board,
            title,
            description,
            status,
            created_by: auth.user_id,
        },
    )
    .await?;
    db::set_assignees(&mut tx, created.id, &members).await?;
    let task = load_task(&mut tx, created.id).await?;
    tx.commit().await?;

    tracing::info!("Task created: {} at position {} in list {}", task.id, task.position, list.id);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(task))))
}

/// Persist the positions computed by a drag and drop
///
/// ```json
/// { "updates": [ { "id": "<task>", "list": "<list>", "position": 0 } ] }
/// ```
pub async fn move_tasks(
    State(state): State<AppState>,
    payload: Result<Json<MoveTasksRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<Task>>>, BackendError> {
    let Json(request) = payload?;

    let batch = MoveBatch::parse(request.updates.as_ref())?;
    let moved = apply_batch(&state.db_pool, &batch, state.config.atomic_task_moves).await?;

    tracing::info!(
        tasks = moved.len(),
        lists = batch.target_lists().len(),
        "Tasks moved"
    );
    Ok(Json(ApiResponse::ok_with_message("Tasks updated successfully", moved)))
}

pub async fn delete_task(
    State(pool): State<SqlitePool>,
    IdParam(id): IdParam,
) -> Result<Json<ApiResponse<()>>, BackendError> {
    if !db::delete_task(&pool, id).await? {
        return Err(BackendError::not_found(TASK_NOT_FOUND));
    }

    tracing::info!("Task deleted: {}", id);
    Ok(Json(ApiResponse::message("Task deleted successfully")))
}

/// Absent or blank fields keep their stored value
pub async fn update_task_details(
    State(pool): State<SqlitePool>,
    payload: Result<Json<UpdateTaskDetailsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Task>>, BackendError> {
    let Json(request) = payload?;

    let task_id = request
        .task_id
        .ok_or_else(|| BackendError::not_found(TASK_NOT_FOUND))?;

    let title = non_blank(request.title.as_deref());
    if let Some(title) = title {
        check_length("title", title, TASK_TITLE_MAX)?;
    }
    let description = non_blank(request.description.as_deref());
    if let Some(description) = description {
        check_length("description", description, TASK_DESCRIPTION_MAX)?;
    }
    if let Some(members) = &request.members {
        ensure_users_exist(&pool, members).await?;
    }

    let details = TaskDetails {
        title: title.map(str::to_string),
        description: description.map(str::to_string),
        status: request.status,
        due_date: request.due_date,
    };

    let mut tx = pool.begin().await?;
    if !db::update_details(&mut *tx, task_id, &details).await? {
        return Err(BackendError::not_found(TASK_NOT_FOUND));
    }
    if let Some(members) = &request.members {
        db::set_assignees(&mut tx, task_id, members).await?;
    }
    let task = load_task(&mut tx, task_id).await?;
    tx.commit().await?;

    Ok(Json(ApiResponse::ok_with_message(
        "Task details updated successfully",
        task,
    )))
}

pub async fn add_comment(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    IdParam(task_id): IdParam,
    payload: Result<Json<AddCommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), BackendError> {
    let Json(request) = payload?;

    let content = non_blank(request.content.as_deref())
        .ok_or_else(|| BackendError::bad_request(MISSING_FIELDS))?;
    check_length("content", content, COMMENT_MAX)?;

    let mut conn = pool.acquire().await?;
    load_task(&mut conn, task_id).await?;
    db::add_comment(&mut *conn, task_id, auth.user_id, content).await?;
    let task = load_task(&mut conn, task_id).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(task))))
}

pub async fn add_attachment(
    State(pool): State<SqlitePool>,
    IdParam(task_id): IdParam,
    payload: Result<Json<AddAttachmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), BackendError> {
    let Json(request) = payload?;

    let (Some(filename), Some(url)) = (
        non_blank(request.filename.as_deref()),
        non_blank(request.url.as_deref()),
    ) else {
        return Err(BackendError::bad_request(MISSING_FIELDS));
    };

    let mut conn = pool.acquire().await?;
    load_task(&mut conn, task_id).await?;
    db::add_attachment(&mut *conn, task_id, filename, url).await?;
    let task = load_task(&mut conn, task_id).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(task))))
}
