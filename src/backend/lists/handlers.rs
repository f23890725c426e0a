/**
 * List Handlers
 *
 * # Routes
 *
 * - `POST   /api/v1/lists` - append a list to a board
 * - `GET    /api/v1/lists` - every list
 * - `GET    /api/v1/lists/{id}` - lists of the board `id`, by position
 * - `PUT    /api/v1/lists/{id}` - rename a list
 * - `DELETE /api/v1/lists/{id}` - delete a list and its tasks
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;

use crate::backend::boards::db::find_board;
use crate::backend::error::BackendError;
use crate::backend::lists::db;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::routes::params::IdParam;
use crate::shared::api::{CreateListRequest, UpdateListRequest};
use crate::shared::board::{TaskList, LIST_TITLE_MAX};
use crate::shared::error::{check_length, non_blank};
use crate::shared::ApiResponse;

const LIST_NOT_FOUND: &str = "List not found";

pub async fn create_list(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<CreateListRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TaskList>>), BackendError> {
    let Json(request) = payload?;

    let (Some(title), Some(board_id)) = (non_blank(request.title.as_deref()), request.board_id) else {
        return Err(BackendError::bad_request("Please provide all fields"));
    };
    check_length("title", title, LIST_TITLE_MAX)?;

    if find_board(&pool, board_id).await?.is_none() {
        return Err(BackendError::not_found("Board not found"));
    }

    let list = db::create_list(&pool, board_id, title, auth.user_id).await?;
    tracing::info!("List created: {} at position {} on board {}", list.id, list.position, board_id);

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(list))))
}

pub async fn get_all_lists(State(pool): State<SqlitePool>) -> Result<Json<ApiResponse<Vec<TaskList>>>, BackendError> {
    Ok(Json(ApiResponse::ok(db::all_lists(&pool).await?)))
}

/// Lists of one board; the path carries the board ID
pub async fn get_board_lists(
    State(pool): State<SqlitePool>,
    IdParam(board_id): IdParam,
) -> Result<Json<ApiResponse<Vec<TaskList>>>, BackendError> {
    Ok(Json(ApiResponse::ok(db::lists_for_board(&pool, board_id).await?)))
}

pub async fn update_list(
    State(pool): State<SqlitePool>,
    IdParam(id): IdParam,
    payload: Result<Json<UpdateListRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TaskList>>, BackendError> {
    let Json(request) = payload?;

    let list = db::find_list(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found(LIST_NOT_FOUND))?;

    let title = non_blank(request.title.as_deref()).unwrap_or(&list.title);
    check_length("title", title, LIST_TITLE_MAX)?;

    let updated = db::rename_list(&pool, id, title)
        .await?
        .ok_or_else(|| BackendError::not_found(LIST_NOT_FOUND))?;

    Ok(Json(ApiResponse::ok(updated)))
}

pub async fn delete_list(
    State(pool): State<SqlitePool>,
    IdParam(id): IdParam,
) -> Result<Json<ApiResponse<()>>, BackendError> {
    if !db::delete_list(&pool, id).await? {
        return Err(BackendError::not_found(LIST_NOT_FOUND));
    }

    tracing::info!("List deleted: {}", id);
    Ok(Json(ApiResponse::message("List deleted successfully")))
}
