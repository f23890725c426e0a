/**
 * Board Handlers
 *
 * # Routes
 *
 * - `POST   /api/v1/boards` - create a board owned by the caller
 * - `GET    /api/v1/boards` - boards the caller owns or belongs to
 * - `GET    /api/v1/boards/{id}` - board with its lists and their tasks
 * - `PUT    /api/v1/boards/{id}` - partial update of title and description
 * - `DELETE /api/v1/boards/{id}` - delete the board, its lists and tasks
 * - `POST   /api/v1/boards/{id}/members` - invite a registered user by email
 * - `GET    /api/v1/boardmembers/{id}` - members with name and email
 *
 * Any signed-in user may read or change any board, as long as the ID is
 * known.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;

use crate::backend::auth::users::get_user_by_email;
use crate::backend::boards::db;
use crate::backend::error::BackendError;
use crate::backend::lists::db::lists_for_board;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::routes::params::IdParam;
use crate::backend::tasks::db::tasks_for_list;
use crate::shared::api::{AddMemberRequest, CreateBoardRequest, UpdateBoardRequest};
use crate::shared::board::{
    Board, BoardMember, BoardView, ListWithTasks, BOARD_DESCRIPTION_MAX, BOARD_TITLE_MAX,
};
use crate::shared::error::{check_length, non_blank};
use crate::shared::ApiResponse;

const MISSING_FIELDS: &str = "Please provide all fields";
const BOARD_NOT_FOUND: &str = "Board not found";

pub async fn create_board(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<CreateBoardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Board>>), BackendError> {
    let Json(request) = payload?;

    let (Some(title), Some(description)) = (
        non_blank(request.title.as_deref()),
        non_blank(request.description.as_deref()),
    ) else {
        return Err(BackendError::bad_request(MISSING_FIELDS));
    };
    check_length("title", title, BOARD_TITLE_MAX)?;
    check_length("description", description, BOARD_DESCRIPTION_MAX)?;

    if db::title_taken(&pool, auth.user_id, title).await? {
        return Err(BackendError::conflict("Board already exists"));
    }

    let board = db::create_board(&pool, auth.user_id, title, description).await?;
    tracing::info!("Board created: {} by {}", board.id, auth.user_id);

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(board))))
}

pub async fn get_boards(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<ApiResponse<Vec<Board>>>, BackendError> {
    let boards = db::boards_for_user(&pool, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(boards)))
}

/// Full board state: lists by position, each with its tasks by position
pub async fn get_board(
    State(pool): State<SqlitePool>,
    IdParam(id): IdParam,
) -> Result<Json<ApiResponse<BoardView>>, BackendError> {
    let board = db::find_board(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found(BOARD_NOT_FOUND))?;

    let mut conn = pool.acquire().await?;
    let mut lists = Vec::new();
    for list in lists_for_board(&mut *conn, id).await? {
        let tasks = tasks_for_list(&mut conn, list.id).await?;
        lists.push(ListWithTasks { list, tasks });
    }

    Ok(Json(ApiResponse::ok(BoardView { board, lists })))
}

pub async fn update_board(
    State(pool): State<SqlitePool>,
    IdParam(id): IdParam,
    payload: Result<Json<UpdateBoardRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Board>>, BackendError> {
    let Json(request) = payload?;

    let board = db::find_board(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found(BOARD_NOT_FOUND))?;

    let title = non_blank(request.title.as_deref()).unwrap_or(&board.title);
    let description = non_blank(request.description.as_deref()).unwrap_or(&board.description);
    check_length("title", title, BOARD_TITLE_MAX)?;
    check_length("description", description, BOARD_DESCRIPTION_MAX)?;

    if title != board.title && db::title_taken(&pool, board.created_by, title).await? {
        return Err(BackendError::conflict("Board already exists"));
    }

    let updated = db::update_board(&pool, id, title, description)
        .await?
        .ok_or_else(|| BackendError::not_found(BOARD_NOT_FOUND))?;

    Ok(Json(ApiResponse::ok(updated)))
}

pub async fn delete_board(
    State(pool): State<SqlitePool>,
    IdParam(id): IdParam,
) -> Result<Json<ApiResponse<()>>, BackendError> {
    if !db::delete_board(&pool, id).await? {
        return Err(BackendError::not_found(BOARD_NOT_FOUND));
    }

    tracing::info!("Board deleted: {}", id);
    Ok(Json(ApiResponse::message("Board deleted successfully")))
}

pub async fn add_member(
    State(pool): State<SqlitePool>,
    IdParam(id): IdParam,
    payload: Result<Json<AddMemberRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Board>>, BackendError> {
    let Json(request) = payload?;

    let board = db::find_board(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found(BOARD_NOT_FOUND))?;

    let user = match non_blank(request.email.as_deref()) {
        Some(email) => get_user_by_email(&pool, email).await?,
        None => None,
    }
    .ok_or_else(|| BackendError::not_found("User not found"))?;

    if board.is_member(user.id) {
        return Err(BackendError::bad_request("User is already a member of the board"));
    }

    db::add_member(&pool, id, user.id).await?;
    let board = db::find_board(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found(BOARD_NOT_FOUND))?;

    tracing::info!("User {} added to board {}", user.id, id);
    Ok(Json(ApiResponse::ok_with_message(
        "Member added to board successfully",
        board,
    )))
}

pub async fn get_board_members(
    State(pool): State<SqlitePool>,
    IdParam(id): IdParam,
) -> Result<Json<ApiResponse<Vec<BoardMember>>>, BackendError> {
    let board = db::find_board(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found(BOARD_NOT_FOUND))?;

    Ok(Json(ApiResponse::ok(board.members)))
}
