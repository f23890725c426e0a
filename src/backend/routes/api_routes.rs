/**
 * API Routes
 *
 * Every endpoint of the board API, relative to `/api/v1`.
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /register`, `POST /login`, `POST /logout`
 *
 * ## Protected
 * - `GET /current-user`
 * - boards: `/boards`, `/boards/{id}`, `/boards/{id}/members`, `/boardmembers/{id}`
 * - lists: `/lists`, `/lists/{id}`
 * - tasks: `/tasks`, `/tasks/move`, `/tasks/{id}`, `/tasks/{id}/comments`,
 *   `/tasks/{id}/attachments`, `/update-task-details`
 *
 * Protected routes sit behind `auth_middleware`, which accepts a bearer
 * token or the `token` cookie.
 */

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, logout, register};
use crate::backend::boards::handlers as boards;
use crate::backend::lists::handlers as lists;
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::tasks::handlers as tasks;

/// Routes reachable without a session
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Routes requiring a valid session
fn protected_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/current-user", get(get_me))
        // Boards
        .route("/boards", post(boards::create_board).get(boards::get_boards))
        .route(
            "/boards/{id}",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
        .route("/boards/{id}/members", post(boards::add_member))
        .route("/boardmembers/{id}", get(boards::get_board_members))
        // Lists
        .route("/lists", post(lists::create_list).get(lists::get_all_lists))
        .route(
            "/lists/{id}",
            get(lists::get_board_lists)
                .put(lists::update_list)
                .delete(lists::delete_list),
        )
        // Tasks
        .route("/tasks", post(tasks::create_task))
        .route("/tasks/move", put(tasks::move_tasks))
        .route("/tasks/{id}", axum::routing::delete(tasks::delete_task))
        .route("/tasks/{id}/comments", post(tasks::add_comment))
        .route("/tasks/{id}/attachments", post(tasks::add_attachment))
        .route("/update-task-details", post(tasks::update_task_details))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware))
}

/// All API routes, to be nested under `/api/v1`
pub fn configure_api_routes(app_state: AppState) -> Router<AppState> {
    public_routes().merge(protected_routes(app_state))
}
