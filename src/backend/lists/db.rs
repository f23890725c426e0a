/**
 * List Database Operations
 *
 * Lists are ordered within their board by a unique `position`, assigned as
 * one past the current maximum when a list is created.
 */

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::shared::board::TaskList;

#[derive(Debug, sqlx::FromRow)]
struct ListRow {
    id: Uuid,
    board_id: Uuid,
    title: String,
    position: i64,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ListRow> for TaskList {
    fn from(row: ListRow) -> Self {
        TaskList {
            id: row.id,
            board: row.board_id,
            title: row.title,
            position: row.position,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Get a list by ID
pub async fn find_list<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<TaskList>, sqlx::Error> {
    let row = sqlx::query_as::<_, ListRow>(
        r#"
        SELECT id, board_id, title, position, created_by, created_at, updated_at
        FROM lists
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(TaskList::from))
}

/// Lists of a board ordered by position
pub async fn lists_for_board<'e, E: SqliteExecutor<'e>>(
    executor: E,
    board_id: Uuid,
) -> Result<Vec<TaskList>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ListRow>(
        r#"
        SELECT id, board_id, title, position, created_by, created_at, updated_at
        FROM lists
        WHERE board_id = $1
        ORDER BY position
        "#,
    )
    .bind(board_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(TaskList::from).collect())
}

/// Every list across all boards
pub async fn all_lists(pool: &SqlitePool) -> Result<Vec<TaskList>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ListRow>(
        r#"
        SELECT id, board_id, title, position, created_by, created_at, updated_at
        FROM lists
        ORDER BY board_id, position
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(TaskList::from).collect())
}

/// Append a list at the end of a board
pub async fn create_list(
    pool: &SqlitePool,
    board_id: Uuid,
    title: &str,
    created_by: Uuid,
) -> Result<TaskList, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, ListRow>(
        r#"
        INSERT INTO lists (id, board_id, title, position, created_by, created_at, updated_at)
        VALUES (
            $1, $2, $3,
            (SELECT COALESCE(MAX(position) + 1, 0) FROM lists WHERE board_id = $2),
            $4, $5, $6
        )
        RETURNING id, board_id, title, position, created_by, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(board_id)
    .bind(title)
    .bind(created_by)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// Rename a list
pub async fn rename_list(pool: &SqlitePool, id: Uuid, title: &str) -> Result<Option<TaskList>, sqlx::Error> {
    let row = sqlx::query_as::<_, ListRow>(
        r#"
        UPDATE lists SET title = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, board_id, title, position, created_by, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(TaskList::from))
}

/// Delete a list and its tasks
///
/// Returns false when the list does not exist.
pub async fn delete_list(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM tasks WHERE list_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM lists WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(deleted.rows_affected() > 0)
}
