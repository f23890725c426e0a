/**
 * Task Database Operations
 *
 * Task rows plus their assignees, comments and attachments. Every function
 * returning a `Task` returns it fully populated, the way the board client
 * renders it.
 *
 * Positions are not unique at the storage layer; the batch move validates
 * them before writing.
 */

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqliteExecutor};
use uuid::Uuid;

use crate::shared::board::{Attachment, Comment, Task, TaskStatus, UserSummary};

const TASK_COLUMNS: &str =
    "id, list_id, board_id, title, description, status, position, due_date, created_by, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    list_id: Uuid,
    board_id: Uuid,
    title: String,
    description: Option<String>,
    status: String,
    position: i64,
    due_date: Option<DateTime<Utc>>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    user_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct AttachmentRow {
    id: Uuid,
    filename: String,
    url: String,
    uploaded_at: DateTime<Utc>,
}

/// Values of a task being created
#[derive(Debug, Clone)]
pub struct NewTask<'a> {
    pub list_id: Uuid,
    pub board_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: TaskStatus,
    pub created_by: Uuid,
}

/// Detail fields to overwrite; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct TaskDetails {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
}

async fn hydrate(conn: &mut SqliteConnection, row: TaskRow) -> Result<Task, sqlx::Error> {
    let assigned_to = sqlx::query_as::<_, (Uuid, String, String)>(
        r#"
        SELECT u.id, u.name, u.email
        FROM task_assignees a
        JOIN users u ON u.id = a.user_id
        WHERE a.task_id = $1
        ORDER BY u.name
        "#,
    )
    .bind(row.id)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|(id, name, email)| UserSummary { id, name, email })
    .collect();

    let comments = sqlx::query_as::<_, CommentRow>(
        "SELECT id, user_id, content, created_at FROM task_comments WHERE task_id = $1 ORDER BY created_at",
    )
    .bind(row.id)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|c| Comment {
        id: c.id,
        user: c.user_id,
        content: c.content,
        created_at: c.created_at,
    })
    .collect();

    let attachments = sqlx::query_as::<_, AttachmentRow>(
        "SELECT id, filename, url, uploaded_at FROM task_attachments WHERE task_id = $1 ORDER BY uploaded_at",
    )
    .bind(row.id)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|a| Attachment {
        id: a.id,
        filename: a.filename,
        url: a.url,
        uploaded_at: a.uploaded_at,
    })
    .collect();

    Ok(Task {
        id: row.id,
        list: row.list_id,
        board: row.board_id,
        title: row.title,
        description: row.description,
        status: TaskStatus::from_str(&row.status).unwrap_or_default(),
        position: row.position,
        assigned_to,
        due_date: row.due_date,
        comments,
        attachments,
        created_by: row.created_by,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Get a populated task by ID
pub async fn find_task(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
    let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
    let row = sqlx::query_as::<_, TaskRow>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => Ok(Some(hydrate(conn, row).await?)),
        None => Ok(None),
    }
}

/// Populated tasks of a list, ordered by position
pub async fn tasks_for_list(conn: &mut SqliteConnection, list_id: Uuid) -> Result<Vec<Task>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM tasks WHERE list_id = $1 ORDER BY position, created_at",
        TASK_COLUMNS
    );
    let rows = sqlx::query_as::<_, TaskRow>(&sql)
        .bind(list_id)
        .fetch_all(&mut *conn)
        .await?;

    let mut tasks = Vec::with_capacity(rows.len());
    for row in rows {
        tasks.push(hydrate(conn, row).await?);
    }
    Ok(tasks)
}

/// `(id, position)` of every persisted task in a list
pub async fn list_positions<'e, E: SqliteExecutor<'e>>(
    executor: E,
    list_id: Uuid,
) -> Result<Vec<(Uuid, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (Uuid, i64)>("SELECT id, position FROM tasks WHERE list_id = $1 ORDER BY position")
        .bind(list_id)
        .fetch_all(executor)
        .await
}

/// Append a task at the end of its list
pub async fn create_task(conn: &mut SqliteConnection, new: NewTask<'_>) -> Result<Task, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let sql = format!(
        r#"
        INSERT INTO tasks (id, list_id, board_id, title, description, status, position, created_by, created_at, updated_at)
        VALUES (
            $1, $2, $3, $4, $5, $6,
            (SELECT COALESCE(MAX(position) + 1, 0) FROM tasks WHERE list_id = $2),
            $7, $8, $9
        )
        RETURNING {}
        "#,
        TASK_COLUMNS
    );
    let row = sqlx::query_as::<_, TaskRow>(&sql)
        .bind(id)
        .bind(new.list_id)
        .bind(new.board_id)
        .bind(new.title)
        .bind(new.description)
        .bind(new.status.as_str())
        .bind(new.created_by)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

    hydrate(conn, row).await
}

/// Place a task in a list at a position
///
/// Returns false when the task does not exist.
pub async fn move_task<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    list_id: Uuid,
    board_id: Uuid,
    position: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE tasks SET list_id = $1, board_id = $2, position = $3, updated_at = $4 WHERE id = $5",
    )
    .bind(list_id)
    .bind(board_id)
    .bind(position)
    .bind(Utc::now())
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Overwrite the provided detail fields
pub async fn update_details<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    details: &TaskDetails,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE tasks SET
            title = COALESCE($1, title),
            description = COALESCE($2, description),
            status = COALESCE($3, status),
            due_date = COALESCE($4, due_date),
            updated_at = $5
        WHERE id = $6
        "#,
    )
    .bind(details.title.as_deref())
    .bind(details.description.as_deref())
    .bind(details.status.map(|s| s.as_str()))
    .bind(details.due_date)
    .bind(Utc::now())
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Replace the assignees of a task
pub async fn set_assignees(conn: &mut SqliteConnection, task_id: Uuid, users: &[Uuid]) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM task_assignees WHERE task_id = $1")
        .bind(task_id)
        .execute(&mut *conn)
        .await?;

    for user_id in users {
        sqlx::query("INSERT OR IGNORE INTO task_assignees (task_id, user_id) VALUES ($1, $2)")
            .bind(task_id)
            .bind(*user_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Delete a task; false when it does not exist
pub async fn delete_task<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn add_comment<'e, E: SqliteExecutor<'e>>(
    executor: E,
    task_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO task_comments (id, task_id, user_id, content, created_at) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(Uuid::new_v4())
    .bind(task_id)
    .bind(user_id)
    .bind(content)
    .bind(Utc::now())
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn add_attachment<'e, E: SqliteExecutor<'e>>(
    executor: E,
    task_id: Uuid,
    filename: &str,
    url: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO task_attachments (id, task_id, filename, url, uploaded_at) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(Uuid::new_v4())
    .bind(task_id)
    .bind(filename)
    .bind(url)
    .bind(Utc::now())
    .execute(executor)
    .await?;
    Ok(())
}
