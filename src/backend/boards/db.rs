/**
 * Board Database Operations
 *
 * Boards and their membership rows. The creator is stored as a member with
 * role `owner`, so membership queries never need to special-case the owner.
 */

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::shared::board::{Board, BoardMember, MemberRole, UserSummary};

#[derive(Debug, sqlx::FromRow)]
struct BoardRow {
    id: Uuid,
    title: String,
    description: String,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    user_id: Uuid,
    name: String,
    email: String,
    role: String,
    joined_at: DateTime<Utc>,
}

impl BoardRow {
    fn into_board(self, members: Vec<BoardMember>) -> Board {
        Board {
            id: self.id,
            title: self.title,
            description: self.description,
            created_by: self.created_by,
            members,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<MemberRow> for BoardMember {
    fn from(row: MemberRow) -> Self {
        BoardMember {
            user: UserSummary {
                id: row.user_id,
                name: row.name,
                email: row.email,
            },
            role: MemberRole::from_str(&row.role).unwrap_or_default(),
            joined_at: row.joined_at,
        }
    }
}

/// Members of a board with their user details, owner first
pub async fn list_members<'e, E: SqliteExecutor<'e>>(
    executor: E,
    board_id: Uuid,
) -> Result<Vec<BoardMember>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT m.user_id, u.name, u.email, m.role, m.joined_at
        FROM board_members m
        JOIN users u ON u.id = m.user_id
        WHERE m.board_id = $1
        ORDER BY CASE m.role WHEN 'owner' THEN 0 ELSE 1 END, m.joined_at
        "#,
    )
    .bind(board_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(BoardMember::from).collect())
}

async fn add_member_row(
    conn: &mut SqliteConnection,
    board_id: Uuid,
    user_id: Uuid,
    role: MemberRole,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO board_members (board_id, user_id, role, joined_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(board_id)
    .bind(user_id)
    .bind(role.as_str())
    .bind(Utc::now())
    .execute(conn)
    .await?;

    Ok(())
}

/// Create a board owned by `owner`
pub async fn create_board(
    pool: &SqlitePool,
    owner: Uuid,
    title: &str,
    description: &str,
) -> Result<Board, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, BoardRow>(
        r#"
        INSERT INTO boards (id, title, description, created_by, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, description, created_by, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(owner)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    add_member_row(&mut tx, id, owner, MemberRole::Owner).await?;
    let members = list_members(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(row.into_board(members))
}

/// Whether `owner` already has a board with this title
pub async fn title_taken(pool: &SqlitePool, owner: Uuid, title: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM boards WHERE created_by = $1 AND title = $2",
    )
    .bind(owner)
    .bind(title)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Get a board with its members
pub async fn find_board(pool: &SqlitePool, id: Uuid) -> Result<Option<Board>, sqlx::Error> {
    let row = sqlx::query_as::<_, BoardRow>(
        r#"
        SELECT id, title, description, created_by, created_at, updated_at
        FROM boards
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let members = list_members(pool, row.id).await?;
            Ok(Some(row.into_board(members)))
        }
        None => Ok(None),
    }
}

/// Boards the user created or was invited to, oldest first
pub async fn boards_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Board>, sqlx::Error> {
    let rows = sqlx::query_as::<_, BoardRow>(
        r#"
        SELECT id, title, description, created_by, created_at, updated_at
        FROM boards
        WHERE created_by = $1
           OR id IN (SELECT board_id FROM board_members WHERE user_id = $1)
        ORDER BY created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut boards = Vec::with_capacity(rows.len());
    for row in rows {
        let members = list_members(pool, row.id).await?;
        boards.push(row.into_board(members));
    }
    Ok(boards)
}

/// Overwrite title and description
pub async fn update_board(
    pool: &SqlitePool,
    id: Uuid,
    title: &str,
    description: &str,
) -> Result<Option<Board>, sqlx::Error> {
    let updated = sqlx::query(
        "UPDATE boards SET title = $1, description = $2, updated_at = $3 WHERE id = $4",
    )
    .bind(title)
    .bind(description)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if updated.rows_affected() == 0 {
        return Ok(None);
    }
    find_board(pool, id).await
}

/// Delete a board with its tasks, lists and memberships
///
/// Returns false when the board does not exist.
pub async fn delete_board(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM tasks WHERE board_id = $1 OR list_id IN (SELECT id FROM lists WHERE board_id = $1)")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM lists WHERE board_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM board_members WHERE board_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM boards WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(deleted.rows_affected() > 0)
}

/// Add a user to a board with role `member`
pub async fn add_member(pool: &SqlitePool, board_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    add_member_row(&mut conn, board_id, user_id, MemberRole::Member).await
}
